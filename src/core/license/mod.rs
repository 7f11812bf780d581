//! License acquisition with product-code fallback

pub mod coordinator;

pub use coordinator::{LicenseCoordinator, LicensePolicy};
