//! License domain types
//!
//! Product codes are the capability tiers an engine can be initialized with.
//! The coordinator in [`crate::core::license`] drives the acquisition; these
//! types only describe its inputs and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability tier requested from the geodatabase engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCode {
    /// Read-only desktop tier
    #[serde(alias = "arcview")]
    Viewer,
    /// Mid-tier desktop level with geodatabase editing
    #[serde(alias = "arceditor")]
    Editor,
    /// Full desktop tier
    #[serde(alias = "arcinfo")]
    Info,
    /// Server tier
    #[serde(alias = "arcserver")]
    Server,
    /// Embedded engine runtime
    Engine,
}

impl ProductCode {
    /// All product codes, lowest tier first
    pub const ALL: [ProductCode; 5] = [
        ProductCode::Viewer,
        ProductCode::Editor,
        ProductCode::Info,
        ProductCode::Server,
        ProductCode::Engine,
    ];

    /// Lowercase name as used in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCode::Viewer => "viewer",
            ProductCode::Editor => "editor",
            ProductCode::Info => "info",
            ProductCode::Server => "server",
            ProductCode::Engine => "engine",
        }
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "viewer" | "arcview" => Ok(ProductCode::Viewer),
            "editor" | "arceditor" => Ok(ProductCode::Editor),
            "info" | "arcinfo" => Ok(ProductCode::Info),
            "server" | "arcserver" => Ok(ProductCode::Server),
            "engine" => Ok(ProductCode::Engine),
            other => Err(format!(
                "Invalid product code '{other}'. Must be one of: viewer, editor, info, server, engine"
            )),
        }
    }
}

/// Status returned by the engine for one initialize attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    AlreadyInitialized,
    Available,
    CheckedOut,
    NotLicensed,
    Unavailable,
    Failure,
}

impl LicenseStatus {
    /// Whether this status counts as a usable license
    pub fn is_accepted(self) -> bool {
        matches!(
            self,
            LicenseStatus::AlreadyInitialized | LicenseStatus::Available | LicenseStatus::CheckedOut
        )
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LicenseStatus::AlreadyInitialized => "already-initialized",
            LicenseStatus::Available => "available",
            LicenseStatus::CheckedOut => "checked-out",
            LicenseStatus::NotLicensed => "not-licensed",
            LicenseStatus::Unavailable => "unavailable",
            LicenseStatus::Failure => "failure",
        };
        f.write_str(name)
    }
}

/// License state owned by the coordinator for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LicenseState {
    #[default]
    Uninitialized,
    Acquired(ProductCode),
    Unavailable,
}

/// Outcome of a completed acquisition
///
/// Callers decide the policy for [`LicenseGrant::Mismatch`]; the default
/// workflow proceeds with whatever the engine actually initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseGrant {
    /// The primary product code was granted and verified
    AsRequested(ProductCode),
    /// The primary was refused; the fallback was granted and verified
    Fallback(ProductCode),
    /// The engine initialized something other than the last requested code
    Mismatch {
        requested: ProductCode,
        initialized: Option<ProductCode>,
    },
}

impl LicenseGrant {
    /// The product code the engine is actually running with, if any
    pub fn product(&self) -> Option<ProductCode> {
        match *self {
            LicenseGrant::AsRequested(code) | LicenseGrant::Fallback(code) => Some(code),
            LicenseGrant::Mismatch { initialized, .. } => initialized,
        }
    }

    /// Whether the initialized product matched the request
    pub fn is_verified(&self) -> bool {
        !matches!(self, LicenseGrant::Mismatch { .. })
    }
}
