//! License manager for the local catalog engine

use crate::adapters::engine::{EngineResult, LicenseManager};
use crate::domain::{LicenseStatus, ProductCode};
use std::sync::Mutex;

/// Grants any product code from a configured list
///
/// Once a product is initialized, further initialize calls report
/// `AlreadyInitialized` for the same code and `Unavailable` for others,
/// matching how a licensed engine behaves within one process.
#[derive(Debug)]
pub struct LocalLicenseManager {
    available: Vec<ProductCode>,
    initialized: Mutex<Option<ProductCode>>,
}

impl LocalLicenseManager {
    pub fn new(available: Vec<ProductCode>) -> Self {
        Self {
            available,
            initialized: Mutex::new(None),
        }
    }
}

impl LicenseManager for LocalLicenseManager {
    fn initialize(&self, product: ProductCode) -> EngineResult<LicenseStatus> {
        let mut initialized = self
            .initialized
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let status = match *initialized {
            Some(current) if current == product => LicenseStatus::AlreadyInitialized,
            Some(_) => LicenseStatus::Unavailable,
            None if self.available.contains(&product) => {
                *initialized = Some(product);
                LicenseStatus::CheckedOut
            }
            None => LicenseStatus::NotLicensed,
        };

        tracing::debug!(product = %product, status = %status, "Local license initialize");
        Ok(status)
    }

    fn initialized_product(&self) -> Option<ProductCode> {
        *self
            .initialized
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn shutdown(&self) {
        let mut initialized = self
            .initialized
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(product) = initialized.take() {
            tracing::debug!(product = %product, "Local license released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grants_available_product() {
        let manager = LocalLicenseManager::new(vec![ProductCode::Editor]);
        assert_eq!(
            manager.initialize(ProductCode::Editor).unwrap(),
            LicenseStatus::CheckedOut
        );
        assert_eq!(manager.initialized_product(), Some(ProductCode::Editor));
        assert_eq!(
            manager.initialize(ProductCode::Editor).unwrap(),
            LicenseStatus::AlreadyInitialized
        );
    }

    #[test]
    fn test_refuses_unlisted_product() {
        let manager = LocalLicenseManager::new(vec![ProductCode::Server]);
        assert_eq!(
            manager.initialize(ProductCode::Editor).unwrap(),
            LicenseStatus::NotLicensed
        );
        assert_eq!(manager.initialized_product(), None);
    }

    #[test]
    fn test_shutdown_clears_product() {
        let manager = LocalLicenseManager::new(ProductCode::ALL.to_vec());
        manager.initialize(ProductCode::Server).unwrap();
        manager.shutdown();
        assert_eq!(manager.initialized_product(), None);
        manager.shutdown();
    }
}
