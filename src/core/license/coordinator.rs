//! License coordinator - acquires and releases the engine license
//!
//! One coordinator exists per run. It tries the primary product code, falls
//! back to a single alternate when the primary is refused, and verifies what
//! the engine actually initialized.

use crate::adapters::engine::LicenseManager;
use crate::config::LicenseConfig;
use crate::domain::{
    GdbExportError, LicenseGrant, LicenseState, LicenseStatus, ProductCode, Result,
};
use std::sync::Arc;

/// Ranked product codes to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicensePolicy {
    /// Product code tried first
    pub primary: ProductCode,
    /// Product code tried once if the primary is refused
    pub fallback: ProductCode,
}

impl Default for LicensePolicy {
    fn default() -> Self {
        Self {
            primary: ProductCode::Editor,
            fallback: ProductCode::Server,
        }
    }
}

impl From<&LicenseConfig> for LicensePolicy {
    fn from(config: &LicenseConfig) -> Self {
        Self {
            primary: config.primary_product,
            fallback: config.fallback_product,
        }
    }
}

/// License coordinator
///
/// [`release`](Self::release) is idempotent and also runs on drop, so the
/// engine's shutdown is invoked at most once per coordinator.
pub struct LicenseCoordinator {
    manager: Arc<dyn LicenseManager>,
    policy: LicensePolicy,
    state: LicenseState,
    attempted: bool,
    released: bool,
}

impl LicenseCoordinator {
    /// Create a coordinator over a license manager
    pub fn new(manager: Arc<dyn LicenseManager>, policy: LicensePolicy) -> Self {
        Self {
            manager,
            policy,
            state: LicenseState::Uninitialized,
            attempted: false,
            released: false,
        }
    }

    /// Current license state
    pub fn state(&self) -> &LicenseState {
        &self.state
    }

    /// The policy this coordinator requests licenses with
    pub fn policy(&self) -> LicensePolicy {
        self.policy
    }

    /// Acquire a license
    ///
    /// A mismatch between the requested and the initialized product is logged
    /// as a warning and returned as [`LicenseGrant::Mismatch`]; it is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`GdbExportError::License`] if the engine raises an error
    /// during either initialize call, or if the coordinator was already
    /// released.
    pub fn acquire(&mut self) -> Result<LicenseGrant> {
        if self.released {
            return Err(GdbExportError::License(
                "license coordinator was already released".to_string(),
            ));
        }

        self.attempted = true;

        match self.try_acquire() {
            Ok(grant) => {
                self.state = match grant.product() {
                    Some(product) => LicenseState::Acquired(product),
                    None => LicenseState::Unavailable,
                };
                Ok(grant)
            }
            Err(e) => {
                self.state = LicenseState::Unavailable;
                tracing::error!(error = %e, "License initialization failed");
                Err(e)
            }
        }
    }

    fn try_acquire(&self) -> Result<LicenseGrant> {
        let mut requested = self.policy.primary;
        let status = self.initialize(requested)?;
        tracing::info!(product = %requested, status = %status, "License status");

        let fell_back = if status.is_accepted() {
            tracing::info!(product = %requested, "License available");
            false
        } else {
            tracing::info!(
                product = %requested,
                fallback = %self.policy.fallback,
                "License not available, trying fallback"
            );
            requested = self.policy.fallback;
            let status = self.initialize(requested)?;
            tracing::info!(product = %requested, status = %status, "Fallback license status");
            true
        };

        let initialized = self.manager.initialized_product();
        if initialized == Some(requested) {
            tracing::info!(product = %requested, "License verified");
            Ok(if fell_back {
                LicenseGrant::Fallback(requested)
            } else {
                LicenseGrant::AsRequested(requested)
            })
        } else {
            tracing::warn!(
                requested = %requested,
                initialized = ?initialized,
                "Initialized product does not match the requested product, continuing"
            );
            Ok(LicenseGrant::Mismatch {
                requested,
                initialized,
            })
        }
    }

    fn initialize(&self, product: ProductCode) -> Result<LicenseStatus> {
        self.manager
            .initialize(product)
            .map_err(|e| GdbExportError::License(e.to_string()))
    }

    /// Release the license
    ///
    /// Safe to call at any time and any number of times. The engine's
    /// shutdown runs once, and only if an acquisition was attempted.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if self.attempted {
            self.manager.shutdown();
            tracing::debug!("License released");
        }
        self.state = LicenseState::Uninitialized;
    }
}

impl Drop for LicenseCoordinator {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::FakeLicenseManager;

    fn coordinator(manager: &Arc<FakeLicenseManager>) -> LicenseCoordinator {
        LicenseCoordinator::new(manager.clone(), LicensePolicy::default())
    }

    #[test]
    fn test_primary_granted() {
        let manager = Arc::new(FakeLicenseManager::new());
        let mut coordinator = coordinator(&manager);

        let grant = coordinator.acquire().unwrap();

        assert_eq!(grant, LicenseGrant::AsRequested(ProductCode::Editor));
        assert_eq!(
            coordinator.state(),
            &LicenseState::Acquired(ProductCode::Editor)
        );
        assert_eq!(manager.initialize_calls(), vec![ProductCode::Editor]);
    }

    #[test]
    fn test_falls_back_once() {
        let manager = Arc::new(FakeLicenseManager::new().refusing(ProductCode::Editor));
        let mut coordinator = coordinator(&manager);

        let grant = coordinator.acquire().unwrap();

        assert_eq!(grant, LicenseGrant::Fallback(ProductCode::Server));
        assert_eq!(
            manager.initialize_calls(),
            vec![ProductCode::Editor, ProductCode::Server]
        );
    }

    #[test]
    fn test_mismatch_is_not_fatal() {
        let manager = Arc::new(
            FakeLicenseManager::new().reporting_initialized(Some(ProductCode::Viewer)),
        );
        let mut coordinator = coordinator(&manager);

        let grant = coordinator.acquire().unwrap();

        assert!(!grant.is_verified());
        assert_eq!(grant.product(), Some(ProductCode::Viewer));
        assert_eq!(
            coordinator.state(),
            &LicenseState::Acquired(ProductCode::Viewer)
        );
    }

    #[test]
    fn test_both_refused_is_unverified() {
        let manager = Arc::new(
            FakeLicenseManager::new()
                .refusing(ProductCode::Editor)
                .with_status(ProductCode::Server, LicenseStatus::Unavailable),
        );
        let mut coordinator = coordinator(&manager);

        let grant = coordinator.acquire().unwrap();

        assert_eq!(
            grant,
            LicenseGrant::Mismatch {
                requested: ProductCode::Server,
                initialized: None,
            }
        );
        assert_eq!(coordinator.state(), &LicenseState::Unavailable);
    }

    #[test]
    fn test_error_is_returned() {
        let manager = Arc::new(FakeLicenseManager::new().failing());
        let mut coordinator = coordinator(&manager);

        let result = coordinator.acquire();

        assert!(matches!(result, Err(GdbExportError::License(_))));
        assert_eq!(coordinator.state(), &LicenseState::Unavailable);
    }

    #[test]
    fn test_release_without_acquire_skips_shutdown() {
        let manager = Arc::new(FakeLicenseManager::new());
        let mut coordinator = coordinator(&manager);

        coordinator.release();
        drop(coordinator);

        assert_eq!(manager.shutdown_calls(), 0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let manager = Arc::new(FakeLicenseManager::new());
        let mut coordinator = coordinator(&manager);

        coordinator.acquire().unwrap();
        coordinator.release();
        coordinator.release();
        drop(coordinator);

        assert_eq!(manager.shutdown_calls(), 1);
    }

    #[test]
    fn test_drop_releases() {
        let manager = Arc::new(FakeLicenseManager::new().failing());
        {
            let mut coordinator = coordinator(&manager);
            let _ = coordinator.acquire();
        }
        assert_eq!(manager.shutdown_calls(), 1);
    }

    #[test]
    fn test_policy_from_config() {
        let config = LicenseConfig {
            primary_product: ProductCode::Info,
            fallback_product: ProductCode::Engine,
            available_products: vec![ProductCode::Engine],
        };
        let policy = LicensePolicy::from(&config);
        assert_eq!(policy.primary, ProductCode::Info);
        assert_eq!(policy.fallback, ProductCode::Engine);
    }
}
