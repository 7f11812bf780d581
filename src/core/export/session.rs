//! Top-level failure boundary of an export run
//!
//! Acquires the license, runs the orchestrator and maps the outcome to an
//! [`ExitStatus`]. The license is released exactly once on every path.

use crate::core::export::orchestrator::ExportOrchestrator;
use crate::core::license::LicenseCoordinator;
use crate::domain::{ExitStatus, ExportRequest, GdbExportError, LicenseGrant};
use crate::logging::CONSOLE;

/// Run one export under a license
///
/// Errors are not returned: every failure is logged as `Error` to both
/// console streams, followed by its message, and reported as
/// [`ExitStatus::Failure`].
pub fn run_with_license(
    coordinator: &mut LicenseCoordinator,
    orchestrator: &ExportOrchestrator,
    request: &ExportRequest,
) -> ExitStatus {
    let outcome = coordinator.acquire().and_then(|grant| {
        if let LicenseGrant::Mismatch { requested, initialized } = grant {
            tracing::debug!(requested = %requested, initialized = ?initialized, "Proceeding with unverified license");
        }
        orchestrator.run(request)
    });

    let status = match outcome {
        Ok(summary) => {
            summary.log_summary();
            ExitStatus::Success
        }
        Err(e) => {
            report_failure(&e);
            ExitStatus::Failure
        }
    };

    coordinator.release();
    status
}

fn report_failure(error: &GdbExportError) {
    tracing::error!(target: CONSOLE, "Error");
    crate::log_error_with_context!(error, "Export failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::{FakeEngine, FakeLicenseManager};
    use crate::core::license::LicensePolicy;
    use crate::domain::ExportRequestBuilder;
    use std::sync::Arc;

    #[test]
    fn test_success_releases_once() {
        let manager = Arc::new(FakeLicenseManager::new());
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1"]));
        let mut coordinator = LicenseCoordinator::new(manager.clone(), LicensePolicy::default());
        let orchestrator = ExportOrchestrator::new(engine);
        let request = ExportRequestBuilder::new()
            .connection_descriptor("prod.toml")
            .names_csv("T.TAB1")
            .build()
            .unwrap();

        let status = run_with_license(&mut coordinator, &orchestrator, &request);
        drop(coordinator);

        assert_eq!(status, ExitStatus::Success);
        assert_eq!(manager.shutdown_calls(), 1);
    }

    #[test]
    fn test_license_error_skips_workflow() {
        let manager = Arc::new(FakeLicenseManager::new().failing());
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1"]));
        let mut coordinator = LicenseCoordinator::new(manager.clone(), LicensePolicy::default());
        let orchestrator = ExportOrchestrator::new(engine.clone());
        let request = ExportRequestBuilder::new()
            .connection_descriptor("prod.toml")
            .names_csv("T.TAB1")
            .build()
            .unwrap();

        let status = run_with_license(&mut coordinator, &orchestrator, &request);

        assert_eq!(status, ExitStatus::Failure);
        assert!(engine.calls().is_empty());
        assert_eq!(manager.shutdown_calls(), 1);
    }
}
