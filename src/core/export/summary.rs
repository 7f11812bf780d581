//! Export summary and reporting

use crate::domain::ExportMode;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of a completed export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Schema only, or schema and data
    pub mode: ExportMode,

    /// Path of the written XML workspace document
    pub output_path: PathBuf,

    /// Destination names of the exported feature classes
    pub feature_classes: Vec<String>,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a summary with a zero duration
    pub fn new(mode: ExportMode, output_path: PathBuf, feature_classes: Vec<String>) -> Self {
        Self {
            mode,
            output_path,
            feature_classes,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Number of exported feature classes
    pub fn exported_count(&self) -> usize {
        self.feature_classes.len()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            mode = %self.mode,
            output = %self.output_path.display(),
            feature_classes = %self.feature_classes.join(", "),
            count = self.exported_count(),
            duration_secs = self.duration.as_secs_f64(),
            "Export summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_feature_classes() {
        let summary = ExportSummary::new(
            ExportMode::SchemaOnly,
            PathBuf::from("gdbexp.xml"),
            vec!["TAB1".to_string(), "TAB2".to_string()],
        )
        .with_duration(Duration::from_millis(250));

        assert_eq!(summary.exported_count(), 2);
        assert_eq!(summary.duration, Duration::from_millis(250));
        summary.log_summary();
    }
}
