//! Result type alias and process exit status for gdbexport

use super::errors::GdbExportError;

/// Result type alias for gdbexport operations
///
/// # Examples
///
/// ```
/// use gdbexport::domain::result::Result;
/// use gdbexport::domain::errors::GdbExportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GdbExportError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GdbExportError>;

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The export finished and the document was written
    Success,
    /// Any handled failure: configuration, license, connection, resolution,
    /// mapping conflict or transfer fault
    Failure,
    /// Reserved for failures outside the workflow (e.g. logging could not start)
    Unknown,
}

impl ExitStatus {
    /// Numeric process exit code
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Unknown => 2,
        }
    }
}
