//! Error types for kernel-sweep.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for kernel-sweep operations.
///
/// Each variant maps to a specific process exit code. Outcomes that are not
/// failures (nothing to do, user abort) are reported through
/// `CleanupOutcome`, never through this type.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Invalid configuration or other user-correctable state.
    #[error("{0}")]
    UserError(String),

    /// A required external tool is not installed.
    #[error("required tool not found: {0}")]
    MissingTool(String),

    /// A query or inspection command failed or produced unusable output.
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// The package manager failed to purge the requested packages.
    #[error("package purge failed: {0}")]
    PurgeFailed(String),
}

impl SweepError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SweepError::UserError(_) => exit_codes::USER_ERROR,
            SweepError::MissingTool(_) => exit_codes::MISSING_TOOL,
            SweepError::CommandFailed(_) => exit_codes::COMMAND_FAILURE,
            SweepError::PurgeFailed(_) => exit_codes::COMMAND_FAILURE,
        }
    }
}

/// Result type alias for kernel-sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
