//! Export error types.

use ghcard_core::CoreError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Export Error
// ============================================================================

/// Error from rendering or PDF conversion.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The card could not be rendered.
    #[error("Cannot render card: {0}")]
    Render(#[from] CoreError),

    /// No converter was found on `PATH`.
    #[error("No HTML to PDF converter found on PATH (tried: {0})")]
    NoConverter(String),

    /// The configured converter does not exist.
    #[error("Converter not found: {0}")]
    ConverterNotFound(String),

    /// The converter exited unsuccessfully.
    #[error("Converter {program} exited with code {code}: {stderr}")]
    ConverterFailed {
        /// Converter program.
        program: String,
        /// Exit code.
        code: i32,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The converter ran longer than allowed.
    #[error("Converter timed out after {0:?}")]
    Timeout(Duration),

    /// The in-process PDF engine could not lay out the document.
    #[error("PDF engine failed: {0}")]
    Engine(String),

    /// The converter exited cleanly but wrote nothing.
    #[error("Converter produced no output at {0}")]
    EmptyOutput(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ProcessError> for ExportError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::NotFound(program) => Self::ConverterNotFound(program),
            ProcessError::Timeout(timeout) => Self::Timeout(timeout),
            ProcessError::Io(e) => Self::Io(e),
        }
    }
}

impl From<tempfile::PathPersistError> for ExportError {
    fn from(err: tempfile::PathPersistError) -> Self {
        Self::Io(err.error)
    }
}

// ============================================================================
// Process Error
// ============================================================================

/// Error type for process operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Command not found.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Command timed out.
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
