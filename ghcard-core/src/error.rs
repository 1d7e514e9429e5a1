//! Core error types for `ghcard`.

use thiserror::Error;

/// Core error type for `ghcard` operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The username entered is not a usable GitHub login.
    #[error("Invalid GitHub username {input:?}: {reason}")]
    InvalidLogin {
        /// The raw input as entered.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The color is not part of the palette.
    #[error("Unknown color: {0}. Valid colors: green, blue, pink, red")]
    UnknownColor(String),
}
