//! GitHub login validation.
//!
//! Logins are interpolated into API paths, so anything that is not a plain
//! GitHub username is rejected before any request is built.

use crate::error::CoreError;

/// Longest login GitHub accepts.
pub const MAX_LOGIN_LEN: usize = 39;

/// Validates a username as typed by the user and returns the trimmed login.
///
/// Accepts ASCII letters, digits and hyphens, not starting with a hyphen,
/// at most [`MAX_LOGIN_LEN`] characters.
///
/// # Errors
///
/// Returns [`CoreError::InvalidLogin`] for empty or malformed input.
pub fn validate_login(input: &str) -> Result<String, CoreError> {
    let login = input.trim();
    let invalid = |reason| CoreError::InvalidLogin {
        input: input.to_string(),
        reason,
    };

    if login.is_empty() {
        return Err(invalid("username is empty"));
    }
    if login.len() > MAX_LOGIN_LEN {
        return Err(invalid("username is longer than 39 characters"));
    }
    if login.starts_with('-') {
        return Err(invalid("username cannot start with a hyphen"));
    }
    if !login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid("only letters, digits and hyphens are allowed"));
    }

    Ok(login.to_string())
}
