//! Fetch error types.

use thiserror::Error;

/// Error from a single GitHub API request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// The API answered with a non-2xx status.
    #[error("GitHub API returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` from the error body, or the status reason.
        message: String,
    },

    /// The request never got a response (DNS, connect, TLS, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected.
    #[error("Invalid JSON response: {0}")]
    Parse(String),

    /// The configured API base URL or a built path is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Returns the HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Transport(format!("request timed out: {err}"));
        }
        if err.is_decode() {
            return Self::Parse(err.to_string());
        }
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = HttpError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());

        let err = HttpError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_json_error_is_parse() {
        let err: HttpError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, HttpError::Parse(_)));
    }
}
