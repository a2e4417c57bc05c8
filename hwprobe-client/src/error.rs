//! Error types for the HWProbe client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to a diagnostic job service
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote rejected a diagnostic submission
    #[error("submission rejected (status {status}): {message}")]
    Submission {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// Network or connection failure, including per-request timeouts
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body malformed, or an inner envelope could not be decoded
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl ClientError {
    /// Create a submission error from status code and message
    pub fn submission(status: u16, message: impl Into<String>) -> Self {
        Self::Submission {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a submission rejection
    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission { .. })
    }

    /// Check if this error is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this error is a protocol error
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let err = ClientError::submission(400, "unsupported command");
        assert!(err.is_submission());
        assert!(!err.is_transport());
        assert!(!err.is_protocol());

        let err = ClientError::Protocol("truncated body".to_string());
        assert!(err.is_protocol());
        assert!(!err.is_submission());
    }

    #[test]
    fn test_submission_display_includes_status() {
        let err = ClientError::submission(422, "bad argument");
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("bad argument"));
    }
}
