//! Error Handling Module
//!
//! Defines the crate's error taxonomy: every failed dispatch ends in exactly
//! one of these variants. Transport-level failures (no response received at
//! all) carry a typed [`TransportFailure`] cause instead of a free-form
//! message, so callers and tests can match on the cause structurally.

use thiserror::Error;

/// Cause of a transport-level failure, i.e. the call never produced a
/// classifiable response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established (refused, DNS, TLS).
    #[error("connection failed")]
    ConnectionFailed,

    /// A response arrived but with a non-success HTTP status, before any
    /// application-level classification could apply.
    #[error("http status {0}")]
    HttpStatus(u16),

    /// Any other transport error reported by the HTTP client.
    #[error("{0}")]
    Other(String),
}

impl TransportFailure {
    /// Map a `reqwest` error into a typed cause.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed
        } else if let Some(status) = err.status() {
            Self::HttpStatus(status.as_u16())
        } else {
            Self::Other(err.to_string())
        }
    }

    /// Human-readable message surfaced through the notification sink.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout => "System interface request timed out".to_string(),
            Self::ConnectionFailed => "Backend connection failed".to_string(),
            Self::HttpStatus(status) => format!("System interface {status} exception"),
            Self::Other(msg) => msg.clone(),
        }
    }
}

/// Main error type for the request orchestration layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A mutating request matched the most recent submission within the
    /// suppression window and was rejected before reaching the network.
    #[error("Data is being processed, please do not resubmit")]
    DuplicateSubmission,

    /// The session was rejected by the backend (application code 401).
    #[error("Invalid session, or session expired, please log in again")]
    Unauthorized,

    /// Application code 500.
    #[error("{message}")]
    Server { message: String },

    /// Application code 601, surfaced as non-fatal but still an error for
    /// the caller.
    #[error("{message}")]
    Warning { message: String },

    /// Any other non-success application code.
    #[error("{message}")]
    Api { code: i64, message: String },

    /// No classifiable response was received.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportFailure),

    /// A response body could not be decoded (malformed JSON, bad UTF-8).
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O failure while persisting a downloaded file.
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid client configuration (header values, base URL, missing port).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Construct an application-level error from a code and message.
    pub fn api_error(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// True if this error represents a rejected session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// The application or HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<i64> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Server { .. } => Some(500),
            Self::Warning { .. } => Some(601),
            Self::Api { code, .. } => Some(*code),
            Self::Transport(TransportFailure::HttpStatus(status)) => Some(i64::from(*status)),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(ApiError::Unauthorized.status_code(), Some(401));
        assert_eq!(
            ApiError::Server {
                message: "boom".into()
            }
            .status_code(),
            Some(500)
        );
        assert_eq!(ApiError::api_error(418, "teapot").status_code(), Some(418));
        assert_eq!(
            ApiError::Transport(TransportFailure::HttpStatus(502)).status_code(),
            Some(502)
        );
        assert_eq!(ApiError::DuplicateSubmission.status_code(), None);
    }

    #[test]
    fn transport_user_messages() {
        assert_eq!(
            TransportFailure::Timeout.user_message(),
            "System interface request timed out"
        );
        assert_eq!(
            TransportFailure::HttpStatus(502).user_message(),
            "System interface 502 exception"
        );
    }
}
