//! Core error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by every client operation.
///
/// Operations are all-or-nothing: an `Err` never carries a partial result.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Bad or missing endpoint, model or credential setup.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Malformed request payload. The message names the offending field(s).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Credential resolution failed (identity exchange rejected, unreachable, ...).
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// A local resource (e.g. the audio file to transcribe) could not be read.
    #[error("File access error for {}: {message}", path.display())]
    FileAccessError { path: PathBuf, message: String },

    /// The remote service answered with a non-success status.
    #[error("Service error ({status}): {message}")]
    ServiceError {
        status: u16,
        message: String,
        /// Structured error body returned by the service, when it sent JSON.
        body: Option<serde_json::Value>,
    },

    /// Cancellation was observed while the operation was in flight.
    #[error("Operation cancelled")]
    OperationCancelled,

    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// A success response could not be decoded into the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON (de)serialization error outside of response decoding.
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Coarse error classification, useful for presentation and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Authentication,
    FileAccess,
    RateLimit,
    Client,
    Server,
    Cancelled,
    Network,
    Parsing,
}

impl LlmError {
    /// Build a `ServiceError`.
    pub fn service_error(
        status: u16,
        message: impl Into<String>,
        body: Option<serde_json::Value>,
    ) -> Self {
        Self::ServiceError {
            status,
            message: message.into(),
            body,
        }
    }

    /// Build a `FileAccessError` from an I/O failure.
    pub fn file_access(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::FileAccessError {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// HTTP status code, for service errors.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServiceError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured error body returned by the service, if any.
    pub const fn service_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::ServiceError { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::ValidationError(_) => ErrorCategory::Validation,
            Self::AuthenticationError(_) => ErrorCategory::Authentication,
            Self::FileAccessError { .. } => ErrorCategory::FileAccess,
            Self::ServiceError { status, .. } => match *status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            Self::OperationCancelled => ErrorCategory::Cancelled,
            Self::HttpError(_) => ErrorCategory::Network,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }

    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::OperationCancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_categories_follow_status() {
        assert_eq!(
            LlmError::service_error(401, "nope", None).category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            LlmError::service_error(429, "slow down", None).category(),
            ErrorCategory::RateLimit
        );
        assert_eq!(
            LlmError::service_error(503, "busy", None).category(),
            ErrorCategory::Server
        );
        assert_eq!(
            LlmError::service_error(404, "missing", None).category(),
            ErrorCategory::Client
        );
    }

    #[test]
    fn file_access_error_display_includes_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = LlmError::file_access("/tmp/batman.wav", &io);
        let text = err.to_string();
        assert!(text.contains("/tmp/batman.wav"));
        assert!(text.contains("no such file"));
        assert_eq!(err.category(), ErrorCategory::FileAccess);
    }

    #[test]
    fn status_code_only_for_service_errors() {
        assert_eq!(LlmError::OperationCancelled.status_code(), None);
        let err = LlmError::service_error(
            400,
            "bad",
            Some(serde_json::json!({"error": {"code": "bad"}})),
        );
        assert_eq!(err.status_code(), Some(400));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert_eq!(err.service_body().unwrap()["error"]["code"], "bad");
    }
}
