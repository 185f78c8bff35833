// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system. The
//! facade in `api::facade` is the boundary where these errors stop: past it,
//! an upstream failure is indistinguishable from "empty" or "not found".

use std::fmt;
use thiserror::Error;

/// Upstream HTTP failures as a typed vocabulary.
///
/// The upstream reports errors mostly through status codes with loosely
/// shaped bodies, so the status is what gets classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamErrorCode {
    /// The requested resource or record does not exist
    NotFound,
    /// Upstream rate limit exceeded
    RateLimited,
    /// The upstream refused our credentials or lack thereof
    Unauthorized,
    /// Upstream internal error
    ServerError,
    /// Upstream is temporarily unavailable
    ServiceUnavailable,
    /// Any other non-success status
    HttpStatus(u16),
}

impl UpstreamErrorCode {
    /// Classifies an HTTP status code returned by the upstream.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            429 => Self::RateLimited,
            401 | 403 => Self::Unauthorized,
            500 => Self::ServerError,
            502..=504 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error means the record simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for UpstreamErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::ServerError => write!(f, "server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Upstream returned an error ({code}) for {url}")]
    UpstreamStatus {
        code: UpstreamErrorCode,
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("No {resource} record with uid {uid}")]
    RecordNotFound { resource: String, uid: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Whether this error is an upstream "does not exist" answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::UpstreamStatus { code, .. } if code.is_not_found())
    }
}

/// Domain vocabulary for why the adaptation layer produced fewer results
/// than the upstream holds.
///
/// This is not an error type. None of these reach the caller as errors; they
/// classify what gets logged, and `PageBoundExceeded` is also reported
/// through the full-scan outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum AdaptationFailure {
    /// The HTTP call failed, returned a non-success status, or a body that
    /// is not JSON.
    TransportFailure { cause: String },
    /// The body matched none of the known envelope shapes.
    ShapeUnrecognized { keys: Vec<String> },
    /// A single record could not be decoded into its target type.
    FieldDecodeFailure { cause: String },
    /// A full scan hit its page cap while the upstream still had more.
    PageBoundExceeded { pages: u32 },
}

impl fmt::Display for AdaptationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportFailure { cause } => write!(f, "transport failure: {}", cause),
            Self::ShapeUnrecognized { keys } => {
                write!(f, "unrecognized response shape (keys: [{}])", keys.join(", "))
            }
            Self::FieldDecodeFailure { cause } => write!(f, "record dropped: {}", cause),
            Self::PageBoundExceeded { pages } => write!(
                f,
                "full scan stopped after {} pages while more were available",
                pages
            ),
        }
    }
}

impl From<&AppError> for AdaptationFailure {
    fn from(error: &AppError) -> Self {
        Self::TransportFailure {
            cause: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert_eq!(UpstreamErrorCode::from_http_status(404), UpstreamErrorCode::NotFound);
        assert_eq!(UpstreamErrorCode::from_http_status(429), UpstreamErrorCode::RateLimited);
        assert_eq!(UpstreamErrorCode::from_http_status(403), UpstreamErrorCode::Unauthorized);
        assert_eq!(
            UpstreamErrorCode::from_http_status(503),
            UpstreamErrorCode::ServiceUnavailable
        );
        assert_eq!(
            UpstreamErrorCode::from_http_status(418),
            UpstreamErrorCode::HttpStatus(418)
        );
        assert_eq!(UpstreamErrorCode::HttpStatus(418).to_string(), "http_418");
    }

    #[test]
    fn not_found_is_detected_through_app_error() {
        let err = AppError::UpstreamStatus {
            code: UpstreamErrorCode::NotFound,
            status: reqwest::StatusCode::NOT_FOUND,
            url: "https://example.test/films/99".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!AppError::Validation("x".to_string()).is_not_found());
    }

    #[test]
    fn adaptation_failure_display() {
        let failure = AdaptationFailure::ShapeUnrecognized {
            keys: vec!["message".to_string(), "data".to_string()],
        };
        assert_eq!(
            failure.to_string(),
            "unrecognized response shape (keys: [message, data])"
        );
        assert_eq!(
            AdaptationFailure::PageBoundExceeded { pages: 10 }.to_string(),
            "full scan stopped after 10 pages while more were available"
        );
    }

    #[test]
    fn request_errors_are_transport_failures() {
        let err = AppError::MalformedResponse {
            url: "https://example.test/films".to_string(),
            reason: "expected value".to_string(),
        };
        assert!(matches!(
            AdaptationFailure::from(&err),
            AdaptationFailure::TransportFailure { .. }
        ));
    }
}
