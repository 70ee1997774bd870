//! Error taxonomy for the War Track Dashboard client.
//!
//! # Design
//! One flat enum instead of an inheritance chain: each variant is a
//! classification of where the failure happened, and every variant carries
//! the originating operation name so a caller can log a complete diagnostic
//! without re-deriving context. 401/403/404/429/5xx get dedicated variants
//! because callers frequently branch on them; every other non-2xx status
//! lands in `Api` with the raw status code and body.

use thiserror::Error;

/// Errors returned by [`crate::Client`] operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input rejected before any network call (malformed date string).
    #[error("{operation}: invalid {field}: {message}")]
    Validation {
        operation: &'static str,
        field: &'static str,
        message: String,
    },

    /// The server returned 401 — the request was not authenticated.
    #[error("{operation}: authentication failed (HTTP 401): {body}")]
    Authentication {
        operation: &'static str,
        body: String,
    },

    /// The server returned 403 — authenticated but not allowed.
    #[error("{operation}: forbidden (HTTP 403): {body}")]
    Forbidden {
        operation: &'static str,
        body: String,
    },

    /// The server returned 404 — the path or resource does not exist.
    #[error("{operation}: not found (HTTP 404): {body}")]
    NotFound {
        operation: &'static str,
        body: String,
    },

    /// The server returned 429 — too many requests.
    #[error("{operation}: rate limited (HTTP 429): {body}")]
    RateLimit {
        operation: &'static str,
        body: String,
    },

    /// The server returned a 5xx status.
    #[error("{operation}: server error (HTTP {status}): {body}")]
    Server {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Any other non-2xx status.
    #[error("{operation}: unexpected HTTP {status}: {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Network-level failure: connection refused, timeout, DNS.
    #[error("{operation}: connection error: {message}")]
    Connection {
        operation: &'static str,
        message: String,
    },

    /// The 2xx response body could not be deserialized into the expected type.
    #[error("{operation}: deserialization failed: {message}")]
    Deserialization {
        operation: &'static str,
        message: String,
    },

    /// The operation was called after `Client::close`.
    #[error("{operation}: client is closed")]
    Closed { operation: &'static str },
}

impl Error {
    /// HTTP status code carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { .. } => Some(401),
            Error::Forbidden { .. } => Some(403),
            Error::NotFound { .. } => Some(404),
            Error::RateLimit { .. } => Some(429),
            Error::Server { status, .. } | Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Name of the operation that produced this error.
    pub fn operation(&self) -> &'static str {
        match self {
            Error::Validation { operation, .. }
            | Error::Authentication { operation, .. }
            | Error::Forbidden { operation, .. }
            | Error::NotFound { operation, .. }
            | Error::RateLimit { operation, .. }
            | Error::Server { operation, .. }
            | Error::Api { operation, .. }
            | Error::Connection { operation, .. }
            | Error::Deserialization { operation, .. }
            | Error::Closed { operation } => operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_operation_and_status() {
        let err = Error::Server {
            operation: "equipments",
            status: 503,
            body: "unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("equipments"));
        assert!(msg.contains("503"));
        assert!(msg.contains("unavailable"));
    }

    #[test]
    fn status_accessor_matches_variant() {
        let err = Error::RateLimit {
            operation: "systems",
            body: String::new(),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.operation(), "systems");

        let err = Error::Connection {
            operation: "health_check",
            message: "refused".to_string(),
        };
        assert_eq!(err.status(), None);
    }
}
