//! Client Error Taxonomy
//!
//! One error type drives all failure reporting in the client. The variants
//! follow the four failure classes the backend can produce plus the local
//! decode case:
//!
//! - `Network` - transport failures (connect, timeout, broken stream)
//! - `Auth` - 401/403 responses
//! - `Validation` - input rejected locally before any network call
//! - `Domain` - any other non-success response (rules enforced server-side)
//! - `Decode` - malformed or unexpected response body
//!
//! Keeping the taxonomy in one place lets every component surface failures
//! uniformly instead of choosing between silent logs, alerts, and inline
//! strings per call site.

use thiserror::Error;

/// Unified client error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Transport-level failure; the request may never have reached the server
    #[error("network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// The server rejected the credentials or the caller's permissions
    #[error("authorization failed ({status}): {message}")]
    Auth {
        /// HTTP status code (401 or 403)
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// Input rejected locally; no network call was made
    #[error("validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The server refused the operation for a domain rule
    #[error("request rejected ({status}): {message}")]
    Domain {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// The response body could not be interpreted
    #[error("malformed response: {message}")]
    Decode {
        /// Human-readable error message
        message: String,
    },
}

impl ClientError {
    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new authorization error
    pub fn auth(status: u16, message: impl Into<String>) -> Self {
        Self::Auth {
            status,
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new domain error
    pub fn domain(status: u16, message: impl Into<String>) -> Self {
        Self::Domain {
            status,
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Classify a non-success HTTP status. 401 and 403 become [`Self::Auth`],
    /// everything else [`Self::Domain`].
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::auth(status, message),
            _ => Self::domain(status, message),
        }
    }

    /// Whether this error is an authorization failure
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}
