//! # Client Error Types
//!
//! Error types for requests to the backend service.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / HTTP status / JSON body                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module) ← Adds context and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← User-facing message + exit code                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use billbook_core::{CoreError, ValidationError};
use thiserror::Error;

/// Backend request errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered 404.
    ///
    /// ## When This Occurs
    /// - Deleting a bill that was already deleted
    /// - No bills exist for the requested week on some deployments
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The backend refused the request (4xx other than 401/403/404).
    ///
    /// ## When This Occurs
    /// - Duplicate party code
    /// - Bills already exist for the submitted week
    /// - Missing fields the backend checks
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The backend answered 401 or 403.
    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    /// The backend failed (5xx).
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request did not complete in time.
    #[error("Request timed out")]
    Timeout,

    /// The backend could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Client misconfiguration (base URL, token header).
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// Any other transport failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// Local validation failed before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Builds the right variant for a non-success status.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized { message },
            404 => ClientError::NotFound { message },
            400..=499 => ClientError::Rejected { status, message },
            _ => ClientError::Server { status, message },
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Decode(message.into())
    }

    /// HTTP status the backend answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::NotFound { .. } => Some(404),
            ClientError::Rejected { status, .. } | ClientError::Server { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Convert reqwest errors to ClientError.
///
/// ## Error Mapping
/// ```text
/// timeout           → ClientError::Timeout
/// connect failure   → ClientError::Connection
/// body decode       → ClientError::Decode
/// builder (bad url) → ClientError::Config
/// Other             → ClientError::Request
/// ```
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::Config(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(format!("invalid base URL: {err}"))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(inner) => ClientError::Validation(inner),
            other => ClientError::Decode(other.to_string()),
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
