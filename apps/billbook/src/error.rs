//! # CLI Error Type
//!
//! Unified error type for every subcommand.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Billbook                               │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, CliError>                                                   │
//! │         │                                                               │
//! │         ├── ValidationError / CoreError ── shown verbatim ──┐          │
//! │         │                                                   │          │
//! │         ├── ClientError::Rejected ─── server message ───────┤          │
//! │         │                                                   ▼          │
//! │         ├── ClientError::Server/Decode ── error! log ──► CliError ──► │
//! │         │                                  generic banner   │  stderr  │
//! │         │                                                   │  + exit  │
//! │         └── ExportError / io ─────────── path + cause ──────┘  code    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internals (status bodies, decode failures) go to the log, never to the
//! user's terminal.

use billbook_client::ClientError;
use billbook_core::{CoreError, ValidationError};
use billbook_export::ExportError;
use tracing::error;

/// Error returned from a subcommand.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Machine-readable category, decides the exit code
    pub code: ErrorCode,

    /// Human-readable message for the terminal
    pub message: String,
}

/// Error categories.
///
/// ## Exit Codes
/// | Code | Exit |
/// |---|---|
/// | Validation | 2 |
/// | NotFound | 3 |
/// | Rejected | 4 |
/// | Unauthorized | 5 |
/// | Network | 6 |
/// | Server | 7 |
/// | Config | 8 |
/// | Export | 9 |
/// | Io | 10 |
/// | Cancelled | 130 |
/// | Internal | 1 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input failed local validation
    Validation,

    /// The backend has no such record (404)
    NotFound,

    /// The backend refused the request (4xx)
    Rejected,

    /// Missing or rejected credentials (401/403)
    Unauthorized,

    /// The backend could not be reached or timed out
    Network,

    /// The backend failed (5xx)
    Server,

    /// Config file or environment is invalid
    Config,

    /// Writing a report file failed
    Export,

    /// Local file I/O failed
    Io,

    /// The user declined a confirmation
    Cancelled,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit code for the category.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::Validation => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::Rejected => 4,
            ErrorCode::Unauthorized => 5,
            ErrorCode::Network => 6,
            ErrorCode::Server => 7,
            ErrorCode::Config => 8,
            ErrorCode::Export => 9,
            ErrorCode::Io => 10,
            ErrorCode::Cancelled => 130,
        }
    }
}

const SERVER_BANNER: &str = "The billing server could not complete the request. Please try again later.";
const NETWORK_BANNER: &str = "Could not reach the billing server. Check backend.base_url and your connection.";

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::NotFound, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Config, message)
    }

    pub fn cancelled() -> Self {
        CliError::new(ErrorCode::Cancelled, "Cancelled")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Converts core errors to CLI errors. Every core error is caused by the
/// user's input, so the message is shown as is.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Converts backend errors to CLI errors.
impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(e) => CliError::validation(e.to_string()),
            ClientError::NotFound { message } => CliError::not_found(message),
            ClientError::Rejected { message, .. } => CliError::new(ErrorCode::Rejected, message),
            ClientError::Unauthorized { message } => CliError::new(
                ErrorCode::Unauthorized,
                format!("Not authorized: {}", message),
            ),
            ClientError::Server { status, message } => {
                error!(status, "Backend failed: {}", message);
                CliError::new(ErrorCode::Server, SERVER_BANNER)
            }
            ClientError::Timeout => CliError::new(ErrorCode::Network, "Request timed out"),
            ClientError::Connection(e) => {
                error!("Connection failed: {}", e);
                CliError::new(ErrorCode::Network, NETWORK_BANNER)
            }
            ClientError::Request(e) => {
                error!("Request failed: {}", e);
                CliError::new(ErrorCode::Network, NETWORK_BANNER)
            }
            ClientError::Decode(e) => {
                error!("Unexpected backend response: {}", e);
                CliError::internal("Unexpected response from the billing server")
            }
            ClientError::Config(e) => CliError::config(format!("Invalid backend settings: {}", e)),
        }
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnsupportedFormat(_) => CliError::validation(err.to_string()),
            other => {
                error!("Export failed: {:?}", other);
                CliError::new(ErrorCode::Export, other.to_string())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::Io, err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::validation(format!("Invalid TOML: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        error!("TOML serialization failed: {}", err);
        CliError::internal("Could not serialize settings")
    }
}

impl From<inquire::InquireError> for CliError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => CliError::cancelled(),
            inquire::InquireError::NotTTY => {
                CliError::validation("Cannot ask for confirmation here; pass --yes to proceed")
            }
            other => CliError::internal(other.to_string()),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for subcommands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_is_verbatim() {
        let err: CliError = ClientError::Rejected {
            status: 400,
            message: "Party code already exists".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Rejected);
        assert_eq!(err.to_string(), "Party code already exists");
    }

    #[test]
    fn test_server_internals_are_hidden() {
        let err: CliError = ClientError::Server {
            status: 500,
            message: "MongoServerError: connection pool closed".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Server);
        assert!(!err.message.contains("Mongo"));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_validation_errors_map_to_exit_two() {
        let err: CliError = ValidationError::DatesRequired.into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.message, "Both start date and end date are required.");

        let err: CliError = CoreError::EmptySheet.into();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[test]
    fn test_unsupported_export_is_validation() {
        let err: CliError = ExportError::UnsupportedFormat("csv".into()).into();
        assert_eq!(err.code, ErrorCode::Validation);
    }
}
