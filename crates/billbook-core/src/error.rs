//! # Error Types
//!
//! Domain-specific error types for billbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billbook-core errors (this file)                                      │
//! │  ├── CoreError        - Sheet / report domain errors                   │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  billbook-client errors (separate crate)                               │
//! │  └── ClientError      - Backend request failures                       │
//! │                                                                         │
//! │  billbook-export errors (separate crate)                               │
//! │  └── ExportError      - File encoding failures                         │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the terminal shows                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → CliError → stderr   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Several messages are shown verbatim to the user, so their wording is part
//! of the contract and pinned by the tests below.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while building sheets and reports.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sheet row index outside the sheet.
    #[error("Row {row} does not exist (sheet has {rows} rows)")]
    UnknownRow { row: usize, rows: usize },

    /// A party code that has no row in the sheet.
    #[error("No row for party code {0}")]
    UnknownPartyCode(String),

    /// Two sheet rows share a party code.
    ///
    /// ## When This Occurs
    /// - A hand-edited sheet file repeats a row
    /// - The party list returned by the backend contains a duplicate
    #[error("Party code {0} appears more than once in the sheet")]
    DuplicatePartyCode(String),

    /// The sheet has no rows to submit.
    #[error("There are no parties in this sheet")]
    EmptySheet,

    /// The sheet exceeds the row limit.
    #[error("A sheet cannot have more than {max} rows")]
    SheetTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before any request leaves the machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., bad date, bad amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The add-party form was submitted with a blank field.
    #[error("Please enter all details to submit")]
    IncompletePartyForm,

    /// Party name or code contains something other than ASCII letters/digits.
    #[error("Party Name and Party Code should only contain alphanumeric characters")]
    PartyCharacters,

    /// A party-wise lookup was requested without both name and code.
    #[error("Please select a party and a code")]
    PartySelectionRequired,

    /// A week or range operation is missing one of its dates.
    #[error("Both start date and end date are required.")]
    DatesRequired,

    /// The range ends before it starts.
    #[error("Start date {start} is after end date {end}")]
    DateOrder { start: String, end: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            ValidationError::IncompletePartyForm.to_string(),
            "Please enter all details to submit"
        );
        assert_eq!(
            ValidationError::PartyCharacters.to_string(),
            "Party Name and Party Code should only contain alphanumeric characters"
        );
        assert_eq!(
            ValidationError::DatesRequired.to_string(),
            "Both start date and end date are required."
        );
        assert_eq!(
            ValidationError::PartySelectionRequired.to_string(),
            "Please select a party and a code"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::DateOrder {
            start: "2024-02-10".to_string(),
            end: "2024-02-03".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Start date 2024-02-10 is after end date 2024-02-03"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::DatesRequired.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        // transparent: the user sees the inner message
        assert_eq!(
            core_err.to_string(),
            "Both start date and end date are required."
        );
    }
}
