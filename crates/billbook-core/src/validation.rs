//! # Validation Module
//!
//! Input validation for the party and bill forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI arguments (clap)                                         │
//! │  └── Types: dates, numbers, enum values                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, character sets                                   │
//! │  └── Date ordering, record ids                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  ├── Unique party code per owner                                       │
//! │  └── Bill ↔ party references, duplicate weeks                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billbook_core::validation::{validate_party_form, validate_email};
//!
//! validate_party_form("Ravi", "R01").unwrap();
//! assert!(validate_party_form("Ravi & Sons", "R01").is_err());
//! validate_email("owner@example.com").unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::DateRange;
use crate::DATE_FORMAT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest party name or code accepted.
pub const MAX_PARTY_FIELD_LEN: usize = 64;

// =============================================================================
// Party Validators
// =============================================================================

fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validates the add-party form as a whole.
///
/// ## Rules
/// - Both fields present (after trimming)
/// - Both fields ASCII letters and digits only
/// - Neither longer than [`MAX_PARTY_FIELD_LEN`]
///
/// The first two rules produce the form's own messages rather than
/// field-level ones.
pub fn validate_party_form(name: &str, code: &str) -> ValidationResult<()> {
    let (name, code) = (name.trim(), code.trim());
    if name.is_empty() || code.is_empty() {
        return Err(ValidationError::IncompletePartyForm);
    }
    if !is_alphanumeric(name) || !is_alphanumeric(code) {
        return Err(ValidationError::PartyCharacters);
    }
    validate_party_name(name)?;
    validate_party_code(code)
}

/// Validates a party name on its own.
pub fn validate_party_name(name: &str) -> ValidationResult<()> {
    validate_party_field("party name", name)
}

/// Validates a party code on its own.
pub fn validate_party_code(code: &str) -> ValidationResult<()> {
    validate_party_field("party code", code)
}

fn validate_party_field(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if value.len() > MAX_PARTY_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_PARTY_FIELD_LEN,
        });
    }
    if !is_alphanumeric(value) {
        return Err(ValidationError::PartyCharacters);
    }
    Ok(())
}

/// Validates a party-wise lookup: both name and code must be chosen.
pub fn validate_party_selection(name: &str, code: &str) -> ValidationResult<()> {
    if name.trim().is_empty() || code.trim().is_empty() {
        return Err(ValidationError::PartySelectionRequired);
    }
    Ok(())
}

// =============================================================================
// Identity
// =============================================================================

/// Validates the owner e-mail every request is scoped to.
///
/// ## Rules
/// - Not empty, no whitespace
/// - Exactly one `@` with something on both sides
/// - A dot somewhere in the domain
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("expected name@domain"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain looks incomplete"));
    }
    Ok(())
}

/// Validates a backend record id before it is placed in a URL path.
pub fn validate_record_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "bill id".to_string(),
        });
    }
    if id.chars().any(|c| c == '/' || c == '?' || c == '#' || c.is_whitespace()) {
        return Err(ValidationError::InvalidFormat {
            field: "bill id".to_string(),
            reason: "must not contain '/', '?', '#' or spaces".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Dates
// =============================================================================

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected YYYY-MM-DD, got '{}'", input.trim()),
        }
    })
}

/// Parses a date as the backend may send it.
///
/// Accepts a bare `YYYY-MM-DD` or an ISO-8601 timestamp such as
/// `2024-01-07T00:00:00.000Z`; only the calendar date is kept.
pub fn parse_wire_date(field: &str, input: &str) -> ValidationResult<NaiveDate> {
    let trimmed = input.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    parse_date(field, date_part)
}

/// Validates an optional start/end pair into a [`DateRange`].
///
/// ## Example
/// ```rust
/// use billbook_core::validation::validate_date_range;
///
/// let range = validate_date_range(Some("2024-01-01"), Some("2024-01-07")).unwrap();
/// assert_eq!(range.to_string(), "2024-01-01 to 2024-01-07");
///
/// let err = validate_date_range(Some("2024-01-01"), None).unwrap_err();
/// assert_eq!(err.to_string(), "Both start date and end date are required.");
/// ```
pub fn validate_date_range(start: Option<&str>, end: Option<&str>) -> ValidationResult<DateRange> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => {
            DateRange::new(parse_date("start date", start)?, parse_date("end date", end)?)
        }
        _ => Err(ValidationError::DatesRequired),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
