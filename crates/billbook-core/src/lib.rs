//! # billbook-core: Pure Business Logic for Billbook
//!
//! This crate holds everything about weekly party bills that can be computed
//! without touching the network or the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Billbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    billbook CLI (clap)                          │   │
//! │  │    party ──► bill ──► report ──► dashboard ──► subscription     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ billbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  totals  │ │  sheet  │ │ report │  │   │
//! │  │   │  Party  │ │  Money  │ │ row/col  │ │ weekly  │ │ weekly │  │   │
//! │  │   │  Bill   │ │ parsing │ │  sums    │ │  entry  │ │ yearly │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼──────┐  ┌────────────────────────┐    │
//! │  │  billbook-client (REST backend)    │  │ billbook-export        │    │
//! │  └────────────────────────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Party, Bill, BillColumn, DateRange, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for party and bill forms
//! - [`totals`] - Row and column totals
//! - [`sheet`] - Weekly entry sheet (one row per party)
//! - [`report`] - Report layouts shared by the terminal and file exports
//!
//! ## Example Usage
//!
//! ```rust
//! use billbook_core::money::Money;
//! use billbook_core::types::{BillAmounts, BillColumn};
//! use billbook_core::totals::row_total;
//!
//! let mut amounts = BillAmounts::default();
//! amounts.set(BillColumn::Payment, Money::parse("500").unwrap());
//! amounts.set(BillColumn::Cash, Money::parse("120.50").unwrap());
//! amounts.set(BillColumn::Due, Money::parse("30").unwrap());
//!
//! // Payment is not part of the row total
//! assert_eq!(row_total(&amounts).to_string(), "150.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod sheet;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Wire and display format for every date the backend sees.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest number of parties a single weekly sheet accepts.
///
/// ## Business Reason
/// A sheet is submitted as one request body. This keeps a runaway party list
/// (or a malformed sheet file) from producing an unbounded payload.
pub const MAX_SHEET_ROWS: usize = 500;
