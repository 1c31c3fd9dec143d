//! # Domain Types
//!
//! Core domain types used throughout Billbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │     Party       │   │        Bill          │   │   BillColumn    │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  name           │◄──│  party_name, code    │   │  Payment  PWT   │  │
//! │  │  code           │   │  range (DateRange)   │   │  CASH  BANK     │  │
//! │  └─────────────────┘   │  amounts ────────────┼──►│  DUE  N_P  TCS  │  │
//! │                        │  total_np            │   │  TDS S_TDS ATD  │  │
//! │                        └──────────────────────┘   └─────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │   DateRange     │   │     Dashboard        │   │ SubscriptionPlan│  │
//! │  │  start <= end   │   │  payments, dues, ... │   │  Basic/Premium  │  │
//! │  └─────────────────┘   └──────────────────────┘   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - A party is identified by its `code` (unique per owner, enforced by the
//!   backend). The name is what users read.
//! - A bill is identified by the backend's opaque record id. Bills that have
//!   not been submitted yet are [`NewBill`]s and have no id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::totals::row_total;
use crate::DATE_FORMAT;

// =============================================================================
// Party
// =============================================================================

/// A billable customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    /// Display name, ASCII alphanumeric.
    pub name: String,

    /// Billing code, ASCII alphanumeric, unique per owner.
    pub code: String,
}

impl Party {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Party {
            name: name.into(),
            code: code.into(),
        }
    }
}

// =============================================================================
// Bill Columns
// =============================================================================

/// The ten amount columns of a bill, in display order.
///
/// ## Row Total
/// ```text
/// Payment │ PWT + CASH + BANK + DUE + N_P + TCS + TDS + S_TDS + ATD = Total
///   ▲     │ └──────────────────── counted ─────────────────────────┘
///   └── shown, summed per column, never part of the row total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BillColumn {
    Payment,
    Pwt,
    Cash,
    Bank,
    Due,
    NP,
    Tcs,
    Tds,
    STds,
    Atd,
}

impl BillColumn {
    /// Number of amount columns.
    pub const COUNT: usize = 10;

    /// Every column in display order.
    pub const ALL: [BillColumn; Self::COUNT] = [
        BillColumn::Payment,
        BillColumn::Pwt,
        BillColumn::Cash,
        BillColumn::Bank,
        BillColumn::Due,
        BillColumn::NP,
        BillColumn::Tcs,
        BillColumn::Tds,
        BillColumn::STds,
        BillColumn::Atd,
    ];

    /// Position in [`BillColumn::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Header text used in tables and exports.
    pub const fn label(self) -> &'static str {
        match self {
            BillColumn::Payment => "Payment",
            BillColumn::Pwt => "PWT",
            BillColumn::Cash => "CASH",
            BillColumn::Bank => "BANK",
            BillColumn::Due => "DUE",
            BillColumn::NP => "N_P",
            BillColumn::Tcs => "TCS",
            BillColumn::Tds => "TDS",
            BillColumn::STds => "S_TDS",
            BillColumn::Atd => "ATD",
        }
    }

    /// JSON key the backend uses for this column.
    pub const fn wire_key(self) -> &'static str {
        match self {
            BillColumn::Payment => "payment",
            other => other.label(),
        }
    }

    /// Whether the column is part of the derived row total.
    #[inline]
    pub const fn in_row_total(self) -> bool {
        !matches!(self, BillColumn::Payment)
    }
}

impl fmt::Display for BillColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a column name as typed on the command line.
///
/// Case-insensitive; accepts the label (`S_TDS`), the label without the
/// underscore (`STDS`) and `N/P`.
impl FromStr for BillColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '/' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        BillColumn::ALL
            .into_iter()
            .find(|column| column.label().replace('_', "").eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "column".to_string(),
                allowed: BillColumn::ALL.iter().map(|c| c.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Bill Amounts
// =============================================================================

/// One amount per [`BillColumn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillAmounts([Money; BillColumn::COUNT]);

impl BillAmounts {
    #[inline]
    pub fn get(&self, column: BillColumn) -> Money {
        self.0[column.index()]
    }

    #[inline]
    pub fn set(&mut self, column: BillColumn, amount: Money) {
        self.0[column.index()] = amount;
    }

    /// Builder-style [`BillAmounts::set`].
    pub fn with(mut self, column: BillColumn, amount: Money) -> Self {
        self.set(column, amount);
        self
    }

    /// Columns paired with their amounts, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (BillColumn, Money)> + '_ {
        BillColumn::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(Money::is_zero)
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive billing period, usually one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting one that ends before it starts.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::DateOrder {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(DateRange { start, end })
    }

    /// Builds a range from two optional form values.
    ///
    /// Either side missing is [`ValidationError::DatesRequired`].
    pub fn from_parts(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        match (start, end) {
            (Some(start), Some(end)) => DateRange::new(start, end),
            _ => Err(ValidationError::DatesRequired),
        }
    }

    #[inline]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// `YYYY-MM-DD` start date.
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// `YYYY-MM-DD` end date.
    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Compact form used in the party report's date column: `start/end`.
    pub fn slashed(&self) -> String {
        format!("{}/{}", self.start_str(), self.end_str())
    }
}

/// `2024-01-01 to 2024-01-07`
impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_str(), self.end_str())
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A submitted weekly record for one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Backend record id.
    pub id: String,

    pub code: String,
    pub party_name: String,
    pub range: DateRange,
    pub amounts: BillAmounts,

    /// Carried N/P figure stored with the week (zero when absent).
    pub total_np: Money,
}

impl Bill {
    /// Derived total: every column except Payment.
    #[inline]
    pub fn total(&self) -> Money {
        row_total(&self.amounts)
    }
}

/// A bill that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBill {
    pub code: String,
    pub party_name: String,
    pub range: DateRange,
    pub amounts: BillAmounts,
}

impl NewBill {
    #[inline]
    pub fn total(&self) -> Money {
        row_total(&self.amounts)
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Owner-wide summary computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_payments: Money,
    pub cash: Money,
    pub bank: Money,
    pub outstanding_dues: Vec<PartyAmount>,
    pub recent_transactions: Vec<RecentTransaction>,
    pub highest_payments: Vec<PartyAmount>,
}

impl Dashboard {
    /// Sum of every outstanding DUE in the summary.
    pub fn total_outstanding(&self) -> Money {
        self.outstanding_dues.iter().map(|d| d.amount).sum()
    }
}

/// A party paired with a single figure (due, payment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyAmount {
    pub party_name: String,
    pub amount: Money,
}

/// A payment recorded against the end of a billing week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub party_name: String,
    pub payment: Money,
    pub end_date: Option<NaiveDate>,
}

// =============================================================================
// Subscription
// =============================================================================

/// Plans offered on the pricing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    /// 2000 per month.
    Monthly,
    /// 8000 per six months. Listed but not yet purchasable.
    HalfYearly,
}

impl SubscriptionPlan {
    pub const ALL: [SubscriptionPlan; 2] = [SubscriptionPlan::Monthly, SubscriptionPlan::HalfYearly];

    pub const fn display_name(self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "Basic",
            SubscriptionPlan::HalfYearly => "Premium",
        }
    }

    /// Value sent as `plan` when creating an order.
    pub const fn wire_name(self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::HalfYearly => "half-yearly",
        }
    }

    pub const fn price(self) -> Money {
        match self {
            SubscriptionPlan::Monthly => Money::from_major(2000),
            SubscriptionPlan::HalfYearly => Money::from_major(8000),
        }
    }

    pub const fn period(self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "month",
            SubscriptionPlan::HalfYearly => "6 months",
        }
    }

    /// Whether an order can be created for the plan today.
    pub const fn is_available(self) -> bool {
        matches!(self, SubscriptionPlan::Monthly)
    }
}

impl FromStr for SubscriptionPlan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "basic" => Ok(SubscriptionPlan::Monthly),
            "half-yearly" | "halfyearly" | "premium" => Ok(SubscriptionPlan::HalfYearly),
            _ => Err(ValidationError::NotAllowed {
                field: "plan".to_string(),
                allowed: vec!["monthly".to_string(), "half-yearly".to_string()],
            }),
        }
    }
}

/// Order created by the payment gateway via the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    /// Amount in the gateway's minor unit, exactly as returned.
    pub amount: i64,
    pub currency: String,
}

/// Gateway callback values submitted for verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
