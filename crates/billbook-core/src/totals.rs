//! # Totals
//!
//! Row and column sums for bill grids.
//!
//! ```text
//!            Payment  PWT  CASH  ...  ATD │ Total (row_total)
//!   bill 1     500     10    20        5  │   35
//!   bill 2     100      0    40        0  │   40
//!   ─────────────────────────────────────┼──────
//!   Total:     600     10    60        5  │   75   (ColumnTotals)
//! ```
//!
//! Every figure is recomputed from the rows on each call. Nothing here
//! trusts a total that arrived from the backend.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Bill, BillAmounts, BillColumn};

/// Derived row total: every column except Payment.
pub fn row_total(amounts: &BillAmounts) -> Money {
    amounts
        .iter()
        .filter(|(column, _)| column.in_row_total())
        .map(|(_, amount)| amount)
        .sum()
}

/// Per-column sums plus the sum of row totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnTotals {
    columns: BillAmounts,
    total: Money,
}

impl ColumnTotals {
    /// Sums any sequence of amount rows.
    pub fn from_amounts<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a BillAmounts>,
    {
        rows.into_iter().fold(ColumnTotals::default(), |mut acc, row| {
            for (column, amount) in row.iter() {
                acc.columns.set(column, acc.columns.get(column) + amount);
            }
            acc.total += row_total(row);
            acc
        })
    }

    pub fn from_bills(bills: &[Bill]) -> Self {
        Self::from_amounts(bills.iter().map(|b| &b.amounts))
    }

    /// Adds the week's carried N/P figure to the Payment column.
    ///
    /// Used by the yearly report, where the carried figure is shown as its
    /// own row and counted as payment.
    pub fn with_carried_np(mut self, carried: Money) -> Self {
        let payment = self.columns.get(BillColumn::Payment);
        self.columns.set(BillColumn::Payment, payment + carried);
        self
    }

    #[inline]
    pub fn get(&self, column: BillColumn) -> Money {
        self.columns.get(column)
    }

    /// Sum of the row totals.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// The "Total N/P" figure shown under weekly grids.
    #[inline]
    pub fn np(&self) -> Money {
        self.columns.get(BillColumn::NP)
    }

    pub fn amounts(&self) -> &BillAmounts {
        &self.columns
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn amounts(values: [i64; BillColumn::COUNT]) -> BillAmounts {
        BillColumn::ALL
            .into_iter()
            .zip(values)
            .fold(BillAmounts::default(), |acc, (c, v)| {
                acc.with(c, Money::from_minor(v))
            })
    }

    #[test]
    fn test_row_total_skips_payment() {
        let row = amounts([50000, 100, 200, 300, 400, 500, 600, 700, 800, 900]);
        assert_eq!(row_total(&row), Money::from_minor(4500));
    }

    #[test]
    fn test_row_total_of_blank_row_is_zero() {
        assert_eq!(row_total(&BillAmounts::default()), Money::zero());
    }

    #[test]
    fn test_row_total_handles_negative_columns() {
        let row = amounts([0, 0, 1000, 0, -250, 0, 0, 0, 0, 0]);
        assert_eq!(row_total(&row), Money::from_minor(750));
    }

    #[test]
    fn test_column_totals() {
        let rows = [
            amounts([500, 10, 20, 0, 0, 7, 0, 0, 0, 5]),
            amounts([100, 0, 40, 0, 0, 3, 0, 0, 0, 0]),
        ];
        let totals = ColumnTotals::from_amounts(rows.iter());

        assert_eq!(totals.get(BillColumn::Payment), Money::from_minor(600));
        assert_eq!(totals.get(BillColumn::Cash), Money::from_minor(60));
        assert_eq!(totals.np(), Money::from_minor(10));
        // (10+20+7+5) + (40+3)
        assert_eq!(totals.total(), Money::from_minor(85));
    }

    #[test]
    fn test_column_totals_empty() {
        let totals = ColumnTotals::from_bills(&[]);
        assert_eq!(totals, ColumnTotals::default());
        assert_eq!(totals.total(), Money::zero());
    }

    #[test]
    fn test_with_carried_np_only_moves_payment() {
        let rows = [amounts([500, 0, 100, 0, 0, 0, 0, 0, 0, 0])];
        let totals = ColumnTotals::from_amounts(rows.iter()).with_carried_np(Money::from_minor(250));
        assert_eq!(totals.get(BillColumn::Payment), Money::from_minor(750));
        assert_eq!(totals.get(BillColumn::Cash), Money::from_minor(100));
        assert_eq!(totals.total(), Money::from_minor(100));
    }

    #[test]
    fn test_huge_backend_amounts_saturate() {
        let row = amounts([i64::MAX, 0, i64::MAX, i64::MAX, 0, 0, 0, 0, 0, 0]);
        let totals = ColumnTotals::from_amounts([&row, &row]);
        assert_eq!(totals.get(BillColumn::Cash), Money::from_minor(i64::MAX));
        assert_eq!(totals.total(), Money::from_minor(i64::MAX));
        let carried = totals.with_carried_np(Money::from_major(1));
        assert_eq!(carried.get(BillColumn::Payment), Money::from_minor(i64::MAX));
    }
}
