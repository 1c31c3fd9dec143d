//! # Report Layouts
//!
//! A [`Report`] is a titled grid that the terminal renderer and both file
//! exporters draw from, so all three agree cell for cell.
//!
//! ## Layouts
//! ```text
//! Weekly                      Party                       Yearly
//! ──────────────────────      ──────────────────────      ──────────────────────
//! Serial No│Code│P_Name│..    Serial No│Date Range│..     Sl no│Code│PartyName│..
//! 1        │R01 │Ravi  │..    1        │s/e       │..     (rows sorted by code)
//! ...                         ...                         ...
//!          │    │Total:│..             │          │Total: <blank>
//! <blank>                     Date Range:│s to e          │    │N/P:  │carried
//! Date:    │s to e                                              │    │Total:│pay+N/P
//! Total N/P:│np                                         <blank>
//!                                                             │    │Date: │s To e
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::totals::ColumnTotals;
use crate::types::{Bill, BillColumn, DateRange};

// =============================================================================
// Cells and Rows
// =============================================================================

/// A single report cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportCell {
    Empty,
    Text(String),
    /// 1-based row number.
    Serial(usize),
    Amount(Money),
}

impl ReportCell {
    pub fn text(value: impl Into<String>) -> Self {
        ReportCell::Text(value.into())
    }

    /// Plain rendering used by the terminal and PDF.
    pub fn display(&self) -> String {
        match self {
            ReportCell::Empty => String::new(),
            ReportCell::Text(text) => text.clone(),
            ReportCell::Serial(n) => n.to_string(),
            ReportCell::Amount(amount) => amount.to_string(),
        }
    }
}

/// What a row represents, so renderers can style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// One bill.
    Bill,
    /// Column totals.
    Total,
    /// Labelled figure under the grid (dates, N/P).
    Summary,
    /// Spacer.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub kind: RowKind,
    /// May be shorter than the header; missing cells are empty.
    pub cells: Vec<ReportCell>,
}

impl ReportRow {
    fn blank() -> Self {
        ReportRow {
            kind: RowKind::Blank,
            cells: Vec::new(),
        }
    }

    fn summary(cells: Vec<ReportCell>) -> Self {
        ReportRow {
            kind: RowKind::Summary,
            cells,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Weekly,
    Party,
    Yearly,
}

// =============================================================================
// Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    kind: ReportKind,
    title: String,
    range: DateRange,
    header: Vec<String>,
    rows: Vec<ReportRow>,
    totals: ColumnTotals,
}

impl Report {
    /// One week, every party.
    pub fn weekly(bills: &[Bill], range: DateRange) -> Self {
        let totals = ColumnTotals::from_bills(bills);
        let mut rows: Vec<ReportRow> = bills
            .iter()
            .enumerate()
            .map(|(i, bill)| bill_row(i, ReportCell::text(&bill.code), bill))
            .collect();

        rows.push(total_row(&totals));
        rows.push(ReportRow::blank());
        rows.push(ReportRow::summary(vec![
            ReportCell::text("Date:"),
            ReportCell::text(range.to_string()),
        ]));
        rows.push(ReportRow::summary(vec![
            ReportCell::text("Total N/P:"),
            ReportCell::Amount(totals.np()),
        ]));

        Report {
            kind: ReportKind::Weekly,
            title: format!("Bill Report ({} - {})", range.start_str(), range.end_str()),
            range,
            header: header("Serial No", "Code", "P_Name"),
            rows,
            totals,
        }
    }

    /// One party across the weeks inside `range`.
    pub fn party(bills: &[Bill], range: DateRange, party_name: &str) -> Self {
        let totals = ColumnTotals::from_bills(bills);
        let mut rows: Vec<ReportRow> = bills
            .iter()
            .enumerate()
            .map(|(i, bill)| bill_row(i, ReportCell::text(bill.range.slashed()), bill))
            .collect();

        rows.push(total_row(&totals));
        rows.push(ReportRow::summary(vec![
            ReportCell::text("Date Range:"),
            ReportCell::text(range.to_string()),
        ]));

        Report {
            kind: ReportKind::Party,
            title: format!(
                "Bill Report {} ({} - {})",
                party_name,
                range.start_str(),
                range.end_str()
            ),
            range,
            header: header("Serial No", "Date Range", "P_Name"),
            rows,
            totals,
        }
    }

    /// Aggregated rows over a year (or any long range), sorted by code.
    ///
    /// The carried N/P figure of the first bill the backend returned is shown
    /// on its own row and added to the Payment total.
    pub fn yearly(bills: &[Bill], range: DateRange) -> Self {
        let carried = bills.first().map(|b| b.total_np).unwrap_or_default();
        let mut sorted: Vec<&Bill> = bills.iter().collect();
        sorted.sort_by(|a, b| a.code.cmp(&b.code));

        let totals =
            ColumnTotals::from_amounts(sorted.iter().map(|b| &b.amounts)).with_carried_np(carried);
        let mut rows: Vec<ReportRow> = sorted
            .iter()
            .enumerate()
            .map(|(i, bill)| bill_row(i, ReportCell::text(&bill.code), bill))
            .collect();

        rows.push(ReportRow::blank());
        rows.push(ReportRow::summary(vec![
            ReportCell::Empty,
            ReportCell::Empty,
            ReportCell::text("N/P:"),
            ReportCell::Amount(carried),
        ]));
        rows.push(total_row(&totals));
        rows.push(ReportRow::blank());
        rows.push(ReportRow::summary(vec![
            ReportCell::Empty,
            ReportCell::Empty,
            ReportCell::text("Date:"),
            ReportCell::text(format!("{} To {}", range.start_str(), range.end_str())),
        ]));

        Report {
            kind: ReportKind::Yearly,
            title: format!("Bill Report ({} - {})", range.start_str(), range.end_str()),
            range,
            header: header("Sl no", "Code", "PartyName"),
            rows,
            totals,
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn totals(&self) -> &ColumnTotals {
        &self.totals
    }

    /// Number of bill rows (excludes totals and summaries).
    pub fn bill_count(&self) -> usize {
        self.rows.iter().filter(|r| r.kind == RowKind::Bill).count()
    }
}

// =============================================================================
// Row Builders
// =============================================================================

fn header(first: &str, second: &str, third: &str) -> Vec<String> {
    [first, second, third]
        .into_iter()
        .map(str::to_string)
        .chain(BillColumn::ALL.iter().map(|c| c.label().to_string()))
        .chain(std::iter::once("Total".to_string()))
        .collect()
}

fn bill_row(index: usize, second: ReportCell, bill: &Bill) -> ReportRow {
    let mut cells = vec![
        ReportCell::Serial(index + 1),
        second,
        ReportCell::text(&bill.party_name),
    ];
    cells.extend(bill.amounts.iter().map(|(_, amount)| ReportCell::Amount(amount)));
    cells.push(ReportCell::Amount(bill.total()));
    ReportRow {
        kind: RowKind::Bill,
        cells,
    }
}

fn total_row(totals: &ColumnTotals) -> ReportRow {
    let mut cells = vec![ReportCell::Empty, ReportCell::Empty, ReportCell::text("Total:")];
    cells.extend(
        BillColumn::ALL
            .iter()
            .map(|&column| ReportCell::Amount(totals.get(column))),
    );
    cells.push(ReportCell::Amount(totals.total()));
    ReportRow {
        kind: RowKind::Total,
        cells,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BillAmounts;
    use crate::validation::validate_date_range;

    fn range() -> DateRange {
        validate_date_range(Some("2024-01-01"), Some("2024-01-07")).unwrap()
    }

    fn bill(code: &str, name: &str, payment: i64, cash: i64, np: i64, total_np: i64) -> Bill {
        Bill {
            id: format!("id-{code}"),
            code: code.to_string(),
            party_name: name.to_string(),
            range: range(),
            amounts: BillAmounts::default()
                .with(BillColumn::Payment, Money::from_major(payment))
                .with(BillColumn::Cash, Money::from_major(cash))
                .with(BillColumn::NP, Money::from_major(np)),
            total_np: Money::from_major(total_np),
        }
    }

    fn texts(row: &ReportRow) -> Vec<String> {
        row.cells.iter().map(ReportCell::display).collect()
    }

    #[test]
    fn test_weekly_layout() {
        let bills = vec![bill("R01", "Ravi", 500, 20, 5, 0), bill("M07", "Meena", 100, 40, 0, 0)];
        let report = Report::weekly(&bills, range());

        assert_eq!(report.column_count(), 14);
        assert_eq!(report.header()[0], "Serial No");
        assert_eq!(report.header()[13], "Total");
        assert_eq!(report.bill_count(), 2);
        assert_eq!(report.title(), "Bill Report (2024-01-01 - 2024-01-07)");

        let first = texts(&report.rows()[0]);
        assert_eq!(&first[..4], ["1", "R01", "Ravi", "500.00"]);
        assert_eq!(first[13], "25.00");

        let total = &report.rows()[2];
        assert_eq!(total.kind, RowKind::Total);
        assert_eq!(texts(total)[2], "Total:");
        assert_eq!(texts(total)[3], "600.00");
        assert_eq!(texts(total)[13], "65.00");

        assert_eq!(report.rows()[3].kind, RowKind::Blank);
        assert_eq!(texts(&report.rows()[4]), ["Date:", "2024-01-01 to 2024-01-07"]);
        assert_eq!(texts(&report.rows()[5]), ["Total N/P:", "5.00"]);
    }

    #[test]
    fn test_weekly_with_no_bills_still_has_footer() {
        let report = Report::weekly(&[], range());
        assert_eq!(report.bill_count(), 0);
        assert_eq!(report.rows()[0].kind, RowKind::Total);
        assert_eq!(texts(&report.rows()[0])[13], "0.00");
    }

    #[test]
    fn test_party_layout() {
        let bills = vec![bill("R01", "Ravi", 10, 1, 0, 0), bill("R01", "Ravi", 20, 2, 0, 0)];
        let report = Report::party(&bills, range(), "Ravi");

        assert_eq!(report.header()[1], "Date Range");
        assert_eq!(texts(&report.rows()[0])[1], "2024-01-01/2024-01-07");
        assert_eq!(texts(&report.rows()[2])[3], "30.00");
        assert_eq!(
            texts(&report.rows()[3]),
            ["Date Range:", "2024-01-01 to 2024-01-07"]
        );
        assert!(report.title().contains("Ravi"));
    }

    #[test]
    fn test_yearly_sorts_by_code_and_carries_np() {
        let bills = vec![
            bill("Z09", "Zoya", 100, 10, 0, 50),
            bill("A01", "Anil", 200, 20, 0, 999),
        ];
        let report = Report::yearly(&bills, range());

        assert_eq!(report.header()[..3], ["Sl no", "Code", "PartyName"]);
        assert_eq!(texts(&report.rows()[0])[..3], ["1", "A01", "Anil"]);
        assert_eq!(texts(&report.rows()[1])[..3], ["2", "Z09", "Zoya"]);

        // carried N/P comes from the first bill as returned, not as sorted
        let np_row = texts(&report.rows()[3]);
        assert_eq!(np_row, ["", "", "N/P:", "50.00"]);

        let total = texts(&report.rows()[4]);
        assert_eq!(total[3], "350.00");
        assert_eq!(total[13], "30.00");
        assert_eq!(report.totals().get(BillColumn::Payment), Money::from_major(350));

        let date_row = texts(&report.rows()[6]);
        assert_eq!(date_row[3], "2024-01-01 To 2024-01-07");
    }

    #[test]
    fn test_yearly_without_bills_carries_zero() {
        let report = Report::yearly(&[], range());
        assert_eq!(texts(&report.rows()[1])[3], "0.00");
    }
}
