//! # Weekly Sheet
//!
//! Form state for entering one week of bills: one row per registered party,
//! all amounts blank until typed.
//!
//! ## Lifecycle
//! ```text
//! ┌──────────────────┐   set_range / set_cell   ┌──────────────────┐
//! │ for_parties(..)  │ ───────────────────────► │  filled sheet    │
//! │ rows = parties   │ ◄─────────────────────── │  row + col sums  │
//! │ amounts = 0      │     (edit again)         │  recomputed      │
//! └──────────────────┘                          └────────┬─────────┘
//!                                                        │ to_new_bills()
//!                                                        ▼
//!                                          Vec<NewBill> (one per row)
//! ```
//!
//! The sheet can also travel through a file ([`SheetFile`]) so it can be
//! filled in an editor. Cells are strings there so a blank stays blank.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::totals::{row_total, ColumnTotals};
use crate::types::{BillAmounts, BillColumn, DateRange, NewBill, Party};
use crate::validation::{parse_date, validate_party_form};
use crate::MAX_SHEET_ROWS;

// =============================================================================
// Sheet
// =============================================================================

/// One party's row on the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub party: Party,
    pub amounts: BillAmounts,
}

/// The weekly entry grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySheet {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    rows: Vec<SheetRow>,
}

impl WeeklySheet {
    /// Creates a blank sheet with a row per party, in the given order.
    ///
    /// Every party must pass [`validate_party_form`] and codes must be unique.
    pub fn for_parties(parties: &[Party]) -> CoreResult<Self> {
        if parties.len() > MAX_SHEET_ROWS {
            return Err(CoreError::SheetTooLarge { max: MAX_SHEET_ROWS });
        }
        let mut seen = HashSet::new();
        for party in parties {
            validate_party_form(&party.name, &party.code)?;
            if !seen.insert(party.code.as_str()) {
                return Err(CoreError::DuplicatePartyCode(party.code.clone()));
            }
        }

        Ok(WeeklySheet {
            start: None,
            end: None,
            rows: parties
                .iter()
                .cloned()
                .map(|party| SheetRow {
                    party,
                    amounts: BillAmounts::default(),
                })
                .collect(),
        })
    }

    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.start = Some(start);
        self.end = Some(end);
    }

    pub fn set_start(&mut self, start: Option<NaiveDate>) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Option<NaiveDate>) {
        self.end = end;
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stores raw cell input. An empty string stores zero.
    ///
    /// Returns the parsed amount.
    pub fn set_cell(&mut self, row: usize, column: BillColumn, raw: &str) -> CoreResult<Money> {
        let rows = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(CoreError::UnknownRow { row, rows })?;
        let amount = Money::parse_field(column.label(), raw)?;
        target.amounts.set(column, amount);
        Ok(amount)
    }

    /// [`WeeklySheet::set_cell`] addressed by party code.
    pub fn set_cell_by_code(&mut self, code: &str, column: BillColumn, raw: &str) -> CoreResult<Money> {
        let row = self
            .rows
            .iter()
            .position(|r| r.party.code == code)
            .ok_or_else(|| CoreError::UnknownPartyCode(code.to_string()))?;
        self.set_cell(row, column, raw)
    }

    /// Row total for one row.
    pub fn row_total(&self, row: usize) -> CoreResult<Money> {
        self.rows
            .get(row)
            .map(|r| row_total(&r.amounts))
            .ok_or(CoreError::UnknownRow {
                row,
                rows: self.rows.len(),
            })
    }

    pub fn column_totals(&self) -> ColumnTotals {
        ColumnTotals::from_amounts(self.rows.iter().map(|r| &r.amounts))
    }

    /// "Total N/P" shown under the grid.
    pub fn total_np(&self) -> Money {
        self.column_totals().np()
    }

    /// Validates the sheet and turns every row into a bill to submit.
    ///
    /// ## Errors
    /// - [`ValidationError::DatesRequired`](crate::ValidationError::DatesRequired)
    ///   when either date is missing
    /// - `DateOrder` when the range is reversed
    /// - [`CoreError::EmptySheet`] when there are no rows
    pub fn to_new_bills(&self) -> CoreResult<Vec<NewBill>> {
        let range = DateRange::from_parts(self.start, self.end)?;
        if self.rows.is_empty() {
            return Err(CoreError::EmptySheet);
        }
        Ok(self
            .rows
            .iter()
            .map(|row| NewBill {
                code: row.party.code.clone(),
                party_name: row.party.name.clone(),
                range,
                amounts: row.amounts,
            })
            .collect())
    }

    // -------------------------------------------------------------------------
    // File form
    // -------------------------------------------------------------------------

    /// Rebuilds a sheet from its file form, parsing every cell.
    pub fn from_file(file: &SheetFile) -> CoreResult<Self> {
        let parties: Vec<Party> = file
            .rows
            .iter()
            .map(|r| Party::new(r.party_name.trim(), r.code.trim()))
            .collect();
        let mut sheet = WeeklySheet::for_parties(&parties)?;
        sheet.start = parse_optional_date("start_date", &file.start_date)?;
        sheet.end = parse_optional_date("end_date", &file.end_date)?;

        for (index, row) in file.rows.iter().enumerate() {
            for column in BillColumn::ALL {
                sheet.set_cell(index, column, row.cell(column))?;
            }
        }
        Ok(sheet)
    }

    /// File form of the sheet. Zero amounts are written as blanks.
    pub fn to_file(&self) -> SheetFile {
        let format_date = |d: Option<NaiveDate>| {
            d.map(|d| d.format(crate::DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        SheetFile {
            start_date: format_date(self.start),
            end_date: format_date(self.end),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    let mut file_row = SheetFileRow::blank(&row.party);
                    for (column, amount) in row.amounts.iter() {
                        if !amount.is_zero() {
                            *file_row.cell_mut(column) = amount.to_string();
                        }
                    }
                    file_row
                })
                .collect(),
        }
    }
}

fn parse_optional_date(field: &str, raw: &str) -> CoreResult<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_date(field, raw)?))
}

// =============================================================================
// File Form
// =============================================================================

/// Serializable form of a [`WeeklySheet`].
///
/// ```toml
/// start_date = "2024-01-01"
/// end_date = "2024-01-07"
///
/// [[rows]]
/// code = "R01"
/// party_name = "Ravi"
/// payment = "500"
/// CASH = "120.50"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetFile {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub rows: Vec<SheetFileRow>,
}

/// One row of a [`SheetFile`]. Missing cells are blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetFileRow {
    pub code: String,
    pub party_name: String,
    #[serde(default)]
    pub payment: String,
    #[serde(default, rename = "PWT")]
    pub pwt: String,
    #[serde(default, rename = "CASH")]
    pub cash: String,
    #[serde(default, rename = "BANK")]
    pub bank: String,
    #[serde(default, rename = "DUE")]
    pub due: String,
    #[serde(default, rename = "N_P")]
    pub n_p: String,
    #[serde(default, rename = "TCS")]
    pub tcs: String,
    #[serde(default, rename = "TDS")]
    pub tds: String,
    #[serde(default, rename = "S_TDS")]
    pub s_tds: String,
    #[serde(default, rename = "ATD")]
    pub atd: String,
}

impl SheetFileRow {
    fn blank(party: &Party) -> Self {
        SheetFileRow {
            code: party.code.clone(),
            party_name: party.name.clone(),
            ..SheetFileRow::default()
        }
    }

    pub fn cell(&self, column: BillColumn) -> &str {
        match column {
            BillColumn::Payment => &self.payment,
            BillColumn::Pwt => &self.pwt,
            BillColumn::Cash => &self.cash,
            BillColumn::Bank => &self.bank,
            BillColumn::Due => &self.due,
            BillColumn::NP => &self.n_p,
            BillColumn::Tcs => &self.tcs,
            BillColumn::Tds => &self.tds,
            BillColumn::STds => &self.s_tds,
            BillColumn::Atd => &self.atd,
        }
    }

    fn cell_mut(&mut self, column: BillColumn) -> &mut String {
        match column {
            BillColumn::Payment => &mut self.payment,
            BillColumn::Pwt => &mut self.pwt,
            BillColumn::Cash => &mut self.cash,
            BillColumn::Bank => &mut self.bank,
            BillColumn::Due => &mut self.due,
            BillColumn::NP => &mut self.n_p,
            BillColumn::Tcs => &mut self.tcs,
            BillColumn::Tds => &mut self.tds,
            BillColumn::STds => &mut self.s_tds,
            BillColumn::Atd => &mut self.atd,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
