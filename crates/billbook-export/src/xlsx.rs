//! # Spreadsheet Export
//!
//! Writes a [`Report`] to a single-sheet workbook named `Bills`.
//!
//! ```text
//! row 0        header (bold)
//! row 1..n     bill rows      serials as integers, amounts as 0.00 numbers
//! row n+1..    footer rows    total row bold, summaries as written
//! ```
//!
//! Amounts are written as numbers, not text, so the sheet can be summed
//! again in a spreadsheet application.

use std::path::Path;

use billbook_core::report::{Report, ReportCell, RowKind};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::ExportResult;

/// Worksheet name used for every report.
pub const SHEET_NAME: &str = "Bills";

const AMOUNT_FORMAT: &str = "0.00";

/// Builds the workbook and returns the encoded file.
pub fn xlsx_bytes(report: &Report) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(report)?;
    Ok(workbook.save_to_buffer()?)
}

/// Builds the workbook and saves it to `path`.
pub fn write_xlsx(report: &Report, path: &Path) -> ExportResult<()> {
    let mut workbook = build_workbook(report)?;
    workbook.save(path)?;
    Ok(())
}

fn build_workbook(report: &Report) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();

    let bold = Format::new().set_bold();
    let amount = Format::new().set_num_format(AMOUNT_FORMAT);
    let bold_amount = Format::new().set_bold().set_num_format(AMOUNT_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in report.header().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title.as_str(), &bold)?;
    }

    for (index, row) in report.rows().iter().enumerate() {
        let r = index as u32 + 1;
        let emphasis = row.kind == RowKind::Total;

        for (col, cell) in row.cells.iter().enumerate() {
            let c = col as u16;
            match cell {
                ReportCell::Empty => {}
                ReportCell::Text(text) if emphasis => {
                    sheet.write_string_with_format(r, c, text.as_str(), &bold)?;
                }
                ReportCell::Text(text) => {
                    sheet.write_string(r, c, text.as_str())?;
                }
                ReportCell::Serial(n) => {
                    sheet.write_number(r, c, *n as f64)?;
                }
                ReportCell::Amount(value) => {
                    let format = if emphasis { &bold_amount } else { &amount };
                    sheet.write_number_with_format(r, c, value.to_f64(), format)?;
                }
            }
        }
    }

    // Serial, code/date range, party name
    sheet.set_column_width(0, 10)?;
    sheet.set_column_width(1, 24)?;
    sheet.set_column_width(2, 20)?;

    Ok(workbook)
}
