//! # PDF Export
//!
//! Renders a [`Report`] as an A4 landscape table using the builtin
//! Helvetica faces, so no font files ship with the binary.
//!
//! ## Page Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ Bill Report (2024-01-01 - 2024-01-07)                       (title)  │
//! │ Serial No  Code  P_Name   Payment  PWT  CASH  ...  ATD  Total       │
//! │ ──────────────────────────────────────────────────────────── (rule)  │
//! │ 1          R01   Ravi      100.00  ...                               │
//! │ ...                                                                  │
//! │                                                    Page 1 of 2       │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows that do not fit start a new page with the header repeated. Text
//! wider than its column is cut and marked with `...`; amounts are right
//! aligned using an average glyph width.

use std::io::BufWriter;
use std::path::Path;

use billbook_core::report::{Report, ReportRow, RowKind};
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use tracing::debug;

use crate::error::{ExportError, ExportResult};

// =============================================================================
// Geometry
// =============================================================================

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 10.0;

const TITLE_SIZE: f32 = 12.0;
const FONT_SIZE: f32 = 8.0;
const ROW_HEIGHT: f32 = 5.0;

/// Baseline of the header row.
const HEADER_Y: f32 = PAGE_HEIGHT - MARGIN - 12.0;

/// Lowest baseline a body row may use.
const BOTTOM_Y: f32 = MARGIN + 10.0;

/// Width of the three leading text columns.
const LEADING_WIDTHS: [f32; 3] = [16.0, 40.0, 36.0];

const POINT_TO_MM: f32 = 0.3528;

/// Average Helvetica glyph width relative to the font size.
const GLYPH_RATIO: f32 = 0.55;

fn rows_per_page() -> usize {
    ((HEADER_Y - ROW_HEIGHT - BOTTOM_Y) / ROW_HEIGHT) as usize + 1
}

/// Column x offsets and widths for a table of `count` columns.
fn column_layout(count: usize) -> Vec<(f32, f32)> {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    let leading = LEADING_WIDTHS.iter().take(count).sum::<f32>();
    let rest = count.saturating_sub(LEADING_WIDTHS.len()).max(1) as f32;
    let amount_width = (usable - leading) / rest;

    let mut x = MARGIN;
    (0..count)
        .map(|col| {
            let width = LEADING_WIDTHS.get(col).copied().unwrap_or(amount_width);
            let cell = (x, width);
            x += width;
            cell
        })
        .collect()
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * POINT_TO_MM * GLYPH_RATIO
}

/// Cuts `text` so it fits `width` millimetres at `size`.
fn fit(text: &str, width: f32, size: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_string();
    }
    let glyph = size * POINT_TO_MM * GLYPH_RATIO;
    let keep = ((width / glyph) as usize).saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

// =============================================================================
// Rendering
// =============================================================================

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Renders the report and returns the encoded document.
pub fn pdf_bytes(report: &Report) -> ExportResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        report.title(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(ExportError::pdf)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(ExportError::pdf)?,
    };

    let layout = column_layout(report.column_count());
    let rows = report.rows();
    let per_page = rows_per_page();
    let page_count = rows.len().div_ceil(per_page).max(1);
    debug!(rows = rows.len(), pages = page_count, "Rendering PDF");

    for page_index in 0..page_count {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        if page_index == 0 {
            layer.use_text(
                report.title(),
                TITLE_SIZE,
                Mm(MARGIN),
                Mm(PAGE_HEIGHT - MARGIN - 4.0),
                &fonts.bold,
            );
        }

        draw_header(&layer, report.header(), &layout, &fonts);

        let start = page_index * per_page;
        let end = (start + per_page).min(rows.len());
        let mut y = HEADER_Y - ROW_HEIGHT - 1.5;
        for row in &rows[start..end] {
            draw_row(&layer, row, &layout, &fonts, y);
            y -= ROW_HEIGHT;
        }

        let footer = format!("Page {} of {}", page_index + 1, page_count);
        let footer_x = PAGE_WIDTH - MARGIN - text_width(&footer, FONT_SIZE);
        layer.use_text(footer, FONT_SIZE, Mm(footer_x), Mm(MARGIN), &fonts.regular);
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(ExportError::pdf)?;
    writer.into_inner().map_err(ExportError::pdf)
}

/// Renders the report and writes it to `path`.
pub fn write_pdf(report: &Report, path: &Path) -> ExportResult<()> {
    let bytes = pdf_bytes(report)?;
    std::fs::write(path, bytes).map_err(|e| ExportError::io(path, e))
}

fn draw_header(layer: &PdfLayerReference, header: &[String], layout: &[(f32, f32)], fonts: &Fonts) {
    for (title, (x, width)) in header.iter().zip(layout) {
        layer.use_text(
            fit(title, *width - 1.0, FONT_SIZE),
            FONT_SIZE,
            Mm(*x),
            Mm(HEADER_Y),
            &fonts.bold,
        );
    }
    rule(layer, HEADER_Y - 1.5);
}

fn draw_row(
    layer: &PdfLayerReference,
    row: &ReportRow,
    layout: &[(f32, f32)],
    fonts: &Fonts,
    y: f32,
) {
    if row.kind == RowKind::Blank {
        return;
    }
    let font = if row.kind == RowKind::Total {
        rule(layer, y + ROW_HEIGHT - 1.0);
        &fonts.bold
    } else {
        &fonts.regular
    };

    for (col, (cell, (x, width))) in row.cells.iter().zip(layout).enumerate() {
        let text = fit(&cell.display(), *width - 1.0, FONT_SIZE);
        if text.is_empty() {
            continue;
        }
        let x = if col >= LEADING_WIDTHS.len() {
            *x + *width - 1.0 - text_width(&text, FONT_SIZE)
        } else {
            *x
        };
        layer.use_text(text, FONT_SIZE, Mm(x), Mm(y), font);
    }
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use billbook_core::validation::validate_date_range;
    use billbook_core::{Bill, BillAmounts, BillColumn, Money};

    fn bills(count: usize) -> Vec<Bill> {
        let range = validate_date_range(Some("2024-01-01"), Some("2024-01-07")).unwrap();
        (0..count)
            .map(|i| Bill {
                id: format!("b{i}"),
                code: format!("P{i:03}"),
                party_name: format!("Party number {i} with a rather long trading name"),
                range,
                amounts: BillAmounts::default()
                    .with(BillColumn::Payment, Money::from_major(100))
                    .with(BillColumn::Bank, Money::from_minor(12_345)),
                total_np: Money::zero(),
            })
            .collect()
    }

    #[test]
    fn test_pdf_bytes_has_pdf_header() {
        let bills = bills(3);
        let report = Report::weekly(&bills, bills[0].range);
        let bytes = pdf_bytes(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_report_paginates() {
        let bills = bills(80);
        let report = Report::weekly(&bills, bills[0].range);
        assert!(report.rows().len() > rows_per_page());
        let bytes = pdf_bytes(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf_creates_file() {
        let bills = bills(1);
        let report = Report::party(&bills, bills[0].range, "Party number 0");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bills.pdf");
        write_pdf(&report, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_fit_cuts_long_text() {
        assert_eq!(fit("Ravi", 30.0, FONT_SIZE), "Ravi");
        let cut = fit("A very long party name that will not fit", 20.0, FONT_SIZE);
        assert!(cut.ends_with("..."));
        assert!(text_width(&cut, FONT_SIZE) <= 20.0);
    }

    #[test]
    fn test_column_layout_spans_usable_width() {
        let layout = column_layout(14);
        let (x, width) = layout[13];
        assert!((x + width - (PAGE_WIDTH - MARGIN)).abs() < 0.01);
    }
}
