//! # Terminal Rendering
//!
//! comfy-table views for every screen. Functions here only format; they
//! never talk to the backend.

use billbook_core::report::{Report, ReportCell, RowKind};
use billbook_core::sheet::WeeklySheet;
use billbook_core::totals::ColumnTotals;
use billbook_core::{Bill, BillColumn, Dashboard, Money, Party, PartyAmount, SubscriptionPlan};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header<I, S>(titles: I) -> Vec<Cell>
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    titles
        .into_iter()
        .map(|t| Cell::new(t.to_string()).add_attribute(Attribute::Bold))
        .collect()
}

fn amount_cell(amount: Money) -> Cell {
    let cell = Cell::new(amount).set_alignment(CellAlignment::Right);
    if amount.is_negative() {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn bold(cell: Cell) -> Cell {
    cell.add_attribute(Attribute::Bold)
}

fn amount_titles() -> impl Iterator<Item = &'static str> {
    BillColumn::ALL.into_iter().map(|c| c.label())
}

// =============================================================================
// Reports
// =============================================================================

/// Renders a report exactly as it will be exported.
pub fn report_table(report: &Report) -> Table {
    let mut table = new_table();
    table.set_header(header(report.header()));

    for row in report.rows() {
        let emphasis = row.kind == RowKind::Total;
        let cells: Vec<Cell> = row
            .cells
            .iter()
            .map(|cell| {
                let cell = match cell {
                    ReportCell::Amount(amount) => amount_cell(*amount),
                    ReportCell::Serial(n) => Cell::new(n).set_alignment(CellAlignment::Right),
                    other => Cell::new(other.display()),
                };
                if emphasis {
                    bold(cell)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(cells);
    }
    table
}

// =============================================================================
// Parties and Bills
// =============================================================================

/// Serial, code, name.
pub fn parties_table(parties: &[Party]) -> Table {
    let mut table = new_table();
    table.set_header(header(["Serial No", "Code", "Party Name"]));
    for (index, party) in parties.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(&party.code),
            Cell::new(&party.name),
        ]);
    }
    table
}

/// Bills with their record ids, for picking one to edit or delete.
pub fn bills_table(bills: &[Bill]) -> Table {
    let mut table = new_table();
    let titles = ["Id", "Code", "P_Name", "Date Range"]
        .into_iter()
        .chain(amount_titles())
        .chain(["Total"]);
    table.set_header(header(titles));

    for bill in bills {
        let mut cells = vec![
            Cell::new(&bill.id),
            Cell::new(&bill.code),
            Cell::new(&bill.party_name),
            Cell::new(bill.range.slashed()),
        ];
        cells.extend(bill.amounts.iter().map(|(_, amount)| amount_cell(amount)));
        cells.push(bold(amount_cell(bill.total())));
        table.add_row(cells);
    }
    table
}

/// The weekly entry sheet with row totals and a column-total footer.
pub fn sheet_table(sheet: &WeeklySheet) -> Table {
    let mut table = new_table();
    let titles = ["Code", "P_Name"]
        .into_iter()
        .chain(amount_titles())
        .chain(["Total"]);
    table.set_header(header(titles));

    for row in sheet.rows() {
        let mut cells = vec![Cell::new(&row.party.code), Cell::new(&row.party.name)];
        cells.extend(row.amounts.iter().map(|(_, amount)| amount_cell(amount)));
        cells.push(bold(amount_cell(billbook_core::totals::row_total(&row.amounts))));
        table.add_row(cells);
    }

    table.add_row(totals_row(&sheet.column_totals()));
    table
}

fn totals_row(totals: &ColumnTotals) -> Vec<Cell> {
    let mut cells = vec![Cell::new(""), bold(Cell::new("Total:"))];
    cells.extend(totals.amounts().iter().map(|(_, amount)| bold(amount_cell(amount))));
    cells.push(bold(amount_cell(totals.total())));
    cells
}

// =============================================================================
// Dashboard
// =============================================================================

/// Summary figures followed by the three lists.
pub fn dashboard(dashboard: &Dashboard, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);

    let mut summary = new_table();
    summary.set_header(header(["Total Payments", "Cash", "Bank", "Outstanding Dues"]));
    summary.add_row(vec![
        Cell::new(money(dashboard.total_payments)).set_alignment(CellAlignment::Right),
        Cell::new(money(dashboard.cash)).set_alignment(CellAlignment::Right),
        Cell::new(money(dashboard.bank)).set_alignment(CellAlignment::Right),
        Cell::new(money(dashboard.total_outstanding())).set_alignment(CellAlignment::Right),
    ]);

    let mut out = summary.to_string();

    let lists: [(&str, &[PartyAmount], &str); 2] = [
        ("Outstanding Dues", &dashboard.outstanding_dues, "Due"),
        ("Highest Payments", &dashboard.highest_payments, "Payment"),
    ];
    for (title, entries, column) in lists {
        out.push_str(&format!("\n\n{}\n", title));
        if entries.is_empty() {
            out.push_str("No entries");
            continue;
        }
        let mut table = new_table();
        table.set_header(header(["Party", column]));
        for entry in entries {
            table.add_row(vec![
                Cell::new(&entry.party_name),
                Cell::new(money(entry.amount)).set_alignment(CellAlignment::Right),
            ]);
        }
        out.push_str(&table.to_string());
    }

    out.push_str("\n\nRecent Transactions\n");
    if dashboard.recent_transactions.is_empty() {
        out.push_str("No entries");
    } else {
        let mut table = new_table();
        table.set_header(header(["Party", "Payment", "Week Ending"]));
        for tx in &dashboard.recent_transactions {
            let date = tx
                .end_date
                .map(|d| d.format(billbook_core::DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![
                Cell::new(&tx.party_name),
                Cell::new(money(tx.payment)).set_alignment(CellAlignment::Right),
                Cell::new(date),
            ]);
        }
        out.push_str(&table.to_string());
    }
    out
}

// =============================================================================
// Pricing
// =============================================================================

pub fn plans_table(symbol: &str) -> Table {
    let mut table = new_table();
    table.set_header(header(["Plan", "Price", "Billed Every", "Status"]));
    for plan in SubscriptionPlan::ALL {
        let status = if plan.is_available() {
            Cell::new("Available").fg(Color::Green)
        } else {
            Cell::new("Coming soon")
        };
        table.add_row(vec![
            Cell::new(format!("{} ({})", plan.display_name(), plan.wire_name())),
            Cell::new(plan.price().format_with_symbol(symbol)).set_alignment(CellAlignment::Right),
            Cell::new(plan.period()),
            status,
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use billbook_core::validation::validate_date_range;
    use billbook_core::BillAmounts;

    #[test]
    fn test_parties_table_lists_serials() {
        let parties = vec![Party::new("Anand", "A01"), Party::new("Ravi", "R01")];
        let out = parties_table(&parties).to_string();
        assert!(out.contains("Serial No"));
        assert!(out.contains("A01"));
        assert!(out.contains("Ravi"));
    }

    fn ravi_bill(amounts: BillAmounts, total_np: Money) -> Bill {
        let range = validate_date_range(Some("2024-01-01"), Some("2024-01-07")).unwrap();
        Bill {
            id: "b1".to_string(),
            code: "R01".to_string(),
            party_name: "Ravi".to_string(),
            range,
            amounts,
            total_np,
        }
    }

    #[test]
    fn test_report_table_includes_footer() {
        let bill = ravi_bill(
            BillAmounts::default()
                .with(BillColumn::Cash, Money::from_minor(12_050))
                .with(BillColumn::NP, Money::from_major(35)),
            Money::from_major(40),
        );
        let out = report_table(&Report::weekly(&[bill.clone()], bill.range)).to_string();
        assert!(out.contains("Total:"));
        assert!(out.contains("155.50"));
        // Weekly Total N/P is the N_P column sum, not the carried figure
        assert!(out.contains("Total N/P:"));
        assert!(out.contains("35.00"));
        assert!(!out.contains("40.00"));
    }

    #[test]
    fn test_yearly_report_table_carries_np() {
        let bill = ravi_bill(
            BillAmounts::default().with(BillColumn::Payment, Money::from_major(100)),
            Money::from_major(40),
        );
        let out = report_table(&Report::yearly(&[bill.clone()], bill.range)).to_string();
        assert!(out.contains("N/P:"));
        assert!(out.contains("40.00"));
        assert!(out.contains("140.00"));
    }

    #[test]
    fn test_dashboard_empty_lists() {
        let out = dashboard(&Dashboard::default(), "₹");
        assert!(out.contains("Total Payments"));
        assert!(out.contains("₹0.00"));
        assert!(out.contains("Recent Transactions\nNo entries"));
    }

    #[test]
    fn test_plans_table() {
        let out = plans_table("₹").to_string();
        assert!(out.contains("Basic (monthly)"));
        assert!(out.contains("₹2000.00"));
        assert!(out.contains("Coming soon"));
    }
}
