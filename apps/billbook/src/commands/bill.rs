//! # Weekly Bills
//!
//! ## Entry Workflow
//! ```text
//! billbook bill template --start .. --end .. -o week.toml
//!        │     one blank row per party
//!        ▼
//! (edit week.toml: fill amounts, blanks are zero)
//!        │
//!        ▼
//! billbook bill add week.toml
//!        │     parse every cell ──► show row and column totals ──► submit
//!        ▼
//! "Bills added successfully"
//! ```
//!
//! Corrections go through `bill edit` (one row) and `bill set-np` (the
//! week's carried N/P figure).

use std::io::Write;
use std::path::Path;

use billbook_client::BillbookClient;
use billbook_core::sheet::{SheetFile, WeeklySheet};
use billbook_core::validation::{parse_date, validate_party_selection, validate_record_id};
use billbook_core::{BillColumn, Money, ValidationError};

use super::{confirm_deletion, required_range};
use crate::error::{CliError, CliResult, ErrorCode};
use crate::render;

// =============================================================================
// Entry
// =============================================================================

/// Writes a blank sheet for every party, as TOML, to `output` or `out`.
///
/// Dates are optional here; they can be filled in the file.
pub async fn template(
    client: &BillbookClient,
    start: Option<&str>,
    end: Option<&str>,
    output: Option<&Path>,
    out: &mut impl Write,
) -> CliResult<()> {
    let parties = client.parties().list().await?;
    if parties.is_empty() {
        return Err(CliError::validation(
            "No parties yet. Add one with `billbook party add <name> <code>` first.",
        ));
    }

    let mut sheet = WeeklySheet::for_parties(&parties)?;
    sheet.set_start(start.map(|s| parse_date("start date", s)).transpose()?);
    sheet.set_end(end.map(|e| parse_date("end date", e)).transpose()?);

    let contents = toml::to_string_pretty(&sheet.to_file())?;
    match output {
        Some(path) => {
            std::fs::write(path, contents)?;
            writeln!(
                out,
                "Wrote a sheet for {} parties to {}",
                parties.len(),
                path.display()
            )?;
        }
        None => write!(out, "{}", contents)?,
    }
    Ok(())
}

/// Reads a filled sheet and submits it as one week of bills.
pub async fn add(client: &BillbookClient, path: &Path, out: &mut impl Write) -> CliResult<()> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(ErrorCode::Io, format!("Could not read {}: {}", path.display(), e))
    })?;
    let file: SheetFile = toml::from_str(&contents)?;
    let sheet = WeeklySheet::from_file(&file)?;
    let bills = sheet.to_new_bills()?;

    writeln!(out, "{}", render::sheet_table(&sheet))?;
    writeln!(out, "Total N/P: {}", sheet.total_np())?;

    let message = client.bills().create_week(&bills).await?;
    writeln!(out, "{}", message)?;
    Ok(())
}

// =============================================================================
// Browse
// =============================================================================

/// Lists bills either for one party (all weeks) or for a date range.
pub async fn list(
    client: &BillbookClient,
    party: Option<&str>,
    code: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    out: &mut impl Write,
) -> CliResult<()> {
    let bills = if party.is_some() || code.is_some() {
        let (name, code) = (party.unwrap_or_default(), code.unwrap_or_default());
        validate_party_selection(name, code)?;
        client.bills().for_party_all(name, code).await?
    } else if start.is_some() || end.is_some() {
        let range = required_range(start, end)?;
        client.bills().in_range(range).await?
    } else {
        return Err(CliError::validation(
            "Choose a party (--party and --code) or a date range (--start and --end)",
        ));
    };

    if bills.is_empty() {
        writeln!(out, "No bills found.")?;
        return Ok(());
    }
    writeln!(out, "{}", render::bills_table(&bills))?;
    Ok(())
}

// =============================================================================
// Corrections
// =============================================================================

/// Parses one `COLUMN=VALUE` assignment.
pub fn parse_assignment(raw: &str) -> CliResult<(BillColumn, Money)> {
    let (column, value) = raw.split_once('=').ok_or_else(|| {
        CliError::validation(format!("Expected COLUMN=VALUE, got '{}'", raw))
    })?;
    let column: BillColumn = column.parse()?;
    let amount = Money::parse_field(column.label(), value)?;
    Ok((column, amount))
}

/// Changes amounts on one bill of the week and saves it.
///
/// The bill is looked up in the week's bills so the stored record is sent
/// back whole with only the assigned columns changed.
pub async fn edit(
    client: &BillbookClient,
    id: &str,
    start: Option<&str>,
    end: Option<&str>,
    assignments: &[String],
    out: &mut impl Write,
) -> CliResult<()> {
    validate_record_id(id)?;
    let range = required_range(start, end)?;
    if assignments.is_empty() {
        return Err(CliError::validation("Nothing to change; pass --set COLUMN=VALUE"));
    }
    let changes = assignments
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<CliResult<Vec<_>>>()?;

    let mut bill = client
        .bills()
        .week(range)
        .await?
        .into_iter()
        .find(|b| b.id == id)
        .ok_or_else(|| CliError::not_found(format!("No bill with id {} in {}", id, range)))?;

    for (column, amount) in changes {
        bill.amounts.set(column, amount);
    }

    let message = client.bills().update(&bill).await?;
    writeln!(out, "{}", message)?;
    writeln!(out, "{} ({}) total: {}", bill.party_name, bill.code, bill.total())?;
    Ok(())
}

/// Sets the week's carried N/P figure.
pub async fn set_np(
    client: &BillbookClient,
    start: Option<&str>,
    end: Option<&str>,
    amount: &str,
    out: &mut impl Write,
) -> CliResult<()> {
    let range = required_range(start, end)?;
    if amount.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "Total N/P".to_string(),
        }
        .into());
    }
    let total_np = Money::parse_field("Total N/P", amount)?;

    let message = client.bills().update_total_np(range, total_np).await?;
    writeln!(out, "{}", message)?;
    Ok(())
}

pub async fn delete(client: &BillbookClient, id: &str, yes: bool, out: &mut impl Write) -> CliResult<()> {
    validate_record_id(id)?;
    confirm_deletion(&format!("bill {}", id), yes)?;

    let message = client.bills().delete(id).await?;
    writeln!(out, "{}", message)?;
    Ok(())
}
