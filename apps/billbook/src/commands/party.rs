//! Party management: add, list, delete.

use std::io::Write;

use billbook_client::BillbookClient;
use billbook_core::validation::validate_party_selection;

use super::confirm_deletion;
use crate::error::CliResult;
use crate::render;

pub async fn add(client: &BillbookClient, name: &str, code: &str, out: &mut impl Write) -> CliResult<()> {
    let message = client.parties().create(name.trim(), code.trim()).await?;
    writeln!(out, "{}", message)?;
    Ok(())
}

pub async fn list(client: &BillbookClient, out: &mut impl Write) -> CliResult<()> {
    let parties = client.parties().list().await?;
    if parties.is_empty() {
        writeln!(out, "No parties yet. Add one with `billbook party add <name> <code>`.")?;
        return Ok(());
    }
    writeln!(out, "{}", render::parties_table(&parties))?;
    Ok(())
}

pub async fn delete(
    client: &BillbookClient,
    name: &str,
    code: &str,
    yes: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    validate_party_selection(name, code)?;
    confirm_deletion(&format!("party {} ({})", name, code), yes)?;

    let message = client.parties().delete(name, code).await?;
    writeln!(out, "{}", message)?;
    Ok(())
}
