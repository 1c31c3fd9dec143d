//! Owner-wide summary.

use std::io::Write;

use billbook_client::BillbookClient;

use crate::error::CliResult;
use crate::render;

pub async fn show(client: &BillbookClient, currency_symbol: &str, out: &mut impl Write) -> CliResult<()> {
    let dashboard = client.dashboard().fetch().await?;
    writeln!(out, "{}", render::dashboard(&dashboard, currency_symbol))?;
    Ok(())
}
