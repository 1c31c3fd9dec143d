//! # Subcommands
//!
//! One module per screen. Every command takes the backend client it needs
//! and writes its output to `out`, so tests can run them against a mock
//! server and inspect what would have been printed.
//!
//! ```text
//! commands/
//! ├── party.rs         add, list, delete
//! ├── bill.rs          template, add, list, edit, set-np, delete
//! ├── report.rs        week, party, year (+ export)
//! ├── dashboard.rs     summary figures
//! ├── subscription.rs  plans, order, verify
//! └── config.rs        show, init
//! ```

pub mod bill;
pub mod config;
pub mod dashboard;
pub mod party;
pub mod report;
pub mod subscription;

use billbook_core::validation::validate_date_range;
use billbook_core::DateRange;
use inquire::Confirm;

use crate::error::{CliError, CliResult};

/// Asks before a destructive action unless `yes` was passed.
pub(crate) fn confirm_deletion(what: &str, yes: bool) -> CliResult<()> {
    if yes {
        return Ok(());
    }
    let confirmed = Confirm::new(&format!("Delete {}?", what))
        .with_default(false)
        .with_help_message("This action cannot be reversed")
        .prompt()?;
    if confirmed {
        Ok(())
    } else {
        Err(CliError::cancelled())
    }
}

/// Both dates are required; a reversed range is rejected.
pub(crate) fn required_range(start: Option<&str>, end: Option<&str>) -> CliResult<DateRange> {
    Ok(validate_date_range(start, end)?)
}
