//! # Command Line Definition
//!
//! ```text
//! billbook [--config FILE] [-v] <command>
//!
//!   party         add | list | delete
//!   bill          template | add | list | edit | set-np | delete
//!   report        week | party | year      [--export xlsx|pdf] [-o FILE]
//!   dashboard
//!   subscription  plans | order | verify
//!   config        show | init
//! ```
//!
//! Dates are `YYYY-MM-DD`. Start and end are kept optional at the parser
//! level so a missing date gets the same message as the form did.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "billbook", version, about = "Weekly party billing against the Billbook backend")]
pub struct Cli {
    /// Config file (default: the platform config directory)
    #[arg(long, global = true, env = "BILLBOOK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage parties
    #[command(subcommand)]
    Party(PartyCommand),

    /// Enter and correct weekly bills
    #[command(subcommand)]
    Bill(BillCommand),

    /// Weekly, party and yearly reports
    #[command(subcommand)]
    Report(ReportCommand),

    /// Payments, dues and recent transactions
    Dashboard,

    /// Plans and payments
    #[command(subcommand)]
    Subscription(SubscriptionCommand),

    /// Show or write settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

// =============================================================================
// Shared Arguments
// =============================================================================

#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// First day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Also write the report as xlsx or pdf
    #[arg(long, value_name = "FORMAT")]
    pub export: Option<String>,

    /// Output file (default: bills_<start>_<end>.<format> in the export directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum PartyCommand {
    /// Add a party
    Add { name: String, code: String },

    /// List every party
    List,

    /// Delete a party
    Delete {
        name: String,
        code: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum BillCommand {
    /// Write a blank weekly sheet with one row per party
    Template {
        #[command(flatten)]
        range: RangeArgs,

        /// Write to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Submit a filled weekly sheet
    Add {
        /// Sheet written by `bill template`
        file: PathBuf,
    },

    /// List bills for a party, or for a date range
    List {
        /// Party name
        #[arg(long)]
        party: Option<String>,

        /// Party code
        #[arg(long)]
        code: Option<String>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Change amounts on one bill of a week
    Edit {
        /// Bill id, as shown by `bill list`
        id: String,

        #[command(flatten)]
        range: RangeArgs,

        /// Column assignment, e.g. --set CASH=120.50 (repeatable)
        #[arg(long = "set", value_name = "COLUMN=VALUE")]
        set: Vec<String>,
    },

    /// Set the week's carried N/P figure
    SetNp {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(allow_negative_numbers = true)]
        amount: String,
    },

    /// Delete a bill
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Every party for one week
    Week {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// One party across the weeks of a period
    Party {
        /// Party name
        #[arg(long)]
        name: String,

        /// Party code
        #[arg(long)]
        code: String,

        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Per-party totals for a long period, with the carried N/P
    Year {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        export: ExportArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubscriptionCommand {
    /// Show the available plans
    Plans,

    /// Create a payment order
    Order {
        /// monthly or half-yearly (default: from config)
        #[arg(long)]
        plan: Option<String>,
    },

    /// Confirm a completed payment
    Verify {
        #[arg(long)]
        order_id: String,

        #[arg(long)]
        payment_id: String,

        #[arg(long)]
        signature: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings
    Show,

    /// Write backend and user settings to the config file
    Init {
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,

        #[arg(long)]
        api_token: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bill_edit() {
        let cli = Cli::try_parse_from([
            "billbook", "bill", "edit", "abc123", "--start", "2024-01-01", "--end", "2024-01-07",
            "--set", "CASH=10", "--set", "TDS=2.50",
        ])
        .unwrap();
        match cli.command {
            Command::Bill(BillCommand::Edit { id, range, set }) => {
                assert_eq!(id, "abc123");
                assert_eq!(range.start.as_deref(), Some("2024-01-01"));
                assert_eq!(set, vec!["CASH=10", "TDS=2.50"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_np() {
        let cli = Cli::try_parse_from([
            "billbook", "bill", "set-np", "--start", "2024-01-01", "--end", "2024-01-07", "-25.50",
        ])
        .unwrap();
        match cli.command {
            Command::Bill(BillCommand::SetNp { amount, .. }) => assert_eq!(amount, "-25.50"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_report_export() {
        let cli = Cli::try_parse_from([
            "billbook", "report", "year", "--start", "2023-04-01", "--end", "2024-03-31",
            "--export", "pdf", "-o", "year.pdf", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Report(ReportCommand::Year { export, .. }) => {
                assert_eq!(export.export.as_deref(), Some("pdf"));
                assert_eq!(export.output, Some(PathBuf::from("year.pdf")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
