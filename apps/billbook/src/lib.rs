//! # Billbook Command Line Library
//!
//! Everything behind the `billbook` binary. `main.rs` only parses
//! arguments and maps the result to an exit code.
//!
//! ## Module Organization
//! ```text
//! billbook/
//! ├── lib.rs          ◄─── You are here (tracing setup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── config.rs   ◄─── AppConfig: file, environment, defaults
//! ├── commands/
//! │   ├── party.rs    ◄─── add / list / delete
//! │   ├── bill.rs     ◄─── weekly sheet entry and corrections
//! │   ├── report.rs   ◄─── weekly / party / yearly reports + export
//! │   ├── dashboard.rs
//! │   ├── subscription.rs
//! │   └── config.rs   ◄─── show / init
//! ├── render.rs       ◄─── comfy-table views
//! └── error.rs        ◄─── CliError and exit codes
//! ```
//!
//! ## Invocation Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                             │
//! │  2. Initialize tracing ─ stderr, EnvFilter                              │
//! │  3. Load AppConfig ─ defaults ◄ config.toml ◄ BILLBOOK_* env            │
//! │  4. Local commands (config, subscription plans) run without a client    │
//! │  5. Everything else: validate config, build BillbookClient, dispatch    │
//! │  6. Output on stdout; errors on stderr with a category exit code        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::io::Write;

use billbook_client::BillbookClient;
use billbook_core::{PaymentVerification, SubscriptionPlan};
use billbook_export::ExportFormat;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{BillCommand, Cli, Command, ConfigCommand, ExportArgs, PartyCommand, ReportCommand, SubscriptionCommand};
use commands::config::InitOptions;
use commands::report::ExportTarget;
use error::CliResult;
use state::AppConfig;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - Default: `warn,billbook=info` (every billbook crate)
/// - `RUST_LOG=billbook_client=debug` - request lines only
/// - `-v` forces `warn,billbook=debug`
///
/// Logs go to stderr so tables on stdout can be piped.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,billbook=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,billbook=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Runs one parsed invocation, writing its output to stdout.
pub async fn run(cli: Cli) -> CliResult<()> {
    let mut out = std::io::stdout();
    run_with(cli, &mut out).await?;
    out.flush()?;
    Ok(())
}

/// Runs one parsed invocation, writing its output to `out`.
pub async fn run_with(cli: Cli, out: &mut impl Write) -> CliResult<()> {
    let config_path = cli.config.as_deref();
    let config = AppConfig::load(config_path)?;

    match cli.command {
        Command::Config(ConfigCommand::Show) => commands::config::show(&config, config_path, out),
        Command::Config(ConfigCommand::Init {
            base_url,
            email,
            timeout,
            export_dir,
            api_token,
        }) => commands::config::init(
            config_path,
            InitOptions {
                base_url,
                email,
                timeout_secs: timeout,
                export_dir,
                api_token,
            },
            out,
        ),
        Command::Subscription(SubscriptionCommand::Plans) => {
            commands::subscription::plans(&config.display.currency_symbol, out)
        }
        command => {
            let client = connect(&config)?;
            dispatch(&client, &config, command, out).await
        }
    }
}

/// Validates the config and builds the backend client.
pub fn connect(config: &AppConfig) -> CliResult<BillbookClient> {
    config.validate()?;
    let client = BillbookClient::new(config.to_client_config())?;
    debug!(base_url = %client.base_url(), "backend client ready");
    Ok(client)
}

async fn dispatch(
    client: &BillbookClient,
    config: &AppConfig,
    command: Command,
    out: &mut impl Write,
) -> CliResult<()> {
    match command {
        Command::Party(PartyCommand::Add { name, code }) => {
            commands::party::add(client, &name, &code, out).await
        }
        Command::Party(PartyCommand::List) => commands::party::list(client, out).await,
        Command::Party(PartyCommand::Delete { name, code, yes }) => {
            commands::party::delete(client, &name, &code, yes, out).await
        }

        Command::Bill(BillCommand::Template { range, output }) => {
            commands::bill::template(
                client,
                range.start.as_deref(),
                range.end.as_deref(),
                output.as_deref(),
                out,
            )
            .await
        }
        Command::Bill(BillCommand::Add { file }) => commands::bill::add(client, &file, out).await,
        Command::Bill(BillCommand::List { party, code, range }) => {
            commands::bill::list(
                client,
                party.as_deref(),
                code.as_deref(),
                range.start.as_deref(),
                range.end.as_deref(),
                out,
            )
            .await
        }
        Command::Bill(BillCommand::Edit { id, range, set }) => {
            commands::bill::edit(
                client,
                &id,
                range.start.as_deref(),
                range.end.as_deref(),
                &set,
                out,
            )
            .await
        }
        Command::Bill(BillCommand::SetNp { range, amount }) => {
            commands::bill::set_np(client, range.start.as_deref(), range.end.as_deref(), &amount, out)
                .await
        }
        Command::Bill(BillCommand::Delete { id, yes }) => {
            commands::bill::delete(client, &id, yes, out).await
        }

        Command::Report(ReportCommand::Week { range, export }) => {
            let target = export_target(config, export)?;
            commands::report::week(client, range.start.as_deref(), range.end.as_deref(), &target, out)
                .await
        }
        Command::Report(ReportCommand::Party {
            name,
            code,
            range,
            export,
        }) => {
            let target = export_target(config, export)?;
            commands::report::party(
                client,
                &name,
                &code,
                range.start.as_deref(),
                range.end.as_deref(),
                &target,
                out,
            )
            .await
        }
        Command::Report(ReportCommand::Year { range, export }) => {
            let target = export_target(config, export)?;
            commands::report::year(client, range.start.as_deref(), range.end.as_deref(), &target, out)
                .await
        }

        Command::Dashboard => {
            commands::dashboard::show(client, &config.display.currency_symbol, out).await
        }

        Command::Subscription(SubscriptionCommand::Order { plan }) => {
            let plan = match plan {
                Some(raw) => raw.parse::<SubscriptionPlan>()?,
                None => config.subscription_plan(),
            };
            commands::subscription::order(client, &config.subscription, plan, out).await
        }
        Command::Subscription(SubscriptionCommand::Verify {
            order_id,
            payment_id,
            signature,
        }) => {
            let verification = PaymentVerification {
                order_id,
                payment_id,
                signature,
            };
            commands::subscription::verify(client, &verification, out).await
        }

        // Handled before a client is built.
        Command::Config(_) | Command::Subscription(SubscriptionCommand::Plans) => Ok(()),
    }
}

fn export_target(config: &AppConfig, args: ExportArgs) -> CliResult<ExportTarget> {
    let format = args
        .export
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?;
    Ok(ExportTarget {
        format,
        output: args.output,
        dir: config.export_dir(),
    })
}
