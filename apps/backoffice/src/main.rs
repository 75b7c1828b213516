//! # backoffice
//!
//! Command-line front end for the Tally back-office.
//!
//! ```text
//! backoffice report --quick today --starting-cash 200 --actual-cash 850 --expense Ice=50
//! backoffice report --from 2024-05-01 --to 2024-05-07
//! backoffice void 1714557600000
//! ```
//!
//! Results go to stdout as JSON. Operator errors go to stderr as
//! `{ "code": ..., "message": ... }` with exit status 1.

mod cli;
mod commands;

use anyhow::Context;
use chrono::{Local, Utc};
use clap::Parser;
use tally_session::{init_tracing, ApiError, JsonFileStore, ReconciliationSession, SessionConfig, ShiftContext};
use tracing::info;

use cli::{Cli, Commands};
use commands::ReportArgs;

fn main() {
    init_tracing();

    match run(Cli::parse()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}

/// Runs one command. `Ok(false)` means the operation was refused and the
/// reason has been printed.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = SessionConfig::load(cli.config.clone()).context("loading config")?;
    if let Some(data) = cli.data {
        config.storage.data_path = Some(data);
    }

    let data_path = config.data_path();
    info!(path = ?data_path, "Opening back-office state");

    let shift = ShiftContext::new(cli.operator, cli.shift_start);
    let mut session = ReconciliationSession::open(JsonFileStore::new(&data_path), shift, config, Local)
        .with_context(|| format!("opening {}", data_path.display()))?;

    let now = Utc::now();
    let outcome = match cli.command {
        Commands::Report {
            from,
            to,
            quick,
            starting_cash,
            actual_cash,
            expenses,
        } => {
            let args = ReportArgs {
                from,
                to,
                quick,
                starting_cash,
                actual_cash,
                expenses,
            };
            commands::report(&mut session, args, now).map(|report| commands::print_json(&report))
        }
        Commands::Void { sale_id } => {
            commands::void(&mut session, sale_id, now).map(|outcome| commands::print_json(&outcome))
        }
    };

    match outcome {
        Ok(printed) => {
            printed?;
            Ok(true)
        }
        Err(e) => {
            let api = ApiError::from(e);
            eprintln!("{}", serde_json::to_string(&api)?);
            Ok(false)
        }
    }
}
