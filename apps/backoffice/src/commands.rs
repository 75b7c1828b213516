use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tally_core::validation::parse_date_input;
use tally_core::{QuickRange, SaleId, VoidOutcome};
use tally_session::{DashboardReport, JsonFileStore, ReconciliationSession, SessionResult};

use crate::cli::split_expense;

pub type Session = ReconciliationSession<JsonFileStore, Local>;

/// Report arguments after clap.
pub struct ReportArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub quick: Option<QuickRange>,
    pub starting_cash: String,
    pub actual_cash: String,
    pub expenses: Vec<String>,
}

/// Builds the dashboard for the requested range.
///
/// With no range at all the report is today's live shift, the same as the
/// dashboard opening with both pickers on today.
pub fn report(session: &mut Session, args: ReportArgs, now: DateTime<Utc>) -> SessionResult<DashboardReport> {
    session.set_cash_inputs(&args.starting_cash, &args.actual_cash);
    for expense in &args.expenses {
        let (description, amount) = split_expense(expense);
        session.add_expense(description, amount)?;
    }

    if let Some(quick) = args.quick {
        return Ok(session.quick_report(quick, now));
    }

    match (args.from.as_deref(), args.to.as_deref()) {
        (None, None) => Ok(session.quick_report(QuickRange::Today, now)),
        (from, to) => {
            let start = parse_date_input("start date", from.unwrap_or(""))?;
            let end = parse_date_input("end date", to.unwrap_or(""))?;
            session.report_for_inputs(start, end, now)
        }
    }
}

/// Voids one sale.
pub fn void(session: &mut Session, sale_id: SaleId, now: DateTime<Utc>) -> SessionResult<VoidOutcome> {
    session.void_transaction(sale_id, now)
}

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
