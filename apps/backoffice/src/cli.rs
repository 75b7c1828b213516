use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tally_core::{QuickRange, SaleId};

#[derive(Parser, Debug)]
#[command(
    name = "backoffice",
    about = "Shift reports, cash reconciliation and voids for the Tally POS back-office."
)]
pub struct Cli {
    /// Config file (default: platform config dir / backoffice.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// State file to read and write (overrides the config)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Operator on shift
    #[arg(long, global = true, env = "TALLY_OPERATOR")]
    pub operator: Option<String>,

    /// When the operator logged in (RFC 3339); today's report starts here
    #[arg(long, global = true, env = "TALLY_SHIFT_START")]
    pub shift_start: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the dashboard report for a date range as JSON.
    Report {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Shortcut instead of --from/--to: today, week or month
        #[arg(long, conflicts_with_all = ["from", "to"])]
        quick: Option<QuickRange>,

        /// Opening float in the drawer
        #[arg(long, default_value = "")]
        starting_cash: String,

        /// Cash counted at close
        #[arg(long, default_value = "")]
        actual_cash: String,

        /// Cash expense as DESCRIPTION=AMOUNT (repeatable)
        #[arg(long = "expense", value_name = "DESCRIPTION=AMOUNT")]
        expenses: Vec<String>,
    },
    /// Void a sale, returning its items to stock.
    Void {
        /// Receipt id of the sale
        sale_id: SaleId,
    },
}

/// Splits `Ice=25.50` at the last `=`; no `=` means no amount.
pub fn split_expense(arg: &str) -> (&str, &str) {
    match arg.rsplit_once('=') {
        Some((description, amount)) => (description, amount),
        None => (arg, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_expense() {
        assert_eq!(split_expense("Ice=25.50"), ("Ice", "25.50"));
        assert_eq!(split_expense("a=b=3"), ("a=b", "3"));
        assert_eq!(split_expense("Ice"), ("Ice", ""));
    }

    #[test]
    fn test_parse_report_args() {
        let cli = Cli::try_parse_from([
            "backoffice",
            "report",
            "--quick",
            "week",
            "--starting-cash",
            "200",
            "--expense",
            "Ice=50",
            "--expense",
            "Gas=20",
        ])
        .unwrap();

        match cli.command {
            Commands::Report {
                quick, expenses, starting_cash, ..
            } => {
                assert_eq!(quick, Some(QuickRange::Week));
                assert_eq!(expenses, vec!["Ice=50", "Gas=20"]);
                assert_eq!(starting_cash, "200");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quick_conflicts_with_dates() {
        let result = Cli::try_parse_from([
            "backoffice",
            "report",
            "--quick",
            "today",
            "--from",
            "2024-05-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_void() {
        let cli = Cli::try_parse_from(["backoffice", "void", "1714557600000"]).unwrap();
        assert!(matches!(cli.command, Commands::Void { sale_id: 1714557600000 }));
    }
}
