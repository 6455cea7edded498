//! CLI commands for reports
//!
//! Every report is computed from the transactions that pass the filter flags.

use clap::Subcommand;
use serde::Serialize;

use super::{parse_type, FilterArgs};
use crate::config::Settings;
use crate::error::NestResult;
use crate::reports::{CategoryReport, MonthlyReport, OverviewReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses, net, savings rate and budget health
    #[command(alias = "overview")]
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Totals and shares per category
    Categories {
        /// Which side to break down: income or expense
        #[arg(default_value = "expense")]
        side: String,
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Income, expenses and savings per calendar month
    Monthly {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_json<T: Serialize>(report: &T) -> NestResult<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> NestResult<()> {
    let book = storage.load_book()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { filter, json } => {
            let report = OverviewReport::generate(&book, &filter.to_options()?);
            if json {
                print_json(&report)?;
            } else {
                print!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Categories { side, filter, json } => {
            let report = CategoryReport::generate(&book, &filter.to_options()?, parse_type(&side)?);
            if json {
                print_json(&report)?;
            } else {
                print!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Monthly { filter, json } => {
            let report = MonthlyReport::generate(&book, &filter.to_options()?);
            if json {
                print_json(&report)?;
            } else {
                print!("{}", report.format_terminal(symbol));
            }
        }
    }

    Ok(())
}
