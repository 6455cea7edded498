//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the finance book.

pub mod audit;
pub mod budget;
pub mod category;
pub mod export;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;
use clap::Args;

use crate::error::{NestError, NestResult};
use crate::models::{FilterOptions, Money, TransactionType, TypeFilter};

/// Filter flags shared by listing, report and export commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text matched against title and category
    #[arg(long)]
    pub search: Option<String>,

    /// Only income or only expense (default: all)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Exact category name
    #[arg(long)]
    pub category: Option<String>,

    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Smallest amount, inclusive
    #[arg(long)]
    pub min: Option<String>,

    /// Largest amount, inclusive
    #[arg(long)]
    pub max: Option<String>,
}

impl FilterArgs {
    /// Parse the flags into a filter state
    pub fn to_options(&self) -> NestResult<FilterOptions> {
        let mut options = FilterOptions::new();

        if let Some(search) = &self.search {
            options = options.search(search.as_str());
        }
        if let Some(kind) = &self.kind {
            let kind = kind.parse::<TypeFilter>().map_err(NestError::Validation)?;
            options = options.kind(kind);
        }
        if let Some(category) = &self.category {
            options = options.category(category.as_str());
        }
        if let Some(from) = &self.from {
            options = options.date_from(parse_date(from)?);
        }
        if let Some(to) = &self.to {
            options = options.date_to(parse_date(to)?);
        }
        if let Some(min) = &self.min {
            options = options.amount_min(parse_amount(min)?);
        }
        if let Some(max) = &self.max {
            options = options.amount_max(parse_amount(max)?);
        }

        Ok(options)
    }
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> NestResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        NestError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

/// Parse an amount such as "89.50" or "$89.50"
pub fn parse_amount(s: &str) -> NestResult<Money> {
    Money::parse(s).map_err(|e| NestError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_type(s: &str) -> NestResult<TransactionType> {
    s.parse().map_err(NestError::Validation)
}

/// The local calendar date
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
