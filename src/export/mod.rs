//! Export module for Nest Wealth
//!
//! Serializes (optionally filtered) transactions for other tools:
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - JSON: transactions plus a totals summary

pub mod csv;
pub mod json;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::NestResult;
use crate::models::FilterOptions;
use crate::services::FinanceBook;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_transactions_json, TransactionExport, EXPORT_SCHEMA_VERSION};

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown export format: {} (expected csv or json)", other)),
        }
    }
}

/// Export the book's transactions matching `options`. Returns the row count.
pub fn export_book<W: Write>(
    book: &FinanceBook,
    options: &FilterOptions,
    format: ExportFormat,
    writer: &mut W,
) -> NestResult<usize> {
    let transactions = book.filtered(options);
    match format {
        ExportFormat::Csv => export_transactions_csv(transactions, writer),
        ExportFormat::Json => export_transactions_json(options, transactions, writer),
    }
}
