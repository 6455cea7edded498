//! JSON export of transactions with a totals summary

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::NestResult;
use crate::models::{FilterOptions, Transaction};
use crate::reports::{totals_by_type, TypeTotals};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
pub struct TransactionExport<'a> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    /// The filter the transactions passed
    pub filter: &'a FilterOptions,
    pub transaction_count: usize,
    pub totals: TypeTotals,
    pub transactions: Vec<&'a Transaction>,
}

impl<'a> TransactionExport<'a> {
    pub fn new(filter: &'a FilterOptions, transactions: Vec<&'a Transaction>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            filter,
            transaction_count: transactions.len(),
            totals: totals_by_type(transactions.iter().copied()),
            transactions,
        }
    }
}

/// Write the export as pretty JSON. Returns the number of transactions written.
pub fn export_transactions_json<'a, W: Write>(
    filter: &'a FilterOptions,
    transactions: Vec<&'a Transaction>,
    writer: &mut W,
) -> NestResult<usize> {
    let export = TransactionExport::new(filter, transactions);
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    Ok(export.transaction_count)
}
