//! CSV export of transactions
//!
//! One row per transaction with a header row. Amounts are unsigned decimal
//! strings; the direction is in the `type` column.

use std::io::Write;

use serde::Serialize;

use crate::error::NestResult;
use crate::models::Transaction;

#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    id: String,
    date: String,
    title: &'a str,
    category: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    amount: String,
    description: &'a str,
}

impl<'a> From<&'a Transaction> for TransactionRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            title: &txn.title,
            category: &txn.category,
            kind: txn.kind.as_str(),
            amount: format!("{}.{:02}", txn.amount.dollars(), txn.amount.cents_part()),
            description: txn.description.as_deref().unwrap_or(""),
        }
    }
}

/// Write transactions as CSV. Returns the number of rows written.
pub fn export_transactions_csv<'a, W, I>(transactions: I, writer: W) -> NestResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for txn in transactions {
        csv_writer.serialize(TransactionRow::from(txn))?;
        rows += 1;
    }

    // An empty export still gets its header row
    if rows == 0 {
        csv_writer.write_record([
            "id",
            "date",
            "title",
            "category",
            "type",
            "amount",
            "description",
        ])?;
    }

    csv_writer.flush()?;
    Ok(rows)
}
