//! Transaction display formatting
//!
//! Register tables and detail views for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Transaction, TransactionType};

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, symbol: &str, date_format: &str) -> Self {
        let amount = match txn.kind {
            TransactionType::Income => format!("+{}", txn.amount.format_with_symbol(symbol)),
            TransactionType::Expense => format!("-{}", txn.amount.format_with_symbol(symbol)),
        };

        Self {
            id: txn.id.to_string(),
            date: txn.date.format(date_format).to_string(),
            title: truncate(&txn.title, 30),
            category: txn.category.clone(),
            amount,
        }
    }
}

/// Format transactions as a register table, newest first as given
pub fn format_transaction_register(
    transactions: &[&Transaction],
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|txn| RegisterRow::new(txn, symbol, date_format));
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Title:       {}\n", txn.title));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));

    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));

    output
}

/// Truncate a string to at most `max_chars` characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
