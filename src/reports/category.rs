//! Category Report
//!
//! Where the money went (or came from), grouped by category label.

use serde::Serialize;

use crate::models::{FilterOptions, TransactionType};
use crate::services::FinanceBook;

use super::summary::{breakdown_by_category, CategoryBreakdown};

/// Breakdown of one transaction type by category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub kind: TransactionType,
    pub breakdown: CategoryBreakdown,
}

impl CategoryReport {
    /// Generate the breakdown of `kind` transactions matching `options`
    pub fn generate(book: &FinanceBook, options: &FilterOptions, kind: TransactionType) -> Self {
        let transactions = book.filtered(options);
        let breakdown = breakdown_by_category(
            transactions.iter().copied().filter(|t| t.kind == kind),
        );

        Self { kind, breakdown }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} by Category\n", self.kind));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.breakdown.is_empty() {
            output.push_str("No transactions found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>12} {:>6} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for (name, share) in self.breakdown.ranked() {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>7.1}%\n",
                name,
                share.amount.format_with_symbol(symbol),
                share.transaction_count,
                share.display_percentage()
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "TOTAL",
            self.breakdown.total.format_with_symbol(symbol)
        ));

        output
    }
}
