//! Monthly Report
//!
//! Income, expenses and savings month by month.

use serde::Serialize;

use crate::models::FilterOptions;
use crate::services::FinanceBook;

use super::summary::{monthly_summary, totals_by_type, MonthlySummary, TypeTotals};

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    /// Chronological
    pub months: Vec<MonthlySummary>,
    pub totals: TypeTotals,
}

impl MonthlyReport {
    pub fn generate(book: &FinanceBook, options: &FilterOptions) -> Self {
        let transactions = book.filtered(options);
        Self {
            months: monthly_summary(transactions.iter().copied()),
            totals: totals_by_type(transactions.iter().copied()),
        }
    }

    /// Average savings rate over the whole range
    pub fn savings_rate(&self) -> f64 {
        self.totals.savings_rate()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Monthly Report\n");
        output.push_str(&"=".repeat(62));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No transactions found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14} {:>8}\n",
            "Month", "Income", "Expenses", "Savings", "Rate"
        ));
        output.push_str(&"-".repeat(62));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<8} {:>14} {:>14} {:>14} {:>7.1}%\n",
                month.month.to_string(),
                month.income.format_with_symbol(symbol),
                month.expenses.format_with_symbol(symbol),
                month.savings.format_with_symbol(symbol),
                month.savings_rate()
            ));
        }

        output.push_str(&"-".repeat(62));
        output.push('\n');
        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14} {:>7.1}%\n",
            "TOTAL",
            self.totals.income.format_with_symbol(symbol),
            self.totals.expense.format_with_symbol(symbol),
            self.totals.net.format_with_symbol(symbol),
            self.savings_rate()
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction, TransactionType};
    use chrono::NaiveDate;

    #[test]
    fn test_monthly_report() {
        let mut book = FinanceBook::new();
        for (month, income, rent) in [(1, 500000, 150000), (2, 520000, 150000)] {
            let on = NaiveDate::from_ymd_opt(2024, month, 1).unwrap();
            book.add_transaction(NewTransaction::new(
                "Pay",
                Money::from_cents(income),
                "Salary",
                on,
                TransactionType::Income,
            ))
            .unwrap();
            book.add_transaction(NewTransaction::new(
                "Rent",
                Money::from_cents(rent),
                "Housing",
                on,
                TransactionType::Expense,
            ))
            .unwrap();
        }

        let report = MonthlyReport::generate(&book, &FilterOptions::default());
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[1].savings, Money::from_cents(370000));
        assert_eq!(report.totals.net, Money::from_cents(720000));

        let text = report.format_terminal("$");
        assert!(text.contains("2024-01"));
        assert!(text.contains("2024-02"));
        assert!(text.contains("TOTAL"));
    }
}
