//! Financial Overview Report
//!
//! Headline figures for a (possibly filtered) set of transactions plus the
//! state of every budget.

use serde::Serialize;

use crate::models::{BudgetStatus, FilterOptions, Money, OverallProgress};
use crate::services::{has_active_filters, FinanceBook};

use super::summary::{totals_by_type, TypeTotals};

/// Overview of income, expenses and budgets
#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    /// Totals of the transactions that passed the filter
    pub totals: TypeTotals,
    /// Savings as a percentage of income
    pub savings_rate: f64,
    /// Number of transactions that passed the filter
    pub transaction_count: usize,
    /// Number of transactions in the ledger
    pub ledger_count: usize,
    /// Whether a filter narrowed the set
    pub filtered: bool,
    /// Totals across every budget
    pub budget_progress: OverallProgress,
    pub budgets_near_limit: usize,
    pub budgets_exceeded: usize,
}

impl OverviewReport {
    /// Generate the overview for the transactions matching `options`
    pub fn generate(book: &FinanceBook, options: &FilterOptions) -> Self {
        let transactions = book.filtered(options);
        let totals = totals_by_type(transactions.iter().copied());

        let views = book.budget_views();
        let count_status = |status: BudgetStatus| {
            views.iter().filter(|v| v.health.status == status).count()
        };

        Self {
            totals,
            savings_rate: totals.savings_rate(),
            transaction_count: transactions.len(),
            ledger_count: book.ledger().len(),
            filtered: has_active_filters(options),
            budget_progress: book.budget_progress(),
            budgets_near_limit: count_status(BudgetStatus::Warning),
            budgets_exceeded: count_status(BudgetStatus::Exceeded),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str("Financial Overview\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.filtered {
            output.push_str(&format!(
                "Showing {} of {} transactions (filtered)\n\n",
                self.transaction_count, self.ledger_count
            ));
        } else {
            output.push_str(&format!("Transactions: {}\n\n", self.transaction_count));
        }

        output.push_str(&format!("Total Income:   {:>15}\n", money(self.totals.income)));
        output.push_str(&format!("Total Expenses: {:>15}\n", money(self.totals.expense)));
        output.push_str(&"-".repeat(32));
        output.push('\n');
        output.push_str(&format!("Net:            {:>15}\n", money(self.totals.net)));
        output.push_str(&format!("Savings Rate:   {:>14.1}%\n", self.savings_rate));

        if !self.budget_progress.total_limit.is_zero() {
            output.push('\n');
            output.push_str("Budgets\n");
            output.push_str(&"-".repeat(32));
            output.push('\n');
            output.push_str(&format!(
                "Spent {} of {} ({:.1}%)\n",
                money(self.budget_progress.total_spent),
                money(self.budget_progress.total_limit),
                self.budget_progress.ratio * 100.0
            ));
            if self.budgets_near_limit > 0 {
                output.push_str(&format!("Near limit:  {}\n", self.budgets_near_limit));
            }
            if self.budgets_exceeded > 0 {
                output.push_str(&format!("Over budget: {}\n", self.budgets_exceeded));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetDraft, BudgetPeriod, NewTransaction, TransactionType, TypeFilter};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_book() -> FinanceBook {
        let mut book = FinanceBook::new();
        book.add_transaction(NewTransaction::new(
            "Monthly Salary",
            Money::from_cents(500000),
            "Salary",
            date(2024, 1, 1),
            TransactionType::Income,
        ))
        .unwrap();
        book.add_transaction(NewTransaction::new(
            "Rent",
            Money::from_cents(150000),
            "Housing",
            date(2024, 1, 3),
            TransactionType::Expense,
        ))
        .unwrap();
        book.create_budget(
            BudgetDraft::new("Housing", Money::from_cents(150000), BudgetPeriod::Monthly),
            date(2024, 1, 10),
        )
        .unwrap();
        book
    }

    #[test]
    fn test_generate_overview() {
        let book = sample_book();
        let report = OverviewReport::generate(&book, &FilterOptions::default());

        assert_eq!(report.totals.net, Money::from_cents(350000));
        assert!((report.savings_rate - 70.0).abs() < 1e-9);
        assert!(!report.filtered);
        assert_eq!(report.budgets_exceeded, 1);

        let text = report.format_terminal("$");
        assert!(text.contains("Financial Overview"));
        assert!(text.contains("$5000.00"));
        assert!(text.contains("Over budget: 1"));
    }

    #[test]
    fn test_filtered_overview() {
        let book = sample_book();
        let options = FilterOptions::new().kind(TypeFilter::Expense);
        let report = OverviewReport::generate(&book, &options);

        assert!(report.filtered);
        assert_eq!(report.transaction_count, 1);
        assert_eq!(report.ledger_count, 2);
        assert_eq!(report.totals.income, Money::zero());
        assert_eq!(report.savings_rate, 0.0);
        assert!(report.format_terminal("$").contains("Showing 1 of 2"));
    }
}
