//! Aggregation over transaction sets
//!
//! Pure functions of their input. Call them on the full ledger or on a
//! filtered slice; nothing is remembered between calls.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Datelike;
use serde::Serialize;

use crate::models::{Money, Transaction, TransactionType};

/// Income, expense and net of a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeTotals {
    pub income: Money,
    pub expense: Money,
    /// income - expense
    pub net: Money,
}

impl TypeTotals {
    /// Savings as a percentage of income
    pub fn savings_rate(&self) -> f64 {
        savings_rate(self.income, self.expense)
    }
}

/// Sum amounts per transaction type
pub fn totals_by_type<'a, I>(transactions: I) -> TypeTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expense) =
        transactions
            .into_iter()
            .fold((Money::zero(), Money::zero()), |(inc, exp), t| match t.kind {
                TransactionType::Income => (inc + t.amount, exp),
                TransactionType::Expense => (inc, exp + t.amount),
            });

    TypeTotals {
        income,
        expense,
        net: income - expense,
    }
}

/// One category's slice of a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShare {
    pub amount: Money,
    pub transaction_count: usize,
    /// Share of the breakdown total, 0..=100, full precision
    pub percentage: f64,
}

impl CategoryShare {
    /// Percentage rounded to one decimal place
    pub fn display_percentage(&self) -> f64 {
        (self.percentage * 10.0).round() / 10.0
    }
}

/// Amounts grouped by category label
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// Sum over every entry; percentages are relative to this
    pub total: Money,
    pub entries: BTreeMap<String, CategoryShare>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<&CategoryShare> {
        self.entries.get(category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending amount, ties broken by name
    pub fn ranked(&self) -> Vec<(&str, &CategoryShare)> {
        let mut ranked: Vec<_> = self
            .entries
            .iter()
            .map(|(name, share)| (name.as_str(), share))
            .collect();
        ranked.sort_by(|a, b| b.1.amount.cmp(&a.1.amount).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Group transactions by category and compute each group's share
pub fn breakdown_by_category<'a, I>(transactions: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums: BTreeMap<String, (Money, usize)> = BTreeMap::new();
    for txn in transactions {
        let entry = sums
            .entry(txn.category.clone())
            .or_insert((Money::zero(), 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let total: Money = sums.values().map(|(amount, _)| *amount).sum();

    let entries = sums
        .into_iter()
        .map(|(category, (amount, transaction_count))| {
            let percentage = amount.ratio_of(total).map(|r| r * 100.0).unwrap_or(0.0);
            (
                category,
                CategoryShare {
                    amount,
                    transaction_count,
                    percentage,
                },
            )
        })
        .collect();

    CategoryBreakdown { total, entries }
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: chrono::NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income and expenses of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub income: Money,
    pub expenses: Money,
    /// income - expenses
    pub savings: Money,
}

impl MonthlySummary {
    pub fn savings_rate(&self) -> f64 {
        savings_rate(self.income, self.expenses)
    }
}

/// Per-month totals in chronological order; months without activity are omitted
pub fn monthly_summary<'a, I>(transactions: I) -> Vec<MonthlySummary>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<YearMonth, (Money, Money)> = BTreeMap::new();
    for txn in transactions {
        let entry = months
            .entry(YearMonth::of(txn.date))
            .or_insert((Money::zero(), Money::zero()));
        match txn.kind {
            TransactionType::Income => entry.0 += txn.amount,
            TransactionType::Expense => entry.1 += txn.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlySummary {
            month,
            income,
            expenses,
            savings: income - expenses,
        })
        .collect()
}

/// `(income - expenses) / income` as a percentage; 0 when there is no income
pub fn savings_rate(income: Money, expenses: Money) -> f64 {
    (income - expenses)
        .ratio_of(income)
        .map(|r| r * 100.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTransaction, TransactionId};
    use chrono::NaiveDate;

    fn txn(category: &str, cents: i64, y: i32, m: u32, d: u32, kind: TransactionType) -> Transaction {
        NewTransaction::new(
            "Item",
            Money::from_cents(cents),
            category,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            kind,
        )
        .into_transaction(TransactionId::new())
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("Salary", 500000, 2024, 1, 1, TransactionType::Income),
            txn("Food & Dining", 8950, 2024, 1, 2, TransactionType::Expense),
            txn("Food & Dining", 575, 2024, 1, 4, TransactionType::Expense),
            txn("Transportation", 4500, 2024, 1, 9, TransactionType::Expense),
            txn("Salary", 500000, 2024, 2, 1, TransactionType::Income),
            txn("Housing", 150000, 2024, 2, 1, TransactionType::Expense),
        ]
    }

    #[test]
    fn test_totals_by_type() {
        let totals = totals_by_type(&sample());
        assert_eq!(totals.income, Money::from_cents(1_000_000));
        assert_eq!(totals.expense, Money::from_cents(164_025));
        assert_eq!(totals.net, Money::from_cents(835_975));

        assert_eq!(totals_by_type(&Vec::new()), TypeTotals::default());
    }

    #[test]
    fn test_breakdown_percentages_use_grouped_total() {
        let txns = sample();
        let expenses: Vec<_> = txns.iter().filter(|t| t.is_expense()).collect();
        let breakdown = breakdown_by_category(expenses.iter().copied());

        assert_eq!(breakdown.total, Money::from_cents(164_025));
        assert_eq!(breakdown.len(), 3);

        let food = breakdown.get("Food & Dining").unwrap();
        assert_eq!(food.amount, Money::from_cents(9525));
        assert_eq!(food.transaction_count, 2);
        assert_eq!(food.display_percentage(), 5.8);

        let sum: f64 = breakdown.entries.values().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);

        let ranked: Vec<_> = breakdown.ranked().into_iter().map(|(n, _)| n).collect();
        assert_eq!(ranked, vec!["Housing", "Food & Dining", "Transportation"]);
    }

    #[test]
    fn test_breakdown_is_stateless_across_slices() {
        let txns = sample();
        let all = breakdown_by_category(&txns);
        let january: Vec<_> = txns.iter().filter(|t| t.date.month() == 1).collect();
        let partial = breakdown_by_category(january.iter().copied());
        let again = breakdown_by_category(&txns);

        assert_eq!(all, again);
        assert_ne!(all.total, partial.total);
        assert!(breakdown_by_category(&Vec::new()).is_empty());
    }

    #[test]
    fn test_monthly_summary_is_chronological() {
        let mut txns = sample();
        txns.reverse();
        let months = monthly_summary(&txns);

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month.to_string(), "2024-01");
        assert_eq!(months[0].income, Money::from_cents(500000));
        assert_eq!(months[0].expenses, Money::from_cents(14025));
        assert_eq!(months[1].savings, Money::from_cents(350000));
        assert!((months[1].savings_rate() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_savings_rate() {
        assert_eq!(savings_rate(Money::zero(), Money::from_cents(100)), 0.0);
        assert_eq!(
            savings_rate(Money::from_cents(10000), Money::from_cents(2500)),
            75.0
        );
        assert!(savings_rate(Money::from_cents(100), Money::from_cents(300)) < 0.0);
    }
}
