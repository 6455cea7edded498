//! Filter options
//!
//! The value object a filter panel edits. Every field is independently
//! optional and an unset field imposes no constraint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::transaction::TransactionType;

/// Type constraint of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// Whether a transaction of `kind` passes
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionType::Income,
            Self::Expense => kind == TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            other => other.parse::<TransactionType>().map(Self::from),
        }
    }
}

/// Filter state over transactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Case-insensitive substring of title or category
    pub search: String,

    #[serde(rename = "type")]
    pub kind: TypeFilter,

    /// Exact category label
    pub category: Option<String>,

    /// Inclusive lower date bound
    pub date_from: Option<NaiveDate>,

    /// Inclusive upper date bound
    pub date_to: Option<NaiveDate>,

    /// Inclusive lower bound on the unsigned amount
    pub amount_min: Option<Money>,

    /// Inclusive upper bound on the unsigned amount
    pub amount_max: Option<Money>,
}

impl FilterOptions {
    /// Options that match everything
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    pub fn amount_min(mut self, amount: Money) -> Self {
        self.amount_min = Some(amount);
        self
    }

    pub fn amount_max(mut self, amount: Money) -> Self {
        self.amount_max = Some(amount);
        self
    }

    /// Reset every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_filter_matches() {
        assert!(TypeFilter::All.matches(TransactionType::Income));
        assert!(TypeFilter::All.matches(TransactionType::Expense));
        assert!(TypeFilter::Income.matches(TransactionType::Income));
        assert!(!TypeFilter::Income.matches(TransactionType::Expense));
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!("all".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert_eq!("Expense".parse::<TypeFilter>(), Ok(TypeFilter::Expense));
        assert!("both".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_builder_and_clear() {
        let mut options = FilterOptions::new()
            .search("coffee")
            .kind(TypeFilter::Expense)
            .amount_max(Money::from_cents(1000));
        assert_eq!(options.search, "coffee");
        assert_eq!(options.amount_max, Some(Money::from_cents(1000)));

        options.clear();
        assert_eq!(options, FilterOptions::default());
    }
}
