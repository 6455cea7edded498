//! Budget model
//!
//! A budget caps spending for one category label over a weekly or monthly
//! window. The amount spent is not stored here: it is derived from the
//! ledger by the budget tracker.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::period::{BudgetPeriod, PeriodWindow};

/// Spend ratio at which a budget turns from good to warning (80%)
pub const WARNING_NUMERATOR: i128 = 4;
pub const WARNING_DENOMINATOR: i128 = 5;

/// Spending limit for a category over a period window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Category label, matched exactly against transaction categories
    pub category: String,

    /// The limit
    pub amount: Money,

    /// Weekly or monthly
    pub period: BudgetPeriod,

    /// First day of the window (inclusive)
    pub start_date: NaiveDate,

    /// Last day of the window (inclusive)
    pub end_date: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget whose window is the period containing `today`
    pub fn new(draft: BudgetDraft, today: NaiveDate) -> Self {
        let window = draft.period.window_containing(today);
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category: draft.category,
            amount: draft.amount,
            period: draft.period,
            start_date: window.start,
            end_date: window.end,
            created_at: now,
            updated_at: now,
        }
    }

    /// The inclusive period window
    pub fn window(&self) -> PeriodWindow {
        PeriodWindow::new(self.start_date, self.end_date)
    }

    /// Replace the editable fields and pin the window to the period containing `today`
    pub fn apply(&mut self, draft: BudgetDraft, today: NaiveDate) {
        let window = draft.period.window_containing(today);
        self.category = draft.category;
        self.amount = draft.amount;
        self.period = draft.period;
        self.start_date = window.start;
        self.end_date = window.end;
        self.updated_at = Utc::now();
    }

    /// Move the window to the period containing `today`
    pub fn roll_to(&mut self, today: NaiveDate) {
        let window = self.period.window_containing(today);
        self.start_date = window.start;
        self.end_date = window.end;
        self.updated_at = Utc::now();
    }

    /// Limit minus spend; negative when overspent
    pub fn remaining(&self, spent: Money) -> Money {
        self.amount - spent
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }

        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        if self.end_date < self.start_date {
            return Err(BudgetValidationError::InvertedWindow {
                start: self.start_date,
                end: self.end_date,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.category,
            self.amount,
            self.period,
            self.window()
        )
    }
}

/// User-editable budget fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetDraft {
    pub category: String,
    pub amount: Money,
    pub period: BudgetPeriod,
}

impl BudgetDraft {
    pub fn new(category: impl Into<String>, amount: Money, period: BudgetPeriod) -> Self {
        Self {
            category: category.into().trim().to_string(),
            amount,
            period,
        }
    }
}

/// Where a budget stands against its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Below 80% of the limit
    Good,
    /// At or above 80%, below 100%
    Warning,
    /// At or above 100%
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }

    /// Label shown next to a budget
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "On Track",
            Self::Warning => "Near Limit",
            Self::Exceeded => "Over Budget",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status plus the spend ratio it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetHealth {
    pub status: BudgetStatus,
    /// `spent / limit`; `f64::INFINITY` when the limit is zero
    pub ratio: f64,
}

impl BudgetHealth {
    /// Evaluate spend against a limit.
    ///
    /// Thresholds are compared in integer cents so that exactly 80% is a
    /// warning and exactly 100% is exceeded. A zero (or negative) limit is
    /// always exceeded.
    pub fn evaluate(limit: Money, spent: Money) -> Self {
        if !limit.is_positive() {
            return Self {
                status: BudgetStatus::Exceeded,
                ratio: f64::INFINITY,
            };
        }

        let ratio = spent.ratio_of(limit).unwrap_or(f64::INFINITY);
        let spent_cents = i128::from(spent.cents());
        let limit_cents = i128::from(limit.cents());

        let status = if spent_cents >= limit_cents {
            BudgetStatus::Exceeded
        } else if spent_cents * WARNING_DENOMINATOR >= limit_cents * WARNING_NUMERATOR {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Good
        };

        Self { status, ratio }
    }

    /// Ratio as a percentage
    pub fn percentage(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// A budget together with its derived figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetView {
    pub budget: Budget,
    pub spent: Money,
    pub health: BudgetHealth,
    pub remaining: Money,
}

/// Totals across a set of budgets
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallProgress {
    pub total_limit: Money,
    pub total_spent: Money,
    /// `total_spent / total_limit`; 0 when there is no limit
    pub ratio: f64,
}

impl OverallProgress {
    pub fn remaining(&self) -> Money {
        self.total_limit - self.total_spent
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NonPositiveAmount(Money),
    InvertedWindow { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be positive (got {})", amount)
            }
            Self::InvertedWindow { start, end } => {
                write!(f, "Budget window ends ({}) before it starts ({})", end, start)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn food_budget() -> Budget {
        Budget::new(
            BudgetDraft::new("Food", Money::from_cents(40000), BudgetPeriod::Monthly),
            date(2024, 1, 15),
        )
    }

    #[test]
    fn test_new_pins_window_to_period() {
        let budget = food_budget();
        assert_eq!(budget.start_date, date(2024, 1, 1));
        assert_eq!(budget.end_date, date(2024, 1, 31));
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_apply_recomputes_window() {
        let mut budget = food_budget();
        budget.apply(
            BudgetDraft::new("Food", Money::from_cents(10000), BudgetPeriod::Weekly),
            date(2024, 3, 6),
        );
        assert_eq!(budget.amount, Money::from_cents(10000));
        assert_eq!(budget.period, BudgetPeriod::Weekly);
        assert_eq!(budget.start_date, date(2024, 3, 1));
        assert_eq!(budget.end_date, date(2024, 3, 31));
    }

    #[test]
    fn test_status_boundaries() {
        let limit = Money::from_cents(40000);

        let warning = BudgetHealth::evaluate(limit, Money::from_cents(32000));
        assert_eq!(warning.status, BudgetStatus::Warning);
        assert!((warning.ratio - 0.8).abs() < 1e-12);

        let good = BudgetHealth::evaluate(limit, Money::from_cents(31999));
        assert_eq!(good.status, BudgetStatus::Good);

        let exceeded = BudgetHealth::evaluate(limit, Money::from_cents(40000));
        assert_eq!(exceeded.status, BudgetStatus::Exceeded);
        assert_eq!(exceeded.ratio, 1.0);
    }

    #[test]
    fn test_zero_limit_is_exceeded() {
        let health = BudgetHealth::evaluate(Money::zero(), Money::zero());
        assert_eq!(health.status, BudgetStatus::Exceeded);
        assert!(health.ratio.is_infinite());
    }

    #[test]
    fn test_validation() {
        let mut budget = food_budget();
        budget.amount = Money::zero();
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveAmount(_))
        ));

        budget.amount = Money::from_cents(100);
        budget.category = "  ".into();
        assert_eq!(budget.validate(), Err(BudgetValidationError::EmptyCategory));
    }

    #[test]
    fn test_remaining() {
        let budget = food_budget();
        assert_eq!(budget.remaining(Money::from_cents(9525)), Money::from_cents(30475));
        assert!(budget.remaining(Money::from_cents(50000)).is_negative());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(BudgetStatus::Warning.label(), "Near Limit");
        assert_eq!(BudgetStatus::Exceeded.to_string(), "exceeded");
    }
}
