//! Budget tracker
//!
//! Owns the budget records and derives their spend from the ledger. Spend is
//! never stored on a budget; the tracker memoizes it per ledger revision and
//! drops the memo whenever the ledger or a budget changes.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{NestError, NestResult};
use crate::models::{
    Budget, BudgetDraft, BudgetHealth, BudgetId, BudgetView, Money, OverallProgress, Transaction,
};

use super::ledger::Ledger;

/// Status and spend ratio of a budget given its matching spend
pub fn status_for(budget: &Budget, matching_spend: Money) -> BudgetHealth {
    BudgetHealth::evaluate(budget.amount, matching_spend)
}

/// Sum of expense amounts with the budget's exact category inside its window
pub fn matching_spend<'a, I>(budget: &Budget, transactions: I) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let window = budget.window();
    transactions
        .into_iter()
        .filter(|t| t.is_expense() && t.category == budget.category && window.contains(t.date))
        .map(|t| t.amount)
        .sum()
}

/// Total limit and spend across budgets; the ratio is 0 without any limit
pub fn overall_progress<'a, I>(views: I) -> OverallProgress
where
    I: IntoIterator<Item = &'a BudgetView>,
{
    let (total_limit, total_spent) = views
        .into_iter()
        .fold((Money::zero(), Money::zero()), |(limit, spent), view| {
            (limit + view.budget.amount, spent + view.spent)
        });

    OverallProgress {
        total_limit,
        total_spent,
        ratio: total_spent.ratio_of(total_limit).unwrap_or(0.0),
    }
}

#[derive(Debug, Clone, Default)]
struct SpendCache {
    revision: Option<u64>,
    spent: HashMap<BudgetId, Money>,
}

/// Budget records plus derived spend
#[derive(Debug, Clone, Default)]
pub struct BudgetTracker {
    budgets: Vec<Budget>,
    cache: RefCell<SpendCache>,
}

impl BudgetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore budgets from a snapshot
    pub fn from_budgets(budgets: Vec<Budget>) -> NestResult<Self> {
        let mut ids = HashSet::with_capacity(budgets.len());
        for budget in &budgets {
            if !ids.insert(budget.id) {
                return Err(NestError::Validation(format!(
                    "Duplicate budget id: {}",
                    budget.id
                )));
            }
            budget
                .validate()
                .map_err(|e| NestError::Validation(format!("{}: {}", budget.id, e)))?;
        }

        Ok(Self {
            budgets,
            cache: RefCell::default(),
        })
    }

    /// Create a budget whose window is the period containing `today`
    pub fn create(&mut self, draft: BudgetDraft, today: NaiveDate) -> NestResult<Budget> {
        let mut budget = Budget::new(draft, today);
        while self.get(budget.id).is_some() {
            budget.id = BudgetId::new();
        }

        budget
            .validate()
            .map_err(|e| NestError::Validation(e.to_string()))?;

        self.budgets.push(budget.clone());
        self.invalidate();
        debug!(id = %budget.id, category = %budget.category, limit = %budget.amount, "budget created");

        Ok(budget)
    }

    /// Replace the editable fields of a budget and re-pin its window to the
    /// period containing `today`. Returns the previous version.
    pub fn update(&mut self, id: BudgetId, draft: BudgetDraft, today: NaiveDate) -> NestResult<Budget> {
        let Some(index) = self.position(id) else {
            warn!(id = %id, "update of unknown budget");
            return Err(NestError::budget_not_found(id.to_string()));
        };

        let mut budget = self.budgets[index].clone();
        budget.apply(draft, today);
        budget
            .validate()
            .map_err(|e| NestError::Validation(e.to_string()))?;

        let previous = std::mem::replace(&mut self.budgets[index], budget);
        self.invalidate();
        debug!(id = %id, "budget updated");

        Ok(previous)
    }

    /// Delete a budget
    pub fn remove(&mut self, id: BudgetId) -> NestResult<Budget> {
        let Some(index) = self.position(id) else {
            warn!(id = %id, "removal of unknown budget");
            return Err(NestError::budget_not_found(id.to_string()));
        };

        let removed = self.budgets.remove(index);
        self.invalidate();
        debug!(id = %id, category = %removed.category, "budget removed");

        Ok(removed)
    }

    /// Move every budget whose window ended before `today` into the window
    /// containing `today`. Returns the ids that moved.
    pub fn roll_forward(&mut self, today: NaiveDate) -> Vec<BudgetId> {
        let mut rolled = Vec::new();
        for budget in self.budgets.iter_mut().filter(|b| b.end_date < today) {
            budget.roll_to(today);
            rolled.push(budget.id);
        }

        if !rolled.is_empty() {
            self.invalidate();
            debug!(count = rolled.len(), "budgets rolled forward");
        }

        rolled
    }

    pub fn get(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    /// Find by id reference or, failing that, case-insensitive category
    pub fn find(&self, reference: &str) -> NestResult<&Budget> {
        let by_id = self.budgets.iter().filter(|b| b.id.matches_ref(reference));
        if let Some(budget) = super::unique_match("Budget", reference, by_id)? {
            return Ok(budget);
        }

        let wanted = reference.trim().to_lowercase();
        let by_category = self
            .budgets
            .iter()
            .filter(|b| b.category.to_lowercase() == wanted);
        super::unique_match("Budget", reference, by_category)?
            .ok_or_else(|| NestError::budget_not_found(reference))
    }

    /// Budgets in creation order
    pub fn list(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Spend attributed to a budget, memoized per ledger revision
    pub fn spent(&self, budget: &Budget, ledger: &Ledger) -> Money {
        let mut cache = self.cache.borrow_mut();
        if cache.revision != Some(ledger.revision()) {
            cache.spent.clear();
            cache.revision = Some(ledger.revision());
        }

        *cache
            .spent
            .entry(budget.id)
            .or_insert_with(|| matching_spend(budget, ledger.iter()))
    }

    /// A budget with its derived figures
    pub fn view(&self, budget: &Budget, ledger: &Ledger) -> BudgetView {
        let spent = self.spent(budget, ledger);
        BudgetView {
            budget: budget.clone(),
            spent,
            health: status_for(budget, spent),
            remaining: budget.remaining(spent),
        }
    }

    /// Every budget with its derived figures, in creation order
    pub fn views(&self, ledger: &Ledger) -> Vec<BudgetView> {
        self.budgets.iter().map(|b| self.view(b, ledger)).collect()
    }

    /// Totals across every budget
    pub fn progress(&self, ledger: &Ledger) -> OverallProgress {
        overall_progress(&self.views(ledger))
    }

    fn position(&self, id: BudgetId) -> Option<usize> {
        self.budgets.iter().position(|b| b.id == id)
    }

    fn invalidate(&self) {
        let mut cache = self.cache.borrow_mut();
        cache.revision = None;
        cache.spent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, BudgetStatus, NewTransaction, TransactionType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(category: &str, cents: i64, on: NaiveDate, kind: TransactionType) -> NewTransaction {
        NewTransaction::new("Item", Money::from_cents(cents), category, on, kind)
    }

    fn food_budget(tracker: &mut BudgetTracker) -> Budget {
        tracker
            .create(
                BudgetDraft::new("Food", Money::from_cents(40000), BudgetPeriod::Monthly),
                date(2024, 1, 15),
            )
            .unwrap()
    }

    #[test]
    fn test_end_to_end_food_scenario() {
        let mut ledger = Ledger::new();
        ledger
            .add(txn("Food", 8950, date(2024, 1, 2), TransactionType::Expense))
            .unwrap();
        ledger
            .add(txn("Food", 575, date(2024, 1, 4), TransactionType::Expense))
            .unwrap();

        let mut tracker = BudgetTracker::new();
        let budget = food_budget(&mut tracker);
        assert_eq!(budget.start_date, date(2024, 1, 1));
        assert_eq!(budget.end_date, date(2024, 1, 31));

        let spend = matching_spend(&budget, ledger.iter());
        assert_eq!(spend, Money::from_cents(9525));

        let health = status_for(&budget, spend);
        assert_eq!(health.status, BudgetStatus::Good);
        assert!((health.ratio - 0.238125).abs() < 1e-9);
        assert_eq!(format!("{:.3}", health.ratio), "0.238");
    }

    #[test]
    fn test_weekly_budget_covers_calendar_month() {
        let mut ledger = Ledger::new();
        ledger
            .add(txn("Food", 300, date(2024, 1, 2), TransactionType::Expense))
            .unwrap();
        ledger
            .add(txn("Food", 200, date(2024, 1, 29), TransactionType::Expense))
            .unwrap();

        let mut tracker = BudgetTracker::new();
        let budget = tracker
            .create(
                BudgetDraft::new("Food", Money::from_cents(100), BudgetPeriod::Weekly),
                date(2024, 1, 15),
            )
            .unwrap();
        assert_eq!(budget.start_date, date(2024, 1, 1));
        assert_eq!(budget.end_date, date(2024, 1, 31));
        assert_eq!(tracker.spent(&budget, &ledger), Money::from_cents(500));
    }

    #[test]
    fn test_matching_spend_exclusions() {
        let mut ledger = Ledger::new();
        ledger
            .add(txn("Food", 1000, date(2024, 1, 10), TransactionType::Expense))
            .unwrap();
        // income in the same category
        ledger
            .add(txn("Food", 5000, date(2024, 1, 10), TransactionType::Income))
            .unwrap();
        // outside the window on both sides
        ledger
            .add(txn("Food", 7000, date(2023, 12, 31), TransactionType::Expense))
            .unwrap();
        ledger
            .add(txn("Food", 7000, date(2024, 2, 1), TransactionType::Expense))
            .unwrap();
        // visually similar category
        ledger
            .add(txn("food", 3000, date(2024, 1, 10), TransactionType::Expense))
            .unwrap();
        ledger
            .add(txn("Food ", 3000, date(2024, 1, 10), TransactionType::Expense))
            .unwrap();
        // window edges are inclusive
        ledger
            .add(txn("Food", 100, date(2024, 1, 1), TransactionType::Expense))
            .unwrap();
        ledger
            .add(txn("Food", 10, date(2024, 1, 31), TransactionType::Expense))
            .unwrap();

        let mut tracker = BudgetTracker::new();
        let budget = food_budget(&mut tracker);

        // "Food " is trimmed to "Food" on add, so it counts
        assert_eq!(
            matching_spend(&budget, ledger.iter()),
            Money::from_cents(1000 + 3000 + 100 + 10)
        );
    }

    #[test]
    fn test_spent_follows_ledger_mutations() {
        let mut ledger = Ledger::new();
        let mut tracker = BudgetTracker::new();
        let budget = food_budget(&mut tracker);

        assert_eq!(tracker.spent(&budget, &ledger), Money::zero());

        let coffee = ledger
            .add(txn("Food", 575, date(2024, 1, 4), TransactionType::Expense))
            .unwrap();
        assert_eq!(tracker.spent(&budget, &ledger), Money::from_cents(575));

        let mut bigger = coffee.clone();
        bigger.amount = Money::from_cents(35000);
        ledger.update(bigger).unwrap();
        let view = tracker.view(&budget, &ledger);
        assert_eq!(view.spent, Money::from_cents(35000));
        assert_eq!(view.health.status, BudgetStatus::Warning);
        assert_eq!(view.remaining, Money::from_cents(5000));

        ledger.remove(coffee.id).unwrap();
        assert_eq!(tracker.spent(&budget, &ledger), Money::zero());
    }

    #[test]
    fn test_spent_follows_budget_edits() {
        let mut ledger = Ledger::new();
        ledger
            .add(txn("Travel", 20000, date(2024, 1, 4), TransactionType::Expense))
            .unwrap();

        let mut tracker = BudgetTracker::new();
        let budget = food_budget(&mut tracker);
        assert_eq!(tracker.views(&ledger)[0].spent, Money::zero());

        tracker
            .update(
                budget.id,
                BudgetDraft::new("Travel", Money::from_cents(10000), BudgetPeriod::Monthly),
                date(2024, 1, 20),
            )
            .unwrap();
        let view = &tracker.views(&ledger)[0];
        assert_eq!(view.spent, Money::from_cents(20000));
        assert_eq!(view.health.status, BudgetStatus::Exceeded);
        assert!(view.remaining.is_negative());
    }

    #[test]
    fn test_crud_errors() {
        let mut tracker = BudgetTracker::new();
        let err = tracker
            .create(
                BudgetDraft::new("Food", Money::zero(), BudgetPeriod::Monthly),
                date(2024, 1, 1),
            )
            .unwrap_err();
        assert!(err.is_validation());

        let err = tracker
            .create(
                BudgetDraft::new("  ", Money::from_cents(100), BudgetPeriod::Monthly),
                date(2024, 1, 1),
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(tracker.is_empty());

        let budget = food_budget(&mut tracker);
        tracker.remove(budget.id).unwrap();
        assert!(tracker.remove(budget.id).unwrap_err().is_not_found());
        assert!(tracker
            .update(
                budget.id,
                BudgetDraft::new("Food", Money::from_cents(100), BudgetPeriod::Weekly),
                date(2024, 1, 1),
            )
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_overall_progress() {
        let ledger = Ledger::new();
        let tracker = BudgetTracker::new();
        let progress = tracker.progress(&ledger);
        assert_eq!(progress.total_limit, Money::zero());
        assert_eq!(progress.ratio, 0.0);

        let mut ledger = Ledger::new();
        ledger
            .add(txn("Food", 10000, date(2024, 1, 4), TransactionType::Expense))
            .unwrap();
        let mut tracker = BudgetTracker::new();
        food_budget(&mut tracker);
        tracker
            .create(
                BudgetDraft::new("Travel", Money::from_cents(10000), BudgetPeriod::Monthly),
                date(2024, 1, 15),
            )
            .unwrap();

        let progress = tracker.progress(&ledger);
        assert_eq!(progress.total_limit, Money::from_cents(50000));
        assert_eq!(progress.total_spent, Money::from_cents(10000));
        assert!((progress.ratio - 0.2).abs() < 1e-12);
        assert_eq!(progress.remaining(), Money::from_cents(40000));
    }

    #[test]
    fn test_roll_forward_only_moves_ended_windows() {
        let mut tracker = BudgetTracker::new();
        let january = food_budget(&mut tracker);
        let march = tracker
            .create(
                BudgetDraft::new("Travel", Money::from_cents(10000), BudgetPeriod::Monthly),
                date(2024, 3, 2),
            )
            .unwrap();

        let rolled = tracker.roll_forward(date(2024, 3, 10));
        assert_eq!(rolled, vec![january.id]);

        let moved = tracker.get(january.id).unwrap();
        assert_eq!(moved.start_date, date(2024, 3, 1));
        assert_eq!(moved.end_date, date(2024, 3, 31));
        assert_eq!(tracker.get(march.id).unwrap().start_date, date(2024, 3, 1));

        assert!(tracker.roll_forward(date(2024, 3, 31)).is_empty());
    }

    #[test]
    fn test_find_by_category() {
        let mut tracker = BudgetTracker::new();
        let budget = food_budget(&mut tracker);
        assert_eq!(tracker.find("food").unwrap().id, budget.id);
        assert_eq!(
            tracker.find(&budget.id.to_string()).ok().map(|b| b.id),
            Some(budget.id)
        );
        assert!(tracker.find("Housing").unwrap_err().is_not_found());

        food_budget(&mut tracker);
        assert!(tracker.find("food").unwrap_err().is_ambiguous());
        assert_eq!(tracker.find(&budget.id.to_string()).unwrap().id, budget.id);
    }
}
