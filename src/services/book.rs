//! Finance book
//!
//! The single source of truth: one ledger, one category registry and one
//! budget tracker. Filtered lists and budget figures are always derived from
//! these, never stored alongside them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{NestError, NestResult};
use crate::models::{
    Budget, BudgetDraft, BudgetId, BudgetView, Category, CategoryId, CategoryUpdate,
    FilterOptions, NewTransaction, OverallProgress, Transaction, TransactionId, TransactionType,
};

use super::budget::BudgetTracker;
use super::category::CategoryRegistry;
use super::filter;
use super::ledger::{Ledger, LedgerEvent, SubscriptionId};

/// Current on-disk layout version of [`BookData`]
pub const BOOK_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    BOOK_SCHEMA_VERSION
}

/// Serializable snapshot of a whole book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Newest first
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Default for BookData {
    fn default() -> Self {
        Self {
            schema_version: BOOK_SCHEMA_VERSION,
            transactions: Vec::new(),
            categories: Vec::new(),
            budgets: Vec::new(),
        }
    }
}

/// Ledger, categories and budgets of one user
#[derive(Debug, Default)]
pub struct FinanceBook {
    ledger: Ledger,
    categories: CategoryRegistry,
    budgets: BudgetTracker,
}

impl FinanceBook {
    /// An empty book with the default categories
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a book from a snapshot, re-validating it
    pub fn from_data(data: BookData) -> NestResult<Self> {
        if data.schema_version > BOOK_SCHEMA_VERSION {
            return Err(NestError::Storage(format!(
                "Book schema version {} is newer than supported version {}",
                data.schema_version, BOOK_SCHEMA_VERSION
            )));
        }

        Ok(Self {
            ledger: Ledger::from_transactions(data.transactions)?,
            categories: CategoryRegistry::from_categories(data.categories)?,
            budgets: BudgetTracker::from_budgets(data.budgets)?,
        })
    }

    /// Snapshot the book for persistence
    pub fn to_data(&self) -> BookData {
        BookData {
            schema_version: BOOK_SCHEMA_VERSION,
            transactions: self.ledger.all().to_vec(),
            categories: self.categories.all().to_vec(),
            budgets: self.budgets.list().to_vec(),
        }
    }

    /// Color given to categories added without one
    pub fn set_default_category_color(&mut self, color: impl Into<String>) {
        self.categories.set_default_color(color);
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn budgets(&self) -> &BudgetTracker {
        &self.budgets
    }

    /// Listen for ledger changes
    pub fn subscribe(&mut self, listener: impl FnMut(&LedgerEvent) + 'static) -> SubscriptionId {
        self.ledger.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.ledger.unsubscribe(id)
    }

    // === Transactions ===

    /// Record a transaction whose category is on the list for its type
    pub fn add_transaction(&mut self, draft: NewTransaction) -> NestResult<Transaction> {
        self.ensure_category(draft.kind, &draft.category)?;
        self.ledger.add(draft)
    }

    /// Replace a transaction. Returns the previous version.
    ///
    /// A record may keep a category that has since been deleted; moving it to
    /// a different category requires that category to exist.
    pub fn update_transaction(&mut self, txn: Transaction) -> NestResult<Transaction> {
        let unchanged_label = self
            .ledger
            .get(txn.id)
            .is_some_and(|prev| prev.kind == txn.kind && prev.category == txn.category.trim());

        if !unchanged_label {
            self.ensure_category(txn.kind, &txn.category)?;
        }

        self.ledger.update(txn)
    }

    pub fn remove_transaction(&mut self, id: TransactionId) -> NestResult<Transaction> {
        self.ledger.remove(id)
    }

    /// Look up a transaction by full or short id
    pub fn find_transaction(&self, reference: &str) -> NestResult<&Transaction> {
        self.ledger.find(reference)
    }

    /// Transactions matching a filter state, newest first
    pub fn filtered(&self, options: &FilterOptions) -> Vec<&Transaction> {
        filter::filter_transactions(options, self.ledger.iter())
    }

    // === Categories ===

    pub fn add_category(&mut self, name: &str, kind: TransactionType, color: &str) -> NestResult<Category> {
        self.categories.add(name, kind, color)
    }

    pub fn update_category(&mut self, id: CategoryId, update: CategoryUpdate) -> NestResult<Category> {
        self.categories.update(id, update)
    }

    /// Delete a user category; existing transactions keep their label
    pub fn remove_category(&mut self, id: CategoryId) -> NestResult<Category> {
        self.categories.remove(id)
    }

    pub fn find_category(&self, identifier: &str) -> NestResult<&Category> {
        self.categories.find_any(identifier)
    }

    // === Budgets ===

    pub fn create_budget(&mut self, draft: BudgetDraft, today: NaiveDate) -> NestResult<Budget> {
        self.budgets.create(draft, today)
    }

    pub fn update_budget(&mut self, id: BudgetId, draft: BudgetDraft, today: NaiveDate) -> NestResult<Budget> {
        self.budgets.update(id, draft, today)
    }

    pub fn remove_budget(&mut self, id: BudgetId) -> NestResult<Budget> {
        self.budgets.remove(id)
    }

    pub fn roll_budgets(&mut self, today: NaiveDate) -> Vec<BudgetId> {
        self.budgets.roll_forward(today)
    }

    pub fn find_budget(&self, reference: &str) -> NestResult<&Budget> {
        self.budgets.find(reference)
    }

    /// Every budget with spend derived from the ledger
    pub fn budget_views(&self) -> Vec<BudgetView> {
        self.budgets.views(&self.ledger)
    }

    pub fn budget_progress(&self) -> OverallProgress {
        self.budgets.progress(&self.ledger)
    }

    fn ensure_category(&self, kind: TransactionType, category: &str) -> NestResult<()> {
        let category = category.trim();
        if category.is_empty() || self.categories.contains(kind, category) {
            // Blank labels are rejected by transaction validation
            return Ok(());
        }

        warn!(category = %category, kind = %kind, "transaction references unknown category");
        Err(NestError::Validation(format!(
            "'{}' is not a known {} category",
            category,
            kind.as_str()
        )))
    }
}
