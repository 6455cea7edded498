//! Core data models for Nest Wealth
//!
//! This module contains the value types of the ledger domain: transactions,
//! categories, budgets, period windows and filter options.

pub mod budget;
pub mod category;
pub mod filter;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{
    Budget, BudgetDraft, BudgetHealth, BudgetStatus, BudgetView, OverallProgress,
};
pub use category::{Category, CategoryUpdate, COLOR_PALETTE};
pub use filter::{FilterOptions, TypeFilter};
pub use ids::{BudgetId, CategoryId, TransactionId};
pub use money::Money;
pub use period::{BudgetPeriod, PeriodWindow};
pub use transaction::{NewTransaction, Transaction, TransactionType, MAX_TRANSACTION_AMOUNT};
