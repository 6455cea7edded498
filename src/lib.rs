//! Nest Wealth - personal finance ledger
//!
//! This library provides the core of the Nest Wealth application: an
//! in-memory ledger of income and expense transactions, per-type category
//! lists, spending budgets with derived progress, and a filter engine whose
//! results feed every aggregate and export.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, filters)
//! - `services`: The ledger core (ledger, category registry, budget tracker, filter engine)
//! - `reports`: Aggregates over filtered transactions
//! - `storage`: JSON snapshot persistence
//! - `audit`: Audit logging system
//! - `export`: CSV and JSON export
//! - `display`, `cli`: Terminal presentation
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use nest::models::{FilterOptions, Money, NewTransaction, TransactionType, TypeFilter};
//! use nest::services::FinanceBook;
//!
//! let mut book = FinanceBook::new();
//! book.add_transaction(NewTransaction::new(
//!     "Groceries",
//!     Money::from_cents(8950),
//!     "Food & Dining",
//!     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
//!     TransactionType::Expense,
//! ))?;
//!
//! let expenses = book.filtered(&FilterOptions::new().kind(TypeFilter::Expense));
//! assert_eq!(expenses.len(), 1);
//! # Ok::<(), nest::NestError>(())
//! ```

use std::sync::Once;

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{NestError, NestResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber once.
///
/// Honors `RUST_LOG`; defaults to warnings from this crate. Output goes to
/// stderr so it never mixes with command output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nest=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
