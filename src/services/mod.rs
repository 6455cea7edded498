//! Service layer for Nest Wealth
//!
//! The ledger core: the transaction store, the category registry, the budget
//! tracker, the filter engine, and the book that ties them together.

pub mod book;
pub mod budget;
pub mod category;
pub mod filter;
pub mod ledger;

pub use book::{BookData, FinanceBook, BOOK_SCHEMA_VERSION};
pub use budget::{matching_spend, overall_progress, status_for, BudgetTracker};
pub use category::CategoryRegistry;
pub use filter::{apply, build_predicate, filter_transactions, has_active_filters, TransactionPredicate};
pub use ledger::{Ledger, LedgerEvent, SubscriptionId};

use crate::error::{NestError, NestResult};

/// The single record among `candidates`, or `None` when there is none.
///
/// More than one candidate is an [`NestError::Ambiguous`] error.
pub(crate) fn unique_match<'a, T>(
    entity_type: &'static str,
    reference: &str,
    mut candidates: impl Iterator<Item = &'a T>,
) -> NestResult<Option<&'a T>> {
    let Some(first) = candidates.next() else {
        return Ok(None);
    };

    match candidates.count() {
        0 => Ok(Some(first)),
        others => Err(NestError::ambiguous(entity_type, reference, others + 1)),
    }
}
