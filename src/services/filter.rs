//! Filter engine
//!
//! Turns [`FilterOptions`] into one predicate: the conjunction of a
//! sub-predicate per set option. Unset options contribute nothing.

use std::fmt;

use crate::models::{FilterOptions, Transaction, TypeFilter};

type Check = Box<dyn Fn(&Transaction) -> bool>;

/// A combined test over transactions
pub struct TransactionPredicate {
    checks: Vec<Check>,
}

impl TransactionPredicate {
    /// A predicate that accepts everything
    pub fn always() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.checks.iter().all(|check| check(txn))
    }

    /// Number of active sub-predicates
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    fn push(&mut self, check: impl Fn(&Transaction) -> bool + 'static) {
        self.checks.push(Box::new(check));
    }
}

impl fmt::Debug for TransactionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionPredicate")
            .field("checks", &self.checks.len())
            .finish()
    }
}

/// Build the predicate for a filter state
pub fn build_predicate(options: &FilterOptions) -> TransactionPredicate {
    let mut predicate = TransactionPredicate::always();

    let search = options.search.trim().to_lowercase();
    if !search.is_empty() {
        predicate.push(move |t| {
            t.title.to_lowercase().contains(&search) || t.category.to_lowercase().contains(&search)
        });
    }

    if options.kind != TypeFilter::All {
        let kind = options.kind;
        predicate.push(move |t| kind.matches(t.kind));
    }

    if let Some(category) = options.category.clone().filter(|c| !c.is_empty()) {
        predicate.push(move |t| t.category == category);
    }

    if let Some(from) = options.date_from {
        predicate.push(move |t| t.date >= from);
    }

    if let Some(to) = options.date_to {
        predicate.push(move |t| t.date <= to);
    }

    if let Some(min) = options.amount_min {
        predicate.push(move |t| t.amount >= min);
    }

    if let Some(max) = options.amount_max {
        predicate.push(move |t| t.amount <= max);
    }

    predicate
}

/// Keep the transactions the predicate accepts, in their original order
pub fn apply<'a, I>(predicate: &TransactionPredicate, transactions: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| predicate.matches(t))
        .collect()
}

/// Build and apply in one step
pub fn filter_transactions<'a, I>(options: &FilterOptions, transactions: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    apply(&build_predicate(options), transactions)
}

/// Whether any option differs from its default.
///
/// Compares the raw state, so a whitespace-only search counts as set even
/// though the predicate ignores it.
pub fn has_active_filters(options: &FilterOptions) -> bool {
    *options != FilterOptions::default()
}
