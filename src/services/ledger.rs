//! Ledger
//!
//! The single owned store of transactions. Records are kept newest-first,
//! edits replace the whole record, and every mutation bumps a revision
//! counter and notifies subscribers so derived figures can be recomputed.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::error::{NestError, NestResult};
use crate::models::{NewTransaction, Transaction, TransactionId};

/// What changed in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    Added(TransactionId),
    Updated(TransactionId),
    Removed(TransactionId),
}

impl LedgerEvent {
    pub fn transaction_id(&self) -> TransactionId {
        match self {
            Self::Added(id) | Self::Updated(id) | Self::Removed(id) => *id,
        }
    }
}

/// Handle returned by [`Ledger::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&LedgerEvent)>;

/// The authoritative collection of transactions
#[derive(Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a ledger from records already in newest-first order
    pub fn from_transactions(transactions: Vec<Transaction>) -> NestResult<Self> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for txn in &transactions {
            if !seen.insert(txn.id) {
                return Err(NestError::Validation(format!(
                    "Duplicate transaction id: {}",
                    txn.id
                )));
            }
            txn.validate()
                .map_err(|e| NestError::Validation(format!("{}: {}", txn.id, e)))?;
        }

        Ok(Self {
            transactions,
            ..Self::default()
        })
    }

    /// Record a new transaction under a fresh id and return the stored copy
    pub fn add(&mut self, draft: NewTransaction) -> NestResult<Transaction> {
        let mut id = TransactionId::new();
        while self.contains(id) {
            id = TransactionId::new();
        }

        let mut txn = draft.into_transaction(id);
        txn.normalize();
        txn.validate()
            .map_err(|e| NestError::Validation(e.to_string()))?;

        self.transactions.insert(0, txn.clone());
        self.touch(LedgerEvent::Added(id));
        debug!(id = %id, title = %txn.title, amount = %txn.amount, "transaction added");

        Ok(txn)
    }

    /// Replace the record with the same id. Returns the previous version.
    pub fn update(&mut self, mut txn: Transaction) -> NestResult<Transaction> {
        txn.normalize();
        txn.validate()
            .map_err(|e| NestError::Validation(e.to_string()))?;

        let id = txn.id;
        let Some(slot) = self.transactions.iter_mut().find(|t| t.id == id) else {
            warn!(id = %id, "update of unknown transaction");
            return Err(NestError::transaction_not_found(id.to_string()));
        };

        let previous = std::mem::replace(slot, txn);
        self.touch(LedgerEvent::Updated(id));
        debug!(id = %id, "transaction updated");

        Ok(previous)
    }

    /// Delete a record. Removing the same id twice is an error.
    pub fn remove(&mut self, id: TransactionId) -> NestResult<Transaction> {
        let Some(index) = self.transactions.iter().position(|t| t.id == id) else {
            warn!(id = %id, "removal of unknown transaction");
            return Err(NestError::transaction_not_found(id.to_string()));
        };

        let removed = self.transactions.remove(index);
        self.touch(LedgerEvent::Removed(id));
        debug!(id = %id, "transaction removed");

        Ok(removed)
    }

    /// All records, most recently added first
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Find a record by full or short id.
    ///
    /// A short id shared by several records is an ambiguity error.
    pub fn find(&self, reference: &str) -> NestResult<&Transaction> {
        let candidates = self.transactions.iter().filter(|t| t.id.matches_ref(reference));
        super::unique_match("Transaction", reference, candidates)?
            .ok_or_else(|| NestError::transaction_not_found(reference))
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Monotonic counter bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a listener called after every mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&LedgerEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn touch(&mut self, event: LedgerEvent) {
        self.revision += 1;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions.len())
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType, MAX_TRANSACTION_AMOUNT};
    use chrono::NaiveDate;
    use uuid::Uuid;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(title: &str, cents: i64) -> NewTransaction {
        NewTransaction::new(
            title,
            Money::from_cents(cents),
            "Food & Dining",
            date(2024, 1, 2),
            TransactionType::Expense,
        )
    }

    #[test]
    fn test_add_assigns_fresh_id_and_keeps_fields() {
        let mut ledger = Ledger::new();
        let stored = ledger.add(expense("Groceries", 8950)).unwrap();

        assert_eq!(ledger.len(), 1);
        let all = ledger.all();
        assert_eq!(all[0], stored);
        assert_eq!(all[0].amount, Money::from_cents(8950));
        assert_eq!(all[0].title, "Groceries");
    }

    #[test]
    fn test_rapid_adds_never_collide() {
        let mut ledger = Ledger::new();
        let mut ids = HashSet::new();
        for i in 0..500 {
            let txn = ledger.add(expense("Coffee", 100 + i)).unwrap();
            assert!(ids.insert(txn.id));
        }
        assert_eq!(ledger.len(), 500);
    }

    #[test]
    fn test_all_is_newest_first() {
        let mut ledger = Ledger::new();
        let first = ledger.add(expense("First", 100)).unwrap();
        let second = ledger.add(expense("Second", 200)).unwrap();

        let ids: Vec<_> = ledger.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let mut ledger = Ledger::new();
        let err = ledger.add(expense("   ", 100)).unwrap_err();
        assert!(err.is_validation());

        let err = ledger.add(expense("Refund", 0)).unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.is_empty());
        assert_eq!(ledger.revision(), 0);
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let mut ledger = Ledger::new();
        let stored = ledger.add(expense("Groceries", 8950)).unwrap();

        let mut edited = stored.clone();
        edited.title = "Supermarket".into();
        edited.amount = Money::from_cents(9000);
        edited.description = Some("weekly shop".into());

        let previous = ledger.update(edited.clone()).unwrap();
        assert_eq!(previous, stored);
        assert_eq!(ledger.get(stored.id), Some(&edited));
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut ledger = Ledger::new();
        let ghost = expense("Ghost", 100).into_transaction(TransactionId::new());
        assert!(ledger.update(ghost).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_twice_fails_second_time() {
        let mut ledger = Ledger::new();
        let stored = ledger.add(expense("Groceries", 8950)).unwrap();

        let removed = ledger.remove(stored.id).unwrap();
        assert_eq!(removed.id, stored.id);
        assert!(ledger.is_empty());

        assert!(ledger.remove(stored.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_revision_and_subscribers() {
        let mut ledger = Ledger::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let sub = ledger.subscribe(move |event| sink.borrow_mut().push(*event));

        let stored = ledger.add(expense("Groceries", 8950)).unwrap();
        ledger.update(stored.clone()).unwrap();
        ledger.remove(stored.id).unwrap();

        assert_eq!(ledger.revision(), 3);
        assert_eq!(
            *events.borrow(),
            vec![
                LedgerEvent::Added(stored.id),
                LedgerEvent::Updated(stored.id),
                LedgerEvent::Removed(stored.id),
            ]
        );

        assert!(ledger.unsubscribe(sub));
        assert!(!ledger.unsubscribe(sub));
        ledger.add(expense("Coffee", 575)).unwrap();
        assert_eq!(events.borrow().len(), 3);
        assert_eq!(ledger.revision(), 4);
    }

    #[test]
    fn test_from_transactions_rejects_duplicate_ids() {
        let txn = expense("Groceries", 8950).into_transaction(TransactionId::new());
        let err = Ledger::from_transactions(vec![txn.clone(), txn]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_find_by_short_id() {
        let mut ledger = Ledger::new();
        let stored = ledger.add(expense("Groceries", 8950)).unwrap();
        let short = stored.id.to_string();
        assert_eq!(ledger.find(&short).unwrap().id, stored.id);
        assert!(ledger.find("").unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_rejects_shared_short_id() {
        let twin = |uuid: &str| {
            let id = TransactionId::from(Uuid::parse_str(uuid).unwrap());
            expense("Coffee", 575).into_transaction(id)
        };
        let first = twin("1a2b3c4d-0000-4000-8000-000000000001");
        let second = twin("1a2b3c4d-0000-4000-8000-000000000002");
        let ledger = Ledger::from_transactions(vec![first.clone(), second.clone()]).unwrap();

        assert_eq!(first.id.short(), second.id.short());
        let err = ledger.find("txn-1a2b3c4d").unwrap_err();
        assert!(err.is_ambiguous());
        assert!(err.to_string().contains("matches 2 records"));

        let full = second.id.as_uuid().to_string();
        assert_eq!(ledger.find(&full).unwrap().id, second.id);
        assert_eq!(ledger.find(&format!("txn-{}", full)).unwrap().id, second.id);
    }

    #[test]
    fn test_add_rejects_amount_above_maximum() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add(expense("Yacht", MAX_TRANSACTION_AMOUNT.cents() + 1))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.is_empty());

        ledger.add(expense("Island", MAX_TRANSACTION_AMOUNT.cents())).unwrap();
        assert_eq!(ledger.len(), 1);
    }
}
