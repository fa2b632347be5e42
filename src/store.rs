//! Observable in-memory transaction store.
//!
//! Presentation-layer plumbing owned by the application shell: the engine
//! never sees the store, only snapshots taken from it. Subscribers are
//! notified with the current transaction list after every mutation, which
//! is how UI layers recompute debts reactively.

use crate::core::transaction::{Transaction, TransactionError};
use log::debug;
use std::fmt;

type Subscriber = Box<dyn Fn(&[Transaction])>;

/// In-memory transaction store with subscriber notification.
#[derive(Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    subscribers: Vec<Subscriber>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a transaction, notifying subscribers.
    pub fn add(&mut self, txn: Transaction) -> Result<(), TransactionError> {
        txn.validate()?;
        debug!("recorded transaction {} paid by {}", txn.id(), txn.payer());
        self.transactions.push(txn);
        self.notify();
        Ok(())
    }

    /// Validate and record a batch, notifying subscribers once. Nothing is
    /// recorded if any transaction fails validation.
    pub fn extend(
        &mut self,
        txns: impl IntoIterator<Item = Transaction>,
    ) -> Result<(), TransactionError> {
        let txns: Vec<Transaction> = txns.into_iter().collect();
        for txn in &txns {
            txn.validate()?;
        }
        debug!("recorded {} transactions", txns.len());
        self.transactions.extend(txns);
        self.notify();
        Ok(())
    }

    /// Current transactions, in recording order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Owned copy of the current transactions, for handing to the engine.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Drop all transactions, notifying subscribers.
    pub fn clear(&mut self) {
        debug!("cleared {} transactions", self.transactions.len());
        self.transactions.clear();
        self.notify();
    }

    /// Register a callback invoked with the full transaction list after
    /// every mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&[Transaction]) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.transactions);
        }
    }
}

impl fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::participant::ParticipantId;
    use rust_decimal_macros::dec;
    use std::cell::Cell;
    use std::rc::Rc;

    fn dinner() -> Transaction {
        Transaction::new(
            ParticipantId::new("ana"),
            dec!(90),
            vec![ParticipantId::new("ana"), ParticipantId::new("ben")],
        )
    }

    #[test]
    fn test_add_and_snapshot() {
        let mut store = TransactionStore::new();
        store.add(dinner()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_subscriber_notified_on_add() {
        let mut store = TransactionStore::new();
        let seen = Rc::new(Cell::new(0usize));
        let seen_by_subscriber = Rc::clone(&seen);
        store.subscribe(move |txns| seen_by_subscriber.set(txns.len()));

        store.add(dinner()).unwrap();
        assert_eq!(seen.get(), 1);
        store.add(dinner()).unwrap();
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_subscriber_notified_on_clear() {
        let mut store = TransactionStore::new();
        store.add(dinner()).unwrap();

        let seen = Rc::new(Cell::new(usize::MAX));
        let seen_by_subscriber = Rc::clone(&seen);
        store.subscribe(move |txns| seen_by_subscriber.set(txns.len()));

        store.clear();
        assert_eq!(seen.get(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_extend_all_or_nothing() {
        let mut store = TransactionStore::new();
        let bad = Transaction::new(ParticipantId::new("x"), dec!(1), vec![]);
        // Sneak an invalid payer in through a serde-style bypass.
        let json = serde_json::to_string(&bad).unwrap().replace("\"x\"", "\"\"");
        let invalid: Transaction = serde_json::from_str(&json).unwrap();

        let result = store.extend(vec![dinner(), invalid]);
        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
