use crate::core::participant::ParticipantId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when validating externally supplied transaction data.
///
/// The engine itself never returns errors; validation is the caller's job
/// before transactions reach it.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("transaction amount must be non-negative, got {amount}")]
    NegativeAmount { amount: Decimal },
    #[error("transaction payer must not be empty")]
    EmptyPayer,
}

/// A shared expense: one participant paid `amount`, split equally among
/// `participants`.
///
/// The payer need not be a member of `participants` — someone can pay for
/// a cost they do not share in. A transaction with an empty participant
/// set contributes nothing and is skipped by the engine. The participant
/// list is treated as a set; duplicates are collapsed on construction.
///
/// Transactions are immutable once created.
///
/// # Examples
///
/// ```
/// use splitledger::core::transaction::Transaction;
/// use splitledger::core::participant::ParticipantId;
/// use rust_decimal_macros::dec;
///
/// let dinner = Transaction::new(
///     ParticipantId::new("ana"),
///     dec!(90),
///     vec![ParticipantId::new("ana"), ParticipantId::new("ben")],
/// );
///
/// assert_eq!(dinner.share(), Some(dec!(45)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for this transaction.
    id: Uuid,
    /// The participant who paid.
    payer: ParticipantId,
    /// The total amount paid. Must be non-negative.
    amount: Decimal,
    /// Participants sharing the cost equally. May be empty.
    participants: Vec<ParticipantId>,
    /// When this transaction was recorded. Used only for ordering
    /// in balance histories.
    recorded_at: DateTime<Utc>,
    /// Optional free-form memo.
    note: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is negative.
    pub fn new(payer: ParticipantId, amount: Decimal, participants: Vec<ParticipantId>) -> Self {
        assert!(
            amount >= Decimal::ZERO,
            "transaction amount must be non-negative, got {}",
            amount
        );
        let mut participants = participants;
        participants.sort();
        participants.dedup();
        Self {
            id: Uuid::new_v4(),
            payer,
            amount,
            participants,
            recorded_at: Utc::now(),
            note: None,
        }
    }

    /// Create a transaction, validating raw external input instead of
    /// panicking. Used by the store and the CLI loader.
    pub fn checked(
        payer: ParticipantId,
        amount: Decimal,
        participants: Vec<ParticipantId>,
    ) -> Result<Self, TransactionError> {
        if payer.as_str().is_empty() {
            return Err(TransactionError::EmptyPayer);
        }
        if amount < Decimal::ZERO {
            return Err(TransactionError::NegativeAmount { amount });
        }
        Ok(Self::new(payer, amount, participants))
    }

    /// Create a transaction with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        payer: ParticipantId,
        amount: Decimal,
        participants: Vec<ParticipantId>,
    ) -> Self {
        let mut txn = Self::new(payer, amount, participants);
        txn.id = id;
        txn
    }

    /// Set the recording timestamp.
    pub fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// Set a memo string.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Re-check the invariants on a transaction that bypassed construction
    /// (e.g. one produced by deserialization).
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.payer.as_str().is_empty() {
            return Err(TransactionError::EmptyPayer);
        }
        if self.amount < Decimal::ZERO {
            return Err(TransactionError::NegativeAmount {
                amount: self.amount,
            });
        }
        Ok(())
    }

    /// The equal share each participant owes, or `None` when the
    /// participant set is empty (no split, no division).
    pub fn share(&self) -> Option<Decimal> {
        if self.participants.is_empty() {
            None
        } else {
            Some(self.amount / Decimal::from(self.participants.len() as u64))
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn payer(&self) -> &ParticipantId {
        &self.payer
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn dinner() -> Transaction {
        Transaction::new(
            ParticipantId::new("ana"),
            dec!(90),
            vec![ParticipantId::new("ana"), ParticipantId::new("ben")],
        )
    }

    #[test]
    fn test_transaction_creation() {
        let txn = dinner();
        assert_eq!(txn.payer().as_str(), "ana");
        assert_eq!(txn.amount(), dec!(90));
        assert_eq!(txn.participants().len(), 2);
    }

    #[test]
    fn test_share_equal_split() {
        assert_eq!(dinner().share(), Some(dec!(45)));
    }

    #[test]
    fn test_share_empty_participants() {
        let txn = Transaction::new(ParticipantId::new("ana"), dec!(90), vec![]);
        assert_eq!(txn.share(), None);
    }

    #[test]
    fn test_duplicate_participants_collapsed() {
        let txn = Transaction::new(
            ParticipantId::new("ana"),
            dec!(30),
            vec![
                ParticipantId::new("ben"),
                ParticipantId::new("ben"),
                ParticipantId::new("carla"),
            ],
        );
        assert_eq!(txn.participants().len(), 2);
        assert_eq!(txn.share(), Some(dec!(15)));
    }

    #[test]
    #[should_panic(expected = "must be non-negative")]
    fn test_negative_amount_panics() {
        Transaction::new(ParticipantId::new("ana"), dec!(-10), vec![]);
    }

    #[test]
    fn test_zero_amount_allowed() {
        let txn = Transaction::new(
            ParticipantId::new("ana"),
            Decimal::ZERO,
            vec![ParticipantId::new("ben")],
        );
        assert_eq!(txn.share(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_checked_rejects_negative() {
        let result = Transaction::checked(ParticipantId::new("ana"), dec!(-1), vec![]);
        assert!(matches!(
            result,
            Err(TransactionError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_checked_rejects_empty_payer() {
        let result = Transaction::checked(ParticipantId::new(""), dec!(10), vec![]);
        assert!(matches!(result, Err(TransactionError::EmptyPayer)));
    }
}
