use crate::core::debt::Debt;
use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Amounts below this threshold are treated as settled.
///
/// Repeated decimal division leaves sub-cent residues; any balance under
/// one cent is purged rather than carried around.
pub const CENT_TOLERANCE: Decimal = dec!(0.01);

/// Directed balance table owned by a single engine invocation.
///
/// Conceptually a two-level debtor → creditor → amount mapping, flattened
/// to `(debtor, creditor)` keys. All surviving balances are at least one
/// cent; anything smaller is purged by the mutating helpers.
///
/// `BTreeMap` keying makes structural iteration order deterministic, so the
/// engine produces identical output for identical input regardless of the
/// order balances were inserted.
#[derive(Debug, Clone, Default)]
pub struct PairwiseLedger {
    balances: BTreeMap<(ParticipantId, ParticipantId), Decimal>,
}

impl PairwiseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate onto the debtor → creditor balance. Self-debts are a no-op.
    pub fn add(&mut self, debtor: ParticipantId, creditor: ParticipantId, amount: Decimal) {
        if debtor == creditor {
            return;
        }
        *self
            .balances
            .entry((debtor, creditor))
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Current balance from debtor to creditor, zero when absent.
    pub fn amount(&self, debtor: &ParticipantId, creditor: &ParticipantId) -> Decimal {
        self.balances
            .get(&(debtor.clone(), creditor.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Whether a directed entry exists, settled or not.
    pub fn contains(&self, debtor: &ParticipantId, creditor: &ParticipantId) -> bool {
        self.balances
            .contains_key(&(debtor.clone(), creditor.clone()))
    }

    /// Remove an entry, returning the amount it held (zero when absent).
    pub fn remove(&mut self, debtor: &ParticipantId, creditor: &ParticipantId) -> Decimal {
        self.balances
            .remove(&(debtor.clone(), creditor.clone()))
            .unwrap_or(Decimal::ZERO)
    }

    /// Subtract from an entry, purging it once it drops below the settled
    /// threshold.
    pub fn subtract(&mut self, debtor: &ParticipantId, creditor: &ParticipantId, amount: Decimal) {
        let key = (debtor.clone(), creditor.clone());
        if let Some(balance) = self.balances.get_mut(&key) {
            *balance -= amount;
            if *balance < CENT_TOLERANCE {
                self.balances.remove(&key);
            }
        }
    }

    /// Remove every entry below the settled threshold.
    pub fn purge_settled(&mut self) {
        self.balances.retain(|_, amount| *amount >= CENT_TOLERANCE);
    }

    /// Iterate entries in sorted key order.
    pub fn entries(&self) -> impl Iterator<Item = (&(ParticipantId, ParticipantId), &Decimal)> {
        self.balances.iter()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Flatten into the final debt list: settled entries dropped, every
    /// amount rounded to two decimal places.
    pub fn into_debts(self) -> Vec<Debt> {
        self.balances
            .into_iter()
            .filter_map(|((from, to), amount)| {
                let rounded = amount.round_dp(2);
                (rounded >= CENT_TOLERANCE).then(|| Debt::new(from, to, rounded))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str) -> ParticipantId {
        ParticipantId::new(id)
    }

    #[test]
    fn test_add_accumulates() {
        let mut ledger = PairwiseLedger::new();
        ledger.add(p("ben"), p("ana"), dec!(10));
        ledger.add(p("ben"), p("ana"), dec!(5));
        assert_eq!(ledger.amount(&p("ben"), &p("ana")), dec!(15));
    }

    #[test]
    fn test_self_debt_ignored() {
        let mut ledger = PairwiseLedger::new();
        ledger.add(p("ana"), p("ana"), dec!(10));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_absent_entry_is_zero() {
        let ledger = PairwiseLedger::new();
        assert_eq!(ledger.amount(&p("ben"), &p("ana")), Decimal::ZERO);
    }

    #[test]
    fn test_subtract_purges_below_tolerance() {
        let mut ledger = PairwiseLedger::new();
        ledger.add(p("ben"), p("ana"), dec!(10));
        ledger.subtract(&p("ben"), &p("ana"), dec!(9.995));
        assert!(!ledger.contains(&p("ben"), &p("ana")));
    }

    #[test]
    fn test_subtract_keeps_cent() {
        let mut ledger = PairwiseLedger::new();
        ledger.add(p("ben"), p("ana"), dec!(10));
        ledger.subtract(&p("ben"), &p("ana"), dec!(9.99));
        assert_eq!(ledger.amount(&p("ben"), &p("ana")), dec!(0.01));
    }

    #[test]
    fn test_purge_settled() {
        let mut ledger = PairwiseLedger::new();
        ledger.add(p("ben"), p("ana"), dec!(0.005));
        ledger.add(p("carla"), p("ana"), dec!(2));
        ledger.purge_settled();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.amount(&p("carla"), &p("ana")), dec!(2));
    }

    #[test]
    fn test_into_debts_rounds_and_filters() {
        let mut ledger = PairwiseLedger::new();
        ledger.add(p("ben"), p("ana"), dec!(33.333333));
        ledger.add(p("carla"), p("ana"), dec!(0.004));
        let debts = ledger.into_debts();
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].amount, dec!(33.33));
    }

    #[test]
    fn test_into_debts_sorted_by_key() {
        let mut ledger = PairwiseLedger::new();
        ledger.add(p("zoe"), p("ana"), dec!(1));
        ledger.add(p("ben"), p("ana"), dec!(2));
        let debts = ledger.into_debts();
        assert_eq!(debts[0].from.as_str(), "ben");
        assert_eq!(debts[1].from.as_str(), "zoe");
    }
}
