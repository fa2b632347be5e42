use crate::core::debt::Debt;
use crate::core::ledger::CENT_TOLERANCE;
use crate::core::participant::ParticipantId;
use crate::core::transaction::Transaction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Net position of every participant after some prefix of the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Timestamp of the last transaction included.
    pub as_of: DateTime<Utc>,
    /// Positive = net receivable, negative = net payable.
    pub balances: BTreeMap<ParticipantId, Decimal>,
}

fn apply(balances: &mut BTreeMap<ParticipantId, Decimal>, txn: &Transaction) {
    let Some(share) = txn.share() else {
        return;
    };
    for member in txn.participants() {
        if member == txn.payer() {
            continue;
        }
        *balances.entry(member.clone()).or_insert(Decimal::ZERO) -= share;
        *balances
            .entry(txn.payer().clone())
            .or_insert(Decimal::ZERO) += share;
    }
}

/// Net balance per participant, computed directly from the raw transaction
/// list: what each participant paid on behalf of others minus the shares
/// they consumed. Positive means the group owes them money.
///
/// This is independent of the simplification algorithm and serves as its
/// conservation cross-check; the sum of all balances is always zero.
pub fn net_balances(transactions: &[Transaction]) -> BTreeMap<ParticipantId, Decimal> {
    let mut balances = BTreeMap::new();
    for txn in transactions {
        apply(&mut balances, txn);
    }
    balances
}

/// Verify that a simplified debt list settles the positions the raw
/// transaction list implies: for every participant, receivables minus
/// payables across `debts` must match their [`net_balances`] entry.
///
/// Each materialized debt carries up to half a cent of rounding and each
/// purged sub-cent residue loses under a cent, so the allowed drift per
/// participant is one cent per debt touching them, plus one.
pub fn is_conserved(transactions: &[Transaction], debts: &[Debt]) -> bool {
    let expected = net_balances(transactions);
    let mut settled: BTreeMap<ParticipantId, Decimal> = BTreeMap::new();
    for debt in debts {
        *settled.entry(debt.from.clone()).or_insert(Decimal::ZERO) -= debt.amount;
        *settled.entry(debt.to.clone()).or_insert(Decimal::ZERO) += debt.amount;
    }

    let mut everyone: BTreeSet<&ParticipantId> = expected.keys().collect();
    everyone.extend(settled.keys());
    let conserved = everyone.into_iter().all(|participant| {
        let raw = expected.get(participant).copied().unwrap_or(Decimal::ZERO);
        let simplified = settled.get(participant).copied().unwrap_or(Decimal::ZERO);
        let touching = debts
            .iter()
            .filter(|debt| debt.from == *participant || debt.to == *participant)
            .count();
        let slack = CENT_TOLERANCE * Decimal::from((touching + 1) as u64);
        (raw - simplified).abs() < slack
    });
    conserved
}

/// Running balance over the history: sorts a copy of the transactions by
/// recording time, then evaluates net balances after each one. Useful for
/// charting how positions evolved.
pub fn balance_history(transactions: &[Transaction]) -> Vec<BalanceSnapshot> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|txn| txn.recorded_at());

    let mut balances = BTreeMap::new();
    let mut snapshots = Vec::with_capacity(ordered.len());
    for txn in ordered {
        apply(&mut balances, txn);
        snapshots.push(BalanceSnapshot {
            as_of: txn.recorded_at(),
            balances: balances.clone(),
        });
    }
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn p(id: &str) -> ParticipantId {
        ParticipantId::new(id)
    }

    fn txn(payer: &str, amount: Decimal, participants: &[&str]) -> Transaction {
        Transaction::new(
            p(payer),
            amount,
            participants.iter().map(|m| p(m)).collect(),
        )
    }

    #[test]
    fn test_net_balances_two_party() {
        let balances = net_balances(&[txn("ana", dec!(100), &["ana", "ben"])]);
        assert_eq!(balances[&p("ana")], dec!(50));
        assert_eq!(balances[&p("ben")], dec!(-50));
    }

    #[test]
    fn test_net_balances_sum_to_zero() {
        let history = [
            txn("ana", dec!(100), &["ana", "ben", "carla"]),
            txn("ben", dec!(45), &["ben", "carla"]),
            txn("carla", dec!(20), &["ana"]),
        ];
        let balances = net_balances(&history);
        let total: Decimal = balances.values().sum();
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn test_net_balances_payer_outside_split() {
        let balances = net_balances(&[txn("ana", dec!(60), &["ben", "carla"])]);
        assert_eq!(balances[&p("ana")], dec!(60));
        assert_eq!(balances[&p("ben")], dec!(-30));
        assert_eq!(balances[&p("carla")], dec!(-30));
    }

    #[test]
    fn test_is_conserved_accepts_matching_debts() {
        let history = [txn("ana", dec!(100), &["ana", "ben"])];
        let debts = vec![Debt::new(p("ben"), p("ana"), dec!(50))];
        assert!(is_conserved(&history, &debts));
    }

    #[test]
    fn test_is_conserved_rejects_wrong_amount() {
        let history = [txn("ana", dec!(100), &["ana", "ben"])];
        let debts = vec![Debt::new(p("ben"), p("ana"), dec!(40))];
        assert!(!is_conserved(&history, &debts));
    }

    #[test]
    fn test_is_conserved_rejects_missing_debt() {
        let history = [txn("ana", dec!(100), &["ana", "ben"])];
        assert!(!is_conserved(&history, &[]));
    }

    #[test]
    fn test_balance_history_orders_by_time() {
        let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        // Recorded out of order on purpose.
        let history = [
            txn("ben", dec!(40), &["ana", "ben"]).with_recorded_at(t2),
            txn("ana", dec!(100), &["ana", "ben"]).with_recorded_at(t1),
        ];

        let snapshots = balance_history(&history);
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].as_of, t1);
        assert_eq!(snapshots[0].balances[&p("ben")], dec!(-50));
        assert_eq!(snapshots[1].as_of, t2);
        assert_eq!(snapshots[1].balances[&p("ben")], dec!(-30));
        assert_eq!(snapshots[1].balances[&p("ana")], dec!(30));
    }

    #[test]
    fn test_balance_history_empty() {
        assert!(balance_history(&[]).is_empty());
    }
}
