use crate::core::debt::Debt;
use crate::core::ledger::PairwiseLedger;
use crate::core::participant::ParticipantId;
use crate::core::transaction::Transaction;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary of one simplification run.
///
/// Carries the consolidated debt list plus the figures an application
/// shell typically reports: how much was paid in total and how many
/// debtor-creditor relationships the simplification eliminated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifyResult {
    debts: Vec<Debt>,
    transaction_count: usize,
    gross_paid: Decimal,
    raw_relationships: usize,
}

impl SimplifyResult {
    /// The consolidated debts, sorted by (debtor, creditor).
    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn into_debts(self) -> Vec<Debt> {
        self.debts
    }

    /// Number of transactions consumed.
    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    /// Total amount paid across all transactions.
    pub fn gross_paid(&self) -> Decimal {
        self.gross_paid
    }

    /// Distinct debtor → creditor relationships before simplification.
    pub fn raw_relationships(&self) -> usize {
        self.raw_relationships
    }

    /// Distinct debtor → creditor relationships after simplification.
    pub fn simplified_relationships(&self) -> usize {
        self.debts.len()
    }

    /// Relationships eliminated by netting and chain collapsing.
    pub fn relationships_eliminated(&self) -> usize {
        self.raw_relationships
            .saturating_sub(self.debts.len())
    }
}

impl std::fmt::Display for SimplifyResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Simplified Debts ===")?;
        if self.debts.is_empty() {
            writeln!(f, "  (all settled)")?;
        }
        for debt in &self.debts {
            writeln!(f, "  {}", debt)?;
        }
        writeln!(f, "Transactions:      {}", self.transaction_count)?;
        writeln!(f, "Gross paid:        {}", self.gross_paid)?;
        writeln!(f, "Pairwise debts:    {}", self.raw_relationships)?;
        writeln!(f, "After simplifying: {}", self.debts.len())?;
        Ok(())
    }
}

/// The debt simplification engine.
///
/// A pure function of its input: no state survives between calls, and each
/// call builds its own [`PairwiseLedger`]. Safe to invoke concurrently as
/// long as every caller passes its own snapshot.
///
/// The algorithm runs in four ordered phases:
///
/// 1. **Accumulation** — each transaction adds `amount / |participants|`
///    from every non-payer participant toward the payer.
/// 2. **Netting** — mutual balances between a pair are replaced by a single
///    directed balance of the difference.
/// 3. **Chain collapsing** — while some A owes B and B owes C (C ≠ A), the
///    smaller leg is rerouted directly from A to C. Iterates to fixpoint.
/// 4. **Materialization** — remaining balances of at least one cent become
///    [`Debt`] records rounded to two decimal places.
pub struct SimplifyEngine;

impl SimplifyEngine {
    /// Consolidate a transaction history into the smallest set of direct
    /// transfers. Total over well-formed input; an empty history yields an
    /// empty debt list.
    pub fn simplify_debts(transactions: &[Transaction]) -> Vec<Debt> {
        Self::simplify(transactions).into_debts()
    }

    /// Like [`simplify_debts`](Self::simplify_debts), but returns the full
    /// summary alongside the debt list.
    pub fn simplify(transactions: &[Transaction]) -> SimplifyResult {
        let mut ledger = PairwiseLedger::new();
        let mut gross_paid = Decimal::ZERO;

        // Phase 1: direct pairwise accumulation.
        for txn in transactions {
            gross_paid += txn.amount();
            let Some(share) = txn.share() else {
                debug!("skipping transaction {}: no participants", txn.id());
                continue;
            };
            for member in txn.participants() {
                // The payer never owes themself.
                if member == txn.payer() {
                    continue;
                }
                ledger.add(member.clone(), txn.payer().clone(), share);
            }
        }
        let raw_relationships = ledger.len();
        debug!(
            "accumulated {} debtor-creditor relationships from {} transactions",
            raw_relationships,
            transactions.len()
        );

        Self::net_mutual(&mut ledger);
        Self::collapse_chains(&mut ledger);

        SimplifyResult {
            debts: ledger.into_debts(),
            transaction_count: transactions.len(),
            gross_paid,
            raw_relationships,
        }
    }

    /// Phase 2: net mutual balances. Each unordered pair with entries in
    /// both directions is visited exactly once via its canonical sorted
    /// key; the pair's two entries become a single directed entry of the
    /// difference, owed by whichever side owed more. Sub-cent results are
    /// purged along with anything else below tolerance.
    fn net_mutual(ledger: &mut PairwiseLedger) {
        let canonical: Vec<(ParticipantId, ParticipantId)> = ledger
            .entries()
            .map(|((debtor, creditor), _)| {
                if debtor < creditor {
                    (debtor.clone(), creditor.clone())
                } else {
                    (creditor.clone(), debtor.clone())
                }
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        for (a, b) in canonical {
            if !ledger.contains(&a, &b) || !ledger.contains(&b, &a) {
                continue;
            }
            let forward = ledger.remove(&a, &b);
            let backward = ledger.remove(&b, &a);
            if forward >= backward {
                ledger.add(a, b, forward - backward);
            } else {
                ledger.add(b, a, backward - forward);
            }
        }
        ledger.purge_settled();
        debug!("netted down to {} relationships", ledger.len());
    }

    /// Phase 3: collapse transitive chains to fixpoint. Every collapse
    /// lowers the ledger's total balance by the transferred amount, so the
    /// loop terminates on its own; the iteration cap is a guard against
    /// malformed input only.
    fn collapse_chains(ledger: &mut PairwiseLedger) {
        let cap = (ledger.len() * ledger.len()).max(64);
        let mut collapses = 0usize;
        let mut changed = true;
        while changed {
            changed = false;
            if collapses >= cap {
                warn!("chain collapsing stopped at iteration cap {cap} before reaching a fixpoint");
                break;
            }
            if let Some((a, b, c)) = Self::find_chain(ledger) {
                let transfer = ledger.amount(&a, &b).min(ledger.amount(&b, &c));
                ledger.add(a.clone(), c.clone(), transfer);
                ledger.subtract(&a, &b, transfer);
                ledger.subtract(&b, &c, transfer);
                collapses += 1;
                changed = true;
            }
        }
        debug!("fixpoint after {collapses} chain collapses, {} relationships remain", ledger.len());
    }

    /// Find a chain A → B → C with C ≠ A. The C ≠ A condition keeps a
    /// mutual pair from being folded back into a self-debt. Scan order is
    /// the ledger's sorted key order.
    fn find_chain(
        ledger: &PairwiseLedger,
    ) -> Option<(ParticipantId, ParticipantId, ParticipantId)> {
        for ((a, b), _) in ledger.entries() {
            for ((debtor, c), _) in ledger.entries() {
                if debtor == b && c != a {
                    return Some((a.clone(), b.clone(), c.clone()));
                }
            }
        }
        None
    }
}
