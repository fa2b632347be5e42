//! Random transaction generation.
//!
//! Produces synthetic shared-expense histories to exercise the engine
//! under load and feed the CLI `generate` command.

use crate::core::participant::ParticipantId;
use crate::core::transaction::Transaction;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Configuration for generating a random shared-expense history.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of participants in the group.
    pub participant_count: usize,
    /// Number of transactions to generate.
    pub transaction_count: usize,
    /// Minimum transaction amount.
    pub min_amount: Decimal,
    /// Maximum transaction amount.
    pub max_amount: Decimal,
    /// Largest participant set a single transaction may split across.
    pub max_split_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            participant_count: 4,
            transaction_count: 20,
            min_amount: Decimal::from(1),
            max_amount: Decimal::from(500),
            max_split_size: 4,
        }
    }
}

/// Generate a random transaction history.
///
/// Amounts land on whole cents; each transaction's payer is drawn from the
/// group and its split members are sampled without replacement (the payer
/// may or may not be among them, as in real histories).
pub fn generate_random_history(config: &GeneratorConfig) -> Vec<Transaction> {
    let mut rng = rand::thread_rng();

    let participants: Vec<ParticipantId> = (0..config.participant_count)
        .map(|i| ParticipantId::new(format!("member-{:03}", i)))
        .collect();

    let min_cents = (config.min_amount * Decimal::from(100))
        .trunc()
        .to_i64()
        .unwrap_or(100)
        .max(0);
    let max_cents = (config.max_amount * Decimal::from(100))
        .trunc()
        .to_i64()
        .unwrap_or(50_000)
        .max(min_cents + 1);

    let mut transactions = Vec::with_capacity(config.transaction_count);
    for _ in 0..config.transaction_count {
        let payer = participants[rng.gen_range(0..participants.len())].clone();

        let split_upper = config.max_split_size.min(participants.len()).max(1);
        let split_size = rng.gen_range(1..=split_upper);
        let mut pool = participants.clone();
        let mut members = Vec::with_capacity(split_size);
        for _ in 0..split_size {
            let idx = rng.gen_range(0..pool.len());
            members.push(pool.swap_remove(idx));
        }

        let cents = rng.gen_range(min_cents..=max_cents);
        let amount = Decimal::new(cents, 2);

        transactions.push(Transaction::new(payer, amount, members));
    }

    transactions
}
