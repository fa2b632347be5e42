//! # splitledger
//!
//! Shared-expense tracking and debt simplification engine.
//!
//! Given a list of transactions — each with a payer, an amount, and a set of
//! participants splitting the cost equally — the engine computes a
//! consolidated set of pairwise debts: mutual obligations are netted against
//! each other and transitive debt chains are collapsed into direct transfers.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: participants, transactions, debts, the pairwise ledger
//! - **engine** — The four-phase simplification algorithm and balance cross-checks
//! - **store** — Observable in-memory transaction store for application shells
//! - **simulation** — Random history generation for stress testing

pub mod core;
pub mod engine;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::debt::Debt;
    pub use crate::core::ledger::PairwiseLedger;
    pub use crate::core::participant::ParticipantId;
    pub use crate::core::transaction::{Transaction, TransactionError};
    pub use crate::engine::balance::{balance_history, is_conserved, net_balances};
    pub use crate::engine::simplify::{SimplifyEngine, SimplifyResult};
    pub use crate::store::TransactionStore;
}
