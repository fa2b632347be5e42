//! Foundational types: participants, transactions, debts, the pairwise ledger.

pub mod debt;
pub mod ledger;
pub mod participant;
pub mod transaction;
