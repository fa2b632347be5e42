//! The simplification algorithm and balance cross-checks.

pub mod balance;
pub mod simplify;
