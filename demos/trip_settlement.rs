//! Trip settlement example: sequential payers create a debt chain that
//! collapses into direct transfers, plus a running balance history.
//!
//! Run with: `cargo run --example trip_settlement`

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use splitledger::prelude::*;

fn main() {
    env_logger::init();

    let ana = ParticipantId::new("ana");
    let ben = ParticipantId::new("ben");
    let carla = ParticipantId::new("carla");
    let dan = ParticipantId::new("dan");
    let everyone = vec![ana.clone(), ben.clone(), carla.clone(), dan.clone()];

    let day = |n: i64| Utc::now() - Duration::days(7 - n);
    let history = vec![
        Transaction::new(ana.clone(), dec!(240), everyone.clone())
            .with_recorded_at(day(1))
            .with_note("cabin"),
        Transaction::new(ben.clone(), dec!(96), everyone.clone())
            .with_recorded_at(day(2))
            .with_note("groceries"),
        Transaction::new(carla.clone(), dec!(60), vec![ben.clone(), carla.clone()])
            .with_recorded_at(day(3))
            .with_note("fuel"),
        Transaction::new(dan.clone(), dec!(45), vec![ana.clone(), dan.clone()])
            .with_recorded_at(day(4))
            .with_note("dinner"),
    ];

    let result = SimplifyEngine::simplify(&history);
    println!("{}", result);

    println!("Balance history:");
    for snapshot in balance_history(&history) {
        let positions: Vec<String> = snapshot
            .balances
            .iter()
            .map(|(who, net)| format!("{}: {}", who, net.round_dp(2)))
            .collect();
        println!("  {} | {}", snapshot.as_of.format("%Y-%m-%d"), positions.join(", "));
    }

    assert!(is_conserved(&history, result.debts()));
}
