//! Basic flat-share example: three people, a handful of expenses,
//! one consolidated settlement.
//!
//! Run with: `cargo run --example basic_split`

use rust_decimal_macros::dec;
use splitledger::prelude::*;

fn main() {
    env_logger::init();

    let ana = ParticipantId::new("ana");
    let ben = ParticipantId::new("ben");
    let carla = ParticipantId::new("carla");
    let everyone = vec![ana.clone(), ben.clone(), carla.clone()];

    let history = vec![
        Transaction::new(ana.clone(), dec!(120), everyone.clone()).with_note("groceries"),
        Transaction::new(ben.clone(), dec!(45), vec![ben.clone(), carla.clone()])
            .with_note("takeaway"),
        Transaction::new(carla.clone(), dec!(90), everyone).with_note("utilities"),
    ];

    println!("History:");
    for txn in &history {
        println!(
            "  {} paid {} for {} people ({})",
            txn.payer(),
            txn.amount(),
            txn.participants().len(),
            txn.note().unwrap_or("-")
        );
    }
    println!();

    let result = SimplifyEngine::simplify(&history);
    println!("{}", result);

    assert!(is_conserved(&history, result.debts()));
}
