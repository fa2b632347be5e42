//! splitledger CLI
//!
//! Simplify shared-expense histories from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Consolidate debts from a JSON transaction file
//! splitledger simplify --input transactions.json
//!
//! # Output as JSON
//! splitledger simplify --input transactions.json --format json
//!
//! # Per-participant net balances
//! splitledger balances --input transactions.json
//!
//! # Generate a random history for testing
//! splitledger generate --participants 4 --transactions 20
//! ```

use rust_decimal::Decimal;
use splitledger::core::participant::ParticipantId;
use splitledger::core::transaction::Transaction;
use splitledger::engine::balance::net_balances;
use splitledger::engine::simplify::SimplifyEngine;
use splitledger::simulation::generator::{generate_random_history, GeneratorConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"splitledger — shared-expense tracking and debt simplification

USAGE:
    splitledger <COMMAND> [OPTIONS]

COMMANDS:
    simplify    Consolidate a transaction history into direct transfers
    balances    Show each participant's net position
    generate    Generate a random transaction history (for testing)
    help        Show this message

OPTIONS (simplify, balances):
    --input <FILE>      Path to JSON transactions file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --participants <N>  Number of participants (default: 4)
    --transactions <N>  Number of transactions (default: 20)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    splitledger simplify --input transactions.json
    splitledger simplify --input transactions.json --format json
    splitledger balances --input transactions.json
    splitledger generate --participants 6 --transactions 40 --output test.json"#
    );
}

/// JSON schema for input transactions. A null or missing amount is treated
/// as zero; null or missing participants as no split.
#[derive(serde::Deserialize)]
struct TransactionInput {
    payer: String,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    participants: Option<Vec<String>>,
}

#[derive(serde::Deserialize)]
struct TransactionsFile {
    transactions: Vec<TransactionInput>,
}

/// JSON output schema for simplification results.
#[derive(serde::Serialize)]
struct SimplifyOutput {
    transaction_count: usize,
    gross_paid: String,
    pairwise_debts: usize,
    simplified_debts: usize,
    debts: Vec<DebtOutput>,
}

#[derive(serde::Serialize)]
struct DebtOutput {
    from: String,
    to: String,
    amount: String,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    participant: String,
    net: String,
    status: String,
}

fn load_transactions(path: &str) -> Vec<Transaction> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: TransactionsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "transactions": [
    {{ "payer": "ana", "amount": "90.00", "participants": ["ana", "ben"] }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut transactions = Vec::with_capacity(file.transactions.len());
    for input in file.transactions {
        let amount: Decimal = match input.amount {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                eprintln!("Invalid amount '{}': {}", raw, e);
                process::exit(1);
            }),
            None => Decimal::ZERO,
        };
        let participants = input
            .participants
            .unwrap_or_default()
            .into_iter()
            .map(ParticipantId::new)
            .collect();

        let txn = Transaction::checked(ParticipantId::new(&input.payer), amount, participants)
            .unwrap_or_else(|e| {
                eprintln!("Invalid transaction: {}", e);
                process::exit(1);
            });
        transactions.push(txn);
    }
    transactions
}

fn parse_io_options(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn cmd_simplify(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let transactions = load_transactions(&path);
    let result = SimplifyEngine::simplify(&transactions);

    if format == "json" {
        let output = SimplifyOutput {
            transaction_count: result.transaction_count(),
            gross_paid: result.gross_paid().to_string(),
            pairwise_debts: result.raw_relationships(),
            simplified_debts: result.simplified_relationships(),
            debts: result
                .debts()
                .iter()
                .map(|debt| DebtOutput {
                    from: debt.from.to_string(),
                    to: debt.to.to_string(),
                    amount: debt.amount.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", result);
    }
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let transactions = load_transactions(&path);
    let balances = net_balances(&transactions);

    if format == "json" {
        let output: Vec<BalanceOutput> = balances
            .iter()
            .map(|(participant, net)| BalanceOutput {
                participant: participant.to_string(),
                net: net.round_dp(2).to_string(),
                status: if *net > Decimal::ZERO {
                    "CREDITOR".to_string()
                } else if *net < Decimal::ZERO {
                    "DEBTOR".to_string()
                } else {
                    "SETTLED".to_string()
                },
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("=== Net Balances ===");
        if balances.is_empty() {
            println!("  (no transactions)");
        }
        for (participant, net) in &balances {
            println!("  {:<20} {}", participant.to_string(), net.round_dp(2));
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut participants = 4usize;
    let mut transactions_count = 20usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                participants = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--participants requires a number");
                    process::exit(1);
                });
            }
            "--transactions" => {
                i += 1;
                transactions_count =
                    args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                        eprintln!("--transactions requires a number");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = GeneratorConfig {
        participant_count: participants,
        transaction_count: transactions_count,
        ..Default::default()
    };

    let history = generate_random_history(&config);

    #[derive(serde::Serialize)]
    struct OutputTransaction {
        payer: String,
        amount: String,
        participants: Vec<String>,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        transactions: Vec<OutputTransaction>,
    }

    let output = OutputFile {
        transactions: history
            .iter()
            .map(|txn| OutputTransaction {
                payer: txn.payer().to_string(),
                amount: txn.amount().to_string(),
                participants: txn.participants().iter().map(|p| p.to_string()).collect(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} transactions across {} participants → {}",
            history.len(),
            participants,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simplify" => cmd_simplify(rest),
        "balances" => cmd_balances(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
