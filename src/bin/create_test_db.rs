use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use pocket_ledger::{Money, SQLiteTransactionStore, Transaction, TransactionStore, TransactionType};

/// A utility for creating a test database for the ledger command line tool.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// (days ago, cents, type, description, category)
const SAMPLE_TRANSACTIONS: [(i64, i64, TransactionType, &str, &str); 8] = [
    (13, 250_000, TransactionType::Income, "Salary", "Work"),
    (12, 120_000, TransactionType::Expense, "Rent", "Housing"),
    (9, 8_745, TransactionType::Expense, "Weekly shop", "Groceries"),
    (6, 450, TransactionType::Expense, "Flat white", "Dining"),
    (6, 3_200, TransactionType::Expense, "Bus card top up", "Transport"),
    (2, 9_120, TransactionType::Expense, "Weekly shop", "Groceries"),
    (1, 5_000, TransactionType::Income, "Birthday money", "Gifts"),
    (0, 1_999, TransactionType::Expense, "Streaming subscription", ""),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let store = SQLiteTransactionStore::open(output_path)?;
    store.initialize()?;

    println!("Creating test transactions...");
    let now = OffsetDateTime::now_utc();

    for (days_ago, cents, transaction_type, description, category) in SAMPLE_TRANSACTIONS {
        let builder = Transaction::build(Money::from_cents(cents), transaction_type, description)
            .date(now - Duration::days(days_ago))
            .category(category);

        store.add(builder)?;
    }

    store.close()?;

    println!("Success!");

    Ok(())
}
