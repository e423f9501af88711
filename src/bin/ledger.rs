use std::{path::PathBuf, process::exit};

use clap::{Parser, Subcommand};
use serde::Serialize;
use time::UtcOffset;
use tracing::Level;

use pocket_ledger::{
    Error, SQLiteTransactionStore, TransactionForm, TransactionId, TransactionStore,
    TransactionType, format_signed_amount, group_by_day, render_history, render_summary,
    render_transaction_line, resolve_local_offset, setup_logging,
};

/// The level failed commands are logged at, on top of the printed error.
const FAILURE_LOG_LEVEL: Level = Level::DEBUG;

/// Record income and expenses and keep track of your balance.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "POCKET_LEDGER_DB", default_value = "finance.db")]
    db_path: PathBuf,

    /// Canonical timezone name used to show dates, e.g. "Pacific/Auckland".
    #[arg(long, env = "POCKET_LEDGER_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// Print debug logs to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Also append debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the balance, the income and expense totals, and the latest transactions.
    Summary {
        /// How many of the latest transactions to show.
        #[arg(long, default_value_t = 5)]
        recent: usize,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Record a new transaction dated now.
    Add {
        /// The amount in dollars, e.g. 12.50.
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Either "income" or "expense".
        #[arg(long = "type", default_value = "expense")]
        transaction_type: TransactionType,

        /// What the transaction was for.
        #[arg(short, long)]
        description: String,

        /// A label for grouping transactions, "General" if left out.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show every transaction grouped by day, newest first.
    History {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Delete a transaction by its ID.
    Delete {
        /// The ID shown next to the transaction, without the '#'.
        id: TransactionId,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.verbose, args.log_file.as_deref()) {
        print_error(error);
        exit(1);
    }

    if let Err(error) = run(args) {
        if !error.is_validation_error() {
            tracing::event!(FAILURE_LOG_LEVEL, "Command failed: {error:?}");
        }

        print_error(error);
        exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let local_offset = resolve_local_offset(&args.timezone)?;

    tracing::debug!("Opening database at {:?}", args.db_path);
    let store = SQLiteTransactionStore::open(&args.db_path)?;
    store.initialize()?;

    let result = run_command(&store, args.command, local_offset);
    let closed = store.close();

    result.and(closed)
}

fn run_command(
    store: &SQLiteTransactionStore,
    command: Command,
    local_offset: UtcOffset,
) -> Result<(), Error> {
    match command {
        Command::Summary { recent, json } => show_summary(store, recent, json, local_offset),
        Command::Add {
            amount,
            transaction_type,
            description,
            category,
        } => {
            let form = TransactionForm {
                amount,
                transaction_type,
                description,
                category,
            };
            let transaction = store.add(form.validate()?)?;

            println!(
                "Added transaction #{}: {} {}",
                transaction.id,
                format_signed_amount(&transaction),
                transaction.description
            );

            Ok(())
        }
        Command::History { json } => {
            let groups = group_by_day(store.list()?, local_offset);

            if json {
                print_json(&groups)
            } else if groups.is_empty() {
                println!("No transactions yet.");
                Ok(())
            } else {
                println!("{}", render_history(&groups, local_offset));
                Ok(())
            }
        }
        Command::Delete { id } => {
            if store.delete(id)? == 0 {
                println!("There is no transaction #{id}, nothing was deleted.");
            } else {
                println!("Deleted transaction #{id}.");
            }

            Ok(())
        }
    }
}

fn show_summary(
    store: &SQLiteTransactionStore,
    recent: usize,
    json: bool,
    local_offset: UtcOffset,
) -> Result<(), Error> {
    let summary = store.summarize()?;
    let mut transactions = store.list()?;
    transactions.truncate(recent);

    if json {
        return print_json(&serde_json::json!({
            "summary": summary,
            "recent": transactions,
        }));
    }

    println!("{}", render_summary(&summary));
    println!();

    if transactions.is_empty() {
        println!("No transactions yet. Record one with `ledger add`.");
        return Ok(());
    }

    println!("Recent transactions");
    for transaction in &transactions {
        println!("  {}", render_transaction_line(transaction, local_offset));
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
    println!("{json}");

    Ok(())
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}

#[cfg(test)]
mod tests {
    use pocket_ledger::DEFAULT_LOG_LEVEL;
    use tracing_subscriber::EnvFilter;

    use crate::{FAILURE_LOG_LEVEL, capitalise_first_char};

    #[test]
    fn failures_are_only_logged_in_debug_output() {
        let quiet = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_LOG_LEVEL))
            .finish();
        tracing::subscriber::with_default(quiet, || {
            assert!(!tracing::enabled!(FAILURE_LOG_LEVEL));
        });

        let verbose = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .finish();
        tracing::subscriber::with_default(verbose, || {
            assert!(tracing::enabled!(FAILURE_LOG_LEVEL));
        });
    }

    #[test]
    fn error_messages_start_with_a_capital() {
        assert_eq!(
            capitalise_first_char("description cannot be empty"),
            "Description cannot be empty"
        );
        assert_eq!(capitalise_first_char(""), "");
    }
}
