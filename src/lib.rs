//! Pocket Ledger is a personal finance tracker.
//!
//! Record income and expenses, then see your balance and a day by day
//! history. This library provides the SQLite backed transaction store, input
//! validation and text formatting used by the `ledger` command line tool.
//!
//! ```
//! use pocket_ledger::{SQLiteTransactionStore, TransactionForm, TransactionStore, TransactionType};
//!
//! let store = SQLiteTransactionStore::open_in_memory().unwrap();
//! store.initialize().unwrap();
//!
//! let form = TransactionForm {
//!     amount: "12.50".to_owned(),
//!     transaction_type: TransactionType::Expense,
//!     description: "Lunch".to_owned(),
//!     category: None,
//! };
//! store.add(form.validate().unwrap()).unwrap();
//!
//! assert_eq!(store.summarize().unwrap().balance.to_string(), "-12.50");
//! ```

#![warn(missing_docs)]

mod database_id;
mod db;
mod error;
mod logging;
mod money;
mod stores;
mod summary;
mod timestamp;
mod timezone;
mod transaction;

pub use database_id::{DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{DEFAULT_LOG_LEVEL, setup_logging};
pub use money::Money;
pub use stores::{FailSoftStore, SQLiteTransactionStore, TransactionStore};
pub use summary::{Summary, get_summary};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use timezone::{get_local_offset, resolve_local_offset};
pub use transaction::{
    DEFAULT_CATEGORY, DayGroup, MAX_AMOUNT, RowsAffected, Transaction, TransactionBuilder,
    TransactionForm, TransactionType, UNCATEGORIZED_LABEL, category_label, format_currency,
    format_day_heading, format_short_date, format_signed_amount, group_by_day, render_history,
    render_summary, render_transaction_line,
};
