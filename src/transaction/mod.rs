//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and deleting transactions
//! - Validation of user input with `TransactionForm`
//! - Grouping and text formatting for showing transaction history

mod core;
mod form;
mod grouping;
mod view;

pub use self::core::{
    DEFAULT_CATEGORY, RowsAffected, Transaction, TransactionBuilder, TransactionType,
    count_transactions, create_transaction, create_transaction_table, delete_transaction,
    get_transactions,
};
pub use form::{MAX_AMOUNT, TransactionForm};
pub use grouping::{DayGroup, group_by_day};
pub use view::{
    UNCATEGORIZED_LABEL, category_label, format_currency, format_day_heading, format_short_date,
    format_signed_amount, render_history, render_summary, render_transaction_line,
};
