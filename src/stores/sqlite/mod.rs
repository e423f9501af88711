//! Contains the SQLite backed implementations of the store traits.

pub mod transaction;

pub use transaction::SQLiteTransactionStore;
