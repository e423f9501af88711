//! Contains traits and implementations for objects that store [transactions](crate::Transaction).

mod fail_soft;
mod transaction;

pub mod sqlite;

pub use fail_soft::FailSoftStore;
pub use sqlite::SQLiteTransactionStore;
pub use transaction::TransactionStore;
