//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    summary::Summary,
    transaction::{RowsAffected, Transaction, TransactionBuilder},
};

/// Handles the creation, retrieval, deletion and aggregation of transactions.
///
/// [TransactionStore::initialize] must be called before any other method.
pub trait TransactionStore {
    /// Prepare the underlying storage, e.g. create tables.
    ///
    /// Implementers must make this idempotent: calling it again must not
    /// remove stored transactions.
    fn initialize(&self) -> Result<(), Error>;

    /// Create a new transaction in the store and return it with its new ID.
    fn add(&self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve all transactions, newest first.
    fn list(&self) -> Result<Vec<Transaction>, Error>;

    /// Delete the transaction with `id`, if it exists.
    ///
    /// Deleting a missing transaction is not an error and affects zero rows.
    fn delete(&self, id: TransactionId) -> Result<RowsAffected, Error>;

    /// Total income, total expenses and the balance over all transactions.
    fn summarize(&self) -> Result<Summary, Error>;

    /// Get the total number of transactions in the store.
    fn count(&self) -> Result<u32, Error>;
}
