//! A store wrapper that logs errors instead of returning them.

use crate::{
    database_id::TransactionId,
    stores::TransactionStore,
    summary::Summary,
    transaction::{Transaction, TransactionBuilder},
};

/// Wraps a [TransactionStore] so that failures degrade to empty results.
///
/// Every error is logged at the `error` level and then masked: writes are
/// silently dropped, [FailSoftStore::list] returns no transactions and
/// [FailSoftStore::summarize] returns the all-zero summary. Callers cannot
/// tell an empty store from a broken one, so prefer the wrapped store's
/// [Result]s wherever the caller can report an error.
#[derive(Debug, Clone)]
pub struct FailSoftStore<S> {
    store: S,
}

impl<S: TransactionStore> FailSoftStore<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store, for callers that need to see errors.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Prepare the store, logging any failure.
    pub fn initialize(&self) {
        if let Err(error) = self.store.initialize() {
            tracing::error!("Error initializing database: {error}");
        }
    }

    /// Add a transaction, logging any failure.
    pub fn add(&self, builder: TransactionBuilder) {
        if let Err(error) = self.store.add(builder) {
            tracing::error!("Error adding transaction: {error}");
        }
    }

    /// All transactions newest first, or none if they could not be read.
    pub fn list(&self) -> Vec<Transaction> {
        self.store.list().unwrap_or_else(|error| {
            tracing::error!("Error fetching transactions: {error}");
            Vec::new()
        })
    }

    /// Delete a transaction, logging any failure.
    pub fn delete(&self, id: TransactionId) {
        if let Err(error) = self.store.delete(id) {
            tracing::error!("Error deleting transaction {id}: {error}");
        }
    }

    /// The income, expense and balance totals, or zero if they could not be read.
    pub fn summarize(&self) -> Summary {
        self.store.summarize().unwrap_or_else(|error| {
            tracing::error!("Error calculating summary: {error}");
            Summary::default()
        })
    }
}
