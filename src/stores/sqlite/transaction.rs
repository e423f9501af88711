//! Implements a SQLite backed transaction store.
use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::Connection;

use crate::{
    Error,
    database_id::TransactionId,
    db::initialize,
    stores::TransactionStore,
    summary::{Summary, get_summary},
    transaction::{
        RowsAffected, Transaction, TransactionBuilder, count_transactions, create_transaction,
        delete_transaction, get_transactions,
    },
};

/// Stores transactions in a SQLite database.
///
/// Clones share the same connection. The connection is closed when
/// [SQLiteTransactionStore::close] is called on the last clone, or when the
/// last clone is dropped.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Open (or create) the database file at `path`.
    ///
    /// Call [TransactionStore::initialize] before using the store.
    ///
    /// # Errors
    /// Returns an [Error::InitializationFailure] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let connection = Connection::open(path).map_err(Error::InitializationFailure)?;

        Ok(Self::new(Arc::new(Mutex::new(connection))))
    }

    /// Open a private, empty in-memory database.
    ///
    /// # Errors
    /// Returns an [Error::InitializationFailure] if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory().map_err(Error::InitializationFailure)?;

        Ok(Self::new(Arc::new(Mutex::new(connection))))
    }

    /// Close the database connection.
    ///
    /// If other clones of this store are still alive the connection stays open
    /// until the last one is closed or dropped.
    ///
    /// # Errors
    /// Returns an:
    /// - [Error::DatabaseLockError] if the connection lock was poisoned,
    /// - or [Error::CloseFailure] if SQLite could not close the connection.
    pub fn close(self) -> Result<(), Error> {
        let Ok(mutex) = Arc::try_unwrap(self.connection) else {
            tracing::debug!("Database connection is still shared, leaving it open.");
            return Ok(());
        };

        mutex
            .into_inner()
            .map_err(|_| Error::DatabaseLockError)?
            .close()
            .map_err(|(_, error)| Error::CloseFailure(error))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create the transactions table if it does not exist.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock was poisoned,
    /// - or [Error::InitializationFailure] if the table could not be created.
    fn initialize(&self) -> Result<(), Error> {
        initialize(&*self.lock()?)?;
        tracing::debug!("Initialized the transactions table.");

        Ok(())
    }

    /// Insert a new transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock was poisoned,
    /// - or [Error::WriteFailure] if the row could not be inserted.
    fn add(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = create_transaction(builder, &*self.lock()?)?;
        tracing::debug!("Created transaction {}.", transaction.id);

        Ok(transaction)
    }

    /// Retrieve every transaction ordered by date, newest first.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock was poisoned,
    /// - or [Error::ReadFailure] if the query fails.
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        get_transactions(&*self.lock()?)
    }

    /// Delete a transaction by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock was poisoned,
    /// - or [Error::WriteFailure] if the statement fails.
    fn delete(&self, id: TransactionId) -> Result<RowsAffected, Error> {
        let rows_affected = delete_transaction(id, &*self.lock()?)?;

        if rows_affected == 0 {
            tracing::debug!("Tried to delete transaction {id}, but it does not exist.");
        } else {
            tracing::debug!("Deleted transaction {id}.");
        }

        Ok(rows_affected)
    }

    /// Sum income and expenses.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock was poisoned,
    /// - or [Error::ReadFailure] if the query fails.
    fn summarize(&self) -> Result<Summary, Error> {
        get_summary(&*self.lock()?)
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock was poisoned,
    /// - or [Error::ReadFailure] if the query fails.
    fn count(&self) -> Result<u32, Error> {
        count_transactions(&*self.lock()?)
    }
}
