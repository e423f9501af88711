//! Sets up the application's database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Create the application's tables if they do not already exist.
///
/// Safe to call on a database that is already initialized, existing rows are
/// left untouched.
///
/// # Errors
/// Returns an [Error::InitializationFailure] if the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)
        .map_err(Error::InitializationFailure)?;

    create_transaction_table(&transaction).map_err(Error::InitializationFailure)?;

    transaction.commit().map_err(Error::InitializationFailure)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        money::Money,
        transaction::{Transaction, TransactionType, count_transactions, create_transaction},
    };

    #[test]
    fn initialize_twice_keeps_rows() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        create_transaction(
            Transaction::build(Money::from_cents(100), TransactionType::Income, "Gift"),
            &conn,
        )
        .unwrap();

        initialize(&conn).unwrap();

        assert_eq!(count_transactions(&conn), Ok(1));
        let table_count: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'transactions'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 1);
    }

    #[test]
    fn initialize_fails_on_read_only_database() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA query_only = ON").unwrap();

        let result = initialize(&conn);

        assert!(matches!(result, Err(Error::InitializationFailure(_))));
    }
}
