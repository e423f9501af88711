//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef},
};
use serde::{Deserialize, Deserializer, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Error,
    database_id::TransactionId,
    money::Money,
    timestamp::{format_timestamp, normalize},
};

/// The category given to transactions created without one.
pub const DEFAULT_CATEGORY: &str = "General";

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The text stored in the database for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    /// Parse "income" or "expense", ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(Error::InvalidTransactionType(s.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        TransactionType::from_str(&text).map_err(serde::de::Error::custom)
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(Box::new(
                Error::InvalidTransactionType(other.to_owned()),
            ))),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions only come out of the database. To record a new one, describe
/// it with [Transaction::build] and pass the builder to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// How much money was spent or earned. Always a positive magnitude,
    /// see [Transaction::signed_amount] for the direction.
    pub amount: Money,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction was recorded, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: String,
    /// A free-text label for grouping transactions, e.g. "Groceries".
    pub category: String,
}

impl Transaction {
    /// Describe a new transaction dated now in the [DEFAULT_CATEGORY].
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: Money,
        transaction_type: TransactionType,
        description: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            transaction_type,
            date: normalize(OffsetDateTime::now_utc()),
            description: description.to_owned(),
            category: DEFAULT_CATEGORY.to_owned(),
        }
    }

    /// The amount with its direction applied: positive for income, negative
    /// for expenses.
    pub fn signed_amount(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The fields of a [Transaction] that has not been stored yet.
///
/// # Examples
///
/// ```
/// use pocket_ledger::{Money, Transaction, TransactionType};
///
/// let builder = Transaction::build(Money::from_cents(4599), TransactionType::Expense, "Lunch")
///     .category("Dining");
///
/// assert_eq!(builder.category, "Dining");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The positive magnitude of the transaction.
    pub amount: Money,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
    /// When the transaction happened, in UTC with millisecond precision.
    ///
    /// Defaults to the time the builder was created.
    pub date: OffsetDateTime,
    /// A human-readable description of the transaction.
    pub description: String,
    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    ///
    /// Defaults to [DEFAULT_CATEGORY].
    pub category: String,
}

impl TransactionBuilder {
    /// Set the date of the transaction.
    ///
    /// The date is converted to UTC and truncated to whole milliseconds, the
    /// precision kept by the database.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = normalize(date);
        self
    }

    /// Set the category of the transaction.
    ///
    /// Surrounding whitespace is removed and a blank category falls back to
    /// [DEFAULT_CATEGORY].
    pub fn category(mut self, category: &str) -> Self {
        let category = category.trim();

        self.category = if category.is_empty() {
            DEFAULT_CATEGORY.to_owned()
        } else {
            category.to_owned()
        };

        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The number of rows changed by a statement.
pub type RowsAffected = usize;

/// Create the transaction table in the database.
///
/// Does nothing if the table already exists.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL
                )",
        (),
    )?;

    // Index used for listing transactions newest first.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date, id);",
        (),
    )?;

    Ok(())
}

/// Create a new transaction in the database from a builder.
///
/// The builder is stored as is, callers are responsible for validating user
/// input (see [TransactionForm](crate::TransactionForm)).
///
/// # Errors
/// This function will return an [Error::WriteFailure] if the row could not be inserted.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date = format_timestamp(builder.date).map_err(|error| {
        Error::WriteFailure(rusqlite::Error::ToSqlConversionFailure(Box::new(error)))
    })?;

    connection
        .prepare(
            "INSERT INTO transactions (amount, type, date, description, category)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, type, date, description, category",
        )
        .and_then(|mut statement| {
            statement.query_row(
                (
                    builder.amount,
                    builder.transaction_type,
                    date,
                    builder.description,
                    builder.category,
                ),
                map_transaction_row,
            )
        })
        .map_err(Error::WriteFailure)
}

/// Retrieve every transaction, newest first.
///
/// Transactions with the same date are ordered by descending ID, i.e. the
/// most recently inserted comes first.
///
/// # Errors
/// This function will return an [Error::ReadFailure] if the query fails or a
/// row cannot be decoded.
pub fn get_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, type, date, description, category FROM transactions
             ORDER BY date DESC, id DESC",
        )
        .and_then(|mut statement| {
            let rows = statement.query_map([], map_transaction_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .map_err(Error::ReadFailure)
}

/// Delete the transaction with `id`.
///
/// Deleting an ID that does not exist is not an error, the returned row count
/// is zero in that case.
///
/// # Errors
/// This function will return an [Error::WriteFailure] if the statement fails.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])
        .map_err(Error::WriteFailure)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return an [Error::ReadFailure] if there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions", [], |row| row.get(0))
        .map_err(Error::ReadFailure)
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, amount, type, date, description, category`.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let transaction_type = row.get(2)?;
    let date_text: String = row.get(3)?;
    let description = row.get(4)?;
    let category = row.get(5)?;

    let date = OffsetDateTime::parse(&date_text, &Rfc3339)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error)))?;

    Ok(Transaction {
        id,
        amount,
        transaction_type,
        date,
        description,
        category,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        money::Money,
        transaction::{
            Transaction, TransactionType, count_transactions, create_transaction,
            delete_transaction, get_transactions,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let builder = Transaction::build(Money::from_cents(1230), TransactionType::Income, "Pay")
            .date(datetime!(2025-10-05 10:00 UTC))
            .category("Salary");

        let result = create_transaction(builder.clone(), &conn);

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.amount, builder.amount);
                assert_eq!(transaction.transaction_type, builder.transaction_type);
                assert_eq!(transaction.date, builder.date);
                assert_eq!(transaction.description, builder.description);
                assert_eq!(transaction.category, builder.category);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn stores_date_as_iso_8601_text() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build(Money::from_cents(1), TransactionType::Expense, "Gum")
                .date(datetime!(2025-10-05 10:00:00.25 UTC)),
            &conn,
        )
        .expect("Could not create transaction");

        let stored: String = conn
            .query_row("SELECT date FROM transactions", [], |row| row.get(0))
            .unwrap();

        assert_eq!(stored, "2025-10-05T10:00:00.250Z");
    }

    #[test]
    fn ids_increase() {
        let conn = get_test_connection();
        let builder = Transaction::build(Money::from_cents(1), TransactionType::Expense, "Gum");

        let first = create_transaction(builder.clone(), &conn).unwrap();
        let second = create_transaction(builder, &conn).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn list_orders_by_date_then_id_descending() {
        let conn = get_test_connection();
        let at = |date| {
            Transaction::build(Money::from_cents(100), TransactionType::Expense, "").date(date)
        };
        let middle = create_transaction(at(datetime!(2025-02-01 0:00 UTC)), &conn).unwrap();
        let oldest = create_transaction(at(datetime!(2025-01-01 0:00 UTC)), &conn).unwrap();
        let newest = create_transaction(at(datetime!(2025-03-01 0:00 UTC)), &conn).unwrap();
        let newest_tie = create_transaction(at(datetime!(2025-03-01 0:00 UTC)), &conn).unwrap();

        let ids: Vec<_> = get_transactions(&conn)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(ids, vec![newest_tie.id, newest.id, middle.id, oldest.id]);
    }

    #[test]
    fn delete_removes_one_row() {
        let conn = get_test_connection();
        let builder = Transaction::build(Money::from_cents(1), TransactionType::Expense, "Gum");
        let keep = create_transaction(builder.clone(), &conn).unwrap();
        let remove = create_transaction(builder, &conn).unwrap();

        let rows_affected = delete_transaction(remove.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_transactions(&conn).unwrap(), vec![keep]);
    }

    #[test]
    fn delete_missing_id_is_a_no_op() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build(Money::from_cents(1), TransactionType::Expense, "Gum"),
            &conn,
        )
        .unwrap();

        let rows_affected = delete_transaction(1337, &conn);

        assert_eq!(rows_affected, Ok(0));
        assert_eq!(count_transactions(&conn), Ok(1));
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build(Money::from_cents(i), TransactionType::Income, ""),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count as u32, got_count);
    }

    #[test]
    fn list_fails_on_unknown_type() {
        let conn = get_test_connection();
        conn.execute("DROP TABLE transactions", ()).unwrap();
        conn.execute(
            "CREATE TABLE transactions (id INTEGER PRIMARY KEY, amount INTEGER, type TEXT, date TEXT, description TEXT, category TEXT)",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO transactions (amount, type, date, description, category)
             VALUES (100, 'refund', '2025-01-01T00:00:00.000Z', '', '')",
            (),
        )
        .unwrap();

        let result = get_transactions(&conn);

        assert!(matches!(result, Err(Error::ReadFailure(_))));
    }

    #[test]
    fn list_fails_on_malformed_date() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO transactions (amount, type, date, description, category)
             VALUES (100, 'income', 'last tuesday', '', '')",
            (),
        )
        .unwrap();

        let result = get_transactions(&conn);

        assert!(matches!(result, Err(Error::ReadFailure(_))));
    }
}
