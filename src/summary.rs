//! Aggregates income and expenses over all stored transactions.

use rusqlite::Connection;
use serde::Serialize;

use crate::{Error, money::Money, transaction::TransactionType};

/// Total income, total expenses and the resulting balance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: Money,
    /// The sum of all expense amounts.
    pub total_expense: Money,
    /// Income minus expenses, negative when more was spent than earned.
    pub balance: Money,
}

impl Summary {
    /// Create a summary from the income and expense totals.
    pub fn new(total_income: Money, total_expense: Money) -> Self {
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

/// Sum the income and expenses in the database.
///
/// Amounts are summed as integer cents by SQLite, so the totals are exact.
/// An empty table gives the all-zero summary.
///
/// # Errors
/// This function will return an [Error::ReadFailure] if there is an SQL error.
pub fn get_summary(connection: &Connection) -> Result<Summary, Error> {
    let (total_income, total_expense): (Money, Money) = connection
        .query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN type = ?1 THEN amount END), 0),
                COALESCE(SUM(CASE WHEN type = ?2 THEN amount END), 0)
             FROM transactions",
            (TransactionType::Income, TransactionType::Expense),
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(Error::ReadFailure)?;

    Ok(Summary::new(total_income, total_expense))
}
