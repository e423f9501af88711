//! Validation of user input for new transactions.

use std::str::FromStr;

use serde::Deserialize;

use crate::{
    Error,
    money::Money,
    transaction::{Transaction, TransactionBuilder, TransactionType},
};

/// The largest amount a single transaction may have.
///
/// Keeps the totals of many transactions within 64 bits of cents.
pub const MAX_AMOUNT: Money = Money::from_cents(99_999_999_999);

/// The raw form data for creating a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars, as typed by the user.
    pub amount: String,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
    /// Text detailing the transaction.
    pub description: String,
    /// An optional category, blank means the default category.
    #[serde(default)]
    pub category: Option<String>,
}

impl TransactionForm {
    /// Check the form and turn it into a builder dated now.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is not a number with at most two decimal places,
    /// - [Error::NonPositiveAmount] if the amount is zero or negative,
    /// - [Error::AmountTooLarge] if the amount is more than [MAX_AMOUNT],
    /// - or [Error::EmptyDescription] if the description is blank.
    pub fn validate(&self) -> Result<TransactionBuilder, Error> {
        let amount = Money::from_str(&self.amount)?;

        if !amount.is_positive() {
            return Err(Error::NonPositiveAmount(amount));
        }

        if amount > MAX_AMOUNT {
            return Err(Error::AmountTooLarge(amount));
        }

        let description = self.description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let builder = Transaction::build(amount, self.transaction_type, description);

        Ok(match &self.category {
            Some(category) => builder.category(category),
            None => builder,
        })
    }
}
