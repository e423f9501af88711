//! Defines the crate level error type.

use crate::money::Money;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction table could not be created.
    #[error("could not initialize the database: {0}")]
    InitializationFailure(rusqlite::Error),

    /// A transaction could not be inserted or deleted.
    #[error("could not write to the database: {0}")]
    WriteFailure(rusqlite::Error),

    /// Transactions could not be queried, or a stored row could not be
    /// decoded into a [Transaction](crate::Transaction).
    #[error("could not read from the database: {0}")]
    ReadFailure(rusqlite::Error),

    /// The database connection reported an error while closing.
    #[error("could not close the database: {0}")]
    CloseFailure(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The text entered for an amount is not a number with at most two
    /// decimal places.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// An amount of zero or less was entered for a transaction.
    ///
    /// The direction of a transaction comes from its type, so amounts are
    /// always positive magnitudes.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Money),

    /// An amount larger than [MAX_AMOUNT](crate::MAX_AMOUNT) was entered for a transaction.
    #[error("amount cannot be more than {max}, got {0}", max = crate::MAX_AMOUNT)]
    AmountTooLarge(Money),

    /// The description was empty or only whitespace.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The text is neither "income" nor "expense".
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// A date-time string could not be parsed.
    ///
    /// Callers should pass in the date string that caused the error and the
    /// original error as a string.
    #[error("could not parse the date-time string \"{0}\": {1}")]
    InvalidDateFormat(String, String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// The log file could not be opened for writing.
    #[error("could not set up logging: {0}")]
    LoggingError(String),
}

impl Error {
    /// Whether the error was caused by bad user input rather than a failure
    /// in the database or environment.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount(_)
                | Error::NonPositiveAmount(_)
                | Error::AmountTooLarge(_)
                | Error::EmptyDescription
                | Error::InvalidTransactionType(_)
                | Error::InvalidDateFormat(_, _)
                | Error::InvalidTimezoneError(_)
        )
    }
}
