//! Exact money amounts stored as integer minor units.

use std::{
    fmt::Display,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Serialize, Serializer};

use crate::Error;

const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// An amount of money counted in cents.
///
/// Sums and differences are exact, amounts are only converted to text for
/// display. Parse user input with [Money::from_str], e.g. `"12.50"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// No money at all.
    pub const ZERO: Money = Money(0);

    /// Create an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount as a number of cents.
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// The magnitude of the amount.
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }
}

impl FromStr for Money {
    type Err = Error;

    /// Parse a decimal amount such as `"12"`, `"12.5"` or `"-0.25"`.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `s` is not a decimal number, has
    /// more than two decimal places, or does not fit in 64 bits of cents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid_amount = || Error::InvalidAmount(s.to_owned());
        let s_trimmed = s.trim();

        if !s_trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        {
            return Err(invalid_amount());
        }

        let decimal = Decimal::from_str(s_trimmed)
            .map_err(|_| invalid_amount())?
            .normalize();

        if decimal.scale() > 2 {
            return Err(invalid_amount());
        }

        decimal
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(invalid_amount)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        let per_major = MINOR_UNITS_PER_MAJOR as u64;

        write!(f, "{sign}{}.{:02}", cents / per_major, cents % per_major)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Money)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::{Error, money::Money};

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(Money::from_str("12"), Ok(Money::from_cents(1200)));
        assert_eq!(Money::from_str("12.5"), Ok(Money::from_cents(1250)));
        assert_eq!(Money::from_str(" 0.07 "), Ok(Money::from_cents(7)));
        assert_eq!(Money::from_str("-5"), Ok(Money::from_cents(-500)));
        assert_eq!(Money::from_str("3.100"), Ok(Money::from_cents(310)));
    }

    #[test]
    fn rejects_text_that_is_not_an_amount() {
        for text in ["", "abc", "12.345", "1.2.3", "$5", "1_000", "1,000"] {
            assert_eq!(
                Money::from_str(text),
                Err(Error::InvalidAmount(text.to_owned())),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn accepts_leading_sign_and_point() {
        assert_eq!(Money::from_str(".5"), Ok(Money::from_cents(50)));
        assert_eq!(Money::from_str("+5"), Ok(Money::from_cents(500)));
    }

    #[test]
    fn displays_two_decimal_places() {
        assert_eq!(Money::from_cents(1250).to_string(), "12.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-305).to_string(), "-3.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn arithmetic_is_exact() {
        let total = (0..10).fold(Money::ZERO, |total, _| total + Money::from_cents(10));

        assert_eq!(total, Money::from_cents(100));
        assert_eq!(total - Money::from_cents(150), Money::from_cents(-50));
        assert_eq!(-Money::from_cents(50), Money::from_cents(-50));
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(123456)).unwrap();

        assert_eq!(json, "\"1234.56\"");
    }
}
