//! Conversion between [OffsetDateTime] and the ISO-8601 text stored in the database.
//!
//! Timestamps are stored in UTC with exactly three fractional digits, e.g.
//! `2025-10-05T09:30:00.000Z`. Every stored string has the same width, so
//! sorting the text also sorts the timestamps chronologically.

use time::{
    OffsetDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::Error;

const ISO_8601_UTC: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

const NANOSECONDS_PER_MILLISECOND: u32 = 1_000_000;

/// Convert `date_time` to UTC and drop any precision finer than a millisecond.
///
/// Applying this before storing a timestamp means the value read back from the
/// database is equal to the value written.
pub fn normalize(date_time: OffsetDateTime) -> OffsetDateTime {
    let utc = date_time.to_offset(UtcOffset::UTC);
    let truncated = utc.nanosecond() - utc.nanosecond() % NANOSECONDS_PER_MILLISECOND;

    // Only fails for nanosecond values above 999,999,999, which truncation can't produce.
    utc.replace_nanosecond(truncated).unwrap_or(utc)
}

/// Format `date_time` as the fixed-width ISO-8601 UTC string used for storage.
pub fn format_timestamp(date_time: OffsetDateTime) -> Result<String, time::error::Format> {
    normalize(date_time).format(ISO_8601_UTC)
}

/// Parse an RFC 3339 (ISO-8601) timestamp such as `2025-10-05T09:30:00.000Z`.
///
/// # Errors
/// Returns [Error::InvalidDateFormat] if `text` is not a valid RFC 3339 timestamp.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, Error> {
    OffsetDateTime::parse(text, &Rfc3339)
        .map_err(|error| Error::InvalidDateFormat(text.to_owned(), error.to_string()))
}
