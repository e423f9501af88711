//! Resolves canonical timezone names to UTC offsets for displaying dates.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The UTC offset of `canonical_timezone` (e.g., "Pacific/Auckland") at the current moment.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Like [get_local_offset], but reports unknown names as an [Error::InvalidTimezoneError].
pub fn resolve_local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use crate::{Error, timezone::resolve_local_offset};

    #[test]
    fn resolves_utc() {
        assert_eq!(resolve_local_offset("Etc/UTC"), Ok(UtcOffset::UTC));
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert_eq!(
            resolve_local_offset("Mars/Olympus_Mons"),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }
}
