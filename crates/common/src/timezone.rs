//! Guild-local calendar date arithmetic.
//!
//! Daily claim eligibility and streak resets are defined in terms of the
//! guild's configured IANA timezone, not UTC — a claim made at 11pm US/Eastern
//! and one made at 1am the next UTC day are still "two different days" only
//! if the guild's local calendar date actually changed.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::Error;

/// Resolve an IANA timezone name, falling back to UTC on an unknown string
/// rather than failing the request outright.
pub fn resolve_timezone(name: &str) -> Result<Tz, Error> {
    name.parse::<Tz>()
        .map_err(|_| Error::Validation(format!("Unknown IANA timezone: {name}")))
}

/// The guild-local calendar date for a given instant.
pub fn local_date(at: DateTime<Utc>, tz: Tz) -> chrono::NaiveDate {
    at.with_timezone(&tz).date_naive()
}

/// Whether `a` and `b` fall on the same guild-local calendar date.
pub fn same_local_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> bool {
    local_date(a, tz) == local_date(b, tz)
}

/// Whether `b`'s guild-local calendar date is exactly one day after `a`'s,
/// i.e. whether a streak continues rather than resets.
pub fn is_consecutive_local_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> bool {
    local_date(b, tz) == local_date(a, tz) + chrono::Duration::days(1)
}

/// Same as [`is_consecutive_local_day`] but for two already-resolved
/// guild-local calendar dates, e.g. a stored `last_daily_date` and today.
pub fn is_consecutive_local_date(a: chrono::NaiveDate, b: chrono::NaiveDate) -> bool {
    b == a + chrono::Duration::days(1)
}
