//! Date strings used by the POST policy signing scheme.
//!
//! All formatting is done in UTC. The scheme needs three shapes of the same
//! instant:
//!
//! - compact date `YYYYMMDD`, part of the credential scope and key derivation
//! - ISO-compact `YYYYMMDDT000000Z`, the `x-amz-date` form field
//! - policy expiration `YYYY-MM-DDTHH:MM:SS.000Z`
//!
//! The ISO-compact form always encodes midnight rather than the signing time
//! of day. Services only validate its date portion against the credential
//! scope, and existing clients depend on the exact string.

use chrono::{DateTime, TimeDelta, Utc};

/// Time-of-day suffix appended to a compact date.
const MIDNIGHT_SUFFIX: &str = "T000000Z";

/// Format an instant as a compact `YYYYMMDD` date.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use s3form_auth::date::compact_date;
///
/// let instant = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
/// assert_eq!(compact_date(instant), "20240305");
/// ```
#[must_use]
pub fn compact_date(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%d").to_string()
}

/// Extend a compact date to the ISO-compact `YYYYMMDDT000000Z` form.
#[must_use]
pub fn iso_compact(compact_date: &str) -> String {
    format!("{compact_date}{MIDNIGHT_SUFFIX}")
}

/// Format `instant + minutes_to_expiry` as a policy expiration timestamp.
///
/// The result is RFC 3339 in UTC with the fractional seconds zeroed and an
/// explicit `Z` suffix, e.g. `2024-03-05T14:40:00.000Z`. Zero and negative
/// offsets are accepted and yield an already-expired policy. An offset that
/// would leave the representable range saturates at the range bound.
#[must_use]
pub fn expiration_timestamp(instant: DateTime<Utc>, minutes_to_expiry: i32) -> String {
    let delta = TimeDelta::minutes(i64::from(minutes_to_expiry));
    let expires = instant.checked_add_signed(delta).unwrap_or(if minutes_to_expiry < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    });
    expires.format("%Y-%m-%dT%H:%M:%S.000Z").to_string()
}
