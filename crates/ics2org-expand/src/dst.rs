//! Wall-clock-preserving day arithmetic.
//!
//! Adding an instant offset of `n * 24h` to a zoned datetime drifts the
//! wall-clock time whenever the addition crosses a DST transition. Recurrence
//! stepping must keep a 10:00 event at 10:00 local, so candidate advancement
//! goes through the naive wall time and re-localizes in the zone.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::timezone::localize;

/// Advances a zoned datetime by whole calendar days, preserving the
/// wall-clock time across DST transitions.
#[must_use]
pub fn shift_days(dt: DateTime<Tz>, days: i64) -> DateTime<Tz> {
    localize(dt.timezone(), dt.naive_local() + chrono::Duration::days(days))
}
