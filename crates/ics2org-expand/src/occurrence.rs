//! A materialized event instance.

use chrono::DateTime;
use chrono_tz::Tz;

/// One concrete instance of an event within a query window.
///
/// Occurrences are value types with no identity beyond their time span;
/// `recurring` distinguishes generated recurrence instances from single
/// events and `all_day` carries the start's date-only form through to
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub recurring: bool,
    pub all_day: bool,
}
