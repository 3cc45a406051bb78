//! Errors raised while building a schedule or its recurrence rule.

use ics2org_ical::Frequency;

use crate::timezone::TimezoneError;

/// Error building an event schedule.
///
/// These are all construction-time errors: once a schedule is built, its
/// expansion cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The event has no DTSTART.
    #[error("Event has no start")]
    MissingStart,

    /// A recurring event has neither DTEND nor DURATION.
    #[error("Recurring event has no end and no duration")]
    MissingEnd,

    /// The recurrence rule sets both COUNT and UNTIL.
    #[error("Recurrence rule sets both COUNT and UNTIL")]
    CountUntilConflict,

    /// The recurrence rule has no FREQ part.
    #[error("Recurrence rule has no FREQ")]
    MissingFrequency,

    /// The recurrence frequency is valid RFC 5545 but not supported.
    #[error("Unsupported recurrence frequency: {0}")]
    UnsupportedFrequency(Frequency),

    /// The recurrence interval is zero.
    #[error("Recurrence interval must be positive")]
    InvalidInterval,

    /// BYMONTHDAY is zero or negative.
    #[error("Unsupported BYMONTHDAY value: {0}")]
    InvalidByMonthDay(i8),

    /// A date or time field does not name a real calendar instant.
    #[error("Invalid calendar date")]
    InvalidDate,

    /// A TZID could not be resolved.
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
}
