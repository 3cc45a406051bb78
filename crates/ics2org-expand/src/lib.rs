//! Occurrence expansion for calendar events.
//!
//! Turns an event schedule (start, end, optional recurrence rule) plus a
//! half-open UTC window into the finite sequence of concrete occurrences
//! that overlap the window. Recurrence stepping is wall-clock-preserving
//! across DST transitions; timezone identifiers resolve against the
//! compiled-in IANA database via `chrono-tz`.

pub mod dst;
pub mod error;
pub mod expand;
pub mod occurrence;
pub mod rule;
pub mod schedule;
pub mod timezone;
pub mod weekday;
pub mod window;

pub use self::error::ScheduleError;
pub use self::expand::{expand, Occurrences};
pub use self::occurrence::Occurrence;
pub use self::rule::{Cadence, Limit, Rule};
pub use self::schedule::Schedule;
pub use self::timezone::{localize, TimeZoneResolver, TimezoneError};
pub use self::window::Window;
