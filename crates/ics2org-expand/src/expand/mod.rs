//! Expansion strategies and the per-rule dispatcher.

mod daily;
mod single;
mod yearly;

pub use daily::DailyIter;
pub use single::SingleIter;
pub use yearly::YearlyIter;

use crate::occurrence::Occurrence;
use crate::rule::Cadence;
use crate::schedule::Schedule;
use crate::window::Window;

/// The occurrence sequence of one event within a window.
///
/// A tagged union over the expansion strategies, selected from the
/// schedule's recurrence cadence. Every variant is a finite iterator
/// already clipped to the window; rebuilding from the same schedule and
/// window restarts the sequence.
#[derive(Debug)]
pub enum Occurrences {
    Empty,
    Single(SingleIter),
    Days(DailyIter),
    Yearly(YearlyIter),
}

impl Iterator for Occurrences {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        match self {
            Self::Empty => None,
            Self::Single(iter) => iter.next(),
            Self::Days(iter) => iter.next(),
            Self::Yearly(iter) => iter.next(),
        }
    }
}

/// ## Summary
/// Selects the expansion strategy for an event schedule.
///
/// Non-recurring schedules yield at most one occurrence; DAILY and WEEKLY
/// rules walk the calendar day-wise; YEARLY rules substitute month and day
/// per candidate year. MONTHLY is a documented gap and expands to nothing.
#[must_use]
pub fn expand(schedule: &Schedule, window: Window) -> Occurrences {
    match &schedule.rule {
        None => Occurrences::Single(SingleIter::new(schedule, window)),
        Some(rule) => match rule.cadence {
            Cadence::Daily | Cadence::Weekly => {
                Occurrences::Days(DailyIter::new(schedule, rule, window))
            }
            Cadence::Yearly => Occurrences::Yearly(YearlyIter::new(schedule, rule, window)),
            Cadence::Monthly => {
                tracing::debug!("Monthly recurrence is not supported; expanding to nothing");
                Occurrences::Empty
            }
        },
    }
}
