//! The single-occurrence expander.

use chrono::Utc;

use crate::occurrence::Occurrence;
use crate::schedule::Schedule;
use crate::window::Window;

/// Iterator over the zero or one occurrence of a non-recurring event.
#[derive(Debug)]
pub struct SingleIter {
    occurrence: Option<Occurrence>,
}

impl SingleIter {
    /// Builds the sequence: one occurrence when the event's span strictly
    /// overlaps the window, empty otherwise.
    #[must_use]
    pub fn new(schedule: &Schedule, window: Window) -> Self {
        let emit = window.overlaps(
            schedule.start.with_timezone(&Utc),
            schedule.end.with_timezone(&Utc),
        );
        Self {
            occurrence: emit.then(|| Occurrence {
                start: schedule.start,
                end: schedule.end,
                recurring: false,
                all_day: schedule.all_day,
            }),
        }
    }
}

impl Iterator for SingleIter {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        self.occurrence.take()
    }
}
