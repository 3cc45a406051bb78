//! The yearly expander: YEARLY rules anchored to a month and day.

use std::cmp::max;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::occurrence::Occurrence;
use crate::rule::{Limit, Rule};
use crate::schedule::Schedule;
use crate::timezone::localize;
use crate::window::Window;

/// Iterator over the occurrences of a YEARLY rule.
///
/// Each candidate year substitutes year, then month, then day onto the
/// original start, keeping its time-of-day and zone. A substitution that
/// does not name a real date (Feb 29 off leap years) skips that year but
/// still consumes its slot under a `COUNT` terminator. The interval
/// multiplier does not apply to yearly rules.
#[derive(Debug)]
pub struct YearlyIter {
    start: DateTime<Tz>,
    duration: chrono::Duration,
    month: u32,
    day: u32,
    years: std::vec::IntoIter<i32>,
    lower: DateTime<Utc>,
    window: Window,
    until: Option<DateTime<Utc>>,
    all_day: bool,
    done: bool,
}

impl YearlyIter {
    /// Builds the candidate-year sequence for the window.
    #[must_use]
    pub fn new(schedule: &Schedule, rule: &Rule, window: Window) -> Self {
        let until = match rule.limit {
            Some(Limit::Until(until)) => Some(until),
            Some(Limit::Count(_)) | None => None,
        };
        let effective_end = until.map_or(window.end, |until| until.min(window.end));
        let start_year = schedule.start.year();
        let years: Vec<i32> = match rule.limit {
            Some(Limit::Count(count)) => (start_year..=effective_end.year())
                .take(usize::try_from(count).unwrap_or(usize::MAX))
                .collect(),
            _ => (start_year.max(window.start.year())..=effective_end.year()).collect(),
        };
        Self {
            start: schedule.start,
            duration: schedule.duration(),
            month: rule.by_month.unwrap_or_else(|| schedule.start.month()),
            day: rule.by_month_day.unwrap_or_else(|| schedule.start.day()),
            years: years.into_iter(),
            lower: max(window.start, schedule.start.with_timezone(&Utc)),
            window,
            until,
            all_day: schedule.all_day,
            done: false,
        }
    }
}

impl Iterator for YearlyIter {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        if self.done {
            return None;
        }
        loop {
            let Some(year) = self.years.next() else {
                self.done = true;
                return None;
            };
            let candidate = self
                .start
                .naive_local()
                .with_year(year)
                .and_then(|dt| dt.with_month(self.month))
                .and_then(|dt| dt.with_day(self.day));
            // An impossible substitution skips its year slot.
            let Some(naive) = candidate else { continue };
            let zoned = localize(self.start.timezone(), naive);
            let instant = zoned.with_timezone(&Utc);
            if instant < self.lower {
                continue;
            }
            if self.duration.is_zero() && instant == self.window.start {
                // A zero-length occurrence sitting exactly on the window
                // start does not overlap the half-open window.
                continue;
            }
            if instant >= self.window.end || self.until.is_some_and(|until| instant > until) {
                self.done = true;
                return None;
            }
            return Some(Occurrence {
                start: zoned,
                end: zoned + self.duration,
                recurring: true,
                all_day: self.all_day,
            });
        }
    }
}
