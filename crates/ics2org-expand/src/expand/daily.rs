//! The daily-cadence expander: DAILY and WEEKLY rules.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use ics2org_ical::Weekday;

use crate::dst::shift_days;
use crate::occurrence::Occurrence;
use crate::rule::{Cadence, Limit, Rule};
use crate::schedule::Schedule;
use crate::weekday::{from_chrono, offset_from_week_start};
use crate::window::Window;

/// Iterator over the occurrences of a DAILY or WEEKLY rule.
///
/// Walks the calendar in steps of `delta_days` (the base step times the
/// interval), filtered by an optional weekday list, clipped by the window
/// and the rule's terminator. Stepping preserves the wall-clock time across
/// DST transitions.
#[derive(Debug)]
pub struct DailyIter {
    current: DateTime<Tz>,
    duration: chrono::Duration,
    delta_days: i64,
    day_filter: Option<Vec<u32>>,
    week_start: Weekday,
    until: Option<DateTime<Utc>>,
    window: Window,
    remaining: Option<i64>,
    all_day: bool,
    done: bool,
}

impl DailyIter {
    /// Builds the sequence, fast-forwarding past everything before the
    /// window.
    #[must_use]
    pub fn new(schedule: &Schedule, rule: &Rule, window: Window) -> Self {
        let base_step = if !rule.by_day.is_empty() {
            1
        } else if rule.cadence == Cadence::Weekly {
            7
        } else {
            1
        };
        let day_filter = if !rule.by_day.is_empty() {
            Some(
                rule.by_day
                    .iter()
                    .map(|day| offset_from_week_start(rule.week_start, *day))
                    .collect(),
            )
        } else if rule.cadence == Cadence::Weekly {
            None
        } else {
            // A bare DAILY series keeps the weekday of its start.
            Some(vec![offset_from_week_start(
                rule.week_start,
                from_chrono(schedule.start.weekday()),
            )])
        };
        let (until, remaining) = match rule.limit {
            Some(Limit::Until(until)) => (Some(until), None),
            Some(Limit::Count(count)) => (None, Some(i64::from(count))),
            None => (None, None),
        };

        let mut iter = Self {
            current: schedule.start,
            duration: schedule.duration(),
            delta_days: base_step * i64::from(rule.interval),
            day_filter,
            week_start: rule.week_start,
            until,
            window,
            remaining,
            all_day: schedule.all_day,
            done: false,
        };
        if iter.until.is_some_and(|until| until < window.start) {
            iter.done = true;
        }
        if !iter.done && iter.current < window.start {
            iter.fast_forward();
        }
        iter.align();
        if !iter.done && iter.duration.is_zero() && iter.current == window.start {
            // A zero-length occurrence sitting exactly on the window start
            // does not overlap the half-open window.
            iter.step();
        }
        iter
    }

    /// Jumps most of the way to the window start in whole steps, then walks
    /// the rest. Jumped-over steps count against a `COUNT` terminator; the
    /// final walk does not.
    fn fast_forward(&mut self) {
        let window_ord = i64::from(self.window.start.date_naive().num_days_from_ce());
        let start_ord = i64::from(self.current.date_naive().num_days_from_ce());
        let steps = (window_ord - start_ord - 1).div_euclid(self.delta_days);
        if steps > 0 {
            self.current = shift_days(self.current, steps * self.delta_days);
            if let Some(remaining) = &mut self.remaining {
                *remaining -= steps;
                if *remaining < 1 {
                    self.done = true;
                    return;
                }
            }
        }
        while self.current < self.window.start {
            self.current = shift_days(self.current, self.delta_days);
        }
    }

    /// Walks `current` forward to the next allowed weekday. The step cycle
    /// visits at most eight distinct weekday phases, so a filter matching
    /// none of them ends the series.
    fn align(&mut self) {
        if self.done {
            return;
        }
        for _ in 0..=7 {
            if day_allowed(self.day_filter.as_deref(), self.week_start, self.current) {
                return;
            }
            self.current = shift_days(self.current, self.delta_days);
        }
        self.done = true;
    }

    fn step(&mut self) {
        self.current = shift_days(self.current, self.delta_days);
        self.align();
    }
}

fn day_allowed(filter: Option<&[u32]>, week_start: Weekday, candidate: DateTime<Tz>) -> bool {
    match filter {
        None => true,
        Some(days) => days.contains(&offset_from_week_start(
            week_start,
            from_chrono(candidate.weekday()),
        )),
    }
}

impl Iterator for DailyIter {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        if self.done {
            return None;
        }
        let start = self.current;
        let instant = start.with_timezone(&Utc);
        if instant >= self.window.end || self.until.is_some_and(|until| instant > until) {
            self.done = true;
            return None;
        }
        if let Some(remaining) = &mut self.remaining {
            if *remaining < 1 {
                self.done = true;
                return None;
            }
            *remaining -= 1;
        }
        let occurrence = Occurrence {
            start,
            end: start + self.duration,
            recurring: true,
            all_day: self.all_day,
        };
        self.step();
        Some(occurrence)
    }
}
