//! Recurrence rules in the engine's resolved form.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use ics2org_ical::{Frequency, RRule, RRuleUntil, Weekday};

use crate::error::ScheduleError;
use crate::schedule::{naive_date, naive_datetime};
use crate::timezone::localize;

/// Supported recurrence cadences.
///
/// `Monthly` is carried so the dispatcher can name the limitation; it
/// expands to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// How a recurrence series ends.
///
/// A series has exactly one terminator or none at all (bounded only by the
/// query window); `COUNT` and `UNTIL` together are rejected when the rule
/// is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// A fixed number of occurrences, counted from the series start.
    Count(u32),
    /// An inclusive cutoff instant.
    Until(DateTime<Utc>),
}

/// A resolved recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub cadence: Cadence,
    /// Step multiplier, at least 1.
    pub interval: u32,
    /// Allowed weekdays; empty means no weekday filter.
    pub by_day: Vec<Weekday>,
    /// Month override for yearly rules.
    pub by_month: Option<u32>,
    /// Day-of-month override for yearly rules.
    pub by_month_day: Option<u32>,
    /// First day of the week for weekday numbering.
    pub week_start: Weekday,
    pub limit: Option<Limit>,
}

impl Rule {
    /// ## Summary
    /// Resolves a parsed RRULE into the engine's rule form.
    ///
    /// `BYDAY` ordinals are dropped (the tags keep their weekday); `BYMONTH`
    /// and `BYMONTHDAY` keep their first entry. An `UNTIL` given as a date
    /// is midnight in the default timezone.
    ///
    /// ## Errors
    ///
    /// Returns a [`ScheduleError`] when `FREQ` is missing or unsupported,
    /// the interval is zero, `BYMONTHDAY` is not positive, or both `COUNT`
    /// and `UNTIL` are set.
    pub fn from_rrule(rrule: &RRule, default_tz: Tz) -> Result<Self, ScheduleError> {
        let cadence = match rrule.freq {
            None => return Err(ScheduleError::MissingFrequency),
            Some(Frequency::Daily) => Cadence::Daily,
            Some(Frequency::Weekly) => Cadence::Weekly,
            Some(Frequency::Monthly) => Cadence::Monthly,
            Some(Frequency::Yearly) => Cadence::Yearly,
            Some(other) => return Err(ScheduleError::UnsupportedFrequency(other)),
        };

        let interval = rrule.interval.unwrap_or(1);
        if interval == 0 {
            return Err(ScheduleError::InvalidInterval);
        }

        let by_month_day = match rrule.by_monthday.first().copied() {
            None => None,
            Some(day) if day > 0 => Some(u32::from(day.unsigned_abs())),
            Some(day) => return Err(ScheduleError::InvalidByMonthDay(day)),
        };

        let limit = match (rrule.count, rrule.until.as_ref()) {
            (Some(_), Some(_)) => return Err(ScheduleError::CountUntilConflict),
            (Some(count), None) => Some(Limit::Count(count)),
            (None, Some(until)) => Some(Limit::Until(resolve_until(until, default_tz)?)),
            (None, None) => None,
        };

        Ok(Self {
            cadence,
            interval,
            by_day: rrule.by_day.iter().map(|entry| entry.weekday).collect(),
            by_month: rrule.by_month.first().copied().map(u32::from),
            by_month_day,
            week_start: rrule.wkst.unwrap_or(Weekday::Monday),
            limit,
        })
    }
}

/// Converts an UNTIL bound to a UTC instant.
///
/// UTC-form datetimes are taken as-is; floating forms (UNTIL should be UTC,
/// but producers vary) and dates resolve in the default timezone.
fn resolve_until(until: &RRuleUntil, default_tz: Tz) -> Result<DateTime<Utc>, ScheduleError> {
    match until {
        RRuleUntil::Date(date) => {
            let naive = naive_date(*date)?.and_time(NaiveTime::MIN);
            Ok(localize(default_tz, naive).with_timezone(&Utc))
        }
        RRuleUntil::DateTime(dt) => {
            let naive = naive_datetime(dt)?;
            if dt.is_utc() {
                Ok(Utc.from_utc_datetime(&naive))
            } else {
                Ok(localize(default_tz, naive).with_timezone(&Utc))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ics2org_ical::{Date, WeekdayNum};

    use super::*;

    #[test]
    fn defaults_fill_in() {
        let rule = Rule::from_rrule(&RRule::weekly(), Tz::UTC).unwrap();
        assert_eq!(rule.cadence, Cadence::Weekly);
        assert_eq!(rule.interval, 1);
        assert!(rule.by_day.is_empty());
        assert_eq!(rule.week_start, Weekday::Monday);
        assert!(rule.limit.is_none());
    }

    #[test]
    fn count_and_until_conflict() {
        let rrule = RRule::daily()
            .with_count(3)
            .with_until_date(Date::new(2020, 1, 1));
        let err = Rule::from_rrule(&rrule, Tz::UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::CountUntilConflict));
    }

    #[test]
    fn missing_frequency_is_rejected() {
        let err = Rule::from_rrule(&RRule::new(), Tz::UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::MissingFrequency));
    }

    #[test]
    fn sub_daily_frequencies_are_rejected() {
        let mut rrule = RRule::new();
        rrule.freq = Some(Frequency::Hourly);
        let err = Rule::from_rrule(&rrule, Tz::UTC).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::UnsupportedFrequency(Frequency::Hourly)
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let rrule = RRule::daily().with_interval(0);
        let err = Rule::from_rrule(&rrule, Tz::UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInterval));
    }

    #[test]
    fn byday_ordinals_are_dropped() {
        let mut rrule = RRule::weekly();
        rrule.by_day = vec![
            WeekdayNum {
                ordinal: Some(2),
                weekday: Weekday::Monday,
            },
            WeekdayNum::every(Weekday::Friday),
        ];
        let rule = Rule::from_rrule(&rrule, Tz::UTC).unwrap();
        assert_eq!(rule.by_day, vec![Weekday::Monday, Weekday::Friday]);
    }

    #[test]
    fn negative_monthday_is_rejected() {
        let mut rrule = RRule::yearly();
        rrule.by_monthday = vec![-1];
        let err = Rule::from_rrule(&rrule, Tz::UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidByMonthDay(-1)));
    }

    #[test]
    fn first_bymonth_entry_wins() {
        let mut rrule = RRule::yearly();
        rrule.by_month = vec![3, 9];
        rrule.by_monthday = vec![15, 20];
        let rule = Rule::from_rrule(&rrule, Tz::UTC).unwrap();
        assert_eq!(rule.by_month, Some(3));
        assert_eq!(rule.by_month_day, Some(15));
    }

    #[test]
    fn utc_until_is_taken_verbatim() {
        let rrule = RRule::weekly().with_until_datetime(ics2org_ical::DateTime::utc(
            Date::new(2020, 10, 8),
            3,
            59,
            59,
        ));
        let rule = Rule::from_rrule(&rrule, Tz::America__New_York).unwrap();
        assert_eq!(
            rule.limit,
            Some(Limit::Until(
                Utc.with_ymd_and_hms(2020, 10, 8, 3, 59, 59).unwrap()
            ))
        );
    }

    #[test]
    fn date_until_is_midnight_in_default_timezone() {
        let rrule = RRule::daily().with_until_date(Date::new(2020, 6, 1));
        let rule = Rule::from_rrule(&rrule, Tz::America__Los_Angeles).unwrap();
        // Midnight PDT is 07:00 UTC.
        assert_eq!(
            rule.limit,
            Some(Limit::Until(
                Utc.with_ymd_and_hms(2020, 6, 1, 7, 0, 0).unwrap()
            ))
        );
    }
}
