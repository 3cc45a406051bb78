//! Event schedules: resolved start, end, and recurrence rule.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use ics2org_ical::{Component, Date, Property, Value};

use crate::error::ScheduleError;
use crate::rule::Rule;
use crate::timezone::{localize, TimeZoneResolver};

/// An event's resolved time span plus its optional recurrence rule.
///
/// All times are concrete zoned instants. A DATE-valued start resolves to
/// midnight in the default timezone and marks the schedule all-day.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub all_day: bool,
    pub rule: Option<Rule>,
}

impl Schedule {
    /// ## Summary
    /// Builds a schedule from a VEVENT component.
    ///
    /// The end comes from `DTEND`, or from `DTSTART + DURATION` when there
    /// is no `DTEND`. A non-recurring event without either gets a
    /// zero-duration span at the start.
    ///
    /// ## Errors
    ///
    /// Returns a [`ScheduleError`] when `DTSTART` is missing, a recurring
    /// event has no end and no duration, a date does not exist, a TZID
    /// cannot be resolved, or the recurrence rule is invalid.
    pub fn from_event(
        event: &Component,
        resolver: &mut TimeZoneResolver,
        default_tz: Tz,
    ) -> Result<Self, ScheduleError> {
        let start_prop = event
            .get_property("DTSTART")
            .ok_or(ScheduleError::MissingStart)?;
        let (start, all_day) = resolve_stamp(start_prop, resolver, default_tz)?;
        let rule = event
            .get_property("RRULE")
            .and_then(Property::as_rrule)
            .map(|rrule| Rule::from_rrule(rrule, default_tz))
            .transpose()?;
        let end = resolve_end(event, start, rule.is_some(), resolver, default_tz)?;
        Ok(Self {
            start,
            end,
            all_day,
            rule,
        })
    }

    /// Nominal duration of one occurrence.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.end.signed_duration_since(self.start)
    }
}

/// Resolves a DATE or DATE-TIME property to a zoned instant; the flag marks
/// the date-only form.
fn resolve_stamp(
    property: &Property,
    resolver: &mut TimeZoneResolver,
    default_tz: Tz,
) -> Result<(DateTime<Tz>, bool), ScheduleError> {
    match &property.value {
        Value::Date(date) => {
            let naive = naive_date(*date)?.and_time(NaiveTime::MIN);
            Ok((localize(default_tz, naive), true))
        }
        Value::DateTime(dt) => Ok((zoned_datetime(dt, resolver, default_tz)?, false)),
        _ => Err(ScheduleError::InvalidDate),
    }
}

fn resolve_end(
    event: &Component,
    start: DateTime<Tz>,
    recurring: bool,
    resolver: &mut TimeZoneResolver,
    default_tz: Tz,
) -> Result<DateTime<Tz>, ScheduleError> {
    if let Some(property) = event.get_property("DTEND") {
        let (end, _) = resolve_stamp(property, resolver, default_tz)?;
        return Ok(end);
    }
    if let Some(duration) = event.get_property("DURATION").and_then(Property::as_duration) {
        return Ok(start + chrono::Duration::seconds(duration.as_seconds()));
    }
    if recurring {
        // A bounded series needs a per-occurrence duration.
        return Err(ScheduleError::MissingEnd);
    }
    Ok(start)
}

pub(crate) fn zoned_datetime(
    dt: &ics2org_ical::DateTime,
    resolver: &mut TimeZoneResolver,
    default_tz: Tz,
) -> Result<DateTime<Tz>, ScheduleError> {
    let naive = naive_datetime(dt)?;
    let tz = if dt.is_utc() {
        Tz::UTC
    } else if let Some(tzid) = dt.tzid() {
        resolver.resolve(tzid)?
    } else {
        default_tz
    };
    Ok(localize(tz, naive))
}

pub(crate) fn naive_date(date: Date) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::from_ymd_opt(
        i32::from(date.year),
        u32::from(date.month),
        u32::from(date.day),
    )
    .ok_or(ScheduleError::InvalidDate)
}

pub(crate) fn naive_datetime(dt: &ics2org_ical::DateTime) -> Result<NaiveDateTime, ScheduleError> {
    // RFC 5545 allows second 60 (leap second); chrono's plain clock does
    // not, so a :60 stamp lands on :59.
    let time = NaiveTime::from_hms_opt(
        u32::from(dt.hour),
        u32::from(dt.minute),
        u32::from(dt.second.min(59)),
    )
    .ok_or(ScheduleError::InvalidDate)?;
    Ok(naive_date(dt.date)?.and_time(time))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ics2org_ical::{ComponentKind, Duration, RRule};

    use super::*;

    fn event_with(properties: Vec<Property>) -> Component {
        let mut event = Component::new(ComponentKind::Event);
        for property in properties {
            event.add_property(property);
        }
        event
    }

    fn zoned(name: &str, date: Date, hour: u8, minute: u8, tzid: &str) -> Property {
        Property::datetime(name, ics2org_ical::DateTime::zoned(date, hour, minute, 0, tzid))
    }

    #[test]
    fn resolves_zoned_start_and_end() {
        let event = event_with(vec![
            zoned("DTSTART", Date::new(2020, 5, 13), 13, 0, "America/New_York"),
            zoned("DTEND", Date::new(2020, 5, 13), 14, 0, "America/New_York"),
        ]);
        let mut resolver = TimeZoneResolver::new();
        let schedule =
            Schedule::from_event(&event, &mut resolver, Tz::America__Los_Angeles).unwrap();
        assert_eq!(
            schedule.start,
            Tz::America__New_York.with_ymd_and_hms(2020, 5, 13, 13, 0, 0).unwrap()
        );
        assert_eq!(schedule.duration(), chrono::Duration::hours(1));
        assert!(!schedule.all_day);
        assert!(schedule.rule.is_none());
    }

    #[test]
    fn resolves_utc_start() {
        let event = event_with(vec![Property::datetime(
            "DTSTART",
            ics2org_ical::DateTime::utc(Date::new(2016, 10, 22), 23, 0, 0),
        )]);
        let mut resolver = TimeZoneResolver::new();
        let schedule =
            Schedule::from_event(&event, &mut resolver, Tz::America__Los_Angeles).unwrap();
        assert_eq!(
            schedule.start,
            Tz::UTC.with_ymd_and_hms(2016, 10, 22, 23, 0, 0).unwrap()
        );
        // No end anywhere: zero-duration single event.
        assert_eq!(schedule.end, schedule.start);
    }

    #[test]
    fn resolves_floating_start_in_default_timezone() {
        let event = event_with(vec![Property::datetime(
            "DTSTART",
            ics2org_ical::DateTime::floating(Date::new(2020, 5, 13), 13, 0, 0),
        )]);
        let mut resolver = TimeZoneResolver::new();
        let schedule =
            Schedule::from_event(&event, &mut resolver, Tz::America__Los_Angeles).unwrap();
        assert_eq!(
            schedule.start,
            Tz::America__Los_Angeles.with_ymd_and_hms(2020, 5, 13, 13, 0, 0).unwrap()
        );
    }

    #[test]
    fn all_day_start_is_midnight_in_default_timezone() {
        let event = event_with(vec![
            Property::date("DTSTART", Date::new(2015, 2, 1)),
            Property::date("DTEND", Date::new(2015, 2, 3)),
        ]);
        let mut resolver = TimeZoneResolver::new();
        let schedule =
            Schedule::from_event(&event, &mut resolver, Tz::America__Los_Angeles).unwrap();
        assert!(schedule.all_day);
        assert_eq!(
            schedule.start,
            Tz::America__Los_Angeles.with_ymd_and_hms(2015, 2, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(schedule.duration(), chrono::Duration::days(2));
    }

    #[test]
    fn duration_property_supplies_the_end() {
        let event = event_with(vec![
            Property::datetime(
                "DTSTART",
                ics2org_ical::DateTime::utc(Date::new(2020, 5, 13), 13, 0, 0),
            ),
            Property::duration("DURATION", Duration::minutes(90)),
        ]);
        let mut resolver = TimeZoneResolver::new();
        let schedule =
            Schedule::from_event(&event, &mut resolver, Tz::America__Los_Angeles).unwrap();
        assert_eq!(schedule.duration(), chrono::Duration::minutes(90));
    }

    #[test]
    fn missing_start_is_an_error() {
        let event = event_with(vec![]);
        let mut resolver = TimeZoneResolver::new();
        let err = Schedule::from_event(&event, &mut resolver, Tz::UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::MissingStart));
    }

    #[test]
    fn recurring_event_without_end_is_an_error() {
        let event = event_with(vec![
            Property::datetime(
                "DTSTART",
                ics2org_ical::DateTime::utc(Date::new(2020, 5, 13), 13, 0, 0),
            ),
            Property::rrule(RRule::weekly()),
        ]);
        let mut resolver = TimeZoneResolver::new();
        let err = Schedule::from_event(&event, &mut resolver, Tz::UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::MissingEnd));
    }

    #[test]
    fn recurring_event_with_duration_is_accepted() {
        let event = event_with(vec![
            Property::datetime(
                "DTSTART",
                ics2org_ical::DateTime::utc(Date::new(2020, 5, 13), 13, 0, 0),
            ),
            Property::duration("DURATION", Duration::hours(1)),
            Property::rrule(RRule::weekly()),
        ]);
        let mut resolver = TimeZoneResolver::new();
        let schedule = Schedule::from_event(&event, &mut resolver, Tz::UTC).unwrap();
        assert!(schedule.rule.is_some());
        assert_eq!(schedule.duration(), chrono::Duration::hours(1));
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        let event = event_with(vec![zoned(
            "DTSTART",
            Date::new(2020, 5, 13),
            13,
            0,
            "Not/A_Zone",
        )]);
        let mut resolver = TimeZoneResolver::new();
        let err = Schedule::from_event(&event, &mut resolver, Tz::UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::Timezone(_)));
    }

    #[test]
    fn impossible_date_is_an_error() {
        let event = event_with(vec![Property::date("DTSTART", Date::new(2021, 2, 29))]);
        let mut resolver = TimeZoneResolver::new();
        let err = Schedule::from_event(&event, &mut resolver, Tz::UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDate));
    }

    #[test]
    fn leap_second_stamp_lands_on_the_previous_second() {
        // The real leap second at the end of 2016.
        let event = event_with(vec![Property::datetime(
            "DTSTART",
            ics2org_ical::DateTime::utc(Date::new(2016, 12, 31), 23, 59, 60),
        )]);
        let mut resolver = TimeZoneResolver::new();
        let schedule = Schedule::from_event(&event, &mut resolver, Tz::UTC).unwrap();
        assert_eq!(
            schedule.start,
            Tz::UTC.with_ymd_and_hms(2016, 12, 31, 23, 59, 59).unwrap()
        );
        assert_eq!(schedule.end, schedule.start);
    }
}
