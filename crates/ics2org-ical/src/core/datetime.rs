//! Date and date-time values (RFC 5545 §3.3.4-3.3.5).

use std::fmt;

/// A calendar date without time-of-day (DATE value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    /// Four-digit year.
    pub year: u16,
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
}

impl Date {
    /// Creates a date.
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Timezone interpretation of a DATE-TIME value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// Local time with no zone designator.
    Floating,
    /// UTC time (trailing `Z`).
    Utc,
    /// Local time in the zone named by a `TZID` parameter.
    Zoned {
        /// Timezone identifier from the parameter, as written.
        tzid: String,
    },
}

/// A DATE-TIME value together with its zone form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    /// Calendar date part.
    pub date: Date,
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-60 (60 only for leap seconds).
    pub second: u8,
    /// Zone form.
    pub form: DateTimeForm,
}

impl DateTime {
    /// Creates a floating (zone-less) date-time.
    #[must_use]
    pub const fn floating(date: Date, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            form: DateTimeForm::Floating,
        }
    }

    /// Creates a UTC date-time.
    #[must_use]
    pub const fn utc(date: Date, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            form: DateTimeForm::Utc,
        }
    }

    /// Creates a date-time zoned to the given TZID.
    #[must_use]
    pub fn zoned(date: Date, hour: u8, minute: u8, second: u8, tzid: impl Into<String>) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            form: DateTimeForm::Zoned { tzid: tzid.into() },
        }
    }

    /// Returns whether this is a UTC date-time.
    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    /// Returns the TZID when the form is zoned.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            DateTimeForm::Floating | DateTimeForm::Utc => None,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}T{:02}{:02}{:02}",
            self.date, self.hour, self.minute, self.second
        )?;
        if self.is_utc() {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_displays_as_basic_format() {
        assert_eq!(Date::new(2016, 11, 7).to_string(), "20161107");
    }

    #[test]
    fn utc_datetime_displays_with_z() {
        let dt = DateTime::utc(Date::new(2020, 10, 8), 3, 59, 59);
        assert_eq!(dt.to_string(), "20201008T035959Z");
        assert!(dt.is_utc());
    }

    #[test]
    fn zoned_datetime_exposes_tzid() {
        let dt = DateTime::zoned(Date::new(2020, 5, 13), 13, 0, 0, "America/New_York");
        assert_eq!(dt.tzid(), Some("America/New_York"));
        assert_eq!(dt.to_string(), "20200513T130000");
    }

    #[test]
    fn floating_datetime_has_no_tzid() {
        let dt = DateTime::floating(Date::new(2021, 1, 1), 9, 30, 0);
        assert_eq!(dt.tzid(), None);
        assert!(!dt.is_utc());
    }
}
