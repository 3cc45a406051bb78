//! Recurrence rules (RFC 5545 §3.3.10).

use std::fmt;

use super::{Date, DateTime};

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Every second.
    Secondly,
    /// Every minute.
    Minutely,
    /// Every hour.
    Hourly,
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every year.
    Yearly,
}

impl Frequency {
    /// Returns the RFC 5545 token for this frequency.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency token (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Some(Self::Secondly),
            "MINUTELY" => Some(Self::Minutely),
            "HOURLY" => Some(Self::Hourly),
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Weekday {
    /// Returns the two-letter RFC 5545 tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }

    /// Parses a two-letter day tag (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MO" => Some(Self::Monday),
            "TU" => Some(Self::Tuesday),
            "WE" => Some(Self::Wednesday),
            "TH" => Some(Self::Thursday),
            "FR" => Some(Self::Friday),
            "SA" => Some(Self::Saturday),
            "SU" => Some(Self::Sunday),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A BYDAY entry: a weekday with an optional ordinal (e.g. `-1FR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Ordinal within the period (`1` = first, `-1` = last), if given.
    pub ordinal: Option<i8>,
    /// Day of the week.
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Creates an entry matching every occurrence of the weekday.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ordinal) = self.ordinal {
            write!(f, "{ordinal}")?;
        }
        f.write_str(self.weekday.as_str())
    }
}

/// An UNTIL bound: a date or a date-time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RRuleUntil {
    /// Date-only bound.
    Date(Date),
    /// Date-time bound.
    DateTime(DateTime),
}

impl fmt::Display for RRuleUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{date}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

/// A recurrence rule: the RECUR parts the agenda pipeline understands.
///
/// `COUNT` and `UNTIL` may both be present after parsing; consumers decide
/// how to treat the conflict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RRule {
    /// FREQ part.
    pub freq: Option<Frequency>,
    /// INTERVAL part.
    pub interval: Option<u32>,
    /// COUNT part.
    pub count: Option<u32>,
    /// UNTIL part.
    pub until: Option<RRuleUntil>,
    /// WKST part (week-start day).
    pub wkst: Option<Weekday>,
    /// BYDAY entries in source order.
    pub by_day: Vec<WeekdayNum>,
    /// BYMONTH values.
    pub by_month: Vec<u8>,
    /// BYMONTHDAY values.
    pub by_monthday: Vec<i8>,
}

impl RRule {
    /// Creates an empty rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DAILY rule.
    #[must_use]
    pub fn daily() -> Self {
        Self {
            freq: Some(Frequency::Daily),
            ..Self::default()
        }
    }

    /// Creates a WEEKLY rule.
    #[must_use]
    pub fn weekly() -> Self {
        Self {
            freq: Some(Frequency::Weekly),
            ..Self::default()
        }
    }

    /// Creates a YEARLY rule.
    #[must_use]
    pub fn yearly() -> Self {
        Self {
            freq: Some(Frequency::Yearly),
            ..Self::default()
        }
    }

    /// Sets INTERVAL.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Sets COUNT.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets UNTIL to a date-time bound.
    #[must_use]
    pub fn with_until_datetime(mut self, until: DateTime) -> Self {
        self.until = Some(RRuleUntil::DateTime(until));
        self
    }

    /// Sets UNTIL to a date bound.
    #[must_use]
    pub fn with_until_date(mut self, until: Date) -> Self {
        self.until = Some(RRuleUntil::Date(until));
        self
    }

    /// Sets BYDAY to plain (ordinal-less) weekday entries.
    #[must_use]
    pub fn with_by_day(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.by_day = days.into_iter().map(WeekdayNum::every).collect();
        self
    }

    /// Sets WKST.
    #[must_use]
    pub fn with_wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = Some(wkst);
        self
    }
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(freq) = self.freq {
            parts.push(format!("FREQ={freq}"));
        }
        if let Some(interval) = self.interval {
            parts.push(format!("INTERVAL={interval}"));
        }
        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }
        if let Some(until) = &self.until {
            parts.push(format!("UNTIL={until}"));
        }
        if let Some(wkst) = self.wkst {
            parts.push(format!("WKST={wkst}"));
        }
        if !self.by_day.is_empty() {
            let days: Vec<String> = self.by_day.iter().map(ToString::to_string).collect();
            parts.push(format!("BYDAY={}", days.join(",")));
        }
        if !self.by_month.is_empty() {
            let months: Vec<String> = self.by_month.iter().map(ToString::to_string).collect();
            parts.push(format!("BYMONTH={}", months.join(",")));
        }
        if !self.by_monthday.is_empty() {
            let days: Vec<String> = self.by_monthday.iter().map(ToString::to_string).collect();
            parts.push(format!("BYMONTHDAY={}", days.join(",")));
        }
        f.write_str(&parts.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_parses_case_insensitively() {
        assert_eq!(Frequency::parse("weekly"), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse("YEARLY"), Some(Frequency::Yearly));
        assert_eq!(Frequency::parse("FORTNIGHTLY"), None);
    }

    #[test]
    fn weekday_tags_round_trip() {
        for tag in ["MO", "TU", "WE", "TH", "FR", "SA", "SU"] {
            let day = Weekday::parse(tag).unwrap();
            assert_eq!(day.as_str(), tag);
        }
    }

    #[test]
    fn display_writes_known_parts() {
        let rrule = RRule::weekly()
            .with_count(5)
            .with_by_day([Weekday::Monday, Weekday::Wednesday])
            .with_wkst(Weekday::Sunday);
        assert_eq!(rrule.to_string(), "FREQ=WEEKLY;COUNT=5;WKST=SU;BYDAY=MO,WE");
    }

    #[test]
    fn display_includes_ordinals() {
        let mut rrule = RRule::new();
        rrule.freq = Some(Frequency::Monthly);
        rrule.by_day = vec![WeekdayNum {
            ordinal: Some(-1),
            weekday: Weekday::Friday,
        }];
        assert_eq!(rrule.to_string(), "FREQ=MONTHLY;BYDAY=-1FR");
    }
}
