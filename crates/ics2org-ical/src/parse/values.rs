//! Typed value parsing: dates, date-times, durations, recurrence rules.
#![expect(
    clippy::map_err_ignore,
    reason = "number parse failures all become positioned parse errors; the std error adds nothing"
)]

use crate::core::{
    Date, DateTime, DateTimeForm, Duration, Frequency, RRule, RRuleUntil, Weekday, WeekdayNum,
};

use super::{ParseError, ParseErrorKind, ParseResult};

/// Parses a DATE value (`YYYYMMDD`).
///
/// ## Errors
///
/// Returns `InvalidDate` when the text is not eight digits or the month or
/// day is out of range.
pub fn parse_date(s: &str, line: usize, column: usize) -> ParseResult<Date> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, column).with_context(s));
    }
    let year = s[0..4]
        .parse::<u16>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, column))?;
    let month = s[4..6]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, column))?;
    let day = s[6..8]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, column))?;
    if month == 0 || month > 12 || day == 0 || day > 31 {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, column).with_context(s));
    }
    Ok(Date::new(year, month, day))
}

/// Parses the `HHMMSS[Z]` part of a DATE-TIME.
fn parse_time_parts(s: &str, line: usize, column: usize) -> ParseResult<(u8, u8, u8, bool)> {
    let (digits, utc) = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => (rest, true),
        None => (s, false),
    };
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, column).with_context(s));
    }
    let hour = digits[0..2]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, column))?;
    let minute = digits[2..4]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, column))?;
    let second = digits[4..6]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, column))?;
    if hour > 23 || minute > 59 || second > 60 {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, column).with_context(s));
    }
    Ok((hour, minute, second, utc))
}

/// Parses a DATE-TIME value (`YYYYMMDDTHHMMSS[Z]`), zoned when `tzid` is
/// given. A trailing `Z` wins over a `TZID`.
///
/// ## Errors
///
/// Returns `InvalidDateTime` when the `T` separator is missing, or the
/// corresponding error when the date or time part is malformed.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    column: usize,
) -> ParseResult<DateTime> {
    let Some((date_part, time_part)) = s.split_once(['T', 't']) else {
        return Err(ParseError::new(ParseErrorKind::InvalidDateTime, line, column).with_context(s));
    };
    let date = parse_date(date_part, line, column)?;
    let (hour, minute, second, utc) = parse_time_parts(time_part, line, column)?;
    let form = if utc {
        DateTimeForm::Utc
    } else if let Some(tzid) = tzid {
        DateTimeForm::Zoned {
            tzid: tzid.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };
    Ok(DateTime {
        date,
        hour,
        minute,
        second,
        form,
    })
}

/// Parses a DURATION value (`[+/-]P[nW][nD][T[nH][nM][nS]]`).
///
/// ## Errors
///
/// Returns `InvalidDuration` on a missing `P`, a designator without digits,
/// trailing digits without a designator, or a time designator outside the
/// `T` part.
pub fn parse_duration(s: &str, line: usize, column: usize) -> ParseResult<Duration> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, column).with_context(s);

    let (body, negative) = match s.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (s.strip_prefix('+').unwrap_or(s), false),
    };
    let Some(body) = body.strip_prefix(['P', 'p']) else {
        return Err(err());
    };
    if body.is_empty() {
        return Err(err());
    }

    let mut duration = Duration {
        negative,
        ..Duration::zero()
    };
    let mut digits = String::new();
    let mut in_time = false;
    for ch in body.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if matches!(ch, 'T' | 't') {
            if !digits.is_empty() {
                return Err(err());
            }
            in_time = true;
            continue;
        }
        let amount: u32 = digits.parse().map_err(|_| err())?;
        digits.clear();
        match (ch.to_ascii_uppercase(), in_time) {
            ('W', false) => duration.weeks = amount,
            ('D', false) => duration.days = amount,
            ('H', true) => duration.hours = amount,
            ('M', true) => duration.minutes = amount,
            ('S', true) => duration.seconds = amount,
            _ => return Err(err()),
        }
    }
    if !digits.is_empty() {
        return Err(err());
    }
    Ok(duration)
}

/// Parses a RECUR value (`FREQ=WEEKLY;BYDAY=MO,WE;…`).
///
/// Unknown parts are ignored with a debug log. `COUNT` and `UNTIL` are both
/// carried when both appear; resolving that conflict is the consumer's job.
///
/// ## Errors
///
/// Returns an error when a part is missing its `=` or a known part has a
/// malformed value.
pub fn parse_rrule(s: &str, line: usize, column: usize) -> ParseResult<RRule> {
    let mut rrule = RRule::new();
    for part in s.split(';') {
        if part.is_empty() {
            continue;
        }
        let Some((name, value)) = part.split_once('=') else {
            return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, column).with_context(part));
        };
        parse_rrule_part(&mut rrule, &name.to_ascii_uppercase(), value, line, column)?;
    }
    Ok(rrule)
}

fn parse_rrule_part(
    rrule: &mut RRule,
    name: &str,
    value: &str,
    line: usize,
    column: usize,
) -> ParseResult<()> {
    match name {
        "FREQ" => {
            let freq = Frequency::parse(value).ok_or_else(|| {
                ParseError::new(ParseErrorKind::InvalidFrequency, line, column).with_context(value)
            })?;
            rrule.freq = Some(freq);
        }
        "INTERVAL" => rrule.interval = Some(parse_u32(value, line, column)?),
        "COUNT" => rrule.count = Some(parse_u32(value, line, column)?),
        "UNTIL" => rrule.until = Some(parse_until(value, line, column)?),
        "WKST" => {
            let wkst = Weekday::parse(value).ok_or_else(|| {
                ParseError::new(ParseErrorKind::InvalidWeekday, line, column).with_context(value)
            })?;
            rrule.wkst = Some(wkst);
        }
        "BYDAY" => rrule.by_day = parse_byday(value, line, column)?,
        "BYMONTH" => rrule.by_month = parse_u8_list(value, line, column)?,
        "BYMONTHDAY" => rrule.by_monthday = parse_i8_list(value, line, column)?,
        other => tracing::debug!(part = other, "Ignoring unsupported RRULE part"),
    }
    Ok(())
}

fn parse_until(s: &str, line: usize, column: usize) -> ParseResult<RRuleUntil> {
    if s.contains(['T', 't']) {
        Ok(RRuleUntil::DateTime(parse_datetime(s, None, line, column)?))
    } else {
        Ok(RRuleUntil::Date(parse_date(s, line, column)?))
    }
}

fn parse_byday(s: &str, line: usize, column: usize) -> ParseResult<Vec<WeekdayNum>> {
    s.split(',')
        .map(|entry| parse_weekday_num(entry.trim(), line, column))
        .collect()
}

/// Parses one BYDAY entry: an optional ordinal followed by a day tag.
fn parse_weekday_num(s: &str, line: usize, column: usize) -> ParseResult<WeekdayNum> {
    let err = || ParseError::new(ParseErrorKind::InvalidWeekday, line, column).with_context(s);
    if !s.is_ascii() || s.len() < 2 {
        return Err(err());
    }
    let split = s.len() - 2;
    let weekday = Weekday::parse(&s[split..]).ok_or_else(err)?;
    let ordinal = if split == 0 {
        None
    } else {
        Some(s[..split].parse::<i8>().map_err(|_| err())?)
    };
    Ok(WeekdayNum { ordinal, weekday })
}

fn parse_u32(s: &str, line: usize, column: usize) -> ParseResult<u32> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidInteger, line, column).with_context(s))
}

fn parse_u8_list(s: &str, line: usize, column: usize) -> ParseResult<Vec<u8>> {
    s.split(',')
        .map(|v| {
            v.trim().parse().map_err(|_| {
                ParseError::new(ParseErrorKind::InvalidInteger, line, column).with_context(v)
            })
        })
        .collect()
}

fn parse_i8_list(s: &str, line: usize, column: usize) -> ParseResult<Vec<i8>> {
    s.split(',')
        .map(|v| {
            v.trim().parse().map_err(|_| {
                ParseError::new(ParseErrorKind::InvalidInteger, line, column).with_context(v)
            })
        })
        .collect()
}

/// Parses an INTEGER value.
///
/// ## Errors
///
/// Returns `InvalidInteger` when the text is not a decimal integer.
pub fn parse_integer(s: &str, line: usize, column: usize) -> ParseResult<i32> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidInteger, line, column).with_context(s))
}

/// Unescapes TEXT values (RFC 5545 §3.3.11): `\n`/`\N`, `\,`, `\;`, `\\`.
///
/// An unknown escape drops the backslash and keeps the escaped character.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parses_basic_format() {
        assert_eq!(parse_date("20161023", 1, 1).unwrap(), Date::new(2016, 10, 23));
    }

    #[test]
    fn date_rejects_bad_input() {
        assert_eq!(parse_date("2016102", 1, 1).unwrap_err().kind, ParseErrorKind::InvalidDate);
        assert_eq!(parse_date("20161301", 1, 1).unwrap_err().kind, ParseErrorKind::InvalidDate);
        assert_eq!(parse_date("20161000", 1, 1).unwrap_err().kind, ParseErrorKind::InvalidDate);
        assert_eq!(parse_date("2016102a", 1, 1).unwrap_err().kind, ParseErrorKind::InvalidDate);
    }

    #[test]
    fn datetime_parses_utc_form() {
        let dt = parse_datetime("20161022T230000Z", None, 1, 1).unwrap();
        assert!(dt.is_utc());
        assert_eq!(dt.hour, 23);
    }

    #[test]
    fn datetime_parses_floating_form() {
        let dt = parse_datetime("20200513T130000", None, 1, 1).unwrap();
        assert_eq!(dt.form, DateTimeForm::Floating);
    }

    #[test]
    fn datetime_applies_tzid() {
        let dt = parse_datetime("20200513T130000", Some("America/New_York"), 1, 1).unwrap();
        assert_eq!(dt.tzid(), Some("America/New_York"));
    }

    #[test]
    fn datetime_z_wins_over_tzid() {
        let dt = parse_datetime("20200513T130000Z", Some("America/New_York"), 1, 1).unwrap();
        assert!(dt.is_utc());
    }

    #[test]
    fn datetime_requires_t_separator() {
        let err = parse_datetime("20200513130000", None, 2, 5).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDateTime);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 5);
    }

    #[test]
    fn duration_parses_weeks() {
        assert_eq!(parse_duration("P2W", 1, 1).unwrap(), Duration::weeks(2));
    }

    #[test]
    fn duration_parses_date_and_time_parts() {
        let duration = parse_duration("P1DT2H30M", 1, 1).unwrap();
        assert_eq!(duration.as_seconds(), 86_400 + 2 * 3_600 + 30 * 60);
    }

    #[test]
    fn duration_parses_signs() {
        let negative = parse_duration("-PT15M", 1, 1).unwrap();
        assert!(negative.negative);
        assert_eq!(negative.as_seconds(), -900);
        let positive = parse_duration("+PT1S", 1, 1).unwrap();
        assert_eq!(positive.as_seconds(), 1);
    }

    #[test]
    fn duration_rejects_malformed_input() {
        for input in ["15M", "P", "PT15", "P1H", "P1X"] {
            let err = parse_duration(input, 1, 1).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::InvalidDuration, "input: {input}");
        }
    }

    #[test]
    fn rrule_parses_known_parts() {
        let rrule = parse_rrule("FREQ=WEEKLY;WKST=SU;COUNT=5;BYDAY=TH", 1, 1).unwrap();
        assert_eq!(rrule.freq, Some(Frequency::Weekly));
        assert_eq!(rrule.wkst, Some(Weekday::Sunday));
        assert_eq!(rrule.count, Some(5));
        assert_eq!(rrule.by_day, vec![WeekdayNum::every(Weekday::Thursday)]);
    }

    #[test]
    fn rrule_parses_interval_and_until() {
        let rrule = parse_rrule("FREQ=WEEKLY;INTERVAL=2;UNTIL=20201008T035959Z;BYDAY=WE", 1, 1).unwrap();
        assert_eq!(rrule.interval, Some(2));
        let Some(RRuleUntil::DateTime(until)) = rrule.until else {
            panic!("expected a date-time UNTIL");
        };
        assert!(until.is_utc());
    }

    #[test]
    fn rrule_parses_date_until() {
        let rrule = parse_rrule("FREQ=DAILY;UNTIL=20200101", 1, 1).unwrap();
        assert_eq!(rrule.until, Some(RRuleUntil::Date(Date::new(2020, 1, 1))));
    }

    #[test]
    fn rrule_keeps_count_and_until_together() {
        let rrule = parse_rrule("FREQ=DAILY;COUNT=3;UNTIL=20200101T000000Z", 1, 1).unwrap();
        assert!(rrule.count.is_some());
        assert!(rrule.until.is_some());
    }

    #[test_log::test]
    fn rrule_ignores_unknown_parts() {
        let rrule = parse_rrule("FREQ=DAILY;BYSETPOS=1;X-EXT=foo", 1, 1).unwrap();
        assert_eq!(rrule.freq, Some(Frequency::Daily));
    }

    #[test]
    fn rrule_rejects_unknown_frequency_token() {
        let err = parse_rrule("FREQ=FORTNIGHTLY", 1, 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidFrequency);
    }

    #[test]
    fn rrule_rejects_part_without_equals() {
        let err = parse_rrule("FREQ", 1, 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidRRule);
    }

    #[test]
    fn byday_accepts_ordinals() {
        let rrule = parse_rrule("FREQ=MONTHLY;BYDAY=-1FR,2MO", 1, 1).unwrap();
        assert_eq!(rrule.by_day.len(), 2);
        assert_eq!(rrule.by_day[0].ordinal, Some(-1));
        assert_eq!(rrule.by_day[0].weekday, Weekday::Friday);
        assert_eq!(rrule.by_day[1].ordinal, Some(2));
    }

    #[test]
    fn byday_rejects_garbage() {
        let err = parse_rrule("FREQ=WEEKLY;BYDAY=XX", 1, 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidWeekday);
    }

    #[test]
    fn bymonth_parses_lists() {
        let rrule = parse_rrule("FREQ=YEARLY;BYMONTH=1,6,12;BYMONTHDAY=15", 1, 1).unwrap();
        assert_eq!(rrule.by_month, vec![1, 6, 12]);
        assert_eq!(rrule.by_monthday, vec![15]);
    }

    #[test]
    fn unescape_resolves_known_escapes() {
        assert_eq!(unescape_text("a\\nb"), "a\nb");
        assert_eq!(unescape_text("a\\Nb"), "a\nb");
        assert_eq!(unescape_text("x\\, y"), "x, y");
        assert_eq!(unescape_text("semi\\;"), "semi;");
        assert_eq!(unescape_text("back\\\\slash"), "back\\slash");
    }

    #[test]
    fn unescape_keeps_plain_text() {
        assert_eq!(unescape_text("nothing here"), "nothing here");
    }

    #[test]
    fn integer_parses_and_rejects() {
        assert_eq!(parse_integer("5", 1, 1).unwrap(), 5);
        assert_eq!(parse_integer("-3", 1, 1).unwrap(), -3);
        assert_eq!(parse_integer("x", 1, 1).unwrap_err().kind, ParseErrorKind::InvalidInteger);
    }
}
