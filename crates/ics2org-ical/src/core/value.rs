//! Typed property values.

use super::{Date, DateTime, Duration, RRule};

/// A typed property value.
///
/// The parser picks the variant from the property name and an explicit
/// `VALUE` parameter when present; everything unrecognized lands in
/// [`Value::Text`] (unescaped) or [`Value::Unknown`] (raw).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// DATE value.
    Date(Date),
    /// DATE-TIME value.
    DateTime(DateTime),
    /// DURATION value.
    Duration(Duration),
    /// INTEGER value.
    Integer(i32),
    /// RECUR value (recurrence rule).
    Recur(Box<RRule>),
    /// TEXT value with backslash escapes resolved.
    Text(String),
    /// Value of an unrecognized `VALUE` type, kept raw.
    Unknown(String),
}

impl Value {
    /// Returns the date, if this is a DATE value.
    #[must_use]
    pub const fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Returns the date-time, if this is a DATE-TIME value.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the duration, if this is a DURATION value.
    #[must_use]
    pub const fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(duration) => Some(*duration),
            _ => None,
        }
    }

    /// Returns the integer, if this is an INTEGER value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the recurrence rule, if this is a RECUR value.
    #[must_use]
    pub fn as_recur(&self) -> Option<&RRule> {
        match self {
            Self::Recur(rrule) => Some(rrule),
            _ => None,
        }
    }

    /// Returns the text, if this is a TEXT value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_only_their_variant() {
        let value = Value::Integer(5);
        assert_eq!(value.as_integer(), Some(5));
        assert_eq!(value.as_text(), None);
        assert_eq!(value.as_date(), None);

        let value = Value::Text("hello".into());
        assert_eq!(value.as_text(), Some("hello"));
        assert_eq!(value.as_integer(), None);
    }
}
