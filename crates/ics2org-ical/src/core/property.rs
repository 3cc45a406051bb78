//! Properties and content lines (RFC 5545 §3.1).

use super::{Date, DateTime, Duration, Parameter, RRule, Value};

/// One unfolded content line, split into name, parameters, and raw value.
///
/// This is the lexer's output; the value has not been typed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (uppercased).
    pub name: String,
    /// Parameters in source order.
    pub params: Vec<Parameter>,
    /// Raw value text.
    pub raw_value: String,
}

impl ContentLine {
    /// Returns the first value of the named parameter (case-insensitive).
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .and_then(Parameter::value)
    }

    /// Returns the `TZID` parameter value, if any.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.param_value("TZID")
    }
}

/// A typed property: a content line with its value parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name (uppercased).
    pub name: String,
    /// Parameters in source order.
    pub params: Vec<Parameter>,
    /// Typed value.
    pub value: Value,
    /// Raw value text as written in the source.
    pub raw_value: String,
}

impl Property {
    /// Creates a TEXT property.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: value.clone(),
            value: Value::Text(value),
        }
    }

    /// Creates a DATE-TIME property, attaching a `TZID` parameter for zoned
    /// forms.
    #[must_use]
    pub fn datetime(name: impl Into<String>, value: DateTime) -> Self {
        let mut params = Vec::new();
        if let Some(tzid) = value.tzid() {
            params.push(Parameter::tzid(tzid));
        }
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            raw_value: value.to_string(),
            value: Value::DateTime(value),
        }
    }

    /// Creates a DATE property (`VALUE=DATE`).
    #[must_use]
    pub fn date(name: impl Into<String>, value: Date) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: vec![Parameter::new("VALUE", "DATE")],
            raw_value: value.to_string(),
            value: Value::Date(value),
        }
    }

    /// Creates a DURATION property.
    #[must_use]
    pub fn duration(name: impl Into<String>, value: Duration) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: value.to_string(),
            value: Value::Duration(value),
        }
    }

    /// Creates an RRULE property.
    #[must_use]
    pub fn rrule(value: RRule) -> Self {
        let raw_value = value.to_string();
        Self {
            name: "RRULE".to_string(),
            params: Vec::new(),
            value: Value::Recur(Box::new(value)),
            raw_value,
        }
    }

    /// Adds a parameter.
    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    /// Returns the first parameter with the given name (case-insensitive).
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the first value of the named parameter (case-insensitive).
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name).and_then(Parameter::value)
    }

    /// Returns the text value, if this is a TEXT property.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Returns the date-time value, if any.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        self.value.as_datetime()
    }

    /// Returns the date value, if any.
    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        self.value.as_date()
    }

    /// Returns the duration value, if any.
    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        self.value.as_duration()
    }

    /// Returns the recurrence rule, if this is a RECUR property.
    #[must_use]
    pub fn as_rrule(&self) -> Option<&RRule> {
        self.value.as_recur()
    }
}
