//! Component-tree assembly over the unfolded content lines.

use crate::core::{Component, ComponentKind, ContentLine, ICalendar, Property, Value};

use super::lexer::{parse_content_line, split_lines};
use super::values::{
    parse_date, parse_datetime, parse_duration, parse_integer, parse_rrule, unescape_text,
};
use super::{ParseError, ParseErrorKind, ParseResult};

/// How a property's raw value should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    Date,
    DateTime,
    Duration,
    Integer,
    Recur,
    Text,
    Unknown,
}

impl ValueType {
    fn from_param(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "INTEGER" => Self::Integer,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            _ => Self::Unknown,
        }
    }
}

/// Parses an iCalendar document into its component tree.
///
/// The document must open with `BEGIN:VCALENDAR`; anything after the
/// matching `END:VCALENDAR` is ignored.
///
/// ## Errors
///
/// Returns a positioned [`ParseError`] on malformed content lines,
/// malformed typed values, or unbalanced `BEGIN`/`END` pairs.
#[tracing::instrument(skip(input), fields(len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    tracing::debug!("Parsing iCalendar document");
    let mut lines = split_lines(input).into_iter();
    let Some((line_num, line)) = lines.next() else {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1)
            .with_context("empty document"));
    };
    let first = parse_content_line(&line, line_num)?;
    if !first.name.eq_ignore_ascii_case("BEGIN") {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
            .with_context(first.name));
    }
    let root = parse_component(&mut lines, &first.raw_value.to_ascii_uppercase(), line_num)?;
    if root.kind != ComponentKind::Calendar {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
            .with_context(format!("expected VCALENDAR, got {}", root.name)));
    }
    let calendar = ICalendar { root };
    tracing::debug!(events = calendar.events().len(), "Parsed iCalendar document");
    Ok(calendar)
}

fn parse_component(
    lines: &mut impl Iterator<Item = (usize, String)>,
    name: &str,
    begin_line: usize,
) -> ParseResult<Component> {
    let mut component = Component::named(name);
    let mut last_line = begin_line;
    loop {
        let Some((line_num, line)) = lines.next() else {
            return Err(ParseError::new(ParseErrorKind::MissingEnd, last_line, 1)
                .with_context(format!("unterminated {}", component.name)));
        };
        last_line = line_num;
        let content_line = parse_content_line(&line, line_num)?;
        if content_line.name.eq_ignore_ascii_case("BEGIN") {
            let child =
                parse_component(lines, &content_line.raw_value.to_ascii_uppercase(), line_num)?;
            component.add_child(child);
        } else if content_line.name.eq_ignore_ascii_case("END") {
            let end_name = content_line.raw_value.to_ascii_uppercase();
            if end_name == component.name {
                return Ok(component);
            }
            return Err(ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                .with_context(format!("expected END:{}, got END:{end_name}", component.name)));
        } else {
            component.add_property(parse_property(content_line, line_num)?);
        }
    }
}

fn parse_property(content_line: ContentLine, line_num: usize) -> ParseResult<Property> {
    let value = match resolve_value_type(&content_line) {
        ValueType::Date => Value::Date(parse_date(&content_line.raw_value, line_num, 1)?),
        ValueType::DateTime => Value::DateTime(parse_datetime(
            &content_line.raw_value,
            content_line.tzid(),
            line_num,
            1,
        )?),
        ValueType::Duration => {
            Value::Duration(parse_duration(&content_line.raw_value, line_num, 1)?)
        }
        ValueType::Integer => Value::Integer(parse_integer(&content_line.raw_value, line_num, 1)?),
        ValueType::Recur => {
            Value::Recur(Box::new(parse_rrule(&content_line.raw_value, line_num, 1)?))
        }
        ValueType::Text => Value::Text(unescape_text(&content_line.raw_value)),
        ValueType::Unknown => Value::Unknown(content_line.raw_value.clone()),
    };
    Ok(Property {
        name: content_line.name,
        params: content_line.params,
        value,
        raw_value: content_line.raw_value,
    })
}

fn resolve_value_type(content_line: &ContentLine) -> ValueType {
    if let Some(explicit) = content_line.param_value("VALUE") {
        return ValueType::from_param(explicit);
    }
    match content_line.name.as_str() {
        "DTSTART" | "DTEND" | "DTSTAMP" | "CREATED" | "LAST-MODIFIED" | "RECURRENCE-ID" => {
            // Eight bare digits is a DATE even without VALUE=DATE.
            if content_line.raw_value.len() == 8 && !content_line.raw_value.contains('T') {
                ValueType::Date
            } else {
                ValueType::DateTime
            }
        }
        "DURATION" => ValueType::Duration,
        "TRIGGER" => {
            if content_line.raw_value.starts_with(['P', 'p', '-', '+']) {
                ValueType::Duration
            } else {
                ValueType::DateTime
            }
        }
        "PRIORITY" | "SEQUENCE" | "REPEAT" => ValueType::Integer,
        "RRULE" => ValueType::Recur,
        _ => ValueType::Text,
    }
}
