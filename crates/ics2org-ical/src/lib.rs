//! iCalendar (RFC 5545) data model and parser.
//!
//! [`parse::parse`] turns calendar text into an [`ICalendar`] component tree
//! with typed property values. Only the slice of RFC 5545 an agenda pipeline
//! consumes is typed (dates, date-times, durations, recurrence rules,
//! integers); every other property is kept as unescaped text so nothing is
//! lost from the tree.

pub mod core;
pub mod parse;

pub use self::core::{
    Component, ComponentKind, ContentLine, Date, DateTime, DateTimeForm, Duration, Frequency,
    ICalendar, Parameter, Property, RRule, RRuleUntil, Value, Weekday, WeekdayNum,
};
pub use self::parse::{ParseError, ParseErrorKind, ParseResult};
