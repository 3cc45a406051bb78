//! iCalendar core models (RFC 5545).
//!
//! Data structures for parsed calendar content: the component tree, typed
//! property values, and the recurrence-rule model. Properties whose value
//! type is not modeled stay as text.

mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{Date, DateTime, DateTimeForm};
pub use duration::Duration;
pub use parameter::Parameter;
pub use property::{ContentLine, Property};
pub use rrule::{Frequency, RRule, RRuleUntil, Weekday, WeekdayNum};
pub use value::Value;
