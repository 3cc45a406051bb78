//! Parse error types.

use thiserror::Error;

/// Result alias for parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// What went wrong while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Content line with no property name before the separator.
    #[error("missing property name")]
    MissingPropertyName,
    /// Property name containing characters outside `A-Z a-z 0-9 -`.
    #[error("invalid property name")]
    InvalidPropertyName,
    /// Content line with no `:` separating name/parameters from the value.
    #[error("missing colon separator")]
    MissingColon,
    /// Parameter without `=` or with a malformed name.
    #[error("invalid parameter")]
    InvalidParameter,
    /// Quoted parameter value without a closing quote.
    #[error("unclosed quoted string")]
    UnclosedQuote,
    /// Malformed DATE value.
    #[error("invalid date")]
    InvalidDate,
    /// Malformed time-of-day.
    #[error("invalid time")]
    InvalidTime,
    /// Malformed DATE-TIME value.
    #[error("invalid date-time")]
    InvalidDateTime,
    /// Malformed DURATION value.
    #[error("invalid duration")]
    InvalidDuration,
    /// Malformed RECUR value.
    #[error("invalid recurrence rule")]
    InvalidRRule,
    /// FREQ token that is not an RFC 5545 frequency.
    #[error("invalid frequency")]
    InvalidFrequency,
    /// BYDAY entry that is not a weekday tag.
    #[error("invalid weekday")]
    InvalidWeekday,
    /// Malformed INTEGER value.
    #[error("invalid integer")]
    InvalidInteger,
    /// Document does not begin with `BEGIN:VCALENDAR`.
    #[error("missing BEGIN")]
    MissingBegin,
    /// Component opened but never closed.
    #[error("missing END")]
    MissingEnd,
    /// `END:` naming a different component than the open `BEGIN:`.
    #[error("mismatched BEGIN/END")]
    MismatchedComponent,
}

/// A parse failure with its source position and optional offending context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}{}", .context.as_ref().map(|c| format!(": {c}")).unwrap_or_default())]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// 1-based line in the unfolded input.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    /// Offending text or explanatory detail.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates an error at a source position.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Attaches offending text or detail to the error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
