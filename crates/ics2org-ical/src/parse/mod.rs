//! iCalendar text parsing.
//!
//! Parsing runs in three stages: the lexer unfolds physical lines and splits
//! each content line into name, parameters, and raw value; the value parsers
//! type individual values; and the parser assembles the `BEGIN`/`END`
//! component tree.

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use parser::parse;
