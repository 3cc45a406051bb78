//! The `ics2org` binary: read an iCalendar export, write an Org agenda.

pub mod cli;
pub mod convert;
