//! The conversion pipeline from calendar text to Org agenda text.

use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use ics2org_agenda::{effective_attendee, is_declined, render_event};
use ics2org_core::Settings;
use ics2org_expand::{expand, Schedule, TimeZoneResolver, Window};
use ics2org_ical::ParseError;

/// ## Summary
/// Converts calendar text into Org agenda text.
///
/// Occurrences are expanded into a window reaching `settings.window_days`
/// days to both sides of `now` and rendered in the `display` timezone.
/// Events whose schedule cannot be built are logged and skipped.
///
/// ## Errors
/// Returns an error when the input is not a parsable VCALENDAR document.
pub fn convert(
    input: &str,
    settings: &Settings,
    display: Tz,
    now: DateTime<Utc>,
) -> Result<String, ParseError> {
    let calendar = ics2org_ical::parse::parse(input)?;
    let attendee = effective_attendee(calendar.calendar_name(), &settings.attendee);
    let window = Window::around(now, settings.window_days);
    let mut resolver = TimeZoneResolver::new();

    let mut out = String::new();
    for event in calendar.events() {
        let schedule = match Schedule::from_event(event, &mut resolver, display) {
            Ok(schedule) => schedule,
            Err(error) => {
                tracing::warn!(
                    summary = event.summary().unwrap_or_default(),
                    uid = event.uid().unwrap_or_default(),
                    error = %error,
                    "Skipping event"
                );
                continue;
            }
        };
        let declined = is_declined(event, &attendee);
        for occurrence in expand(&schedule, window) {
            render_event(
                &mut out,
                event,
                occurrence,
                display,
                &settings.recur_tag,
                declined,
            );
        }
    }
    Ok(out)
}

/// ## Summary
/// Reads the calendar source from `path`, or stdin when `path` is `None`.
///
/// ## Errors
/// Returns an error when the file or stream cannot be read.
pub fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// ## Summary
/// Writes the agenda to `path`, or stdout when `path` is `None`.
///
/// ## Errors
/// Returns an error when the file or stream cannot be written.
pub fn write_output(path: Option<&Path>, agenda: &str) -> std::io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, agenda),
        None => std::io::stdout().lock().write_all(agenda.as_bytes()),
    }
}
