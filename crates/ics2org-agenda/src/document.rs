//! Org document rendering of event occurrences.

use chrono_tz::Tz;
use ics2org_expand::Occurrence;
use ics2org_ical::Component;

use crate::timestamp::{org_date, org_datetime};

/// Appends one Org entry for a single occurrence of an event.
///
/// The entry is a top-level heading, an active timestamp line, a blank
/// line, then optional description and location list items, and a final
/// blank line. Recurring occurrences get `recur_tag` glued onto the end
/// of the heading line, followed by an extra blank line.
pub fn render_event(
    out: &mut String,
    event: &Component,
    occurrence: Occurrence,
    display: Tz,
    recur_tag: &str,
    declined: bool,
) {
    let summary = event.summary().unwrap_or_default();
    let summary = if summary.is_empty() { "(No title)" } else { summary };
    out.push_str("* ");
    if declined {
        out.push_str("Declined: ");
    }
    out.push_str(summary);
    if occurrence.recurring && !recur_tag.is_empty() {
        out.push_str(recur_tag);
        out.push('\n');
    }
    out.push('\n');

    if occurrence.all_day {
        // DTEND is exclusive; the last covered day is one before it.
        let last_day = occurrence.end - chrono::Duration::days(1);
        out.push_str(&org_date(occurrence.start, display));
        out.push_str("--");
        out.push_str(&org_date(last_day, display));
    } else {
        let start = org_datetime(occurrence.start, display);
        let end = org_datetime(occurrence.end, display);
        out.push_str(&start);
        if start != end {
            out.push_str("--");
            out.push_str(&end);
        }
    }
    out.push('\n');
    out.push('\n');

    if let Some(description) = event.description()
        && !description.is_empty()
    {
        out.push_str("- ");
        out.push_str(description);
        out.push('\n');
    }
    match event.location() {
        Some(location) if location.starts_with("http") => {
            out.push_str("- [[");
            out.push_str(location);
            out.push_str("]]\n");
        }
        Some(location) if !location.is_empty() => {
            out.push_str("- ");
            out.push_str(location);
            out.push('\n');
        }
        _ => {}
    }
    out.push('\n');
}
