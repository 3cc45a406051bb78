//! Attendance status of the configured attendee.

use ics2org_ical::Component;

/// Returns the `mailto:` address treated as the local attendee.
///
/// A calendar name containing `@` overrides the configured address;
/// Google Calendar exports name the calendar after its owner.
#[must_use]
pub fn effective_attendee(calendar_name: Option<&str>, configured: &str) -> String {
    match calendar_name {
        Some(name) if name.contains('@') => format!("mailto:{name}"),
        _ => format!("mailto:{configured}"),
    }
}

/// Returns true when the given attendee address declined the event.
///
/// The PARTSTAT parameter name is matched case-insensitively, but the
/// DECLINED value and the attendee address itself compare exactly.
#[must_use]
pub fn is_declined(event: &Component, attendee: &str) -> bool {
    event.get_properties("ATTENDEE").into_iter().any(|property| {
        property.raw_value == attendee
            && property
                .get_param_value("PARTSTAT")
                .is_some_and(|status| status == "DECLINED")
    })
}
