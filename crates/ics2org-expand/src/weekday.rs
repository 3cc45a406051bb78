//! Weekday numbering relative to a week-start convention.

use ics2org_ical::Weekday;

/// Zero-based weekday index with Monday first.
#[must_use]
pub const fn monday_index(day: Weekday) -> u32 {
    match day {
        Weekday::Monday => 0,
        Weekday::Tuesday => 1,
        Weekday::Wednesday => 2,
        Weekday::Thursday => 3,
        Weekday::Friday => 4,
        Weekday::Saturday => 5,
        Weekday::Sunday => 6,
    }
}

/// Zero-based offset of `day` counting forward from `week_start`.
///
/// This gives `BYDAY` tags and candidate dates a shared numbering, so a
/// rule with `WKST=SU` filters the same days however the week is phrased.
#[must_use]
pub const fn offset_from_week_start(week_start: Weekday, day: Weekday) -> u32 {
    (monday_index(day) + 7 - monday_index(week_start)) % 7
}

/// Converts a `chrono` weekday into the iCalendar weekday tag.
#[must_use]
pub const fn from_chrono(day: chrono::Weekday) -> Weekday {
    match day {
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat => Weekday::Saturday,
        chrono::Weekday::Sun => Weekday::Sunday,
    }
}
