//! Org-mode active timestamp formatting.

use chrono::DateTime;
use chrono_tz::Tz;

/// Formats an instant as an Org active timestamp with time of day,
/// e.g. `<2016-10-22 Sat 16:00>`, converted into the display timezone.
#[must_use]
pub fn org_datetime(instant: DateTime<Tz>, display: Tz) -> String {
    instant
        .with_timezone(&display)
        .format("<%Y-%m-%d %a %H:%M>")
        .to_string()
}

/// Formats an instant as a date-only Org active timestamp,
/// e.g. `<2016-10-22 Sat>`, converted into the display timezone.
#[must_use]
pub fn org_date(instant: DateTime<Tz>, display: Tz) -> String {
    instant
        .with_timezone(&display)
        .format("<%Y-%m-%d %a>")
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Tz;

    use super::{org_date, org_datetime};

    #[test]
    fn datetime_renders_in_the_display_timezone() {
        let instant = Tz::UTC.with_ymd_and_hms(2016, 10, 22, 23, 0, 0).unwrap();

        let rendered = org_datetime(instant, Tz::America__Los_Angeles);

        assert_eq!(rendered, "<2016-10-22 Sat 16:00>");
    }

    #[test]
    fn date_drops_the_time_of_day() {
        let instant = Tz::UTC.with_ymd_and_hms(2016, 10, 22, 23, 0, 0).unwrap();

        let rendered = org_date(instant, Tz::America__Los_Angeles);

        assert_eq!(rendered, "<2016-10-22 Sat>");
    }

    #[test]
    fn conversion_can_move_the_calendar_date() {
        // 23:00 UTC is already the next day in Berlin.
        let instant = Tz::UTC.with_ymd_and_hms(2016, 10, 22, 23, 0, 0).unwrap();

        let rendered = org_date(instant, Tz::Europe__Berlin);

        assert_eq!(rendered, "<2016-10-23 Sun>");
    }

    #[test]
    fn minutes_render_zero_padded() {
        let instant = Tz::America__New_York
            .with_ymd_and_hms(2020, 1, 6, 9, 5, 0)
            .unwrap();

        let rendered = org_datetime(instant, Tz::America__New_York);

        assert_eq!(rendered, "<2020-01-06 Mon 09:05>");
    }
}
