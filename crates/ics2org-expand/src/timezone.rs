//! Timezone resolution and localization of naive wall times.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Error during timezone resolution.
#[derive(Debug, thiserror::Error)]
pub enum TimezoneError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Resolver for timezone identifiers.
///
/// Maps `TZID` parameter values to IANA timezones, tolerating the
/// non-canonical spellings common in calendar exports, and caches
/// resolutions per run.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    /// Creates a new timezone resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    ///
    /// Returns `TimezoneError::UnknownTimezone` if the TZID cannot be
    /// resolved as an IANA timezone name.
    ///
    /// ## Side Effects
    ///
    /// Caches successful resolutions to avoid repeated parsing.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, TimezoneError> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(normalized)
            .map_err(|_e| TimezoneError::UnknownTimezone(tzid.to_string()))?;

        self.cache.insert(tzid.to_string(), tz);

        Ok(tz)
    }
}

/// Normalizes common calendar-client timezone identifiers to IANA names.
///
/// Several producers prefix TZIDs with a pseudo-path; the trailing part is
/// the IANA name.
fn normalize_tzid(tzid: &str) -> &str {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .or_else(|| tzid.strip_prefix("/freeassociation.sourceforge.net/"))
        .unwrap_or(tzid);
    stripped.strip_prefix('/').unwrap_or(stripped)
}

/// ## Summary
/// Localizes a naive wall time in the given timezone.
///
/// Handles DST transitions: an ambiguous wall time (fold) resolves to the
/// earlier of the two instants, a nonexistent wall time (gap) shifts
/// forward by one hour.
#[must_use]
pub fn localize(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _later) => earlier,
        LocalResult::None => localize(tz, local + chrono::Duration::hours(1)),
    }
}
