//! The half-open UTC window that bounds an expansion.

use chrono::{DateTime, Utc};

/// A `[start, end)` UTC instant range.
///
/// Occurrences are materialized only inside the window; an occurrence
/// starting exactly at `end` is never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Builds the window `center ± days`.
    #[must_use]
    pub fn around(center: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: center - chrono::Duration::days(days),
            end: center + chrono::Duration::days(days),
        }
    }

    /// Strict overlap test: `start < window.end && end > window.start`.
    ///
    /// A zero-duration span sitting exactly on either boundary does not
    /// overlap.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}
