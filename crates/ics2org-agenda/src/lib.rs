//! Org-mode agenda rendering for expanded calendar occurrences.
//!
//! Each occurrence becomes one top-level Org heading followed by an
//! active timestamp (or timestamp range), then the event description
//! and location as list items. Timestamps are rendered in a single
//! display timezone regardless of the event's own zone.

pub mod attendance;
pub mod document;
pub mod timestamp;

pub use self::attendance::{effective_attendee, is_declined};
pub use self::document::render_event;
pub use self::timestamp::{org_date, org_datetime};
