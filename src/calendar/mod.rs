//! Google Calendar collaborator: event shapes, day bucketing, and labels.
//!
//! The core consumes calendar data read-only as prompt context and as a
//! rendering hint; the only write path is the explicit push-confirmation
//! flow in [`client`].

use serde::{Deserialize, Serialize};

pub mod client;
pub mod demo;

// ---------------------------------------------------------------------------
// Event shape
// ---------------------------------------------------------------------------

/// A Google Calendar event as read from and written to the API.
///
/// An all-day event carries `start.date`/`end.date` (exclusive end date);
/// a timed event carries `start.date_time`/`end.date_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event identifier; empty for events not yet created upstream.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Event title.
    #[serde(default)]
    pub summary: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start of the event.
    pub start: EventTime,
    /// End of the event (exclusive date for all-day events).
    pub end: EventTime,
    /// Google color id; doubles as the ownership tag (see [`owner_label`]).
    #[serde(rename = "colorId", default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
}

/// Either an all-day date or an RFC 3339 datetime.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventTime {
    /// `YYYY-MM-DD`, set for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// RFC 3339 datetime, set for timed events.
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// IANA timezone, set when pushing timed events.
    #[serde(rename = "timeZone", default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    /// An all-day time for `date`.
    pub fn all_day(date: &str) -> Self {
        Self {
            date: Some(date.to_owned()),
            ..Self::default()
        }
    }

    /// A timed time for an RFC 3339 `date_time`.
    pub fn timed(date_time: &str) -> Self {
        Self {
            date_time: Some(date_time.to_owned()),
            ..Self::default()
        }
    }

    /// The ISO calendar date this time falls on, if any is set.
    pub fn day(&self) -> Option<&str> {
        if let Some(d) = self.date.as_deref() {
            return Some(d);
        }
        self.date_time
            .as_deref()
            .map(|dt| dt.split('T').next().unwrap_or(dt))
    }
}

impl CalendarEvent {
    /// Whether this event occurs on the ISO day `day`.
    ///
    /// All-day events span `[start.date, end.date)` — the end date is
    /// exclusive per the Calendar API. Timed events match on the start's
    /// calendar date. Fixed-width ISO dates compare correctly as strings.
    pub fn occurs_on(&self, day: &str) -> bool {
        if let Some(start) = self.start.date.as_deref() {
            let end = self.end.date.as_deref().unwrap_or(start);
            return day >= start && day < end;
        }
        self.start.day() == Some(day)
    }
}

/// Filter `events` down to those occurring on `day`, preserving order.
pub fn events_for_day<'a>(events: &'a [CalendarEvent], day: &str) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|ev| ev.occurs_on(day)).collect()
}

// ---------------------------------------------------------------------------
// Ownership labels
// ---------------------------------------------------------------------------

/// Ownership tag for a color id, or `None` for untagged colors.
///
/// The mapping mirrors the color legend in the system prompt; the render
/// layer falls back to a default treatment for unmapped ids.
pub fn owner_label(color_id: Option<&str>) -> Option<&'static str> {
    match color_id? {
        "1" => Some("Partner A"),
        "2" => Some("Partner B"),
        "3" => Some("Family"),
        "4" => Some("Kids"),
        "5" => Some("Chores"),
        "10" => Some("Exercise"),
        _ => None,
    }
}
