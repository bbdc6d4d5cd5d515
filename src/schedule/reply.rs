//! One-turn integration: raw model reply in, classified outcome out.
//!
//! Runs the extractor, decoder, and normalizer over each tagged section and
//! classifies the turn so the session knows whether to merge, to log a soft
//! failure, or to do nothing. All parsing failures are contained here — a
//! bad reply never reaches the store and never panics.

use serde_json::Value;
use tracing::{debug, warn};

use crate::calendar::CalendarEvent;

use super::decode::{decode_array, decode_object};
use super::normalize::{normalize_days, normalize_summary, DAY_IDENTITY_KEYS};
use super::tags::extract_sections;
use super::{FairnessSummary, ScheduleDay};

/// What one model turn produced for the schedule view.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleOutcome {
    /// No schedule section in the reply — valid for a non-scheduling turn.
    Absent,
    /// At least one valid day parsed (strictly or recovered). Triggers a
    /// merge and a view switch to the schedule display.
    Days(Vec<ScheduleDay>),
    /// Schedule section present but zero valid days after both parse
    /// strategies. Soft failure: logged, store left untouched.
    Unparseable,
}

/// The fully parsed result of one model turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    /// Prose shown in the transcript (tagged payloads stripped).
    pub display_text: String,
    /// Schedule section classification.
    pub outcome: ScheduleOutcome,
    /// Fairness totals, when the reply carried a summary section.
    pub summary: Option<FairnessSummary>,
    /// Calendar events awaiting push confirmation, when the reply carried
    /// a `<GCAL_EVENTS>` section.
    pub push_events: Option<Vec<CalendarEvent>>,
}

/// Parse one raw model reply into display text and structured payloads.
///
/// Pure apart from logging. Each section is handled independently; the
/// summary from this turn replaces any earlier one regardless of what the
/// schedule section contained (last section wins, no cross-section
/// consistency check).
pub fn parse_reply(raw: &str) -> ParsedReply {
    let sections = extract_sections(raw);

    let outcome = match &sections.schedule {
        None => ScheduleOutcome::Absent,
        Some(span) => {
            let days = normalize_days(&decode_array(span, DAY_IDENTITY_KEYS));
            if days.is_empty() {
                warn!(
                    span_bytes = span.len(),
                    "schedule section present but no valid day recovered"
                );
                ScheduleOutcome::Unparseable
            } else {
                debug!(days = days.len(), "parsed schedule days from reply");
                ScheduleOutcome::Days(days)
            }
        }
    };

    let summary = sections
        .summary
        .as_deref()
        .and_then(decode_object)
        .as_ref()
        .and_then(normalize_summary);

    let push_events = sections
        .calendar_push
        .as_deref()
        .map(|span| decode_push_events(span))
        .filter(|events| !events.is_empty());

    ParsedReply {
        display_text: sections.display_text,
        outcome,
        summary,
        push_events,
    }
}

/// Decode the calendar-push section into typed events.
///
/// Events are identified by their `summary` field; entries that fail to
/// deserialize into the calendar event shape are dropped individually.
fn decode_push_events(span: &str) -> Vec<CalendarEvent> {
    decode_array(span, &["summary"])
        .into_iter()
        .filter_map(|value: Value| match serde_json::from_value(value) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!(error = %e, "dropping malformed calendar push event");
                None
            }
        })
        .collect()
}
