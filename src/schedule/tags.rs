//! Tag extraction: locate delimited sections in a raw model reply.
//!
//! The system prompt instructs the model to wrap structured payloads in
//! fixed markers (`<SCHEDULE>…</SCHEDULE>` etc). This module finds those
//! sections and returns each section's raw inner text plus the leftover
//! prose, which is what the transcript shows — never the tagged payload.
//!
//! A missing opening marker means the section is absent, not an error.
//! A missing closing marker (response cut off at the token budget) means
//! the section runs to end of text; the decoder downstream is expected to
//! salvage whatever completed.

/// Marker name for the schedule section (JSON array of day objects).
pub const SCHEDULE_TAG: &str = "SCHEDULE";
/// Marker name for the fairness summary section (JSON object of totals).
pub const SUMMARY_TAG: &str = "SUMMARY";
/// Marker name for the calendar push section (JSON array of GCal events).
pub const GCAL_EVENTS_TAG: &str = "GCAL_EVENTS";

/// The sections found in one raw model reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sections {
    /// Prose with all recognized section spans removed, trimmed.
    pub display_text: String,
    /// Raw inner text of the `<SCHEDULE>` section, if present.
    pub schedule: Option<String>,
    /// Raw inner text of the `<SUMMARY>` section, if present.
    pub summary: Option<String>,
    /// Raw inner text of the `<GCAL_EVENTS>` section, if present.
    pub calendar_push: Option<String>,
}

/// Byte span of one recognized section (opening tag through closing tag,
/// or through end of text when the closing tag is missing).
#[derive(Debug, Clone, Copy)]
struct Span {
    open_start: usize,
    content_start: usize,
    content_end: usize,
    close_end: usize,
}

/// Extract all recognized sections from a raw model reply.
///
/// Pure function of the input text. Section contents are returned verbatim
/// (untrimmed JSON text); `display_text` is trimmed of surrounding
/// whitespace. An unterminated section's content runs to the end of the
/// text and may contain later markers; each marker is still searched over
/// the full text, so those later sections are extracted in their own
/// right, and overlapping spans are removed from the display text once.
pub fn extract_sections(raw: &str) -> Sections {
    let mut spans: Vec<Span> = Vec::new();

    let schedule = take_section(raw, SCHEDULE_TAG, &mut spans);
    let summary = take_section(raw, SUMMARY_TAG, &mut spans);
    let calendar_push = take_section(raw, GCAL_EVENTS_TAG, &mut spans);

    Sections {
        display_text: strip_spans(raw, &mut spans),
        schedule,
        summary,
        calendar_push,
    }
}

fn take_section(raw: &str, name: &str, spans: &mut Vec<Span>) -> Option<String> {
    let span = find_section(raw, name)?;
    spans.push(span);
    Some(raw[span.content_start..span.content_end].to_owned())
}

fn find_section(raw: &str, name: &str) -> Option<Span> {
    let open = format!("<{name}>");
    let close = format!("</{name}>");

    let open_start = raw.find(&open)?;
    let content_start = open_start.saturating_add(open.len());

    match raw[content_start..].find(&close) {
        Some(rel) => {
            let content_end = content_start.saturating_add(rel);
            Some(Span {
                open_start,
                content_start,
                content_end,
                close_end: content_end.saturating_add(close.len()),
            })
        }
        // Truncated reply: content runs to end of text.
        None => Some(Span {
            open_start,
            content_start,
            content_end: raw.len(),
            close_end: raw.len(),
        }),
    }
}

/// Remove every recognized span from `raw`, merging overlaps, and trim.
fn strip_spans(raw: &str, spans: &mut [Span]) -> String {
    spans.sort_by_key(|s| s.open_start);

    let mut out = String::new();
    let mut cursor = 0usize;
    for span in spans.iter() {
        if span.open_start > cursor {
            out.push_str(&raw[cursor..span.open_start]);
        }
        cursor = cursor.max(span.close_end);
    }
    if cursor < raw.len() {
        out.push_str(&raw[cursor..]);
    }
    out.trim().to_owned()
}
