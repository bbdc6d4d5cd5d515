//! Resilient JSON decoding for tagged section payloads.
//!
//! Model replies are frequently cut off at the response token budget,
//! mid-array. A strict whole-span parse is tried first (the common case);
//! on failure a recovery scan walks the span tracking brace depth and pulls
//! out every syntactically complete top-level object. Losing the whole
//! schedule because the last day is malformed would be worse than keeping
//! every day that completed.
//!
//! The scanner tracks string-literal and escape state, so braces inside
//! quoted strings (a note containing `{`, say) do not confuse the depth
//! counter. Recovery is strictly additive: it never partially trusts a
//! broken object, only whole well-formed ones found inside a broken
//! container.

use serde_json::Value;
use tracing::debug;

/// Decode a span expected to hold a JSON array of objects.
///
/// Strict parse first; on failure, falls back to [`recover_objects`].
/// Objects that lack all of the `identity_keys` are dropped during
/// recovery (a day without a date is not a day). Returns an empty vec
/// when nothing can be salvaged — the caller decides whether that is
/// "section absent" or a soft failure.
pub fn decode_array(span: &str, identity_keys: &[&str]) -> Vec<Value> {
    let trimmed = span.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => return items,
        // A bare object where an array was expected still counts.
        Ok(obj @ Value::Object(_)) => return vec![obj],
        Ok(_) | Err(_) => {}
    }

    let recovered = recover_objects(trimmed, identity_keys);
    if !recovered.is_empty() {
        debug!(
            objects = recovered.len(),
            "strict parse failed, recovered complete objects from truncated span"
        );
    }
    recovered
}

/// Decode a span expected to hold a single JSON object.
///
/// Strict parse first; on failure, returns the first complete top-level
/// object the recovery scan finds, or `None`.
pub fn decode_object(span: &str) -> Option<Value> {
    let trimmed = span.trim();
    if let Ok(obj @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Some(obj);
    }
    recover_objects(trimmed, &[]).into_iter().next()
}

/// Scan a possibly-truncated span for complete top-level JSON objects.
///
/// Walks the span character by character. Depth 0→1 records a candidate
/// start; depth 1→0 attempts a strict parse of the bracketed substring.
/// Substrings that fail to parse, or that parse but carry none of the
/// required `identity_keys`, are discarded. Surviving objects are returned
/// in encounter order. An empty `identity_keys` slice disables the
/// identity check.
pub fn recover_objects(span: &str, identity_keys: &[&str]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in span.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth = depth.saturating_add(1);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(s) = start.take() {
                        let end = i.saturating_add(1);
                        if let Some(obj) = parse_candidate(&span[s..end], identity_keys) {
                            out.push(obj);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    out
}

fn parse_candidate(candidate: &str, identity_keys: &[&str]) -> Option<Value> {
    let value = serde_json::from_str::<Value>(candidate).ok()?;
    let map = value.as_object()?;
    if !identity_keys.is_empty() && !identity_keys.iter().any(|k| map.contains_key(*k)) {
        return None;
    }
    Some(value)
}
