//! Field-name normalization onto the canonical schedule schema.
//!
//! The system prompt asks the model to abbreviate block keys to save
//! response tokens, but long-form keys must be accepted too. Every block
//! resolves all five fields to strings (empty string when missing) so the
//! render layer never dereferences an absent value. Blocks are never
//! reordered and never dropped for an unrecognized `who` token.

use serde_json::Value;

use super::{FairnessSummary, ScheduleBlock, ScheduleDay, Who};

/// Accepted key spellings for the day identity field.
pub const DAY_IDENTITY_KEYS: &[&str] = &["date", "d"];

/// Normalize a batch of raw parsed day objects, discarding invalid ones.
pub fn normalize_days(values: &[Value]) -> Vec<ScheduleDay> {
    values.iter().filter_map(normalize_day).collect()
}

/// Normalize one raw parsed day object.
///
/// Returns `None` when the object has no non-empty date — such a day is
/// invalid and is discarded rather than guessed at.
pub fn normalize_day(value: &Value) -> Option<ScheduleDay> {
    let obj = value.as_object()?;

    let date = string_field(value, &["date", "d"]);
    if date.is_empty() {
        return None;
    }

    let blocks = obj
        .get("blocks")
        .or_else(|| obj.get("b"))
        .and_then(Value::as_array)
        .map(|raw| raw.iter().map(normalize_block).collect())
        .unwrap_or_default();

    Some(ScheduleDay {
        date,
        label: string_field(value, &["label", "l"]),
        blocks,
    })
}

/// Normalize one raw block object. Total: `{}` yields all-empty fields.
pub fn normalize_block(value: &Value) -> ScheduleBlock {
    ScheduleBlock {
        start: string_field(value, &["start", "s"]),
        end: string_field(value, &["end", "e"]),
        title: string_field(value, &["title", "t"]),
        who: Who::from(string_field(value, &["who", "w"])),
        note: string_field(value, &["note", "n"]),
    }
}

/// Normalize a raw summary object into per-person category totals.
///
/// Keeps only entries whose value is an object, and within those only
/// numeric leaves. Returns `None` when nothing numeric survives.
pub fn normalize_summary(value: &Value) -> Option<FairnessSummary> {
    let obj = value.as_object()?;

    let mut summary = FairnessSummary::default();
    for (person, totals) in obj {
        let Some(categories) = totals.as_object() else {
            continue;
        };
        let kept: std::collections::BTreeMap<String, f64> = categories
            .iter()
            .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
            .collect();
        if !kept.is_empty() {
            summary.0.insert(person.clone(), kept);
        }
    }

    if summary.is_empty() {
        None
    } else {
        Some(summary)
    }
}

/// First present key wins; non-string and missing values become `""`.
fn string_field(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| value.get(*k))
        .find_map(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}
