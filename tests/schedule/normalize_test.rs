//! Tests for field-name normalization onto the canonical schema.

use serde_json::json;
use tandem::schedule::normalize::{
    normalize_block, normalize_day, normalize_days, normalize_summary,
};
use tandem::schedule::Who;

#[test]
fn long_form_keys_normalize() {
    let day = normalize_day(&json!({
        "date": "2026-03-02",
        "label": "Mon Mar 2",
        "blocks": [
            {"start": "07:00", "end": "08:00", "title": "Breakfast", "who": "family", "note": "pancakes"}
        ]
    }))
    .expect("valid day");

    assert_eq!(day.date, "2026-03-02");
    assert_eq!(day.label, "Mon Mar 2");
    assert_eq!(day.blocks.len(), 1);
    let block = &day.blocks[0];
    assert_eq!(block.start, "07:00");
    assert_eq!(block.end, "08:00");
    assert_eq!(block.title, "Breakfast");
    assert_eq!(block.who, Who::Family);
    assert_eq!(block.note, "pancakes");
}

#[test]
fn abbreviated_keys_normalize_to_the_same_shape() {
    let day = normalize_day(&json!({
        "d": "2026-03-02",
        "l": "Mon Mar 2",
        "b": [{"s": "07:00", "e": "08:00", "t": "Breakfast", "w": "family", "n": ""}]
    }))
    .expect("valid day");

    assert_eq!(day.date, "2026-03-02");
    assert_eq!(day.label, "Mon Mar 2");
    assert_eq!(day.blocks[0].title, "Breakfast");
    assert_eq!(day.blocks[0].who, Who::Family);
}

#[test]
fn long_form_key_wins_over_abbreviation() {
    let block = normalize_block(&json!({"title": "Long", "t": "Short"}));
    assert_eq!(block.title, "Long");
}

#[test]
fn empty_block_object_yields_all_empty_fields() {
    let block = normalize_block(&json!({}));

    assert_eq!(block.start, "");
    assert_eq!(block.end, "");
    assert_eq!(block.title, "");
    assert_eq!(block.who, Who::Other(String::new()));
    assert_eq!(block.note, "");
}

#[test]
fn non_string_field_values_become_empty() {
    let block = normalize_block(&json!({"s": 700, "t": ["a"], "w": null}));

    assert_eq!(block.start, "");
    assert_eq!(block.title, "");
    assert_eq!(block.who, Who::Other(String::new()));
}

#[test]
fn unrecognized_who_token_is_carried_verbatim() {
    let block = normalize_block(&json!({"w": "grandma"}));
    assert_eq!(block.who, Who::Other("grandma".to_owned()));
}

#[test]
fn day_without_date_is_dropped() {
    assert!(normalize_day(&json!({"label": "Mon", "blocks": []})).is_none());
    assert!(normalize_day(&json!({"date": ""})).is_none());
    assert!(normalize_day(&json!("not an object")).is_none());
}

#[test]
fn day_without_blocks_gets_empty_vec() {
    let day = normalize_day(&json!({"date": "2026-03-02"})).expect("valid day");
    assert!(day.blocks.is_empty());
    assert_eq!(day.label, "");
}

#[test]
fn batch_normalization_filters_invalid_days() {
    let days = normalize_days(&[
        json!({"date": "2026-03-02"}),
        json!({"label": "no date"}),
        json!(42),
        json!({"d": "2026-03-03"}),
    ]);

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, "2026-03-02");
    assert_eq!(days[1].date, "2026-03-03");
}

#[test]
fn summary_keeps_numeric_leaves_only() {
    let summary = normalize_summary(&json!({
        "partner_a": {"work": 45, "parenting": 18.5, "motto": "fairness"},
        "partner_b": {"work": 45},
        "generated": "2026-03-01"
    }))
    .expect("valid summary");

    let a = summary.0.get("partner_a").expect("partner_a kept");
    assert_eq!(a.get("work"), Some(&45.0));
    assert_eq!(a.get("parenting"), Some(&18.5));
    assert!(!a.contains_key("motto"));
    assert!(!summary.0.contains_key("generated"));
}

#[test]
fn summary_with_no_numeric_content_is_none() {
    assert!(normalize_summary(&json!({})).is_none());
    assert!(normalize_summary(&json!({"partner_a": "busy"})).is_none());
    assert!(normalize_summary(&json!({"partner_a": {"note": "n/a"}})).is_none());
    assert!(normalize_summary(&json!([1, 2])).is_none());
}
