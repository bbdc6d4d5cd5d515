//! Tests for the date-keyed schedule store.

use tandem::schedule::{ScheduleBlock, ScheduleDay, ScheduleStore, Who};

fn day(date: &str, title: &str) -> ScheduleDay {
    ScheduleDay {
        date: date.to_owned(),
        label: String::new(),
        blocks: vec![ScheduleBlock {
            start: "07:00".to_owned(),
            end: "08:00".to_owned(),
            title: title.to_owned(),
            who: Who::Family,
            note: String::new(),
        }],
    }
}

#[test]
fn merge_inserts_new_days() {
    let mut store = ScheduleStore::new();
    let touched = store.merge(vec![day("2026-03-02", "Breakfast"), day("2026-03-03", "Gym")]);

    assert_eq!(touched, vec!["2026-03-02", "2026-03-03"]);
    assert_eq!(store.len(), 2);
}

#[test]
fn incoming_day_replaces_existing_wholesale() {
    let mut store = ScheduleStore::new();
    store.merge(vec![day("2026-03-02", "Breakfast")]);
    store.merge(vec![day("2026-03-02", "Brunch")]);

    assert_eq!(store.len(), 1);
    let stored = store.get("2026-03-02").expect("day present");
    assert_eq!(stored.blocks[0].title, "Brunch");
}

#[test]
fn merge_preserves_untouched_days() {
    let mut store = ScheduleStore::new();
    store.merge(vec![day("2026-03-02", "Breakfast"), day("2026-03-03", "Gym")]);
    store.merge(vec![day("2026-03-03", "Swim")]);

    assert_eq!(store.len(), 2);
    assert_eq!(
        store.get("2026-03-02").expect("kept").blocks[0].title,
        "Breakfast"
    );
    assert_eq!(
        store.get("2026-03-03").expect("replaced").blocks[0].title,
        "Swim"
    );
}

#[test]
fn merge_is_idempotent() {
    let mut store = ScheduleStore::new();
    store.merge(vec![day("2026-03-02", "Breakfast")]);
    let before = store.snapshot();
    store.merge(vec![day("2026-03-02", "Breakfast")]);

    assert_eq!(store.snapshot(), before);
}

#[test]
fn empty_merge_is_a_noop() {
    let mut store = ScheduleStore::new();
    store.merge(vec![day("2026-03-02", "Breakfast")]);
    let touched = store.merge(Vec::new());

    assert!(touched.is_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn iteration_is_ascending_by_date_regardless_of_insert_order() {
    let mut store = ScheduleStore::new();
    store.merge(vec![
        day("2026-03-09", "Later"),
        day("2026-03-02", "Earlier"),
        day("2026-03-05", "Middle"),
    ]);

    let dates: Vec<&str> = store.days().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-03-02", "2026-03-05", "2026-03-09"]);
}

#[test]
fn touched_dates_come_back_in_input_order() {
    let mut store = ScheduleStore::new();
    let touched = store.merge(vec![day("2026-03-09", "b"), day("2026-03-02", "a")]);

    assert_eq!(touched, vec!["2026-03-09", "2026-03-02"]);
}

#[test]
fn from_days_later_duplicate_wins() {
    let store =
        ScheduleStore::from_days(vec![day("2026-03-02", "First"), day("2026-03-02", "Second")]);

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get("2026-03-02").expect("present").blocks[0].title,
        "Second"
    );
}

#[test]
fn empty_store_reports_empty() {
    let store = ScheduleStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.get("2026-03-02").is_none());
}
