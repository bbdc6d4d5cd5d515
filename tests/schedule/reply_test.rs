//! End-to-end tests for one-turn reply parsing.

use tandem::schedule::{parse_reply, ScheduleOutcome, Who};

#[test]
fn prose_with_schedule_section_yields_days_and_clean_display() {
    let raw = concat!(
        "Here you go.\n",
        "<SCHEDULE>[{\"date\":\"2026-03-02\",\"label\":\"Mon Mar 2\",\"blocks\":",
        "[{\"s\":\"07:00\",\"e\":\"08:00\",\"t\":\"Breakfast\",\"w\":\"family\",\"n\":\"\"}]}]",
        "</SCHEDULE>\n",
        "Enjoy!"
    );
    let parsed = parse_reply(raw);

    assert_eq!(parsed.display_text, "Here you go.\n\nEnjoy!");
    let ScheduleOutcome::Days(days) = parsed.outcome else {
        panic!("expected days");
    };
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date, "2026-03-02");
    assert_eq!(days[0].blocks[0].title, "Breakfast");
    assert_eq!(days[0].blocks[0].who, Who::Family);
    assert!(parsed.summary.is_none());
    assert!(parsed.push_events.is_none());
}

#[test]
fn reply_without_sections_is_absent() {
    let parsed = parse_reply("Sounds good, tell me more about the week.");

    assert_eq!(parsed.outcome, ScheduleOutcome::Absent);
    assert_eq!(
        parsed.display_text,
        "Sounds good, tell me more about the week."
    );
}

#[test]
fn schedule_section_with_garbage_is_unparseable() {
    let parsed = parse_reply("Try this.\n<SCHEDULE>whoops not json</SCHEDULE>");

    assert_eq!(parsed.outcome, ScheduleOutcome::Unparseable);
    assert_eq!(parsed.display_text, "Try this.");
}

#[test]
fn schedule_section_with_only_dateless_days_is_unparseable() {
    let parsed = parse_reply("<SCHEDULE>[{\"label\":\"Mon\"}]</SCHEDULE>");
    assert_eq!(parsed.outcome, ScheduleOutcome::Unparseable);
}

#[test]
fn truncated_schedule_recovers_completed_days() {
    // Reply cut off at the token budget: no closing tag, third day broken.
    let raw = concat!(
        "Two weeks, balanced:\n",
        "<SCHEDULE>[",
        "{\"d\":\"2026-03-02\",\"b\":[{\"s\":\"09:00\",\"e\":\"17:00\",\"t\":\"Work\",\"w\":\"partner_a\"}]},",
        "{\"d\":\"2026-03-03\",\"b\":[]},",
        "{\"d\":\"2026-03-0"
    );
    let parsed = parse_reply(raw);

    let ScheduleOutcome::Days(days) = parsed.outcome else {
        panic!("expected recovered days");
    };
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, "2026-03-02");
    assert_eq!(days[1].date, "2026-03-03");
    assert_eq!(parsed.display_text, "Two weeks, balanced:");
}

#[test]
fn summary_section_parses_independently_of_schedule() {
    let raw = concat!(
        "Current balance:\n",
        "<SUMMARY>{\"partner_a\":{\"work\":45,\"parenting\":18},",
        "\"partner_b\":{\"work\":45,\"parenting\":12}}</SUMMARY>"
    );
    let parsed = parse_reply(raw);

    assert_eq!(parsed.outcome, ScheduleOutcome::Absent);
    let summary = parsed.summary.expect("summary present");
    assert_eq!(
        summary.0.get("partner_a").and_then(|c| c.get("parenting")),
        Some(&18.0)
    );
}

#[test]
fn malformed_summary_is_simply_none() {
    let parsed = parse_reply("<SUMMARY>not json</SUMMARY>ok");
    assert!(parsed.summary.is_none());
    assert_eq!(parsed.display_text, "ok");
}

#[test]
fn push_events_deserialize_into_calendar_events() {
    let raw = concat!(
        "Ready to push.\n",
        "<GCAL_EVENTS>[{\"summary\":\"School drop-off\",",
        "\"start\":{\"dateTime\":\"2026-03-02T08:00:00-05:00\",\"timeZone\":\"America/New_York\"},",
        "\"end\":{\"dateTime\":\"2026-03-02T08:30:00-05:00\",\"timeZone\":\"America/New_York\"},",
        "\"colorId\":\"1\"}]</GCAL_EVENTS>"
    );
    let parsed = parse_reply(raw);

    let events = parsed.push_events.expect("events present");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary, "School drop-off");
    assert_eq!(events[0].color_id.as_deref(), Some("1"));
    assert_eq!(
        events[0].start.date_time.as_deref(),
        Some("2026-03-02T08:00:00-05:00")
    );
}

#[test]
fn malformed_push_entries_are_dropped_individually() {
    // Second entry has no start/end and cannot become an event.
    let raw = concat!(
        "<GCAL_EVENTS>[",
        "{\"summary\":\"Soccer\",\"start\":{\"date\":\"2026-03-07\"},\"end\":{\"date\":\"2026-03-08\"}},",
        "{\"summary\":\"Broken\"}",
        "]</GCAL_EVENTS>"
    );
    let parsed = parse_reply(raw);

    let events = parsed.push_events.expect("one event survives");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary, "Soccer");
}

#[test]
fn push_section_with_nothing_usable_is_none() {
    let parsed = parse_reply("<GCAL_EVENTS>[]</GCAL_EVENTS>");
    assert!(parsed.push_events.is_none());
}

#[test]
fn all_three_sections_in_one_reply() {
    let raw = concat!(
        "Full update.\n",
        "<SCHEDULE>[{\"date\":\"2026-03-02\"}]</SCHEDULE>\n",
        "<SUMMARY>{\"partner_a\":{\"work\":45}}</SUMMARY>\n",
        "<GCAL_EVENTS>[{\"summary\":\"Dinner\",\"start\":{\"date\":\"2026-03-02\"},\"end\":{\"date\":\"2026-03-03\"}}]</GCAL_EVENTS>"
    );
    let parsed = parse_reply(raw);

    assert!(matches!(parsed.outcome, ScheduleOutcome::Days(ref d) if d.len() == 1));
    assert!(parsed.summary.is_some());
    assert!(parsed.push_events.is_some());
    assert_eq!(parsed.display_text, "Full update.");
}
