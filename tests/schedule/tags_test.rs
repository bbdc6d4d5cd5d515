//! Tests for tagged section extraction.

use tandem::schedule::tags::extract_sections;

#[test]
fn extracts_schedule_section_and_strips_it_from_display() {
    let raw = "Here you go.\n<SCHEDULE>[{\"date\":\"2026-03-02\"}]</SCHEDULE>\nEnjoy!";
    let sections = extract_sections(raw);

    assert_eq!(
        sections.schedule.as_deref(),
        Some("[{\"date\":\"2026-03-02\"}]")
    );
    assert_eq!(sections.display_text, "Here you go.\n\nEnjoy!");
}

#[test]
fn absent_sections_are_none() {
    let sections = extract_sections("Just chatting, no payloads here.");

    assert!(sections.schedule.is_none());
    assert!(sections.summary.is_none());
    assert!(sections.calendar_push.is_none());
    assert_eq!(sections.display_text, "Just chatting, no payloads here.");
}

#[test]
fn extracts_all_three_sections() {
    let raw = concat!(
        "Plan below.\n",
        "<SCHEDULE>[{\"date\":\"2026-03-02\"}]</SCHEDULE>\n",
        "<SUMMARY>{\"partner_a\":{\"work\":45}}</SUMMARY>\n",
        "<GCAL_EVENTS>[{\"summary\":\"Soccer\"}]</GCAL_EVENTS>\n",
        "Anything else?"
    );
    let sections = extract_sections(raw);

    assert!(sections.schedule.is_some());
    assert_eq!(
        sections.summary.as_deref(),
        Some("{\"partner_a\":{\"work\":45}}")
    );
    assert_eq!(
        sections.calendar_push.as_deref(),
        Some("[{\"summary\":\"Soccer\"}]")
    );
    assert_eq!(sections.display_text, "Plan below.\n\n\n\nAnything else?");
}

#[test]
fn missing_close_tag_runs_to_end_of_text() {
    let raw = "Draft:\n<SCHEDULE>[{\"date\":\"2026-03-02\",\"blocks\":[";
    let sections = extract_sections(raw);

    assert_eq!(
        sections.schedule.as_deref(),
        Some("[{\"date\":\"2026-03-02\",\"blocks\":[")
    );
    assert_eq!(sections.display_text, "Draft:");
}

#[test]
fn marker_inside_an_unterminated_section_is_still_extracted() {
    let raw = "Hi\n<SCHEDULE>[{\"date\":\"2026-03-02\" <SUMMARY>{}</SUMMARY>";
    let sections = extract_sections(raw);

    // The unterminated schedule span runs to end of text, markers and all.
    assert_eq!(
        sections.schedule.as_deref(),
        Some("[{\"date\":\"2026-03-02\" <SUMMARY>{}</SUMMARY>")
    );
    // The later marker is matched in its own right.
    assert_eq!(sections.summary.as_deref(), Some("{}"));
    // Overlapping spans strip from the display text exactly once.
    assert_eq!(sections.display_text, "Hi");
}

#[test]
fn section_content_is_verbatim_including_whitespace() {
    let raw = "<SCHEDULE>\n  [ ]\n</SCHEDULE>";
    let sections = extract_sections(raw);

    assert_eq!(sections.schedule.as_deref(), Some("\n  [ ]\n"));
    assert_eq!(sections.display_text, "");
}

#[test]
fn display_text_is_trimmed() {
    let raw = "\n\n  hello  \n<SUMMARY>{}</SUMMARY>\n";
    let sections = extract_sections(raw);

    assert_eq!(sections.display_text, "hello");
    assert_eq!(sections.summary.as_deref(), Some("{}"));
}

#[test]
fn prose_only_between_sections_survives() {
    let raw = "<SCHEDULE>[]</SCHEDULE> middle words <SUMMARY>{}</SUMMARY>";
    let sections = extract_sections(raw);

    assert_eq!(sections.display_text, "middle words");
}
