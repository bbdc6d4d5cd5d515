//! Built-in demo calendar used when no Google token is configured.

use super::{CalendarEvent, EventTime};

fn event(
    id: &str,
    summary: &str,
    start: EventTime,
    end: EventTime,
    color_id: &str,
) -> CalendarEvent {
    CalendarEvent {
        id: id.to_owned(),
        summary: summary.to_owned(),
        description: None,
        start,
        end,
        color_id: Some(color_id.to_owned()),
    }
}

/// A two-week sample calendar for demo mode.
///
/// Mirrors a typical household: one traveling partner (all-day travel
/// blocks with exclusive end dates), school runs, kid activities, chores,
/// and one family dinner.
pub fn demo_events() -> Vec<CalendarEvent> {
    vec![
        event(
            "1",
            "Partner B: Work Travel (Chicago)",
            EventTime::all_day("2026-03-02"),
            EventTime::all_day("2026-03-06"),
            "2",
        ),
        event(
            "2",
            "Partner A: School Drop-off",
            EventTime::timed("2026-03-02T08:00:00"),
            EventTime::timed("2026-03-02T08:30:00"),
            "4",
        ),
        event(
            "3",
            "Partner B: School Drop-off",
            EventTime::timed("2026-03-09T08:00:00"),
            EventTime::timed("2026-03-09T08:30:00"),
            "4",
        ),
        event(
            "4",
            "Soccer Practice - Liam",
            EventTime::timed("2026-03-04T16:00:00"),
            EventTime::timed("2026-03-04T17:30:00"),
            "4",
        ),
        event(
            "5",
            "Partner A: Dentist",
            EventTime::timed("2026-03-05T10:00:00"),
            EventTime::timed("2026-03-05T11:00:00"),
            "1",
        ),
        event(
            "6",
            "Family Dinner (Grandma)",
            EventTime::timed("2026-03-07T18:00:00"),
            EventTime::timed("2026-03-07T21:00:00"),
            "3",
        ),
        event(
            "7",
            "Partner B: Work Travel (NYC)",
            EventTime::all_day("2026-03-16"),
            EventTime::all_day("2026-03-20"),
            "2",
        ),
        event(
            "8",
            "Piano Recital - Ella",
            EventTime::timed("2026-03-14T14:00:00"),
            EventTime::timed("2026-03-14T15:30:00"),
            "4",
        ),
        event(
            "9",
            "Partner A: Book Club",
            EventTime::timed("2026-03-11T19:00:00"),
            EventTime::timed("2026-03-11T21:00:00"),
            "1",
        ),
        event(
            "10",
            "Groceries",
            EventTime::timed("2026-03-08T10:00:00"),
            EventTime::timed("2026-03-08T11:30:00"),
            "5",
        ),
    ]
}
