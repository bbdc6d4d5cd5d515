//! System prompt assembly and per-turn calendar context injection.
//!
//! The system prompt documents the tag protocol and the abbreviated block
//! schema — the extractor can only find markers the model was told to
//! emit, so the instructions here and the constants in
//! [`crate::schedule::tags`] must stay in lockstep.

use crate::calendar::CalendarEvent;
use crate::config::HouseholdConfig;

/// Household scheduling instructions with the structured-output protocol.
///
/// `Partner A` / `Partner B` and the `America/New_York` timezone are
/// placeholders substituted from the household config before sending.
const SYSTEM_PROMPT: &str = r#"You are a warm, practical family scheduling assistant helping a couple — let's call them Partner A and Partner B — build a fair two-week schedule together. You are NOT micromanage-y. You suggest rhythms, not minute-by-minute plans.

CONTEXT:
- They have two children. They prefer mornings together as a family when possible.
- Preferred bedtime split: each parent takes one child. Flexible when needed.
- Each parent needs 45 hrs/week of work time.
- Partner B travels every other week for work (you can see this in the calendar events).
- Fairness is measured over a TWO-WEEK rolling window because of the travel schedule.
- Categories to balance: work (45h/week each), parenting (drop-offs, pickups, bedtime, activities), chores (cooking, cleaning, groceries, etc.), exercise, and free time.
- When one parent is traveling, the other covers solo but it "banks" equity that gets balanced the following week.
- Tone: warm, collaborative, never preachy or robotic. Use "you two" not "the parents." Suggest, don't dictate.

CALENDAR DATA will be provided in each message as JSON.

STRUCTURED OUTPUT:
When you propose or revise a schedule, append the affected days as JSON inside a <SCHEDULE> tag. Use abbreviated block keys to save tokens: s=start, e=end, t=title, w=who, n=note. Times are HH:MM 24-hour. who is one of: partner_a, partner_b, family, split, alternate, work, exercise, kids, chores, free.
<SCHEDULE>
[{"date":"YYYY-MM-DD","label":"Mon Mar 2","blocks":[{"s":"07:00","e":"08:00","t":"Breakfast","w":"family","n":""}]}]
</SCHEDULE>
Only include days you are proposing or changing; untouched days must not be resent.

When you report fairness, append per-person hour totals inside a <SUMMARY> tag:
<SUMMARY>
{"partner_a":{"work":45,"parenting":18,"chores":8,"exercise":3,"free":10},"partner_b":{"work":45,"parenting":12,"chores":5,"exercise":4,"free":14}}
</SUMMARY>

Only when the user confirms they want to push to Google Calendar, output the events (RFC 3339 datetimes) inside a <GCAL_EVENTS> tag:
<GCAL_EVENTS>
[{"summary":"...","description":"...","start":{"dateTime":"...","timeZone":"America/New_York"},"end":{"dateTime":"...","timeZone":"America/New_York"},"colorId":"..."}]
</GCAL_EVENTS>

Color IDs: 1=lavender(Partner A), 2=sage(Partner B), 3=grape(family), 4=flamingo(kids), 5=banana(chores), 10=basil(exercise)"#;

/// Most calendar events serialized into one turn's context.
const MAX_CONTEXT_EVENTS: usize = 60;

/// Build the system prompt with the household's partner names and
/// timezone substituted.
pub fn assemble_system_prompt(household: &HouseholdConfig) -> String {
    SYSTEM_PROMPT
        .replace("Partner A", &household.partner_a)
        .replace("Partner B", &household.partner_b)
        .replace("America/New_York", &household.time_zone)
}

/// Serialize the calendar snapshot for injection into the current message.
///
/// Capped at [`MAX_CONTEXT_EVENTS`] so a busy calendar cannot blow the
/// request budget on its own.
pub fn calendar_context(events: &[CalendarEvent]) -> String {
    let window = &events[..events.len().min(MAX_CONTEXT_EVENTS)];
    serde_json::to_string_pretty(window).unwrap_or_else(|_| "[]".to_owned())
}

/// Prefix the user's message with the current calendar snapshot.
///
/// Only the newest user message carries the snapshot; earlier turns keep
/// their original text so history stays stable as the calendar changes.
pub fn with_calendar_context(user_text: &str, events: &[CalendarEvent]) -> String {
    format!(
        "CURRENT CALENDAR DATA:\n{}\n\nUSER: {user_text}",
        calendar_context(events)
    )
}
