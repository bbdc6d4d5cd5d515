//! Chat session: conversation state, turn handling, and the schedule store.
//!
//! One session owns the conversation history, the merged schedule, the
//! latest fairness summary, and any events awaiting push confirmation.
//! Turns are strictly sequential — `send` takes `&mut self`, so there is
//! never a concurrent merge. Each reply is tagged with a monotonic turn
//! counter so a future concurrent caller (speculative regeneration, say)
//! can discard merges from stale turns.

use tracing::{debug, error, info, warn};

use crate::calendar::client::{CalendarClient, CalendarError};
use crate::calendar::CalendarEvent;
use crate::config::HouseholdConfig;
use crate::providers::{ChatMessage, CompletionRequest, ModelClient, StopReason};
use crate::schedule::{parse_reply, FairnessSummary, ScheduleDay, ScheduleOutcome, ScheduleStore};

pub mod context;
pub mod prompt;

/// What the user sees when the model endpoint cannot be reached.
const TRANSPORT_APOLOGY: &str =
    "Hmm, something went wrong connecting to the AI. Check your network and try again.";

/// Fallback transcript text for an entirely empty reply.
const EMPTY_REPLY_FALLBACK: &str = "Sorry, I couldn't get a response.";

// ---------------------------------------------------------------------------
// Turn result
// ---------------------------------------------------------------------------

/// The visible result of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    /// Monotonic turn number this reply belongs to.
    pub turn: u64,
    /// Assistant prose for the transcript (tagged payloads stripped).
    pub text: String,
    /// Dates merged into the store this turn, in reply order.
    pub merged_dates: Vec<String>,
    /// Number of calendar events now awaiting push confirmation.
    pub push_ready: usize,
}

/// Outcome of a confirmed calendar push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushReport {
    /// Events the calendar accepted.
    pub pushed: usize,
    /// Events that were pending.
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single-user scheduling conversation.
pub struct ChatSession<C: ModelClient> {
    client: C,
    household: HouseholdConfig,
    max_tokens: u32,
    max_context_tokens: u64,
    events: Vec<CalendarEvent>,
    conversation: Vec<ChatMessage>,
    store: ScheduleStore,
    fairness: Option<FairnessSummary>,
    pending_push: Option<Vec<CalendarEvent>>,
    turn: u64,
}

impl<C: ModelClient> ChatSession<C> {
    /// Create a session over a calendar snapshot.
    pub fn new(
        client: C,
        household: HouseholdConfig,
        events: Vec<CalendarEvent>,
        max_tokens: u32,
        max_context_tokens: u64,
    ) -> Self {
        Self {
            client,
            household,
            max_tokens,
            max_context_tokens,
            events,
            conversation: Vec::new(),
            store: ScheduleStore::new(),
            fairness: None,
            pending_push: None,
            turn: 0,
        }
    }

    /// Run one chat turn: send the user's message, parse the reply, merge.
    ///
    /// Never fails: transport and upstream errors become a plain-language
    /// assistant message, and parse failures leave the store untouched —
    /// the failure is terminal for this turn and the user resends.
    pub async fn send(&mut self, text: &str) -> TurnReply {
        self.turn = self.turn.saturating_add(1);
        let turn = self.turn;

        self.conversation.push(ChatMessage::user(text));

        // Only the newest user message carries the calendar snapshot.
        let mut messages =
            context::trim_messages(&self.conversation, self.max_context_tokens);
        if let Some(last) = messages.last_mut() {
            last.content = prompt::with_calendar_context(&last.content, &self.events);
        }

        let request = CompletionRequest {
            messages,
            system: Some(prompt::assemble_system_prompt(&self.household)),
            max_tokens: Some(self.max_tokens),
        };

        let response = match self.client.complete(request).await {
            Ok(r) => r,
            Err(e) => {
                error!(turn, error = %e, "model turn failed");
                self.conversation
                    .push(ChatMessage::assistant(TRANSPORT_APOLOGY));
                return TurnReply {
                    turn,
                    text: TRANSPORT_APOLOGY.to_owned(),
                    merged_dates: Vec::new(),
                    push_ready: self.push_ready(),
                };
            }
        };

        if response.stop_reason == StopReason::MaxTokens {
            debug!(turn, "reply cut off at the response token budget");
        }

        if response.text.is_empty() {
            warn!(turn, "model returned an empty reply");
            self.conversation
                .push(ChatMessage::assistant(EMPTY_REPLY_FALLBACK));
            return TurnReply {
                turn,
                text: EMPTY_REPLY_FALLBACK.to_owned(),
                merged_dates: Vec::new(),
                push_ready: self.push_ready(),
            };
        }

        let parsed = parse_reply(&response.text);

        let merged_dates = match parsed.outcome {
            ScheduleOutcome::Days(days) => {
                let dates = self.store.merge(days);
                info!(turn, days = dates.len(), "merged schedule days");
                dates
            }
            // Absent is a valid non-scheduling turn; Unparseable was
            // already logged by the pipeline. Store untouched either way.
            ScheduleOutcome::Absent | ScheduleOutcome::Unparseable => Vec::new(),
        };

        if let Some(summary) = parsed.summary {
            self.fairness = Some(summary);
        }

        if let Some(events) = parsed.push_events {
            info!(turn, events = events.len(), "calendar push events pending");
            self.pending_push = Some(events);
        }

        // The transcript keeps the stripped prose, so later turns resend
        // conversation history without the tagged payloads.
        self.conversation
            .push(ChatMessage::assistant(parsed.display_text.clone()));

        TurnReply {
            turn,
            text: parsed.display_text,
            merged_dates,
            push_ready: self.push_ready(),
        }
    }

    /// Push the pending events to the calendar and fold them into the
    /// local snapshot.
    ///
    /// A no-op returning `0/0` when nothing is pending. Pending events are
    /// consumed even when some inserts fail; the report carries the
    /// pushed-of-total count for the user.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] only when the calendar URL itself cannot
    /// be built; per-event failures are logged and counted instead.
    pub async fn confirm_push(
        &mut self,
        calendar: &CalendarClient,
    ) -> Result<PushReport, CalendarError> {
        let Some(events) = self.pending_push.take() else {
            return Ok(PushReport {
                pushed: 0,
                total: 0,
            });
        };

        let total = events.len();
        let pushed = calendar.insert_events(&events).await?;

        for (i, mut event) in events.into_iter().enumerate() {
            event.id = format!("new_{i}");
            self.events.push(event);
        }

        Ok(PushReport { pushed, total })
    }

    /// Drop any pending push events without sending them.
    pub fn discard_pending_push(&mut self) {
        self.pending_push = None;
    }

    /// Number of events awaiting push confirmation.
    pub fn push_ready(&self) -> usize {
        self.pending_push.as_ref().map_or(0, Vec::len)
    }

    /// The merged schedule, ascending by date.
    pub fn schedule_days(&self) -> Vec<&ScheduleDay> {
        self.store.days().collect()
    }

    /// The schedule store.
    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    /// The latest fairness summary, if any turn produced one.
    pub fn fairness(&self) -> Option<&FairnessSummary> {
        self.fairness.as_ref()
    }

    /// The current calendar snapshot (including locally pushed events).
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// The transcript so far.
    pub fn conversation(&self) -> &[ChatMessage] {
        &self.conversation
    }
}
