//! Google Calendar REST client.
//!
//! Thin read/write wrapper: list events for the planning window, insert
//! confirmed events one at a time. Failures on individual inserts are
//! logged and skipped so one bad event does not abort the batch.

use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use super::CalendarEvent;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3/calendars";

/// Errors returned by the calendar client.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// URL construction failed (malformed calendar id).
    #[error("invalid calendar URL: {0}")]
    Url(String),
    /// HTTP transport failure.
    #[error("calendar request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Upstream responded with an error status.
    #[error("calendar API returned status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },
}

/// Wire shape of the events list response.
#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

/// Authenticated client for one calendar.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    http: reqwest::Client,
    token: String,
    calendar_id: String,
}

impl CalendarClient {
    /// Create a client for `calendar_id` using an OAuth bearer `token`.
    pub fn new(token: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            calendar_id: calendar_id.into(),
        }
    }

    fn events_url(&self) -> Result<Url, CalendarError> {
        let mut url =
            Url::parse(CALENDAR_API_BASE).map_err(|e| CalendarError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| CalendarError::Url("cannot be a base".to_owned()))?
            .push(&self.calendar_id)
            .push("events");
        Ok(url)
    }

    /// List up to `max_results` events starting at RFC 3339 `time_min`.
    ///
    /// Recurring events are expanded (`singleEvents=true`) and ordered by
    /// start time, matching what the prompt assembler expects.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] on transport failure or non-2xx status.
    pub async fn list_events(
        &self,
        time_min: &str,
        max_results: usize,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let mut url = self.events_url()?;
        url.query_pairs_mut()
            .append_pair("maxResults", &max_results.to_string())
            .append_pair("orderBy", "startTime")
            .append_pair("singleEvents", "true")
            .append_pair("timeMin", time_min);

        let response = self.http.get(url).bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::HttpStatus {
                status: status.as_u16(),
                body: truncate(&body, 256),
            });
        }

        let list: EventList = response.json().await?;
        info!(events = list.items.len(), "loaded calendar events");
        Ok(list.items)
    }

    /// Insert `events` one at a time, returning how many were accepted.
    ///
    /// Individual failures are logged at warn level and skipped; the
    /// caller reports the pushed-of-total count to the user.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Url`] only when the calendar id cannot
    /// form a valid URL; per-event HTTP failures never abort the batch.
    pub async fn insert_events(&self, events: &[CalendarEvent]) -> Result<usize, CalendarError> {
        let url = self.events_url()?;
        let mut pushed = 0usize;

        for event in events {
            let result = self
                .http
                .post(url.clone())
                .bearer_auth(&self.token)
                .json(event)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    pushed = pushed.saturating_add(1);
                }
                Ok(response) => {
                    warn!(
                        status = response.status().as_u16(),
                        summary = %event.summary,
                        "calendar rejected event"
                    );
                }
                Err(e) => {
                    warn!(error = %e, summary = %event.summary, "failed to push event");
                }
            }
        }

        info!(pushed, total = events.len(), "calendar push complete");
        Ok(pushed)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_owned();
    }
    let shortened: String = s.chars().take(max_chars).collect();
    format!("{shortened}...[truncated]")
}
