//! Tandem — a chat-driven family scheduling assistant.
//!
//! Single Rust binary. Talks to an Anthropic model, reads a Google Calendar
//! snapshot, and builds a fair two-week schedule in conversation. Structured
//! schedule data rides inside tagged sections of the model's reply and is
//! merged into a date-keyed local store.
//!
//! See `DESIGN.md` for full architecture documentation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod calendar;
pub mod config;
pub mod logging;
pub mod providers;
pub mod schedule;
