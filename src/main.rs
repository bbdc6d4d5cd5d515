#![allow(missing_docs)]

//! Tandem — a family scheduling assistant for the terminal.
//!
//! Chats with a model that proposes fair two-week schedules over the
//! household calendar, merges the structured schedule payloads it emits,
//! and optionally pushes confirmed blocks to Google Calendar.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use tandem::agent::ChatSession;
use tandem::calendar::client::CalendarClient;
use tandem::calendar::{demo, events_for_day, owner_label, CalendarEvent};
use tandem::config::TandemConfig;
use tandem::logging;
use tandem::providers::anthropic::AnthropicClient;
use tandem::schedule::{FairnessSummary, ScheduleDay};

#[derive(Parser)]
#[command(name = "tandem", version, about = "Family scheduling assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive scheduling chat.
    Chat,
    /// Print the planning window's calendar events and exit.
    Events,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real deployments use the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = TandemConfig::load().context("failed to load configuration")?;

    match cli.command {
        Command::Chat => {
            let _guard = logging::init_production(
                Path::new(&config.paths.logs_dir),
                &config.log.level,
            )?;
            run_chat(config).await
        }
        Command::Events => {
            logging::init_cli(&config.log.level);
            run_events(config).await
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn run_chat(config: TandemConfig) -> Result<()> {
    let client = AnthropicClient::new(
        config.assistant.model.clone(),
        config.assistant.api_key.clone(),
        std::time::Duration::from_secs(config.assistant.request_timeout_seconds),
    )
    .context("model client unavailable (set TANDEM_ANTHROPIC_API_KEY)")?;

    let calendar = config
        .calendar
        .token
        .as_ref()
        .map(|token| CalendarClient::new(token.clone(), config.calendar.calendar_id.clone()));

    let events = load_events(&config, calendar.as_ref()).await;
    info!(events = events.len(), model = %config.assistant.model, "session ready");

    let mut session = ChatSession::new(
        client,
        config.household.clone(),
        events,
        config.assistant.max_tokens,
        config.assistant.max_context_tokens,
    );

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(
            b"tandem: plan the next two weeks together.\n\
              Commands: /schedule /fairness /push /discard /quit\n\n",
        )
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" | "/exit" => break,
            "/schedule" => {
                let out = render_schedule(&session.schedule_days());
                stdout.write_all(out.as_bytes()).await?;
            }
            "/fairness" => {
                let out = session
                    .fairness()
                    .map_or_else(|| "No fairness summary yet.\n".to_owned(), render_fairness);
                stdout.write_all(out.as_bytes()).await?;
            }
            "/push" => {
                let out = match calendar.as_ref() {
                    Some(cal) if session.push_ready() > 0 => match session.confirm_push(cal).await
                    {
                        Ok(report) => {
                            format!("Pushed {} of {} events.\n", report.pushed, report.total)
                        }
                        Err(e) => format!("Push failed: {e}\n"),
                    },
                    Some(_) => "Nothing is waiting to be pushed.\n".to_owned(),
                    None => {
                        "No calendar token configured (set TANDEM_GCAL_TOKEN); \
                         events stay local.\n"
                            .to_owned()
                    }
                };
                stdout.write_all(out.as_bytes()).await?;
            }
            "/discard" => {
                session.discard_pending_push();
                stdout.write_all(b"Pending events discarded.\n").await?;
            }
            text => {
                let reply = session.send(text).await;
                let mut out = format!("\n{}\n", reply.text);
                if !reply.merged_dates.is_empty() {
                    out.push_str(&format!(
                        "\n[updated {} day(s): {}]\n",
                        reply.merged_dates.len(),
                        reply.merged_dates.join(", ")
                    ));
                }
                if reply.push_ready > 0 {
                    out.push_str(&format!(
                        "[{} event(s) ready — /push to send, /discard to drop]\n",
                        reply.push_ready
                    ));
                }
                out.push('\n');
                stdout.write_all(out.as_bytes()).await?;
            }
        }
    }

    stdout.write_all(b"bye.\n").await?;
    Ok(())
}

async fn run_events(config: TandemConfig) -> Result<()> {
    let calendar = config
        .calendar
        .token
        .as_ref()
        .map(|token| CalendarClient::new(token.clone(), config.calendar.calendar_id.clone()));

    let events = load_events(&config, calendar.as_ref()).await;

    let mut out = String::new();
    for day in window_days() {
        let todays = events_for_day(&events, &day);
        if todays.is_empty() {
            continue;
        }
        out.push_str(&format!("{day}\n"));
        for event in todays {
            let when = event
                .start
                .date_time
                .as_deref()
                .map_or_else(|| "all day".to_owned(), ToOwned::to_owned);
            let owner = owner_label(event.color_id.as_deref()).unwrap_or("");
            out.push_str(&format!("  {when:<25} {:<30} {owner}\n", event.summary));
        }
    }
    if out.is_empty() {
        out.push_str("No events in the planning window.\n");
    }
    print!("{out}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Calendar window
// ---------------------------------------------------------------------------

/// Fetch the planning window from Google Calendar, or fall back to the
/// built-in demo data when no token is configured.
async fn load_events(config: &TandemConfig, calendar: Option<&CalendarClient>) -> Vec<CalendarEvent> {
    match calendar {
        Some(client) => {
            match client
                .list_events(&window_start_rfc3339(), config.calendar.max_events)
                .await
            {
                Ok(events) => events,
                Err(e) => {
                    tracing::warn!(error = %e, "calendar fetch failed, using demo data");
                    demo::demo_events()
                }
            }
        }
        None => {
            info!("no calendar token configured, using demo data");
            demo::demo_events()
        }
    }
}

/// Monday of the current week, the start of the two-week planning window.
fn window_start() -> chrono::NaiveDate {
    let today = chrono::Local::now().date_naive();
    let weekday = today.weekday().num_days_from_monday();
    today
        .checked_sub_days(chrono::Days::new(u64::from(weekday)))
        .unwrap_or(today)
}

fn window_start_rfc3339() -> String {
    window_start().format("%Y-%m-%dT00:00:00Z").to_string()
}

/// The fourteen ISO dates of the planning window.
fn window_days() -> Vec<String> {
    let start = window_start();
    (0..14u64)
        .filter_map(|offset| start.checked_add_days(chrono::Days::new(offset)))
        .map(|day| day.format("%Y-%m-%d").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_schedule(days: &[&ScheduleDay]) -> String {
    if days.is_empty() {
        return "No schedule yet — ask for one.\n".to_owned();
    }
    let mut out = String::new();
    for day in days {
        if day.label.is_empty() {
            out.push_str(&format!("{}\n", day.date));
        } else {
            out.push_str(&format!("{} ({})\n", day.date, day.label));
        }
        for block in &day.blocks {
            let span = if block.start.is_empty() && block.end.is_empty() {
                "         ".to_owned()
            } else {
                format!("{}-{}", block.start, block.end)
            };
            out.push_str(&format!("  {span:<13} {:<28} {}", block.title, block.who.token()));
            if !block.note.is_empty() {
                out.push_str(&format!("  ({})", block.note));
            }
            out.push('\n');
        }
    }
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_fairness(summary: &FairnessSummary) -> String {
    let mut out = String::from("Hours over the two-week window:\n");
    for (person, categories) in &summary.0 {
        out.push_str(&format!("  {person}\n"));
        for (category, hours) in categories {
            // Clamped to the window's ceiling, so the cast cannot truncate.
            let bar = "#".repeat(hours.round().clamp(0.0, 60.0) as usize);
            out.push_str(&format!("    {category:<12} {hours:>6.1}h  {bar}\n"));
        }
    }
    out
}
