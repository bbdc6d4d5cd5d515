//! Configuration loading and management.
//!
//! Loads Tandem configuration from `./config.toml` (or `$TANDEM_CONFIG_PATH`).
//! Environment variables override file values; file values override defaults.
//!
//! Precedence: env vars > config file > defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

// ── Top-level config ────────────────────────────────────────────

/// Top-level Tandem configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TandemConfig {
    /// Logging settings (`[log]`).
    pub log: LogConfig,
    /// Model endpoint settings (`[assistant]`).
    pub assistant: AssistantConfig,
    /// Household names and rules knobs (`[household]`).
    pub household: HouseholdConfig,
    /// Google Calendar settings (`[calendar]`).
    pub calendar: CalendarConfig,
    /// Filesystem paths (`[paths]`).
    pub paths: PathsConfig,
}

impl TandemConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// Config file path: `$TANDEM_CONFIG_PATH` or `./config.toml`.
    /// If the file does not exist, returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_from_file() -> Result<Self> {
        let path = Self::config_path_with(|key| std::env::var(key).ok());
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                let config: TandemConfig =
                    toml::from_str(&contents).context("failed to parse config TOML")?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using defaults");
                Ok(TandemConfig::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read config file: {e}")),
        }
    }

    /// Resolve config path using a custom env resolver (for testing).
    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(p) = env("TANDEM_CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("config.toml")
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function for testability (avoids unsafe `set_var`
    /// in tests).
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("TANDEM_LOG_LEVEL") {
            self.log.level = v;
        }

        // Assistant.
        if let Some(v) = env("TANDEM_ANTHROPIC_API_KEY") {
            self.assistant.api_key = Some(v);
        }
        if let Some(v) = env("TANDEM_MODEL") {
            self.assistant.model = v;
        }
        if let Some(v) = env("TANDEM_MAX_TOKENS") {
            match v.parse() {
                Ok(n) => self.assistant.max_tokens = n,
                Err(_) => tracing::warn!(
                    var = "TANDEM_MAX_TOKENS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("TANDEM_REQUEST_TIMEOUT_SECS") {
            match v.parse() {
                Ok(n) => self.assistant.request_timeout_seconds = n,
                Err(_) => tracing::warn!(
                    var = "TANDEM_REQUEST_TIMEOUT_SECS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }

        // Household.
        if let Some(v) = env("TANDEM_PARTNER_A") {
            self.household.partner_a = v;
        }
        if let Some(v) = env("TANDEM_PARTNER_B") {
            self.household.partner_b = v;
        }

        // Calendar.
        if let Some(v) = env("TANDEM_GCAL_TOKEN") {
            self.calendar.token = Some(v);
        }
        if let Some(v) = env("TANDEM_CALENDAR_ID") {
            self.calendar.calendar_id = v;
        }

        // Paths.
        if let Some(v) = env("TANDEM_LOGS_DIR") {
            self.paths.logs_dir = v;
        }
    }

    /// Parse a TOML string into config (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: TandemConfig =
            toml::from_str(toml_str).context("failed to parse config TOML")?;
        Ok(config)
    }
}

// ── Log config ──────────────────────────────────────────────────

/// Logging settings (`[log]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Tracing log level filter.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ── Assistant config ────────────────────────────────────────────

/// Model endpoint settings (`[assistant]`).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Anthropic model name.
    pub model: String,
    /// Maximum tokens per reply. The original keeps this low (schedule
    /// payloads use abbreviated keys for the same reason), which is also
    /// why truncated replies are a normal condition for the decoder.
    pub max_tokens: u32,
    /// Client-side request timeout in seconds; expiry is a soft failure.
    pub request_timeout_seconds: u64,
    /// Token budget for the conversation window sent each turn.
    pub max_context_tokens: u64,
    /// API key; usually set via `TANDEM_ANTHROPIC_API_KEY`.
    pub api_key: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1000,
            request_timeout_seconds: 60,
            max_context_tokens: 100_000,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("max_context_tokens", &self.max_context_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "__REDACTED__"))
            .finish()
    }
}

// ── Household config ────────────────────────────────────────────

/// Partner names and household rules knobs (`[household]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HouseholdConfig {
    /// First partner's name; substituted into the system prompt.
    pub partner_a: String,
    /// Second partner's name (the traveler).
    pub partner_b: String,
    /// IANA timezone the model is instructed to use on pushed timed
    /// events (substituted into the system prompt).
    pub time_zone: String,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            partner_a: "Partner A".to_string(),
            partner_b: "Partner B".to_string(),
            time_zone: "America/New_York".to_string(),
        }
    }
}

// ── Calendar config ─────────────────────────────────────────────

/// Google Calendar settings (`[calendar]`).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Calendar identifier.
    pub calendar_id: String,
    /// OAuth bearer token; absent means demo mode.
    pub token: Option<String>,
    /// Most events fetched for the planning window.
    pub max_events: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_id: "primary".to_string(),
            token: None,
            max_events: 100,
        }
    }
}

impl std::fmt::Debug for CalendarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarConfig")
            .field("calendar_id", &self.calendar_id)
            .field("token", &self.token.as_ref().map(|_| "__REDACTED__"))
            .field("max_events", &self.max_events)
            .finish()
    }
}

// ── Paths config ────────────────────────────────────────────────

/// Filesystem paths (`[paths]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory for rotated JSON log files.
    pub logs_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let logs_dir = directories::ProjectDirs::from("", "", "tandem")
            .map(|dirs| dirs.data_local_dir().join("logs").display().to_string())
            .unwrap_or_else(|| "/tmp/tandem/logs".to_string());
        Self { logs_dir }
    }
}

// ── Tests ───────────────────────────────────────────────────────
