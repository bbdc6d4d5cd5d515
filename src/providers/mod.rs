//! Model endpoint abstraction.
//!
//! Defines the [`ModelClient`] trait and the shared request/response types.
//! One provider is implemented: [`anthropic::AnthropicClient`], the
//! Anthropic `/v1/messages` API. The trait seam keeps the chat session
//! testable with a scripted fake.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod anthropic;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Conversation participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human user message.
    User,
    /// Assistant (model) message.
    Assistant,
}

/// A message in a conversation with the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author.
    pub role: Role,
    /// Plain text content.
    pub content: String,
}

impl ChatMessage {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// A request to the model for one completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation history including the latest user message.
    pub messages: Vec<ChatMessage>,
    /// System prompt (injected before messages).
    pub system: Option<String>,
    /// Maximum tokens in the response.
    pub max_tokens: Option<u32>,
}

/// The reason a completion stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Normal end of turn.
    EndTurn,
    /// Max token limit reached — the reply text is likely truncated and
    /// the parsing pipeline should expect a recovery pass.
    MaxTokens,
    /// Provider-specific other reason.
    Other(String),
}

/// Token usage statistics for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageStats {
    /// Tokens used in the prompt/input.
    pub input_tokens: u32,
    /// Tokens generated in the response.
    pub output_tokens: u32,
}

/// The response from the model.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Concatenated text of the reply.
    pub text: String,
    /// Why the model stopped.
    pub stop_reason: StopReason,
    /// Token usage.
    pub usage: UsageStats,
    /// The model identifier that served this response.
    pub model: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by the model endpoint.
///
/// Every failure here is terminal for the turn; nothing retries
/// automatically — the user resends.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// No API key configured. Fatal for the request, never retried.
    #[error("no Anthropic API key configured")]
    MissingCredential,
    /// HTTP transport failure, including client-side timeout.
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response body did not match the expected schema; carries a
    /// truncated raw snippet for diagnostics.
    #[error("model response parse error: {0}")]
    Parse(String),
    /// Upstream responded with an error status.
    #[error("model endpoint returned status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized, truncated response body.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Check HTTP response status and return body text or a structured error.
///
/// # Errors
///
/// Returns `ModelError::Request` on transport failure, `ModelError::HttpStatus`
/// on non-2xx (with a sanitized body).
pub async fn check_http_response(response: reqwest::Response) -> Result<String, ModelError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ModelError::HttpStatus {
            status: status.as_u16(),
            body: sanitize_http_error_body(&body),
        });
    }
    Ok(body)
}

/// Collapse whitespace, redact anything key-shaped, and cap the length.
///
/// Error bodies end up in logs and user-facing messages; they must never
/// leak a credential that an upstream echoed back.
pub fn sanitize_http_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sanitized = collapsed;
    for pattern in [r"sk-ant-[A-Za-z0-9_\-]{10,}", r"ya29\.[A-Za-z0-9_\-]{20,}"] {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Core model endpoint interface.
///
/// Implementations must be `Send + Sync` for use across async boundaries.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Request a completion from the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] on API, network, or parse failure.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ModelError>;

    /// The model identifier string this client is instantiated for.
    fn model_id(&self) -> &str;
}
