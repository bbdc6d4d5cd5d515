//! Token-aware conversation trimming.
//!
//! The calendar snapshot is re-injected every turn, so long conversations
//! grow fast. Trimming keeps the first message (sets the planning frame)
//! and the most recent messages, dropping the oldest middle turns first.

use crate::providers::ChatMessage;

/// Approximate tokens-per-character ratio for estimation.
///
/// English text averages roughly 4 characters per token. Intentionally
/// conservative (overestimates token count) to avoid exceeding limits.
const CHARS_PER_TOKEN: u64 = 4;

/// Trim a conversation to fit within a token budget.
///
/// Strategy:
/// - Always keep the first message and the last message
/// - Drop oldest messages from the middle until under budget
/// - If even first+last exceed the budget, keep only the last
pub fn trim_messages(messages: &[ChatMessage], max_context_tokens: u64) -> Vec<ChatMessage> {
    if messages.is_empty() {
        return Vec::new();
    }

    if estimate_messages_tokens(messages) <= max_context_tokens || messages.len() <= 2 {
        return messages.to_vec();
    }

    let first = &messages[0];
    let last = &messages[messages.len().saturating_sub(1)];
    let fixed_cost = estimate_message_tokens(first).saturating_add(estimate_message_tokens(last));

    if fixed_cost >= max_context_tokens {
        return vec![last.clone()];
    }

    let mut remaining_budget = max_context_tokens.saturating_sub(fixed_cost);
    let middle = &messages[1..messages.len().saturating_sub(1)];

    // Walk backwards through the middle, keeping the most recent turns.
    let mut kept_middle: Vec<ChatMessage> = Vec::new();
    for msg in middle.iter().rev() {
        let cost = estimate_message_tokens(msg);
        if cost <= remaining_budget {
            kept_middle.push(msg.clone());
            remaining_budget = remaining_budget.saturating_sub(cost);
        } else {
            break;
        }
    }
    kept_middle.reverse();

    let mut result = Vec::with_capacity(kept_middle.len().saturating_add(2));
    result.push(first.clone());
    result.extend(kept_middle);
    result.push(last.clone());
    result
}

/// Estimate tokens for a slice of messages.
pub fn estimate_messages_tokens(messages: &[ChatMessage]) -> u64 {
    messages.iter().map(estimate_message_tokens).sum()
}

/// Estimate tokens for a single message using the chars-per-token heuristic.
fn estimate_message_tokens(message: &ChatMessage) -> u64 {
    let char_count = u64::try_from(message.content.len()).unwrap_or(u64::MAX);
    char_count
        .saturating_add(CHARS_PER_TOKEN.saturating_sub(1))
        .checked_div(CHARS_PER_TOKEN)
        .unwrap_or(0)
}
