//! Conversation flattening for the secondary provider
//!
//! The secondary backend takes one text blob per call rather than a
//! multi-turn conversation.

use crate::llm::{ChatMessage, MessageRole};

pub const INSTRUCTION_PREFIX: &str = "Instructions: ";

/// Renders the conversation as one prompt.
///
/// User content passes through verbatim, system content becomes an
/// instruction line, and assistant turns are dropped. Order is preserved.
pub fn flatten_messages(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter_map(|m| match m.role {
            MessageRole::User => Some(m.content.clone()),
            MessageRole::System => Some(format!("{}{}", INSTRUCTION_PREFIX, m.content)),
            MessageRole::Assistant => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
