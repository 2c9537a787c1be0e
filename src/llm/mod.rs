//! LLM client abstraction layer
//!
//! This module provides a trait-based abstraction for LLM communication,
//! allowing the GenAI backend and the scripted mock to be used interchangeably.

mod client;
mod genai;
mod mock;
mod types;

pub use ::genai::adapter::AdapterKind;
pub use client::LLMClient;
pub use genai::{qualified_model, require_credential, GenAIClient};
pub use mock::{MockLLMClient, MockResponse};
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
