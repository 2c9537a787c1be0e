//! Primary-then-secondary fallback chain
//!
//! One attempt against the primary provider, then one fallback batch against
//! the secondary catalog. Every path ends in a user-facing string.

use super::executor::MultiModelExecutor;
use super::options::QueryOptions;
use crate::error::BackendError;
use crate::llm::{ChatMessage, LLMRequest};
use crate::providers::ProviderClients;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Models tried from the secondary catalog once the primary gave nothing
pub const FALLBACK_MAX_MODELS: usize = 4;

pub const NO_RESPONSE_MESSAGE: &str = "I couldn't generate a response. Please try again.";
pub const APOLOGY_MESSAGE: &str =
    "Sorry, something went wrong while processing your request. Please try again later.";

pub struct FallbackOrchestrator {
    clients: Arc<ProviderClients>,
    executor: MultiModelExecutor,
}

impl FallbackOrchestrator {
    pub fn new(clients: Arc<ProviderClients>) -> Self {
        let executor = MultiModelExecutor::new(Arc::clone(&clients));
        Self { clients, executor }
    }

    /// Returns the best available answer; never fails.
    pub async fn process_with_fallback(&self, messages: &[ChatMessage], max_tokens: u32) -> String {
        let attempt = AssertUnwindSafe(self.run_chain(messages, max_tokens.max(1)));

        match attempt.catch_unwind().await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                error!("Fallback chain failed: {}", e);
                APOLOGY_MESSAGE.to_string()
            }
            Err(_) => {
                error!("Fallback chain panicked");
                APOLOGY_MESSAGE.to_string()
            }
        }
    }

    async fn run_chain(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, BackendError> {
        if let Some(text) = self.try_primary(messages, max_tokens).await {
            return Ok(text);
        }

        debug!("Primary provider gave no content, trying secondary models");
        let options = QueryOptions::fallback()
            .with_max_models(FALLBACK_MAX_MODELS)
            .with_max_tokens(max_tokens);

        let outcomes = self
            .executor
            .process_multi_model_query(messages, &options)
            .await?;

        let text = outcomes
            .into_iter()
            .next()
            .and_then(|outcome| {
                if outcome.succeeded {
                    info!("Answer provided by secondary model {}", outcome.model);
                }
                outcome.response
            })
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_RESPONSE_MESSAGE.to_string());

        Ok(text)
    }

    /// Single attempt against the primary provider; `None` means "no content"
    async fn try_primary(&self, messages: &[ChatMessage], max_tokens: u32) -> Option<String> {
        let client = match self.clients.primary().await {
            Ok(client) => client,
            Err(e) => {
                warn!("Primary provider unavailable: {}", e);
                return None;
            }
        };

        let request = LLMRequest::new(messages.to_vec()).with_max_tokens(max_tokens);
        match client.chat(request).await {
            Ok(response) if !response.is_blank() => {
                info!("Answer provided by primary provider {}", client.name());
                Some(response.content)
            }
            Ok(_) => {
                warn!("Primary provider {} returned an empty response", client.name());
                None
            }
            Err(e) => {
                warn!("Primary provider {} failed: {}", client.name(), e);
                None
            }
        }
    }
}
