//! GenAI-based LLM client implementation
//!
//! This module provides an LLM client implementation using the `genai` crate,
//! which speaks to OpenAI, Anthropic, Gemini, xAI, Groq and Ollama behind one API.

use super::client::LLMClient;
use super::types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
use crate::error::BackendError;
use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage as GenAIChatMessage, ChatOptions, ChatRequest as GenAIChatRequest};
use genai::Client;
use std::time::Duration;
use tracing::{debug, error};

/// GenAI-based LLM client
///
/// One instance serves every model of its provider: the default model is used
/// unless the request names another one.
pub struct GenAIClient {
    /// GenAI client instance
    client: Client,
    /// Default model name
    model: String,
    /// Provider type
    provider: AdapterKind,
    /// Request timeout
    timeout: Duration,
}

/// Fails with a configuration error when the provider's API key variable is unset
pub fn require_credential(provider: AdapterKind) -> Result<(), BackendError> {
    match provider.default_key_env_name() {
        None => Ok(()),
        Some(env_var) => match std::env::var(env_var) {
            Ok(value) if !value.trim().is_empty() => Ok(()),
            _ => Err(BackendError::configuration(format!(
                "{} requires the {} environment variable",
                provider.as_str(),
                env_var
            ))),
        },
    }
}

/// Namespaces `model` with the provider so genai never infers another adapter
/// from the model name
pub fn qualified_model(provider: AdapterKind, model: &str) -> String {
    if model.contains("::") {
        model.to_string()
    } else {
        format!("{}::{}", provider.as_lower_str(), model)
    }
}

impl GenAIClient {
    /// Creates a new GenAI client
    ///
    /// # Arguments
    ///
    /// * `provider` - LLM provider to use
    /// * `model` - Default model name (without provider prefix)
    /// * `timeout` - Request timeout
    pub async fn new(
        provider: AdapterKind,
        model: String,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        require_credential(provider)?;

        debug!(
            "Creating GenAI client: provider={}, model={}",
            provider.as_str(),
            model,
        );

        Ok(Self {
            client: Client::default(),
            model,
            provider,
            timeout,
        })
    }

    /// Converts our ChatMessage to genai ChatMessage
    fn convert_message(&self, msg: &ChatMessage) -> GenAIChatMessage {
        match msg.role {
            MessageRole::System => GenAIChatMessage::system(&msg.content),
            MessageRole::User => GenAIChatMessage::user(&msg.content),
            MessageRole::Assistant => GenAIChatMessage::assistant(&msg.content),
        }
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let start = std::time::Instant::now();
        let model = request.model.clone().unwrap_or_else(|| self.model.clone());
        let target = qualified_model(self.provider, &model);

        let messages: Vec<GenAIChatMessage> = request
            .messages
            .iter()
            .map(|m| self.convert_message(m))
            .collect();

        let genai_request = GenAIChatRequest::new(messages);

        let mut options = ChatOptions::default();
        if let Some(max_tokens) = request.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }

        let response = match tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&target, genai_request, Some(&options)),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!("{} API error for {}: {}", self.provider.as_str(), model, e);
                return Err(BackendError::ApiError {
                    message: format!("{} request failed: {}", self.provider.as_str(), e),
                    status_code: None,
                });
            }
            Err(_) => {
                error!(
                    "{} request for {} timed out after {}s",
                    self.provider.as_str(),
                    model,
                    self.timeout.as_secs()
                );
                return Err(BackendError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let content = response.first_text().unwrap_or_default().to_string();

        Ok(LLMResponse::text(content, start.elapsed()).with_model(model))
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
