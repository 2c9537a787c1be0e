//! Multi-model query executor
//!
//! Fans one conversation out to several secondary-provider models at once,
//! joins every call, then reduces the outcomes by aggregation mode.
//!
//! In `fallback` mode the first success in catalog order wins, but sibling
//! calls are not cancelled: every launched call runs to completion so that
//! its result is logged.

use super::catalog::{ModelCatalog, ModelDescriptor};
use super::options::{AggregationMode, QueryOptions};
use super::outcome::ModelOutcome;
use super::prompt::flatten_messages;
use crate::error::BackendError;
use crate::llm::{ChatMessage, LLMClient, LLMRequest};
use crate::providers::ProviderClients;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct MultiModelExecutor {
    clients: Arc<ProviderClients>,
    catalog: ModelCatalog,
}

impl MultiModelExecutor {
    pub fn new(clients: Arc<ProviderClients>) -> Self {
        Self::with_catalog(clients, ModelCatalog::default())
    }

    pub fn with_catalog(clients: Arc<ProviderClients>, catalog: ModelCatalog) -> Self {
        Self { clients, catalog }
    }

    /// Queries the leading catalog models concurrently and reduces their outcomes.
    ///
    /// Per-model failures never surface as errors; only a secondary provider
    /// that cannot be initialized does.
    pub async fn process_multi_model_query(
        &self,
        messages: &[ChatMessage],
        options: &QueryOptions,
    ) -> Result<Vec<ModelOutcome>, BackendError> {
        let options = options.normalized();
        let client = self.clients.secondary().await?;

        let selected = self.catalog.select(options.max_models);
        let prompt = flatten_messages(messages);

        debug!(
            mode = %options.mode,
            models = selected.len(),
            max_tokens = options.max_tokens,
            "Dispatching multi-model query"
        );

        let calls = selected.iter().map(|descriptor| {
            query_model(client.as_ref(), descriptor, &prompt, options.max_tokens)
        });
        let outcomes = join_all(calls).await;

        let succeeded = outcomes.iter().filter(|o| o.succeeded).count();
        info!(
            "Multi-model query settled: {}/{} models succeeded",
            succeeded,
            outcomes.len()
        );

        Ok(reduce(outcomes, options.mode))
    }
}

async fn query_model(
    client: &dyn LLMClient,
    descriptor: &ModelDescriptor,
    prompt: &str,
    max_tokens: u32,
) -> ModelOutcome {
    let request = LLMRequest::new(vec![ChatMessage::user(prompt)])
        .with_model(descriptor.name)
        .with_max_tokens(max_tokens);

    let result = client.chat(request).await.and_then(|response| {
        if response.is_blank() {
            Err(BackendError::EmptyResponse {
                model: descriptor.name.to_string(),
            })
        } else {
            Ok(response)
        }
    });

    match result {
        Ok(response) => {
            debug!(
                model = descriptor.name,
                elapsed_ms = response.response_time.as_millis() as u64,
                "Model call succeeded"
            );
            ModelOutcome::success(descriptor, response.content)
        }
        Err(e) => {
            warn!("Model {} failed: {}", descriptor.name, e);
            ModelOutcome::failure(descriptor)
        }
    }
}

/// Reduces launch-ordered outcomes according to `mode`
pub fn reduce(outcomes: Vec<ModelOutcome>, mode: AggregationMode) -> Vec<ModelOutcome> {
    match mode {
        AggregationMode::Parallel => outcomes.into_iter().filter(|o| o.succeeded).collect(),
        AggregationMode::Fallback => {
            let winner = outcomes
                .into_iter()
                .find(|o| o.succeeded)
                .unwrap_or_else(ModelOutcome::exhausted);
            vec![winner]
        }
    }
}
