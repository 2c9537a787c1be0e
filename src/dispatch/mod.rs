//! Query dispatch and aggregation
//!
//! - [`MultiModelExecutor`]: concurrent fan-out over the secondary catalog
//! - [`FallbackOrchestrator`]: primary provider first, secondary catalog second
//!
//! The free functions at the bottom run against the process-wide provider
//! holder from [`crate::providers::global`].

pub mod catalog;
pub mod executor;
pub mod options;
pub mod orchestrator;
pub mod outcome;
pub mod prompt;

pub use catalog::{ModelCatalog, ModelCategory, ModelDescriptor, DEFAULT_CATALOG};
pub use executor::MultiModelExecutor;
pub use options::{AggregationMode, QueryOptions};
pub use orchestrator::{FallbackOrchestrator, APOLOGY_MESSAGE, NO_RESPONSE_MESSAGE};
pub use outcome::ModelOutcome;

use crate::error::BackendError;
use crate::llm::ChatMessage;
use crate::providers;

pub async fn process_multi_model_query(
    messages: &[ChatMessage],
    options: &QueryOptions,
) -> Result<Vec<ModelOutcome>, BackendError> {
    MultiModelExecutor::new(providers::global())
        .process_multi_model_query(messages, options)
        .await
}

pub async fn process_with_fallback(messages: &[ChatMessage], max_tokens: u32) -> String {
    FallbackOrchestrator::new(providers::global())
        .process_with_fallback(messages, max_tokens)
        .await
}
