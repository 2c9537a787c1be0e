//! relaybox - multi-model LLM dispatch
//!
//! Sends a conversation to a primary LLM provider and to a catalog of
//! secondary models, then aggregates the answers under a selectable policy.
//!
//! # Core Concepts
//!
//! - **Provider clients**: the primary (single-model) and secondary
//!   (multi-model) backends, built lazily once per process
//! - **Multi-model query**: concurrent fan-out over the leading catalog
//!   models, reduced in `parallel` or `fallback` mode
//! - **Fallback chain**: primary first, secondary catalog second, and a
//!   fixed apology if everything fails
//!
//! # Example Usage
//!
//! ```no_run
//! use relaybox::{process_with_fallback, ChatMessage};
//!
//! # async fn example() {
//! let messages = vec![
//!     ChatMessage::system("Answer in one sentence."),
//!     ChatMessage::user("What does the borrow checker do?"),
//! ];
//! let answer = process_with_fallback(&messages, 350).await;
//! println!("{}", answer);
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod providers;
pub mod util;

pub use config::{ConfigError, RelayboxConfig};
pub use dispatch::{
    process_multi_model_query, process_with_fallback, AggregationMode, FallbackOrchestrator,
    ModelCatalog, ModelCategory, ModelDescriptor, ModelOutcome, MultiModelExecutor, QueryOptions,
};
pub use error::BackendError;
pub use llm::{ChatMessage, LLMClient, MessageRole};
pub use providers::{primary_client, secondary_client, ProviderClients};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_relaybox() {
        assert_eq!(NAME, "relaybox");
    }
}
