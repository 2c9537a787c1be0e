use crate::config::RelayboxConfig;
use crate::dispatch::catalog::{ModelCatalog, SECONDARY_PROVIDER};
use crate::error::BackendError;
use crate::llm::{GenAIClient, LLMClient};
use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// The two backends the dispatcher talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderRole {
    /// Single-model backend tried first
    Primary,
    /// Multi-model backend queried in batches
    Secondary,
}

impl fmt::Display for ProviderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderRole::Primary => write!(f, "primary"),
            ProviderRole::Secondary => write!(f, "secondary"),
        }
    }
}

/// Builds provider clients on demand
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn create(&self, role: ProviderRole) -> Result<Arc<dyn LLMClient>, BackendError>;
}

/// Builds GenAI clients from the environment configuration
#[derive(Debug, Clone)]
pub struct GenAIClientFactory {
    config: RelayboxConfig,
}

impl GenAIClientFactory {
    pub fn new(config: RelayboxConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ClientFactory for GenAIClientFactory {
    async fn create(&self, role: ProviderRole) -> Result<Arc<dyn LLMClient>, BackendError> {
        let timeout = Duration::from_secs(self.config.request_timeout_secs);

        let client = match role {
            ProviderRole::Primary => {
                GenAIClient::new(
                    self.config.primary_provider,
                    self.config.primary_model.clone(),
                    timeout,
                )
                .await?
            }
            ProviderRole::Secondary => {
                let default_model = ModelCatalog::default()
                    .entries()
                    .first()
                    .map(|d| d.name.to_string())
                    .unwrap_or_default();
                GenAIClient::new(SECONDARY_PROVIDER, default_model, timeout).await?
            }
        };

        Ok(Arc::new(client))
    }
}

/// Hands out pre-built clients
///
/// A role without a client fails with a configuration error, the same way a
/// missing credential does for [`GenAIClientFactory`].
#[derive(Default)]
pub struct StaticClientFactory {
    primary: Option<Arc<dyn LLMClient>>,
    secondary: Option<Arc<dyn LLMClient>>,
    created: AtomicUsize,
}

impl StaticClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, client: Arc<dyn LLMClient>) -> Self {
        self.primary = Some(client);
        self
    }

    pub fn with_secondary(mut self, client: Arc<dyn LLMClient>) -> Self {
        self.secondary = Some(client);
        self
    }

    /// Number of successful `create` calls so far
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientFactory for StaticClientFactory {
    async fn create(&self, role: ProviderRole) -> Result<Arc<dyn LLMClient>, BackendError> {
        let client = match role {
            ProviderRole::Primary => self.primary.clone(),
            ProviderRole::Secondary => self.secondary.clone(),
        }
        .ok_or_else(|| BackendError::configuration(format!("no {} client configured", role)))?;

        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(client)
    }
}

impl fmt::Debug for StaticClientFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticClientFactory")
            .field("primary", &self.primary.as_ref().map(|c| c.name().to_string()))
            .field(
                "secondary",
                &self.secondary.as_ref().map(|c| c.name().to_string()),
            )
            .field("created", &self.created())
            .finish()
    }
}
