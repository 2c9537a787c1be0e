use super::factory::{ClientFactory, GenAIClientFactory, ProviderRole};
use crate::config::RelayboxConfig;
use crate::error::BackendError;
use crate::llm::LLMClient;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Lazily built, shared handles to the primary and secondary providers.
///
/// Each handle is constructed by the first caller that needs it. Concurrent
/// first callers wait on the same initialization and receive the same handle.
/// A failed initialization leaves the slot empty, so the next caller retries.
pub struct ProviderClients {
    factory: Arc<dyn ClientFactory>,
    primary: OnceCell<Arc<dyn LLMClient>>,
    secondary: OnceCell<Arc<dyn LLMClient>>,
}

impl ProviderClients {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        debug!("Creating ProviderClients - client construction deferred until first use");
        Self {
            factory,
            primary: OnceCell::new(),
            secondary: OnceCell::new(),
        }
    }

    pub fn from_config(config: RelayboxConfig) -> Self {
        Self::new(Arc::new(GenAIClientFactory::new(config)))
    }

    pub async fn primary(&self) -> Result<Arc<dyn LLMClient>, BackendError> {
        self.client(ProviderRole::Primary).await
    }

    pub async fn secondary(&self) -> Result<Arc<dyn LLMClient>, BackendError> {
        self.client(ProviderRole::Secondary).await
    }

    pub async fn client(&self, role: ProviderRole) -> Result<Arc<dyn LLMClient>, BackendError> {
        let client = self
            .slot(role)
            .get_or_try_init(|| async {
                debug!("Lazy initialization triggered for {} provider", role);
                match self.factory.create(role).await {
                    Ok(client) => {
                        info!("{} provider ready: {}", role, client.name());
                        Ok(client)
                    }
                    Err(e) => {
                        warn!("Failed to initialize {} provider: {}", role, e);
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(Arc::clone(client))
    }

    pub fn is_initialized(&self, role: ProviderRole) -> bool {
        self.slot(role).initialized()
    }

    fn slot(&self, role: ProviderRole) -> &OnceCell<Arc<dyn LLMClient>> {
        match role {
            ProviderRole::Primary => &self.primary,
            ProviderRole::Secondary => &self.secondary,
        }
    }
}

impl std::fmt::Debug for ProviderClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClients")
            .field("primary_initialized", &self.primary.initialized())
            .field("secondary_initialized", &self.secondary.initialized())
            .finish()
    }
}

static GLOBAL: OnceLock<Arc<ProviderClients>> = OnceLock::new();

/// Process-wide holder, built from the environment configuration on first use
pub fn global() -> Arc<ProviderClients> {
    GLOBAL
        .get_or_init(|| Arc::new(ProviderClients::from_config(RelayboxConfig::default())))
        .clone()
}

/// Replaces the environment-built global holder; only possible before first use
pub fn install_global(clients: Arc<ProviderClients>) -> Result<(), Arc<ProviderClients>> {
    GLOBAL.set(clients)
}

pub async fn primary_client() -> Result<Arc<dyn LLMClient>, BackendError> {
    global().primary().await
}

pub async fn secondary_client() -> Result<Arc<dyn LLMClient>, BackendError> {
    global().secondary().await
}
