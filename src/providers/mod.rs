//! Provider client holder
//!
//! Owns the one-time construction of the primary and secondary provider
//! clients and hands out shared handles afterwards.

mod factory;
mod holder;

pub use factory::{ClientFactory, GenAIClientFactory, ProviderRole, StaticClientFactory};
pub use holder::{global, install_global, primary_client, secondary_client, ProviderClients};
