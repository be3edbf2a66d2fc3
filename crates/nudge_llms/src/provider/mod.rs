//! The `Provider` seam and a registry to pick one by name

mod trait_def;

pub use trait_def::Provider;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Providers by ID, shared as `Arc<dyn Provider>` once registered.
///
/// Built at startup and read-only afterwards; cloning shares the providers.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `provider` under `id`, replacing any earlier one.
    pub fn register<P: Provider + 'static>(self, id: impl Into<String>, provider: P) -> Self {
        self.register_shared(id, Arc::new(provider))
    }

    /// Same as [`register`](Self::register) for a provider that is already shared.
    pub fn register_shared(mut self, id: impl Into<String>, provider: Arc<dyn Provider>) -> Self {
        let id = id.into();
        tracing::debug!(provider = %id, "Registered provider");
        self.providers.insert(id, provider);
        self
    }

    pub fn get_provider(&self, id: &str) -> Result<Arc<dyn Provider>> {
        match self.providers.get(id) {
            Some(provider) => Ok(Arc::clone(provider)),
            None => Err(Error::ProviderNotFound(id.to_string())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    /// Registered IDs, sorted.
    pub fn list_providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }
}
