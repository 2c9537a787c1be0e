//! Secondary-provider model catalog
//!
//! The catalog is static and ordered by preference; query selection always
//! takes a prefix of it.

use genai::adapter::AdapterKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend serving every catalog model
pub const SECONDARY_PROVIDER: AdapterKind = AdapterKind::Gemini;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Text,
    Multimodal,
    Advanced,
    Lightweight,
    /// Only carried by the synthetic outcome produced when every model failed
    Fallback,
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModelCategory::Text => "text",
            ModelCategory::Multimodal => "multimodal",
            ModelCategory::Advanced => "advanced",
            ModelCategory::Lightweight => "lightweight",
            ModelCategory::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub name: &'static str,
    pub category: ModelCategory,
}

impl ModelDescriptor {
    pub const fn new(name: &'static str, category: ModelCategory) -> Self {
        Self { name, category }
    }
}

pub const DEFAULT_CATALOG: &[ModelDescriptor] = &[
    ModelDescriptor::new("gemini-2.0-flash", ModelCategory::Text),
    ModelDescriptor::new("gemini-1.5-flash", ModelCategory::Multimodal),
    ModelDescriptor::new("gemini-1.5-pro", ModelCategory::Advanced),
    ModelDescriptor::new("gemini-1.5-flash-8b", ModelCategory::Lightweight),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCatalog {
    entries: &'static [ModelDescriptor],
}

impl ModelCatalog {
    pub const fn new(entries: &'static [ModelDescriptor]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [ModelDescriptor] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first `max_models` entries, in catalog order
    pub fn select(&self, max_models: usize) -> &'static [ModelDescriptor] {
        &self.entries[..max_models.min(self.entries.len())]
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG)
    }
}
