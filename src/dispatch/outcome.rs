use super::catalog::{ModelCategory, ModelDescriptor};
use serde::{Deserialize, Serialize};

pub const EXHAUSTED_MODEL: &str = "Error";
pub const EXHAUSTED_RESPONSE: &str = "No models could process the query";

/// Result of one model call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOutcome {
    pub model: String,
    pub category: ModelCategory,
    pub response: Option<String>,
    pub succeeded: bool,
}

impl ModelOutcome {
    pub fn success(descriptor: &ModelDescriptor, response: impl Into<String>) -> Self {
        Self {
            model: descriptor.name.to_string(),
            category: descriptor.category,
            response: Some(response.into()),
            succeeded: true,
        }
    }

    pub fn failure(descriptor: &ModelDescriptor) -> Self {
        Self {
            model: descriptor.name.to_string(),
            category: descriptor.category,
            response: None,
            succeeded: false,
        }
    }

    /// Placeholder returned when no model produced an answer
    pub fn exhausted() -> Self {
        Self {
            model: EXHAUSTED_MODEL.to_string(),
            category: ModelCategory::Fallback,
            response: Some(EXHAUSTED_RESPONSE.to_string()),
            succeeded: false,
        }
    }
}
