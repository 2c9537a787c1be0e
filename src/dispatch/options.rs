use crate::config::{DEFAULT_MAX_MODELS, DEFAULT_MAX_TOKENS};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// How per-model outcomes are reduced into the returned set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AggregationMode {
    /// Every successful outcome, in catalog order
    #[default]
    Parallel,
    /// Only the first successful outcome in catalog order
    Fallback,
}

impl AggregationMode {
    /// Parses a mode name; anything unrecognized means `Parallel`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "parallel" => AggregationMode::Parallel,
            "fallback" => AggregationMode::Fallback,
            other => {
                warn!("Unknown aggregation mode '{}', using parallel", other);
                AggregationMode::Parallel
            }
        }
    }
}

impl From<String> for AggregationMode {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::Parallel => write!(f, "parallel"),
            AggregationMode::Fallback => write!(f, "fallback"),
        }
    }
}

/// Caller-supplied query settings
///
/// Missing fields take the defaults `mode=parallel`, `maxModels=4`,
/// `maxTokens=350`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    pub mode: AggregationMode,
    /// Upper bound on catalog entries attempted
    pub max_models: usize,
    /// Upper bound on response length requested from each model
    pub max_tokens: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            mode: AggregationMode::Parallel,
            max_models: DEFAULT_MAX_MODELS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl QueryOptions {
    pub fn parallel() -> Self {
        Self::default()
    }

    pub fn fallback() -> Self {
        Self {
            mode: AggregationMode::Fallback,
            ..Self::default()
        }
    }

    pub fn with_max_models(mut self, max_models: usize) -> Self {
        self.max_models = max_models;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Raises zero bounds to one, since both must be positive
    pub fn normalized(self) -> Self {
        Self {
            mode: self.mode,
            max_models: self.max_models.max(1),
            max_tokens: self.max_tokens.max(1),
        }
    }
}
