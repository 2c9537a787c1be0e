//! Output formatting for CLI results

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::dispatch::{ModelCatalog, ModelOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_outcomes(&self, outcomes: &[ModelOutcome]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(outcomes).context("Failed to serialize outcomes")
            }
            OutputFormat::Human => Ok(self.format_outcomes_human(outcomes)),
        }
    }

    pub fn format_catalog(&self, catalog: &ModelCatalog) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(catalog.entries())
                .context("Failed to serialize model catalog"),
            OutputFormat::Human => {
                let mut out = String::new();
                for (i, descriptor) in catalog.entries().iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "{}. {} ({})",
                        i + 1,
                        descriptor.name,
                        descriptor.category
                    );
                }
                Ok(out)
            }
        }
    }

    fn format_outcomes_human(&self, outcomes: &[ModelOutcome]) -> String {
        if outcomes.is_empty() {
            return "No model returned an answer.\n".to_string();
        }

        let mut out = String::new();
        for outcome in outcomes {
            let status = if outcome.succeeded { "ok" } else { "failed" };
            let _ = writeln!(
                out,
                "== {} [{}] {}",
                outcome.model, outcome.category, status
            );
            if let Some(response) = &outcome.response {
                let _ = writeln!(out, "{}", response.trim_end());
            }
            out.push('\n');
        }
        out
    }
}
