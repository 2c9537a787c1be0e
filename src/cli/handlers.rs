//! Subcommand handlers
//!
//! Each handler returns the process exit code. Provider calls go through the
//! process-wide holder that `main` installs.

use super::commands::{build_messages, AskArgs, ModelsArgs, QueryArgs};
use super::output::OutputFormatter;
use crate::config::RelayboxConfig;
use crate::dispatch::{
    process_multi_model_query, process_with_fallback, ModelCatalog, QueryOptions,
};
use anyhow::{Context, Result};
use tracing::{debug, error, info};

pub async fn handle_ask(args: &AskArgs, config: &RelayboxConfig) -> i32 {
    let messages = build_messages(args.system.as_deref(), &args.prompt);
    let max_tokens = args.max_tokens.unwrap_or(config.max_tokens);
    debug!("Asking with {} messages, max_tokens={}", messages.len(), max_tokens);

    let answer = process_with_fallback(&messages, max_tokens).await;

    println!("{}", answer);
    0
}

pub async fn handle_query(args: &QueryArgs, config: &RelayboxConfig) -> i32 {
    match run_query(args, config).await {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            error!("Query failed: {:#}", e);
            1
        }
    }
}

async fn run_query(args: &QueryArgs, config: &RelayboxConfig) -> Result<String> {
    let messages = build_messages(args.system.as_deref(), &args.prompt);
    let options = QueryOptions {
        mode: args.mode,
        max_models: args.max_models.unwrap_or(config.max_models),
        max_tokens: args.max_tokens.unwrap_or(config.max_tokens),
    };
    info!(
        "Querying up to {} models in {} mode",
        options.max_models, options.mode
    );

    let outcomes = process_multi_model_query(&messages, &options)
        .await
        .context("Secondary provider is not available")?;

    OutputFormatter::new(args.format.into()).format_outcomes(&outcomes)
}

pub fn handle_models(args: &ModelsArgs) -> i32 {
    match OutputFormatter::new(args.format.into()).format_catalog(&ModelCatalog::default()) {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to render catalog: {:#}", e);
            1
        }
    }
}

pub fn handle_config(config: &RelayboxConfig) -> i32 {
    print!("{}", config);
    match config.validate() {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
