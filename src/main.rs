use relaybox::cli::commands::{CliArgs, Commands};
use relaybox::cli::handlers::{handle_ask, handle_config, handle_models, handle_query};
use relaybox::config::{RelayboxConfig, DEFAULT_LOG_LEVEL};
use relaybox::providers::{install_global, ProviderClients};
use relaybox::util::logging::{init_logging, parse_level, LoggingConfig};
use relaybox::{NAME, VERSION};

use clap::Parser;
use std::env;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let config = match RelayboxConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };
    if let Err(e) = config.validate() {
        if !matches!(args.command, Commands::Config) {
            error!("{}", e);
            process::exit(2);
        }
    }

    let clients = Arc::new(ProviderClients::from_config(config.clone()));
    if install_global(clients).is_err() {
        debug!("Provider holder already installed");
    }

    let exit_code = match &args.command {
        Commands::Ask(ask_args) => handle_ask(ask_args, &config).await,
        Commands::Query(query_args) => handle_query(query_args, &config).await,
        Commands::Models(models_args) => handle_models(models_args),
        Commands::Config => handle_config(&config),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str =
            env::var("RELAYBOX_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        parse_level(&level_str)
    };

    let use_json = env::var("RELAYBOX_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..LoggingConfig::default()
    });
}
