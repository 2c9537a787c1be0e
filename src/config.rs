//! Configuration management for relaybox
//!
//! Settings are loaded from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `RELAYBOX_PRIMARY_PROVIDER`: primary provider (openai|claude|gemini|grok|groq|ollama) - default: "openai"
//! - `RELAYBOX_PRIMARY_MODEL`: model used for the primary attempt - default: per provider, see [`default_model_for`]
//! - `RELAYBOX_REQUEST_TIMEOUT`: per-request timeout in seconds - default: "60"
//! - `RELAYBOX_MAX_TOKENS`: default response bound - default: "350"
//! - `RELAYBOX_MAX_MODELS`: default number of secondary models per query - default: "4"
//! - `RELAYBOX_LOG_LEVEL`: logging level - default: "info"
//!
//! Provider credentials are read by genai from the standard variables
//! (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GEMINI_API_KEY`, `XAI_API_KEY`, `GROQ_API_KEY`).

use genai::adapter::AdapterKind;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_TOKENS: u32 = 350;
pub const DEFAULT_MAX_MODELS: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider: {0}. Valid options: openai, claude, gemini, grok, groq, ollama")]
    InvalidProvider(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone)]
pub struct RelayboxConfig {
    pub primary_provider: AdapterKind,
    pub primary_model: String,
    pub request_timeout_secs: u64,
    pub max_tokens: u32,
    pub max_models: usize,
    pub log_level: String,
}

/// Maps a user-facing provider name onto a genai adapter
pub fn parse_provider(name: &str) -> Result<AdapterKind, ConfigError> {
    match name.to_lowercase().as_str() {
        "openai" => Ok(AdapterKind::OpenAI),
        "claude" | "anthropic" => Ok(AdapterKind::Anthropic),
        "gemini" => Ok(AdapterKind::Gemini),
        "grok" | "xai" => Ok(AdapterKind::Xai),
        "groq" => Ok(AdapterKind::Groq),
        "ollama" => Ok(AdapterKind::Ollama),
        _ => Err(ConfigError::InvalidProvider(name.to_string())),
    }
}

/// Model used for the primary attempt when `RELAYBOX_PRIMARY_MODEL` is unset
pub fn default_model_for(provider: AdapterKind) -> &'static str {
    match provider {
        AdapterKind::Anthropic => "claude-3-5-haiku-latest",
        AdapterKind::Gemini => "gemini-2.0-flash",
        AdapterKind::Xai => "grok-3-mini",
        AdapterKind::Groq => "llama-3.1-8b-instant",
        AdapterKind::Ollama => "qwen2.5:7b",
        _ => "gpt-4o-mini",
    }
}

fn provider_from_env() -> Result<AdapterKind, ConfigError> {
    match env::var("RELAYBOX_PRIMARY_PROVIDER") {
        Ok(name) => parse_provider(&name),
        Err(_) => Ok(AdapterKind::OpenAI),
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::ParseError {
            field: key.to_string(),
            error: format!("'{}': {}", raw, e),
        }),
        Err(_) => Ok(default),
    }
}

fn model_from_env(provider: AdapterKind) -> String {
    env::var("RELAYBOX_PRIMARY_MODEL").unwrap_or_else(|_| default_model_for(provider).to_string())
}

fn log_level_from_env() -> String {
    env::var("RELAYBOX_LOG_LEVEL")
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
        .to_lowercase()
}

/// Lenient: unparseable variables fall back to their defaults.
/// Use [`RelayboxConfig::from_env`] to surface them instead.
impl Default for RelayboxConfig {
    fn default() -> Self {
        let primary_provider = provider_from_env().unwrap_or(AdapterKind::OpenAI);

        Self {
            primary_provider,
            primary_model: model_from_env(primary_provider),
            request_timeout_secs: parse_env(
                "RELAYBOX_REQUEST_TIMEOUT",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_tokens: parse_env("RELAYBOX_MAX_TOKENS", DEFAULT_MAX_TOKENS)
                .unwrap_or(DEFAULT_MAX_TOKENS),
            max_models: parse_env("RELAYBOX_MAX_MODELS", DEFAULT_MAX_MODELS)
                .unwrap_or(DEFAULT_MAX_MODELS),
            log_level: log_level_from_env(),
        }
    }
}

impl RelayboxConfig {
    /// Loads the environment configuration, rejecting unknown providers and
    /// non-numeric limits
    pub fn from_env() -> Result<Self, ConfigError> {
        let primary_provider = provider_from_env()?;

        Ok(Self {
            primary_provider,
            primary_model: model_from_env(primary_provider),
            request_timeout_secs: parse_env(
                "RELAYBOX_REQUEST_TIMEOUT",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            max_tokens: parse_env("RELAYBOX_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            max_models: parse_env("RELAYBOX_MAX_MODELS", DEFAULT_MAX_MODELS)?,
            log_level: log_level_from_env(),
        })
    }
}

impl RelayboxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Primary model name cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 3600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 1 hour".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max tokens must be at least 1".to_string(),
            ));
        }
        if self.max_tokens > 128_000 {
            return Err(ConfigError::ValidationFailed(
                "Max tokens cannot exceed 128000".to_string(),
            ));
        }

        if self.max_models == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max models must be at least 1".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for RelayboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Relaybox Configuration:")?;
        writeln!(f, "  Primary Provider: {:?}", self.primary_provider)?;
        writeln!(f, "  Primary Model: {}", self.primary_model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Max Tokens: {}", self.max_tokens)?;
        writeln!(f, "  Max Models: {}", self.max_models)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn valid_config() -> RelayboxConfig {
        RelayboxConfig {
            primary_provider: AdapterKind::OpenAI,
            primary_model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 60,
            max_tokens: 350,
            max_models: 4,
            log_level: "info".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = [
            EnvGuard::unset("RELAYBOX_PRIMARY_PROVIDER"),
            EnvGuard::unset("RELAYBOX_PRIMARY_MODEL"),
            EnvGuard::unset("RELAYBOX_REQUEST_TIMEOUT"),
            EnvGuard::unset("RELAYBOX_MAX_TOKENS"),
            EnvGuard::unset("RELAYBOX_MAX_MODELS"),
            EnvGuard::unset("RELAYBOX_LOG_LEVEL"),
        ];

        let config = RelayboxConfig::default();

        assert!(matches!(config.primary_provider, AdapterKind::OpenAI));
        assert_eq!(config.primary_model, "gpt-4o-mini");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.max_models, DEFAULT_MAX_MODELS);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = [
            EnvGuard::set("RELAYBOX_PRIMARY_PROVIDER", "claude"),
            EnvGuard::set("RELAYBOX_PRIMARY_MODEL", "claude-3-5-haiku-latest"),
            EnvGuard::set("RELAYBOX_REQUEST_TIMEOUT", "15"),
            EnvGuard::set("RELAYBOX_MAX_TOKENS", "1024"),
            EnvGuard::set("RELAYBOX_MAX_MODELS", "2"),
            EnvGuard::set("RELAYBOX_LOG_LEVEL", "DEBUG"),
        ];

        let config = RelayboxConfig::default();

        assert!(matches!(config.primary_provider, AdapterKind::Anthropic));
        assert_eq!(config.primary_model, "claude-3-5-haiku-latest");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.max_models, 2);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_default_model_routes_to_configured_provider() {
        let _model = EnvGuard::unset("RELAYBOX_PRIMARY_MODEL");

        for name in ["openai", "claude", "gemini", "grok", "groq", "ollama"] {
            let _provider = EnvGuard::set("RELAYBOX_PRIMARY_PROVIDER", name);
            let config = RelayboxConfig::default();

            assert_eq!(
                AdapterKind::from_model(&config.primary_model).unwrap(),
                config.primary_provider,
                "default model {} for {}",
                config.primary_model,
                name
            );
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_provider() {
        let _guard = EnvGuard::set("RELAYBOX_PRIMARY_PROVIDER", "watson");

        match RelayboxConfig::from_env() {
            Err(ConfigError::InvalidProvider(name)) => assert_eq!(name, "watson"),
            other => panic!("Expected InvalidProvider, got {:?}", other),
        }
        assert!(matches!(
            RelayboxConfig::default().primary_provider,
            AdapterKind::OpenAI
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_limits() {
        let _provider = EnvGuard::unset("RELAYBOX_PRIMARY_PROVIDER");

        for key in [
            "RELAYBOX_REQUEST_TIMEOUT",
            "RELAYBOX_MAX_TOKENS",
            "RELAYBOX_MAX_MODELS",
        ] {
            let _guard = EnvGuard::set(key, "lots");

            match RelayboxConfig::from_env() {
                Err(ConfigError::ParseError { field, error }) => {
                    assert_eq!(field, key);
                    assert!(error.contains("lots"));
                }
                other => panic!("Expected ParseError for {}, got {:?}", key, other),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_ignores_non_numeric_limits() {
        let _guard = EnvGuard::set("RELAYBOX_MAX_MODELS", "-3");

        assert_eq!(RelayboxConfig::default().max_models, DEFAULT_MAX_MODELS);
    }

    #[test]
    #[serial]
    fn test_from_env_matches_default_for_valid_environment() {
        let _guards = [
            EnvGuard::set("RELAYBOX_PRIMARY_PROVIDER", "gemini"),
            EnvGuard::unset("RELAYBOX_PRIMARY_MODEL"),
            EnvGuard::set("RELAYBOX_MAX_TOKENS", " 512 "),
            EnvGuard::unset("RELAYBOX_REQUEST_TIMEOUT"),
            EnvGuard::unset("RELAYBOX_MAX_MODELS"),
        ];

        let config = RelayboxConfig::from_env().unwrap();
        assert!(matches!(config.primary_provider, AdapterKind::Gemini));
        assert_eq!(config.primary_model, "gemini-2.0-flash");
        assert_eq!(config.max_tokens, 512);
    }

    #[test]
    fn test_parse_provider() {
        assert!(matches!(parse_provider("Gemini"), Ok(AdapterKind::Gemini)));
        assert!(matches!(parse_provider("grok"), Ok(AdapterKind::Xai)));
        assert!(matches!(
            parse_provider("watson"),
            Err(ConfigError::InvalidProvider(_))
        ));
    }

    #[test]
    fn test_validation_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let config = RelayboxConfig {
            max_tokens: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());

        let config = RelayboxConfig {
            max_models: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());

        let config = RelayboxConfig {
            request_timeout_secs: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let config = RelayboxConfig {
            log_level: "loud".to_string(),
            ..valid_config()
        };

        match config.validate() {
            Err(ConfigError::ValidationFailed(msg)) => assert!(msg.contains("loud")),
            other => panic!("Expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        let rendered = valid_config().to_string();
        assert!(rendered.contains("Primary Model: gpt-4o-mini"));
        assert!(rendered.contains("Max Models: 4"));
    }
}
