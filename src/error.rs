//! Provider error types
//!
//! `BackendError` covers both failures of provider initialization (missing
//! credentials) and failures of individual model calls. Call failures are
//! absorbed by the dispatch layer; only configuration failures travel upward.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur while talking to a model provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// The provider answered, but without usable text
    EmptyResponse { model: String },

    /// Invalid or malformed response from the provider
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    /// Required credential or setting is missing
    ConfigurationError { message: String },

    /// Network-related error
    NetworkError { message: String },

    /// Generic error for other cases
    Other { message: String },
}

impl BackendError {
    pub fn configuration(message: impl Into<String>) -> Self {
        BackendError::ConfigurationError {
            message: message.into(),
        }
    }

    /// True for failures that concern provider setup rather than a single call
    pub fn is_configuration(&self) -> bool {
        matches!(self, BackendError::ConfigurationError { .. })
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::EmptyResponse { model } => {
                write!(f, "Model {} returned an empty response", model)
            }
            BackendError::InvalidResponse { message, .. } => {
                write!(f, "Invalid response from provider: {}", message)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}
