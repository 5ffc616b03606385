// src/error.rs
use std::time::Duration;

use thiserror::Error;

use crate::config::{CLIENT_ID_VAR, CLIENT_SECRET_VAR};

/// Problems with the process configuration. Fatal until the deployment is fixed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "Missing configuration: set FRANCE_TRAVAIL_CLIENT_ID and FRANCE_TRAVAIL_CLIENT_SECRET ({0} is not set)"
    )]
    MissingVariable(&'static str),

    #[error("Invalid configuration: {name}={value:?} is not a number of seconds")]
    InvalidVariable { name: &'static str, value: String },
}

impl ConfigError {
    /// Operator guidance returned next to the error message.
    pub fn help(&self) -> String {
        match self {
            ConfigError::MissingVariable(_) => format!(
                "Define {} and {} in the server environment (or a .env file) and restart the service",
                CLIENT_ID_VAR, CLIENT_SECRET_VAR
            ),
            ConfigError::InvalidVariable { name, .. } => {
                format!("Set {} to a whole number of seconds, or unset it", name)
            }
        }
    }
}

/// Failures of the token/search pipeline. Each one ends the request with a 500.
#[derive(Error, Debug)]
pub enum JobsError {
    #[error("Authentication failed: {status}")]
    Authentication { status: u16 },

    #[error("Token not received")]
    TokenNotReceived,

    #[error("API error: {status}")]
    Search { status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("Upstream request timed out after {0:?}")]
    Timeout(Duration),
}
