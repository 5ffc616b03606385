// src/config.rs
//! Upstream API configuration, resolved once when the server is built.

use std::fmt;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;

pub const CLIENT_ID_VAR: &str = "FRANCE_TRAVAIL_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "FRANCE_TRAVAIL_CLIENT_SECRET";
pub const TOKEN_URL_VAR: &str = "FRANCE_TRAVAIL_TOKEN_URL";
pub const SEARCH_URL_VAR: &str = "FRANCE_TRAVAIL_SEARCH_URL";
pub const TIMEOUT_VAR: &str = "FRANCE_TRAVAIL_TIMEOUT_SECS";
pub const PIPELINE_TIMEOUT_VAR: &str = "FRANCE_TRAVAIL_PIPELINE_TIMEOUT_SECS";

pub const DEFAULT_TOKEN_URL: &str =
    "https://entreprise.pole-emploi.fr/connexion/oauth2/access_token";
pub const DEFAULT_SEARCH_URL: &str =
    "https://api.emploi-store.fr/partenaire/offresdemploi/v2/offres/search";
pub const DEFAULT_SCOPE: &str = "api_offresdemploiv2 o2dsoffre";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_PIPELINE_TIMEOUT_SECS: u64 = 30;

/// OAuth client credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct JobsConfig {
    pub credentials: Credentials,
    pub token_url: String,
    pub search_url: String,
    pub scope: String,
    /// Applies to each outbound call.
    pub request_timeout: Duration,
    /// Applies to token exchange + search together.
    pub pipeline_timeout: Duration,
}

impl JobsConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pipeline_timeout: Duration::from_secs(DEFAULT_PIPELINE_TIMEOUT_SECS),
        }
    }

    pub fn with_token_url(mut self, url: String) -> Self {
        self.token_url = url;
        self
    }

    pub fn with_search_url(mut self, url: String) -> Self {
        self.search_url = url;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_pipeline_timeout(mut self, timeout: Duration) -> Self {
        self.pipeline_timeout = timeout;
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let client_id = get(CLIENT_ID_VAR).ok_or(ConfigError::MissingVariable(CLIENT_ID_VAR))?;
        let client_secret =
            get(CLIENT_SECRET_VAR).ok_or(ConfigError::MissingVariable(CLIENT_SECRET_VAR))?;

        let mut config = Self::new(Credentials {
            client_id,
            client_secret,
        });

        if let Some(url) = get(TOKEN_URL_VAR) {
            config = config.with_token_url(url);
        }
        if let Some(url) = get(SEARCH_URL_VAR) {
            config = config.with_search_url(url);
        }
        if let Some(value) = get(TIMEOUT_VAR) {
            config = config.with_request_timeout(parse_seconds(TIMEOUT_VAR, value)?);
        }
        if let Some(value) = get(PIPELINE_TIMEOUT_VAR) {
            config = config.with_pipeline_timeout(parse_seconds(PIPELINE_TIMEOUT_VAR, value)?);
        }

        info!(
            "Loaded France Travail configuration (client: {}, token: {}, search: {})",
            config.credentials.client_id, config.token_url, config.search_url
        );

        Ok(config)
    }
}

fn parse_seconds(name: &'static str, value: String) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidVariable { name, value })
}
