//! Seasonal job offers with accommodation, proxied from the France Travail API.

pub mod config;
pub mod core;
pub mod error;
pub mod offers;
pub mod utils;
pub mod web;

pub use crate::config::{Credentials, JobsConfig};
pub use crate::core::FranceTravailClient;
pub use crate::error::{ConfigError, JobsError};
pub use crate::offers::{FormattedOffer, JobsPayload, SearchQuery};
pub use crate::web::{build_rocket, start_web_server, ServerConfig};

/// Resolve configuration from the environment and build the upstream client.
/// A configuration problem is kept as the result rather than aborting, so the
/// server can still answer with an explanatory 500.
pub fn resolve_jobs_client() -> anyhow::Result<Result<FranceTravailClient, ConfigError>> {
    match JobsConfig::from_env() {
        Ok(config) => Ok(Ok(FranceTravailClient::new(config)?)),
        Err(e) => Ok(Err(e)),
    }
}
