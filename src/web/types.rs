// src/web/types.rs

use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::Responder;

use crate::core::FranceTravailClient;
use crate::error::{ConfigError, JobsError};
use crate::utils::iso_timestamp;

pub const METHOD_NOT_ALLOWED: &str = "method not allowed";

/// Rocket managed state. Configuration is resolved once, before launch.
pub struct ServerConfig {
    pub jobs_client: Result<FranceTravailClient, ConfigError>,
}

impl ServerConfig {
    pub fn new(jobs_client: Result<FranceTravailClient, ConfigError>) -> Self {
        Self { jobs_client }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ConfigErrorResponse {
    pub success: bool,
    pub error: String,
    pub help: String,
}

impl From<&ConfigError> for ConfigErrorResponse {
    fn from(err: &ConfigError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
            help: err.help(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}

impl StandardErrorResponse {
    pub fn new(error: String) -> Self {
        Self {
            success: false,
            error,
            timestamp: iso_timestamp(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub configured: bool,
    pub timestamp: String,
}

/// Failure replies of `GET /api/jobs`.
#[derive(Responder)]
pub enum ApiError {
    #[response(status = 500)]
    Configuration(Json<ConfigErrorResponse>),
    #[response(status = 500)]
    Upstream(Json<StandardErrorResponse>),
}

impl From<&ConfigError> for ApiError {
    fn from(err: &ConfigError) -> Self {
        ApiError::Configuration(Json(ConfigErrorResponse::from(err)))
    }
}

impl From<JobsError> for ApiError {
    fn from(err: JobsError) -> Self {
        ApiError::Upstream(Json(StandardErrorResponse::new(err.to_string())))
    }
}
