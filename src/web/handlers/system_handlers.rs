// src/web/handlers/system_handlers.rs
use crate::utils::iso_timestamp;
use crate::web::types::{HealthResponse, ServerConfig};

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

/// Liveness check. Never calls the upstream API.
pub async fn health_handler(config: &State<ServerConfig>) -> Json<HealthResponse> {
    let configured = config.jobs_client.is_ok();
    info!("Health check (configured: {})", configured);

    Json(HealthResponse {
        success: true,
        status: "ok".to_string(),
        configured,
        timestamp: iso_timestamp(),
    })
}
