// src/web/handlers/jobs_handlers.rs

use crate::offers::{JobsPayload, SearchQuery};
use crate::web::types::{ApiError, ErrorResponse, ServerConfig, METHOD_NOT_ALLOWED};

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub async fn search_jobs_handler(
    location: Option<String>,
    keywords: Option<String>,
    config: &State<ServerConfig>,
) -> Result<Json<JobsPayload>, ApiError> {
    let client = match &config.jobs_client {
        Ok(client) => client,
        Err(e) => {
            error!("Refusing job search, configuration is incomplete: {}", e);
            return Err(ApiError::from(e));
        }
    };

    let query = SearchQuery::new(location, keywords);
    info!(
        "Job search requested (location: {}, keywords: {:?})",
        query.display_location(),
        query.keywords
    );

    match client.fetch_jobs(&query).await {
        Ok(payload) => {
            info!("Returning {} offers", payload.jobs.len());
            Ok(Json(payload))
        }
        Err(e) => {
            error!("Job search failed: {}", e);
            Err(ApiError::from(e))
        }
    }
}

pub async fn method_not_allowed_handler(method: &str) -> (Status, Json<ErrorResponse>) {
    warn!("Rejected {} request on the jobs endpoint", method);
    (
        Status::MethodNotAllowed,
        Json(ErrorResponse::new(METHOD_NOT_ALLOWED)),
    )
}
