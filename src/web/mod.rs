// src/web/mod.rs

pub mod cors_utils;
pub mod handlers;
pub mod types;

pub use cors_utils::Cors;
pub use types::*;

use crate::offers::JobsPayload;
use anyhow::Result;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, head, patch, post, put, routes, Build, Request, Rocket, State};
use std::net::IpAddr;
use tracing::{error, info, warn};

#[get("/jobs?<location>&<keywords>")]
pub async fn search_jobs(
    location: Option<String>,
    keywords: Option<String>,
    config: &State<ServerConfig>,
) -> Result<Json<JobsPayload>, ApiError> {
    handlers::search_jobs_handler(location, keywords, config).await
}

#[post("/jobs")]
pub async fn post_jobs() -> (Status, Json<ErrorResponse>) {
    handlers::method_not_allowed_handler("POST").await
}

#[put("/jobs")]
pub async fn put_jobs() -> (Status, Json<ErrorResponse>) {
    handlers::method_not_allowed_handler("PUT").await
}

#[patch("/jobs")]
pub async fn patch_jobs() -> (Status, Json<ErrorResponse>) {
    handlers::method_not_allowed_handler("PATCH").await
}

#[delete("/jobs")]
pub async fn delete_jobs() -> (Status, Json<ErrorResponse>) {
    handlers::method_not_allowed_handler("DELETE").await
}

// An explicit HEAD route keeps Rocket from answering HEAD with the GET handler
#[head("/jobs")]
pub async fn head_jobs() -> (Status, Json<ErrorResponse>) {
    handlers::method_not_allowed_handler("HEAD").await
}

#[rocket::route(TRACE, uri = "/jobs")]
pub async fn trace_jobs() -> (Status, Json<ErrorResponse>) {
    handlers::method_not_allowed_handler("TRACE").await
}

#[rocket::route(CONNECT, uri = "/jobs")]
pub async fn connect_jobs() -> (Status, Json<ErrorResponse>) {
    handlers::method_not_allowed_handler("CONNECT").await
}

#[get("/health")]
pub async fn health(config: &State<ServerConfig>) -> Json<HealthResponse> {
    handlers::health_handler(config).await
}

// Error catchers
#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(format!(
        "No route for {} {}",
        request.method(),
        request.uri().path()
    )))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new("Internal server error".to_string()))
}

/// Mount routes, catchers, CORS and state on a Rocket instance
pub fn assemble(rocket: Rocket<Build>, server_config: ServerConfig) -> Rocket<Build> {
    rocket
        .attach(Cors)
        .manage(server_config)
        .register("/", catchers![not_found, internal_error])
        .mount("/", routes![cors_utils::universal_options_handler])
        .mount(
            "/api",
            routes![
                search_jobs,
                post_jobs,
                put_jobs,
                patch_jobs,
                delete_jobs,
                head_jobs,
                trace_jobs,
                connect_jobs,
                health,
            ],
        )
}

/// Rocket with default figment configuration (Rocket.toml / ROCKET_* variables)
pub fn build_rocket(server_config: ServerConfig) -> Rocket<Build> {
    assemble(rocket::build(), server_config)
}

// Main server start function
pub async fn start_web_server(address: IpAddr, port: u16, server_config: ServerConfig) -> Result<()> {
    match &server_config.jobs_client {
        Ok(client) => info!(
            "France Travail client ready (search endpoint: {})",
            client.config().search_url
        ),
        Err(e) => warn!(
            "Starting without upstream credentials, /api/jobs will answer 500: {}",
            e
        ),
    }

    let figment = rocket::Config::figment()
        .merge(("address", address))
        .merge(("port", port));

    info!("Starting seasonal jobs API on http://{}:{}", address, port);

    if let Err(e) = assemble(rocket::custom(figment), server_config)
        .launch()
        .await
    {
        error!("Server stopped with an error: {}", e);
        return Err(anyhow::anyhow!("Rocket failed: {}", e));
    }

    Ok(())
}
