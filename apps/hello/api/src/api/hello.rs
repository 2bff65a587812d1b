//! Fixed informational endpoints.

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub docs: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiV1Response {
    pub message: String,
    pub endpoints: Vec<String>,
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(root))
        .route("/api/v1/", get(api_v1))
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    tag = "hello",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Hello World API is running".to_string(),
        version: API_VERSION.to_string(),
    })
}

/// Welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = "hello",
    responses((status = 200, description = "Welcome message", body = WelcomeResponse))
)]
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Hello World API".to_string(),
        docs: "/health".to_string(),
    })
}

/// Lists the fixed endpoints
#[utoipa::path(
    get,
    path = "/api/v1/",
    tag = "hello",
    responses((status = 200, description = "API v1 status", body = ApiV1Response))
)]
pub async fn api_v1() -> Json<ApiV1Response> {
    Json(ApiV1Response {
        message: "API v1 is working".to_string(),
        endpoints: ["GET /health", "GET /", "GET /api/v1/"]
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
