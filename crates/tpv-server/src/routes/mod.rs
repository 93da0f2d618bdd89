//! TPV API Routes
//!
//! - /health - Liveness
//! - /tpv/calls - Call initiation (public, called by the web form)
//! - /tpv/webhooks/vapi - Voice provider events (public)
//! - /tpv/sync - Spreadsheet mirror refresh (operator)
//! - /tpv/requests - Stored call requests (operator)

pub mod call;
pub mod requests;
pub mod swagger;
pub mod sync;
pub mod webhook;

use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthCheck)),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "TPV API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Plain OPTIONS answer; real CORS preflights are handled by the CORS layer
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(sync::router())
        .merge(requests::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    let openapi = swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(call::router())
        .merge(webhook::router())
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
