//! Call Request Listing Route

use axum::{extract::State, routing::get, Json, Router};

use crate::error::ApiError;
use crate::models::CallRequestResponse;
use crate::AppState;

/// List stored call requests, newest first
#[utoipa::path(
    get,
    path = "/tpv/requests",
    responses(
        (status = 200, description = "All call requests", body = Vec<CallRequestResponse>),
        (status = 401, description = "Missing or invalid API key", body = crate::models::ErrorResponse),
        (status = 500, description = "Store unavailable", body = crate::models::ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Requests"
)]
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<CallRequestResponse>>, ApiError> {
    let requests = state.repo.list_all().await?;

    Ok(Json(
        requests
            .into_iter()
            .map(CallRequestResponse::from_domain)
            .collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/tpv/requests", get(list_requests))
}
