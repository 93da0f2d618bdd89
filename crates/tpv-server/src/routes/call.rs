//! Call Initiation Route

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::error::ApiError;
use crate::models::{InitiateCallRequest, InitiateCallResponse};
use crate::AppState;

/// Validate a submission and have the assistant call the customer
#[utoipa::path(
    post,
    path = "/tpv/calls",
    request_body = InitiateCallRequest,
    responses(
        (status = 200, description = "Call placed", body = InitiateCallResponse),
        (status = 500, description = "Validation, configuration or provider failure", body = crate::models::ErrorResponse)
    ),
    tag = "Call"
)]
pub async fn initiate_call(
    State(state): State<AppState>,
    payload: Result<Json<InitiateCallRequest>, JsonRejection>,
) -> Result<Json<InitiateCallResponse>, ApiError> {
    let Json(InitiateCallRequest(submission)) =
        payload.map_err(|e| ApiError::internal(e.body_text()))?;

    let initiated = state.initiator.initiate(submission).await.map_err(|e| {
        tracing::error!(error = %e, "❌ Call initiation failed");
        ApiError::from(e)
    })?;

    Ok(Json(InitiateCallResponse::from_initiated(initiated)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/tpv/calls", post(initiate_call).options(super::preflight))
}
