//! Mirror Sync Route

use axum::{extract::State, routing::post, Json, Router};

use tpv::DomainError;

use crate::error::ApiError;
use crate::models::SyncResponse;
use crate::AppState;

/// Rewrite the spreadsheet mirror from the store
#[utoipa::path(
    post,
    path = "/tpv/sync",
    responses(
        (status = 200, description = "Sheet rewritten", body = SyncResponse),
        (status = 401, description = "Missing or invalid API key", body = crate::models::ErrorResponse),
        (status = 500, description = "Sheets not configured or sync failed", body = crate::models::ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Sync"
)]
pub async fn sync_sheet(State(state): State<AppState>) -> Result<Json<SyncResponse>, ApiError> {
    let mirror = state
        .mirror
        .as_ref()
        .ok_or_else(|| DomainError::configuration("Google Sheets credentials not configured"))?;

    let rows_written = mirror.sync().await.map_err(|e| {
        tracing::error!(error = %e, "❌ Sheet sync failed");
        ApiError::from(e)
    })?;

    Ok(Json(SyncResponse {
        success: true,
        rows_written,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/tpv/sync", post(sync_sheet).options(super::preflight))
}
