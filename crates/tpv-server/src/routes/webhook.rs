//! Voice Provider Webhook Route

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use tpv::DomainError;

use crate::error::ApiError;
use crate::models::{VapiWebhookPayload, WebhookAck};
use crate::AppState;

/// Receive provider events; end-of-call reports are reconciled
#[utoipa::path(
    post,
    path = "/tpv/webhooks/vapi",
    request_body = VapiWebhookPayload,
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAck),
        (status = 500, description = "SMS provider not configured or body is not JSON", body = crate::models::ErrorResponse)
    ),
    tag = "Webhook"
)]
pub async fn vapi_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    // Content type is not checked; any JSON body is accepted.
    let VapiWebhookPayload(body) = serde_json::from_slice(&body)
        .map_err(|e| ApiError::internal(format!("Invalid JSON body: {}", e)))?;

    let message = match state.reconciler.reconcile(&body).await {
        Ok(result) => result.message(),
        Err(e @ DomainError::Configuration(_)) => {
            tracing::error!(error = %e, "❌ Webhook rejected");
            return Err(e.into());
        }
        Err(e) => {
            tracing::error!(error = %e, "❌ Webhook reconciliation failed");
            "Webhook received"
        }
    };

    Ok(Json(WebhookAck {
        success: true,
        message: message.to_string(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/tpv/webhooks/vapi",
        post(vapi_webhook).options(super::preflight),
    )
}
