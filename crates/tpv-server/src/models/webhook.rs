//! Voice provider webhook DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provider event of unconstrained shape, direct or under `message`
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct VapiWebhookPayload(#[schema(value_type = Object)] pub serde_json::Value);

/// Webhook acknowledgement
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
}
