//! Vapi Voice Provider
//!
//! Places outbound assistant calls through the Vapi REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use tpv::{CallPlacement, DomainError, PlacedCall, VoiceProvider};

use crate::config::VapiConfig;

pub const VAPI_BASE_URL: &str = "https://api.vapi.ai";

/// reqwest implementation of VoiceProvider
pub struct VapiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl VapiClient {
    pub fn new(config: &VapiConfig) -> Result<Self, DomainError> {
        Self::with_base_url(config, VAPI_BASE_URL)
    }

    pub fn with_base_url(config: &VapiConfig, base_url: &str) -> Result<Self, DomainError> {
        Ok(Self {
            client: super::http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

/// Request body for `POST /call`
pub fn call_body(placement: &CallPlacement) -> Value {
    let mut body = json!({
        "assistantId": placement.assistant_id,
        "customer": { "number": placement.destination.as_str() },
        "assistantOverrides": { "variableValues": placement.variable_values },
        "metadata": placement.metadata,
    });

    if let Some(phone_number_id) = &placement.phone_number_id {
        body["phoneNumberId"] = json!(phone_number_id);
    }

    body
}

#[async_trait]
impl VoiceProvider for VapiClient {
    async fn place_call(&self, placement: &CallPlacement) -> Result<PlacedCall, DomainError> {
        let url = format!("{}/call", self.base_url);

        tracing::debug!(
            destination = %placement.destination,
            assistant_id = %placement.assistant_id,
            "Placing Vapi call"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&call_body(placement))
            .send()
            .await
            .map_err(|e| DomainError::provider("VAPI", 0, e.to_string()))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(DomainError::provider("VAPI", status.as_u16(), text));
        }

        let raw: Value = serde_json::from_str(&text).map_err(|e| {
            DomainError::provider("VAPI", status.as_u16(), format!("invalid JSON: {e}"))
        })?;

        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DomainError::provider("VAPI", status.as_u16(), "response carries no call id")
            })?
            .to_string();

        Ok(PlacedCall { id, raw })
    }
}
