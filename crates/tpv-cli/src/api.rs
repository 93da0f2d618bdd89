//! TPV API Client

use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use tpv::TpvSubmission;

/// API Client for the TPV server
pub struct TpvClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateCallResponse {
    pub call_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub rows_written: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequestResponse {
    pub vapi_call_id: Option<String>,
    pub agent_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub status: String,
    pub ended_reason: Option<String>,
    pub call_duration_seconds: Option<i32>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl TpvClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn read<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            bail!("API error ({}): {}", status, message);
        }

        resp.json().await.context("Failed to parse response")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Place a verification call
    pub async fn initiate_call(&self, submission: &TpvSubmission) -> Result<InitiateCallResponse> {
        let url = format!("{}/tpv/calls", self.base_url);
        tracing::debug!(%url, "Submitting call request");

        let resp = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .context("Failed to connect to TPV API")?;

        Self::read(resp).await
    }

    /// Rewrite the spreadsheet mirror
    pub async fn sync(&self) -> Result<SyncResponse> {
        let url = format!("{}/tpv/sync", self.base_url);
        let resp = self
            .authorized(self.client.post(&url))
            .send()
            .await
            .context("Failed to connect to TPV API")?;

        Self::read(resp).await
    }

    /// List stored call requests, newest first
    pub async fn list_requests(&self) -> Result<Vec<CallRequestResponse>> {
        let url = format!("{}/tpv/requests", self.base_url);
        let resp = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to connect to TPV API")?;

        Self::read(resp).await
    }
}
