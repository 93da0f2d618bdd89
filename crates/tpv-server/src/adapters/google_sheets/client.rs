//! Sheets values API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use tpv::{DomainError, SheetMirror};

use super::ServiceAccountAuth;
use crate::config::SheetsConfig;

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    updated_rows: Option<usize>,
}

/// reqwest implementation of SheetMirror
pub struct GoogleSheetsClient {
    client: Client,
    auth: ServiceAccountAuth,
    base_url: String,
    spreadsheet_id: String,
    range: String,
}

impl GoogleSheetsClient {
    pub fn new(config: &SheetsConfig) -> Result<Self, DomainError> {
        let client = crate::adapters::http_client()?;
        let auth = ServiceAccountAuth::new(
            client.clone(),
            config.client_email.clone(),
            config.private_key.clone(),
        );

        Ok(Self {
            client,
            auth,
            base_url: SHEETS_BASE_URL.to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            range: config.range.clone(),
        })
    }

    fn values_url(&self) -> String {
        format!("{}/{}/values/{}", self.base_url, self.spreadsheet_id, self.range)
    }

    async fn check(
        response: reqwest::Response,
        step: &str,
    ) -> Result<reqwest::Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(DomainError::Sync(format!(
            "Sheet {step} failed: {} - {}",
            status.as_u16(),
            text
        )))
    }
}

#[async_trait]
impl SheetMirror for GoogleSheetsClient {
    async fn replace_all(&self, values: Vec<Vec<String>>) -> Result<usize, DomainError> {
        let token = self.auth.access_token().await?;
        let url = self.values_url();

        let cleared = self
            .client
            .post(format!("{url}:clear"))
            .bearer_auth(&token)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| DomainError::Sync(e.to_string()))?;
        Self::check(cleared, "clear").await?;

        let row_count = values.len();
        let written = self
            .client
            .put(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&token)
            .json(&json!({ "values": values }))
            .send()
            .await
            .map_err(|e| DomainError::Sync(e.to_string()))?;
        let written = Self::check(written, "write").await?;

        let updated_rows = written
            .json::<UpdateValuesResponse>()
            .await
            .ok()
            .and_then(|r| r.updated_rows);

        Ok(updated_rows.unwrap_or(row_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_url() {
        let client = GoogleSheetsClient::new(&SheetsConfig {
            client_email: "sync@example.iam.gserviceaccount.com".to_string(),
            private_key: String::new(),
            spreadsheet_id: "sheet-123".to_string(),
            range: "Sheet1".to_string(),
        })
        .unwrap();

        assert_eq!(
            client.values_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/Sheet1"
        );
    }
}
