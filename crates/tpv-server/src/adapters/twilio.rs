//! Twilio SMS Notifier

use async_trait::async_trait;
use reqwest::Client;

use tpv::{DomainError, SmsNotifier};

use crate::config::TwilioConfig;

pub const TWILIO_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// reqwest implementation of SmsNotifier
pub struct TwilioSms {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioSms {
    pub fn new(config: &TwilioConfig) -> Result<Self, DomainError> {
        Self::with_base_url(config, TWILIO_BASE_URL)
    }

    pub fn with_base_url(config: &TwilioConfig, base_url: &str) -> Result<Self, DomainError> {
        Ok(Self {
            client: super::http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/Accounts/{}/Messages.json", self.base_url, self.account_sid)
    }

    fn form<'a>(&'a self, to: &'a str, body: &'a str) -> [(&'static str, &'a str); 3] {
        [("To", to), ("From", &self.from_number), ("Body", body)]
    }
}

#[async_trait]
impl SmsNotifier for TwilioSms {
    async fn send(&self, to: &str, body: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&self.form(to, body))
            .send()
            .await
            .map_err(|e| DomainError::Notification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::Notification(format!(
                "Failed to send SMS: {} - {}",
                status.as_u16(),
                text
            )));
        }

        tracing::info!(to = %to, "📱 SMS sent to agent");
        Ok(())
    }
}
