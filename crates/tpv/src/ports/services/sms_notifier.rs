//! SMS Notifier Port

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Sends short text messages to agents
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    /// Send `body` to an E.164 number.
    ///
    /// Non-2xx answers surface as `DomainError::Notification`.
    async fn send(&self, to: &str, body: &str) -> Result<(), DomainError>;
}
