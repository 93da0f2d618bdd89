//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod google_sheets;
pub mod postgres;
pub mod twilio;
pub mod vapi;

use std::time::Duration;

use reqwest::Client;
use tpv::DomainError;

// Re-exports
pub use google_sheets::GoogleSheetsClient;
pub use postgres::PgCallRequestRepository;
pub use twilio::TwilioSms;
pub use vapi::VapiClient;

pub const USER_AGENT: &str = concat!("tpv-server/", env!("CARGO_PKG_VERSION"));

/// Shared outbound HTTP client settings for every provider
pub(crate) fn http_client() -> Result<Client, DomainError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {e}")))
}
