//! Voice Provider Port
//!
//! Abstract interface for placing outbound AI-assistant calls.

use async_trait::async_trait;

use crate::domain::entities::CallPlacement;
use crate::domain::errors::DomainError;

/// A call the provider accepted
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCall {
    /// External call id, the correlation key for later events
    pub id: String,
    /// Provider response as received
    pub raw: serde_json::Value,
}

/// Voice provider interface
///
/// # Example
///
/// ```rust,ignore
/// use tpv::ports::VoiceProvider;
///
/// struct VapiClient { /* reqwest client */ }
///
/// #[async_trait]
/// impl VoiceProvider for VapiClient {
///     async fn place_call(&self, placement: &CallPlacement) -> Result<PlacedCall, DomainError> {
///         // POST the call and return its id
///     }
/// }
/// ```
#[async_trait]
pub trait VoiceProvider: Send + Sync {
    /// Place a call.
    ///
    /// A non-2xx answer is a `DomainError::Provider` carrying the upstream
    /// status and body. There is no retry.
    async fn place_call(&self, placement: &CallPlacement) -> Result<PlacedCall, DomainError>;
}
