//! Domain Errors
//!
//! Error types for pipeline operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad or missing input. Nothing has been written or sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required credential or setting is absent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-2xx answer from an upstream API.
    #[error("{service} API error: {status} - {body}")]
    Provider {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Sync error: {0}")]
    Sync(String),

    /// Service-account signing or token exchange failed.
    #[error("Auth error: {0}")]
    Auth(String),
}

impl DomainError {
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    pub fn provider<S: AsRef<str>, B: Into<String>>(service: S, status: u16, body: B) -> Self {
        Self::Provider {
            service: service.as_ref().to_string(),
            status,
            body: body.into(),
        }
    }

    /// True for failures caused by the caller's input rather than the system.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
