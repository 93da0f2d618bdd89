//! CallRequest Repository Port
//!
//! Abstract interface for the durable store of verification requests.

use async_trait::async_trait;

use crate::domain::entities::{CallOutcome, CallRequest};
use crate::domain::errors::DomainError;

/// Result of applying a terminal outcome to the store
#[derive(Debug, Clone, PartialEq)]
pub enum CallTransition {
    /// The record moved from `initiated` to a terminal status
    Applied(CallRequest),
    /// The record was already terminal; nothing was written
    AlreadyTerminal(CallRequest),
    /// No record carries this external call id
    NotFound,
}

/// Repository interface for CallRequest records
#[async_trait]
pub trait CallRequestRepository: Send + Sync {
    /// Insert a new record
    async fn insert(&self, request: &CallRequest) -> Result<CallRequest, DomainError>;

    /// Find a record by external call id
    async fn find_by_vapi_call_id(
        &self,
        vapi_call_id: &str,
    ) -> Result<Option<CallRequest>, DomainError>;

    /// Conditionally apply a terminal outcome.
    ///
    /// Only a record still in `initiated` is updated, which makes repeated
    /// delivery of the same report a no-op.
    async fn complete(
        &self,
        vapi_call_id: &str,
        outcome: &CallOutcome,
    ) -> Result<CallTransition, DomainError>;

    /// All records, newest first
    async fn list_all(&self) -> Result<Vec<CallRequest>, DomainError>;
}
