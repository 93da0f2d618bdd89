//! TPV API Data Models
//!
//! - Call: initiation request/response
//! - Webhook: provider events and acknowledgements
//! - Sync: mirror refresh result
//! - Request: stored call request listing

mod call;
mod request;
mod sync;
mod webhook;

pub use call::*;
pub use request::*;
pub use sync::*;
pub use webhook::*;

use serde::Serialize;
use utoipa::ToSchema;

/// Failure envelope shared by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
