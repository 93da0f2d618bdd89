//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - TpvSubmission: raw verification request from the sales form
//! - CallPlacement: provider-neutral command to dial the customer
//! - CallRequest: durable lifecycle record
//! - EndOfCallReport: terminal provider event

mod call_placement;
mod call_request;
mod end_of_call;
mod submission;

pub use call_placement::*;
pub use call_request::*;
pub use end_of_call::*;
pub use submission::*;
