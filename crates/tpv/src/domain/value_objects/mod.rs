//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod agent_registry;
mod call_status;
mod phone_number;

pub use agent_registry::*;
pub use call_status::*;
pub use phone_number::*;
