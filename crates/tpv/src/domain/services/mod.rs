//! Domain Services
//!
//! Stateless domain logic that does not belong to a single entity.

pub mod amortization;
pub mod envelope;
pub mod notification;
pub mod sheet_projection;
