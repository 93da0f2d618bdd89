//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod call_request_repository;

pub use call_request_repository::*;
