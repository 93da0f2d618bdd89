//! Service Ports
//!
//! Outbound provider interfaces used by the call pipeline.

mod sheet_mirror;
mod sms_notifier;
mod voice_provider;

pub use sheet_mirror::*;
pub use sms_notifier::*;
pub use voice_provider::*;
