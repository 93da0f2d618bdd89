//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the durable store and the external providers.

mod call_initiator;
mod mirror_sync;
mod notifier;
mod webhook_reconciler;

pub use call_initiator::{CallInitiator, InitiatedCall};
pub use mirror_sync::MirrorSynchronizer;
pub use notifier::AgentNotifier;
pub use webhook_reconciler::{Reconciliation, WebhookReconciler};
