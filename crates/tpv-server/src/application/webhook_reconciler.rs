//! Webhook Reconciler (Use Case)
//!
//! Correlates end-of-call reports to stored requests by external call id,
//! applies the terminal outcome once, then notifies the agent and refreshes
//! the mirror.

use std::sync::Arc;

use serde_json::Value;

use tpv::domain::services::envelope;
use tpv::{CallRequest, CallRequestRepository, CallTransition, DomainError, WebhookEvent};

use super::{AgentNotifier, MirrorSynchronizer};

/// What a webhook delivery amounted to
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Not an end-of-call report
    Ignored { event_type: Option<String> },
    /// End-of-call report without a call id
    Unreconcilable,
    /// No stored request carries this call id
    Unmatched { call_id: String },
    /// Replay of a report that was already applied
    AlreadyTerminal { call_id: String },
    Applied { record: CallRequest, notified: bool },
}

impl Reconciliation {
    pub fn message(&self) -> &'static str {
        match self {
            Reconciliation::Applied { notified: true, .. } => "Notification sent to agent",
            Reconciliation::Applied { notified: false, .. } => "Call status updated",
            _ => "Webhook received",
        }
    }
}

pub struct WebhookReconciler {
    repo: Arc<dyn CallRequestRepository>,
    notifier: Option<AgentNotifier>,
    mirror: Option<Arc<MirrorSynchronizer>>,
}

impl WebhookReconciler {
    pub fn new(repo: Arc<dyn CallRequestRepository>) -> Self {
        Self {
            repo,
            notifier: None,
            mirror: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Option<AgentNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_mirror(mut self, mirror: Option<Arc<MirrorSynchronizer>>) -> Self {
        self.mirror = mirror;
        self
    }

    /// Fails only when the SMS provider is not configured or the store is
    /// unreachable. Notification failures are logged and swallowed.
    pub async fn reconcile(&self, body: &Value) -> Result<Reconciliation, DomainError> {
        let notifier = self
            .notifier
            .as_ref()
            .ok_or_else(|| DomainError::configuration("Twilio credentials not configured"))?;

        let report = match envelope::decode(body) {
            WebhookEvent::EndOfCall(report) => report,
            WebhookEvent::Ignored { event_type } => {
                tracing::debug!(event_type = ?event_type, "Ignoring webhook event");
                return Ok(Reconciliation::Ignored { event_type });
            }
        };

        let Some(call_id) = report.call_id.clone() else {
            tracing::warn!(shape = %report.shape, "⚠️  End-of-call report without call id");
            return Ok(Reconciliation::Unreconcilable);
        };

        let outcome = report.outcome();
        tracing::info!(
            call_id = %call_id,
            status = %outcome.status,
            ended_reason = %outcome.ended_reason,
            shape = %report.shape,
            "Call ended"
        );

        let record = match self.repo.complete(&call_id, &outcome).await? {
            CallTransition::Applied(record) => record,
            CallTransition::AlreadyTerminal(_) => {
                tracing::info!(call_id = %call_id, "Report already applied, skipping");
                return Ok(Reconciliation::AlreadyTerminal { call_id });
            }
            CallTransition::NotFound => {
                tracing::warn!(call_id = %call_id, "⚠️  No call request matches this call id");
                return Ok(Reconciliation::Unmatched { call_id });
            }
        };

        if let Some(mirror) = &self.mirror {
            mirror.trigger("call ended");
        }

        let notified = match notifier.notify(&report, &outcome, Some(&record)).await {
            Ok(sent) => sent,
            Err(e) => {
                tracing::error!(call_id = %call_id, error = %e, "❌ Agent notification failed");
                false
            }
        };

        Ok(Reconciliation::Applied { record, notified })
    }
}
