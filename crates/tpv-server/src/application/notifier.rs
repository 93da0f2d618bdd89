//! Agent Notifier
//!
//! Texts the owning agent once a call reaches a terminal status.

use std::sync::Arc;

use tpv::domain::services::notification;
use tpv::{AgentRegistry, CallOutcome, CallRequest, DomainError, EndOfCallReport, SmsNotifier};

pub struct AgentNotifier {
    sms: Arc<dyn SmsNotifier>,
    agents: AgentRegistry,
}

impl AgentNotifier {
    pub fn new(sms: Arc<dyn SmsNotifier>, agents: AgentRegistry) -> Self {
        Self { sms, agents }
    }

    /// Send the summary text. Returns `Ok(false)` when no agent phone resolves.
    pub async fn notify(
        &self,
        report: &EndOfCallReport,
        outcome: &CallOutcome,
        record: Option<&CallRequest>,
    ) -> Result<bool, DomainError> {
        let agent_id = report
            .metadata
            .agent_id
            .as_deref()
            .or(record.map(|r| r.agent_id.as_str()));

        let Some(phone) = agent_id.and_then(|id| self.agents.phone_for(id)) else {
            tracing::info!(agent_id = ?agent_id, "No phone for agent, skipping SMS");
            return Ok(false);
        };

        let body = notification::agent_summary(report, outcome, record);
        self.sms.send(phone, &body).await?;
        Ok(true)
    }
}
