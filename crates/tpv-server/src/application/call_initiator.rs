//! Call Initiator (Use Case)
//!
//! Validates a submission, has the voice provider dial the customer and
//! stores the initial lifecycle record.

use std::sync::Arc;

use serde_json::Value;

use tpv::{
    AgentRegistry, CallPlacement, CallRequest, CallRequestRepository, DomainError, TpvSubmission,
    VoiceProvider,
};

use super::MirrorSynchronizer;

/// Result of a successful initiation
#[derive(Debug, Clone)]
pub struct InitiatedCall {
    pub call_id: String,
    /// Provider response as received
    pub call_data: Value,
    /// `false` when the call was placed but the record could not be stored
    pub persisted: bool,
}

pub struct CallInitiator {
    repo: Arc<dyn CallRequestRepository>,
    voice: Option<Arc<dyn VoiceProvider>>,
    mirror: Option<Arc<MirrorSynchronizer>>,
    agents: AgentRegistry,
    country_code: String,
    default_assistant_id: Option<String>,
    default_phone_number_id: Option<String>,
}

impl CallInitiator {
    pub fn new(
        repo: Arc<dyn CallRequestRepository>,
        agents: AgentRegistry,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            voice: None,
            mirror: None,
            agents,
            country_code: country_code.into(),
            default_assistant_id: None,
            default_phone_number_id: None,
        }
    }

    pub fn with_voice(
        mut self,
        voice: Arc<dyn VoiceProvider>,
        default_assistant_id: Option<String>,
        default_phone_number_id: Option<String>,
    ) -> Self {
        self.voice = Some(voice);
        self.default_assistant_id = default_assistant_id;
        self.default_phone_number_id = default_phone_number_id;
        self
    }

    pub fn with_mirror(mut self, mirror: Option<Arc<MirrorSynchronizer>>) -> Self {
        self.mirror = mirror;
        self
    }

    pub async fn initiate(&self, submission: TpvSubmission) -> Result<InitiatedCall, DomainError> {
        let voice = self
            .voice
            .as_ref()
            .ok_or_else(|| DomainError::configuration("VAPI_API_KEY is not configured"))?;

        let validated = submission.validate(&self.agents, &self.country_code)?;
        let placement = CallPlacement::for_submission(
            &validated,
            self.default_assistant_id.as_deref(),
            self.default_phone_number_id.as_deref(),
        )?;

        let placed = voice.place_call(&placement).await?;
        tracing::info!(
            call_id = %placed.id,
            agent_id = %validated.agent_id,
            "📞 TPV call initiated"
        );

        let record = CallRequest::initiated(&validated, placed.id.clone());
        let persisted = match self.repo.insert(&record).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(call_id = %placed.id, error = %e, "❌ Failed to store call request");
                false
            }
        };

        if persisted {
            if let Some(mirror) = &self.mirror {
                mirror.trigger("call initiated");
            }
        }

        Ok(InitiatedCall {
            call_id: placed.id,
            call_data: placed.raw,
            persisted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        eventually, InMemoryCallRequestRepository, RecordingSheet, RecordingVoiceProvider,
    };
    use serde_json::json;
    use tpv::CallStatus;

    fn submission(agent_id: &str) -> TpvSubmission {
        serde_json::from_value(json!({
            "agentId": agent_id,
            "customerName": "Jane Doe",
            "address": "12 King St W",
            "phoneNumber": "4165551234",
            "products": ["Furnace", "Air Conditioner"],
            "salesPrice": "10000",
            "interestRate": "9.99",
            "amortization": "60"
        }))
        .unwrap()
    }

    fn initiator(
        repo: Arc<InMemoryCallRequestRepository>,
        voice: Arc<RecordingVoiceProvider>,
    ) -> CallInitiator {
        CallInitiator::new(
            repo,
            AgentRegistry::new().with_agent("MM23", "+19059043544"),
            "1",
        )
        .with_voice(voice, Some("assistant-1".to_string()), Some("pn-1".to_string()))
    }

    #[tokio::test]
    async fn test_initiate_places_call_and_stores_record() {
        let repo = Arc::new(InMemoryCallRequestRepository::new());
        let voice = Arc::new(RecordingVoiceProvider::accepting("call-123"));

        let initiated = initiator(repo.clone(), voice.clone())
            .initiate(submission("MM23"))
            .await
            .unwrap();

        assert_eq!(initiated.call_id, "call-123");
        assert!(initiated.persisted);
        assert_eq!(initiated.call_data["id"], "call-123");

        let placements = voice.placements();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].destination.as_str(), "+14165551234");
        assert_eq!(placements[0].assistant_id, "assistant-1");
        assert_eq!(placements[0].variable_values["monthlyPayment"], "215.59");

        let records = repo.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, CallStatus::Initiated);
        assert_eq!(records[0].vapi_call_id.as_deref(), Some("call-123"));
        assert_eq!(records[0].phone_number, "+14165551234");
        assert_eq!(records[0].products, "Furnace, Air Conditioner");
    }

    #[tokio::test]
    async fn test_unknown_agent_is_rejected_without_side_effects() {
        let repo = Arc::new(InMemoryCallRequestRepository::new());
        let voice = Arc::new(RecordingVoiceProvider::accepting("call-123"));

        let err = initiator(repo.clone(), voice.clone())
            .initiate(submission("XX01"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Invalid agent ID");
        assert!(voice.placements().is_empty());
        assert!(repo.records().is_empty());
    }

    #[tokio::test]
    async fn test_provider_rejection_stores_nothing() {
        let repo = Arc::new(InMemoryCallRequestRepository::new());
        let voice = Arc::new(RecordingVoiceProvider::rejecting(400, "bad assistant"));

        let err = initiator(repo.clone(), voice)
            .initiate(submission("MM23"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "VAPI API error: 400 - bad assistant");
        assert!(repo.records().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_still_reports_placed_call() {
        let repo = Arc::new(InMemoryCallRequestRepository::failing());
        let voice = Arc::new(RecordingVoiceProvider::accepting("call-9"));

        let initiated = initiator(repo, voice)
            .initiate(submission("MM23"))
            .await
            .unwrap();

        assert_eq!(initiated.call_id, "call-9");
        assert!(!initiated.persisted);
    }

    #[tokio::test]
    async fn test_initiation_refreshes_the_mirror() {
        let repo = Arc::new(InMemoryCallRequestRepository::new());
        let voice = Arc::new(RecordingVoiceProvider::accepting("call-123"));
        let sheet = Arc::new(RecordingSheet::new());
        let mirror = Arc::new(MirrorSynchronizer::new(repo.clone(), sheet.clone()));

        initiator(repo, voice)
            .with_mirror(Some(mirror))
            .initiate(submission("MM23"))
            .await
            .unwrap();

        eventually(|| sheet.write_count() == 1).await;
        let written = sheet.last_write().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[1][18], "call-123");
    }

    #[tokio::test]
    async fn test_sheet_failure_does_not_fail_initiation() {
        let repo = Arc::new(InMemoryCallRequestRepository::new());
        let voice = Arc::new(RecordingVoiceProvider::accepting("call-123"));
        let sheet = Arc::new(RecordingSheet::failing());
        let mirror = Arc::new(MirrorSynchronizer::new(repo.clone(), sheet.clone()));

        let initiated = initiator(repo.clone(), voice)
            .with_mirror(Some(mirror))
            .initiate(submission("MM23"))
            .await
            .unwrap();

        assert!(initiated.persisted);
        eventually(|| sheet.attempt_count() == 1).await;
        assert_eq!(sheet.write_count(), 0);
        assert_eq!(repo.records().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_voice_provider_is_configuration_error() {
        let repo = Arc::new(InMemoryCallRequestRepository::new());
        let initiator = CallInitiator::new(repo, AgentRegistry::new(), "1");

        let err = initiator.initiate(submission("MM23")).await.unwrap_err();

        assert!(matches!(err, DomainError::Configuration(_)));
        assert_eq!(err.to_string(), "Configuration error: VAPI_API_KEY is not configured");
    }
}
