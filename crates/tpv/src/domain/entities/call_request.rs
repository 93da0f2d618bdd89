//! CallRequest - Durable lifecycle record of one verification call
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{CallOutcome, ValidatedSubmission};
use crate::domain::value_objects::CallStatus;

/// CallRequest - system of record for a submitted verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    pub id: Uuid,
    /// External call identifier; the correlation key for provider events
    pub vapi_call_id: Option<String>,
    pub agent_id: String,
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub customer_name: String,
    pub address: String,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    /// E.164 form
    pub phone_number: String,
    pub email: Option<String>,
    /// Comma-joined product list
    pub products: String,
    pub sales_price: f64,
    pub payment_option: Option<String>,
    pub finance_company: Option<String>,
    pub interest_rate: Option<f64>,
    pub promotional_term: Option<String>,
    pub amortization: Option<i32>,
    pub monthly_payment: Option<f64>,
    pub status: CallStatus,
    pub ended_reason: Option<String>,
    pub call_duration_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CallRequest {
    /// Create the initial record for a call the provider has accepted
    pub fn initiated(submission: &ValidatedSubmission, vapi_call_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vapi_call_id: Some(vapi_call_id.into()),
            agent_id: submission.agent_id.clone(),
            company_name: submission.company_name.clone(),
            first_name: submission.first_name.clone(),
            last_name: submission.last_name.clone(),
            customer_name: submission.customer_name.clone(),
            address: submission.address.clone(),
            city: submission.city.clone(),
            province: submission.province.clone(),
            postal_code: submission.postal_code.clone(),
            phone_number: submission.phone.as_str().to_string(),
            email: submission.email.clone(),
            products: submission.products_joined(),
            sales_price: submission.sales_price,
            payment_option: submission.payment_option.clone(),
            finance_company: submission.finance_company.clone(),
            interest_rate: submission.interest_rate,
            promotional_term: submission.promotional_term.clone(),
            amortization: submission.amortization,
            monthly_payment: submission.monthly_payment,
            status: CallStatus::Initiated,
            ended_reason: None,
            call_duration_seconds: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a terminal outcome.
    ///
    /// Returns `false` and leaves the record untouched when it is already
    /// terminal, so replays of the same report are no-ops.
    pub fn apply_outcome(&mut self, outcome: &CallOutcome) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        self.status = outcome.status;
        self.ended_reason = Some(outcome.ended_reason.clone());
        self.call_duration_seconds = outcome.duration_seconds;
        self.updated_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TpvSubmission;
    use crate::domain::value_objects::AgentRegistry;
    use serde_json::json;

    fn record() -> CallRequest {
        let submission: TpvSubmission = serde_json::from_value(json!({
            "agentId": "MM23",
            "customerName": "Jane Doe",
            "address": "12 King St W",
            "phoneNumber": "4165551234",
            "products": "Heat Pump",
            "salesPrice": "5000"
        }))
        .unwrap();
        let agents = AgentRegistry::new().with_agent("MM23", "+19059043544");
        CallRequest::initiated(&submission.validate(&agents, "1").unwrap(), "call-1")
    }

    fn outcome(status: CallStatus, reason: &str, duration: i32) -> CallOutcome {
        CallOutcome {
            status,
            ended_reason: reason.to_string(),
            duration_seconds: Some(duration),
        }
    }

    #[test]
    fn test_initiated_record() {
        let record = record();
        assert_eq!(record.status, CallStatus::Initiated);
        assert_eq!(record.vapi_call_id.as_deref(), Some("call-1"));
        assert_eq!(record.phone_number, "+14165551234");
        assert_eq!(record.call_duration_seconds, None);
    }

    #[test]
    fn test_outcome_applies_once() {
        let mut record = record();
        let first = outcome(CallStatus::Completed, "assistant-ended-call", 95);

        assert!(record.apply_outcome(&first));
        let after_first = record.clone();

        assert!(!record.apply_outcome(&first));
        assert_eq!(record, after_first);
    }

    #[test]
    fn test_terminal_status_does_not_flip() {
        let mut record = record();
        record.apply_outcome(&outcome(CallStatus::Completed, "completed", 40));
        record.apply_outcome(&outcome(CallStatus::Failed, "silence-timed-out", 10));

        assert_eq!(record.status, CallStatus::Completed);
        assert_eq!(record.call_duration_seconds, Some(40));
        assert_eq!(record.ended_reason.as_deref(), Some("completed"));
    }
}
