//! CallPlacement - Provider-neutral command to dial a customer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ValidatedSubmission;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::PhoneNumber;

/// Metadata the voice provider echoes back in its end-of-call report.
///
/// Until the external call id is known this block is the only link between
/// a provider event and the request that caused it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Everything the voice provider needs to place one verification call
#[derive(Debug, Clone, PartialEq)]
pub struct CallPlacement {
    pub destination: PhoneNumber,
    /// Outbound number the provider dials from
    pub phone_number_id: Option<String>,
    pub assistant_id: String,
    /// Business fields exposed to the assistant as runtime variables
    pub variable_values: BTreeMap<String, String>,
    pub metadata: CallMetadata,
}

impl CallPlacement {
    /// Build the placement command for a validated submission.
    ///
    /// Request-level `assistantId` / `phoneNumberId` win over the configured
    /// defaults.
    pub fn for_submission(
        submission: &ValidatedSubmission,
        default_assistant_id: Option<&str>,
        default_phone_number_id: Option<&str>,
    ) -> Result<Self, DomainError> {
        let assistant_id = submission
            .assistant_id
            .as_deref()
            .or(default_assistant_id)
            .ok_or_else(|| DomainError::validation("assistantId is required"))?
            .to_string();

        let phone_number_id = submission
            .phone_number_id
            .as_deref()
            .or(default_phone_number_id)
            .map(str::to_string);

        Ok(Self {
            destination: submission.phone.clone(),
            phone_number_id,
            assistant_id,
            variable_values: variable_values(submission),
            metadata: CallMetadata {
                agent_id: Some(submission.agent_id.clone()),
                customer_name: Some(submission.customer_name.clone()),
                address: Some(submission.address.clone()),
            },
        })
    }
}

fn variable_values(s: &ValidatedSubmission) -> BTreeMap<String, String> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let number = |v: Option<f64>| v.map(format_number).unwrap_or_default();

    let pairs = [
        ("agentId", s.agent_id.clone()),
        ("companyName", text(&s.company_name)),
        ("customerName", s.customer_name.clone()),
        ("firstName", text(&s.first_name)),
        ("lastName", text(&s.last_name)),
        ("address", s.address.clone()),
        ("city", text(&s.city)),
        ("province", text(&s.province)),
        ("postalCode", text(&s.postal_code)),
        ("phoneNumber", s.raw_phone.clone()),
        ("email", text(&s.email)),
        ("products", s.products_joined()),
        ("salesPrice", format_number(s.sales_price)),
        ("paymentOption", text(&s.payment_option)),
        ("financeCompany", text(&s.finance_company)),
        ("interestRate", number(s.interest_rate)),
        ("promotionalTerm", text(&s.promotional_term)),
        (
            "amortization",
            s.amortization.map(|m| m.to_string()).unwrap_or_default(),
        ),
        (
            "monthlyPayment",
            s.monthly_payment
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default(),
        ),
    ];

    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// `10000.0` -> `10000`, `9.99` -> `9.99`, `12.5` -> `12.5`
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
