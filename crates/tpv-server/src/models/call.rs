//! Call initiation DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tpv::TpvSubmission;

use crate::application::InitiatedCall;

/// Form submission from the sales agent.
///
/// Numeric fields may arrive as strings or numbers; `products` as a list
/// or a comma-joined string.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = json!({
    "agentId": "MM23",
    "assistantId": "33a8b0b6-2fc0-4f1f-9f01-02712d52a676",
    "customerName": "Jane Doe",
    "address": "12 King St W",
    "city": "Toronto",
    "province": "ON",
    "postalCode": "M5H 1A1",
    "phoneNumber": "416-555-1234",
    "products": ["Furnace", "Air Conditioner"],
    "salesPrice": "10000",
    "paymentOption": "finance",
    "interestRate": "9.99",
    "amortization": "60"
}))]
pub struct InitiateCallRequest(#[schema(value_type = Object)] pub TpvSubmission);

/// Call initiation response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitiateCallResponse {
    pub success: bool,
    /// External call id, the correlation key for the end-of-call webhook
    pub call_id: String,
    pub message: String,
    /// Voice provider response as received
    #[schema(value_type = Object)]
    pub call_data: serde_json::Value,
}

impl InitiateCallResponse {
    pub fn from_initiated(call: InitiatedCall) -> Self {
        let message = if call.persisted {
            "TPV verification call initiated successfully"
        } else {
            "TPV verification call initiated, but the request could not be saved"
        };

        Self {
            success: true,
            call_id: call.call_id,
            message: message.to_string(),
            call_data: call.call_data,
        }
    }
}
