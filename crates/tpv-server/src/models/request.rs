//! Stored call request DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use tpv::CallRequest;

/// Call request as stored
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallRequestResponse {
    pub id: Uuid,
    pub vapi_call_id: Option<String>,
    pub agent_id: String,
    pub company_name: Option<String>,
    pub customer_name: String,
    pub address: String,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: String,
    pub email: Option<String>,
    pub products: String,
    pub sales_price: f64,
    pub payment_option: Option<String>,
    pub finance_company: Option<String>,
    pub interest_rate: Option<f64>,
    pub promotional_term: Option<String>,
    pub amortization: Option<i32>,
    pub monthly_payment: Option<f64>,
    /// initiated, completed or failed
    pub status: String,
    pub ended_reason: Option<String>,
    pub call_duration_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CallRequestResponse {
    pub fn from_domain(request: CallRequest) -> Self {
        Self {
            id: request.id,
            vapi_call_id: request.vapi_call_id,
            agent_id: request.agent_id,
            company_name: request.company_name,
            customer_name: request.customer_name,
            address: request.address,
            city: request.city,
            province: request.province,
            postal_code: request.postal_code,
            phone_number: request.phone_number,
            email: request.email,
            products: request.products,
            sales_price: request.sales_price,
            payment_option: request.payment_option,
            finance_company: request.finance_company,
            interest_rate: request.interest_rate,
            promotional_term: request.promotional_term,
            amortization: request.amortization,
            monthly_payment: request.monthly_payment,
            status: request.status.to_string(),
            ended_reason: request.ended_reason,
            call_duration_seconds: request.call_duration_seconds,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}
