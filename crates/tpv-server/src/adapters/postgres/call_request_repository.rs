//! PostgreSQL implementation of CallRequestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use tpv::{CallOutcome, CallRequest, CallRequestRepository, CallStatus, CallTransition, DomainError};

/// PostgreSQL implementation of CallRequestRepository
pub struct PgCallRequestRepository {
    pool: PgPool,
}

impl PgCallRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct CallRequestRow {
    id: Uuid,
    vapi_call_id: Option<String>,
    agent_id: String,
    company_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    customer_name: String,
    address: String,
    city: Option<String>,
    province: Option<String>,
    postal_code: Option<String>,
    phone_number: String,
    email: Option<String>,
    products: String,
    sales_price: f64,
    payment_option: Option<String>,
    finance_company: Option<String>,
    interest_rate: Option<f64>,
    promotional_term: Option<String>,
    amortization: Option<i32>,
    monthly_payment: Option<f64>,
    status: String,
    ended_reason: Option<String>,
    call_duration_seconds: Option<i32>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<CallRequestRow> for CallRequest {
    type Error = DomainError;

    fn try_from(row: CallRequestRow) -> Result<Self, Self::Error> {
        let status: CallStatus = row
            .status
            .parse()
            .map_err(|e: String| DomainError::Persistence(e))?;

        Ok(Self {
            id: row.id,
            vapi_call_id: row.vapi_call_id,
            agent_id: row.agent_id,
            company_name: row.company_name,
            first_name: row.first_name,
            last_name: row.last_name,
            customer_name: row.customer_name,
            address: row.address,
            city: row.city,
            province: row.province,
            postal_code: row.postal_code,
            phone_number: row.phone_number,
            email: row.email,
            products: row.products,
            sales_price: row.sales_price,
            payment_option: row.payment_option,
            finance_company: row.finance_company,
            interest_rate: row.interest_rate,
            promotional_term: row.promotional_term,
            amortization: row.amortization,
            monthly_payment: row.monthly_payment,
            status,
            ended_reason: row.ended_reason,
            call_duration_seconds: row.call_duration_seconds,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn persistence(e: sqlx::Error) -> DomainError {
    DomainError::Persistence(e.to_string())
}

#[async_trait]
impl CallRequestRepository for PgCallRequestRepository {
    async fn insert(&self, request: &CallRequest) -> Result<CallRequest, DomainError> {
        let row = sqlx::query_as::<_, CallRequestRow>(
            r#"
            INSERT INTO call_requests (
                id, vapi_call_id, agent_id, company_name, first_name, last_name, customer_name,
                address, city, province, postal_code, phone_number, email, products, sales_price,
                payment_option, finance_company, interest_rate, promotional_term, amortization,
                monthly_payment, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(&request.vapi_call_id)
        .bind(&request.agent_id)
        .bind(&request.company_name)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.customer_name)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.province)
        .bind(&request.postal_code)
        .bind(&request.phone_number)
        .bind(&request.email)
        .bind(&request.products)
        .bind(request.sales_price)
        .bind(&request.payment_option)
        .bind(&request.finance_company)
        .bind(request.interest_rate)
        .bind(&request.promotional_term)
        .bind(request.amortization)
        .bind(request.monthly_payment)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .bind(request.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(persistence)?;

        row.try_into()
    }

    async fn find_by_vapi_call_id(
        &self,
        vapi_call_id: &str,
    ) -> Result<Option<CallRequest>, DomainError> {
        let row = sqlx::query_as::<_, CallRequestRow>(
            "SELECT * FROM call_requests WHERE vapi_call_id = $1",
        )
        .bind(vapi_call_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn complete(
        &self,
        vapi_call_id: &str,
        outcome: &CallOutcome,
    ) -> Result<CallTransition, DomainError> {
        // Guarded on status so a replayed report cannot rewrite a terminal row
        let updated = sqlx::query_as::<_, CallRequestRow>(
            r#"
            UPDATE call_requests
            SET status = $2, ended_reason = $3, call_duration_seconds = $4, updated_at = NOW()
            WHERE vapi_call_id = $1 AND status = 'initiated'
            RETURNING *
            "#,
        )
        .bind(vapi_call_id)
        .bind(outcome.status.as_str())
        .bind(&outcome.ended_reason)
        .bind(outcome.duration_seconds)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?;

        if let Some(row) = updated {
            return Ok(CallTransition::Applied(row.try_into()?));
        }

        Ok(match self.find_by_vapi_call_id(vapi_call_id).await? {
            Some(existing) => CallTransition::AlreadyTerminal(existing),
            None => CallTransition::NotFound,
        })
    }

    async fn list_all(&self) -> Result<Vec<CallRequest>, DomainError> {
        let rows = sqlx::query_as::<_, CallRequestRow>(
            "SELECT * FROM call_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
