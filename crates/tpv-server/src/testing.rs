//! In-memory fakes of the ports for application and route tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::Semaphore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use tpv::{
    CallOutcome, CallPlacement, CallRequest, CallRequestRepository, CallStatus, CallTransition,
    DomainError, PlacedCall, SheetMirror, SmsNotifier, VoiceProvider,
};

/// An initiated record for agent MM23
pub fn sample_record(vapi_call_id: &str, created_at: &str) -> CallRequest {
    let created_at: DateTime<Utc> = created_at.parse().unwrap();
    CallRequest {
        id: Uuid::new_v4(),
        vapi_call_id: Some(vapi_call_id.to_string()),
        agent_id: "MM23".to_string(),
        company_name: None,
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        customer_name: "Jane Doe".to_string(),
        address: "12 King St W".to_string(),
        city: Some("Toronto".to_string()),
        province: Some("ON".to_string()),
        postal_code: Some("M5H 1A1".to_string()),
        phone_number: "+14165551234".to_string(),
        email: None,
        products: "Furnace".to_string(),
        sales_price: 5000.0,
        payment_option: None,
        finance_company: None,
        interest_rate: None,
        promotional_term: None,
        amortization: None,
        monthly_payment: None,
        status: CallStatus::Initiated,
        ended_reason: None,
        call_duration_seconds: None,
        created_at,
        updated_at: created_at,
    }
}

#[derive(Default)]
pub struct InMemoryCallRequestRepository {
    records: Mutex<Vec<CallRequest>>,
    fail_writes: bool,
}

impl InMemoryCallRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert fails with a persistence error
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, record: CallRequest) {
        self.records.lock().unwrap().push(record);
    }

    pub fn records(&self) -> Vec<CallRequest> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallRequestRepository for InMemoryCallRequestRepository {
    async fn insert(&self, request: &CallRequest) -> Result<CallRequest, DomainError> {
        if self.fail_writes {
            return Err(DomainError::Persistence("connection refused".to_string()));
        }
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.vapi_call_id.is_some() && r.vapi_call_id == request.vapi_call_id)
        {
            return Err(DomainError::Persistence("duplicate vapi_call_id".to_string()));
        }
        records.push(request.clone());
        Ok(request.clone())
    }

    async fn find_by_vapi_call_id(
        &self,
        vapi_call_id: &str,
    ) -> Result<Option<CallRequest>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.vapi_call_id.as_deref() == Some(vapi_call_id))
            .cloned())
    }

    async fn complete(
        &self,
        vapi_call_id: &str,
        outcome: &CallOutcome,
    ) -> Result<CallTransition, DomainError> {
        let mut records = self.records.lock().unwrap();
        let Some(record) = records
            .iter_mut()
            .find(|r| r.vapi_call_id.as_deref() == Some(vapi_call_id))
        else {
            return Ok(CallTransition::NotFound);
        };

        if record.apply_outcome(outcome) {
            Ok(CallTransition::Applied(record.clone()))
        } else {
            Ok(CallTransition::AlreadyTerminal(record.clone()))
        }
    }

    async fn list_all(&self) -> Result<Vec<CallRequest>, DomainError> {
        let mut records = self.records();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

pub struct RecordingVoiceProvider {
    placements: Mutex<Vec<CallPlacement>>,
    answer: Result<String, (u16, String)>,
}

impl RecordingVoiceProvider {
    pub fn accepting(call_id: &str) -> Self {
        Self {
            placements: Mutex::new(Vec::new()),
            answer: Ok(call_id.to_string()),
        }
    }

    pub fn rejecting(status: u16, body: &str) -> Self {
        Self {
            placements: Mutex::new(Vec::new()),
            answer: Err((status, body.to_string())),
        }
    }

    pub fn placements(&self) -> Vec<CallPlacement> {
        self.placements.lock().unwrap().clone()
    }
}

#[async_trait]
impl VoiceProvider for RecordingVoiceProvider {
    async fn place_call(&self, placement: &CallPlacement) -> Result<PlacedCall, DomainError> {
        self.placements.lock().unwrap().push(placement.clone());
        match &self.answer {
            Ok(id) => Ok(PlacedCall {
                id: id.clone(),
                raw: json!({ "id": id, "status": "queued" }),
            }),
            Err((status, body)) => Err(DomainError::provider("VAPI", *status, body.clone())),
        }
    }
}

#[derive(Default)]
pub struct RecordingSms {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingSms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsNotifier for RecordingSms {
    async fn send(&self, to: &str, body: &str) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::Notification("Failed to send SMS: 401".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSheet {
    writes: Mutex<Vec<Vec<Vec<String>>>>,
    attempts: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    /// When set, every write waits for a permit
    gate: Option<Semaphore>,
    fail: bool,
}

impl RecordingSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Writes block until `release` is called
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    pub fn release(&self, writes: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(writes);
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    /// Calls to `replace_all`, failed ones included
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Most writes ever in progress at the same time
    pub fn max_concurrent_writes(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn last_write(&self) -> Option<Vec<Vec<String>>> {
        self.writes.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SheetMirror for RecordingSheet {
    async fn replace_all(&self, values: Vec<Vec<String>>) -> Result<usize, DomainError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.fail {
            return Err(DomainError::Sync("Sheet write failed: 403".to_string()));
        }
        let rows = values.len();
        self.writes.lock().unwrap().push(values);
        Ok(rows)
    }
}

/// Poll until `done` holds, failing the test after one second
pub async fn eventually(done: impl Fn() -> bool) {
    tokio::time::timeout(std::time::Duration::from_secs(1), async {
        while !done() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached within 1s");
}
