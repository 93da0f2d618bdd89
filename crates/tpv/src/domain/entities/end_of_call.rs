//! End-of-call report - Terminal event from the voice provider

use serde::{Deserialize, Serialize};

use crate::domain::entities::CallMetadata;
use crate::domain::value_objects::CallStatus;

/// Event `type` that marks the end of a call.
pub const END_OF_CALL_REPORT: &str = "end-of-call-report";

/// Which envelope layout an event arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeShape {
    /// Fields under a top-level `message` object (current provider format)
    Wrapped,
    /// Fields directly on the event (legacy format)
    Direct,
}

impl std::fmt::Display for EnvelopeShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeShape::Wrapped => write!(f, "wrapped"),
            EnvelopeShape::Direct => write!(f, "direct"),
        }
    }
}

/// Decoded provider webhook event
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    EndOfCall(EndOfCallReport),
    /// Anything this pipeline does not model; acknowledged and dropped
    Ignored { event_type: Option<String> },
}

/// The fields of an end-of-call report this pipeline cares about
#[derive(Debug, Clone, PartialEq)]
pub struct EndOfCallReport {
    pub shape: EnvelopeShape,
    /// Correlation key; absent means the report cannot be reconciled
    pub call_id: Option<String>,
    pub ended_reason: String,
    pub duration_seconds: Option<i32>,
    pub metadata: CallMetadata,
}

/// Terminal values written onto a CallRequest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    pub status: CallStatus,
    pub ended_reason: String,
    pub duration_seconds: Option<i32>,
}

impl EndOfCallReport {
    pub fn outcome(&self) -> CallOutcome {
        CallOutcome {
            status: CallStatus::from_ended_reason(&self.ended_reason),
            ended_reason: self.ended_reason.clone(),
            duration_seconds: self.duration_seconds,
        }
    }
}
