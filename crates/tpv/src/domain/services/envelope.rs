//! Webhook envelope decoder
//!
//! The voice provider has delivered events in two layouts over time:
//!
//! - `Wrapped` (current): `{ "message": { "type": ..., "endedReason": ..., "call": {...} } }`
//! - `Direct` (legacy): `{ "type": ..., "endedReason": ..., "call": {...} }`
//!
//! Both layouts are decoded; an end-of-call marker at either level makes the
//! event terminal, with the wrapped layout checked first. Anything else is
//! reported as `WebhookEvent::Ignored` and never as an error, because the
//! provider must always get a 2xx for events this pipeline does not model.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::entities::{
    CallMetadata, EndOfCallReport, EnvelopeShape, WebhookEvent, END_OF_CALL_REPORT,
};

/// Ended reason recorded when the provider sends none.
pub const UNKNOWN_ENDED_REASON: &str = "unknown";

/// Decode an arbitrary webhook body.
///
/// Only `type` decides whether an event is terminal. Every other field is
/// read on its own, so a field of an unexpected type is treated as absent.
pub fn decode(body: &Value) -> WebhookEvent {
    let candidates = [
        (EnvelopeShape::Wrapped, body.get("message")),
        (EnvelopeShape::Direct, Some(body)),
    ];

    let mut first_type = None;
    for (shape, event) in candidates {
        let Some(event) = event.filter(|e| e.is_object()) else { continue };
        let Some(event_type) = event.get("type").and_then(Value::as_str) else {
            continue;
        };
        if event_type == END_OF_CALL_REPORT {
            return WebhookEvent::EndOfCall(into_report(shape, event));
        }
        if first_type.is_none() {
            first_type = Some(event_type.to_string());
        }
    }

    WebhookEvent::Ignored {
        event_type: first_type,
    }
}

fn into_report(shape: EnvelopeShape, event: &Value) -> EndOfCallReport {
    let call = event.get("call").filter(|c| c.is_object());
    let call_field = |key: &str| call.and_then(|c| c.get(key));

    let ended_reason = text(event.get("endedReason"))
        .or_else(|| text(call_field("endedReason")))
        .unwrap_or_else(|| UNKNOWN_ENDED_REASON.to_string());

    let duration_seconds = number(event.get("durationSeconds"))
        .or_else(|| number(event.get("durationMs")).map(|ms| ms / 1000.0))
        .or_else(|| {
            elapsed_seconds(
                timestamp(event.get("startedAt")),
                timestamp(event.get("endedAt")),
            )
        })
        .or_else(|| {
            elapsed_seconds(
                timestamp(call_field("startedAt")),
                timestamp(call_field("endedAt")),
            )
        })
        .map(whole_seconds);

    EndOfCallReport {
        shape,
        call_id: text(call_field("id")),
        ended_reason,
        duration_seconds,
        metadata: metadata(call_field("metadata"))
            .or_else(|| metadata(event.get("metadata")))
            .unwrap_or_default(),
    }
}

/// Non-blank string, or a number rendered as text
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A JSON number, or a string holding one
fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    value?.as_str()?.parse().ok()
}

fn metadata(value: Option<&Value>) -> Option<CallMetadata> {
    let value = value.filter(|m| m.is_object())?;
    Some(CallMetadata {
        agent_id: text(value.get("agentId")),
        customer_name: text(value.get("customerName")),
        address: text(value.get("address")),
    })
}

fn elapsed_seconds(started: Option<DateTime<Utc>>, ended: Option<DateTime<Utc>>) -> Option<f64> {
    let (started, ended) = (started?, ended?);
    Some((ended - started).num_milliseconds() as f64 / 1000.0)
}

/// Round to whole seconds; negative and non-finite durations become 0.
fn whole_seconds(seconds: f64) -> i32 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    seconds.round().min(f64::from(i32::MAX)) as i32
}
