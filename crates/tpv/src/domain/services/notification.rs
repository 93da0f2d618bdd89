//! Agent notification text

use crate::domain::entities::{CallOutcome, CallRequest, EndOfCallReport};
use crate::domain::value_objects::CallStatus;

/// Compose the text sent to the agent once a call has ended.
///
/// Echoed metadata is preferred; the stored record fills whatever the
/// provider did not send back.
pub fn agent_summary(
    report: &EndOfCallReport,
    outcome: &CallOutcome,
    record: Option<&CallRequest>,
) -> String {
    let status_text = match outcome.status {
        CallStatus::Completed => "✅ SUCCESSFUL",
        _ => "❌ FAILED",
    };

    let customer = report
        .metadata
        .customer_name
        .as_deref()
        .or(record.map(|r| r.customer_name.as_str()))
        .unwrap_or("Unknown");
    let address = report
        .metadata
        .address
        .as_deref()
        .or(record.map(|r| r.address.as_str()))
        .unwrap_or("Unknown");
    let agent = report
        .metadata
        .agent_id
        .as_deref()
        .or(record.map(|r| r.agent_id.as_str()))
        .unwrap_or("Unknown");
    let call_id = report.call_id.as_deref().unwrap_or("N/A");

    format!(
        "TPV Call {}\n\nCustomer: {}\nAddress: {}\nAgent ID: {}\nStatus: {}\n\nCall ID: {}",
        status_text, customer, address, agent, outcome.ended_reason, call_id
    )
}
