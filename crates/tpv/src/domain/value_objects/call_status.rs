//! CallStatus - Lifecycle state of a verification call

use serde::{Deserialize, Serialize};

/// Ended-reason codes that count as a clean, successful termination.
pub const CLEAN_ENDED_REASONS: &[&str] = &["assistant-ended-call", "completed"];

/// Lifecycle state of a CallRequest.
///
/// `Initiated` is the only non-terminal state; a record moves from it to
/// `Completed` or `Failed` once and never again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Initiated,
    Completed,
    Failed,
}

impl CallStatus {
    /// Classify a provider ended-reason code into a terminal status.
    pub fn from_ended_reason(reason: &str) -> Self {
        if CLEAN_ENDED_REASONS.contains(&reason) {
            CallStatus::Completed
        } else {
            CallStatus::Failed
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, CallStatus::Initiated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallStatus::Initiated => "initiated",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "initiated" => Ok(CallStatus::Initiated),
            "completed" => Ok(CallStatus::Completed),
            "failed" => Ok(CallStatus::Failed),
            _ => Err(format!("Unknown call status: {}", s)),
        }
    }
}
