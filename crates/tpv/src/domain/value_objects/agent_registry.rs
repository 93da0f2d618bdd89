//! AgentRegistry - Static agent code to phone number lookup
//!
//! Consulted by the call initiator (to reject unknown agents) and by the
//! webhook reconciler (to route the outcome text). It is read-only and
//! injected wherever it is needed.

use std::collections::BTreeMap;

use crate::domain::errors::DomainError;

/// Mapping used when no registry is configured.
pub const DEFAULT_AGENT_PHONE_NUMBERS: &str = "MM23=+19059043544";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentRegistry {
    agents: BTreeMap<String, String>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent (builder style, mostly for fixtures)
    pub fn with_agent(mut self, code: impl Into<String>, phone: impl Into<String>) -> Self {
        self.agents.insert(code.into(), phone.into());
        self
    }

    /// Parse `CODE=+15550001111, CODE2=+15550002222`.
    ///
    /// Phone numbers must already be in E.164 form.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut agents = BTreeMap::new();

        for entry in raw.split([',', ';', '\n']).map(str::trim) {
            if entry.is_empty() {
                continue;
            }

            let (code, phone) = entry.split_once('=').ok_or_else(|| {
                DomainError::configuration(format!("Invalid agent mapping entry: {}", entry))
            })?;
            let (code, phone) = (code.trim(), phone.trim());

            let valid_phone = phone.len() > 1
                && phone.starts_with('+')
                && phone[1..].chars().all(|c| c.is_ascii_digit());
            if code.is_empty() || !valid_phone {
                return Err(DomainError::configuration(format!(
                    "Invalid agent mapping entry: {}",
                    entry
                )));
            }

            agents.insert(code.to_string(), phone.to_string());
        }

        if agents.is_empty() {
            return Err(DomainError::configuration("Agent mapping is empty"));
        }

        Ok(Self { agents })
    }

    /// Phone number for an agent code, if the code is known
    pub fn phone_for(&self, agent_id: &str) -> Option<&str> {
        self.agents.get(agent_id.trim()).map(String::as_str)
    }

    pub fn contains(&self, agent_id: &str) -> bool {
        self.phone_for(agent_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
