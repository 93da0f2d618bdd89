//! Configuration management for the TPV CLI
//!
//! Stores the API key, server URL and submission defaults in
//! ~/.config/tpv/config.toml. `TPV_API_URL` / `TPV_API_KEY` (environment or
//! `.env`) override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "tpv";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Agent code used when a submission file has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_agent_id: Option<String>,
    /// Assistant id used when a submission file has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assistant_id: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_agent_id: None,
            default_assistant_id: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (or defaults), then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(url) = lookup("TPV_API_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(key) = lookup("TPV_API_KEY").filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set API key
    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_file_uses_default_url() {
        let config = Config::parse("default_agent_id = \"MM23\"\n").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.default_agent_id.as_deref(), Some("MM23"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut config = Config::parse("base_url = \"https://tpv.example.com\"\n").unwrap();
        config.apply_overrides(|key| match key {
            "TPV_API_URL" => Some("http://127.0.0.1:9000".to_string()),
            "TPV_API_KEY" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_saved_form_omits_unset_fields() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("base_url"));
        assert!(!text.contains("api_key"));
    }
}
