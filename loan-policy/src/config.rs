//! Configuration for the loan policy engine

use crate::policy::PolicyTable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Built-in rule set to use when no policy file is given
    pub policy_version: String,

    /// TOML file holding a custom policy table
    pub policy_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "loan-policy".to_string(),
            policy_version: "2026".to_string(),
            policy_file: None,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(version) = std::env::var("LOAN_POLICY_VERSION") {
            config.policy_version = version;
        }

        if let Ok(file) = std::env::var("LOAN_POLICY_FILE") {
            if !file.trim().is_empty() {
                config.policy_file = Some(PathBuf::from(file));
            }
        }

        Ok(config)
    }

    /// Resolve and validate the policy table this configuration points at
    pub fn load_policy(&self) -> crate::Result<PolicyTable> {
        let table = match &self.policy_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading policy table from file");
                PolicyTable::from_file(path)?
            }
            None => PolicyTable::builtin(&self.policy_version)?,
        };

        table.validate()?;
        tracing::info!(
            version = %table.version,
            effective_from = %table.effective_from,
            "Policy table loaded"
        );
        Ok(table)
    }
}
