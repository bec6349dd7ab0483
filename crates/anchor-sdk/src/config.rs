use std::path::Path;

use anchor_ledger::Deadline;
use anchor_types::NetworkType;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Settings for an [`AssetRepository`](crate::AssetRepository).
///
/// Every field is optional in TOML and falls back to its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Network used to derive addresses.
    pub network: NetworkType,
    /// Hours until a built transaction's deadline.
    pub deadline_hours: i64,
    /// Replay ownership commands from the address's incoming history.
    pub replay_commands: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::MijinTest,
            deadline_hours: Deadline::DEFAULT_HOURS,
            replay_commands: true,
        }
    }
}

impl RepositoryConfig {
    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string(self).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// A fresh deadline `deadline_hours` from now.
    pub fn deadline(&self) -> Deadline {
        Deadline::create(self.deadline_hours)
    }
}
