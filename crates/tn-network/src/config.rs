//! Network configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tn_graph::SearchLimits;
use tn_routing::PenaltyConfig;

use crate::error::{NetworkError, NetworkResult};

/// Tunables for network queries. Every field is optional in YAML.
///
/// ```yaml
/// penalties:
///   walking_penalty: 10.0
///   transfer_penalty: 1.0
/// search:
///   max_paths: 100
///   max_depth: 12
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub penalties: PenaltyConfig,
    pub search: SearchLimits,
}

impl NetworkConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(content: &str) -> NetworkResult<Self> {
        let config: NetworkConfig = serde_yaml::from_str(content)
            .map_err(|e| NetworkError::Config(format!("Failed to parse config YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file.
    pub fn load(path: &Path) -> NetworkResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NetworkError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> NetworkResult<()> {
        self.penalties.validate()?;
        Ok(())
    }
}
