use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::profile::EligibilityRule;
use crate::pipeline::stage6_goalposts::Goalposts;

/// Per-invocation parameters supplied by the caller alongside the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Rank changes larger than this are reported by the movement analyzer.
    #[serde(default = "default_movement_threshold")]
    pub movement_threshold: usize,
    #[serde(default)]
    pub eligibility: EligibilityRule,
    #[serde(default)]
    pub goalposts: Goalposts,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_top_k() -> usize {
    100
}

fn default_movement_threshold() -> usize {
    10
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            top_k: default_top_k(),
            movement_threshold: default_movement_threshold(),
            eligibility: EligibilityRule::default(),
            goalposts: Goalposts::default(),
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::from(e).within(path.display().to_string()))?;
        Self::from_json_str(&text).map_err(|e| e.within(path.display().to_string()))
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
