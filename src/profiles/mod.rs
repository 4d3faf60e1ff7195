pub mod defs;
pub mod loader;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::ConfigError;
use crate::model::profile::ScoringProfile;

pub use loader::{builtin_catalog, load_catalog_path, load_catalog_str};

/// Validated, read-only set of scoring profiles with unique ids. Order is
/// the authoring order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProfileCatalog {
    profiles: Vec<ScoringProfile>,
}

impl ProfileCatalog {
    pub fn new(profiles: Vec<ScoringProfile>) -> Result<Self, ConfigError> {
        if profiles.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let mut seen = BTreeSet::new();
        for profile in &profiles {
            if !seen.insert(profile.id()) {
                return Err(ConfigError::DuplicateProfile(profile.id().to_string()));
            }
        }
        Ok(Self { profiles })
    }

    pub fn get(&self, id: &str) -> Option<&ScoringProfile> {
        self.profiles.iter().find(|p| p.id() == id)
    }

    pub fn profile(&self, id: &str) -> Result<&ScoringProfile, ConfigError> {
        self.get(id)
            .ok_or_else(|| ConfigError::UnknownProfile(id.to_string()))
    }

    pub fn profiles(&self) -> &[ScoringProfile] {
        &self.profiles
    }

    pub fn ids(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/profiles/tests.rs"]
mod tests;
