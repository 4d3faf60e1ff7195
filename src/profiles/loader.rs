use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::ConfigError;
use crate::model::normalize_spec::{NormalizeSpec, Step, Tier};
use crate::model::profile::{CombinationMode, FactorSpec, MetricSpec, ScoringProfile};
use crate::profiles::ProfileCatalog;
use crate::profiles::defs::{CurveDef, FactorDef, MetricDef, ProfileDef, builtin_profiles};

/// The stakeholder profiles shipped with the crate.
pub fn builtin_catalog() -> Result<ProfileCatalog, ConfigError> {
    let profiles = builtin_profiles()
        .iter()
        .map(build_profile)
        .collect::<Result<Vec<_>, _>>()?;
    ProfileCatalog::new(profiles)
}

/// Parses a catalog from JSON: either a bare array of profiles or an object
/// with a `profiles` array.
pub fn load_catalog_str(json: &str) -> Result<ProfileCatalog, ConfigError> {
    let doc: Value = serde_json::from_str(json)?;
    let list = match doc {
        Value::Object(mut map) => map.remove("profiles").unwrap_or(Value::Null),
        other => other,
    };
    let profiles: Vec<ScoringProfile> = serde_json::from_value(list)?;
    let catalog = ProfileCatalog::new(profiles)?;
    info!(
        profiles = catalog.len(),
        ids = ?catalog.ids(),
        "profile catalog loaded"
    );
    Ok(catalog)
}

pub fn load_catalog_path(path: &Path) -> Result<ProfileCatalog, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::from(e).within(path.display().to_string()))?;
    load_catalog_str(&text).map_err(|e| e.within(path.display().to_string()))
}

fn build_profile(def: &ProfileDef) -> Result<ScoringProfile, ConfigError> {
    let factors = def
        .factors
        .iter()
        .map(build_factor)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.within(format!("profile '{}'", def.id)))?;
    ScoringProfile::new(def.id, def.label, factors, CombinationMode::Multiplicative)
}

fn build_factor(def: &FactorDef) -> Result<FactorSpec, ConfigError> {
    let metrics = def
        .metrics
        .iter()
        .map(build_metric)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.within(format!("factor '{}'", def.name)))?;
    FactorSpec::new(def.name, metrics, def.floor, None)
}

fn build_metric(def: &MetricDef) -> Result<MetricSpec, ConfigError> {
    MetricSpec::new(def.metric, def.weight, build_curve(def.curve)?, def.default)
}

fn build_curve(curve: CurveDef) -> Result<NormalizeSpec, ConfigError> {
    Ok(match curve {
        CurveDef::Linear(max) => NormalizeSpec::Linear { max },
        CurveDef::Sqrt(max) => NormalizeSpec::Sqrt { max },
        CurveDef::Log(max) => NormalizeSpec::Log { max },
        CurveDef::Stepped(steps) => {
            NormalizeSpec::stepped(steps.iter().map(|&(t, v)| Step::new(t, v)).collect())?
        }
        CurveDef::Tiered(tiers) => NormalizeSpec::tiered(
            tiers
                .iter()
                .map(|&(min, max, base, slope)| Tier::new(min, max, base, slope))
                .collect(),
        )?,
        CurveDef::Score5 => NormalizeSpec::FiveScale,
    })
}
