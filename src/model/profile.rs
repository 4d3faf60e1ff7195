use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::normalize_spec::NormalizeSpec;

/// One weighted, normalized input to a factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMetricSpec")]
pub struct MetricSpec {
    metric: String,
    weight: f64,
    normalize: NormalizeSpec,
    default: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawMetricSpec {
    #[serde(alias = "field")]
    metric: String,
    weight: f64,
    normalize: NormalizeSpec,
    #[serde(default)]
    default: f64,
    #[serde(default)]
    cap: Option<f64>,
}

impl TryFrom<RawMetricSpec> for MetricSpec {
    type Error = ConfigError;

    fn try_from(raw: RawMetricSpec) -> Result<Self, Self::Error> {
        let spec = MetricSpec::new(raw.metric, raw.weight, raw.normalize, raw.default)?;
        match raw.cap {
            Some(cap) => spec.with_cap(cap),
            None => Ok(spec),
        }
    }
}

impl MetricSpec {
    /// `default` is expressed in the metric's raw units (1–5 for
    /// [`NormalizeSpec::FiveScale`]).
    pub fn new(
        metric: impl Into<String>,
        weight: f64,
        normalize: NormalizeSpec,
        default: f64,
    ) -> Result<Self, ConfigError> {
        let metric = metric.into();
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::InvalidWeight { metric, weight });
        }
        if !default.is_finite() {
            return Err(ConfigError::InvalidDefault {
                metric,
                value: default,
            });
        }
        normalize
            .validate()
            .map_err(|e| e.within(format!("metric '{metric}'")))?;

        Ok(Self {
            metric,
            weight,
            normalize,
            default,
            cap: None,
        })
    }

    /// Upper bound applied to the raw value before normalization.
    pub fn with_cap(mut self, cap: f64) -> Result<Self, ConfigError> {
        if !cap.is_finite() {
            return Err(ConfigError::InvalidCap {
                metric: self.metric,
                value: cap,
            });
        }
        self.cap = Some(cap);
        Ok(self)
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn normalize(&self) -> &NormalizeSpec {
        &self.normalize
    }

    pub fn default_value(&self) -> f64 {
        self.default
    }

    pub fn cap(&self) -> Option<f64> {
        self.cap
    }
}

/// A named sub-score built from weighted metrics and clamped to
/// `[floor, ceiling]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFactorSpec")]
pub struct FactorSpec {
    name: String,
    metrics: Vec<MetricSpec>,
    floor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ceiling: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawFactorSpec {
    name: String,
    metrics: Vec<MetricSpec>,
    #[serde(default)]
    floor: f64,
    #[serde(default)]
    ceiling: Option<f64>,
}

impl TryFrom<RawFactorSpec> for FactorSpec {
    type Error = ConfigError;

    fn try_from(raw: RawFactorSpec) -> Result<Self, Self::Error> {
        FactorSpec::new(raw.name, raw.metrics, raw.floor, raw.ceiling)
    }
}

impl FactorSpec {
    pub fn new(
        name: impl Into<String>,
        metrics: Vec<MetricSpec>,
        floor: f64,
        ceiling: Option<f64>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if metrics.is_empty() {
            return Err(ConfigError::EmptyFactor { factor: name });
        }
        let total_weight: f64 = metrics.iter().map(MetricSpec::weight).sum();
        if !total_weight.is_finite() {
            return Err(ConfigError::NonFiniteFactorWeight {
                factor: name,
                total: total_weight,
            });
        }
        if total_weight <= 0.0 {
            return Err(ConfigError::ZeroFactorWeight { factor: name });
        }
        if !(0.0..=1.0).contains(&floor) {
            return Err(ConfigError::InvalidBound {
                factor: name,
                which: "floor",
                value: floor,
            });
        }
        if let Some(ceiling) = ceiling {
            if !(0.0..=1.0).contains(&ceiling) {
                return Err(ConfigError::InvalidBound {
                    factor: name,
                    which: "ceiling",
                    value: ceiling,
                });
            }
            if floor > ceiling {
                return Err(ConfigError::FloorAboveCeiling {
                    factor: name,
                    floor,
                    ceiling,
                });
            }
        }

        Ok(Self {
            name,
            metrics,
            floor,
            ceiling,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> &[MetricSpec] {
        &self.metrics
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> Option<f64> {
        self.ceiling
    }

    /// Upper clamp bound: the ceiling, or 1 when none is configured.
    pub fn upper_bound(&self) -> f64 {
        self.ceiling.unwrap_or(1.0)
    }

    pub fn total_weight(&self) -> f64 {
        self.metrics.iter().map(MetricSpec::weight).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationMode {
    /// `100 * product(factor scores)`: a weak factor caps the whole score.
    #[default]
    Multiplicative,
    /// `100 * mean(factor scores)`, kept for baseline comparison.
    Additive,
}

/// Candidate-list rule applied before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEligibilityRule")]
pub struct EligibilityRule {
    min_years_remaining: f64,
}

#[derive(Debug, Deserialize)]
struct RawEligibilityRule {
    #[serde(default)]
    min_years_remaining: f64,
}

impl TryFrom<RawEligibilityRule> for EligibilityRule {
    type Error = ConfigError;

    fn try_from(raw: RawEligibilityRule) -> Result<Self, Self::Error> {
        EligibilityRule::new(raw.min_years_remaining)
    }
}

impl Default for EligibilityRule {
    fn default() -> Self {
        Self {
            min_years_remaining: 0.0,
        }
    }
}

impl EligibilityRule {
    pub fn new(min_years_remaining: f64) -> Result<Self, ConfigError> {
        if !min_years_remaining.is_finite() {
            return Err(ConfigError::InvalidEligibility(format!(
                "min_years_remaining {min_years_remaining} is not finite"
            )));
        }
        Ok(Self {
            min_years_remaining,
        })
    }

    pub fn min_years_remaining(&self) -> f64 {
        self.min_years_remaining
    }
}

/// A stakeholder perspective: pure data, authored as configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoringProfile")]
pub struct ScoringProfile {
    id: String,
    label: String,
    factors: Vec<FactorSpec>,
    combination: CombinationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    eligibility: Option<EligibilityRule>,
}

#[derive(Debug, Deserialize)]
struct RawScoringProfile {
    id: String,
    #[serde(default)]
    label: Option<String>,
    factors: Vec<FactorSpec>,
    #[serde(default)]
    combination: CombinationMode,
    #[serde(default)]
    eligibility: Option<EligibilityRule>,
}

impl TryFrom<RawScoringProfile> for ScoringProfile {
    type Error = ConfigError;

    fn try_from(raw: RawScoringProfile) -> Result<Self, Self::Error> {
        let label = raw.label.unwrap_or_else(|| raw.id.clone());
        let profile = ScoringProfile::new(raw.id, label, raw.factors, raw.combination)?;
        Ok(match raw.eligibility {
            Some(rule) => profile.with_eligibility(rule),
            None => profile,
        })
    }
}

impl ScoringProfile {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        factors: Vec<FactorSpec>,
        combination: CombinationMode,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        if factors.is_empty() {
            return Err(ConfigError::EmptyProfile { profile: id });
        }
        let mut seen = BTreeSet::new();
        for factor in &factors {
            if !seen.insert(factor.name()) {
                return Err(ConfigError::DuplicateFactor {
                    profile: id.clone(),
                    factor: factor.name().to_string(),
                });
            }
        }

        Ok(Self {
            id,
            label: label.into(),
            factors,
            combination,
            eligibility: None,
        })
    }

    pub fn with_eligibility(mut self, rule: EligibilityRule) -> Self {
        self.eligibility = Some(rule);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn factors(&self) -> &[FactorSpec] {
        &self.factors
    }

    pub fn combination(&self) -> CombinationMode {
        self.combination
    }

    pub fn eligibility(&self) -> Option<&EligibilityRule> {
        self.eligibility.as_ref()
    }
}
