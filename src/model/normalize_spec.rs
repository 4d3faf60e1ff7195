use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How one raw metric value maps onto the unit interval.
///
/// Every variant is handled by an exhaustive match in
/// [`crate::pipeline::stage1_normalize::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NormalizeSpec {
    Linear {
        max: f64,
    },
    Sqrt {
        max: f64,
    },
    Log {
        max: f64,
    },
    Stepped {
        steps: Steps,
    },
    TieredContinuous {
        tiers: Tiers,
    },
    #[serde(rename = "score5", alias = "five_scale")]
    FiveScale,
}

impl NormalizeSpec {
    pub fn stepped(steps: Vec<Step>) -> Result<Self, ConfigError> {
        Ok(NormalizeSpec::Stepped {
            steps: Steps::new(steps)?,
        })
    }

    pub fn tiered(tiers: Vec<Tier>) -> Result<Self, ConfigError> {
        Ok(NormalizeSpec::TieredContinuous {
            tiers: Tiers::new(tiers)?,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NormalizeSpec::Linear { .. } => "linear",
            NormalizeSpec::Sqrt { .. } => "sqrt",
            NormalizeSpec::Log { .. } => "log",
            NormalizeSpec::Stepped { .. } => "stepped",
            NormalizeSpec::TieredContinuous { .. } => "tiered_continuous",
            NormalizeSpec::FiveScale => "score5",
        }
    }

    /// Checks the parameters not already enforced by [`Steps`] and [`Tiers`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            NormalizeSpec::Linear { max } | NormalizeSpec::Sqrt { max } | NormalizeSpec::Log { max } => {
                if !max.is_finite() || *max <= 0.0 {
                    return Err(ConfigError::InvalidMax(*max));
                }
                Ok(())
            }
            NormalizeSpec::Stepped { .. }
            | NormalizeSpec::TieredContinuous { .. }
            | NormalizeSpec::FiveScale => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub threshold: f64,
    pub value: f64,
}

impl Step {
    pub fn new(threshold: f64, value: f64) -> Self {
        Self { threshold, value }
    }
}

/// Step list, held sorted by descending threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct Steps(Vec<Step>);

impl Steps {
    pub fn new(mut steps: Vec<Step>) -> Result<Self, ConfigError> {
        if steps.is_empty() {
            return Err(ConfigError::EmptySteps);
        }
        for step in &steps {
            if !step.threshold.is_finite() {
                return Err(ConfigError::InvalidThreshold(step.threshold));
            }
            if !(0.0..=1.0).contains(&step.value) {
                return Err(ConfigError::InvalidStepValue {
                    threshold: step.threshold,
                    value: step.value,
                });
            }
        }

        steps.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));

        for pair in steps.windows(2) {
            let (higher, lower) = (pair[0], pair[1]);
            if higher.threshold == lower.threshold {
                return Err(ConfigError::DuplicateThreshold(higher.threshold));
            }
            if higher.value < lower.value {
                return Err(ConfigError::NonMonotonicSteps {
                    threshold: higher.threshold,
                    value: higher.value,
                    lower_value: lower.value,
                });
            }
        }

        Ok(Self(steps))
    }

    /// Steps from highest threshold to lowest.
    pub fn descending(&self) -> &[Step] {
        &self.0
    }
}

impl TryFrom<Vec<Step>> for Steps {
    type Error = ConfigError;

    fn try_from(value: Vec<Step>) -> Result<Self, Self::Error> {
        Steps::new(value)
    }
}

impl From<Steps> for Vec<Step> {
    fn from(value: Steps) -> Self {
        value.0
    }
}

/// One `[min, max)` band of a tiered curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub min: f64,
    pub max: f64,
    pub base_value: f64,
    pub slope: f64,
}

impl Tier {
    pub fn new(min: f64, max: f64, base_value: f64, slope: f64) -> Self {
        Self {
            min,
            max,
            base_value,
            slope,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    pub fn top_value(&self) -> f64 {
        self.base_value + self.slope
    }
}

/// Ascending, contiguous, non-overlapping tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct Tiers(Vec<Tier>);

impl Tiers {
    pub fn new(tiers: Vec<Tier>) -> Result<Self, ConfigError> {
        if tiers.is_empty() {
            return Err(ConfigError::EmptyTiers);
        }

        for (index, tier) in tiers.iter().enumerate() {
            let invalid = |reason: String| ConfigError::InvalidTier { index, reason };
            if !tier.min.is_finite() || !tier.max.is_finite() {
                return Err(invalid(format!(
                    "bounds [{}, {}) must be finite",
                    tier.min, tier.max
                )));
            }
            if tier.min >= tier.max {
                return Err(invalid(format!(
                    "min {} must be below max {}",
                    tier.min, tier.max
                )));
            }
            if !(tier.max - tier.min).is_finite() {
                return Err(invalid(format!(
                    "width of [{}, {}) overflows",
                    tier.min, tier.max
                )));
            }
            if !(0.0..=1.0).contains(&tier.base_value) {
                return Err(invalid(format!(
                    "baseValue {} outside [0, 1]",
                    tier.base_value
                )));
            }
            if !tier.slope.is_finite() || !(0.0..=1.0).contains(&tier.top_value()) {
                return Err(invalid(format!(
                    "baseValue + slope {} outside [0, 1]",
                    tier.top_value()
                )));
            }
        }

        for (index, pair) in tiers.windows(2).enumerate() {
            let (end, next_start) = (pair[0].max, pair[1].min);
            if next_start > end {
                return Err(ConfigError::TierGap {
                    index,
                    end,
                    next_start,
                });
            }
            if next_start < end {
                return Err(ConfigError::TierOverlap {
                    index,
                    end,
                    next_start,
                });
            }
        }

        Ok(Self(tiers))
    }

    pub fn as_slice(&self) -> &[Tier] {
        &self.0
    }

    pub fn last(&self) -> &Tier {
        &self.0[self.0.len() - 1]
    }
}

impl TryFrom<Vec<Tier>> for Tiers {
    type Error = ConfigError;

    fn try_from(value: Vec<Tier>) -> Result<Self, Self::Error> {
        Tiers::new(value)
    }
}

impl From<Tiers> for Vec<Tier> {
    fn from(value: Tiers) -> Self {
        value.0
    }
}
