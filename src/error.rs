/// Authoring mistakes in a profile, catalog or run configuration.
///
/// Raised only while constructing or loading configuration; scoring itself
/// never fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("profile '{profile}' has no factors")]
    EmptyProfile { profile: String },
    #[error("factor '{factor}' has no metrics")]
    EmptyFactor { factor: String },
    #[error("factor '{factor}' has zero total metric weight")]
    ZeroFactorWeight { factor: String },
    #[error("factor '{factor}' has total metric weight {total} that is not finite")]
    NonFiniteFactorWeight { factor: String, total: f64 },
    #[error("metric '{metric}' has invalid weight {weight}")]
    InvalidWeight { metric: String, weight: f64 },
    #[error("factor '{factor}' has {which} {value} outside [0, 1]")]
    InvalidBound {
        factor: String,
        which: &'static str,
        value: f64,
    },
    #[error("factor '{factor}' has floor {floor} above ceiling {ceiling}")]
    FloorAboveCeiling {
        factor: String,
        floor: f64,
        ceiling: f64,
    },
    #[error("normalization max must be finite and positive, got {0}")]
    InvalidMax(f64),
    #[error("stepped normalization needs at least one step")]
    EmptySteps,
    #[error("step value {value} at threshold {threshold} is not in [0, 1]")]
    InvalidStepValue { threshold: f64, value: f64 },
    #[error("step threshold {0} is not finite")]
    InvalidThreshold(f64),
    #[error("duplicate step threshold {0}")]
    DuplicateThreshold(f64),
    #[error("step at threshold {threshold} yields {value}, below a lower threshold's {lower_value}")]
    NonMonotonicSteps {
        threshold: f64,
        value: f64,
        lower_value: f64,
    },
    #[error("tiered normalization needs at least one tier")]
    EmptyTiers,
    #[error("tier {index} is invalid: {reason}")]
    InvalidTier { index: usize, reason: String },
    #[error("gap between tier {index} (ends {end}) and the next tier (starts {next_start})")]
    TierGap {
        index: usize,
        end: f64,
        next_start: f64,
    },
    #[error("tier {index} (ends {end}) overlaps the next tier (starts {next_start})")]
    TierOverlap {
        index: usize,
        end: f64,
        next_start: f64,
    },
    #[error("metric '{metric}' has non-finite default {value}")]
    InvalidDefault { metric: String, value: f64 },
    #[error("metric '{metric}' has invalid cap {value}")]
    InvalidCap { metric: String, value: f64 },
    #[error("profile '{profile}' declares factor '{factor}' twice")]
    DuplicateFactor { profile: String, factor: String },
    #[error("duplicate profile id '{0}'")]
    DuplicateProfile(String),
    #[error("profile catalog is empty")]
    EmptyCatalog,
    #[error("unknown profile '{0}'")]
    UnknownProfile(String),
    #[error("band '{name}' is invalid: [{min}, {max}]")]
    InvalidBand { name: String, min: f64, max: f64 },
    #[error("invalid eligibility rule: {0}")]
    InvalidEligibility(String),
    #[error("in {context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ConfigError>,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn within(self, context: impl Into<String>) -> Self {
        ConfigError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
