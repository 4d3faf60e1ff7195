pub mod normalize_spec;
pub mod patent;
pub mod profile;
pub mod score;

pub use normalize_spec::{NormalizeSpec, Step, Steps, Tier, Tiers};
pub use patent::PatentRecord;
pub use profile::{CombinationMode, EligibilityRule, FactorSpec, MetricSpec, ScoringProfile};
pub use score::{FactorScore, MetricContribution, ScoreResult};

pub fn clip01(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}
