use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const COMPETITOR_CITATIONS: &str = "competitor_citations";
pub const COMPETITOR_COUNT: &str = "competitor_count";
pub const FORWARD_CITATIONS: &str = "forward_citations";
pub const YEARS_REMAINING: &str = "years_remaining";
pub const ELIGIBILITY_SCORE: &str = "eligibility_score";
pub const VALIDITY_SCORE: &str = "validity_score";
pub const CLAIM_BREADTH: &str = "claim_breadth";
pub const ENFORCEMENT_CLARITY: &str = "enforcement_clarity";
pub const DESIGN_AROUND_DIFFICULTY: &str = "design_around_difficulty";
pub const MARKET_RELEVANCE_SCORE: &str = "market_relevance_score";
pub const IPR_RISK_SCORE: &str = "ipr_risk_score";
pub const PROSECUTION_QUALITY_SCORE: &str = "prosecution_quality_score";

/// One patent as supplied by upstream collaborators.
///
/// Metric values are optional: a missing key and an explicit `null` both mean
/// "absent" and resolve to the metric's default during normalization. The
/// record is never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatentRecord {
    id: String,
    #[serde(default)]
    metrics: BTreeMap<String, Option<f64>>,
}

impl PatentRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), Some(value));
        self
    }

    pub fn with_absent(mut self, name: impl Into<String>) -> Self {
        self.metrics.insert(name.into(), None);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw value of `name`, or `None` when absent or not a number.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics
            .get(name)
            .copied()
            .flatten()
            .filter(|v| !v.is_nan())
    }

    pub fn has_metric(&self, name: &str) -> bool {
        self.metric(name).is_some()
    }
}
