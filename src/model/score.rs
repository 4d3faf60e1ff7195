use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How one metric fed its factor for one patent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricContribution {
    pub metric: String,
    /// Raw value as supplied, before capping; `None` when absent.
    pub raw: Option<f64>,
    pub defaulted: bool,
    pub normalized: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub name: String,
    /// Weighted mean before floor/ceiling clamping.
    pub weighted_mean: f64,
    pub score: f64,
    pub metrics: Vec<MetricContribution>,
}

impl FactorScore {
    pub fn floored(&self) -> bool {
        self.score > self.weighted_mean
    }
}

/// Score of one patent under one profile, with the full factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: f64,
    pub factors: Vec<FactorScore>,
}

impl ScoreResult {
    pub fn factor(&self, name: &str) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.name == name)
    }

    pub fn factor_score(&self, name: &str) -> Option<f64> {
        self.factor(name).map(|f| f.score)
    }

    pub fn factor_scores(&self) -> BTreeMap<&str, f64> {
        self.factors
            .iter()
            .map(|f| (f.name.as_str(), f.score))
            .collect()
    }

    pub fn defaulted_metrics(&self) -> usize {
        self.factors
            .iter()
            .flat_map(|f| f.metrics.iter())
            .filter(|m| m.defaulted)
            .count()
    }
}
