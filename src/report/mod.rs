pub mod agreement;

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::model::patent::PatentRecord;
use crate::pipeline::stage4_rank::Ranking;

pub use agreement::{RankingAgreement, compare_rankings, compare_rankings_top, overlap_at_cutoff};

/// Spread of the scores in a top-N slice. `p10` is the top-decile cut and
/// `p50` the median.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub n: usize,
    pub max: f64,
    pub p10: f64,
    pub p50: f64,
    pub min: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCoverage {
    pub metric: String,
    pub present: usize,
    pub total: usize,
    pub fraction: f64,
}

/// `None` for an empty ranking or `n == 0`.
pub fn score_distribution(ranking: &Ranking, n: usize) -> Option<ScoreDistribution> {
    let scores: Vec<f64> = ranking.top(n).iter().map(|e| e.score()).collect();
    if scores.is_empty() {
        return None;
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    Some(ScoreDistribution {
        n: scores.len(),
        max,
        p10: quantile_indexed(&scores, 0.90),
        p50: median(&scores),
        min,
        mean: scores.iter().sum::<f64>() / scores.len() as f64,
    })
}

/// How many records carry a usable value for each metric.
pub fn metric_coverage<P: Borrow<PatentRecord>>(
    patents: &[P],
    metrics: &[&str],
) -> Vec<MetricCoverage> {
    metrics
        .iter()
        .map(|&metric| {
            let present: Vec<bool> = patents
                .iter()
                .map(|p| Borrow::<PatentRecord>::borrow(p).has_metric(metric))
                .collect();
            MetricCoverage {
                metric: metric.to_string(),
                present: present.iter().filter(|&&v| v).count(),
                total: present.len(),
                fraction: bool_fraction(&present),
            }
        })
        .collect()
}

/// Value at index `ceil((n - 1) * p)` of the ascending sort.
pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx.min(n - 1)]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn bool_fraction(values: &[bool]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|&&v| v).count() as f64 / values.len() as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
