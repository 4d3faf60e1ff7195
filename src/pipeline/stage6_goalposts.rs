use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::model::patent::{COMPETITOR_CITATIONS, PatentRecord, YEARS_REMAINING};
use crate::pipeline::stage4_rank::Ranking;

/// Inclusive `[min, max]` target band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBand")]
pub struct Band {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct RawBand {
    min: f64,
    max: f64,
}

impl TryFrom<RawBand> for Band {
    type Error = ConfigError;

    fn try_from(raw: RawBand) -> Result<Self, Self::Error> {
        Band::new("band", raw.min, raw.max)
    }
}

impl Band {
    pub fn new(name: &str, min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidBand {
                name: name.to_string(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Inclusive on both edges, with a tolerance of a few ulps at the edge
    /// so a mean computed from values sitting exactly on it still passes.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min - edge_tolerance(self.min)
            && value <= self.max + edge_tolerance(self.max)
    }
}

/// Target bands for the statistics of a top-K slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goalposts {
    pub citation_coverage: Band,
    pub mean_years_remaining: Band,
    #[serde(default = "default_citation_metric")]
    pub citation_metric: String,
    #[serde(default = "default_years_metric")]
    pub years_metric: String,
}

fn default_citation_metric() -> String {
    COMPETITOR_CITATIONS.to_string()
}

fn default_years_metric() -> String {
    YEARS_REMAINING.to_string()
}

impl Default for Goalposts {
    fn default() -> Self {
        Self {
            citation_coverage: Band {
                min: 0.70,
                max: 0.95,
            },
            mean_years_remaining: Band {
                min: 5.0,
                max: 12.0,
            },
            citation_metric: default_citation_metric(),
            years_metric: default_years_metric(),
        }
    }
}

impl Goalposts {
    pub fn new(citation_coverage: Band, mean_years_remaining: Band) -> Self {
        Self {
            citation_coverage,
            mean_years_remaining,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalpostCheck {
    SliceSize,
    CitationCoverage,
    MeanYearsRemaining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub check: GoalpostCheck,
    pub observed: f64,
    pub min: f64,
    pub max: f64,
}

impl Violation {
    pub fn is_below(&self) -> bool {
        self.observed < self.min
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.is_below() { "below" } else { "above" };
        match self.check {
            GoalpostCheck::SliceSize => write!(f, "top-K slice is empty"),
            GoalpostCheck::CitationCoverage => write!(
                f,
                "citation coverage {:.4} is {side} [{:.4}, {:.4}]",
                self.observed, self.min, self.max
            ),
            GoalpostCheck::MeanYearsRemaining => write!(
                f,
                "mean years remaining {:.4} is {side} [{:.4}, {:.4}]",
                self.observed, self.min, self.max
            ),
        }
    }
}

/// Outcome of a goalpost run. Violations are reported, never raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub k: usize,
    pub citation_coverage: f64,
    pub mean_years_remaining: f64,
    pub violations: Vec<Violation>,
}

/// Checks the slice against every band; all checks run even after one fails.
///
/// A patent missing the years metric counts as 0 years; negative terms are
/// treated as 0.
pub fn validate<P: Borrow<PatentRecord>>(top_k: &[P], goalposts: &Goalposts) -> ValidationReport {
    let k = top_k.len();
    if k == 0 {
        let report = ValidationReport {
            passed: false,
            k,
            citation_coverage: 0.0,
            mean_years_remaining: 0.0,
            violations: vec![Violation {
                check: GoalpostCheck::SliceSize,
                observed: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            }],
        };
        warn!("goalpost validation on an empty top-K slice");
        return report;
    }

    let records: Vec<&PatentRecord> =
        top_k.iter().map(Borrow::<PatentRecord>::borrow).collect();

    let cited = records
        .iter()
        .filter(|p| p.metric(&goalposts.citation_metric).is_some_and(|c| c > 0.0))
        .count();
    let citation_coverage = cited as f64 / k as f64;

    let years_total = compensated_sum(
        records
            .iter()
            .map(|p| p.metric(&goalposts.years_metric).unwrap_or(0.0).max(0.0)),
    );
    let mean_years_remaining = years_total / k as f64;

    let mut violations = Vec::new();
    check_band(
        &mut violations,
        GoalpostCheck::CitationCoverage,
        citation_coverage,
        &goalposts.citation_coverage,
    );
    check_band(
        &mut violations,
        GoalpostCheck::MeanYearsRemaining,
        mean_years_remaining,
        &goalposts.mean_years_remaining,
    );

    for v in &violations {
        warn!(k, "goalpost violated: {v}");
    }
    let passed = violations.is_empty();
    if passed {
        info!(k, citation_coverage, mean_years_remaining, "goalposts satisfied");
    }

    ValidationReport {
        passed,
        k,
        citation_coverage,
        mean_years_remaining,
        violations,
    }
}

/// Validates the first `k` entries of `ranking`; `patents` must be the slice
/// the ranking was built from.
pub fn validate_ranking<P: Borrow<PatentRecord>>(
    ranking: &Ranking,
    patents: &[P],
    k: usize,
    goalposts: &Goalposts,
) -> ValidationReport {
    let top = ranking.top_records(patents, k);
    validate(&top, goalposts)
}

const EDGE_RELATIVE_TOLERANCE: f64 = 1e-12;

fn edge_tolerance(edge: f64) -> f64 {
    EDGE_RELATIVE_TOLERANCE * edge.abs().max(1.0)
}

/// Neumaier summation.
fn compensated_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0f64;
    let mut carry = 0.0f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            carry += (sum - t) + v;
        } else {
            carry += (v - t) + sum;
        }
        sum = t;
    }
    sum + carry
}

fn check_band(out: &mut Vec<Violation>, check: GoalpostCheck, observed: f64, band: &Band) {
    if !band.contains(observed) {
        out.push(Violation {
            check,
            observed,
            min: band.min,
            max: band.max,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_goalposts.rs"]
mod tests;
