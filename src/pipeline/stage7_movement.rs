use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::score::ScoreResult;
use crate::pipeline::stage4_rank::{RankedPatent, Ranking};

/// Why a patent moved between two rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Explanation {
    /// The shared factor whose score changed the most.
    FactorShift {
        factor: String,
        before: f64,
        after: f64,
    },
    /// No shared factor changed; the patent fell and this is its lowest
    /// factor in B.
    WeakestFactor { factor: String, score: f64 },
    /// No shared factor changed; the patent rose and this is its highest
    /// factor in B.
    StrongestFactor { factor: String, score: f64 },
    /// Neither ranking carries a factor breakdown for the patent.
    NoBreakdown,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::FactorShift {
                factor,
                before,
                after,
            } => write!(f, "{factor} moved {before:.3} -> {after:.3}"),
            Explanation::WeakestFactor { factor, score } => {
                write!(f, "weakest factor {factor} at {score:.3}")
            }
            Explanation::StrongestFactor { factor, score } => {
                write!(f, "strongest factor {factor} at {score:.3}")
            }
            Explanation::NoBreakdown => write!(f, "no factor breakdown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub patent_id: String,
    pub rank_a: usize,
    pub rank_b: usize,
    /// `rank_a - rank_b`: positive when the patent climbed in B.
    pub delta: i64,
    pub score_a: f64,
    pub score_b: f64,
    pub explanation: Explanation,
}

impl Movement {
    pub fn moved_up(&self) -> bool {
        self.delta > 0
    }
}

/// Patents whose rank changed by more than `threshold` places from `a` to
/// `b`, largest moves first. Patents present in only one ranking are skipped.
pub fn compare(a: &Ranking, b: &Ranking, threshold: usize) -> Vec<Movement> {
    let in_b: BTreeMap<&str, &RankedPatent> =
        b.entries.iter().map(|e| (e.patent_id.as_str(), e)).collect();

    let mut moves: Vec<Movement> = a
        .entries
        .iter()
        .filter_map(|ea| {
            let eb = in_b.get(ea.patent_id.as_str())?;
            let delta = ea.rank as i64 - eb.rank as i64;
            if delta.unsigned_abs() as usize <= threshold {
                return None;
            }
            Some(Movement {
                patent_id: ea.patent_id.clone(),
                rank_a: ea.rank,
                rank_b: eb.rank,
                delta,
                score_a: ea.score(),
                score_b: eb.score(),
                explanation: explain(&ea.result, &eb.result, delta > 0),
            })
        })
        .collect();

    moves.sort_by(|x, y| {
        y.delta
            .unsigned_abs()
            .cmp(&x.delta.unsigned_abs())
            .then(x.rank_b.cmp(&y.rank_b))
    });

    debug!(
        from = a.profile_id.as_str(),
        to = b.profile_id.as_str(),
        threshold,
        flagged = moves.len(),
        "movement analysis complete"
    );
    moves
}

const MIN_FACTOR_SHIFT: f64 = 1e-9;

fn explain(a: &ScoreResult, b: &ScoreResult, moved_up: bool) -> Explanation {
    let before = a.factor_scores();

    // Largest absolute shift; first factor in B's order wins ties.
    let mut shift: Option<(&str, f64, f64)> = None;
    for factor in &b.factors {
        let Some(&old) = before.get(factor.name.as_str()) else {
            continue;
        };
        let larger = shift.is_none_or(|(_, o, n)| (factor.score - old).abs() > (n - o).abs());
        if larger {
            shift = Some((factor.name.as_str(), old, factor.score));
        }
    }
    // Unchanged factors explain nothing: the move came from other patents
    // entering, leaving or changing score.
    let shift = shift.filter(|(_, o, n)| (n - o).abs() > MIN_FACTOR_SHIFT);
    if let Some((factor, before, after)) = shift {
        return Explanation::FactorShift {
            factor: factor.to_string(),
            before,
            after,
        };
    }

    let pick = if moved_up {
        b.factors.iter().reduce(|best, f| if f.score > best.score { f } else { best })
    } else {
        b.factors.iter().reduce(|worst, f| if f.score < worst.score { f } else { worst })
    };
    match pick {
        Some(f) if moved_up => Explanation::StrongestFactor {
            factor: f.name.clone(),
            score: f.score,
        },
        Some(f) => Explanation::WeakestFactor {
            factor: f.name.clone(),
            score: f.score,
        },
        None => Explanation::NoBreakdown,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_movement.rs"]
mod tests;
