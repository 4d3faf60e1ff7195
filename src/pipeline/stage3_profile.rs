use crate::model::patent::PatentRecord;
use crate::model::profile::{CombinationMode, ScoringProfile};
use crate::model::score::{FactorScore, ScoreResult};
use crate::pipeline::stage2_factor::evaluate_factor;

/// Scores one patent under one profile. Factors are evaluated
/// independently; the breakdown is returned alongside the overall score.
pub fn evaluate_profile(patent: &PatentRecord, profile: &ScoringProfile) -> ScoreResult {
    let factors: Vec<FactorScore> = profile
        .factors()
        .iter()
        .map(|factor| evaluate_factor(patent, factor))
        .collect();

    ScoreResult {
        overall_score: combine(&factors, profile.combination()),
        factors,
    }
}

/// Returns a score in `[0, 100]`.
pub fn combine(factors: &[FactorScore], mode: CombinationMode) -> f64 {
    if factors.is_empty() {
        return 0.0;
    }
    let combined = match mode {
        CombinationMode::Multiplicative => factors.iter().map(|f| f.score).product::<f64>(),
        CombinationMode::Additive => {
            factors.iter().map(|f| f.score).sum::<f64>() / factors.len() as f64
        }
    };
    100.0 * combined
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_profile.rs"]
mod tests;
