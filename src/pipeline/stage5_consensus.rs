use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::model::patent::PatentRecord;
use crate::model::profile::ScoringProfile;
use crate::model::score::{FactorScore, ScoreResult};
use crate::pipeline::stage0_eligibility::is_eligible;
use crate::pipeline::stage3_profile::evaluate_profile;
use crate::pipeline::stage4_rank::{RankedPatent, Ranking, order_entries};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileScore {
    pub profile_id: String,
    /// 0 when the profile's eligibility rule excludes the patent.
    pub score: f64,
    pub eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusEntry {
    pub patent_id: String,
    pub rank: usize,
    pub input_index: usize,
    pub consensus_score: f64,
    pub profile_scores: Vec<ProfileScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRanking {
    pub profile_ids: Vec<String>,
    pub entries: Vec<ConsensusEntry>,
}

impl ConsensusRanking {
    pub fn scores(&self) -> BTreeMap<&str, f64> {
        self.entries
            .iter()
            .map(|e| (e.patent_id.as_str(), e.consensus_score))
            .collect()
    }

    pub fn get(&self, patent_id: &str) -> Option<&ConsensusEntry> {
        self.entries.iter().find(|e| e.patent_id == patent_id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.patent_id.as_str()).collect()
    }

    /// Views the consensus as a [`Ranking`] whose "factors" are the
    /// per-profile scores scaled to `[0, 1]`, so two consensus runs can be
    /// compared with the movement analyzer.
    pub fn to_ranking(&self) -> Ranking {
        let entries = self
            .entries
            .iter()
            .map(|e| RankedPatent {
                patent_id: e.patent_id.clone(),
                rank: e.rank,
                input_index: e.input_index,
                result: ScoreResult {
                    overall_score: e.consensus_score,
                    factors: e
                        .profile_scores
                        .iter()
                        .map(|p| FactorScore {
                            name: p.profile_id.clone(),
                            weighted_mean: p.score / 100.0,
                            score: p.score / 100.0,
                            metrics: Vec::new(),
                        })
                        .collect(),
                },
            })
            .collect();
        Ranking {
            profile_id: "consensus".to_string(),
            entries,
        }
    }
}

/// Mean score of every patent across every profile, ranked with the same
/// tie-break as [`crate::pipeline::stage4_rank::rank`].
///
/// Every profile scores every patent; a patent excluded by a profile's
/// eligibility rule contributes 0 to that profile's term.
pub fn consensus<P: Borrow<PatentRecord>>(
    patents: &[P],
    profiles: &[ScoringProfile],
) -> Result<ConsensusRanking, ConfigError> {
    if profiles.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }

    let mut ranked = Vec::with_capacity(patents.len());
    let mut by_index = Vec::with_capacity(patents.len());

    for (index, patent) in patents.iter().enumerate() {
        let patent: &PatentRecord = Borrow::<PatentRecord>::borrow(patent);
        let profile_scores: Vec<ProfileScore> = profiles
            .iter()
            .map(|profile| score_for_profile(patent, profile))
            .collect();
        let consensus_score = mean_score(&profile_scores);

        ranked.push(RankedPatent {
            patent_id: patent.id().to_string(),
            rank: 0,
            input_index: index,
            result: ScoreResult {
                overall_score: consensus_score,
                factors: Vec::new(),
            },
        });
        by_index.push(profile_scores);
    }

    order_entries(&mut ranked);

    let entries: Vec<ConsensusEntry> = ranked
        .into_iter()
        .map(|r| ConsensusEntry {
            profile_scores: std::mem::take(&mut by_index[r.input_index]),
            patent_id: r.patent_id,
            rank: r.rank,
            input_index: r.input_index,
            consensus_score: r.result.overall_score,
        })
        .collect();

    info!(
        profiles = profiles.len(),
        patents = entries.len(),
        "consensus ranking complete"
    );

    Ok(ConsensusRanking {
        profile_ids: profiles.iter().map(|p| p.id().to_string()).collect(),
        entries,
    })
}

fn score_for_profile(patent: &PatentRecord, profile: &ScoringProfile) -> ProfileScore {
    let eligible = profile
        .eligibility()
        .map(|rule| is_eligible(patent, rule))
        .unwrap_or(true);
    let score = if eligible {
        evaluate_profile(patent, profile).overall_score
    } else {
        0.0
    };
    ProfileScore {
        profile_id: profile.id().to_string(),
        score,
        eligible,
    }
}

// Summed in ascending order so the mean does not depend on profile order.
fn mean_score(scores: &[ProfileScore]) -> f64 {
    let mut values: Vec<f64> = scores.iter().map(|s| s.score).collect();
    values.sort_by(f64::total_cmp);
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_consensus.rs"]
mod tests;
