use std::borrow::Borrow;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::patent::PatentRecord;
use crate::model::profile::ScoringProfile;
use crate::model::score::ScoreResult;
use crate::pipeline::stage3_profile::evaluate_profile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPatent {
    pub patent_id: String,
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Position of the patent in the slice handed to the ranker.
    pub input_index: usize,
    pub result: ScoreResult,
}

impl RankedPatent {
    pub fn score(&self) -> f64 {
        self.result.overall_score
    }
}

/// Patents of one profile in descending score order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub profile_id: String,
    pub entries: Vec<RankedPatent>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self, k: usize) -> &[RankedPatent] {
        &self.entries[..k.min(self.entries.len())]
    }

    pub fn get(&self, patent_id: &str) -> Option<&RankedPatent> {
        self.entries.iter().find(|e| e.patent_id == patent_id)
    }

    pub fn rank_of(&self, patent_id: &str) -> Option<usize> {
        self.get(patent_id).map(|e| e.rank)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.patent_id.as_str()).collect()
    }

    /// Records behind the first `k` entries. `patents` must be the slice
    /// this ranking was built from.
    pub fn top_records<'a, P: Borrow<PatentRecord>>(
        &self,
        patents: &'a [P],
        k: usize,
    ) -> Vec<&'a PatentRecord> {
        self.top(k)
            .iter()
            .filter_map(|e| patents.get(e.input_index))
            .map(Borrow::<PatentRecord>::borrow)
            .collect()
    }
}

/// Ranks `patents` under `profile`: descending score, ties kept in input
/// order. Eligibility filtering is the caller's job.
pub fn rank<P: Borrow<PatentRecord>>(patents: &[P], profile: &ScoringProfile) -> Ranking {
    let scored = patents
        .iter()
        .enumerate()
        .map(|(index, p)| score_one(index, Borrow::<PatentRecord>::borrow(p), profile))
        .collect();
    finish(profile, scored)
}

/// Same result as [`rank`], with patents scored on the rayon pool.
pub fn rank_parallel<P>(patents: &[P], profile: &ScoringProfile) -> Ranking
where
    P: Borrow<PatentRecord> + Sync,
{
    let scored = patents
        .par_iter()
        .enumerate()
        .map(|(index, p)| score_one(index, Borrow::<PatentRecord>::borrow(p), profile))
        .collect();
    finish(profile, scored)
}

fn score_one(index: usize, patent: &PatentRecord, profile: &ScoringProfile) -> RankedPatent {
    RankedPatent {
        patent_id: patent.id().to_string(),
        rank: 0,
        input_index: index,
        result: evaluate_profile(patent, profile),
    }
}

fn finish(profile: &ScoringProfile, mut entries: Vec<RankedPatent>) -> Ranking {
    order_entries(&mut entries);
    let defaulted: usize = entries.iter().map(|e| e.result.defaulted_metrics()).sum();
    debug!(
        profile = profile.id(),
        candidates = entries.len(),
        defaulted_metrics = defaulted,
        "ranking complete"
    );
    Ranking {
        profile_id: profile.id().to_string(),
        entries,
    }
}

/// Sorts by score descending, then input index ascending, and assigns
/// 1-based ranks.
pub(crate) fn order_entries(entries: &mut [RankedPatent]) {
    entries.sort_by(|a, b| {
        b.score()
            .total_cmp(&a.score())
            .then(a.input_index.cmp(&b.input_index))
    });
    for (pos, entry) in entries.iter_mut().enumerate() {
        entry.rank = pos + 1;
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_rank.rs"]
mod tests;
