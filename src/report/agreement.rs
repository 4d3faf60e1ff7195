use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::pipeline::stage4_rank::Ranking;

/// How closely two rankings of overlapping patent sets agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingAgreement {
    /// Patents present in both rankings.
    pub common: usize,
    pub spearman: f64,
    pub kendall: f64,
    /// `(cutoff, shared ids among both top-cutoff slices)`.
    pub overlaps: Vec<(usize, usize)>,
}

impl RankingAgreement {
    pub fn overlap_fraction(&self, cutoff: usize) -> Option<f64> {
        self.overlaps
            .iter()
            .find(|(c, _)| *c == cutoff)
            .map(|&(c, shared)| if c == 0 { 0.0 } else { shared as f64 / c as f64 })
    }
}

/// Rank correlations over the common patents, plus top-N overlap at each
/// cutoff.
///
/// Kendall τ-b is quadratic in the number of common patents. For large
/// portfolios use [`compare_rankings_top`] with the slice that matters.
pub fn compare_rankings(a: &Ranking, b: &Ranking, cutoffs: &[usize]) -> RankingAgreement {
    compare_rankings_top(a, b, a.entries.len(), cutoffs)
}

/// Like [`compare_rankings`], but only patents in the first `depth` entries
/// of `a` are correlated. Overlaps still use the full cutoffs.
pub fn compare_rankings_top(
    a: &Ranking,
    b: &Ranking,
    depth: usize,
    cutoffs: &[usize],
) -> RankingAgreement {
    let rank_b: BTreeMap<&str, usize> = b
        .entries
        .iter()
        .map(|e| (e.patent_id.as_str(), e.rank))
        .collect();

    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .top(depth)
        .iter()
        .filter_map(|e| {
            rank_b
                .get(e.patent_id.as_str())
                .map(|&rb| (e.rank as f64, rb as f64))
        })
        .unzip();

    RankingAgreement {
        common: xs.len(),
        spearman: spearman_rho(&xs, &ys),
        kendall: kendall_tau_b(&xs, &ys),
        overlaps: cutoffs
            .iter()
            .map(|&c| (c, overlap_at_cutoff(a, b, c)))
            .collect(),
    }
}

/// Number of ids found in both top-`cutoff` slices.
pub fn overlap_at_cutoff(a: &Ranking, b: &Ranking, cutoff: usize) -> usize {
    let top_a: BTreeSet<&str> = a.top(cutoff).iter().map(|e| e.patent_id.as_str()).collect();
    b.top(cutoff)
        .iter()
        .filter(|e| top_a.contains(e.patent_id.as_str()))
        .count()
}

/// Tie-corrected Kendall rank correlation; 0 for fewer than two pairs.
/// Compares every pair, so cost grows with the square of `x.len()`.
pub fn kendall_tau_b(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return 0.0;
    }

    let mut concordant = 0f64;
    let mut discordant = 0f64;
    let mut ties_x = 0f64;
    let mut ties_y = 0f64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            match (dx == 0.0, dy == 0.0) {
                (true, true) => {}
                (true, false) => ties_x += 1.0,
                (false, true) => ties_y += 1.0,
                _ if (dx > 0.0) == (dy > 0.0) => concordant += 1.0,
                _ => discordant += 1.0,
            }
        }
    }

    let denom = ((concordant + discordant + ties_x) * (concordant + discordant + ties_y)).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        (concordant - discordant) / denom
    }
}

/// Pearson correlation of tie-averaged ranks.
pub fn spearman_rho(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return 0.0;
    }
    let rx = ranks_with_ties(x);
    let ry = ranks_with_ties(y);

    let mean_x = rx.iter().sum::<f64>() / n as f64;
    let mean_y = ry.iter().sum::<f64>() / n as f64;

    let (mut num, mut den_x, mut den_y) = (0.0, 0.0, 0.0);
    for (a, b) in rx.iter().zip(&ry) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }

    if den_x == 0.0 || den_y == 0.0 {
        0.0
    } else {
        num / (den_x.sqrt() * den_y.sqrt())
    }
}

/// Zero-based ascending ranks; tied values share their average rank.
pub fn ranks_with_ties(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let value = values[order[i]];
        let mut j = i + 1;
        while j < n && values[order[j]] == value {
            j += 1;
        }
        let avg = (i + j - 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg;
        }
        i = j;
    }
    ranks
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/agreement.rs"]
mod tests;
