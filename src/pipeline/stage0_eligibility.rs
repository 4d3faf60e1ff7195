use tracing::debug;

use crate::model::patent::{PatentRecord, YEARS_REMAINING};
use crate::model::profile::EligibilityRule;

/// Candidate-list filter applied before ranking. Input order is preserved,
/// so the ranker's tie-break still follows the caller's order.
pub fn filter_eligible<'a>(
    patents: &'a [PatentRecord],
    rule: &EligibilityRule,
) -> Vec<&'a PatentRecord> {
    let kept: Vec<&PatentRecord> = patents.iter().filter(|p| is_eligible(p, rule)).collect();
    debug!(
        candidates = patents.len(),
        kept = kept.len(),
        min_years_remaining = rule.min_years_remaining(),
        "eligibility filter applied"
    );
    kept
}

/// A patent with no `years_remaining` is eligible only when the rule asks
/// for no remaining term at all.
pub fn is_eligible(patent: &PatentRecord, rule: &EligibilityRule) -> bool {
    match patent.metric(YEARS_REMAINING) {
        Some(years) => years >= rule.min_years_remaining(),
        None => rule.min_years_remaining() <= 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage0_eligibility.rs"]
mod tests;
