use crate::model::patent::PatentRecord;
use crate::model::profile::{FactorSpec, MetricSpec};
use crate::model::score::{FactorScore, MetricContribution};
use crate::pipeline::stage1_normalize::normalize;

/// Weighted mean of the factor's normalized metrics, clamped to
/// `[floor, ceiling]`. The per-metric breakdown is kept on the result.
pub fn evaluate_factor(patent: &PatentRecord, factor: &FactorSpec) -> FactorScore {
    let metrics: Vec<MetricContribution> = factor
        .metrics()
        .iter()
        .map(|spec| evaluate_metric(patent, spec))
        .collect();

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for m in &metrics {
        weighted_sum += m.weight * m.normalized;
        total_weight += m.weight;
    }
    let weighted_mean = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };

    FactorScore {
        name: factor.name().to_string(),
        weighted_mean,
        score: clamp_factor(weighted_mean, factor),
        metrics,
    }
}

pub fn evaluate_metric(patent: &PatentRecord, spec: &MetricSpec) -> MetricContribution {
    let raw = patent.metric(spec.metric());
    let capped = match (raw, spec.cap()) {
        (Some(v), Some(cap)) => Some(v.min(cap)),
        (v, _) => v,
    };
    MetricContribution {
        metric: spec.metric().to_string(),
        raw,
        defaulted: raw.is_none(),
        normalized: normalize(capped, spec.normalize(), spec.default_value()),
        weight: spec.weight(),
    }
}

fn clamp_factor(value: f64, factor: &FactorSpec) -> f64 {
    value.max(factor.floor()).min(factor.upper_bound())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_factor.rs"]
mod tests;
