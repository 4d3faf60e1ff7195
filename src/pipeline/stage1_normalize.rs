use crate::model::clip01;
use crate::model::normalize_spec::{NormalizeSpec, Steps, Tiers};

/// Maps one raw value to `[0, 1]`.
///
/// An absent (or NaN) value resolves to `default` first; `default` is in the
/// metric's raw units. Out-of-range input is clamped, never rejected.
pub fn normalize(raw: Option<f64>, spec: &NormalizeSpec, default: f64) -> f64 {
    let value = resolve(raw, default);
    clip01(transform(value, spec))
}

pub fn resolve(raw: Option<f64>, default: f64) -> f64 {
    match raw {
        Some(v) if !v.is_nan() => v,
        _ => default,
    }
}

fn transform(value: f64, spec: &NormalizeSpec) -> f64 {
    match spec {
        NormalizeSpec::Linear { max } => value / max,
        NormalizeSpec::Sqrt { max } => value.max(0.0).sqrt() / max.sqrt(),
        NormalizeSpec::Log { max } => {
            if value <= 0.0 {
                0.0
            } else {
                value.ln_1p() / max.ln_1p()
            }
        }
        NormalizeSpec::Stepped { steps } => stepped(value, steps),
        NormalizeSpec::TieredContinuous { tiers } => tiered(value, tiers),
        NormalizeSpec::FiveScale => (value - 1.0) / 4.0,
    }
}

fn stepped(value: f64, steps: &Steps) -> f64 {
    steps
        .descending()
        .iter()
        .find(|step| value >= step.threshold)
        .map(|step| step.value)
        .unwrap_or(0.0)
}

// Boundaries are deliberate jumps: `value == tier.max` belongs to the next
// tier and returns its base value.
fn tiered(value: f64, tiers: &Tiers) -> f64 {
    if let Some(tier) = tiers.as_slice().iter().find(|t| t.contains(value)) {
        let progress = (value - tier.min) / (tier.max - tier.min);
        return tier.base_value + tier.slope * progress;
    }
    let last = tiers.last();
    if value >= last.max {
        return last.top_value();
    }
    0.0
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_normalize.rs"]
mod tests;
