use super::*;
use crate::model::normalize_spec::NormalizeSpec;
use crate::model::profile::{FactorSpec, MetricSpec};

fn single_metric_factor(name: &str, metric: &str, floor: f64) -> FactorSpec {
    FactorSpec::new(
        name,
        vec![MetricSpec::new(metric, 1.0, NormalizeSpec::Linear { max: 10.0 }, 0.0).unwrap()],
        floor,
        None,
    )
    .unwrap()
}

fn two_factor_profile(mode: CombinationMode, floor: f64) -> ScoringProfile {
    ScoringProfile::new(
        "test",
        "Test",
        vec![
            single_metric_factor("Market", "a", floor),
            single_metric_factor("Legal", "b", floor),
        ],
        mode,
    )
    .unwrap()
}

#[test]
fn test_multiplicative_is_product() {
    let patent = PatentRecord::new("P").with_metric("a", 5.0).with_metric("b", 8.0);
    let out = evaluate_profile(&patent, &two_factor_profile(CombinationMode::Multiplicative, 0.0));
    assert!((out.overall_score - 100.0 * 0.5 * 0.8).abs() < 1e-9);
    assert_eq!(out.factor_score("Market"), Some(0.5));
    assert_eq!(out.factor_score("Legal"), Some(0.8));
}

#[test]
fn test_additive_is_mean() {
    let patent = PatentRecord::new("P").with_metric("a", 5.0).with_metric("b", 8.0);
    let out = evaluate_profile(&patent, &two_factor_profile(CombinationMode::Additive, 0.0));
    assert!((out.overall_score - 65.0).abs() < 1e-9);
}

#[test]
fn test_zero_factor_zeroes_multiplicative() {
    let patent = PatentRecord::new("P").with_metric("a", 10.0).with_metric("b", 0.0);
    let out = evaluate_profile(&patent, &two_factor_profile(CombinationMode::Multiplicative, 0.0));
    assert_eq!(out.overall_score, 0.0);
}

#[test]
fn test_additive_masks_weakness_multiplicative_does_not() {
    let patent = PatentRecord::new("P").with_metric("a", 10.0).with_metric("b", 0.5);
    let mult = evaluate_profile(&patent, &two_factor_profile(CombinationMode::Multiplicative, 0.0));
    let add = evaluate_profile(&patent, &two_factor_profile(CombinationMode::Additive, 0.0));
    assert!(add.overall_score > 50.0);
    assert!(mult.overall_score < 10.0);
}

#[test]
fn test_floors_keep_score_nonzero() {
    let patent = PatentRecord::new("P");
    let out = evaluate_profile(&patent, &two_factor_profile(CombinationMode::Multiplicative, 0.1));
    assert!((out.overall_score - 100.0 * 0.1 * 0.1).abs() < 1e-9);
    assert!(out.overall_score > 0.0);
    assert_eq!(out.defaulted_metrics(), 2);
}

#[test]
fn test_factor_order_does_not_change_breakdown() {
    let patent = PatentRecord::new("P").with_metric("a", 3.0).with_metric("b", 7.0);
    let forward = two_factor_profile(CombinationMode::Multiplicative, 0.0);
    let reversed = ScoringProfile::new(
        "test",
        "Test",
        vec![
            single_metric_factor("Legal", "b", 0.0),
            single_metric_factor("Market", "a", 0.0),
        ],
        CombinationMode::Multiplicative,
    )
    .unwrap();
    let a = evaluate_profile(&patent, &forward);
    let b = evaluate_profile(&patent, &reversed);
    assert_eq!(a.factor_scores(), b.factor_scores());
    assert!((a.overall_score - b.overall_score).abs() < 1e-9);
}

#[test]
fn test_score_bounded_by_100() {
    let patent = PatentRecord::new("P").with_metric("a", 1e9).with_metric("b", 1e9);
    for mode in [CombinationMode::Multiplicative, CombinationMode::Additive] {
        let out = evaluate_profile(&patent, &two_factor_profile(mode, 0.0));
        assert_eq!(out.overall_score, 100.0);
    }
}
