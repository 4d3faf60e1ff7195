use super::*;

#[test]
fn test_filter_keeps_order_and_drops_short_term() {
    let patents = vec![
        PatentRecord::new("P1").with_metric(YEARS_REMAINING, 10.0),
        PatentRecord::new("P2").with_metric(YEARS_REMAINING, 8.0),
        PatentRecord::new("P3").with_metric(YEARS_REMAINING, 2.0),
        PatentRecord::new("P4").with_metric(YEARS_REMAINING, 3.0),
    ];
    let rule = EligibilityRule::new(3.0).unwrap();
    let kept: Vec<&str> = filter_eligible(&patents, &rule)
        .iter()
        .map(|p| p.id())
        .collect();
    assert_eq!(kept, vec!["P1", "P2", "P4"]);
}

#[test]
fn test_missing_years_only_passes_zero_rule() {
    let patent = PatentRecord::new("P1");
    assert!(is_eligible(&patent, &EligibilityRule::default()));
    assert!(!is_eligible(&patent, &EligibilityRule::new(0.5).unwrap()));
}

#[test]
fn test_rule_rejects_non_finite() {
    assert!(EligibilityRule::new(f64::NAN).is_err());
    assert!(EligibilityRule::new(f64::INFINITY).is_err());
}
