use super::*;
use crate::model::normalize_spec::NormalizeSpec;
use crate::model::patent::{COMPETITOR_CITATIONS, YEARS_REMAINING};
use crate::model::profile::{CombinationMode, FactorSpec, MetricSpec, ScoringProfile};
use crate::pipeline::stage4_rank::rank;

fn linear_profile() -> ScoringProfile {
    ScoringProfile::new(
        "linear",
        "Linear",
        vec![
            FactorSpec::new(
                "Market",
                vec![
                    MetricSpec::new(
                        COMPETITOR_CITATIONS,
                        1.0,
                        NormalizeSpec::Linear { max: 100.0 },
                        0.0,
                    )
                    .unwrap(),
                ],
                0.0,
                None,
            )
            .unwrap(),
        ],
        CombinationMode::Multiplicative,
    )
    .unwrap()
}

#[test]
fn test_quantiles() {
    let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(median(&v), 3.0);
    assert_eq!(quantile_indexed(&v, 0.90), 5.0);
    assert_eq!(quantile_indexed(&v, 0.0), 1.0);
    assert_eq!(quantile_indexed(&[], 0.5), 0.0);
}

#[test]
fn test_score_distribution_of_top_slice() {
    // Scores equal the citation counts under a linear max-100 curve.
    let patents: Vec<PatentRecord> = (1..=10)
        .map(|i| PatentRecord::new(format!("P{i}")).with_metric(COMPETITOR_CITATIONS, (i * 10) as f64))
        .collect();
    let ranking = rank(&patents, &linear_profile());

    let all = score_distribution(&ranking, 100).unwrap();
    assert_eq!(all.n, 10);
    assert!((all.max - 100.0).abs() < 1e-9);
    assert!((all.min - 10.0).abs() < 1e-9);
    assert!((all.mean - 55.0).abs() < 1e-9);
    assert!(all.p10 >= all.p50);

    let top = score_distribution(&ranking, 3).unwrap();
    assert_eq!(top.n, 3);
    assert!((top.min - 80.0).abs() < 1e-9);
    assert!((top.p50 - 90.0).abs() < 1e-9);

    assert!(score_distribution(&ranking, 0).is_none());
}

#[test]
fn test_metric_coverage() {
    let patents = vec![
        PatentRecord::new("A")
            .with_metric(COMPETITOR_CITATIONS, 2.0)
            .with_metric(YEARS_REMAINING, 5.0),
        PatentRecord::new("B").with_absent(COMPETITOR_CITATIONS),
        PatentRecord::new("C").with_metric(COMPETITOR_CITATIONS, f64::NAN),
        PatentRecord::new("D").with_metric(COMPETITOR_CITATIONS, 0.0),
    ];
    let coverage = metric_coverage(&patents, &[COMPETITOR_CITATIONS, YEARS_REMAINING]);
    assert_eq!(coverage[0].present, 2);
    assert_eq!(coverage[0].total, 4);
    assert_eq!(coverage[0].fraction, 0.5);
    assert_eq!(coverage[1].present, 1);
    assert_eq!(coverage[1].fraction, 0.25);

    let none: Vec<PatentRecord> = Vec::new();
    assert_eq!(metric_coverage(&none, &[YEARS_REMAINING])[0].fraction, 0.0);
}
