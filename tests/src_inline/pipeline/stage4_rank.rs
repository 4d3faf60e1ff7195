use super::*;
use crate::model::normalize_spec::NormalizeSpec;
use crate::model::profile::{CombinationMode, FactorSpec, MetricSpec};

fn citation_profile() -> ScoringProfile {
    ScoringProfile::new(
        "cites",
        "Citations",
        vec![
            FactorSpec::new(
                "Market",
                vec![MetricSpec::new(
                    "competitor_citations",
                    1.0,
                    NormalizeSpec::Linear { max: 10.0 },
                    0.0,
                )
                .unwrap()],
                0.0,
                None,
            )
            .unwrap(),
        ],
        CombinationMode::Multiplicative,
    )
    .unwrap()
}

fn patents(citations: &[f64]) -> Vec<PatentRecord> {
    citations
        .iter()
        .enumerate()
        .map(|(i, c)| PatentRecord::new(format!("P{}", i + 1)).with_metric("competitor_citations", *c))
        .collect()
}

#[test]
fn test_descending_order_and_ranks() {
    let input = patents(&[2.0, 9.0, 5.0]);
    let ranking = rank(&input, &citation_profile());
    assert_eq!(ranking.ids(), vec!["P2", "P3", "P1"]);
    let ranks: Vec<usize> = ranking.entries.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(ranking.rank_of("P1"), Some(3));
    assert_eq!(ranking.profile_id, "cites");
}

#[test]
fn test_ties_follow_input_order() {
    let input = patents(&[5.0, 7.0, 5.0, 5.0, 7.0]);
    let ranking = rank(&input, &citation_profile());
    assert_eq!(ranking.ids(), vec!["P2", "P5", "P1", "P3", "P4"]);
}

#[test]
fn test_repeated_runs_identical() {
    let input = patents(&[3.0, 3.0, 1.0, 8.0, 3.0, 0.0, 8.0]);
    let a = rank(&input, &citation_profile());
    let b = rank(&input, &citation_profile());
    assert_eq!(a, b);
    for (x, y) in a.entries.iter().zip(&b.entries) {
        assert_eq!(x.score().to_bits(), y.score().to_bits());
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let citations: Vec<f64> = (0..500).map(|i| ((i * 37) % 23) as f64).collect();
    let input = patents(&citations);
    let seq = rank(&input, &citation_profile());
    let par = rank_parallel(&input, &citation_profile());
    assert_eq!(seq, par);
}

#[test]
fn test_accepts_borrowed_candidates() {
    let input = patents(&[1.0, 4.0, 2.0]);
    let borrowed: Vec<&PatentRecord> = input.iter().filter(|p| p.id() != "P2").collect();
    let ranking = rank(&borrowed, &citation_profile());
    assert_eq!(ranking.ids(), vec!["P3", "P1"]);
    let top: Vec<&str> = ranking
        .top_records(&borrowed, 1)
        .iter()
        .map(|p| p.id())
        .collect();
    assert_eq!(top, vec!["P3"]);
}

#[test]
fn test_top_clamps_to_len() {
    let input = patents(&[1.0, 2.0]);
    let ranking = rank(&input, &citation_profile());
    assert_eq!(ranking.top(10).len(), 2);
    assert!(rank(&Vec::<PatentRecord>::new(), &citation_profile()).is_empty());
}
