use super::ProfileCatalog;
use super::defs::builtin_profiles;
use super::loader::{builtin_catalog, load_catalog_path, load_catalog_str};
use crate::error::ConfigError;
use crate::model::patent::{
    COMPETITOR_CITATIONS, ELIGIBILITY_SCORE, PatentRecord, VALIDITY_SCORE, YEARS_REMAINING,
};
use crate::model::profile::CombinationMode;
use crate::pipeline::stage3_profile::evaluate_profile;
use crate::pipeline::stage4_rank::rank;

const CUSTOM: &str = r#"
{
  "profiles": [
    {
      "id": "custom",
      "factors": [
        {
          "name": "Market",
          "floor": 0.05,
          "metrics": [
            {
              "field": "competitor_citations",
              "weight": 1.0,
              "normalize": {
                "type": "tiered_continuous",
                "tiers": [
                  { "min": 0, "max": 5, "baseValue": 0.0, "slope": 0.4 },
                  { "min": 5, "max": 20, "baseValue": 0.5, "slope": 0.5 }
                ]
              }
            }
          ]
        },
        {
          "name": "Legal",
          "metrics": [
            { "metric": "validity_score", "weight": 2, "normalize": { "type": "five_scale" }, "default": 3 },
            { "metric": "years_remaining", "weight": 1, "normalize": { "type": "stepped", "steps": [
              { "threshold": 0, "value": 0.1 }, { "threshold": 8, "value": 1.0 }
            ] } }
          ]
        }
      ]
    }
  ]
}
"#;

#[test]
fn test_builtin_catalog_ids_and_shape() {
    let catalog = builtin_catalog().unwrap();
    assert_eq!(
        catalog.ids(),
        vec![
            "ip-lit-aggressive",
            "ip-lit-balanced",
            "ip-lit-conservative",
            "licensing",
            "corporate-ma",
            "executive",
        ]
    );
    for profile in catalog.profiles() {
        assert_eq!(profile.factors().len(), 4, "{}", profile.id());
        assert_eq!(profile.combination(), CombinationMode::Multiplicative);
        for factor in profile.factors() {
            assert!(factor.floor() > 0.0, "{} {}", profile.id(), factor.name());
            assert!((factor.total_weight() - 1.0).abs() < 1e-9, "{}", factor.name());
        }
    }
    assert_eq!(builtin_profiles().len(), catalog.len());
}

#[test]
fn test_builtin_timeline_floor_holds_at_zero_years() {
    let catalog = builtin_catalog().unwrap();
    let profile = catalog.profile("ip-lit-balanced").unwrap();
    let patent = PatentRecord::new("P")
        .with_metric(COMPETITOR_CITATIONS, 5.0)
        .with_metric(YEARS_REMAINING, 0.0);
    let out = evaluate_profile(&patent, profile);
    assert_eq!(out.factor_score("TimelineValue"), Some(0.15));
    assert!(out.overall_score > 0.0);
}

#[test]
fn test_builtin_profiles_prefer_cited_patents() {
    let catalog = builtin_catalog().unwrap();
    let patents = vec![
        PatentRecord::new("uncited").with_metric(YEARS_REMAINING, 10.0),
        PatentRecord::new("cited")
            .with_metric(COMPETITOR_CITATIONS, 15.0)
            .with_metric(YEARS_REMAINING, 10.0),
    ];
    for profile in catalog.profiles() {
        assert_eq!(rank(&patents, profile).ids()[0], "cited", "{}", profile.id());
    }
}

#[test]
fn test_unknown_profile() {
    let catalog = builtin_catalog().unwrap();
    assert!(catalog.get("nope").is_none());
    assert!(matches!(
        catalog.profile("nope"),
        Err(ConfigError::UnknownProfile(id)) if id == "nope"
    ));
}

#[test]
fn test_load_wrapped_catalog() {
    let catalog = load_catalog_str(CUSTOM).unwrap();
    let profile = catalog.profile("custom").unwrap();
    assert_eq!(profile.label(), "custom");
    assert_eq!(profile.factors()[1].floor(), 0.0);

    let patent = PatentRecord::new("P")
        .with_metric(COMPETITOR_CITATIONS, 5.0)
        .with_metric(VALIDITY_SCORE, 5.0)
        .with_metric(YEARS_REMAINING, 9.0);
    let out = evaluate_profile(&patent, profile);
    assert_eq!(out.factor_score("Market"), Some(0.5));
    assert_eq!(out.factor_score("Legal"), Some(1.0));
    assert!((out.overall_score - 50.0).abs() < 1e-9);
}

#[test]
fn test_load_bare_array() {
    let json = r#"[
        { "id": "a", "label": "A", "combination": "additive", "factors": [
            { "name": "F", "metrics": [ { "metric": "x", "weight": 1, "normalize": { "type": "log", "max": 100 } } ] }
        ] },
        { "id": "b", "factors": [
            { "name": "F", "metrics": [ { "metric": "x", "weight": 1, "normalize": { "type": "sqrt", "max": 4 } } ] }
        ] }
    ]"#;
    let catalog = load_catalog_str(json).unwrap();
    assert_eq!(catalog.ids(), vec!["a", "b"]);
    assert_eq!(
        catalog.profile("a").unwrap().combination(),
        CombinationMode::Additive
    );
}

#[test]
fn test_load_rejects_authoring_mistakes() {
    let duplicate = r#"[
        { "id": "a", "factors": [ { "name": "F", "metrics": [ { "metric": "x", "weight": 1, "normalize": { "type": "linear", "max": 1 } } ] } ] },
        { "id": "a", "factors": [ { "name": "F", "metrics": [ { "metric": "x", "weight": 1, "normalize": { "type": "linear", "max": 1 } } ] } ] }
    ]"#;
    assert!(matches!(
        load_catalog_str(duplicate),
        Err(ConfigError::DuplicateProfile(id)) if id == "a"
    ));

    let no_factors = r#"[ { "id": "a", "factors": [] } ]"#;
    assert!(matches!(
        load_catalog_str(no_factors),
        Err(ConfigError::Json(_))
    ));

    let gap = CUSTOM.replace(r#""min": 5, "max": 20"#, r#""min": 6, "max": 20"#);
    let err = load_catalog_str(&gap).unwrap_err();
    assert!(err.to_string().contains("gap"), "{err}");

    assert!(matches!(load_catalog_str("[]"), Err(ConfigError::EmptyCatalog)));
    assert!(load_catalog_str("{}").is_err());
}

#[test]
fn test_serialized_builtin_catalog_reloads() {
    let catalog = builtin_catalog().unwrap();
    let json = serde_json::to_string(&catalog).unwrap();
    let reloaded = load_catalog_str(&json).unwrap();
    assert_eq!(reloaded.ids(), catalog.ids());

    let patent = PatentRecord::new("P")
        .with_metric(COMPETITOR_CITATIONS, 4.0)
        .with_metric(ELIGIBILITY_SCORE, 4.0)
        .with_metric(YEARS_REMAINING, 6.5);
    for (a, b) in catalog.profiles().iter().zip(reloaded.profiles()) {
        let x = evaluate_profile(&patent, a).overall_score;
        let y = evaluate_profile(&patent, b).overall_score;
        assert!((x - y).abs() < 1e-9, "{}", a.id());
    }
}

#[test]
fn test_load_from_path() {
    let path = std::env::temp_dir().join(format!("patent-rank-catalog-{}.json", std::process::id()));
    std::fs::write(&path, CUSTOM).unwrap();
    let catalog = load_catalog_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(catalog.ids(), vec!["custom"]);

    let missing = load_catalog_path(&path).unwrap_err();
    assert!(matches!(missing, ConfigError::Context { .. }));
}

#[test]
fn test_catalog_new_rejects_empty() {
    assert!(matches!(
        ProfileCatalog::new(Vec::new()),
        Err(ConfigError::EmptyCatalog)
    ));
}
