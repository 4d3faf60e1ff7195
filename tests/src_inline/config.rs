use super::*;

#[test]
fn test_defaults_from_empty_object() {
    let config = RunConfig::from_json_str("{}").unwrap();
    assert_eq!(config, RunConfig::default());
    assert_eq!(config.log_filter, "info");
    assert_eq!(config.top_k, 100);
    assert_eq!(config.movement_threshold, 10);
    assert_eq!(config.eligibility.min_years_remaining(), 0.0);
    assert_eq!(config.goalposts.citation_coverage.min(), 0.70);
    assert_eq!(config.goalposts.mean_years_remaining.max(), 12.0);
}

#[test]
fn test_overrides() {
    let config = RunConfig::from_json_str(
        r#"{
            "log_filter": "patent_rank=debug",
            "top_k": 25,
            "eligibility": { "min_years_remaining": 3 },
            "goalposts": {
                "citation_coverage": { "min": 0.5, "max": 1.0 },
                "mean_years_remaining": { "min": 4, "max": 15 }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(config.top_k, 25);
    assert_eq!(config.movement_threshold, 10);
    assert_eq!(config.eligibility.min_years_remaining(), 3.0);
    assert_eq!(config.goalposts.mean_years_remaining.min(), 4.0);
}

#[test]
fn test_inverted_band_rejected() {
    let err = RunConfig::from_json_str(
        r#"{ "goalposts": {
            "citation_coverage": { "min": 0.9, "max": 0.1 },
            "mean_years_remaining": { "min": 4, "max": 15 }
        } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_from_missing_path() {
    let err = RunConfig::from_path(Path::new("/nonexistent/patent-rank/run.json")).unwrap_err();
    assert!(err.to_string().contains("run.json"));
}
