//! Deterministic scoring and ranking of patent portfolios under declarative
//! stakeholder profiles.
//!
//! A [`ScoringProfile`] is pure data: factors built from weighted, normalized
//! metrics, combined multiplicatively or additively. The pipeline stages in
//! [`pipeline`] score, rank, aggregate across profiles, validate a top-K
//! slice against goalposts, and explain rank movement between two runs.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod profiles;
pub mod report;

pub use config::RunConfig;
pub use error::ConfigError;
pub use model::{
    CombinationMode, EligibilityRule, FactorScore, FactorSpec, MetricContribution, MetricSpec,
    NormalizeSpec, PatentRecord, ScoreResult, ScoringProfile, Step, Tier,
};
pub use pipeline::{
    ConsensusRanking, Goalposts, Movement, Ranking, ValidationReport, compare, consensus,
    evaluate_factor, evaluate_profile, filter_eligible, normalize, rank, rank_parallel, validate,
    validate_ranking,
};
pub use profiles::{ProfileCatalog, builtin_catalog, load_catalog_path, load_catalog_str};
