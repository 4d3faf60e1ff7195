pub mod stage0_eligibility;
pub mod stage1_normalize;
pub mod stage2_factor;
pub mod stage3_profile;
pub mod stage4_rank;
pub mod stage5_consensus;
pub mod stage6_goalposts;
pub mod stage7_movement;

pub use stage0_eligibility::{filter_eligible, is_eligible};
pub use stage1_normalize::normalize;
pub use stage2_factor::evaluate_factor;
pub use stage3_profile::evaluate_profile;
pub use stage4_rank::{RankedPatent, Ranking, rank, rank_parallel};
pub use stage5_consensus::{ConsensusEntry, ConsensusRanking, ProfileScore, consensus};
pub use stage6_goalposts::{
    Band, GoalpostCheck, Goalposts, ValidationReport, Violation, validate, validate_ranking,
};
pub use stage7_movement::{Explanation, Movement, compare};
