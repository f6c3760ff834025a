//! kin-reliability: reliability engine with penalty-based trust scores,
//! traffic-light classification and disallowed-phrase matching.

pub mod engine;
pub mod phrases;

pub use engine::{
    classify, classify_default, score, score_all, score_breakdown, score_record, validate,
    ScoreBreakdown,
};
pub use phrases::{default_phrases, find_disallowed};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReliabilityError {
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),
}
