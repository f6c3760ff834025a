//! kin-core: Shared types for Kin Monitor
//!
//! This crate has zero internal crate dependencies and defines the
//! canonical types used across all other kin-* crates.

pub mod config;
pub mod record;
pub mod score;
pub mod summary;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::config::{
        KeywordConfig, LoadConfig, MonitorConfig, RankingConfig, ScoringConfig, Thresholds,
    };
    pub use crate::record::QaRecord;
    pub use crate::score::{Penalty, ScoredAnswer, TrustCategory};
    pub use crate::summary::{DashboardMetrics, KeywordCount, LowQualityReport, QuestionSummary};
}
