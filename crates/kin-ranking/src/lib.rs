//! kin-ranking: Per-question aggregation, search filters and dashboard metrics.

pub mod aggregate;
pub mod filter;
pub mod metrics;

pub use aggregate::{answers_for, rank_questions, summarize_questions};
pub use filter::{categories, filter_by_category, filter_records, ALL_CATEGORIES, MIN_QUERY_CHARS};
pub use metrics::{compute_metrics, worst_answer_report};
