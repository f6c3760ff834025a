//! Aggregate types handed to the presentation layer.

use crate::score::{Penalty, TrustCategory};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Question ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSummary {
    pub doc_id: String,

    /// Title of the first row seen for this question.
    pub title: String,

    pub max_view_count: u64,

    /// Highest `answer_seq` in the group (clamped at 0).
    pub answer_count: u64,

    /// Number of rows actually present for the group.
    pub row_count: usize,
}

// ---------------------------------------------------------------------------
// Keyword frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordCount {
    pub token: String,
    pub count: usize,
}

impl KeywordCount {
    pub fn new(token: impl Into<String>, count: usize) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }

    /// Render as a hashtag, e.g. `#파이썬`.
    pub fn hashtag(&self) -> String {
        format!("#{}", self.token)
    }
}

// ---------------------------------------------------------------------------
// Dashboard metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardMetrics {
    /// Distinct questions (doc_ids).
    pub question_count: usize,
    pub answer_count: usize,
    /// Mean trust score; `None` when there is nothing to average.
    pub average_score: Option<f64>,
    /// Caution + danger.
    pub flagged_count: usize,
    pub safe_count: usize,
    pub caution_count: usize,
    pub danger_count: usize,
}

// ---------------------------------------------------------------------------
// Low-quality answer report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowQualityReport {
    pub doc_id: String,
    pub category: Option<String>,
    pub title: String,
    pub answer_seq: i64,
    pub answer_text: String,
    pub score: u8,
    pub trust: TrustCategory,
    /// `100 - score`.
    pub insincerity_index: u8,
    pub penalties: Vec<Penalty>,
    /// Human-readable line per penalty, same order.
    pub reasons: Vec<String>,
}
