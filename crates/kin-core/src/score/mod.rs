//! Score types: trust categories, penalties and scored answers.

use crate::record::QaRecord;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Trust category (traffic light)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustCategory {
    Safe,
    Caution,
    Danger,
}

impl TrustCategory {
    pub fn label(self) -> &'static str {
        match self {
            TrustCategory::Safe => "SAFE",
            TrustCategory::Caution => "CAUTION",
            TrustCategory::Danger => "DANGER",
        }
    }

    /// 0 for safe, 2 for the most severe.
    pub fn severity(self) -> u8 {
        match self {
            TrustCategory::Safe => 0,
            TrustCategory::Caution => 1,
            TrustCategory::Danger => 2,
        }
    }

    /// Anything below `Safe` needs a human look.
    pub fn is_flagged(self) -> bool {
        self != TrustCategory::Safe
    }
}

impl std::fmt::Display for TrustCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Penalty — one fired scoring rule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Penalty {
    /// Answer body shorter than the configured minimum.
    ShortAnswer { chars: usize },
    /// Answer contains a disallowed phrase (first match reported).
    DisallowedPhrase { phrase: String },
    /// More dislikes than likes.
    MoreDislikes { likes: u64, dislikes: u64 },
}

impl Penalty {
    pub fn describe(&self) -> String {
        match self {
            Penalty::ShortAnswer { chars } => format!("답변이 너무 짧음 ({chars}자)"),
            Penalty::DisallowedPhrase { phrase } => format!("금지 문구 포함: \"{phrase}\""),
            Penalty::MoreDislikes { likes, dislikes } => {
                format!("비추천이 추천보다 많음 ({dislikes} > {likes})")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ScoredAnswer — derived, never persisted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredAnswer {
    #[serde(flatten)]
    pub record: QaRecord,

    /// Trust score in 0..=100.
    pub score: u8,

    #[serde(rename = "trust")]
    pub category: TrustCategory,

    #[serde(default)]
    pub penalties: Vec<Penalty>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalties_describe_themselves() {
        let penalty = Penalty::MoreDislikes { likes: 1, dislikes: 5 };
        assert_eq!(penalty.describe(), "비추천이 추천보다 많음 (5 > 1)");
        let penalty = Penalty::DisallowedPhrase { phrase: "광고".into() };
        assert_eq!(penalty.describe(), "금지 문구 포함: \"광고\"");
    }

    #[test]
    fn severity_orders_categories() {
        assert!(TrustCategory::Safe.severity() < TrustCategory::Caution.severity());
        assert!(TrustCategory::Caution.severity() < TrustCategory::Danger.severity());
        assert!(!TrustCategory::Safe.is_flagged());
        assert!(TrustCategory::Danger.is_flagged());
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&TrustCategory::Caution).unwrap();
        assert_eq!(json, "\"CAUTION\"");
        assert_eq!(TrustCategory::Danger.to_string(), "DANGER");
    }

    #[test]
    fn scored_answer_flattens_record() {
        let scored = ScoredAnswer {
            record: QaRecord {
                doc_id: "d1".into(),
                ..Default::default()
            },
            score: 30,
            category: TrustCategory::Danger,
            penalties: vec![Penalty::ShortAnswer { chars: 0 }],
        };

        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["doc_id"], "d1");
        assert_eq!(value["trust"], "DANGER");
        assert_eq!(value["penalties"][0]["kind"], "short_answer");
    }
}
