//! Record types: one row of the crawled Q&A dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for a question without a title.
pub const MISSING_TITLE: &str = "제목 없음";

/// Placeholder for a question without body text.
pub const MISSING_QUESTION: &str = "내용 없음";

// ---------------------------------------------------------------------------
// QaRecord one row per answer
// ---------------------------------------------------------------------------

/// A single answer together with its (denormalized) question.
///
/// All answers sharing a `doc_id` carry the same title, question text,
/// view count and collection date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaRecord {
    /// Groups every answer belonging to one question.
    pub doc_id: String,

    /// Board category (e.g. "IT/기술"), when the dataset carries one.
    #[serde(default)]
    pub category: Option<String>,

    pub title: String,

    pub question_text: String,

    /// Empty when the crawler captured no answer body.
    pub answer_text: String,

    pub view_count: u64,

    pub likes: u64,

    pub dislikes: u64,

    /// Ordinal position of this answer within its question (1-based).
    pub answer_seq: i64,

    /// `None` when the crawl date was blank or unparseable.
    #[serde(default)]
    pub collected_at: Option<NaiveDate>,
}

impl QaRecord {
    /// Length of the answer body in characters, not bytes.
    pub fn answer_len(&self) -> usize {
        self.answer_text.chars().count()
    }

    /// True when the title is the missing-title placeholder.
    pub fn has_placeholder_title(&self) -> bool {
        self.title == MISSING_TITLE
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_len_counts_chars() {
        let record = QaRecord {
            answer_text: "안녕하세요".into(),
            ..Default::default()
        };
        assert_eq!(record.answer_len(), 5);
        assert_eq!(record.answer_text.len(), 15);
    }

    #[test]
    fn placeholder_title_detected() {
        let mut record = QaRecord {
            title: MISSING_TITLE.into(),
            ..Default::default()
        };
        assert!(record.has_placeholder_title());
        record.title = "제목 있음".into();
        assert!(!record.has_placeholder_title());
    }

    #[test]
    fn round_trip_record() {
        let record = QaRecord {
            doc_id: "d1".into(),
            category: Some("IT/기술".into()),
            title: "파이썬 에러".into(),
            question_text: "코드가 안 돌아가요".into(),
            answer_text: "들여쓰기를 확인해 보세요".into(),
            view_count: 120,
            likes: 3,
            dislikes: 0,
            answer_seq: 1,
            collected_at: NaiveDate::from_ymd_opt(2025, 12, 27),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: QaRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
