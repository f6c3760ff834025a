//! Group answers by question.

use kin_core::record::QaRecord;
use kin_core::summary::QuestionSummary;
use std::collections::HashMap;

/// One summary per `doc_id`, in order of first appearance.
///
/// `answer_count` is the highest `answer_seq` in the group, not the number
/// of rows; `row_count` carries the latter.
pub fn summarize_questions(records: &[QaRecord]) -> Vec<QuestionSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<QuestionSummary> = Vec::new();

    for record in records {
        let seq = record.answer_seq.max(0) as u64;
        match index.get(record.doc_id.as_str()) {
            Some(&i) => {
                let s = &mut summaries[i];
                s.max_view_count = s.max_view_count.max(record.view_count);
                s.answer_count = s.answer_count.max(seq);
                s.row_count += 1;
            }
            None => {
                index.insert(&record.doc_id, summaries.len());
                summaries.push(QuestionSummary {
                    doc_id: record.doc_id.clone(),
                    title: record.title.clone(),
                    max_view_count: record.view_count,
                    answer_count: seq,
                    row_count: 1,
                });
            }
        }
    }

    summaries
}

/// The `top_n` questions with the most answers. Ties keep first-appearance order.
pub fn rank_questions(records: &[QaRecord], top_n: usize) -> Vec<QuestionSummary> {
    let mut summaries = summarize_questions(records);
    summaries.sort_by(|a, b| b.answer_count.cmp(&a.answer_count));
    summaries.truncate(top_n);
    tracing::debug!(top_n, returned = summaries.len(), "questions ranked");
    summaries
}

/// Answers of one question ordered by `answer_seq`.
pub fn answers_for<'r>(records: &'r [QaRecord], doc_id: &str) -> Vec<&'r QaRecord> {
    let mut answers: Vec<&QaRecord> = records.iter().filter(|r| r.doc_id == doc_id).collect();
    answers.sort_by_key(|r| r.answer_seq);
    answers
}
