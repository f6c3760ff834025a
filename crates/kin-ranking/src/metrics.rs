//! Dashboard metrics and the low-quality answer report.

use kin_core::score::{Penalty, ScoredAnswer, TrustCategory};
use kin_core::summary::{DashboardMetrics, LowQualityReport};
use std::collections::HashSet;

/// Headline numbers over scored answers. Empty input yields all zeros.
pub fn compute_metrics(scored: &[ScoredAnswer]) -> DashboardMetrics {
    let mut metrics = DashboardMetrics {
        answer_count: scored.len(),
        ..Default::default()
    };

    let mut questions: HashSet<&str> = HashSet::new();
    let mut total: u64 = 0;

    for answer in scored {
        questions.insert(&answer.record.doc_id);
        total += u64::from(answer.score);
        match answer.category {
            TrustCategory::Safe => metrics.safe_count += 1,
            TrustCategory::Caution => metrics.caution_count += 1,
            TrustCategory::Danger => metrics.danger_count += 1,
        }
    }

    metrics.question_count = questions.len();
    metrics.flagged_count = metrics.caution_count + metrics.danger_count;
    if !scored.is_empty() {
        metrics.average_score = Some(total as f64 / scored.len() as f64);
    }
    tracing::debug!(
        questions = metrics.question_count,
        flagged = metrics.flagged_count,
        "dashboard metrics computed"
    );
    metrics
}

/// The lowest-scored flagged answer (first one on ties).
pub fn worst_answer_report(scored: &[ScoredAnswer]) -> Option<LowQualityReport> {
    let worst = scored
        .iter()
        .filter(|a| a.category.is_flagged())
        .min_by_key(|a| a.score)?;

    Some(LowQualityReport {
        doc_id: worst.record.doc_id.clone(),
        category: worst.record.category.clone(),
        title: worst.record.title.clone(),
        answer_seq: worst.record.answer_seq,
        answer_text: worst.record.answer_text.clone(),
        score: worst.score,
        trust: worst.category,
        insincerity_index: 100 - worst.score.min(100),
        penalties: worst.penalties.clone(),
        reasons: worst.penalties.iter().map(Penalty::describe).collect(),
    })
}
