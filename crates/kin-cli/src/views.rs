//! Structured view payloads for each page.

use crate::nav::{NavError, Page};
use crate::state::Session;
use chrono::NaiveDate;
use kin_core::record::QaRecord;
use kin_core::score::ScoredAnswer;
use kin_core::summary::{DashboardMetrics, KeywordCount, LowQualityReport, QuestionSummary};
use kin_keywords::{ExtractionMode, Extractor};
use kin_ranking::{
    answers_for, categories, compute_metrics, filter_by_category, filter_records, rank_questions,
    summarize_questions, worst_answer_report,
};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum View {
    Main(MainView),
    Detail(DetailView),
    MyQuestions(MyQuestionsView),
}

#[derive(Debug, Serialize)]
pub struct MainView {
    pub metrics: DashboardMetrics,
    pub categories: Vec<String>,
    pub hashtags: Vec<KeywordCount>,
    pub hot_topics: Vec<KeywordCount>,
    pub ranking: Vec<QuestionSummary>,
    pub query: String,
    pub category: Option<String>,
    pub answers: Vec<ScoredAnswer>,
    pub report: Option<LowQualityReport>,
    pub parse_warnings: usize,
}

#[derive(Debug, Serialize)]
pub struct DetailView {
    pub doc_id: String,
    pub category: Option<String>,
    pub title: String,
    pub question_text: String,
    pub view_count: u64,
    pub collected_at: Option<NaiveDate>,
    pub tracked: bool,
    pub answers: Vec<ScoredAnswer>,
}

#[derive(Debug, Serialize)]
pub struct MyQuestionsView {
    pub questions: Vec<QuestionSummary>,
}

/// Render whatever page the navigator is on.
pub fn render(session: &Session) -> anyhow::Result<View> {
    Ok(match session.navigator.current() {
        Page::Main => View::Main(main_view(session)?),
        Page::Detail { doc_id } => View::Detail(detail_view(session, doc_id)?),
        Page::MyQuestions => View::MyQuestions(my_questions_view(session)),
    })
}

pub fn main_view(session: &Session) -> anyhow::Result<MainView> {
    let records = session.records();

    Ok(MainView {
        metrics: compute_metrics(session.scored()),
        categories: categories(records),
        hashtags: hashtags(session, None)?,
        hot_topics: hot_topics(session, None)?,
        ranking: rank_questions(records, session.config.ranking.top_n),
        query: session.query.clone(),
        category: session.category.clone(),
        answers: listing(session, &session.query, session.category.as_deref()),
        report: worst_answer_report(session.scored()),
        parse_warnings: session.dataset().warnings.len(),
    })
}

pub fn detail_view(session: &Session, doc_id: &str) -> anyhow::Result<DetailView> {
    let rows = answers_for(session.records(), doc_id);
    let first = *rows
        .first()
        .ok_or_else(|| NavError::UnknownQuestion(doc_id.to_string()))?;

    Ok(DetailView {
        doc_id: doc_id.to_string(),
        category: first.category.clone(),
        title: first.title.clone(),
        question_text: first.question_text.clone(),
        view_count: first.view_count,
        collected_at: first.collected_at,
        tracked: session.navigator.tracked().iter().any(|d| d == doc_id),
        answers: rows
            .into_iter()
            .map(|r| kin_reliability::score_record(r, &session.config.scoring))
            .collect(),
    })
}

pub fn my_questions_view(session: &Session) -> MyQuestionsView {
    let summaries = summarize_questions(session.records());
    let questions = session
        .navigator
        .tracked()
        .iter()
        .filter_map(|id| summaries.iter().find(|s| &s.doc_id == id).cloned())
        .collect();
    MyQuestionsView { questions }
}

/// Scored answers after the category and search filters.
pub fn listing(session: &Session, query: &str, category: Option<&str>) -> Vec<ScoredAnswer> {
    let by_category = filter_by_category(session.records(), category);
    let matching = filter_records(&by_category, query);
    kin_reliability::score_all(&matching, &session.config.scoring)
}

/// Hashtags from the body of each distinct question.
pub fn hashtags(session: &Session, k: Option<usize>) -> anyhow::Result<Vec<KeywordCount>> {
    let extractor = extractor(session, ExtractionMode::Hashtag, k)?;
    let questions = first_rows(session.records());
    Ok(extractor.extract(questions.iter().map(|r| r.question_text.as_str())))
}

/// Hot topics from the title of each distinct question. Placeholder titles
/// are skipped.
pub fn hot_topics(session: &Session, k: Option<usize>) -> anyhow::Result<Vec<KeywordCount>> {
    let extractor = extractor(session, ExtractionMode::HotTopic, k)?;
    let questions = first_rows(session.records());
    Ok(extractor.extract(
        questions
            .iter()
            .filter(|r| !r.has_placeholder_title())
            .map(|r| r.title.as_str()),
    ))
}

fn extractor(session: &Session, mode: ExtractionMode, k: Option<usize>) -> anyhow::Result<Extractor> {
    let extractor = Extractor::from_config(&session.config.keywords, mode)?;
    Ok(match k {
        Some(k) => extractor.with_k(k),
        None => extractor,
    })
}

/// First row of each question, in order of appearance. Question fields are
/// repeated on every answer row, so counting them per row would weight
/// questions by their number of answers.
fn first_rows(records: &[QaRecord]) -> Vec<&QaRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.doc_id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavAction;
    use crate::state::tests::{session_for, SAMPLE};

    fn sample_session() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kin.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let session = session_for(&path);
        (dir, session)
    }

    #[test]
    fn main_view_aggregates_everything() {
        let (_dir, session) = sample_session();
        let view = main_view(&session).unwrap();

        assert_eq!(view.metrics.question_count, 3);
        assert_eq!(view.metrics.answer_count, 4);
        assert_eq!(view.metrics.flagged_count, 2);
        assert_eq!(view.categories, vec!["IT/기술", "건강", "법률"]);
        assert_eq!(view.ranking[0].doc_id, "q1");
        assert_eq!(view.ranking[0].answer_count, 2);
        assert_eq!(view.answers.len(), 4);

        let report = view.report.unwrap();
        assert_eq!(report.doc_id, "q1");
        assert_eq!(report.answer_seq, 2);
        assert_eq!(report.insincerity_index, 100);
        assert_eq!(report.reasons.len(), report.penalties.len());
    }

    #[test]
    fn hashtags_count_each_question_once() {
        let (_dir, session) = sample_session();
        let tags = hashtags(&session, Some(1)).unwrap();
        // "파이썬" appears in q1 and q2 bodies; q1's two rows count once.
        assert_eq!(tags, vec![KeywordCount::new("파이썬", 2)]);
    }

    #[test]
    fn hot_topics_from_titles() {
        let (_dir, session) = sample_session();
        let topics = hot_topics(&session, Some(2)).unwrap();
        assert_eq!(topics[0], KeywordCount::new("파이썬", 1));
        assert_eq!(topics.len(), 2);
    }

    #[test]
    fn hot_topics_skip_placeholder_titles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kin.csv");
        let header = SAMPLE.lines().next().unwrap();
        std::fs::write(
            &path,
            format!("{header}\nu1,,,본문,답변,1,0,0,1,\nu2,,,본문,답변,1,0,0,1,\nu3,,전세 계약,본문,답변,1,0,0,1,\n"),
        )
        .unwrap();
        let session = session_for(&path);

        assert!(session.records()[0].has_placeholder_title());
        let topics = hot_topics(&session, None).unwrap();
        assert_eq!(
            topics,
            vec![KeywordCount::new("전세", 1), KeywordCount::new("계약", 1)]
        );
    }

    #[test]
    fn listing_applies_filters() {
        let (_dir, session) = sample_session();
        assert_eq!(listing(&session, "파이썬", None).len(), 3);
        assert_eq!(listing(&session, "파이썬", Some("건강")).len(), 1);
        assert_eq!(listing(&session, "파", Some("법률")).len(), 1);
    }

    #[test]
    fn detail_view_orders_answers() {
        let (_dir, session) = sample_session();
        let view = detail_view(&session, "q1").unwrap();
        assert_eq!(view.title, "파이썬 에러 해결 방법");
        assert_eq!(view.answers.len(), 2);
        assert_eq!(view.answers[0].record.answer_seq, 1);
        assert!(!view.tracked);
        assert!(detail_view(&session, "nope").is_err());
    }

    #[test]
    fn render_follows_navigation() {
        let (_dir, mut session) = sample_session();
        assert!(matches!(render(&session).unwrap(), View::Main(_)));

        session.track("q3").unwrap();
        session.navigate(NavAction::OpenMyQuestions).unwrap();
        match render(&session).unwrap() {
            View::MyQuestions(view) => {
                assert_eq!(view.questions.len(), 1);
                assert_eq!(view.questions[0].doc_id, "q3");
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn empty_session_renders_zeros() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_for(&dir.path().join("absent.csv"));
        let view = main_view(&session).unwrap();
        assert_eq!(view.metrics.question_count, 0);
        assert_eq!(view.metrics.answer_count, 0);
        assert_eq!(view.metrics.average_score, None);
        assert!(view.hashtags.is_empty());
        assert!(view.ranking.is_empty());
        assert!(view.report.is_none());
    }
}
