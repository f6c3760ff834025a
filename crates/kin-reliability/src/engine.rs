//! Scoring engine.
//!
//! Every answer starts at 100 and loses points for each rule it trips:
//! a short body, a disallowed phrase, more dislikes than likes. The result
//! is floored at 0 and mapped onto the SAFE / CAUTION / DANGER light.

use crate::phrases::find_disallowed;
use crate::ReliabilityError;
use kin_core::prelude::*;
use serde::Serialize;

const BASE_SCORE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub score: u8,
    /// Rules that fired, in evaluation order.
    pub penalties: Vec<Penalty>,
}

/// Score an answer and report which rules fired.
pub fn score_breakdown(record: &QaRecord, config: &ScoringConfig) -> ScoreBreakdown {
    let mut total = BASE_SCORE;
    let mut penalties = Vec::new();

    // 1. Length
    let chars = record.answer_len();
    if chars < config.min_answer_chars {
        total -= i32::from(config.short_answer_penalty);
        penalties.push(Penalty::ShortAnswer { chars });
    }

    // 2. Disallowed phrases
    if let Some(phrase) = find_disallowed(&record.answer_text, &config.disallowed_phrases) {
        total -= i32::from(config.disallowed_phrase_penalty);
        penalties.push(Penalty::DisallowedPhrase {
            phrase: phrase.to_string(),
        });
    }

    // 3. Votes
    if record.dislikes > record.likes {
        total -= i32::from(config.dislike_penalty);
        penalties.push(Penalty::MoreDislikes {
            likes: record.likes,
            dislikes: record.dislikes,
        });
    }

    ScoreBreakdown {
        score: total.clamp(0, BASE_SCORE) as u8,
        penalties,
    }
}

/// Trust score in 0..=100.
pub fn score(record: &QaRecord, config: &ScoringConfig) -> u8 {
    score_breakdown(record, config).score
}

/// Map a score onto the traffic light.
pub fn classify(score: u8, thresholds: &Thresholds) -> TrustCategory {
    if score >= thresholds.safe {
        TrustCategory::Safe
    } else if score >= thresholds.caution {
        TrustCategory::Caution
    } else {
        TrustCategory::Danger
    }
}

/// [`classify`] with the 70 / 40 cut-offs.
pub fn classify_default(score: u8) -> TrustCategory {
    classify(score, &Thresholds::default())
}

pub fn score_record(record: &QaRecord, config: &ScoringConfig) -> ScoredAnswer {
    let breakdown = score_breakdown(record, config);
    ScoredAnswer {
        record: record.clone(),
        score: breakdown.score,
        category: classify(breakdown.score, &config.thresholds),
        penalties: breakdown.penalties,
    }
}

pub fn score_all(records: &[QaRecord], config: &ScoringConfig) -> Vec<ScoredAnswer> {
    let scored: Vec<ScoredAnswer> = records.iter().map(|r| score_record(r, config)).collect();
    tracing::debug!(
        answers = scored.len(),
        flagged = scored.iter().filter(|s| s.category.is_flagged()).count(),
        "answers scored"
    );
    scored
}

/// Thresholds must satisfy `caution <= safe <= 100`.
pub fn validate(config: &ScoringConfig) -> Result<(), ReliabilityError> {
    let Thresholds { safe, caution } = config.thresholds;
    if safe > 100 {
        return Err(ReliabilityError::InvalidThresholds(format!(
            "safe threshold {safe} exceeds 100"
        )));
    }
    if caution > safe {
        return Err(ReliabilityError::InvalidThresholds(format!(
            "caution threshold {caution} is above safe threshold {safe}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str, likes: u64, dislikes: u64) -> QaRecord {
        QaRecord {
            doc_id: "d1".into(),
            answer_text: text.into(),
            likes,
            dislikes,
            answer_seq: 1,
            ..Default::default()
        }
    }

    #[test]
    fn empty_answer_with_dislikes_is_danger() {
        let config = ScoringConfig::default();
        let r = answer("", 1, 5);
        let s = score(&r, &config);
        assert_eq!(s, 30);
        assert_eq!(classify_default(s), TrustCategory::Danger);
    }

    #[test]
    fn clean_answer_is_safe() {
        let config = ScoringConfig::default();
        let text = "들여쓰기와 콜론 위치를 꼭 먼저 확인해 보세요";
        assert_eq!(text.chars().count(), 25);
        let r = answer(text, 3, 1);
        assert_eq!(score(&r, &config), 100);
        assert_eq!(classify_default(100), TrustCategory::Safe);
    }

    #[test]
    fn all_penalties_floor_at_zero() {
        let config = ScoringConfig::default();
        let r = answer("광고", 0, 2);
        let breakdown = score_breakdown(&r, &config);
        assert_eq!(breakdown.score, 0);
        assert_eq!(
            breakdown.penalties,
            vec![
                Penalty::ShortAnswer { chars: 2 },
                Penalty::DisallowedPhrase {
                    phrase: "광고".into()
                },
                Penalty::MoreDislikes {
                    likes: 0,
                    dislikes: 2
                },
            ]
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let config = ScoringConfig::default();
        // 19 Hangul syllables = 57 bytes, still short.
        let r = answer(&"가".repeat(19), 0, 0);
        assert_eq!(score(&r, &config), 60);
        let r = answer(&"가".repeat(20), 0, 0);
        assert_eq!(score(&r, &config), 100);
    }

    #[test]
    fn equal_votes_not_penalized() {
        let config = ScoringConfig::default();
        let r = answer("충분히 긴 답변입니다. 공식 문서를 참고하세요.", 2, 2);
        assert_eq!(score(&r, &config), 100);
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(classify_default(69), TrustCategory::Caution);
        assert_eq!(classify_default(70), TrustCategory::Safe);
        assert_eq!(classify_default(39), TrustCategory::Danger);
        assert_eq!(classify_default(40), TrustCategory::Caution);
        assert_eq!(classify_default(0), TrustCategory::Danger);
        assert_eq!(classify_default(100), TrustCategory::Safe);
    }

    #[test]
    fn score_is_deterministic_and_bounded() {
        let config = ScoringConfig::default();
        let samples = [
            answer("", 0, 0),
            answer("모르겠어요", 0, 10),
            answer("ADVERTISEMENT click here for the best deals", 5, 0),
            answer("정확한 답변을 드리자면 공식 문서의 예제를 참고하시면 됩니다", 10, 0),
        ];
        for r in &samples {
            let first = score(r, &config);
            assert!(first <= 100);
            for _ in 0..3 {
                assert_eq!(score(r, &config), first);
            }
        }
    }

    #[test]
    fn custom_penalties_and_thresholds() {
        let config = ScoringConfig {
            short_answer_penalty: 10,
            thresholds: Thresholds { safe: 95, caution: 50 },
            ..Default::default()
        };
        let scored = score_record(&answer("짧음", 1, 0), &config);
        assert_eq!(scored.score, 90);
        assert_eq!(scored.category, TrustCategory::Caution);
    }

    #[test]
    fn score_all_preserves_order() {
        let config = ScoringConfig::default();
        let records = vec![answer("", 0, 0), answer(&"나".repeat(30), 0, 0)];
        let scored = score_all(&records, &config);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].score, 60);
        assert_eq!(scored[1].score, 100);
        assert_eq!(scored[1].record, records[1]);
    }

    #[test]
    fn validate_thresholds() {
        assert!(validate(&ScoringConfig::default()).is_ok());

        let inverted = ScoringConfig {
            thresholds: Thresholds { safe: 40, caution: 70 },
            ..Default::default()
        };
        assert!(matches!(
            validate(&inverted),
            Err(ReliabilityError::InvalidThresholds(_))
        ));

        let too_high = ScoringConfig {
            thresholds: Thresholds { safe: 120, caution: 40 },
            ..Default::default()
        };
        assert!(validate(&too_high).is_err());
    }
}
