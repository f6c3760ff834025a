//! Disallowed-phrase matching.

use kin_core::config::DEFAULT_DISALLOWED_PHRASES;

/// The built-in phrase list as owned strings.
pub fn default_phrases() -> Vec<String> {
    DEFAULT_DISALLOWED_PHRASES.iter().map(|s| s.to_string()).collect()
}

/// First configured phrase found in `text`, compared case-insensitively.
/// Blank phrases never match.
pub fn find_disallowed<'p>(text: &str, phrases: &'p [String]) -> Option<&'p str> {
    let lower = text.to_lowercase();
    phrases
        .iter()
        .map(|p| p.as_str())
        .filter(|p| !p.trim().is_empty())
        .find(|p| lower.contains(&p.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_korean_filler() {
        let phrases = default_phrases();
        assert_eq!(find_disallowed("내공냠냠 감사합니다", &phrases), Some("내공냠냠"));
        assert_eq!(find_disallowed("저도 잘 모르겠어요", &phrases), Some("모르겠"));
    }

    #[test]
    fn english_is_case_insensitive() {
        let phrases = default_phrases();
        assert_eq!(find_disallowed("I DON'T KNOW, sorry", &phrases), Some("don't know"));
        assert_eq!(find_disallowed("Advertisement: buy now", &phrases), Some("advertisement"));
    }

    #[test]
    fn clean_text_and_blank_phrases() {
        let phrases = vec!["".to_string(), "  ".to_string()];
        assert_eq!(find_disallowed("들여쓰기를 확인해 보세요", &phrases), None);
        assert_eq!(find_disallowed("들여쓰기를 확인해 보세요", &default_phrases()), None);
    }
}
