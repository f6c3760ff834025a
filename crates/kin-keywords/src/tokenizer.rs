//! Tokenizers for the two extraction modes.
//!
//! Korean has no reliable word boundaries for naive splitting inside a
//! sentence body, so hashtags come from a character-class regex. Titles are
//! short and mostly spaced, so they are split on whitespace.

use crate::KeywordError;
use kin_core::config::DEFAULT_TOKEN_PATTERN;
use regex::Regex;
use std::sync::LazyLock;

static HANGUL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_TOKEN_PATTERN).expect("default token pattern is valid")
});

/// Compiled regex describing one token.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    regex: Regex,
}

impl Default for TokenPattern {
    /// Runs of two or more Hangul syllables.
    fn default() -> Self {
        Self {
            regex: HANGUL.clone(),
        }
    }
}

impl TokenPattern {
    pub fn new(pattern: &str) -> Result<Self, KeywordError> {
        let regex = Regex::new(pattern).map_err(|e| KeywordError::InvalidPattern(e.to_string()))?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Non-overlapping matches, left to right.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex.find_iter(text).map(|m| m.as_str())
    }
}

/// Whitespace-split words with more than one character.
pub fn title_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().filter(|t| t.chars().count() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangul_runs_of_two_or_more() {
        let pattern = TokenPattern::default();
        let tokens: Vec<&str> = pattern.tokens("파이썬 에러가 나요! 네 python3 코드").collect();
        assert_eq!(tokens, vec!["파이썬", "에러가", "나요", "코드"]);
    }

    #[test]
    fn hangul_inside_unspaced_text() {
        let pattern = TokenPattern::default();
        let tokens: Vec<&str> = pattern.tokens("error:모듈을찾을수없음(python)").collect();
        assert_eq!(tokens, vec!["모듈을찾을수없음"]);
    }

    #[test]
    fn custom_pattern() {
        let pattern = TokenPattern::new(r"[A-Za-z]{3,}").unwrap();
        let tokens: Vec<&str> = pattern.tokens("fix the pip error in py").collect();
        assert_eq!(tokens, vec!["fix", "the", "pip", "error"]);
        assert_eq!(pattern.as_str(), r"[A-Za-z]{3,}");
    }

    #[test]
    fn invalid_pattern_is_error() {
        assert!(matches!(
            TokenPattern::new("[가-"),
            Err(KeywordError::InvalidPattern(_))
        ));
    }

    #[test]
    fn title_tokens_drop_single_chars() {
        let tokens: Vec<&str> = title_tokens("파이썬 에러 왜 나요 ?").collect();
        assert_eq!(tokens, vec!["파이썬", "에러", "나요"]);
    }
}
