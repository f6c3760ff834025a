//! kin-keywords: Keyword extraction for trending-topic discovery.
//!
//! Two tokenization modes share one frequency ranking:
//! - hashtags: regex runs of script characters (Hangul by default) from question text
//! - hot topics: whitespace-split title words longer than one character

pub mod extract;
pub mod tokenizer;

pub use extract::{
    default_stopwords, extract_hashtags, extract_hashtags_with, extract_hot_topics, ExtractionMode,
    Extractor,
};
pub use tokenizer::TokenPattern;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("invalid token pattern: {0}")]
    InvalidPattern(String),
}
