//! Frequency ranking of extracted tokens.

use crate::tokenizer::{title_tokens, TokenPattern};
use crate::KeywordError;
use kin_core::config::{KeywordConfig, DEFAULT_STOPWORDS};
use kin_core::summary::KeywordCount;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which tokenizer feeds the ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Regex tokens from question bodies.
    Hashtag,
    /// Whitespace tokens from titles.
    HotTopic,
}

/// The built-in stopword list.
pub fn default_stopwords() -> HashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect()
}

/// Top-`k` Hangul hashtags across `corpus`.
pub fn extract_hashtags<I, S>(corpus: I, stopwords: &HashSet<String>, k: usize) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extract_hashtags_with(corpus, &TokenPattern::default(), stopwords, k)
}

/// Top-`k` tokens matching `pattern` across `corpus`.
pub fn extract_hashtags_with<I, S>(
    corpus: I,
    pattern: &TokenPattern,
    stopwords: &HashSet<String>,
    k: usize,
) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text = concat(corpus);
    rank(pattern.tokens(&text), stopwords, k)
}

/// Top-`k` whitespace-split title words.
pub fn extract_hot_topics<I, S>(titles: I, stopwords: &HashSet<String>, k: usize) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text = concat(titles);
    rank(title_tokens(&text), stopwords, k)
}

/// Mode, pattern, stopwords and `k` bundled from config.
#[derive(Debug, Clone)]
pub struct Extractor {
    pub mode: ExtractionMode,
    pub pattern: TokenPattern,
    pub stopwords: HashSet<String>,
    pub k: usize,
}

impl Extractor {
    pub fn from_config(config: &KeywordConfig, mode: ExtractionMode) -> Result<Self, KeywordError> {
        Ok(Self {
            mode,
            pattern: TokenPattern::new(&config.pattern)?,
            stopwords: config.stopwords.iter().cloned().collect(),
            k: config.top_k,
        })
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn extract<I, S>(&self, corpus: I) -> Vec<KeywordCount>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.mode {
            ExtractionMode::Hashtag => {
                extract_hashtags_with(corpus, &self.pattern, &self.stopwords, self.k)
            }
            ExtractionMode::HotTopic => extract_hot_topics(corpus, &self.stopwords, self.k),
        }
    }
}

fn concat<I, S>(corpus: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for doc in corpus {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(doc.as_ref());
    }
    text
}

/// Count tokens, then order by descending count. The sort is stable, so
/// ties keep first-seen order.
fn rank<'t>(
    tokens: impl Iterator<Item = &'t str>,
    stopwords: &HashSet<String>,
    k: usize,
) -> Vec<KeywordCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for token in tokens {
        if stopwords.contains(token) {
            continue;
        }
        match index.get(token) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(token, counts.len());
                counts.push(KeywordCount::new(token, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(k);
    tracing::debug!(distinct = index.len(), returned = counts.len(), "keywords ranked");
    counts
}
