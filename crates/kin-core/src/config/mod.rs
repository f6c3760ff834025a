//! Monitor configuration: data source, scoring rules, keyword and ranking knobs.
//!
//! Stored as JSON. Every field has a default so a partial file such as
//! `{"ranking": {"top_n": 10}}` is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Phrases that mark an answer as filler or spam.
pub const DEFAULT_DISALLOWED_PHRASES: &[&str] = &[
    "advertisement",
    "don't know",
    "광고",
    "홍보",
    "모르겠",
    "잘 모르",
    "내공냠냠",
    "내공 냠냠",
    "ㅋㅋㅋ",
    "링크 참고",
];

/// Korean filler words that never make a useful hashtag.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "질문",
    "답변",
    "감사합니다",
    "있나요",
    "없나요",
    "어떻게",
    "무엇",
    "그리고",
    "그런데",
    "하는",
    "하고",
    "해요",
    "합니다",
    "입니다",
    "있습니다",
    "궁금합니다",
    "알려주세요",
    "부탁드립니다",
];

pub const DEFAULT_TOKEN_PATTERN: &str = "[가-힣]{2,}";

pub const DEFAULT_DATA_PATH: &str = "kin_sample_data.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Tabular dataset to browse.
    pub data_path: PathBuf,
    pub load: LoadConfig,
    pub scoring: ScoringConfig,
    pub keywords: KeywordConfig,
    pub ranking: RankingConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            load: LoadConfig::default(),
            scoring: ScoringConfig::default(),
            keywords: KeywordConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the config to use: an explicit path must exist; otherwise the
    /// per-user file is read if present, else defaults apply.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/kin-monitor/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("kin-monitor").join("config.json"))
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct LoadConfig {
    /// Field delimiter of the tabular file. Must be ASCII.
    pub delimiter: char,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Answers shorter than this many characters are penalized.
    pub min_answer_chars: usize,
    pub short_answer_penalty: u8,
    pub disallowed_phrases: Vec<String>,
    pub disallowed_phrase_penalty: u8,
    /// Applied when dislikes exceed likes.
    pub dislike_penalty: u8,
    pub thresholds: Thresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_answer_chars: 20,
            short_answer_penalty: 40,
            disallowed_phrases: DEFAULT_DISALLOWED_PHRASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            disallowed_phrase_penalty: 50,
            dislike_penalty: 30,
            thresholds: Thresholds::default(),
        }
    }
}

/// Traffic-light cut-offs: `score >= safe` is SAFE, `score >= caution` is
/// CAUTION, anything lower is DANGER.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Thresholds {
    pub safe: u8,
    pub caution: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            safe: 70,
            caution: 40,
        }
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeywordConfig {
    /// How many hashtags / hot topics to surface.
    pub top_k: usize,
    pub stopwords: Vec<String>,
    /// Regex matching one hashtag token.
    pub pattern: String,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            pattern: DEFAULT_TOKEN_PATTERN.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RankingConfig {
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
