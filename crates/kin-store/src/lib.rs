//! kin-store: Record store for crawled Q&A datasets.
//!
//! Loads a delimited file into typed [`QaRecord`](kin_core::record::QaRecord)s,
//! recovering cell-level problems locally and surfacing structural ones.

pub mod cache;
pub mod loader;

pub use cache::DatasetCache;
pub use loader::{load, load_or_empty, parse_records, Dataset, ParseWarning};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data source not found: {}", .0.display())]
    DataUnavailable(PathBuf),
    #[error("required columns missing: {}", .missing.join(", "))]
    DataMalformed { missing: Vec<String> },
    #[error("io error: {0}")]
    Io(String),
    #[error("csv error: {0}")]
    Csv(String),
    #[error("cache error: {0}")]
    Cache(String),
}

impl StoreError {
    /// True for the recoverable "no data" condition.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::DataUnavailable(_))
    }
}
