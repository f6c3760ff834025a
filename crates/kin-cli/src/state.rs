//! Session state shared by every command.

use crate::nav::{NavAction, NavError, Navigator, Page};
use kin_core::config::MonitorConfig;
use kin_core::record::QaRecord;
use kin_core::score::ScoredAnswer;
use kin_store::{Dataset, DatasetCache, StoreError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// One user's view of one dataset.
pub struct Session {
    pub config: MonitorConfig,

    /// Parsed datasets keyed on source identity.
    cache: DatasetCache,

    dataset: Arc<Dataset>,

    /// Scores for `dataset.records`, same order.
    scored: Vec<ScoredAnswer>,

    doc_ids: HashSet<String>,

    pub navigator: Navigator,

    /// Active search query on the main page.
    pub query: String,

    /// Active category filter on the main page.
    pub category: Option<String>,
}

impl Session {
    /// Validate the config and load the dataset. A missing source yields an
    /// empty session rather than an error.
    pub fn open(config: MonitorConfig) -> anyhow::Result<Self> {
        kin_reliability::validate(&config.scoring)?;

        let cache = DatasetCache::new();
        let dataset = load_dataset(&cache, &config)?;
        let mut session = Self {
            config,
            cache,
            dataset: Arc::new(Dataset::empty()),
            scored: Vec::new(),
            doc_ids: HashSet::new(),
            navigator: Navigator::new(),
            query: String::new(),
            category: None,
        };
        session.install(dataset);
        Ok(session)
    }

    /// Re-read the source. Returns true when the content changed.
    pub fn reload(&mut self) -> anyhow::Result<bool> {
        let dataset = load_dataset(&self.cache, &self.config)?;
        if Arc::ptr_eq(&dataset, &self.dataset) {
            return Ok(false);
        }
        self.install(dataset);
        let doc_ids = &self.doc_ids;
        self.navigator.retain_known(|d| doc_ids.contains(d));
        Ok(true)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn records(&self) -> &[QaRecord] {
        &self.dataset.records
    }

    pub fn scored(&self) -> &[ScoredAnswer] {
        &self.scored
    }

    pub fn knows(&self, doc_id: &str) -> bool {
        self.doc_ids.contains(doc_id)
    }

    /// Apply a navigation action against the loaded questions.
    pub fn navigate(&mut self, action: NavAction) -> Result<&Page, NavError> {
        let doc_ids = &self.doc_ids;
        self.navigator.apply(action, |d| doc_ids.contains(d))
    }

    pub fn track(&mut self, doc_id: &str) -> Result<bool, NavError> {
        let doc_ids = &self.doc_ids;
        self.navigator.track(doc_id, |d| doc_ids.contains(d))
    }

    fn install(&mut self, dataset: Arc<Dataset>) {
        self.scored = kin_reliability::score_all(&dataset.records, &self.config.scoring);
        self.doc_ids = dataset.records.iter().map(|r| r.doc_id.clone()).collect();
        info!(
            records = dataset.len(),
            questions = self.doc_ids.len(),
            warnings = dataset.warnings.len(),
            "dataset ready"
        );
        self.dataset = dataset;
    }
}

fn load_dataset(cache: &DatasetCache, config: &MonitorConfig) -> Result<Arc<Dataset>, StoreError> {
    match cache.get_or_load(&config.data_path, &config.load) {
        Err(StoreError::DataUnavailable(path)) => {
            warn!(path = %path.display(), "no data available, showing empty dashboard");
            Ok(Arc::new(Dataset::empty()))
        }
        other => other,
    }
}
