//! Dataset cache: memoized loads keyed on source identity.
//!
//! cache_key = hash(canonical path, load config)
//! An entry is reused while the source length and mtime are unchanged, or,
//! when either moved, while the source content hash is unchanged.

use crate::loader::{parse_records, Dataset};
use crate::StoreError;
use kin_core::config::LoadConfig;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tracing::debug;

/// Identity of a source file at the time it was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub len: u64,
    pub modified: Option<SystemTime>,
    /// sha256 of the file content, hex encoded.
    pub content_hash: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Loads that replaced a stale entry.
    pub reloads: u64,
    /// Lookups that had to read and hash the file.
    pub content_reads: u64,
}

struct CacheEntry {
    fingerprint: SourceFingerprint,
    dataset: Arc<Dataset>,
}

/// Thread-safe memo of parsed datasets.
#[derive(Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    stats: Mutex<CacheStats>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `path`, parsing it only when the content
    /// changed since the last call with the same config. An unchanged
    /// length and mtime skip reading the file.
    pub fn get_or_load(&self, path: &Path, config: &LoadConfig) -> Result<Arc<Dataset>, StoreError> {
        let key = compute_cache_key(path, config);

        if !path.exists() {
            self.lock_entries()?.remove(&key);
            return Err(StoreError::DataUnavailable(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| StoreError::Io(format!("failed to stat {}: {e}", path.display())))?;
        let len = metadata.len();
        let modified = metadata.modified().ok();

        let mut entries = self.lock_entries()?;
        if let Some(entry) = entries.get(&key) {
            if modified.is_some() && entry.fingerprint.len == len && entry.fingerprint.modified == modified {
                self.bump(|s| s.hits += 1)?;
                debug!(path = %path.display(), "dataset cache hit (metadata)");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let bytes = std::fs::read(path)
            .map_err(|e| StoreError::Io(format!("failed to read {}: {e}", path.display())))?;
        self.bump(|s| s.content_reads += 1)?;
        let fingerprint = SourceFingerprint {
            len,
            modified,
            content_hash: hex::encode(Sha256::digest(&bytes)),
        };

        let stale = match entries.get_mut(&key) {
            Some(entry) if entry.fingerprint.content_hash == fingerprint.content_hash => {
                entry.fingerprint = fingerprint;
                self.bump(|s| s.hits += 1)?;
                debug!(path = %path.display(), "dataset cache hit (content)");
                return Ok(Arc::clone(&entry.dataset));
            }
            Some(_) => true,
            None => false,
        };

        let mut dataset = parse_records(bytes.as_slice(), config)?;
        dataset.source = Some(path.to_path_buf());
        let dataset = Arc::new(dataset);

        self.bump(|s| {
            s.misses += 1;
            if stale {
                s.reloads += 1;
            }
        })?;
        debug!(
            path = %path.display(),
            records = dataset.len(),
            stale,
            "dataset cache miss"
        );

        entries.insert(
            key,
            CacheEntry {
                fingerprint,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Fingerprint of the cached entry, if any.
    pub fn fingerprint(&self, path: &Path, config: &LoadConfig) -> Option<SourceFingerprint> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(&compute_cache_key(path, config))
            .map(|e| e.fingerprint.clone())
    }

    /// Drop every entry for `path`, whatever config it was loaded with.
    pub fn invalidate(&self, path: &Path) -> Result<usize, StoreError> {
        let mut entries = self.lock_entries()?;
        let prefix = path_identity(path);
        let before = entries.len();
        entries.retain(|_, entry| {
            entry
                .dataset
                .source
                .as_deref()
                .map(path_identity)
                .map_or(true, |p| p != prefix)
        });
        Ok(before - entries.len())
    }

    /// Clear all cache entries.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.lock_entries()?.clear();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.lock().map(|s| *s).unwrap_or_default()
    }

    fn lock_entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, CacheEntry>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Cache("Lock poisoned".into()))
    }

    fn bump(&self, f: impl FnOnce(&mut CacheStats)) -> Result<(), StoreError> {
        let mut stats = self
            .stats
            .lock()
            .map_err(|_| StoreError::Cache("Lock poisoned".into()))?;
        f(&mut stats);
        Ok(())
    }
}

fn path_identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Compute a cache key from the source path and load parameters.
pub fn compute_cache_key(path: &Path, config: &LoadConfig) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path_identity(path).to_string_lossy().as_bytes());
    hasher.update([0u8]);
    hasher.update(config.delimiter.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
