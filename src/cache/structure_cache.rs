use std::sync::{Arc, Mutex, MutexGuard};

use super::clock::{Clock, SystemClock};
use super::store::{
    CacheStore, FileEntryInfo, MetadataEntry, StructureFileEntry,
};
use crate::error::MolscopeError;
use crate::metadata::ProteinMetadata;
use crate::options::CacheOptions;

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cached structure files.
    pub file_count: usize,
    /// Number of cached metadata records.
    pub metadata_count: usize,
    /// Total structure-file bytes.
    pub total_bytes: u64,
}

/// Age- and size-bounded cache of structure files and metadata.
///
/// Wraps a [`CacheStore`] behind one mutex, so every operation (including
/// the post-write eviction sweep) sees a consistent snapshot. Storage
/// failures never escape: reads degrade to misses and writes become
/// no-ops, each logged at `warn`.
pub struct StructureCache {
    store: Mutex<Box<dyn CacheStore>>,
    clock: Arc<dyn Clock>,
    options: CacheOptions,
}

/// Normalize an identifier into a cache key.
#[must_use]
pub fn cache_key(id: &str) -> String {
    id.trim().to_uppercase()
}

impl StructureCache {
    /// Cache over `store` using the system clock.
    #[must_use]
    pub fn new(store: Box<dyn CacheStore>, options: CacheOptions) -> Self {
        Self::with_clock(store, options, Arc::new(SystemClock))
    }

    /// Cache over `store` with an explicit clock.
    #[must_use]
    pub fn with_clock(
        store: Box<dyn CacheStore>,
        options: CacheOptions,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
            options,
        }
    }

    /// Limits this cache enforces.
    #[must_use]
    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, Box<dyn CacheStore>>, MolscopeError> {
        self.store
            .lock()
            .map_err(|_| MolscopeError::Cache("cache lock poisoned".into()))
    }

    fn is_expired(&self, timestamp: u64) -> bool {
        self.clock.now_millis().saturating_sub(timestamp)
            > self.options.max_age_millis()
    }

    /// Cached structure text for `id`, or `None` if absent, expired or
    /// unreadable. Expired entries are deleted.
    pub fn get_structure_file(&self, id: &str) -> Option<String> {
        let key = cache_key(id);
        absorb("read structure file", &key, || {
            let mut store = self.lock()?;
            let Some(entry) = store.get_file(&key)? else {
                return Ok(None);
            };
            if self.is_expired(entry.timestamp) {
                log::debug!("structure file {key} expired");
                store.delete_file(&key)?;
                return Ok(None);
            }
            log::debug!("structure file {key} served from cache");
            Ok(Some(entry.data))
        })
        .flatten()
    }

    /// Store structure text for `id`, then run the eviction sweep.
    pub fn set_structure_file(&self, id: &str, data: &str) {
        let key = cache_key(id);
        let _ = absorb("write structure file", &key, || {
            let mut store = self.lock()?;
            store.put_file(StructureFileEntry {
                key: key.clone(),
                data: data.to_owned(),
                size: data.len() as u64,
                timestamp: self.clock.now_millis(),
            })?;
            self.evict(&mut **store)
        });
    }

    /// Cached metadata for `id`, with the same expiry rules as files.
    pub fn get_metadata(&self, id: &str) -> Option<ProteinMetadata> {
        let key = cache_key(id);
        absorb("read metadata", &key, || {
            let mut store = self.lock()?;
            let Some(entry) = store.get_metadata(&key)? else {
                return Ok(None);
            };
            if self.is_expired(entry.timestamp) {
                log::debug!("metadata {key} expired");
                store.delete_metadata(&key)?;
                return Ok(None);
            }
            Ok(Some(entry.data))
        })
        .flatten()
    }

    /// Store metadata for `id`. Metadata does not count toward the caps.
    pub fn set_metadata(&self, id: &str, data: &ProteinMetadata) {
        let key = cache_key(id);
        let _ = absorb("write metadata", &key, || {
            self.lock()?.put_metadata(MetadataEntry {
                key: key.clone(),
                data: data.clone(),
                timestamp: self.clock.now_millis(),
            })
        });
    }

    /// Remove the structure file for `id`, if any.
    pub fn delete_structure_file(&self, id: &str) {
        let key = cache_key(id);
        let _ = absorb("delete structure file", &key, || {
            self.lock()?.delete_file(&key)
        });
    }

    /// Remove the metadata for `id`, if any.
    pub fn delete_metadata(&self, id: &str) {
        let key = cache_key(id);
        let _ = absorb("delete metadata", &key, || {
            self.lock()?.delete_metadata(&key)
        });
    }

    /// Empty both collections.
    pub fn clear_all(&self) {
        let _ = absorb("clear", "*", || self.lock()?.clear());
    }

    /// Current occupancy; zeroed if the store cannot be read.
    pub fn stats(&self) -> CacheStats {
        absorb("read stats", "*", || {
            let store = self.lock()?;
            let files = store.list_files()?;
            Ok(CacheStats {
                file_count: files.len(),
                metadata_count: store.metadata_count()?,
                total_bytes: files.iter().map(|f| f.size).sum(),
            })
        })
        .unwrap_or_default()
    }

    /// Enforce the entry-count cap, then the byte cap, evicting the oldest
    /// file (and its metadata) first.
    fn evict(&self, store: &mut dyn CacheStore) -> Result<(), MolscopeError> {
        let mut files = store.list_files()?;
        files.sort_by_key(|f| (f.timestamp, f.sequence));

        let over_count = files.len().saturating_sub(self.options.max_entries);
        let (evicted, kept) = files.split_at(over_count);
        for entry in evicted {
            remove_pair(store, entry, "entry cap")?;
        }

        let mut total: u64 = kept.iter().map(|f| f.size).sum();
        for entry in kept {
            if total <= self.options.max_bytes {
                break;
            }
            remove_pair(store, entry, "size cap")?;
            total -= entry.size;
        }
        Ok(())
    }
}

fn remove_pair(
    store: &mut dyn CacheStore,
    entry: &FileEntryInfo,
    reason: &str,
) -> Result<(), MolscopeError> {
    log::debug!(
        "evicting {} ({} bytes) to satisfy {reason}",
        entry.key,
        entry.size
    );
    store.delete_file(&entry.key)?;
    store.delete_metadata(&entry.key)
}

/// Run a store operation, logging and discarding any failure.
fn absorb<T>(
    what: &str,
    key: &str,
    op: impl FnOnce() -> Result<T, MolscopeError>,
) -> Option<T> {
    match op() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("structure cache: failed to {what} ({key}): {e}");
            None
        }
    }
}
