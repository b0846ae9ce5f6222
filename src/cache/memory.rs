use rustc_hash::FxHashMap;

use super::store::{
    CacheStore, FileEntryInfo, MetadataEntry, StructureFileEntry,
};
use crate::error::MolscopeError;

/// Volatile [`CacheStore`] backed by hash maps.
///
/// Used when no persistent store can be opened, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: FxHashMap<String, (StructureFileEntry, u64)>,
    metadata: FxHashMap<String, MetadataEntry>,
    next_sequence: u64,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get_file(
        &self,
        key: &str,
    ) -> Result<Option<StructureFileEntry>, MolscopeError> {
        Ok(self.files.get(key).map(|(entry, _)| entry.clone()))
    }

    fn put_file(
        &mut self,
        entry: StructureFileEntry,
    ) -> Result<(), MolscopeError> {
        self.next_sequence += 1;
        drop(
            self.files
                .insert(entry.key.clone(), (entry, self.next_sequence)),
        );
        Ok(())
    }

    fn delete_file(&mut self, key: &str) -> Result<(), MolscopeError> {
        drop(self.files.remove(key));
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<FileEntryInfo>, MolscopeError> {
        Ok(self
            .files
            .values()
            .map(|(entry, sequence)| FileEntryInfo {
                key: entry.key.clone(),
                size: entry.size,
                timestamp: entry.timestamp,
                sequence: *sequence,
            })
            .collect())
    }

    fn get_metadata(
        &self,
        key: &str,
    ) -> Result<Option<MetadataEntry>, MolscopeError> {
        Ok(self.metadata.get(key).cloned())
    }

    fn put_metadata(
        &mut self,
        entry: MetadataEntry,
    ) -> Result<(), MolscopeError> {
        drop(self.metadata.insert(entry.key.clone(), entry));
        Ok(())
    }

    fn delete_metadata(&mut self, key: &str) -> Result<(), MolscopeError> {
        drop(self.metadata.remove(key));
        Ok(())
    }

    fn metadata_count(&self) -> Result<usize, MolscopeError> {
        Ok(self.metadata.len())
    }

    fn clear(&mut self) -> Result<(), MolscopeError> {
        self.files.clear();
        self.metadata.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(key: &str, timestamp: u64) -> StructureFileEntry {
        StructureFileEntry {
            key: key.into(),
            data: format!("HEADER {key}"),
            size: 7 + key.len() as u64,
            timestamp,
        }
    }

    #[test]
    fn sequences_increase_across_overwrites() {
        let mut store = MemoryStore::new();
        store.put_file(file("1ABC", 5)).unwrap();
        store.put_file(file("2DEF", 5)).unwrap();
        store.put_file(file("1ABC", 5)).unwrap();

        let mut infos = store.list_files().unwrap();
        infos.sort_by_key(|i| i.sequence);
        let keys: Vec<&str> = infos.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["2DEF", "1ABC"]);
    }

    #[test]
    fn delete_missing_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.delete_file("NOPE").is_ok());
        assert!(store.delete_metadata("NOPE").is_ok());
    }
}
