//! SQLite-backed [`CacheStore`] living in the platform cache directory.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use super::store::{
    CacheStore, FileEntryInfo, MetadataEntry, StructureFileEntry,
};
use crate::error::MolscopeError;
use crate::metadata::ProteinMetadata;

/// Database name; the file is `{DB_NAME}.sqlite3`.
pub const DB_NAME: &str = "molscope-cache";

/// Schema version stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS structure_files (
        structure_id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        size INTEGER NOT NULL,
        timestamp INTEGER NOT NULL,
        sequence INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS metadata (
        structure_id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        timestamp INTEGER NOT NULL
    );
";

/// Persistent store with two tables, `structure_files` and `metadata`.
///
/// Opening runs the schema setup; dropping closes the connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Default database location under the platform cache directory, or
    /// `None` when no home directory can be resolved.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "molscope", "molscope")
            .map(|dirs| dirs.cache_dir().join(format!("{DB_NAME}.sqlite3")))
    }

    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, MolscopeError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    MolscopeError::Cache(format!(
                        "failed to create cache directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        let conn = Connection::open(path)?;
        log::debug!("opened structure cache at {}", path.display());
        Self::with_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, MolscopeError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, MolscopeError> {
        let version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        if version > SCHEMA_VERSION {
            return Err(MolscopeError::Cache(format!(
                "cache schema version {version} is newer than supported \
                 version {SCHEMA_VERSION}"
            )));
        }
        conn.execute_batch(CREATE_TABLES)?;
        if version < SCHEMA_VERSION {
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }
        Ok(Self { conn })
    }

    fn next_sequence(&self) -> Result<i64, MolscopeError> {
        let max: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(sequence), 0) FROM structure_files",
            [],
            |row| row.get(0),
        )?;
        Ok(max + 1)
    }
}

impl CacheStore for SqliteStore {
    fn get_file(
        &self,
        key: &str,
    ) -> Result<Option<StructureFileEntry>, MolscopeError> {
        let entry = self
            .conn
            .query_row(
                "SELECT data, size, timestamp FROM structure_files \
                 WHERE structure_id = ?1",
                params![key],
                |row| {
                    Ok(StructureFileEntry {
                        key: key.to_owned(),
                        data: row.get(0)?,
                        size: row.get::<_, i64>(1)? as u64,
                        timestamp: row.get::<_, i64>(2)? as u64,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    fn put_file(
        &mut self,
        entry: StructureFileEntry,
    ) -> Result<(), MolscopeError> {
        let sequence = self.next_sequence()?;
        let _ = self.conn.execute(
            "INSERT OR REPLACE INTO structure_files \
             (structure_id, data, size, timestamp, sequence) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.key,
                entry.data,
                entry.size as i64,
                entry.timestamp as i64,
                sequence
            ],
        )?;
        Ok(())
    }

    fn delete_file(&mut self, key: &str) -> Result<(), MolscopeError> {
        let _ = self.conn.execute(
            "DELETE FROM structure_files WHERE structure_id = ?1",
            params![key],
        )?;
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<FileEntryInfo>, MolscopeError> {
        let mut stmt = self.conn.prepare(
            "SELECT structure_id, size, timestamp, sequence \
             FROM structure_files",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(FileEntryInfo {
                key: row.get(0)?,
                size: row.get::<_, i64>(1)? as u64,
                timestamp: row.get::<_, i64>(2)? as u64,
                sequence: row.get::<_, i64>(3)? as u64,
            })
        })?;
        let mut infos = Vec::new();
        for info in rows {
            infos.push(info?);
        }
        Ok(infos)
    }

    fn get_metadata(
        &self,
        key: &str,
    ) -> Result<Option<MetadataEntry>, MolscopeError> {
        let row: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT data, timestamp FROM metadata WHERE structure_id = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((json, timestamp)) = row else {
            return Ok(None);
        };
        let data: ProteinMetadata =
            serde_json::from_str(&json).map_err(|e| {
                MolscopeError::Cache(format!(
                    "malformed metadata record for {key}: {e}"
                ))
            })?;
        Ok(Some(MetadataEntry {
            key: key.to_owned(),
            data,
            timestamp: timestamp as u64,
        }))
    }

    fn put_metadata(
        &mut self,
        entry: MetadataEntry,
    ) -> Result<(), MolscopeError> {
        let json = serde_json::to_string(&entry.data).map_err(|e| {
            MolscopeError::Cache(format!("failed to encode metadata: {e}"))
        })?;
        let _ = self.conn.execute(
            "INSERT OR REPLACE INTO metadata (structure_id, data, timestamp) \
             VALUES (?1, ?2, ?3)",
            params![entry.key, json, entry.timestamp as i64],
        )?;
        Ok(())
    }

    fn delete_metadata(&mut self, key: &str) -> Result<(), MolscopeError> {
        let _ = self.conn.execute(
            "DELETE FROM metadata WHERE structure_id = ?1",
            params![key],
        )?;
        Ok(())
    }

    fn metadata_count(&self) -> Result<usize, MolscopeError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM metadata", [], |row| {
                    row.get(0)
                })?;
        Ok(count as usize)
    }

    fn clear(&mut self) -> Result<(), MolscopeError> {
        self.conn
            .execute_batch("DELETE FROM structure_files; DELETE FROM metadata;")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::fixtures::crambin;

    fn file(key: &str, timestamp: u64) -> StructureFileEntry {
        StructureFileEntry {
            key: key.into(),
            data: format!("ATOM      1  N   THR A   1  {key}"),
            size: 34,
            timestamp,
        }
    }

    #[test]
    fn file_round_trip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.put_file(file("1CRN", 42)).unwrap();
        let entry = store.get_file("1CRN").unwrap().unwrap();
        assert_eq!(entry, file("1CRN", 42));
        assert!(store.get_file("2XYZ").unwrap().is_none());
    }

    #[test]
    fn metadata_round_trip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .put_metadata(MetadataEntry {
                key: "1CRN".into(),
                data: crambin(),
                timestamp: 7,
            })
            .unwrap();
        let entry = store.get_metadata("1CRN").unwrap().unwrap();
        assert_eq!(entry.data, crambin());
        assert_eq!(entry.timestamp, 7);
        assert_eq!(store.metadata_count().unwrap(), 1);
    }

    #[test]
    fn replace_bumps_sequence() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.put_file(file("AAAA", 1)).unwrap();
        store.put_file(file("BBBB", 1)).unwrap();
        store.put_file(file("AAAA", 1)).unwrap();
        let mut infos = store.list_files().unwrap();
        infos.sort_by_key(|i| i.sequence);
        let keys: Vec<&str> = infos.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["BBBB", "AAAA"]);
    }

    #[test]
    fn clear_empties_both_tables() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.put_file(file("1CRN", 1)).unwrap();
        store
            .put_metadata(MetadataEntry {
                key: "1CRN".into(),
                data: crambin(),
                timestamp: 1,
            })
            .unwrap();
        store.clear().unwrap();
        assert!(store.list_files().unwrap().is_empty());
        assert_eq!(store.metadata_count().unwrap(), 0);
    }

    #[test]
    fn reopen_keeps_entries_and_schema_version() {
        let dir = std::env::temp_dir()
            .join(format!("molscope-sqlite-test-{}", std::process::id()));
        let path = dir.join("cache.sqlite3");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.put_file(file("4INS", 9)).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert!(store.get_file("4INS").unwrap().is_some());
        let version: i32 = store
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
        drop(store);
        let _ = std::fs::remove_dir_all(dir);
    }
}
