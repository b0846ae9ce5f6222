use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Seven days.
const DEFAULT_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;
/// 50 MiB of structure-file payload.
const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;
const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Cache", inline)]
#[serde(default)]
/// Limits and location of the structure cache.
pub struct CacheOptions {
    /// Entries older than this are treated as absent.
    #[schemars(title = "Max Age (seconds)", range(min = 0))]
    pub max_age_secs: u64,
    /// Cap on total structure-file bytes.
    #[schemars(title = "Max Size (bytes)", range(min = 0))]
    pub max_bytes: u64,
    /// Cap on the number of cached structure files.
    #[schemars(title = "Max Entries", range(min = 0))]
    pub max_entries: usize,
    /// Database file; the platform cache directory when unset.
    #[schemars(skip)]
    pub database_path: Option<PathBuf>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_MAX_AGE_SECS,
            max_bytes: DEFAULT_MAX_BYTES,
            max_entries: DEFAULT_MAX_ENTRIES,
            database_path: None,
        }
    }
}

impl CacheOptions {
    /// Max age in milliseconds, the unit of cache timestamps.
    #[must_use]
    pub fn max_age_millis(&self) -> u64 {
        self.max_age_secs.saturating_mul(1000)
    }
}
