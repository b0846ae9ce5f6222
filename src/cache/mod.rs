//! Persistent, age- and size-bounded cache of structure files and metadata.
//!
//! [`StructureCache`] holds the policy (key normalization, expiry, eviction,
//! failure absorption) and delegates storage to a [`CacheStore`]:
//! [`MemoryStore`] for volatile use, or `SqliteStore` (feature `sqlite`)
//! for a database under the platform cache directory.

mod clock;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;
mod store;
mod structure_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteStore, DB_NAME, SCHEMA_VERSION};
pub use store::{CacheStore, FileEntryInfo, MetadataEntry, StructureFileEntry};
pub use structure_cache::{cache_key, CacheStats, StructureCache};
