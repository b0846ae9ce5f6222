use crate::error::MolscopeError;
use crate::metadata::ProteinMetadata;

/// A cached raw structure file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureFileEntry {
    /// Normalized (uppercased) structure identifier.
    pub key: String,
    /// Raw structure text, handed to the renderer untouched.
    pub data: String,
    /// Payload size in bytes.
    pub size: u64,
    /// Creation time in epoch milliseconds.
    pub timestamp: u64,
}

/// Bookkeeping view of a file entry used by the eviction sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntryInfo {
    /// Normalized structure identifier.
    pub key: String,
    /// Payload size in bytes.
    pub size: u64,
    /// Creation time in epoch milliseconds.
    pub timestamp: u64,
    /// Store-assigned write sequence; breaks timestamp ties.
    pub sequence: u64,
}

/// A cached metadata record.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    /// Normalized structure identifier.
    pub key: String,
    /// The cached record.
    pub data: ProteinMetadata,
    /// Creation time in epoch milliseconds.
    pub timestamp: u64,
}

/// Storage backend for [`StructureCache`](super::StructureCache).
///
/// Two keyed collections: structure files and metadata. Implementations do
/// no policy work (expiry, eviction, key normalization); they report
/// failures and leave absorbing them to the cache. Each `put_file` must
/// assign a sequence strictly greater than every earlier one so eviction
/// order is deterministic.
pub trait CacheStore: Send {
    /// Look up a structure file.
    fn get_file(
        &self,
        key: &str,
    ) -> Result<Option<StructureFileEntry>, MolscopeError>;

    /// Insert or replace a structure file.
    fn put_file(&mut self, entry: StructureFileEntry)
        -> Result<(), MolscopeError>;

    /// Remove a structure file. Missing keys are not an error.
    fn delete_file(&mut self, key: &str) -> Result<(), MolscopeError>;

    /// Every structure file's bookkeeping data, in no particular order.
    fn list_files(&self) -> Result<Vec<FileEntryInfo>, MolscopeError>;

    /// Look up a metadata record.
    fn get_metadata(
        &self,
        key: &str,
    ) -> Result<Option<MetadataEntry>, MolscopeError>;

    /// Insert or replace a metadata record.
    fn put_metadata(&mut self, entry: MetadataEntry)
        -> Result<(), MolscopeError>;

    /// Remove a metadata record. Missing keys are not an error.
    fn delete_metadata(&mut self, key: &str) -> Result<(), MolscopeError>;

    /// Number of metadata records.
    fn metadata_count(&self) -> Result<usize, MolscopeError>;

    /// Empty both collections.
    fn clear(&mut self) -> Result<(), MolscopeError>;
}
