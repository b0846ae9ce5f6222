//! Remote structure repository access.
//!
//! [`StructureRepository`] is the seam the fetch orchestrator talks to;
//! `RcsbClient` (feature `net`) implements it against the public RCSB PDB
//! services. The JSON mapping in [`metadata_from_json`] is pure so it can
//! be exercised without a network.

mod rcsb;

#[cfg(feature = "net")]
pub use rcsb::RcsbClient;
pub use rcsb::{metadata_from_json, metadata_url, structure_file_url};

use crate::error::MolscopeError;
use crate::metadata::ProteinMetadata;

/// Source of structure files and metadata records.
///
/// Implementations are shared across fetch worker threads, so they must be
/// `Send + Sync`. Both operations take the identifier as typed by the user;
/// implementations normalize it.
pub trait StructureRepository: Send + Sync {
    /// Raw structure file text (PDB format).
    fn fetch_structure_file(&self, id: &str) -> Result<String, MolscopeError>;

    /// Descriptive record for `id`.
    fn fetch_metadata(&self, id: &str) -> Result<ProteinMetadata, MolscopeError>;
}
