//! Descriptive, non-geometric attributes of a deposited structure.

use serde::{Deserialize, Serialize};

/// Descriptive record for one structure, as reported by the repository.
///
/// Immutable once fetched. Serialized in camelCase so cached records match
/// the field names used by the RCSB-facing tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinMetadata {
    /// Structure identifier (uppercased, e.g. `"1CRN"`).
    pub structure_id: String,
    /// Deposited title.
    pub title: String,
    /// Experimental method (e.g. `"X-RAY DIFFRACTION"`).
    pub experimental_method: String,
    /// Resolution in Ångströms, absent for methods that do not report one.
    pub resolution: Option<f64>,
    /// Source organism scientific name.
    pub organism: String,
    /// Initial release date as reported (`YYYY-MM-DD...`).
    pub release_date: String,
    /// Molecular weight in daltons.
    pub molecular_weight: f64,
    /// Number of deposited atoms.
    pub atom_count: u64,
    /// Number of deposited polymer residues.
    pub residue_count: u64,
    /// Number of polymer chains.
    pub chain_count: u64,
}
