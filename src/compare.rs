//! Side-by-side comparison of two structures' metadata.

use crate::export::{format_molecular_weight_kda, format_resolution};
use crate::metadata::ProteinMetadata;

/// One property compared across both structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    /// Property label, e.g. `"Organism"`.
    pub property: &'static str,
    /// Formatted value for the first structure.
    pub value_a: String,
    /// Formatted value for the second structure.
    pub value_b: String,
}

impl ComparisonRow {
    fn new(
        property: &'static str,
        value_a: impl Into<String>,
        value_b: impl Into<String>,
    ) -> Self {
        Self {
            property,
            value_a: value_a.into(),
            value_b: value_b.into(),
        }
    }

    /// Both structures show the same value.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.value_a == self.value_b
    }
}

/// Formatted comparison of two metadata records, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    /// Identifier of the first structure.
    pub id_a: String,
    /// Identifier of the second structure.
    pub id_b: String,
    /// Property rows.
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Build the table for `a` versus `b`.
    #[must_use]
    pub fn new(a: &ProteinMetadata, b: &ProteinMetadata) -> Self {
        let rows = vec![
            ComparisonRow::new("Title", a.title.as_str(), b.title.as_str()),
            ComparisonRow::new(
                "Molecular Weight (kDa)",
                format_molecular_weight_kda(a.molecular_weight),
                format_molecular_weight_kda(b.molecular_weight),
            ),
            ComparisonRow::new(
                "Number of Chains",
                a.chain_count.to_string(),
                b.chain_count.to_string(),
            ),
            ComparisonRow::new(
                "Organism",
                a.organism.as_str(),
                b.organism.as_str(),
            ),
            ComparisonRow::new(
                "Experimental Method",
                a.experimental_method.as_str(),
                b.experimental_method.as_str(),
            ),
            ComparisonRow::new(
                "Resolution (Å)",
                format_resolution(a.resolution),
                format_resolution(b.resolution),
            ),
            ComparisonRow::new(
                "Number of Atoms",
                a.atom_count.to_string(),
                b.atom_count.to_string(),
            ),
            ComparisonRow::new(
                "Number of Residues",
                a.residue_count.to_string(),
                b.residue_count.to_string(),
            ),
            ComparisonRow::new(
                "Release Date",
                a.release_date.as_str(),
                b.release_date.as_str(),
            ),
        ];
        Self {
            id_a: a.structure_id.clone(),
            id_b: b.structure_id.clone(),
            rows,
        }
    }

    /// Rows whose values differ.
    pub fn differences(&self) -> impl Iterator<Item = &ComparisonRow> {
        self.rows.iter().filter(|r| !r.is_match())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::fixtures::{crambin, hemoglobin};

    #[test]
    fn rows_in_display_order() {
        let table = ComparisonTable::new(&crambin(), &hemoglobin());
        let labels: Vec<&str> = table.rows.iter().map(|r| r.property).collect();
        assert_eq!(
            labels,
            [
                "Title",
                "Molecular Weight (kDa)",
                "Number of Chains",
                "Organism",
                "Experimental Method",
                "Resolution (Å)",
                "Number of Atoms",
                "Number of Residues",
                "Release Date",
            ]
        );
        assert_eq!(table.id_a, "1CRN");
        assert_eq!(table.id_b, "1A3N");
        assert_eq!(table.rows[1].value_a, "4.73");
        assert_eq!(table.rows[5].value_a, "0.94");
    }

    #[test]
    fn matching_rows_are_not_differences() {
        let table = ComparisonTable::new(&crambin(), &hemoglobin());
        let method = &table.rows[4];
        assert!(method.is_match());
        assert!(table.differences().all(|r| r.property != "Experimental Method"));

        let same = ComparisonTable::new(&crambin(), &crambin());
        assert_eq!(same.differences().count(), 0);
    }
}
