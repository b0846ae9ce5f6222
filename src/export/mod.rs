//! CSV, record and image export.
//!
//! Value formatting shared by the comparison table and CSV lives here so
//! both render numbers identically.

mod csv;
mod image;

pub use self::csv::{
    comparison_to_csv, default_comparison_filename, CsvDelimiter, CsvOptions,
};
pub use self::image::{
    export_viewer_image, generate_protein_filename, today_utc,
};
use crate::metadata::ProteinMetadata;

/// Daltons to kilodaltons, two decimals (`4730.0` → `"4.73"`).
#[must_use]
pub fn format_molecular_weight_kda(daltons: f64) -> String {
    format!("{:.2}", daltons / 1000.0)
}

/// Two decimals, or `"N/A"` when the method reports no resolution.
#[must_use]
pub fn format_resolution(resolution: Option<f64>) -> String {
    resolution.map_or_else(|| "N/A".to_owned(), |r| format!("{r:.2}"))
}

/// Labelled export record for one structure, in export order.
#[must_use]
pub fn format_metadata_for_export(
    metadata: &ProteinMetadata,
) -> Vec<(&'static str, String)> {
    vec![
        ("Structure ID", metadata.structure_id.clone()),
        ("Title", metadata.title.clone()),
        (
            "Molecular Weight (kDa)",
            format_molecular_weight_kda(metadata.molecular_weight),
        ),
        ("Number of Chains", metadata.chain_count.to_string()),
        ("Number of Atoms", metadata.atom_count.to_string()),
        ("Number of Residues", metadata.residue_count.to_string()),
        ("Organism", metadata.organism.clone()),
        ("Experimental Method", metadata.experimental_method.clone()),
        ("Resolution (Å)", format_resolution(metadata.resolution)),
        ("Release Date", metadata.release_date.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::fixtures::crambin;

    fn field<'a>(record: &'a [(&str, String)], name: &str) -> &'a str {
        record
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn export_record_fields() {
        let record = format_metadata_for_export(&crambin());
        assert_eq!(record.len(), 10);
        assert_eq!(field(&record, "Structure ID"), "1CRN");
        assert_eq!(field(&record, "Title"), "Crambin");
        assert_eq!(field(&record, "Molecular Weight (kDa)"), "4.73");
        assert_eq!(field(&record, "Number of Chains"), "1");
        assert_eq!(field(&record, "Organism"), "Crambe abyssinica");
        assert_eq!(field(&record, "Release Date"), "1981-01-01");
    }

    #[test]
    fn missing_resolution_is_na() {
        let mut m = crambin();
        m.resolution = None;
        let record = format_metadata_for_export(&m);
        assert_eq!(field(&record, "Resolution (Å)"), "N/A");
        assert_eq!(format_resolution(Some(2.0)), "2.00");
    }

    #[test]
    fn weight_in_kda() {
        assert_eq!(format_molecular_weight_kda(64_500.0), "64.50");
        assert_eq!(format_molecular_weight_kda(0.0), "0.00");
    }
}
