use crate::compare::ComparisonTable;
use crate::error::MolscopeError;
use crate::metadata::ProteinMetadata;

/// Field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvDelimiter {
    /// `,`
    #[default]
    Comma,
    /// `;`
    Semicolon,
    /// `\t`
    Tab,
}

impl CsvDelimiter {
    /// The separator character.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::Tab => '\t',
        }
    }

    /// The separator as the single byte the CSV writer takes.
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Semicolon => b';',
            Self::Tab => b'\t',
        }
    }

    /// Parse `","`, `";"`, `"\t"` or the names `comma`, `semicolon`, `tab`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "," | "comma" => Some(Self::Comma),
            ";" | "semicolon" => Some(Self::Semicolon),
            "\t" | "\\t" | "tab" => Some(Self::Tab),
            _ => None,
        }
    }
}

/// CSV output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Emit the `Property,{idA},{idB}` header row.
    pub include_headers: bool,
    /// Field separator.
    pub delimiter: CsvDelimiter,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            include_headers: true,
            delimiter: CsvDelimiter::Comma,
        }
    }
}

/// Comparison of `a` and `b` as CSV text. Cells are quoted only when they
/// contain the delimiter, a quote or a line break. Rows are joined with
/// `\n` and carry no trailing newline.
///
/// # Errors
///
/// [`MolscopeError::Export`] when the writer fails to encode a row.
pub fn comparison_to_csv(
    a: &ProteinMetadata,
    b: &ProteinMetadata,
    options: CsvOptions,
) -> Result<String, MolscopeError> {
    let table = ComparisonTable::new(a, b);
    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .has_headers(false)
        .quote_style(::csv::QuoteStyle::Necessary)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if options.include_headers {
        writer
            .write_record(["Property", table.id_a.as_str(), table.id_b.as_str()])
            .map_err(export_error)?;
    }
    for row in &table.rows {
        writer
            .write_record([row.property, row.value_a.as_str(), row.value_b.as_str()])
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MolscopeError::Export(format!("csv: {}", e.error())))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| MolscopeError::Export(format!("csv: {e}")))?;
    if text.ends_with('\n') {
        let _ = text.pop();
    }
    Ok(text)
}

fn export_error(e: ::csv::Error) -> MolscopeError {
    MolscopeError::Export(format!("csv: {e}"))
}

/// `comparison-{A}-{B}.csv`.
#[must_use]
pub fn default_comparison_filename(
    a: &ProteinMetadata,
    b: &ProteinMetadata,
) -> String {
    format!("comparison-{}-{}.csv", a.structure_id, b.structure_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::fixtures::{crambin, hemoglobin};

    #[test]
    fn header_and_rows() {
        let csv = comparison_to_csv(&crambin(), &hemoglobin(), CsvOptions::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Property,1CRN,1A3N");
        assert_eq!(lines[1], "Title,Crambin,DEOXY HUMAN HEMOGLOBIN");
        assert!(lines[2].starts_with("Molecular Weight (kDa),4.73,"));
        assert!(lines[6].starts_with("Resolution (Å),0.94,"));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn headers_can_be_omitted() {
        let options = CsvOptions {
            include_headers: false,
            ..CsvOptions::default()
        };
        let csv = comparison_to_csv(&crambin(), &hemoglobin(), options).unwrap();
        assert_eq!(csv.lines().count(), 9);
        assert!(csv.starts_with("Title,"));
    }

    #[test]
    fn cells_with_delimiter_or_quote_are_quoted() {
        let mut a = crambin();
        a.title = "Crambin, \"plant\" seed protein".into();
        let csv = comparison_to_csv(&a, &hemoglobin(), CsvOptions::default()).unwrap();
        let title = csv.lines().nth(1).unwrap();
        assert_eq!(
            title,
            "Title,\"Crambin, \"\"plant\"\" seed protein\",DEOXY HUMAN HEMOGLOBIN"
        );
    }

    #[test]
    fn semicolon_delimiter_only_quotes_semicolons() {
        let mut a = crambin();
        a.title = "a,b;c".into();
        let options = CsvOptions {
            delimiter: CsvDelimiter::Semicolon,
            ..CsvOptions::default()
        };
        let csv = comparison_to_csv(&a, &hemoglobin(), options).unwrap();
        assert_eq!(csv.lines().next(), Some("Property;1CRN;1A3N"));
        assert!(csv.contains("Title;\"a,b;c\";"));
    }

    #[test]
    fn tab_delimiter_and_newline_quoting() {
        let mut a = crambin();
        a.organism = "line one\nline two".into();
        let options = CsvOptions {
            delimiter: CsvDelimiter::Tab,
            ..CsvOptions::default()
        };
        let csv = comparison_to_csv(&a, &hemoglobin(), options).unwrap();
        assert!(csv.contains("Organism\t\"line one\nline two\"\tHomo sapiens"));
    }

    #[test]
    fn carriage_return_and_empty_cells() {
        let mut a = crambin();
        a.title = "first\r\nsecond".into();
        a.organism = String::new();
        let csv = comparison_to_csv(&a, &hemoglobin(), CsvOptions::default()).unwrap();
        assert!(csv.contains("Title,\"first\r\nsecond\",DEOXY HUMAN HEMOGLOBIN"));
        assert!(csv.contains("\nOrganism,,Homo sapiens"));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn delimiter_parsing_and_filename() {
        assert_eq!(CsvDelimiter::parse("tab"), Some(CsvDelimiter::Tab));
        assert_eq!(CsvDelimiter::parse(";"), Some(CsvDelimiter::Semicolon));
        assert_eq!(CsvDelimiter::parse("|"), None);
        assert_eq!(CsvDelimiter::Tab.as_byte(), b'\t');
        assert_eq!(
            default_comparison_filename(&crambin(), &hemoglobin()),
            "comparison-1CRN-1A3N.csv"
        );
    }
}
