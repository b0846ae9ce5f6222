use std::path::Path;

use crate::error::MolscopeError;
use crate::visualization::MolecularRenderer;

/// Write the renderer's current frame to `path` as PNG.
///
/// # Errors
///
/// [`MolscopeError::Export`] when the renderer produces no image, or the
/// renderer's own error; [`MolscopeError::Io`] when the file cannot be
/// written.
pub fn export_viewer_image<R: MolecularRenderer + ?Sized>(
    renderer: &mut R,
    path: &Path,
) -> Result<(), MolscopeError> {
    let png = renderer.png_snapshot()?;
    if png.is_empty() {
        return Err(MolscopeError::Export(
            "failed to generate PNG from viewer".into(),
        ));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &png)?;
    log::info!("exported {} bytes to {}", png.len(), path.display());
    Ok(())
}

/// `{ID}[_{style}]_{date}.png`, the identifier uppercased.
#[must_use]
pub fn generate_protein_filename(
    id: &str,
    style: Option<&str>,
    date: &str,
) -> String {
    let id = id.trim().to_uppercase();
    match style.filter(|s| !s.is_empty()) {
        Some(style) => format!("{id}_{style}_{date}.png"),
        None => format!("{id}_{date}.png"),
    }
}

/// Today's date in UTC as `YYYY-MM-DD`.
#[must_use]
pub fn today_utc() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualization::recording::RecordingRenderer;

    #[test]
    fn filename_with_and_without_style() {
        assert_eq!(
            generate_protein_filename("1crn", Some("cartoon"), "2024-03-09"),
            "1CRN_cartoon_2024-03-09.png"
        );
        assert_eq!(
            generate_protein_filename("4ins", None, "2024-03-09"),
            "4INS_2024-03-09.png"
        );
        assert_eq!(
            generate_protein_filename("4ins", Some(""), "2024-03-09"),
            "4INS_2024-03-09.png"
        );
    }

    #[test]
    fn today_is_a_calendar_date() {
        let today = today_utc();
        assert_eq!(today.len(), 10);
        assert_eq!(today.as_bytes()[4], b'-');
        assert_eq!(today.as_bytes()[7], b'-');
        let parsed = chrono::NaiveDate::parse_from_str(&today, "%Y-%m-%d").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), today);
        let name = generate_protein_filename("1crn", None, &today);
        assert_eq!(name, format!("1CRN_{today}.png"));
    }

    #[test]
    fn empty_snapshot_is_export_error() {
        let mut renderer = RecordingRenderer::default();
        let path = std::env::temp_dir().join("molscope-empty.png");
        let err = export_viewer_image(&mut renderer, &path).unwrap_err();
        assert!(matches!(err, MolscopeError::Export(_)));
        assert!(!path.exists());
    }

    #[test]
    fn snapshot_written_to_disk() {
        let mut renderer = RecordingRenderer {
            png: vec![0x89, b'P', b'N', b'G'],
            ..RecordingRenderer::default()
        };
        let dir = std::env::temp_dir()
            .join(format!("molscope-export-{}", std::process::id()));
        let path = dir.join("1CRN_2024-01-01.png");
        export_viewer_image(&mut renderer, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
