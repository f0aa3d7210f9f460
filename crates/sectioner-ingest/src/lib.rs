use std::path::Path;

use thiserror::Error;

use sectioner_core::PdfBackend;
use sectioner_core::config_file::BackendConfig;
use sectioner_parsing::SectionExtractor;

pub mod plain_text;

// Re-export domain types for convenience
pub use plain_text::PlainTextBackend;
pub use sectioner_core::{ExtractionResult, ExtractionStats, SectionRecord};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("sectioning error: {0}")]
    Parsing(#[from] sectioner_parsing::ParsingError),
    #[error("validation failed: {0}")]
    Backend(#[from] sectioner_core::BackendError),
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of sectioner-ingest)")]
    NoPdfSupport,
}

/// Input formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Form-feed paginated text dump.
    PlainText,
    Pdf,
}

impl InputKind {
    /// `.txt` → plain text; anything else is treated as a PDF.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "txt" => InputKind::PlainText,
            _ => InputKind::Pdf,
        }
    }
}

/// Section a PDF or text dump.
///
/// Dispatches on file extension:
/// - `.txt` → [`PlainTextBackend`]
/// - anything else → MuPDF (requires `pdf` feature)
pub fn extract_sections(
    path: &Path,
    extractor: &SectionExtractor,
    backend_config: &BackendConfig,
) -> Result<ExtractionResult, IngestError> {
    let kind = InputKind::from_path(path);
    tracing::debug!(path = %path.display(), ?kind, "dispatching input");
    with_backend(kind, backend_config, |backend| {
        extractor
            .extract_sections(path, backend)
            .map_err(IngestError::Parsing)
    })
}

/// Check that the input can be opened by the backend its extension selects.
pub fn validate(path: &Path, backend_config: &BackendConfig) -> Result<(), IngestError> {
    with_backend(InputKind::from_path(path), backend_config, |backend| {
        backend.validate(path).map_err(IngestError::Backend)
    })
}

fn with_backend<T>(
    kind: InputKind,
    backend_config: &BackendConfig,
    f: impl FnOnce(&dyn PdfBackend) -> Result<T, IngestError>,
) -> Result<T, IngestError> {
    match kind {
        InputKind::PlainText => f(&PlainTextBackend),
        InputKind::Pdf => with_pdf_backend(backend_config, f),
    }
}

#[cfg(feature = "pdf")]
fn with_pdf_backend<T>(
    backend_config: &BackendConfig,
    f: impl FnOnce(&dyn PdfBackend) -> Result<T, IngestError>,
) -> Result<T, IngestError> {
    let backend = sectioner_pdf_mupdf::MupdfBackend::from_config(backend_config);
    f(&backend)
}

#[cfg(not(feature = "pdf"))]
fn with_pdf_backend<T>(
    _backend_config: &BackendConfig,
    _f: impl FnOnce(&dyn PdfBackend) -> Result<T, IngestError>,
) -> Result<T, IngestError> {
    Err(IngestError::NoPdfSupport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind_from_extension() {
        assert_eq!(InputKind::from_path(Path::new("a.txt")), InputKind::PlainText);
        assert_eq!(InputKind::from_path(Path::new("A.TXT")), InputKind::PlainText);
        assert_eq!(InputKind::from_path(Path::new("a.pdf")), InputKind::Pdf);
        assert_eq!(InputKind::from_path(Path::new("noext")), InputKind::Pdf);
    }

    #[test]
    fn test_text_dump_is_sectioned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        std::fs::write(
            &path,
            "1. Cover\nwe pay for hospital stays\u{000C}2. Exclusions\ncosmetic surgery\n",
        )
        .unwrap();

        let result =
            extract_sections(&path, &SectionExtractor::new(), &BackendConfig::default()).unwrap();
        let summary: Vec<_> = result
            .sections
            .iter()
            .map(|s| (s.page_number, s.title.as_str(), s.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "1. Cover", "we pay for hospital stays"),
                (2, "2. Exclusions", "cosmetic surgery"),
            ]
        );
        assert_eq!(result.sections[0].source, path.to_string_lossy());
    }

    #[test]
    fn test_missing_text_dump_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        let err = extract_sections(&path, &SectionExtractor::new(), &BackendConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Parsing(sectioner_parsing::ParsingError::Backend(_))
        ));
        assert!(validate(&path, &BackendConfig::default()).is_err());
    }
}
