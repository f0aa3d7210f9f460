use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Text of a single page as produced by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    /// Plain extracted text; newlines delimit lines.
    Text(String),
    /// The page could not be read. Holds the backend's reason.
    Unreadable(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level, per-page text extraction step; the
/// sectioning pipeline (line classification, per-page accumulation) lives in
/// `sectioner_parsing::SectionExtractor`.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page, in page order.
    ///
    /// An `Err` means the document itself could not be opened. Failures on
    /// individual pages are reported as [`PageText::Unreadable`] entries so
    /// the caller decides whether to skip or abort.
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, BackendError>;

    /// Check that the file can be opened by this backend.
    fn validate(&self, path: &Path) -> Result<(), BackendError> {
        self.extract_pages(path).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBackend(Vec<PageText>);

    impl PdfBackend for FixedBackend {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<PageText>, BackendError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenBackend;

    impl PdfBackend for BrokenBackend {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<PageText>, BackendError> {
            Err(BackendError::OpenError("not a PDF".into()))
        }
    }

    #[test]
    fn test_default_validate_uses_extract_pages() {
        let ok = FixedBackend(vec![PageText::Text("hello".into())]);
        assert!(ok.validate(Path::new("a.pdf")).is_ok());

        let err = BrokenBackend.validate(Path::new("a.pdf")).unwrap_err();
        assert_eq!(err.to_string(), "failed to open PDF: not a PDF");
    }
}
