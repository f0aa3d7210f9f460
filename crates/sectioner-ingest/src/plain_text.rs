//! Backend for pre-extracted text dumps.
//!
//! `pdftotext` and similar tools write one page per form-feed separated
//! chunk. Reading those files through [`PdfBackend`] lets the same driver
//! section them without MuPDF.

use std::path::Path;

use sectioner_core::{BackendError, PageText, PdfBackend};
use sectioner_parsing::text_processing::split_pages;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextBackend;

impl PdfBackend for PlainTextBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, BackendError> {
        let bytes = std::fs::read(path)
            .map_err(|e| BackendError::OpenError(format!("{}: {}", path.display(), e)))?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(split_pages(&text)
            .into_iter()
            .map(|page| PageText::Text(page.to_string()))
            .collect())
    }

    fn validate(&self, path: &Path) -> Result<(), BackendError> {
        let meta = std::fs::metadata(path)
            .map_err(|e| BackendError::OpenError(format!("{}: {}", path.display(), e)))?;
        if !meta.is_file() {
            return Err(BackendError::OpenError(format!(
                "{}: not a regular file",
                path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectioner_parsing::SectionExtractor;

    fn pages_of(content: &str) -> Vec<PageText> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        std::fs::write(&path, content).unwrap();
        PlainTextBackend.extract_pages(&path).unwrap()
    }

    fn text(s: &str) -> PageText {
        PageText::Text(s.to_string())
    }

    #[test]
    fn test_form_feed_pages() {
        assert_eq!(
            pages_of("one\ntwo\u{000C}three\u{000C}"),
            vec![text("one\ntwo"), text("three")]
        );
    }

    #[test]
    fn test_single_page_without_form_feed() {
        assert_eq!(pages_of("just one page\n"), vec![text("just one page\n")]);
    }

    #[test]
    fn test_empty_file_has_no_pages() {
        assert!(pages_of("").is_empty());
    }

    #[test]
    fn test_page_count_matches_in_memory_text_split() {
        let ext = SectionExtractor::new();
        for content in ["", "\u{000C}", "a\u{000C}b", "a\u{000C}\u{000C}c\u{000C}"] {
            assert_eq!(
                pages_of(content).len(),
                ext.sections_from_text("dump.txt", content).stats.pages_total,
                "page count differs for {:?}",
                content
            );
        }
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = PlainTextBackend.extract_pages(&path).unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
        assert!(PlainTextBackend.validate(&path).is_err());
        assert!(PlainTextBackend.validate(dir.path()).is_err());
    }
}
