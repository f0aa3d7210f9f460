use std::path::Path;

use mupdf::{Document, Page, TextPageFlags};

use sectioner_core::config_file::BackendConfig;
use sectioner_core::{BackendError, PageText, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the mupdf dependency (AGPL-3.0) so that the
/// classifier and accumulator do not transitively depend on it.
///
/// Each page's text is rebuilt from MuPDF's block/line structure with one
/// `\n` per line, matching what PyMuPDF's `get_text("text")` produces.
/// Header and footer bands can optionally be cut away by page height; both
/// are off by default because the junk classifier already handles most
/// running headers.
#[derive(Debug, Clone, Default)]
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    header_exclusion_ratio: Option<f32>,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend from the `[backend]` table of the config file.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new()
            .with_header_exclusion(config.header_exclusion.unwrap_or(0.0))
            .with_footer_exclusion(config.footer_exclusion.unwrap_or(0.0))
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    fn open(path: &Path) -> Result<Document, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;
        Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))
    }

    fn page_text(&self, page: &Page) -> Result<String, mupdf::Error> {
        let text_page = page.to_text_page(TextPageFlags::empty())?;

        let page_bounds = page.bounds()?;
        let page_height = page_bounds.y1 - page_bounds.y0;
        let header_threshold = self
            .header_exclusion_ratio
            .map(|r| page_bounds.y0 + page_height * r);
        let footer_threshold = self
            .footer_exclusion_ratio
            .map(|r| page_bounds.y1 - page_height * r);

        let mut page_text = String::new();
        for block in text_page.blocks() {
            let block_bounds = block.bounds();

            // Skip blocks entirely within the header band
            if let Some(threshold) = header_threshold {
                if block_bounds.y1 <= threshold {
                    continue;
                }
            }

            // Skip blocks whose top edge is in the footer band
            if let Some(threshold) = footer_threshold {
                if block_bounds.y0 >= threshold {
                    continue;
                }
            }

            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }
        Ok(page_text)
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, BackendError> {
        let document = Self::open(path)?;

        let mut pages = Vec::new();
        for (index, page_result) in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
            .enumerate()
        {
            let text = page_result.and_then(|page| self.page_text(&page));
            pages.push(match text {
                Ok(text) => PageText::Text(text),
                Err(e) => {
                    tracing::debug!(path = %path.display(), page = index + 1, error = %e, "page text extraction failed");
                    PageText::Unreadable(e.to_string())
                }
            });
        }

        Ok(pages)
    }

    /// Open the document and count its pages without extracting text.
    fn validate(&self, path: &Path) -> Result<(), BackendError> {
        let document = Self::open(path)?;
        let count = document
            .page_count()
            .map_err(|e| BackendError::OpenError(e.to_string()))?;
        tracing::debug!(path = %path.display(), pages = count, "document opened");
        Ok(())
    }
}
