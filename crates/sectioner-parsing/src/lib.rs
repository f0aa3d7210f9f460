use std::path::Path;

use thiserror::Error;

pub mod accumulator;
pub mod classifier;
pub mod config;
pub mod extractor;
pub mod text_processing;

pub use accumulator::SectionAccumulator;
pub use classifier::{LineClassifier, LineKind, classify, is_junk, is_title};
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder, UnreadablePagePolicy};
pub use extractor::SectionExtractor;
pub use text_processing::normalize_whitespace;
// Re-export domain types from core (canonical definitions live there)
pub use sectioner_core::{
    BackendError, ExtractionResult, ExtractionStats, PageText, PdfBackend, SectionRecord,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("page {page} could not be read: {reason}")]
    UnreadablePage { page: usize, reason: String },
    #[error("backend error: {0}")]
    Backend(#[from] sectioner_core::BackendError),
}

/// Extract heuristic sections from a PDF file using the given backend for text extraction.
///
/// Pipeline:
/// 1. Extract per-page text via `backend`
/// 2. Split each page into lines
/// 3. Classify each line as title, junk or content
/// 4. Accumulate content under the most recent title, page by page
/// 5. Emit one record per non-empty section, in page then document order
pub fn extract_sections(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
) -> Result<ExtractionResult, ParsingError> {
    SectionExtractor::new().extract_sections(pdf_path, backend)
}
