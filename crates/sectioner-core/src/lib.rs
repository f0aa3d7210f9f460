use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod backend;
pub mod config_file;

pub use backend::{BackendError, PageText, PdfBackend};

/// Title given to content that appears on a page before any detected heading.
pub const DEFAULT_SECTION_TITLE: &str = "General Information";

/// One labeled block of text extracted from a document page.
///
/// Field names are part of the serialized output and must stay
/// `id, page_number, title, text, source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: Uuid,
    /// 1-based page the section's content appeared on.
    pub page_number: usize,
    pub title: String,
    /// Whitespace-normalized body text.
    pub text: String,
    /// Document identifier or path, copied verbatim from the caller.
    pub source: String,
}

impl SectionRecord {
    /// Create a record with a fresh random id.
    pub fn new(
        page_number: usize,
        title: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            page_number,
            title: title.into(),
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Counters collected while sectioning a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub pages_total: usize,
    /// Pages the backend could not read; they contribute no lines.
    pub pages_unreadable: usize,
    pub title_lines: usize,
    pub junk_lines: usize,
    pub content_lines: usize,
    /// Records dropped by the minimum text length filter.
    pub filtered_short: usize,
}

impl ExtractionStats {
    /// Fold another set of counters into this one.
    pub fn absorb(&mut self, other: &ExtractionStats) {
        self.pages_total += other.pages_total;
        self.pages_unreadable += other.pages_unreadable;
        self.title_lines += other.title_lines;
        self.junk_lines += other.junk_lines;
        self.content_lines += other.content_lines;
        self.filtered_short += other.filtered_short;
    }
}

/// Result of sectioning a document.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub sections: Vec<SectionRecord>,
    pub stats: ExtractionStats,
}
