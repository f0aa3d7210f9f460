use std::borrow::Cow;
use std::path::Path;

use crate::accumulator::SectionAccumulator;
use crate::classifier::{LineClassifier, LineKind};
use crate::config::{ParsingConfig, UnreadablePagePolicy};
use crate::text_processing::{expand_ligatures, split_lines, split_pages};
use crate::{ExtractionResult, ExtractionStats, PageText, ParsingError, PdfBackend, SectionRecord};

/// A configurable heuristic sectioning pipeline.
///
/// Holds a [`ParsingConfig`] plus the classifier compiled from it, and exposes
/// each pipeline step as a method. The default constructor uses built-in
/// defaults; use [`SectionExtractor::with_config`] to supply custom tables.
pub struct SectionExtractor {
    config: ParsingConfig,
    classifier: LineClassifier,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParsingConfig::default())
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        let classifier = LineClassifier::new(&config);
        Self { config, classifier }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Classify a single line with this extractor's tables.
    pub fn classify_line(&self, line: &str) -> LineKind {
        self.classifier.classify(line)
    }

    /// Section one page of text. State starts fresh and is discarded afterwards.
    pub fn sections_from_page_text(
        &self,
        source: &str,
        page_number: usize,
        text: &str,
    ) -> (Vec<SectionRecord>, ExtractionStats) {
        let text = if self.config.expand_ligatures {
            Cow::Owned(expand_ligatures(text))
        } else {
            Cow::Borrowed(text)
        };

        let mut accumulator =
            SectionAccumulator::new(&self.classifier, &self.config, source, page_number);
        for line in split_lines(&text) {
            accumulator.push_line(line);
        }
        accumulator.finish()
    }

    /// Section an ordered sequence of pages (page 1 first).
    ///
    /// Unreadable pages are skipped or abort the run depending on
    /// [`UnreadablePagePolicy`]. Output keeps page order, then in-page order.
    pub fn sections_from_pages<I>(
        &self,
        source: &str,
        pages: I,
    ) -> Result<ExtractionResult, ParsingError>
    where
        I: IntoIterator<Item = PageText>,
    {
        let mut sections = Vec::new();
        let mut stats = ExtractionStats::default();

        for (index, page) in pages.into_iter().enumerate() {
            let page_number = index + 1;
            stats.pages_total += 1;

            let text = match page {
                PageText::Text(text) => text,
                PageText::Unreadable(reason) => match self.config.unreadable_pages {
                    UnreadablePagePolicy::Abort => {
                        return Err(ParsingError::UnreadablePage {
                            page: page_number,
                            reason,
                        });
                    }
                    UnreadablePagePolicy::Skip => {
                        tracing::warn!(
                            source,
                            page = page_number,
                            %reason,
                            "skipping unreadable page"
                        );
                        stats.pages_unreadable += 1;
                        continue;
                    }
                },
            };

            let (page_sections, page_stats) =
                self.sections_from_page_text(source, page_number, &text);
            tracing::debug!(
                source,
                page = page_number,
                sections = page_sections.len(),
                titles = page_stats.title_lines,
                junk = page_stats.junk_lines,
                "page sectioned"
            );
            stats.absorb(&page_stats);
            sections.extend(page_sections);
        }

        Ok(self.finalize(sections, stats))
    }

    /// Section a form-feed paginated text dump (e.g. `pdftotext` output).
    pub fn sections_from_text(&self, source: &str, text: &str) -> ExtractionResult {
        let mut sections = Vec::new();
        let mut stats = ExtractionStats::default();
        for (index, page_text) in split_pages(text).into_iter().enumerate() {
            let (page_sections, page_stats) =
                self.sections_from_page_text(source, index + 1, page_text);
            stats.pages_total += 1;
            stats.absorb(&page_stats);
            sections.extend(page_sections);
        }
        self.finalize(sections, stats)
    }

    /// Run the full pipeline on a document using `backend` for text extraction.
    ///
    /// The record `source` is the path as given. Fails before any page is
    /// processed if the backend cannot open the document.
    pub fn extract_sections(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<ExtractionResult, ParsingError> {
        let source = path.to_string_lossy();
        let pages = backend.extract_pages(path)?;
        tracing::debug!(source = %source, pages = pages.len(), "extracted page text");

        let result = self.sections_from_pages(&source, pages)?;
        tracing::info!(
            source = %source,
            sections = result.sections.len(),
            pages = result.stats.pages_total,
            unreadable = result.stats.pages_unreadable,
            "sectioning complete"
        );
        Ok(result)
    }

    /// Apply the minimum text length filter.
    fn finalize(
        &self,
        mut sections: Vec<SectionRecord>,
        mut stats: ExtractionStats,
    ) -> ExtractionResult {
        if let Some(min_chars) = self.config.min_text_chars {
            let before = sections.len();
            sections.retain(|s| s.text.chars().count() > min_chars);
            stats.filtered_short = before - sections.len();
        }
        ExtractionResult { sections, stats }
    }
}
