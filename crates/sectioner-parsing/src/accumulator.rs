use sectioner_core::{ExtractionStats, SectionRecord};

use crate::classifier::{LineClassifier, LineKind};
use crate::config::ParsingConfig;
use crate::text_processing::normalize_whitespace;

/// Per-page section state machine.
///
/// Build one per page and drop it at the end of the page; nothing carries
/// across pages. Lines are fed in document order with [`push_line`], and
/// [`finish`] flushes the pending block.
///
/// [`push_line`]: SectionAccumulator::push_line
/// [`finish`]: SectionAccumulator::finish
pub struct SectionAccumulator<'a> {
    classifier: &'a LineClassifier,
    config: &'a ParsingConfig,
    source: &'a str,
    page_number: usize,
    current_title: String,
    /// False while `current_title` is still the page default.
    title_detected: bool,
    text_block: String,
    sections: Vec<SectionRecord>,
    stats: ExtractionStats,
}

impl<'a> SectionAccumulator<'a> {
    pub fn new(
        classifier: &'a LineClassifier,
        config: &'a ParsingConfig,
        source: &'a str,
        page_number: usize,
    ) -> Self {
        Self {
            classifier,
            config,
            source,
            page_number,
            current_title: config.default_title.clone(),
            title_detected: false,
            text_block: String::new(),
            sections: Vec::new(),
            stats: ExtractionStats::default(),
        }
    }

    /// Classify one line and update the section state.
    pub fn push_line(&mut self, line: &str) -> LineKind {
        let kind = self.classifier.classify(line);
        match kind {
            LineKind::Title => {
                self.stats.title_lines += 1;
                self.flush();
                self.current_title = line.trim().to_string();
                self.title_detected = true;
            }
            LineKind::Content => {
                self.stats.content_lines += 1;
                self.text_block.push(' ');
                self.text_block.push_str(line.trim());
            }
            LineKind::Junk => {
                self.stats.junk_lines += 1;
            }
        }
        kind
    }

    /// Current section title (the page default until a heading is seen).
    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    /// Emit the pending block, if any, and return this page's records.
    pub fn finish(mut self) -> (Vec<SectionRecord>, ExtractionStats) {
        self.flush();
        (self.sections, self.stats)
    }

    /// Close the pending section. A heading with no body is dropped unless
    /// `keep_empty_titled_sections` is set; the page default title never
    /// produces an empty record.
    fn flush(&mut self) {
        if !self.text_block.trim().is_empty() {
            let text = normalize_whitespace(&self.text_block);
            self.emit(text);
        } else if self.config.keep_empty_titled_sections && self.title_detected {
            self.emit(String::new());
        }
        self.text_block.clear();
    }

    fn emit(&mut self, text: String) {
        tracing::trace!(
            page = self.page_number,
            title = %self.current_title,
            chars = text.chars().count(),
            "section closed"
        );
        self.sections.push(SectionRecord::new(
            self.page_number,
            self.current_title.clone(),
            text,
            self.source,
        ));
    }
}
