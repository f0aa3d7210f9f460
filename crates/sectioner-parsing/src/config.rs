use regex::Regex;
use sectioner_core::DEFAULT_SECTION_TITLE;
use sectioner_core::config_file::SectionsConfig;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }

    fn push(&mut self, value: T) {
        match self {
            ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(value),
            ListOverride::Default => *self = ListOverride::Extend(vec![value]),
        }
    }
}

/// What the driver does when the backend reports a page it could not read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnreadablePagePolicy {
    /// Treat the page as having no lines and keep going.
    #[default]
    Skip,
    /// Stop and return [`crate::ParsingError::UnreadablePage`].
    Abort,
}

/// Configuration for the sectioning pipeline.
///
/// Regex fields are `Option<Regex>`; `None` means "use the built-in default".
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── classifier.rs ──
    /// Titles longer than this many characters are rejected (default: 120).
    pub(crate) max_title_chars: usize,
    /// Capitalized lines with more words than this are not titles (default: 7).
    pub(crate) max_title_words: usize,
    /// Leading enumerators ("1.", "A.", "(a)", "(iv)", "•") that mark a title.
    pub(crate) enumerator_patterns: ListOverride<Regex>,
    /// Case-insensitive substrings that mark a line as boilerplate.
    pub(crate) junk_keywords: ListOverride<String>,
    /// Full-line pattern for page-number footers, matched against the lowercased line.
    pub(crate) page_number_re: Option<Regex>,

    // ── accumulator.rs ──
    /// Title for content seen before any heading on a page.
    pub(crate) default_title: String,
    /// Emit empty-bodied records for headings that are immediately replaced.
    pub(crate) keep_empty_titled_sections: bool,

    // ── extractor.rs ──
    /// Drop records whose text has this many characters or fewer.
    pub(crate) min_text_chars: Option<usize>,
    pub(crate) unreadable_pages: UnreadablePagePolicy,
    /// Expand typographic ligatures (U+FB00..U+FB06) before classification.
    pub(crate) expand_ligatures: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            max_title_chars: 120,
            max_title_words: 7,
            enumerator_patterns: ListOverride::Default,
            junk_keywords: ListOverride::Default,
            page_number_re: None,
            default_title: DEFAULT_SECTION_TITLE.to_string(),
            keep_empty_titled_sections: false,
            min_text_chars: None,
            unreadable_pages: UnreadablePagePolicy::Skip,
            expand_ligatures: false,
        }
    }
}

impl ParsingConfig {
    pub fn max_title_chars(&self) -> usize {
        self.max_title_chars
    }

    pub fn max_title_words(&self) -> usize {
        self.max_title_words
    }

    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    pub fn keep_empty_titled_sections(&self) -> bool {
        self.keep_empty_titled_sections
    }

    pub fn min_text_chars(&self) -> Option<usize> {
        self.min_text_chars
    }

    pub fn unreadable_pages(&self) -> UnreadablePagePolicy {
        self.unreadable_pages
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    max_title_chars: Option<usize>,
    max_title_words: Option<usize>,
    enumerator_patterns: ListOverride<String>,
    junk_keywords: ListOverride<String>,
    page_number_re: Option<String>,
    default_title: Option<String>,
    keep_empty_titled_sections: Option<bool>,
    min_text_chars: Option<usize>,
    unreadable_pages: Option<UnreadablePagePolicy>,
    expand_ligatures: Option<bool>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Title heuristics ──

    pub fn max_title_chars(mut self, n: usize) -> Self {
        self.max_title_chars = Some(n);
        self
    }

    pub fn max_title_words(mut self, n: usize) -> Self {
        self.max_title_words = Some(n);
        self
    }

    pub fn set_enumerator_patterns(mut self, patterns: Vec<String>) -> Self {
        self.enumerator_patterns = ListOverride::Replace(patterns);
        self
    }

    pub fn add_enumerator_pattern(mut self, pattern: String) -> Self {
        self.enumerator_patterns.push(pattern);
        self
    }

    // ── Junk heuristics ──

    pub fn set_junk_keywords(mut self, keywords: Vec<String>) -> Self {
        self.junk_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_junk_keyword(mut self, keyword: String) -> Self {
        self.junk_keywords.push(keyword);
        self
    }

    pub fn page_number_regex(mut self, pattern: &str) -> Self {
        self.page_number_re = Some(pattern.to_string());
        self
    }

    // ── Accumulation ──

    pub fn default_title(mut self, title: &str) -> Self {
        self.default_title = Some(title.to_string());
        self
    }

    pub fn keep_empty_titled_sections(mut self, keep: bool) -> Self {
        self.keep_empty_titled_sections = Some(keep);
        self
    }

    // ── Driver ──

    pub fn min_text_chars(mut self, n: usize) -> Self {
        self.min_text_chars = Some(n);
        self
    }

    pub fn unreadable_pages(mut self, policy: UnreadablePagePolicy) -> Self {
        self.unreadable_pages = Some(policy);
        self
    }

    pub fn expand_ligatures(mut self, expand: bool) -> Self {
        self.expand_ligatures = Some(expand);
        self
    }

    /// Layer the `[sections]` table of a config file onto this builder.
    ///
    /// Values already set on the builder are kept, so callers apply CLI
    /// flags first and the file second.
    pub fn apply_file(mut self, file: &SectionsConfig) -> Self {
        if self.default_title.is_none() {
            self.default_title = file.default_title.clone();
        }
        self.max_title_chars = self.max_title_chars.or(file.max_title_chars);
        self.max_title_words = self.max_title_words.or(file.max_title_words);
        self.keep_empty_titled_sections = self
            .keep_empty_titled_sections
            .or(file.keep_empty_titled_sections);
        self.min_text_chars = self.min_text_chars.or(file.min_text_chars);
        if self.unreadable_pages.is_none() {
            self.unreadable_pages = file.abort_on_unreadable_page.map(|abort| {
                if abort {
                    UnreadablePagePolicy::Abort
                } else {
                    UnreadablePagePolicy::Skip
                }
            });
        }
        for keyword in file.extra_junk_keywords.iter().flatten() {
            self.junk_keywords.push(keyword.clone());
        }
        for pattern in file.extra_enumerator_patterns.iter().flatten() {
            self.enumerator_patterns.push(pattern.clone());
        }
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile = |opt: Option<String>| -> Result<Option<Regex>, regex::Error> {
            opt.map(|p| Regex::new(&p)).transpose()
        };

        let compile_all = |patterns: Vec<String>| -> Result<Vec<Regex>, regex::Error> {
            patterns.iter().map(|p| Regex::new(p)).collect()
        };

        let compile_list =
            |list: ListOverride<String>| -> Result<ListOverride<Regex>, regex::Error> {
                Ok(match list {
                    ListOverride::Default => ListOverride::Default,
                    ListOverride::Replace(patterns) => ListOverride::Replace(compile_all(patterns)?),
                    ListOverride::Extend(patterns) => ListOverride::Extend(compile_all(patterns)?),
                })
            };

        let defaults = ParsingConfig::default();

        Ok(ParsingConfig {
            max_title_chars: self.max_title_chars.unwrap_or(defaults.max_title_chars),
            max_title_words: self.max_title_words.unwrap_or(defaults.max_title_words),
            enumerator_patterns: compile_list(self.enumerator_patterns)?,
            junk_keywords: self.junk_keywords,
            page_number_re: compile(self.page_number_re)?,
            default_title: self.default_title.unwrap_or(defaults.default_title),
            keep_empty_titled_sections: self
                .keep_empty_titled_sections
                .unwrap_or(defaults.keep_empty_titled_sections),
            min_text_chars: self.min_text_chars.or(defaults.min_text_chars),
            unreadable_pages: self.unreadable_pages.unwrap_or(defaults.unreadable_pages),
            expand_ligatures: self.expand_ligatures.unwrap_or(defaults.expand_ligatures),
        })
    }
}
