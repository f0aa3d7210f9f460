//! Line classification: heading, boilerplate, or body content.
//!
//! The heuristics are driven by three tables (leading enumerators, junk
//! keywords, the page-number footer pattern) that [`ParsingConfig`] can
//! replace or extend. Both predicates are total over `&str`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Leading enumerators that mark a heading, tried in order against the
/// trimmed line. Each requires whitespace and then content after the marker.
pub(crate) static ENUMERATOR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d{1,2}\.\s+\S",  // 1. Introduction
        r"^[A-Z]\.\s+\S",    // A. Overview
        r"^\([a-z]\)\s+\S",  // (a) Scope
        r"^\([ivx]+\)\s+\S", // (iv) Exceptions
        r"^•\s+\S",          // • Summary
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Substrings (lowercase) of registration numbers, solicitation notices,
/// contact lines and confidentiality stamps.
pub(crate) const JUNK_KEYWORDS: &[&str] = &[
    "uin:",
    "irda",
    "regn. no.",
    "reg. no.",
    "cin:",
    "gstin",
    "subject matter of solicitation",
    "trade logo",
    "corporate office",
    "registered office",
    "toll-free",
    "website:",
    "e-mail",
    ".com",
    ".in",
    "confidential",
    "internal use",
];

/// "page 3", "page3", "4 of 10". Matched against the lowercased, trimmed line.
pub(crate) static PAGE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:page\s*\d+|\d+\s*of\s*\d+)$").unwrap());

static DEFAULT_CLASSIFIER: Lazy<LineClassifier> =
    Lazy::new(|| LineClassifier::new(&ParsingConfig::default()));

/// How a single line of page text is treated by the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts a new section.
    Title,
    /// Header/footer/legal boilerplate; dropped.
    Junk,
    /// Appended to the current section.
    Content,
}

/// Compiled classification tables.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    enumerators: Vec<Regex>,
    junk_keywords: Vec<String>,
    page_number_re: Regex,
    max_title_chars: usize,
    max_title_words: usize,
}

impl Default for LineClassifier {
    fn default() -> Self {
        DEFAULT_CLASSIFIER.clone()
    }
}

impl LineClassifier {
    /// Resolve the config's table overrides once.
    pub fn new(config: &ParsingConfig) -> Self {
        let default_keywords: Vec<String> = JUNK_KEYWORDS.iter().map(|s| s.to_string()).collect();
        let junk_keywords = config
            .junk_keywords
            .resolve(&default_keywords)
            .into_iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            enumerators: config.enumerator_patterns.resolve(&ENUMERATOR_PATTERNS),
            junk_keywords,
            page_number_re: config
                .page_number_re
                .clone()
                .unwrap_or_else(|| PAGE_NUMBER_RE.clone()),
            max_title_chars: config.max_title_chars,
            max_title_words: config.max_title_words,
        }
    }

    /// Classify a line. The title check runs first and wins over junk.
    pub fn classify(&self, line: &str) -> LineKind {
        if self.is_title(line) {
            LineKind::Title
        } else if self.is_junk(line) {
            LineKind::Junk
        } else {
            LineKind::Content
        }
    }

    /// Whether the line plausibly is a section heading.
    pub fn is_title(&self, line: &str) -> bool {
        let stripped = line.trim();

        if stripped.is_empty() || stripped.chars().count() > self.max_title_chars {
            return false;
        }

        // Headings don't end in sentence punctuation
        if stripped.ends_with('.') {
            return false;
        }

        if self.enumerators.iter().any(|re| re.is_match(stripped)) {
            return true;
        }

        stripped.split_whitespace().count() <= self.max_title_words
            && (is_upper(stripped) || is_title_case(stripped))
    }

    /// Whether the line is boilerplate to be discarded.
    pub fn is_junk(&self, line: &str) -> bool {
        let stripped = line.trim().to_lowercase();

        if stripped.is_empty() {
            return true;
        }

        if self
            .junk_keywords
            .iter()
            .any(|keyword| stripped.contains(keyword.as_str()))
        {
            return true;
        }

        self.page_number_re.is_match(&stripped)
    }
}

/// [`LineClassifier::is_title`] with the built-in tables.
pub fn is_title(line: &str) -> bool {
    DEFAULT_CLASSIFIER.is_title(line)
}

/// [`LineClassifier::is_junk`] with the built-in tables.
pub fn is_junk(line: &str) -> bool {
    DEFAULT_CLASSIFIER.is_junk(line)
}

/// [`LineClassifier::classify`] with the built-in tables.
pub fn classify(line: &str) -> LineKind {
    DEFAULT_CLASSIFIER.classify(line)
}

/// Unicode category Lt: digraphs such as "ǅ" and Greek capitals with
/// prosgegrammeni. Neither `is_uppercase` nor `is_lowercase` holds for them.
fn is_titlecase_letter(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// At least one cased letter and no lowercase or titlecase letter
/// ("ALL CAPS 2024").
pub(crate) fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() || is_titlecase_letter(c) {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Every word starts with an uppercase letter and continues in lowercase.
///
/// A "word" is a run of cased letters: uppercase (or titlecase) letters may only follow an
/// uncased character and lowercase letters may only follow a cased one, so
/// "Terms And Conditions" passes while "McDonald" and "IPO Terms" do not.
pub(crate) fn is_title_case(s: &str) -> bool {
    let mut cased = false;
    let mut previous_is_cased = false;
    for c in s.chars() {
        if c.is_uppercase() || is_titlecase_letter(c) {
            if previous_is_cased {
                return false;
            }
            previous_is_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_is_cased {
                return false;
            }
            previous_is_cased = true;
        } else {
            previous_is_cased = false;
        }
    }
    cased
}
