/// Page separator emitted by `pdftotext` and similar tools.
pub const FORM_FEED: char = '\u{000C}';

/// Collapse every whitespace run to one space and trim both ends.
///
/// Idempotent: `normalize_whitespace(&normalize_whitespace(s)) == normalize_whitespace(s)`.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Split page text into lines on `\n` only; each line is trimmed later.
pub fn split_lines(page_text: &str) -> impl Iterator<Item = &str> {
    page_text.split('\n')
}

/// Split a form-feed paginated text dump into pages.
///
/// A single trailing form feed (as `pdftotext` writes after the last page)
/// does not produce an extra empty page, and empty input has no pages.
pub fn split_pages(text: &str) -> Vec<&str> {
    let text = text.strip_suffix(FORM_FEED).unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }
    text.split(FORM_FEED).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \u{00A0} "), "");
    }

    #[test]
    fn test_normalize_whitespace_idempotent() {
        for s in ["", "x", "  lead", "trail  ", "a\u{2003}b\r\nc", " many    runs  of   space "] {
            let once = normalize_whitespace(s);
            assert_eq!(normalize_whitespace(&once), once);
        }
    }

    #[test]
    fn test_expand_ligatures() {
        assert_eq!(expand_ligatures("ﬁnding ﬂow"), "finding flow");
        assert_eq!(expand_ligatures("eﬃcient oﬄine"), "efficient offline");
        assert_eq!(expand_ligatures("no ligatures here"), "no ligatures here");
    }

    #[test]
    fn test_split_lines_keeps_empty_lines() {
        let lines: Vec<_> = split_lines("a\n\nb\r\n").collect();
        assert_eq!(lines, vec!["a", "", "b\r", ""]);
    }

    #[test]
    fn test_split_pages() {
        assert_eq!(split_pages("one\u{000C}two\u{000C}"), vec!["one", "two"]);
        assert_eq!(split_pages("one\u{000C}\u{000C}three"), vec!["one", "", "three"]);
        assert_eq!(split_pages("single"), vec!["single"]);
        assert!(split_pages("").is_empty());
        assert!(split_pages("\u{000C}").is_empty());
        assert_eq!(split_pages("\u{000C}\u{000C}"), vec!["", ""]);
    }
}
