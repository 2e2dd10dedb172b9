//! Typographic and whitespace normalization.
//!
//! Each function is total and idempotent for well-formed string input: it
//! never fails, and re-running it on its own output is a no-op.

use std::sync::OnceLock;

use regex::Regex;

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("normalization pattern must compile"))
}

/// Replace smart punctuation with ASCII equivalents and drop invisible
/// characters (zero-width, soft hyphens, control, private-use).
pub fn normalize_typography(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' => out.push('-'),
            '\u{2014}' => out.push_str("--"),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            // Zero-width characters and BOM
            '\u{200B}'..='\u{200D}' | '\u{FEFF}' => {}
            // Soft hyphen
            '\u{00AD}' => {}
            // Control characters (line structure is preserved)
            '\u{001F}' | '\u{007F}'..='\u{009F}' => {}
            // Private use area
            '\u{E000}'..='\u{F8FF}' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Normalize line endings to LF, collapse runs of blank lines to one, and
/// collapse runs of horizontal whitespace to a single space.
pub fn normalize_whitespace(content: &str) -> String {
    static BLANK_LINES: OnceLock<Regex> = OnceLock::new();
    static HORIZONTAL: OnceLock<Regex> = OnceLock::new();
    static LINE_EDGES: OnceLock<Regex> = OnceLock::new();

    let unified = content.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = regex(&BLANK_LINES, r"\n{3,}").replace_all(&unified, "\n\n");
    let collapsed = regex(&HORIZONTAL, r"[ \t]+").replace_all(&collapsed, " ");
    let trimmed = regex(&LINE_EDGES, r"(?m)^ +| +$").replace_all(&collapsed, "");
    trimmed.trim().to_string()
}

/// Repair the double-escaped HTML entities that word processors and editors
/// leave behind. Applied only during paste cleanup; decoding is not
/// idempotent in general, so it runs at most once per document.
pub fn repair_entities(content: &str) -> String {
    content
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_punctuation() {
        assert_eq!(
            normalize_typography("\u{2018}a\u{2019} \u{201C}b\u{201D}"),
            "'a' \"b\""
        );
        assert_eq!(normalize_typography("a\u{2013}b"), "a-b");
        assert_eq!(normalize_typography("a\u{2014}b"), "a--b");
        assert_eq!(normalize_typography("wait\u{2026}"), "wait...");
        assert_eq!(normalize_typography("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_invisible_characters_removed() {
        assert_eq!(normalize_typography("a\u{200B}b\u{FEFF}c"), "abc");
        assert_eq!(normalize_typography("a\u{00AD}b"), "ab");
        assert_eq!(normalize_typography("a\u{E001}b"), "ab");
        assert_eq!(normalize_typography("a\u{009F}b"), "ab");
    }

    #[test]
    fn test_typography_is_idempotent() {
        let input = "\u{201C}Hello\u{2026}\u{201D}\u{00A0}\u{2014}\u{200B}world";
        let once = normalize_typography(input);
        assert_eq!(normalize_typography(&once), once);
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize_whitespace("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_blank_line_collapse() {
        assert_eq!(normalize_whitespace("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_horizontal_whitespace_collapse() {
        assert_eq!(normalize_whitespace("a  \t  b"), "a b");
        assert_eq!(normalize_whitespace("  leading and trailing  "), "leading and trailing");
    }

    #[test]
    fn test_whitespace_is_idempotent() {
        let input = "  a\r\n\r\n\r\n\tb   c  ";
        let once = normalize_whitespace(input);
        assert_eq!(normalize_whitespace(&once), once);
    }

    #[test]
    fn test_entity_repair() {
        assert_eq!(repair_entities("a&amp;b &lt;tag&gt;"), "a&b <tag>");
        assert_eq!(repair_entities("&quot;x&quot; &#39;y&#39;"), "\"x\" 'y'");
        assert_eq!(repair_entities("a&nbsp;b"), "a b");
    }
}
