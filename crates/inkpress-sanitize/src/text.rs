//! Plain-text utilities derived from markup: slugs, reading time, and text
//! extraction for publish preconditions.

use std::sync::OnceLock;

use regex::Regex;

use inkpress_core::constants::WORDS_PER_MINUTE;

fn tag_re() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern must compile"))
}

/// URL-safe slug from a title: lowercase, hyphen-separated, ASCII word
/// characters only.
pub fn slugify(text: &str) -> String {
    static SPACES: OnceLock<Regex> = OnceLock::new();
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    static DASHES: OnceLock<Regex> = OnceLock::new();

    let spaces = SPACES.get_or_init(|| Regex::new(r"\s+").expect("slug pattern must compile"));
    let non_word = NON_WORD.get_or_init(|| Regex::new(r"[^\w\-]+").expect("slug pattern must compile"));
    let dashes = DASHES.get_or_init(|| Regex::new(r"-{2,}").expect("slug pattern must compile"));

    let lowered = text.to_lowercase();
    let s = spaces.replace_all(lowered.trim(), "-");
    let s = s.replace('&', "-and-");
    let s = non_word.replace_all(&s, "");
    let s = dashes.replace_all(&s, "-");
    s.trim_matches('-').to_string()
}

/// Deduplicate a slug against already-taken ones by appending a counter.
pub fn unique_slug(title: &str, existing: &[String]) -> String {
    let base = slugify(title);
    if !existing.iter().any(|s| *s == base) {
        return base;
    }

    let mut counter = 1;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !existing.iter().any(|s| *s == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Strip markup and return the readable text content.
pub fn extract_text(html: &str) -> String {
    tag_re()
        .replace_all(html, " ")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

/// Whether the markup contains any readable text at all. Used as the
/// precondition for publishing (an empty body may still be saved as a draft).
pub fn has_meaningful_text(html: &str) -> bool {
    !extract_text(html).is_empty()
}

/// Estimated reading time in whole minutes, never less than 1.
pub fn reading_time_minutes(content: &str) -> u32 {
    static WORD: OnceLock<Regex> = OnceLock::new();
    let word = WORD.get_or_init(|| Regex::new(r"\w+").expect("word pattern must compile"));

    let text = if content.contains('<') && content.contains('>') {
        extract_text(content)
    } else {
        content.to_string()
    };

    let word_count = word.find_iter(&text).count();
    let minutes = word_count.div_ceil(WORDS_PER_MINUTE);
    minutes.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Trimmed  Title  "), "trimmed-title");
    }

    #[test]
    fn test_slugify_ampersand_and_symbols() {
        assert_eq!(slugify("Rust & Safety"), "rust-and-safety");
        assert_eq!(slugify("Wow!!! (really?)"), "wow-really");
    }

    #[test]
    fn test_slugify_collapses_dashes() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("--edges--"), "edges");
    }

    #[test]
    fn test_slug_matches_published_pattern() {
        let pattern = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        for title in ["Hello World", "Rust & Safety 101", "One"] {
            assert!(pattern.is_match(&slugify(title)), "bad slug for {:?}", title);
        }
    }

    #[test]
    fn test_unique_slug() {
        let existing = vec!["post".to_string(), "post-1".to_string()];
        assert_eq!(unique_slug("Post", &existing), "post-2");
        assert_eq!(unique_slug("Fresh", &existing), "fresh");
    }

    #[test]
    fn test_extract_text() {
        assert_eq!(extract_text("<p>Hello <b>world</b></p>"), "Hello  world");
        assert_eq!(extract_text("<p>&nbsp;</p>"), "");
    }

    #[test]
    fn test_has_meaningful_text() {
        assert!(has_meaningful_text("<p>word</p>"));
        assert!(!has_meaningful_text("<p></p><div>&nbsp;</div>"));
    }

    #[test]
    fn test_reading_time_minimum_one() {
        assert_eq!(reading_time_minutes("short"), 1);
        assert_eq!(reading_time_minutes(""), 1);
    }

    #[test]
    fn test_reading_time_scales_with_words() {
        let words = vec!["word"; 460].join(" ");
        assert_eq!(reading_time_minutes(&words), 2);
    }

    #[test]
    fn test_reading_time_strips_markup() {
        let html = format!("<p>{}</p>", vec!["word"; 230].join(" "));
        assert_eq!(reading_time_minutes(&html), 1);
    }
}
