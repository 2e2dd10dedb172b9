//! Markup cleanup: vendor artifact stripping, unconditional script-construct
//! removal, and allow-list sanitization.
//!
//! The allow-list sanitizer is an injected capability (`MarkupSanitizer`) so
//! the validator stays pure and testable without any ambient document model.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

fn re(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("markup pattern must compile"))
}

/// Remove vendor-specific tags, attributes, namespaces, and inline vendor
/// styling left behind by word processors and online editors.
pub fn strip_vendor_markup(content: &str) -> String {
    static WORD_NS: OnceLock<Regex> = OnceLock::new();
    static MSO_CLASS: OnceLock<Regex> = OnceLock::new();
    static MSO_STYLE: OnceLock<Regex> = OnceLock::new();
    static MSO_EMPTY_P: OnceLock<Regex> = OnceLock::new();
    static EMPTY_STYLED_SPAN: OnceLock<Regex> = OnceLock::new();
    static DOCS_GUID: OnceLock<Regex> = OnceLock::new();
    static DOCS_BOLD: OnceLock<Regex> = OnceLock::new();
    static CLOSING_B: OnceLock<Regex> = OnceLock::new();
    static DOUBLE_BR: OnceLock<Regex> = OnceLock::new();
    static STYLE_ATTR_DQ: OnceLock<Regex> = OnceLock::new();
    static STYLE_ATTR_SQ: OnceLock<Regex> = OnceLock::new();

    // Word namespace tags (<o:p>, <w:...>, <m:...>) and generated wrappers
    let s = re(&WORD_NS, r"(?i)</?(?:o:p|w:[a-z0-9]*|m:[a-z0-9]*)[^>]*>").replace_all(content, "");
    let s = re(&MSO_EMPTY_P, r#"(?i)<p class="?MsoNormal"?[^>]*>\s*</p>"#).replace_all(&s, "");
    let s = re(&MSO_CLASS, r#"(?i)class="?Mso[^">\s]*"?"#).replace_all(&s, "");
    let s = re(&MSO_STYLE, r#"(?i)style="[^"]*mso-[^"]*""#).replace_all(&s, "");
    let s = re(&EMPTY_STYLED_SPAN, r#"(?i)<span style="[^"]*">\s*</span>"#).replace_all(&s, "");

    // Google Docs wrappers
    let s = re(&DOCS_GUID, r#"(?i)id="docs-internal-guid-[^"]*""#).replace_all(&s, "");
    let s = re(&DOCS_BOLD, r#"(?i)<b style="font-weight:\s*normal"[^>]*>"#).replace_all(&s, "");
    let s = re(&CLOSING_B, r"(?i)</b>").replace_all(&s, "");

    // Copy-paste residue: stacked <br> and inline styling
    let s = re(&DOUBLE_BR, r"(?i)<br[^>]*>\s*<br[^>]*>").replace_all(&s, "<br>");
    let s = re(&STYLE_ATTR_DQ, r#"(?i)\s?style="[^"]*""#).replace_all(&s, "");
    let s = re(&STYLE_ATTR_SQ, r"(?i)\s?style='[^']*'").replace_all(&s, "");

    s.into_owned()
}

/// Remove script-bearing constructs unconditionally: script/style/iframe
/// elements, inline event handlers, and `javascript:` URLs.
///
/// This is the only sanitization large documents receive on the fast path,
/// so it must not depend on any other cleanup having run first.
pub fn strip_script_constructs(content: &str) -> String {
    static SCRIPT_BLOCK: OnceLock<Regex> = OnceLock::new();
    static STYLE_BLOCK: OnceLock<Regex> = OnceLock::new();
    static IFRAME_BLOCK: OnceLock<Regex> = OnceLock::new();
    static ORPHAN_TAGS: OnceLock<Regex> = OnceLock::new();
    static UNTERMINATED: OnceLock<Regex> = OnceLock::new();
    static ELEMENT_TOKEN: OnceLock<Regex> = OnceLock::new();
    static JS_URL_DQ: OnceLock<Regex> = OnceLock::new();
    static JS_URL_SQ: OnceLock<Regex> = OnceLock::new();

    let s = re(&SCRIPT_BLOCK, r"(?is)<script[^>]*>.*?</script>").replace_all(content, "");
    let s = re(&STYLE_BLOCK, r"(?is)<style[^>]*>.*?</style>").replace_all(&s, "");
    let s = re(&IFRAME_BLOCK, r"(?is)<iframe[^>]*>.*?</iframe>").replace_all(&s, "");
    // Unbalanced script/style/iframe tags that the block patterns missed
    let s = re(&ORPHAN_TAGS, r"(?i)</?(?:script|style|iframe)[^>]*>").replace_all(&s, "");
    // A fragment with no closing '>' before end of input gets completed by
    // the surrounding markup when rendered, so it must not survive either.
    let s = re(&UNTERMINATED, r"(?i)<\s*/?\s*(?:script|style|iframe)\b[^>]*$").replace_all(&s, "");

    // Event handlers and javascript: URLs live inside tag tokens; prose like
    // "sign online=cheap" must stay untouched. A token may be unterminated
    // at end of input and still gets rendered as a tag.
    let s = re(&ELEMENT_TOKEN, r"<[a-zA-Z][^>]*(?:>|$)").replace_all(&s, |caps: &regex::Captures<'_>| {
        strip_handler_attributes(&caps[0])
    });

    let s = re(&JS_URL_DQ, r#"(?i)\s(?:href|src)\s*=\s*"\s*javascript:[^"]*""#)
        .replace_all(&s, " ");
    let s = re(&JS_URL_SQ, r"(?i)\s(?:href|src)\s*=\s*'\s*javascript:[^']*'").replace_all(&s, " ");

    s.into_owned()
}

fn strip_handler_attributes(token: &str) -> String {
    static HANDLER_DQ: OnceLock<Regex> = OnceLock::new();
    static HANDLER_SQ: OnceLock<Regex> = OnceLock::new();
    static HANDLER_BARE: OnceLock<Regex> = OnceLock::new();

    let t = re(&HANDLER_DQ, r#"(?i)\son[a-z]+\s*=\s*"[^"]*""#).replace_all(token, "");
    let t = re(&HANDLER_SQ, r"(?i)\son[a-z]+\s*=\s*'[^']*'").replace_all(&t, "");
    re(&HANDLER_BARE, r"(?i)\son[a-z]+\s*=\s*[^\s>]+")
        .replace_all(&t, "")
        .into_owned()
}

/// Collapse away structurally empty paragraphs and containers, then fold
/// remaining whitespace runs.
pub fn prune_empty_tags(content: &str) -> String {
    static EMPTY_BLOCK: OnceLock<Regex> = OnceLock::new();
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();

    // Open and close must be the same element; a pattern that pairs any
    // opener with any closer would eat the closing tag of an outer
    // container and unbalance valid markup.
    let empty = re(
        &EMPTY_BLOCK,
        r"(?i)<p[^>]*>(?:\s|&nbsp;)*</p>|<div[^>]*>(?:\s|&nbsp;)*</div>|<span[^>]*>(?:\s|&nbsp;)*</span>",
    );

    let mut current = content.to_string();
    // Nested empties collapse outside-in; bounded to avoid pathological input
    for _ in 0..10 {
        let next = empty.replace_all(&current, "").into_owned();
        if next == current {
            break;
        }
        current = next;
    }

    re(&WHITESPACE, r"\s+")
        .replace_all(&current, " ")
        .trim()
        .to_string()
}

/// A markup-sanitizing capability injected into the validator.
pub trait MarkupSanitizer: Send + Sync {
    fn sanitize(&self, markup: &str) -> String;
}

/// Restricts markup to a fixed allow-list of structural/semantic tags and a
/// fixed allow-list of attributes. Disallowed tags are dropped while their
/// text content is kept; script-bearing constructs are removed entirely.
///
/// This is deliberately not a general-purpose HTML parser: it rewrites tag
/// tokens in place and leaves text alone.
pub struct AllowListSanitizer {
    allowed_tags: HashSet<&'static str>,
    allowed_attributes: HashSet<&'static str>,
}

const ALLOWED_TAGS: [&str; 30] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "strong", "em", "u", "s", "blockquote", "ul",
    "ol", "li", "a", "img", "figure", "figcaption", "table", "thead", "tbody", "tr", "th", "td",
    "code", "pre", "hr", "div",
];

// span is allowed too; kept separate so the array above stays readable
const ALLOWED_EXTRA: [&str; 1] = ["span"];

const ALLOWED_ATTRIBUTES: [&str; 10] = [
    "href", "src", "alt", "title", "class", "id", "width", "height", "target", "rel",
];

impl Default for AllowListSanitizer {
    fn default() -> Self {
        let mut allowed_tags: HashSet<&'static str> = ALLOWED_TAGS.into_iter().collect();
        allowed_tags.extend(ALLOWED_EXTRA);
        Self {
            allowed_tags,
            allowed_attributes: ALLOWED_ATTRIBUTES.into_iter().collect(),
        }
    }
}

impl AllowListSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn rebuild_tag(&self, token: &str) -> String {
        static TAG_NAME: OnceLock<Regex> = OnceLock::new();
        static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();

        let name_re = re(&TAG_NAME, r"^<\s*(/?)\s*([a-zA-Z][a-zA-Z0-9]*)");
        let Some(caps) = name_re.captures(token) else {
            // Comments, doctypes, and other non-element tokens are dropped
            return String::new();
        };

        let closing = !caps[1].is_empty();
        let name = caps[2].to_lowercase();
        if !self.allowed_tags.contains(name.as_str()) {
            return String::new();
        }

        if closing {
            return format!("</{}>", name);
        }

        let attr_re = re(
            &ATTRIBUTE,
            r#"([a-zA-Z][a-zA-Z0-9_:.-]*)\s*=\s*("[^"]*"|'[^']*'|[^\s>/]+)"#,
        );

        let mut rebuilt = format!("<{}", name);
        for attr in attr_re.captures_iter(token) {
            let attr_name = attr[1].to_lowercase();
            if !self.allowed_attributes.contains(attr_name.as_str()) {
                continue;
            }
            let raw_value = attr[2].trim_matches(|c| c == '"' || c == '\'');
            if (attr_name == "href" || attr_name == "src")
                && raw_value.trim_start().to_lowercase().starts_with("javascript:")
            {
                continue;
            }
            let value = raw_value.replace('"', "&quot;");
            rebuilt.push_str(&format!(" {}=\"{}\"", attr_name, value));
        }

        if token.trim_end().ends_with("/>") {
            rebuilt.push_str(" />");
        } else {
            rebuilt.push('>');
        }
        rebuilt
    }
}

impl MarkupSanitizer for AllowListSanitizer {
    fn sanitize(&self, markup: &str) -> String {
        static COMMENT: OnceLock<Regex> = OnceLock::new();
        static DECLARATION: OnceLock<Regex> = OnceLock::new();
        static TAG_TOKEN: OnceLock<Regex> = OnceLock::new();

        // Script-bearing constructs go first so their text content does not
        // leak through when the surrounding tags are rewritten.
        let cleaned = strip_script_constructs(markup);
        let cleaned = re(&COMMENT, r"(?s)<!--.*?-->").replace_all(&cleaned, "");
        let cleaned = re(&DECLARATION, r"(?i)<![^>]*>|<\?[^>]*\??>").replace_all(&cleaned, "");

        re(&TAG_TOKEN, r"</?[a-zA-Z][^>]*>")
            .replace_all(&cleaned, |caps: &regex::Captures<'_>| {
                self.rebuild_tag(&caps[0])
            })
            .into_owned()
    }
}
