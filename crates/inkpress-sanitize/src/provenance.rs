//! Paste provenance detection.
//!
//! Heuristic pattern-matching over raw text to guess the authoring tool a
//! document was pasted from. Purely advisory: the guess tunes cleanup
//! aggressiveness and warning text, never validity.

use std::sync::OnceLock;

use regex::Regex;

use inkpress_core::models::{PasteSource, ProvenanceGuess};

/// A fixed low threshold: a lone rich-text artifact (weight 0.1) is not
/// enough to call content "pasted".
const PASTED_THRESHOLD: f32 = 0.1;

struct PatternClass {
    source: PasteSource,
    weight: f32,
    patterns: Vec<Regex>,
}

fn pattern_classes() -> &'static [PatternClass] {
    static CLASSES: OnceLock<Vec<PatternClass>> = OnceLock::new();
    CLASSES.get_or_init(|| {
        vec![
            PatternClass {
                source: PasteSource::WordProcessor,
                weight: 0.4,
                patterns: compile(&[
                    r#"(?i)class="?Mso"#,
                    r"(?i)<o:p>",
                    r#"(?i)style="[^"]*mso-"#,
                    r"(?i)MsoNormal",
                ]),
            },
            PatternClass {
                source: PasteSource::GoogleDocs,
                weight: 0.3,
                patterns: compile(&[
                    r"(?i)docs-internal-guid",
                    r"(?i)google-docs",
                    r#"(?i)<b style="font-weight:normal">"#,
                ]),
            },
            PatternClass {
                source: PasteSource::WebContent,
                weight: 0.2,
                patterns: compile(&[
                    r"(?i)data-[a-z-]+=",
                    r"(?i)aria-[a-z-]+=",
                    r#"(?i)class="[^"]*wp-"#,
                    r#"(?i)role="[^"]*""#,
                ]),
            },
            PatternClass {
                source: PasteSource::RichTextEditor,
                weight: 0.1,
                patterns: compile(&[
                    "[\u{2018}\u{2019}\u{201C}\u{201D}\u{2013}\u{2014}]",
                    "\u{00A0}",
                    "[\u{200B}-\u{200D}]",
                ]),
            },
        ]
    })
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("provenance pattern must compile"))
        .collect()
}

/// Guess whether `content` was pasted from an external tool.
///
/// Confidence is the weighted sum of matched pattern classes, capped at 1.0;
/// `is_pasted` iff confidence exceeds the fixed threshold.
pub fn detect_provenance(content: &str) -> ProvenanceGuess {
    let mut sources = Vec::new();
    let mut score = 0.0f32;

    for class in pattern_classes() {
        if class.patterns.iter().any(|p| p.is_match(content)) {
            sources.push(class.source);
            score += class.weight;
        }
    }

    ProvenanceGuess {
        is_pasted: score > PASTED_THRESHOLD,
        confidence: score.min(1.0),
        sources,
    }
}
