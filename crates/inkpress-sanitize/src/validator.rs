//! Content and metadata validation.
//!
//! Failure semantics are deliberately asymmetric: only the size ceiling and a
//! missing/over-length title are hard errors. Everything else degrades to a
//! warning plus a best-effort sanitized body, so publishing never fails for
//! cosmetically imperfect pasted content.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use inkpress_core::config::PipelineConfig;
use inkpress_core::models::ValidationResult;

use crate::markup::{self, AllowListSanitizer, MarkupSanitizer};
use crate::normalize;
use crate::provenance::detect_provenance;

/// Which steps of the full pipeline to run.
#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    pub sanitize: bool,
    pub validate_size: bool,
    pub strip_empty_tags: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            sanitize: true,
            validate_size: true,
            strip_empty_tags: true,
        }
    }
}

/// Validates and sanitizes a single document. Stateless; safe to share
/// across concurrent calls.
pub struct ContentValidator {
    config: PipelineConfig,
    sanitizer: Arc<dyn MarkupSanitizer>,
}

fn img_tag_re() -> &'static Regex {
    static IMG: OnceLock<Regex> = OnceLock::new();
    IMG.get_or_init(|| Regex::new(r"(?i)<img[^>]+>").expect("img pattern must compile"))
}

fn slug_re() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern must compile"))
}

impl ContentValidator {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_sanitizer(config, Arc::new(AllowListSanitizer::new()))
    }

    /// Inject a different markup-sanitizing capability (e.g. for tests).
    pub fn with_sanitizer(config: PipelineConfig, sanitizer: Arc<dyn MarkupSanitizer>) -> Self {
        Self { config, sanitizer }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full validation pipeline over a raw document body.
    pub fn validate(&self, raw_body: &str, options: &ValidateOptions) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let guess = detect_provenance(raw_body);
        let mut processed = raw_body.to_string();
        if guess.is_pasted {
            let labels: Vec<&str> = guess.sources.iter().map(|s| s.label()).collect();
            tracing::debug!(
                confidence = guess.confidence,
                sources = ?labels,
                "pasted content detected"
            );
            warnings.push(format!(
                "Detected content from: {}. Auto-cleaning applied.",
                labels.join(", ")
            ));
            // Entity decoding is not idempotent, so it only runs during
            // paste cleanup and at most once per document.
            processed = normalize::repair_entities(&processed);
        }

        processed = normalize::normalize_typography(&processed);
        processed = markup::strip_vendor_markup(&processed);
        processed = normalize::normalize_whitespace(&processed);

        if options.validate_size && processed.len() > self.config.max_content_bytes {
            errors.push(format!(
                "Content size ({} KB) exceeds maximum allowed size ({} KB)",
                processed.len() / 1024,
                self.config.max_content_bytes / 1024
            ));
        }

        if options.sanitize {
            processed = self.sanitizer.sanitize(&processed);
        }

        if options.strip_empty_tags {
            processed = markup::prune_empty_tags(&processed);
        }

        let image_count = img_tag_re().find_iter(&processed).count();
        if image_count > self.config.embedded_image_warn_threshold {
            warnings.push(format!(
                "Content contains {} images, which may slow down loading",
                image_count
            ));
        }

        ValidationResult::from_parts(errors, warnings, Some(processed))
    }

    /// Reduced-validation mode for large documents: unconditional
    /// script-construct stripping plus the size ceiling, nothing else.
    ///
    /// Skipping the full pipeline here is a deliberate correctness/latency
    /// trade-off: pasted-artifact cleanup is O(body) regex work, and above
    /// the fast-path threshold the processing cost would dominate the save.
    pub fn validate_fast(&self, raw_body: &str) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let processed = markup::strip_script_constructs(raw_body);

        if processed.len() > self.config.max_content_bytes {
            errors.push(format!(
                "Content size ({} KB) exceeds maximum allowed size ({} KB)",
                processed.len() / 1024,
                self.config.max_content_bytes / 1024
            ));
        } else {
            warnings.push("Large document: reduced sanitization applied.".to_string());
        }

        ValidationResult::from_parts(errors, warnings, Some(processed))
    }

    /// Validate document metadata. Title problems are errors; excerpt and
    /// slug problems only warn.
    pub fn validate_metadata(
        &self,
        title: &str,
        excerpt: Option<&str>,
        slug: Option<&str>,
    ) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let title_chars = title.chars().count();
        if title.trim().is_empty() {
            errors.push("Title is required".to_string());
        } else if title_chars > self.config.max_title_chars {
            errors.push(format!(
                "Title is too long ({}/{} characters)",
                title_chars, self.config.max_title_chars
            ));
        }

        if let Some(excerpt) = excerpt {
            let excerpt_chars = excerpt.chars().count();
            if excerpt_chars > self.config.max_excerpt_chars {
                warnings.push(format!(
                    "Excerpt is quite long ({}/{} characters)",
                    excerpt_chars, self.config.max_excerpt_chars
                ));
            }
        }

        if let Some(slug) = slug {
            if !slug_re().is_match(slug) {
                warnings.push(
                    "Slug should only contain lowercase letters, numbers, and hyphens".to_string(),
                );
            }
        }

        ValidationResult::from_parts(errors, warnings, None)
    }
}
