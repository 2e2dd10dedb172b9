//! Configuration module
//!
//! Pipeline limits and retry settings with sensible defaults. Every value can
//! be overridden through `INKPRESS_*` environment variables for deployments
//! that need different budgets.

use std::env;

use crate::constants;

/// Tunable limits for the publishing pipeline.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Hard ceiling on serialized markup size in bytes.
    pub max_content_bytes: usize,
    pub max_title_chars: usize,
    pub max_excerpt_chars: usize,
    /// Bodies above this take the reduced-sanitization fast path.
    pub fast_path_threshold_bytes: usize,
    pub embedded_image_warn_threshold: usize,
    /// Media assets permitted per document in the content context.
    pub content_image_quota: usize,
    pub max_persist_attempts: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: constants::MAX_CONTENT_BYTES,
            max_title_chars: constants::MAX_TITLE_CHARS,
            max_excerpt_chars: constants::MAX_EXCERPT_CHARS,
            fast_path_threshold_bytes: constants::FAST_PATH_THRESHOLD_BYTES,
            embedded_image_warn_threshold: constants::EMBEDDED_IMAGE_WARN_THRESHOLD,
            content_image_quota: constants::CONTENT_IMAGE_QUOTA,
            max_persist_attempts: constants::MAX_PERSIST_ATTEMPTS,
            retry_base_delay_ms: constants::RETRY_BASE_DELAY_MS,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Reads a `.env` file when present (ignored if missing), in the same way
    /// the rest of the application configures itself.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            max_content_bytes: env_parse("INKPRESS_MAX_CONTENT_BYTES", defaults.max_content_bytes),
            max_title_chars: env_parse("INKPRESS_MAX_TITLE_CHARS", defaults.max_title_chars),
            max_excerpt_chars: env_parse("INKPRESS_MAX_EXCERPT_CHARS", defaults.max_excerpt_chars),
            fast_path_threshold_bytes: env_parse(
                "INKPRESS_FAST_PATH_THRESHOLD_BYTES",
                defaults.fast_path_threshold_bytes,
            ),
            embedded_image_warn_threshold: env_parse(
                "INKPRESS_EMBEDDED_IMAGE_WARN_THRESHOLD",
                defaults.embedded_image_warn_threshold,
            ),
            content_image_quota: env_parse(
                "INKPRESS_CONTENT_IMAGE_QUOTA",
                defaults.content_image_quota,
            ),
            max_persist_attempts: env_parse(
                "INKPRESS_MAX_PERSIST_ATTEMPTS",
                defaults.max_persist_attempts,
            ),
            retry_base_delay_ms: env_parse(
                "INKPRESS_RETRY_BASE_DELAY_MS",
                defaults.retry_base_delay_ms,
            ),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
