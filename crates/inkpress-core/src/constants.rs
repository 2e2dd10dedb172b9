//! Shared limits and budgets for the publishing pipeline.

/// Hard ceiling on serialized markup size. Violations are errors, never warnings.
pub const MAX_CONTENT_BYTES: usize = 5 * 1024 * 1024;

/// Required title, bounded length.
pub const MAX_TITLE_CHARS: usize = 200;

/// Excerpt length above which a warning (not an error) is emitted.
pub const MAX_EXCERPT_CHARS: usize = 500;

/// Bodies longer than this skip full sanitization and receive only
/// unconditional script-construct stripping.
pub const FAST_PATH_THRESHOLD_BYTES: usize = 50_000;

/// Embedded `<img>` count above which a content-quality warning is emitted.
pub const EMBEDDED_IMAGE_WARN_THRESHOLD: usize = 10;

/// Media assets permitted per document in the content context.
pub const CONTENT_IMAGE_QUOTA: usize = 2;

/// Persistence attempts per publish call, including the first.
pub const MAX_PERSIST_ATTEMPTS: u32 = 3;

/// Base delay for the exponential retry backoff.
pub const RETRY_BASE_DELAY_MS: u64 = 1_000;

/// Average reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 230;
