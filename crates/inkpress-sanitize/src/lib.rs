//! Inkpress Sanitizer Library
//!
//! Pure content sanitization and validation for user-authored markup, with a
//! special focus on content copy-pasted from word processors, web pages, and
//! rich text editors. Everything in this crate is stateless and safe to call
//! concurrently; no function here performs I/O.

pub mod markup;
pub mod normalize;
pub mod provenance;
pub mod text;
pub mod validator;

// Re-export commonly used types
pub use markup::{AllowListSanitizer, MarkupSanitizer};
pub use provenance::detect_provenance;
pub use text::{extract_text, has_meaningful_text, reading_time_minutes, slugify, unique_slug};
pub use validator::{ContentValidator, ValidateOptions};
