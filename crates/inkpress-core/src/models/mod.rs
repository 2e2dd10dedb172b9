//! Domain models for the publishing pipeline.
//!
//! All of these are request-scoped: created and discarded within a single
//! publish or upload call, never shared mutably across calls.

pub mod actor;
pub mod document;
pub mod image;
pub mod validation;

pub use actor::{Actor, UserRole};
pub use document::{ContentDocument, DocumentFields, DocumentStatus, PersistedDocument};
pub use image::{format_file_size, ImageAsset, ImageContext};
pub use validation::{PasteSource, ProvenanceGuess, ValidationResult};
