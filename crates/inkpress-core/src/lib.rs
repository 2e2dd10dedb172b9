//! Inkpress Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration, and
//! shared constants used by the content publishing pipeline components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{ErrorMetadata, LogLevel, PublishError, Remediation};
