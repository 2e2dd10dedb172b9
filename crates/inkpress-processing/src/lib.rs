//! Image ingestion gate.
//!
//! Binary assets enter through [`ImageGate::admit`], which enforces the
//! per-context mime allow-list, asset quota, byte budget, and dimension
//! ceiling. Oversized assets are re-encoded toward the budget with at most
//! two lossy passes. [`ImageIngestor`] wraps the gate and pushes admitted
//! assets to a [`MediaStorage`] backend.

pub mod compression;
pub mod error;
pub mod gate;
pub mod ingest;

#[cfg(test)]
pub(crate) mod testutil;

pub use compression::{compress_to_budget, corrected_quality, CompressionOutcome};
pub use error::ImageGateError;
pub use gate::ImageGate;
pub use ingest::{ImageIngestor, IngestedImage, MediaStorage, StorageError};
