//! Storage-backed ingestion of admitted assets.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use inkpress_core::models::ImageContext;
use inkpress_core::PublishError;

use crate::gate::ImageGate;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid object name: {0}")]
    InvalidName(String),
}

/// Media storage backend abstraction.
///
/// Implementations hold uploaded assets under flat object names and serve
/// them at a public URL.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store an object and return its public URL.
    async fn store(
        &self,
        object_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<String, StorageError>;

    async fn delete(&self, object_name: &str) -> Result<(), StorageError>;
}

/// An asset that cleared the gate and landed in storage.
#[derive(Debug, Clone)]
pub struct IngestedImage {
    pub url: String,
    pub object_name: String,
    pub was_compressed: bool,
    pub original_size_label: String,
    pub new_size_label: String,
}

/// Runs assets through the gate and uploads the result.
pub struct ImageIngestor<S> {
    gate: ImageGate,
    storage: S,
}

impl<S: MediaStorage> ImageIngestor<S> {
    pub fn new(storage: S) -> Self {
        Self {
            gate: ImageGate::new(),
            storage,
        }
    }

    pub async fn ingest(
        &self,
        data: Bytes,
        mime_type: &str,
        context: ImageContext,
        current_asset_count: usize,
    ) -> Result<IngestedImage, PublishError> {
        let asset = self
            .gate
            .admit(data, mime_type, context, current_asset_count)?;

        let object_name = object_name(context, &asset.mime_type);
        let url = self
            .storage
            .store(&object_name, &asset.mime_type, asset.compressed_bytes.clone())
            .await
            .map_err(|e| PublishError::Storage(e.to_string()))?;

        info!(
            object_name = %object_name,
            was_compressed = asset.was_compressed,
            size = %asset.new_size_label,
            "image ingested"
        );

        Ok(IngestedImage {
            url,
            object_name,
            was_compressed: asset.was_compressed,
            original_size_label: asset.original_size_label,
            new_size_label: asset.new_size_label,
        })
    }
}

/// `uploads/{context}_{millis}_{entropy}.{ext}`; the entropy suffix keeps
/// same-millisecond uploads from colliding.
fn object_name(context: ImageContext, mime_type: &str) -> String {
    let ext = match mime_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    };
    let entropy = Uuid::new_v4().simple().to_string();
    format!(
        "uploads/{}_{}_{}.{}",
        context.prefix(),
        Utc::now().timestamp_millis(),
        &entropy[..8],
        ext
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{noisy_alpha_image, png_bytes, tiny_png};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStorage {
        stored: Mutex<Vec<(String, String, usize)>>,
    }

    #[async_trait]
    impl MediaStorage for RecordingStorage {
        async fn store(
            &self,
            object_name: &str,
            content_type: &str,
            data: Bytes,
        ) -> Result<String, StorageError> {
            self.stored.lock().unwrap().push((
                object_name.to_string(),
                content_type.to_string(),
                data.len(),
            ));
            Ok(format!("https://cdn.example.com/{}", object_name))
        }

        async fn delete(&self, _object_name: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    struct FailingStorage;

    #[async_trait]
    impl MediaStorage for FailingStorage {
        async fn store(&self, _: &str, _: &str, _: Bytes) -> Result<String, StorageError> {
            Err(StorageError::UploadFailed("bucket offline".to_string()))
        }

        async fn delete(&self, _: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_ingest_stores_and_returns_url() {
        let ingestor = ImageIngestor::new(RecordingStorage::default());
        let ingested = ingestor
            .ingest(Bytes::from(tiny_png()), "image/png", ImageContext::Profile, 0)
            .await
            .unwrap();

        assert!(ingested.url.starts_with("https://cdn.example.com/uploads/profile_"));
        assert!(ingested.object_name.ends_with(".png"));
        assert!(!ingested.was_compressed);
    }

    #[tokio::test]
    async fn test_ingest_uploads_compressed_bytes() {
        let ingestor = ImageIngestor::new(RecordingStorage::default());
        let original = Bytes::from(png_bytes(&noisy_alpha_image(800, 800)));
        let original_len = original.len();

        let ingested = ingestor
            .ingest(original, "image/png", ImageContext::Content, 0)
            .await
            .unwrap();

        assert!(ingested.was_compressed);
        assert!(ingested.object_name.ends_with(".jpg"));

        let stored = ingestor.storage.stored.lock().unwrap();
        let (name, content_type, len) = &stored[0];
        assert_eq!(name, &ingested.object_name);
        assert_eq!(content_type, "image/jpeg");
        assert!(*len <= ImageContext::Content.max_size_bytes());
        assert!(*len < original_len);
    }

    #[tokio::test]
    async fn test_quota_rejection_never_touches_storage() {
        let ingestor = ImageIngestor::new(RecordingStorage::default());
        let err = ingestor
            .ingest(Bytes::from(tiny_png()), "image/png", ImageContext::Content, 2)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::QuotaExceeded { quota: 2 }));
        assert!(ingestor.storage.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_maps_to_storage_error() {
        let ingestor = ImageIngestor::new(FailingStorage);
        let err = ingestor
            .ingest(Bytes::from(tiny_png()), "image/png", ImageContext::Profile, 0)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Storage(_)));
        assert!(err.to_string().contains("bucket offline"));
    }
}
