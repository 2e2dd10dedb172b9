//! Admission checks for binary assets.

use bytes::Bytes;
use image::GenericImageView;
use tracing::{debug, info};

use inkpress_core::models::{format_file_size, ImageAsset, ImageContext};

use crate::compression::{self, compress_to_budget};
use crate::error::ImageGateError;

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Validates an asset against its context's rules and compresses it under
/// the byte budget when needed. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageGate;

impl ImageGate {
    pub fn new() -> Self {
        Self
    }

    /// Admit one asset.
    ///
    /// `current_asset_count` is how many assets the document already holds
    /// in this context; the quota check runs before any decode or encode
    /// work is spent on the new asset.
    pub fn admit(
        &self,
        data: Bytes,
        mime_type: &str,
        context: ImageContext,
        current_asset_count: usize,
    ) -> Result<ImageAsset, ImageGateError> {
        if !ALLOWED_MIME_TYPES.contains(&mime_type) {
            return Err(ImageGateError::UnsupportedType(mime_type.to_string()));
        }

        if let Some(quota) = context.asset_quota() {
            if current_asset_count >= quota {
                return Err(ImageGateError::QuotaExceeded { quota });
            }
        }

        let original_len = data.len();
        let budget = context.max_size_bytes();

        if original_len <= budget {
            let (width, height) = compression::decode(&data)?.dimensions();
            debug!(
                context = context.prefix(),
                size_bytes = original_len,
                "asset under budget, passing through"
            );
            return Ok(ImageAsset {
                original_bytes: data.clone(),
                compressed_bytes: data,
                mime_type: mime_type.to_string(),
                width,
                height,
                was_compressed: false,
                original_size_label: format_file_size(original_len),
                new_size_label: format_file_size(original_len),
            });
        }

        let outcome = compress_to_budget(&data, context)?;
        info!(
            context = context.prefix(),
            original_bytes = original_len,
            compressed_bytes = outcome.bytes.len(),
            passes = outcome.passes,
            "asset compressed under budget"
        );

        let compressed_len = outcome.bytes.len();
        Ok(ImageAsset {
            original_bytes: data,
            compressed_bytes: outcome.bytes,
            mime_type: "image/jpeg".to_string(),
            width: outcome.width,
            height: outcome.height,
            was_compressed: true,
            original_size_label: format_file_size(original_len),
            new_size_label: format_file_size(compressed_len),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{noisy_alpha_image, png_bytes, tiny_png};

    #[test]
    fn test_under_budget_passes_through_unchanged() {
        let data = Bytes::from(tiny_png());
        let asset = ImageGate::new()
            .admit(data.clone(), "image/png", ImageContext::Profile, 0)
            .unwrap();

        assert!(!asset.was_compressed);
        assert_eq!(asset.compressed_bytes, data);
        assert_eq!(asset.mime_type, "image/png");
        assert_eq!((asset.width, asset.height), (16, 16));
        assert_eq!(asset.original_size_label, asset.new_size_label);
    }

    #[test]
    fn test_over_budget_is_compressed() {
        let data = Bytes::from(png_bytes(&noisy_alpha_image(800, 800)));
        assert!(data.len() > ImageContext::Content.max_size_bytes());

        let asset = ImageGate::new()
            .admit(data, "image/png", ImageContext::Content, 0)
            .unwrap();

        assert!(asset.was_compressed);
        assert!(asset.compressed_bytes.len() <= ImageContext::Content.max_size_bytes());
        assert_eq!(asset.mime_type, "image/jpeg");
        assert!(asset.width <= 1920 && asset.height <= 1080);
        assert_ne!(asset.original_size_label, asset.new_size_label);
    }

    #[test]
    fn test_unsupported_mime_type_rejected() {
        let err = ImageGate::new()
            .admit(
                Bytes::from(tiny_png()),
                "image/tiff",
                ImageContext::Profile,
                0,
            )
            .unwrap_err();
        assert!(matches!(err, ImageGateError::UnsupportedType(t) if t == "image/tiff"));
    }

    #[test]
    fn test_quota_checked_before_any_decode() {
        // Garbage bytes prove no decode happens: a decode attempt would
        // raise Decode, not QuotaExceeded.
        let err = ImageGate::new()
            .admit(
                Bytes::from_static(b"definitely not an image"),
                "image/jpeg",
                ImageContext::Content,
                2,
            )
            .unwrap_err();
        assert!(matches!(err, ImageGateError::QuotaExceeded { quota: 2 }));
    }

    #[test]
    fn test_profile_context_has_no_quota() {
        let asset = ImageGate::new()
            .admit(Bytes::from(tiny_png()), "image/png", ImageContext::Profile, 99)
            .unwrap();
        assert!(!asset.was_compressed);
    }
}
