use inkpress_core::PublishError;
use thiserror::Error;

/// Failures raised by the image gate.
#[derive(Debug, Error)]
pub enum ImageGateError {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Maximum {quota} images allowed per document")]
    QuotaExceeded { quota: usize },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Image is still {actual_bytes} bytes after {passes} passes (budget {budget_kb} KB)")]
    BudgetExceeded {
        budget_kb: u64,
        actual_bytes: usize,
        passes: u32,
    },
}

impl From<ImageGateError> for PublishError {
    fn from(err: ImageGateError) -> Self {
        match err {
            ImageGateError::UnsupportedType(t) => PublishError::UnsupportedImageType(t),
            ImageGateError::QuotaExceeded { quota } => PublishError::QuotaExceeded { quota },
            ImageGateError::Decode(msg) | ImageGateError::Encode(msg) => {
                PublishError::ImageProcessing(msg)
            }
            ImageGateError::BudgetExceeded {
                budget_kb,
                actual_bytes,
                passes,
            } => PublishError::CompressionBudgetExceeded {
                budget_kb,
                actual_bytes,
                passes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpress_core::ErrorMetadata;

    #[test]
    fn test_gate_errors_map_to_pipeline_taxonomy() {
        let err: PublishError = ImageGateError::QuotaExceeded { quota: 2 }.into();
        assert_eq!(err.error_code(), "IMAGE_QUOTA_EXCEEDED");

        let err: PublishError = ImageGateError::UnsupportedType("image/tiff".to_string()).into();
        assert_eq!(err.error_code(), "UNSUPPORTED_IMAGE_TYPE");

        let err: PublishError = ImageGateError::BudgetExceeded {
            budget_kb: 50,
            actual_bytes: 80_000,
            passes: 2,
        }
        .into();
        assert_eq!(err.error_code(), "COMPRESSION_BUDGET_EXCEEDED");
        assert!(!err.is_retryable());
    }
}
