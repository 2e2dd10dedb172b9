//! Error types module
//!
//! All pipeline failures are unified under the `PublishError` enum. The
//! taxonomy exists so callers can distinguish "reject and fix input"
//! (validation) from "retry same input" (transient/timeout) from "asset too
//! large for this context" (compression/quota) and render the right
//! remediation message.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Remediation a caller should surface to the user for a given failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// The input itself is unusable; the user must change it.
    FixInput,
    /// The same input may succeed on a later attempt.
    RetrySameInput,
    /// The asset does not fit this context's budget or quota.
    ReduceAsset,
    /// Nothing the user can do; report or escalate.
    Report,
}

/// Metadata for error presentation - lets errors self-describe how they
/// should be surfaced without the caller matching on variants.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "VALIDATION_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same input may succeed
    fn is_retryable(&self) -> bool;

    /// What the caller should advise the user to do
    fn remediation(&self) -> Remediation;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    #[error("Publish failed after {attempts} attempts")]
    PublishFailed {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("Publish timed out after {timeout_ms} ms (content size {content_bytes} bytes)")]
    Timeout {
        timeout_ms: u64,
        content_bytes: usize,
    },

    #[error(
        "Image cannot be compressed under {budget_kb} KB ({actual_bytes} bytes after {passes} passes)"
    )]
    CompressionBudgetExceeded {
        budget_kb: u64,
        actual_bytes: usize,
        passes: u32,
    },

    #[error("Maximum {quota} images allowed per document")]
    QuotaExceeded { quota: usize },

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata per variant: (error_code, retryable, remediation, log_level).
/// `client_message` stays per-variant for dynamic content.
fn static_metadata(err: &PublishError) -> (&'static str, bool, Remediation, LogLevel) {
    match err {
        PublishError::Validation { .. } => (
            "VALIDATION_FAILED",
            false,
            Remediation::FixInput,
            LogLevel::Debug,
        ),
        PublishError::PublishFailed { .. } => (
            "PUBLISH_FAILED",
            true,
            Remediation::RetrySameInput,
            LogLevel::Error,
        ),
        PublishError::Timeout { .. } => (
            "PUBLISH_TIMEOUT",
            true,
            Remediation::RetrySameInput,
            LogLevel::Warn,
        ),
        PublishError::CompressionBudgetExceeded { .. } => (
            "COMPRESSION_BUDGET_EXCEEDED",
            false,
            Remediation::ReduceAsset,
            LogLevel::Warn,
        ),
        PublishError::QuotaExceeded { .. } => (
            "IMAGE_QUOTA_EXCEEDED",
            false,
            Remediation::ReduceAsset,
            LogLevel::Debug,
        ),
        PublishError::UnsupportedImageType(_) => (
            "UNSUPPORTED_IMAGE_TYPE",
            false,
            Remediation::FixInput,
            LogLevel::Debug,
        ),
        PublishError::ImageProcessing(_) => (
            "IMAGE_PROCESSING_ERROR",
            false,
            Remediation::FixInput,
            LogLevel::Warn,
        ),
        PublishError::Storage(_) => (
            "STORAGE_ERROR",
            true,
            Remediation::RetrySameInput,
            LogLevel::Error,
        ),
        PublishError::Internal(_) => (
            "INTERNAL_ERROR",
            false,
            Remediation::Report,
            LogLevel::Error,
        ),
    }
}

impl PublishError {
    /// Error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            PublishError::Validation { .. } => "Validation",
            PublishError::PublishFailed { .. } => "PublishFailed",
            PublishError::Timeout { .. } => "Timeout",
            PublishError::CompressionBudgetExceeded { .. } => "CompressionBudgetExceeded",
            PublishError::QuotaExceeded { .. } => "QuotaExceeded",
            PublishError::UnsupportedImageType(_) => "UnsupportedImageType",
            PublishError::ImageProcessing(_) => "ImageProcessing",
            PublishError::Storage(_) => "Storage",
            PublishError::Internal(_) => "Internal",
        }
    }

    /// Detailed error information including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for PublishError {
    fn error_code(&self) -> &'static str {
        static_metadata(self).0
    }

    fn is_retryable(&self) -> bool {
        static_metadata(self).1
    }

    fn remediation(&self) -> Remediation {
        static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            PublishError::Validation { errors } => errors.join("; "),
            PublishError::PublishFailed { .. } => {
                "Failed to save your post. Please try again.".to_string()
            }
            PublishError::Timeout { .. } => {
                "Saving took too long, likely because the content is large. Please try again."
                    .to_string()
            }
            PublishError::CompressionBudgetExceeded { budget_kb, .. } => {
                format!(
                    "This image cannot be reduced under {} KB. Please use a smaller image.",
                    budget_kb
                )
            }
            PublishError::QuotaExceeded { quota } => {
                format!("Maximum {} images allowed per document", quota)
            }
            PublishError::UnsupportedImageType(_) => {
                "Only JPEG, PNG, GIF, and WebP images are allowed".to_string()
            }
            PublishError::ImageProcessing(msg) => msg.clone(),
            PublishError::Storage(_) => "Failed to access storage".to_string(),
            PublishError::Internal(_) => "Internal error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_metadata() {
        let err = PublishError::Validation {
            errors: vec!["Title is required".to_string()],
        };
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert!(!err.is_retryable());
        assert_eq!(err.remediation(), Remediation::FixInput);
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(err.client_message(), "Title is required");
    }

    #[test]
    fn test_timeout_metadata() {
        let err = PublishError::Timeout {
            timeout_ms: 15_000,
            content_bytes: 1_024,
        };
        assert_eq!(err.error_code(), "PUBLISH_TIMEOUT");
        assert!(err.is_retryable());
        assert_eq!(err.remediation(), Remediation::RetrySameInput);
        assert!(err.to_string().contains("15000 ms"));
    }

    #[test]
    fn test_quota_metadata() {
        let err = PublishError::QuotaExceeded { quota: 2 };
        assert_eq!(err.error_code(), "IMAGE_QUOTA_EXCEEDED");
        assert_eq!(err.remediation(), Remediation::ReduceAsset);
        assert!(err.client_message().contains('2'));
    }

    #[test]
    fn test_publish_failed_carries_source() {
        let err = PublishError::PublishFailed {
            attempts: 3,
            source: anyhow::anyhow!("backend unavailable: connection reset"),
        };
        let details = err.detailed_message();
        assert!(details.contains("after 3 attempts"));
        assert!(details.contains("connection reset"));
    }
}
