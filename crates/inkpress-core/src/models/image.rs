use bytes::Bytes;

use crate::constants::CONTENT_IMAGE_QUOTA;

/// Where an ingested image will be used. Each context carries its own byte
/// budget, dimension ceiling, and starting encode quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageContext {
    /// Avatar-sized assets.
    Profile,
    /// Assets embedded in a document body.
    Content,
}

impl ImageContext {
    /// Byte budget for the final asset, in kilobytes.
    pub fn max_size_kb(&self) -> u64 {
        match self {
            ImageContext::Profile => 50,
            ImageContext::Content => 100,
        }
    }

    pub fn max_size_bytes(&self) -> usize {
        (self.max_size_kb() * 1024) as usize
    }

    /// Pixel-dimension ceiling (width, height).
    pub fn max_dimensions(&self) -> (u32, u32) {
        match self {
            ImageContext::Profile => (400, 400),
            ImageContext::Content => (1920, 1080),
        }
    }

    /// Quality factor for the first encode pass.
    pub fn initial_quality(&self) -> f32 {
        match self {
            ImageContext::Profile => 0.7,
            ImageContext::Content => 0.8,
        }
    }

    /// Per-document asset quota, if this context enforces one.
    pub fn asset_quota(&self) -> Option<usize> {
        match self {
            ImageContext::Profile => None,
            ImageContext::Content => Some(CONTENT_IMAGE_QUOTA),
        }
    }

    /// Object-name prefix used by the storage path scheme.
    pub fn prefix(&self) -> &'static str {
        match self {
            ImageContext::Profile => "profile",
            ImageContext::Content => "content",
        }
    }
}

/// One binary asset after it has passed the image gate.
///
/// Invariant: when the original already met the byte budget,
/// `was_compressed` is false and `compressed_bytes` equals `original_bytes`.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub original_bytes: Bytes,
    pub compressed_bytes: Bytes,
    /// Mime type of `compressed_bytes` (may differ from the original when the
    /// gate had to re-encode).
    pub mime_type: String,
    /// Dimensions of the final asset, post-decode.
    pub width: u32,
    pub height: u32,
    pub was_compressed: bool,
    pub original_size_label: String,
    pub new_size_label: String,
}

/// Human-readable byte count, e.g. "117.19 KB".
pub fn format_file_size(bytes: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_budgets() {
        assert_eq!(ImageContext::Profile.max_size_kb(), 50);
        assert_eq!(ImageContext::Content.max_size_kb(), 100);
        assert_eq!(ImageContext::Profile.max_dimensions(), (400, 400));
        assert_eq!(ImageContext::Content.max_dimensions(), (1920, 1080));
        assert_eq!(ImageContext::Profile.initial_quality(), 0.7);
        assert_eq!(ImageContext::Content.initial_quality(), 0.8);
    }

    #[test]
    fn test_quota_only_for_content() {
        assert_eq!(ImageContext::Profile.asset_quota(), None);
        assert_eq!(ImageContext::Content.asset_quota(), Some(2));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(120_000), "117.19 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2 MB");
    }
}
