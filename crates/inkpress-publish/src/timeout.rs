//! Size-derived timeout budget.

use std::time::Duration;

/// Overall time budget for one publish call, derived from the raw body size
/// before any processing. Computed once; retries share it.
pub fn timeout_for_content_size(content_bytes: usize) -> Duration {
    let secs = if content_bytes < 10_000 {
        15
    } else if content_bytes < 50_000 {
        30
    } else if content_bytes < 200_000 {
        60
    } else {
        120
    };
    Duration::from_secs(secs)
}
