//! Publish progress reporting.

use serde::Serialize;

/// Coarse stage of a publish run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStep {
    Analyzing,
    Preparing,
    Processing,
    Persisting,
    Finalizing,
    Done,
    Failed,
    TimedOut,
}

impl PublishStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStep::Analyzing => "analyzing",
            PublishStep::Preparing => "preparing",
            PublishStep::Processing => "processing",
            PublishStep::Persisting => "persisting",
            PublishStep::Finalizing => "finalizing",
            PublishStep::Done => "done",
            PublishStep::Failed => "failed",
            PublishStep::TimedOut => "timed_out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    pub step: PublishStep,
    pub percent: u8,
}

/// Receives stage transitions during a publish run. Callbacks must be cheap;
/// they execute inline on the orchestrator's task.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, update: ProgressUpdate);
}

/// Observer that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressObserver for NoOpProgress {
    fn on_progress(&self, _update: ProgressUpdate) {}
}
