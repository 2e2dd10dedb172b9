//! Publish orchestrator.
//!
//! [`Publisher`] drives a document save end to end: resolve the acting user,
//! validate and sanitize, persist with bounded retries, then update
//! secondary associations. The whole sequence runs under a single
//! size-derived timeout computed once at call start; retries never extend
//! it. Persistence attempts run on their own task, so an attempt already in
//! flight when the timeout fires may still land after the caller has seen
//! the timeout error.

pub mod progress;
pub mod publisher;
pub mod timeout;
pub mod traits;

pub use progress::{NoOpProgress, ProgressObserver, ProgressUpdate, PublishStep};
pub use publisher::{PublishInput, PublishMode, PublishOutcome, Publisher};
pub use timeout::timeout_for_content_size;
pub use traits::{IdentityError, IdentityProvider, PersistenceError, PersistenceStore};
