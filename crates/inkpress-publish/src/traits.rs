//! Collaborator abstractions the orchestrator depends on.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use inkpress_core::models::{Actor, DocumentFields, PersistedDocument};

/// Persistence failures, split by whether a retry can help.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// Backend hiccup; the same write may succeed on a later attempt.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the write; retrying the same payload is futile.
    #[error("Write rejected: {0}")]
    Rejected(String),
}

impl PersistenceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, PersistenceError::Unavailable(_))
    }
}

/// Document persistence backend.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    async fn insert_document(
        &self,
        fields: &DocumentFields,
    ) -> Result<PersistedDocument, PersistenceError>;

    async fn update_document(
        &self,
        id: Uuid,
        fields: &DocumentFields,
    ) -> Result<PersistedDocument, PersistenceError>;

    /// Replace the document's tag set wholesale (clear then re-add).
    async fn replace_associations(
        &self,
        document_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<(), PersistenceError>;
}

#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("You must be signed in to publish")]
    Unauthenticated,

    #[error("Not authorized: {0}")]
    Forbidden(String),
}

/// Resolves the acting user for the current call.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_actor(&self) -> Result<Actor, IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_transient() {
        assert!(PersistenceError::Unavailable("reset".to_string()).is_transient());
        assert!(!PersistenceError::Rejected("bad row".to_string()).is_transient());
    }
}
