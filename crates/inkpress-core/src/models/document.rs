use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Published,
    Archived,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Published => "published",
            DocumentStatus::Archived => "archived",
        }
    }
}

/// A user-authored document as it travels through the pipeline.
///
/// `sanitized_body` is only populated after validation succeeds (or partially
/// succeeds with warnings); it is never handed to persistence otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDocument {
    pub raw_body: String,
    pub sanitized_body: Option<String>,
    pub title: String,
    pub excerpt: Option<String>,
}

impl ContentDocument {
    pub fn new(title: impl Into<String>, raw_body: impl Into<String>) -> Self {
        Self {
            raw_body: raw_body.into(),
            sanitized_body: None,
            title: title.into(),
            excerpt: None,
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }
}

/// The persistence payload for one document write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFields {
    pub title: String,
    pub slug: String,
    /// Sanitized markup; validation must have produced a valid result.
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: DocumentStatus,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub reading_time_minutes: u32,
    /// Set exactly when `status` is `Published`.
    pub published_at: Option<DateTime<Utc>>,
}

/// What the persistence collaborator hands back after a successful write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub id: Uuid,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(DocumentStatus::Draft.as_str(), "draft");
        assert_eq!(DocumentStatus::Published.as_str(), "published");
        assert_eq!(DocumentStatus::Archived.as_str(), "archived");
    }

    #[test]
    fn test_status_serialization_matches_as_str() {
        for status in [
            DocumentStatus::Draft,
            DocumentStatus::Published,
            DocumentStatus::Archived,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_content_document_builder() {
        let doc = ContentDocument::new("Hello", "<p>World</p>").with_excerpt("greeting");
        assert_eq!(doc.title, "Hello");
        assert_eq!(doc.excerpt.as_deref(), Some("greeting"));
        assert!(doc.sanitized_body.is_none());
    }
}
