//! The publish orchestrator itself.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use inkpress_core::config::PipelineConfig;
use inkpress_core::models::{DocumentFields, DocumentStatus, PersistedDocument};
use inkpress_core::PublishError;
use inkpress_sanitize::{reading_time_minutes, slugify, ContentValidator, ValidateOptions};

use crate::progress::{ProgressObserver, ProgressUpdate, PublishStep};
use crate::timeout::timeout_for_content_size;
use crate::traits::{IdentityProvider, PersistenceError, PersistenceStore};

/// Whether this call creates a new document or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    Create,
    Update(Uuid),
}

/// Everything the caller supplies for one publish.
#[derive(Debug, Clone)]
pub struct PublishInput {
    pub title: String,
    pub raw_body: String,
    pub excerpt: Option<String>,
    /// Already-ingested asset URL, if the document has a cover image.
    pub featured_image: Option<String>,
    pub category_id: Option<Uuid>,
    pub tag_ids: Vec<Uuid>,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub document: PersistedDocument,
    /// Non-fatal problems encountered along the way, in occurrence order.
    pub warnings: Vec<String>,
}

/// Drives one document save end to end. Cheap to share; all collaborators
/// sit behind `Arc`.
pub struct Publisher<S, I> {
    store: Arc<S>,
    identity: Arc<I>,
    validator: ContentValidator,
    config: PipelineConfig,
}

impl<S, I> Publisher<S, I>
where
    S: PersistenceStore + 'static,
    I: IdentityProvider,
{
    pub fn new(store: Arc<S>, identity: Arc<I>, config: PipelineConfig) -> Self {
        Self {
            store,
            identity,
            validator: ContentValidator::new(config.clone()),
            config,
        }
    }

    /// Publish a document under a size-derived time budget.
    ///
    /// The budget is computed once from the raw body size and covers the
    /// entire run including every retry. When it fires, the in-flight
    /// persistence attempt is not cancelled; a write already on its way to
    /// the backend may still land after this returns `Timeout`.
    pub async fn publish(
        &self,
        mode: PublishMode,
        input: PublishInput,
        progress: &dyn ProgressObserver,
    ) -> Result<PublishOutcome, PublishError> {
        let content_bytes = input.raw_body.len();
        let budget = timeout_for_content_size(content_bytes);
        progress.on_progress(ProgressUpdate {
            step: PublishStep::Analyzing,
            percent: 0,
        });

        match tokio::time::timeout(budget, self.run(mode, input, progress)).await {
            Ok(Ok(outcome)) => {
                progress.on_progress(ProgressUpdate {
                    step: PublishStep::Done,
                    percent: 100,
                });
                Ok(outcome)
            }
            Ok(Err(err)) => {
                progress.on_progress(ProgressUpdate {
                    step: PublishStep::Failed,
                    percent: 100,
                });
                Err(err)
            }
            Err(_) => {
                warn!(
                    timeout_ms = budget.as_millis() as u64,
                    content_bytes, "publish timed out"
                );
                progress.on_progress(ProgressUpdate {
                    step: PublishStep::TimedOut,
                    percent: 100,
                });
                Err(PublishError::Timeout {
                    timeout_ms: budget.as_millis() as u64,
                    content_bytes,
                })
            }
        }
    }

    async fn run(
        &self,
        mode: PublishMode,
        input: PublishInput,
        progress: &dyn ProgressObserver,
    ) -> Result<PublishOutcome, PublishError> {
        let actor = self
            .identity
            .current_actor()
            .await
            .map_err(|e| PublishError::Validation {
                errors: vec![e.to_string()],
            })?;
        if !actor.can_publish() {
            return Err(PublishError::Validation {
                errors: vec!["You do not have permission to publish".to_string()],
            });
        }

        progress.on_progress(ProgressUpdate {
            step: PublishStep::Preparing,
            percent: 10,
        });

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let metadata = self
            .validator
            .validate_metadata(&input.title, input.excerpt.as_deref(), None);
        errors.extend(metadata.errors);
        warnings.extend(metadata.warnings);

        progress.on_progress(ProgressUpdate {
            step: PublishStep::Processing,
            percent: 20,
        });

        let body = if input.raw_body.len() > self.config.fast_path_threshold_bytes {
            self.validator.validate_fast(&input.raw_body)
        } else {
            self.validator
                .validate(&input.raw_body, &ValidateOptions::default())
        };
        errors.extend(body.errors);
        warnings.extend(body.warnings);

        if !errors.is_empty() {
            return Err(PublishError::Validation { errors });
        }
        let content = body.processed_content.unwrap_or_default();

        let fields = DocumentFields {
            slug: slugify(&input.title),
            reading_time_minutes: reading_time_minutes(&content),
            published_at: matches!(input.status, DocumentStatus::Published).then(Utc::now),
            title: input.title.trim().to_string(),
            content,
            excerpt: input.excerpt,
            featured_image: input.featured_image,
            status: input.status,
            author_id: actor.user_id,
            category_id: input.category_id,
        };

        progress.on_progress(ProgressUpdate {
            step: PublishStep::Persisting,
            percent: 50,
        });

        let persisted = self.persist_with_retry(mode, &fields).await?;

        progress.on_progress(ProgressUpdate {
            step: PublishStep::Finalizing,
            percent: 85,
        });

        // Tag associations are secondary: the document is already saved, so
        // a failure here downgrades to a warning instead of undoing the
        // write.
        if let Err(e) = self
            .store
            .replace_associations(persisted.id, &input.tag_ids)
            .await
        {
            warn!(
                document_id = %persisted.id,
                error = %e,
                "tag association update failed, document saved without updated tags"
            );
            warnings.push(format!("Saved, but tag updates failed: {}", e));
        }

        info!(
            document_id = %persisted.id,
            slug = %persisted.slug,
            status = fields.status.as_str(),
            "document published"
        );

        Ok(PublishOutcome {
            document: persisted,
            warnings,
        })
    }

    /// Retry loop around the persistence write.
    ///
    /// Each attempt runs on its own task so that dropping this future (the
    /// outer timeout firing) cannot cancel a write that already reached the
    /// backend. Transient failures back off exponentially; rejections stop
    /// the loop immediately.
    async fn persist_with_retry(
        &self,
        mode: PublishMode,
        fields: &DocumentFields,
    ) -> Result<PersistedDocument, PublishError> {
        let max_attempts = self.config.max_persist_attempts.max(1);
        let mut last_error: Option<PersistenceError> = None;
        let mut attempts = 0;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay_ms = self.config.retry_base_delay_ms * 2u64.pow(attempt - 2);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            attempts = attempt;

            let store = Arc::clone(&self.store);
            let fields = fields.clone();
            let handle = tokio::spawn(async move {
                match mode {
                    PublishMode::Create => store.insert_document(&fields).await,
                    PublishMode::Update(id) => store.update_document(id, &fields).await,
                }
            });

            match handle.await {
                Ok(Ok(doc)) => return Ok(doc),
                Ok(Err(e)) => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        "persistence attempt failed"
                    );
                    let transient = e.is_transient();
                    last_error = Some(e);
                    if !transient {
                        break;
                    }
                }
                Err(join_err) => {
                    return Err(PublishError::Internal(format!(
                        "persistence task failed: {}",
                        join_err
                    )));
                }
            }
        }

        let source = match last_error {
            Some(e) => anyhow::Error::new(e),
            None => anyhow::anyhow!("no persistence attempt was made"),
        };
        Err(PublishError::PublishFailed { attempts, source })
    }
}
