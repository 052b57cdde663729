//! Composes the pipeline: validate, gate, complete, normalize, store.
//!
//! Each submission resolves atomically from the caller's perspective.
//! Quota advances only on confirmed success; every failure leaves the
//! caller's quota state untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{FrameworkId, Tone};
use crate::client::CompletionBackend;
use crate::error::{ReframeError, Result};
use crate::normalize::normalize;
use crate::quota::QuotaState;
use crate::store::ReframeStore;

pub const MIN_THOUGHT_CHARS: usize = 3;
pub const MAX_THOUGHT_CHARS: usize = 1000;

/// One user submission.
#[derive(Debug, Clone)]
pub struct ReframeRequest {
    pub original_thought: String,
    pub framework: FrameworkId,
    pub tone: Tone,
}

impl ReframeRequest {
    pub fn new(original_thought: impl Into<String>, framework: FrameworkId) -> Self {
        Self {
            original_thought: original_thought.into(),
            framework,
            tone: Tone::default(),
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

/// Finished reframe record handed back to the caller and to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReframeResult {
    pub id: Uuid,
    pub original_thought: String,
    pub reframed_thought: String,
    pub supportive_passage: String,
    pub framework: FrameworkId,
    pub created_at: DateTime<Utc>,
}

/// Success value for one submission. `quota` is the advanced state the
/// caller must persist; `storage_error` is set when the best-effort save
/// failed without invalidating the result.
#[derive(Debug)]
pub struct ReframeOutcome {
    pub result: ReframeResult,
    pub quota: QuotaState,
    pub storage_error: Option<ReframeError>,
}

/// Check the thought against the submission bounds and return it trimmed.
pub fn validate_thought(thought: &str) -> Result<&str> {
    let trimmed = thought.trim();
    if trimmed.is_empty() {
        return Err(ReframeError::Validation {
            message: "Please enter a thought to reframe.".to_string(),
        });
    }
    let chars = trimmed.chars().count();
    if chars < MIN_THOUGHT_CHARS {
        return Err(ReframeError::Validation {
            message: "Please enter a more detailed thought (at least 3 characters).".to_string(),
        });
    }
    if chars > MAX_THOUGHT_CHARS {
        return Err(ReframeError::Validation {
            message: "Please keep your thought under 1000 characters.".to_string(),
        });
    }
    Ok(trimmed)
}

pub struct Reframer {
    backend: Arc<dyn CompletionBackend>,
    store: Option<Arc<dyn ReframeStore>>,
}

impl Reframer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            store: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn ReframeStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Run one submission through the full pipeline.
    pub async fn submit(
        &self,
        request: &ReframeRequest,
        quota: QuotaState,
    ) -> Result<ReframeOutcome> {
        let thought = validate_thought(&request.original_thought)?;

        let quota = quota.maybe_reset_window(Utc::now());
        if !quota.can_reframe() {
            return Err(ReframeError::QuotaExhausted {
                used: quota.weekly_count,
                limit: crate::quota::FREE_WEEKLY_LIMIT,
            });
        }

        let system_prompt = request.framework.system_prompt_with_tone(request.tone);
        let raw = self.backend.complete(&system_prompt, thought).await?;

        let normalized = normalize(&raw, thought);
        let quota = quota.after_success();

        let result = ReframeResult {
            id: Uuid::new_v4(),
            original_thought: thought.to_string(),
            reframed_thought: normalized.reframed_thought,
            supportive_passage: normalized.supportive_passage,
            framework: request.framework,
            created_at: Utc::now(),
        };
        info!(
            framework = %request.framework,
            reframe_id = %result.id,
            "reframe generated"
        );

        let storage_error = match &self.store {
            Some(store) => match store.save(&result).await {
                Ok(()) => None,
                Err(e) => {
                    warn!(reframe_id = %result.id, error = %e, "failed to persist reframe");
                    Some(e)
                }
            },
            None => None,
        };

        Ok(ReframeOutcome {
            result,
            quota,
            storage_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_boundaries() {
        assert!(validate_thought("").is_err());
        assert!(validate_thought("   \n\t").is_err());
        assert!(validate_thought("no").is_err());
        assert!(validate_thought("yes").is_ok());
        assert!(validate_thought(&"a".repeat(1000)).is_ok());
        assert!(validate_thought(&"a".repeat(1001)).is_err());
    }

    #[test]
    fn validation_trims_before_measuring() {
        assert_eq!(validate_thought("  I feel stuck  ").unwrap(), "I feel stuck");
        // Two visible chars padded with whitespace still fail.
        assert!(validate_thought("  no  ").is_err());
    }

    #[test]
    fn validation_errors_carry_user_copy() {
        let err = validate_thought("x").unwrap_err();
        assert!(matches!(err, ReframeError::Validation { .. }));
        assert!(err.user_message().contains("at least 3 characters"));
    }
}
