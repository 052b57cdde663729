//! Narrow contract to the persistence collaborator.
//!
//! The pipeline treats storage as best-effort: a save failure is reported
//! alongside the result, never instead of it.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::orchestrator::ReframeResult;

#[async_trait]
pub trait ReframeStore: Send + Sync {
    async fn save(&self, result: &ReframeResult) -> Result<()>;
}

/// In-memory store for tests and local development.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<ReframeResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<ReframeResult> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl ReframeStore for MemoryStore {
    async fn save(&self, result: &ReframeResult) -> Result<()> {
        self.entries.lock().await.push(result.clone());
        Ok(())
    }
}
