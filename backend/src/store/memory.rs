//! In-memory submission store, used by tests and local tooling.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::contact::ContactSubmission;
use crate::store::{StoreError, SubmissionStore};

/// Submission store backed by a vector
#[derive(Default)]
pub struct InMemorySubmissionStore {
    records: RwLock<Vec<ContactSubmission>>,
}

impl InMemorySubmissionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored submission in insertion order
    pub async fn records(&self) -> Vec<ContactSubmission> {
        self.records.read().await.clone()
    }

    /// Number of stored submissions
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn insert(&self, submission: &ContactSubmission) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == submission.id) {
            return Err(StoreError::Backend(format!(
                "duplicate id {}",
                submission.id.to_hex()
            )));
        }
        records.push(submission.clone());
        Ok(())
    }
}
