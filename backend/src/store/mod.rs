//! Document store
//!
//! The submission store abstraction, its MongoDB and in-memory
//! implementations, and the write-once handle shared with request handlers.

pub mod connection;
pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::contact::ContactSubmission;

pub use memory::InMemorySubmissionStore;
pub use mongo::MongoSubmissionStore;

/// Errors raised by a submission store
#[derive(Error, Debug)]
pub enum StoreError {
    /// MongoDB driver error (connection, command or write)
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Any other backend failure
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Append-only persistence for contact submissions
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a single submission
    async fn insert(&self, submission: &ContactSubmission) -> Result<(), StoreError>;
}

/// Process-wide handle to the submission store
///
/// Starts empty and is published exactly once by the connection manager.
/// Clones share the same slot, so handlers observe the transition without
/// locking.
#[derive(Clone, Default)]
pub struct StoreHandle {
    slot: Arc<OnceCell<Arc<dyn SubmissionStore>>>,
}

impl StoreHandle {
    /// Create an empty handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that is already populated
    pub fn ready(store: Arc<dyn SubmissionStore>) -> Self {
        let handle = Self::new();
        handle.publish(store);
        handle
    }

    /// Publish the store. Returns `false` if one was already published.
    pub fn publish(&self, store: Arc<dyn SubmissionStore>) -> bool {
        self.slot.set(store).is_ok()
    }

    /// The store, if the connection manager has finished
    pub fn get(&self) -> Option<Arc<dyn SubmissionStore>> {
        self.slot.get().cloned()
    }

    /// Whether the store has been published
    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_is_write_once() {
        let handle = StoreHandle::new();
        let observer = handle.clone();
        assert!(!observer.is_ready());
        assert!(observer.get().is_none());

        assert!(handle.publish(Arc::new(InMemorySubmissionStore::new())));
        assert!(observer.is_ready());

        assert!(!handle.publish(Arc::new(InMemorySubmissionStore::new())));
        assert!(observer.get().is_some());
    }
}
