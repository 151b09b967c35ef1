//! MongoDB submission store
//!
//! The driver connects lazily, so `connect` issues a `ping` to surface
//! unreachable servers and bad credentials at startup instead of on the
//! first write.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::contact::ContactSubmission;
use crate::store::{StoreError, SubmissionStore};

const APP_NAME: &str = "portfolio-backend";

/// Submission store backed by a MongoDB collection
pub struct MongoSubmissionStore {
    collection: Collection<ContactSubmission>,
}

impl MongoSubmissionStore {
    /// Open a client with bounded timeouts and verify it with a ping
    ///
    /// # Errors
    /// * `StoreError::Mongo` if the URI is invalid or the server does not
    ///   answer within the configured timeouts
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.connect_timeout = Some(config.connect_timeout);
        // Reaps idle pooled connections only; an operation in flight is not bounded by it
        options.max_idle_time = Some(config.pool_idle_timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }, None).await?;

        debug!(
            database = %config.database,
            collection = %config.collection,
            "MongoDB ping succeeded"
        );

        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

#[async_trait]
impl SubmissionStore for MongoSubmissionStore {
    async fn insert(&self, submission: &ContactSubmission) -> Result<(), StoreError> {
        self.collection.insert_one(submission, None).await?;
        Ok(())
    }
}
