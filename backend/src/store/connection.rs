//! Connection manager
//!
//! Opens the document store at startup with a fixed number of attempts and
//! a fixed delay between them, then publishes the store into the shared
//! [`StoreHandle`]. Exhausting the attempts is reported as a
//! [`StartupError`]; the binary treats that as fatal.
//!
//! A connection lost after startup is not re-established here.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::DatabaseConfig;
use crate::store::{MongoSubmissionStore, StoreHandle, SubmissionStore};

static URI_CREDENTIALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[^/@]+@").expect("credentials pattern is valid"));

/// Fixed-count, fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub attempts: u32,
    /// Delay between consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Build the policy from database configuration
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            attempts: config.connect_attempts,
            delay: config.retry_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

/// Outcome of a startup that never reached the store
#[derive(Error, Debug)]
pub enum StartupError {
    /// Every attempt failed
    #[error("document store unreachable after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Attempts made
        attempts: u32,
        /// Error from the final attempt
        last_error: String,
    },
}

/// Replace URI credentials with a placeholder so the URI can be logged
pub fn mask_uri(uri: &str) -> String {
    URI_CREDENTIALS.replace(uri, "//***:***@").into_owned()
}

/// Run `connect` until it succeeds or the policy's attempts are used up
///
/// At least one attempt is always made.
pub async fn connect_with_retry<T, E, F, Fut>(
    policy: RetryPolicy,
    mut connect: F,
) -> Result<T, StartupError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.attempts.max(1);
    let mut retries_remaining = attempts;

    loop {
        match connect().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                retries_remaining -= 1;
                if retries_remaining == 0 {
                    error!(attempts, error = %e, "Giving up on document store connection");
                    return Err(StartupError::RetriesExhausted {
                        attempts,
                        last_error: e.to_string(),
                    });
                }

                warn!(
                    retries_remaining,
                    delay_secs = policy.delay.as_secs(),
                    error = %e,
                    "Document store connection failed, retrying"
                );
                sleep(policy.delay).await;
            }
        }
    }
}

/// Connect with `connect`, then publish the result into `handle`
pub async fn establish<S, E, F, Fut>(
    policy: RetryPolicy,
    handle: StoreHandle,
    connect: F,
) -> Result<(), StartupError>
where
    S: SubmissionStore + 'static,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<S, E>>,
    E: Display,
{
    let store = connect_with_retry(policy, connect).await?;
    if !handle.publish(Arc::new(store)) {
        warn!("Document store handle was already published; keeping the existing one");
    }
    Ok(())
}

/// Connect to MongoDB using `config` and publish the store into `handle`
pub async fn run(config: DatabaseConfig, handle: StoreHandle) -> Result<(), StartupError> {
    let policy = RetryPolicy::from_config(&config);
    info!(
        uri = %mask_uri(&config.uri),
        database = %config.database,
        attempts = policy.attempts,
        "Connecting to document store"
    );

    establish(policy, handle, || MongoSubmissionStore::connect(&config)).await?;

    info!(database = %config.database, "Document store connected");
    Ok(())
}
