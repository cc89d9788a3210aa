//! The publisher boundary and the collision-aware retry loop.
//!
//! Publishing talks to a remote daemon through the [`Publisher`] trait. The
//! retry loop derives a claim name from the title, and when the daemon
//! reports that the name already resolves to existing claims, retries under
//! the next numbered name. Names confirmed published are recorded in an
//! explicitly owned [`PublishedNames`] registry so later attempts
//! short-circuit without a daemon round-trip.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::error::{PublishError, Result};
use crate::naming::claim_name_from_title;

/// Metadata accompanying a publish call.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    pub description: String,
    pub author: String,
    pub license: String,
    pub content_type: String,
    pub nsfw: bool,
}

/// Result of a successful publish-with-retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// The name the claim was published under.
    pub name: String,
    /// How many names were tried, the successful one included.
    pub attempts: u32,
}

/// The abstract publish interface to a remote daemon.
///
/// Implementations must be thread-safe and idempotent on conflict: a "name
/// already exists" outcome is reported as [`PublishError::NameTaken`] and is
/// the only non-fatal error.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `file_path` under `name`, bidding `amount`.
    async fn publish(
        &self,
        name: &str,
        file_path: &str,
        amount: f64,
        options: &PublishOptions,
    ) -> Result<()>;
}

/// Names already confirmed published, shared across publish calls.
///
/// Explicitly owned and injected into [`publish_with_retry`]; one mutex
/// scoped to the set.
#[derive(Debug, Default)]
pub struct PublishedNames {
    inner: Mutex<HashSet<String>>,
}

impl PublishedNames {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the name is already recorded as published.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().unwrap().contains(name)
    }

    /// Record a name as published.
    pub fn insert(&self, name: &str) {
        self.inner.lock().unwrap().insert(name.to_string());
    }

    /// How many names are recorded.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// True when no names are recorded.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

/// Publish a file under a name derived from `title`, retrying past name
/// collisions with numbered suffixes.
///
/// A collision reported by the daemon marks the name as published and moves
/// on to the next attempt; every other error is fatal and propagates
/// unchanged.
pub async fn publish_with_retry<P: Publisher + ?Sized>(
    publisher: &P,
    names: &PublishedNames,
    title: &str,
    file_path: &str,
    amount: f64,
    options: &PublishOptions,
) -> Result<PublishOutcome> {
    if claim_name_from_title(title, 1).is_empty() {
        return Err(PublishError::EmptyName(title.to_string()));
    }

    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let name = claim_name_from_title(title, attempt);

        if names.contains(&name) {
            tracing::debug!(%name, attempt, "name already published, retrying");
            continue;
        }

        match publisher.publish(&name, file_path, amount, options).await {
            Ok(()) => {
                names.insert(&name);
                tracing::info!(%name, attempt, "published");
                return Ok(PublishOutcome { name, attempts: attempt });
            }
            Err(err) if err.is_name_taken() => {
                names.insert(&name);
                tracing::info!(%name, attempt, "name exists, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}
