//! In-memory implementation of the Publisher trait.
//!
//! This is primarily for testing. It has the same conflict semantics as a
//! real daemon but keeps everything in memory.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::error::{PublishError, Result};
use crate::publisher::{PublishOptions, Publisher};

/// In-memory publisher.
///
/// Names published through it become taken for later calls, matching daemon
/// behavior. Thread-safe via a single mutex.
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    inner: Mutex<MemoryPublisherInner>,
    /// When set, every publish fails fatally with this message.
    failure: Option<String>,
}

#[derive(Debug, Default)]
struct MemoryPublisherInner {
    taken: HashSet<String>,
    published: Vec<String>,
}

impl MemoryPublisher {
    /// Create a publisher with no names taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a publisher where the given names already resolve to claims.
    pub fn with_taken<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Mutex::new(MemoryPublisherInner {
                taken: names.into_iter().map(Into::into).collect(),
                published: Vec::new(),
            }),
            failure: None,
        }
    }

    /// Create a publisher whose every call fails with a fatal daemon error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(MemoryPublisherInner::default()),
            failure: Some(message.into()),
        }
    }

    /// The names successfully published, in order.
    pub fn published(&self) -> Vec<String> {
        self.inner.lock().unwrap().published.clone()
    }
}

#[async_trait]
impl Publisher for MemoryPublisher {
    async fn publish(
        &self,
        name: &str,
        _file_path: &str,
        _amount: f64,
        _options: &PublishOptions,
    ) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(PublishError::from_daemon_message(message.clone()));
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.taken.contains(name) {
            return Err(PublishError::from_daemon_message(format!(
                "publish failed: Multiple claims ({name})"
            )));
        }
        inner.taken.insert(name.to_string());
        inner.published.push(name.to_string());
        Ok(())
    }
}
