use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, warn};

use super::flatten::flatten_resource_logs;
use super::shapes::ResourceLogs;
use crate::configuration::AssertionConfig;
use crate::errors::TelemetryError;

/// Collects received log batches and asserts on them once they arrive
///
/// Batches are stored as received; every read builds a fresh view, flattened
/// unless `flatten_observed` is disabled. Waiting for logs is the only place a
/// timeout applies: each comparison itself is synchronous.
#[derive(Clone)]
pub struct LogSink {
    batches: Arc<RwLock<Vec<ResourceLogs>>>,
    config: Arc<AssertionConfig>,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink {
    pub fn new() -> Self {
        Self::with_config(AssertionConfig::default())
    }

    pub fn with_config(config: AssertionConfig) -> Self {
        debug!(
            "LogSink initialized: receive_timeout={:?}, poll_interval={:?}, exact={}",
            config.receive_timeout(),
            config.poll_interval(),
            config.exact
        );
        Self {
            batches: Arc::new(RwLock::new(Vec::new())),
            config: Arc::new(config),
        }
    }

    /// Record a received batch
    pub async fn consume(&self, batch: ResourceLogs) {
        let records = batch.record_count();
        self.batches.write().await.push(batch);
        debug!("LogSink consumed batch with {} logs", records);
    }

    /// Everything received so far as a single collection
    pub async fn all_logs(&self) -> Result<ResourceLogs, TelemetryError> {
        let batches = self.batches.read().await;
        if self.config.flatten_observed {
            return flatten_resource_logs(batches.iter());
        }
        Ok(ResourceLogs::new(
            batches
                .iter()
                .flat_map(|batch| batch.resource_logs.iter().cloned())
                .collect(),
        ))
    }

    /// Number of logs received, duplicates included
    pub async fn record_count(&self) -> usize {
        self.batches
            .read()
            .await
            .iter()
            .map(|batch| batch.record_count())
            .sum()
    }

    pub async fn reset(&self) {
        self.batches.write().await.clear();
    }

    /// Waits until every expected log has been received, matching relaxed.
    pub async fn assert_all_logs_received(
        &self,
        expected: &ResourceLogs,
        timeout: Duration,
    ) -> Result<(), TelemetryError> {
        self.wait_for(expected, timeout, false).await
    }

    /// Waits using the configured timeout, comparing exactly when `exact` is set.
    pub async fn assert_logs_received(
        &self,
        expected: &ResourceLogs,
    ) -> Result<(), TelemetryError> {
        self.wait_for(expected, self.config.receive_timeout(), self.config.exact)
            .await
    }

    async fn wait_for(
        &self,
        expected: &ResourceLogs,
        timeout: Duration,
        exact: bool,
    ) -> Result<(), TelemetryError> {
        let deadline = Instant::now() + timeout;
        loop {
            let observed = self.all_logs().await?;
            let outcome = if exact {
                observed.equivalent(expected)
            } else {
                observed.contains_all(expected).map_err(TelemetryError::from)
            };
            let last = match outcome {
                Ok(()) => return Ok(()),
                Err(TelemetryError::Containment(err)) => err,
                Err(err) => return Err(err),
            };

            if Instant::now() >= deadline {
                warn!(
                    "expected logs not received within {:?}: {} missing",
                    timeout,
                    last.missing_count()
                );
                return Err(TelemetryError::Timeout {
                    waited: timeout,
                    last,
                });
            }
            sleep(self.config.poll_interval()).await;
        }
    }
}
