//! Single-stage runner.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

use super::{BatchOutput, RunOutput};
use crate::config::RunnerConfig;
use crate::core::{Batch, LaneSet};
use crate::errors::{ConfigError, LanekitError, StageError};
use crate::router::{LaneRouter, LaneSnapshot};
use crate::stages::Processor;

/// Runs a processor over input records, one fresh router per batch.
#[derive(Debug)]
pub struct ProcessorRunner<R>
where
    R: Send + Sync + 'static,
{
    processor: Arc<dyn Processor<R>>,
    config: RunnerConfig,
    lanes: LaneSet,
}

impl<R> ProcessorRunner<R>
where
    R: Send + Sync + 'static,
{
    /// Starts building a runner for a processor.
    #[must_use]
    pub fn builder(processor: Arc<dyn Processor<R>>) -> ProcessorRunnerBuilder<R> {
        ProcessorRunnerBuilder::new(processor)
    }

    /// Returns the output lanes every router is created with.
    #[must_use]
    pub fn lanes(&self) -> &LaneSet {
        &self.lanes
    }

    /// Returns the runner configuration.
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Splits `records` into batches of at most `max_batch_size` and
    /// processes them in order.
    ///
    /// Stops at the first failing batch. An empty input runs no batch.
    ///
    /// # Errors
    ///
    /// Returns [`LanekitError::Stage`] with the first processor error.
    pub async fn run(
        &self,
        records: impl IntoIterator<Item = R>,
    ) -> Result<RunOutput<R>, LanekitError> {
        let started_at = Utc::now();
        let records: Vec<Arc<R>> = records.into_iter().map(Arc::new).collect();
        let span = info_span!(
            "processor_run",
            processor = %self.processor.name(),
            lanes = %self.lanes.joined(),
            records = records.len(),
        );

        async {
            let mut batches = Vec::new();
            for chunk in records.chunks(self.config.max_batch_size) {
                let mut batch = Batch::new(chunk.to_vec());
                if let Some(ref offset) = self.config.source_offset {
                    batch = batch.with_source_offset(offset.clone());
                }
                let input_count = batch.len();
                let snapshot = self.run_batch(&batch).await?;
                batches.push(BatchOutput {
                    batch_id: batch.id(),
                    input_count,
                    snapshot,
                });
            }

            info!(batches = batches.len(), "Processor run finished");
            Ok::<_, LanekitError>(RunOutput::new(started_at, Utc::now(), batches))
        }
        .instrument(span)
        .await
    }

    /// Processes exactly one batch with a fresh router.
    ///
    /// # Errors
    ///
    /// Returns the processor's error, or [`StageError::Timeout`] if the
    /// configured batch timeout elapses.
    pub async fn run_batch(&self, batch: &Batch<R>) -> Result<LaneSnapshot<R>, StageError> {
        let mut router = LaneRouter::new(self.lanes.clone());
        debug!(batch_id = %batch.id(), records = batch.len(), "Processing batch");

        let result = match self.config.batch_timeout() {
            Some(timeout) => {
                tokio::time::timeout(timeout, self.processor.process(batch, &mut router))
                    .await
                    .unwrap_or_else(|_| {
                        Err(StageError::Timeout {
                            stage: self.processor.name().to_string(),
                            timeout_ms: self.config.batch_timeout_ms.unwrap_or_default(),
                        })
                    })
            }
            None => self.processor.process(batch, &mut router).await,
        };

        if let Err(ref err) = result {
            warn!(batch_id = %batch.id(), error = %err, "Batch failed");
        }
        result?;

        let snapshot = router.into_snapshot();
        debug!(
            batch_id = %batch.id(),
            lanes = snapshot.len(),
            emitted = snapshot.record_count(),
            "Batch processed"
        );
        Ok(snapshot)
    }
}

/// Builder for [`ProcessorRunner`].
#[derive(Debug)]
pub struct ProcessorRunnerBuilder<R>
where
    R: Send + Sync + 'static,
{
    processor: Arc<dyn Processor<R>>,
    config: RunnerConfig,
}

impl<R> ProcessorRunnerBuilder<R>
where
    R: Send + Sync + 'static,
{
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new(processor: Arc<dyn Processor<R>>) -> Self {
        Self {
            processor,
            config: RunnerConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the output lanes.
    #[must_use]
    pub fn output_lanes<I, S>(mut self, lanes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_output_lanes(lanes);
        self
    }

    /// Sets the maximum batch size.
    #[must_use]
    pub fn max_batch_size(mut self, size: usize) -> Self {
        self.config = self.config.with_max_batch_size(size);
        self
    }

    /// Sets the source offset handed to every batch.
    #[must_use]
    pub fn source_offset(mut self, offset: impl Into<String>) -> Self {
        self.config = self.config.with_source_offset(offset);
        self
    }

    /// Sets the per-batch timeout.
    #[must_use]
    pub fn batch_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.with_batch_timeout(timeout);
        self
    }

    /// Validates the configuration and builds the runner.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn build(self) -> Result<ProcessorRunner<R>, ConfigError> {
        self.config.validate()?;
        let lanes = self.config.lane_set();
        Ok(ProcessorRunner {
            processor: self.processor,
            config: self.config,
            lanes,
        })
    }
}
