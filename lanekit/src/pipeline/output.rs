//! Results of a processor run.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::router::LaneSnapshot;

/// Lane output of one processor invocation.
#[derive(Debug)]
pub struct BatchOutput<R> {
    /// Id of the input batch.
    pub batch_id: Uuid,
    /// Number of input records in the batch.
    pub input_count: usize,
    /// Records emitted per lane.
    pub snapshot: LaneSnapshot<R>,
}

/// Output of [`ProcessorRunner::run`](super::ProcessorRunner::run).
#[derive(Debug)]
pub struct RunOutput<R> {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub ended_at: DateTime<Utc>,
    batches: Vec<BatchOutput<R>>,
}

impl<R> RunOutput<R> {
    pub(crate) fn new(
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        batches: Vec<BatchOutput<R>>,
    ) -> Self {
        Self {
            started_at,
            ended_at,
            batches,
        }
    }

    /// Returns the per-batch outputs in processing order.
    #[must_use]
    pub fn batches(&self) -> &[BatchOutput<R>] {
        &self.batches
    }

    /// Returns the number of invocations.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Returns the run duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.ended_at - self.started_at).num_milliseconds()
    }

    /// Combines every batch's lanes, in batch order.
    #[must_use]
    pub fn merged(&self) -> LaneSnapshot<R> {
        let mut merged = LaneSnapshot::empty();
        for batch in &self.batches {
            merged.merge(batch.snapshot.clone());
        }
        merged
    }

    /// Consumes the output and combines every batch's lanes.
    #[must_use]
    pub fn into_merged(self) -> LaneSnapshot<R> {
        let mut merged = LaneSnapshot::empty();
        for batch in self.batches {
            merged.merge(batch.snapshot);
        }
        merged
    }
}
