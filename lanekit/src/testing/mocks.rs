//! Mock processors for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::Batch;
use crate::errors::StageError;
use crate::router::LaneRouter;
use crate::stages::Processor;

/// One invocation seen by a [`RecordingProcessor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Id of the batch.
    pub batch_id: Uuid,
    /// Number of records in the batch.
    pub records: usize,
    /// Source offset of the batch.
    pub source_offset: Option<String>,
    /// Lanes the router was created with.
    pub lanes: Vec<String>,
}

/// A processor that records each invocation and routes every record to a
/// fixed set of lanes (the default lane when the set is empty).
#[derive(Debug)]
pub struct RecordingProcessor {
    name: String,
    lanes: Vec<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingProcessor {
    /// Creates a recording processor that emits to the default lane.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lanes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Routes every record to these lanes instead of the default lane.
    #[must_use]
    pub fn with_lanes<I, S>(mut self, lanes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lanes = lanes.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the number of invocations.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the recorded invocations.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl<R> Processor<R> for RecordingProcessor
where
    R: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, batch: &Batch<R>, router: &mut LaneRouter<R>) -> Result<(), StageError> {
        self.calls.lock().push(RecordedCall {
            batch_id: batch.id(),
            records: batch.len(),
            source_offset: batch.source_offset().map(str::to_string),
            lanes: router.lanes().iter().map(str::to_string).collect(),
        });

        for record in batch.records() {
            router.add_record(Arc::clone(record), self.lanes.as_slice())?;
        }
        Ok(())
    }
}

/// A processor that always fails.
#[derive(Debug)]
pub struct FailingProcessor {
    name: String,
    error: String,
}

impl FailingProcessor {
    /// Creates a new failing processor.
    #[must_use]
    pub fn new(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: error.into(),
        }
    }
}

#[async_trait]
impl<R> Processor<R> for FailingProcessor
where
    R: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, _batch: &Batch<R>, _router: &mut LaneRouter<R>) -> Result<(), StageError> {
        Err(StageError::failed(&self.name, &self.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LaneSet;

    #[tokio::test]
    async fn test_recording_processor_tracks_calls() {
        let processor = RecordingProcessor::new("rec");
        let batch = Batch::from_records([1, 2, 3]).with_source_offset("7");
        let mut router = LaneRouter::new(LaneSet::new(["lane"]));

        processor.process(&batch, &mut router).await.unwrap();

        assert_eq!(processor.call_count(), 1);
        let call = &processor.calls()[0];
        assert_eq!(call.batch_id, batch.id());
        assert_eq!(call.records, 3);
        assert_eq!(call.source_offset.as_deref(), Some("7"));
        assert_eq!(call.lanes, vec!["lane".to_string()]);
        assert_eq!(router.lane_len("lane"), 3);

        processor.reset();
        assert_eq!(processor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_recording_processor_fixed_lanes() {
        let processor = RecordingProcessor::new("rec").with_lanes(["a", "b"]);
        let batch = Batch::from_records(["x"]);
        let mut router = LaneRouter::new(LaneSet::new(["a", "b"]));

        processor.process(&batch, &mut router).await.unwrap();

        assert_eq!(router.lane_len("a"), 1);
        assert_eq!(router.lane_len("b"), 1);
    }

    #[tokio::test]
    async fn test_failing_processor() {
        let processor = FailingProcessor::new("broken", "boom");
        let batch = Batch::from_records([1]);
        let mut router = LaneRouter::new(LaneSet::new(["lane"]));

        let err = processor.process(&batch, &mut router).await.unwrap_err();
        assert_eq!(err.to_string(), "Stage 'broken' failed: boom");
        assert!(router.is_empty());
    }
}
