//! Per-record lane selection.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use super::Processor;
use crate::core::Batch;
use crate::errors::StageError;
use crate::router::LaneRouter;

/// Routes each record to the lanes chosen by a selector function.
///
/// An empty selection sends the record to the default lane. A selection
/// naming a lane the stage does not have fails the batch.
pub struct SelectorProcessor<F> {
    name: String,
    select: F,
}

impl<F> SelectorProcessor<F> {
    /// Creates a new selector processor.
    pub fn new<R>(name: impl Into<String>, select: F) -> Self
    where
        F: Fn(&R) -> Vec<String>,
    {
        Self {
            name: name.into(),
            select,
        }
    }
}

impl<F> Debug for SelectorProcessor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectorProcessor")
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait]
impl<R, F> Processor<R> for SelectorProcessor<F>
where
    R: Send + Sync + 'static,
    F: Fn(&R) -> Vec<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, batch: &Batch<R>, router: &mut LaneRouter<R>) -> Result<(), StageError> {
        for record in batch.records() {
            let lanes = (self.select)(record.as_ref());
            router.add_record(Arc::clone(record), lanes.as_slice())?;
        }
        Ok(())
    }
}
