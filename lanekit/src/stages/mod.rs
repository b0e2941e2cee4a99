//! Processor trait and implementations.
//!
//! A processor is the per-batch entry point of a pipeline stage. It reads
//! the input batch and routes its output through a [`LaneRouter`].

mod identity;
mod selector;

pub use identity::IdentityProcessor;
pub use selector::SelectorProcessor;

use async_trait::async_trait;
use std::fmt::Debug;

use crate::core::Batch;
use crate::errors::StageError;
use crate::router::LaneRouter;

/// Trait for pipeline stages that emit records onto lanes.
///
/// Implementations must only name lanes present in
/// [`LaneRouter::lanes`]; routing errors propagate through `?` as
/// [`StageError::Lane`].
#[async_trait]
pub trait Processor<R>: Send + Sync + Debug
where
    R: Send + Sync + 'static,
{
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Processes one batch.
    ///
    /// # Arguments
    ///
    /// * `batch` - The input records for this invocation
    /// * `router` - A fresh router over the stage's output lanes
    async fn process(&self, batch: &Batch<R>, router: &mut LaneRouter<R>) -> Result<(), StageError>;
}

/// A processor backed by a synchronous function.
pub struct FnProcessor<F> {
    name: String,
    func: F,
}

impl<F> FnProcessor<F> {
    /// Creates a new function-based processor.
    pub fn new<R>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Batch<R>, &mut LaneRouter<R>) -> Result<(), StageError>,
    {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnProcessor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProcessor")
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait]
impl<R, F> Processor<R> for FnProcessor<F>
where
    R: Send + Sync + 'static,
    F: Fn(&Batch<R>, &mut LaneRouter<R>) -> Result<(), StageError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, batch: &Batch<R>, router: &mut LaneRouter<R>) -> Result<(), StageError> {
        (self.func)(batch, router)
    }
}
