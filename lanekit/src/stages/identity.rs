//! Pass-through processor.

use async_trait::async_trait;
use std::sync::Arc;

use super::Processor;
use crate::core::Batch;
use crate::errors::StageError;
use crate::router::LaneRouter;

/// Emits every input record unchanged onto the stage's default lane.
///
/// Only valid for stages with exactly one output lane.
#[derive(Debug, Clone)]
pub struct IdentityProcessor {
    name: String,
}

impl IdentityProcessor {
    /// Creates a new identity processor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IdentityProcessor {
    fn default() -> Self {
        Self::new("identity")
    }
}

#[async_trait]
impl<R> Processor<R> for IdentityProcessor
where
    R: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, batch: &Batch<R>, router: &mut LaneRouter<R>) -> Result<(), StageError> {
        for record in batch.records() {
            router.emit(Arc::clone(record))?;
        }
        Ok(())
    }
}
