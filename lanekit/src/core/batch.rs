//! Input batches handed to processors.

use std::sync::Arc;
use uuid::Uuid;

/// The records handed to a processor for one invocation.
#[derive(Debug)]
pub struct Batch<R> {
    id: Uuid,
    source_offset: Option<String>,
    records: Vec<Arc<R>>,
}

impl<R> Batch<R> {
    /// Creates a new batch with a fresh id.
    #[must_use]
    pub fn new(records: Vec<Arc<R>>) -> Self {
        Self {
            id: Uuid::now_v7(),
            source_offset: None,
            records,
        }
    }

    /// Creates a batch from owned records.
    pub fn from_records(records: impl IntoIterator<Item = R>) -> Self {
        Self::new(records.into_iter().map(Arc::new).collect())
    }

    /// Sets the source offset the batch was read from.
    #[must_use]
    pub fn with_source_offset(mut self, offset: impl Into<String>) -> Self {
        self.source_offset = Some(offset.into());
        self
    }

    /// Returns the batch id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the source offset, if any.
    #[must_use]
    pub fn source_offset(&self) -> Option<&str> {
        self.source_offset.as_deref()
    }

    /// Returns the records in input order.
    #[must_use]
    pub fn records(&self) -> &[Arc<R>] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the batch has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_from_records() {
        let batch = Batch::from_records(vec![1, 2, 3]).with_source_offset("offset-1");

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.source_offset(), Some("offset-1"));
        assert_eq!(*batch.records()[2], 3);
    }

    #[test]
    fn test_batch_ids_are_unique() {
        let a = Batch::<u8>::new(Vec::new());
        let b = Batch::<u8>::new(Vec::new());
        assert!(a.is_empty());
        assert_ne!(a.id(), b.id());
    }
}
