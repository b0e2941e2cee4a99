//! Read-only lane contents handed to the pipeline runner.

use std::collections::BTreeMap;
use std::sync::Arc;

/// The records a stage emitted, grouped by lane.
///
/// Only lanes that received at least one record are present.
#[derive(Debug)]
pub struct LaneSnapshot<R> {
    lanes: BTreeMap<String, Vec<Arc<R>>>,
}

impl<R> LaneSnapshot<R> {
    pub(crate) fn from_map(lanes: BTreeMap<String, Vec<Arc<R>>>) -> Self {
        Self { lanes }
    }

    /// Creates an empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lanes: BTreeMap::new(),
        }
    }

    /// Returns the records routed to a lane, in emission order.
    #[must_use]
    pub fn get(&self, lane: &str) -> Option<&[Arc<R>]> {
        self.lanes.get(lane).map(Vec::as_slice)
    }

    /// Returns true if the lane received any records.
    #[must_use]
    pub fn contains_lane(&self, lane: &str) -> bool {
        self.lanes.contains_key(lane)
    }

    /// Iterates over the populated lane names.
    pub fn lanes(&self) -> impl Iterator<Item = &str> {
        self.lanes.keys().map(String::as_str)
    }

    /// Iterates over `(lane, records)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Arc<R>])> {
        self.lanes.iter().map(|(lane, records)| (lane.as_str(), records.as_slice()))
    }

    /// Returns the number of populated lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns true if no lane received records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Returns the total number of lane entries, counting fan-out copies.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.lanes.values().map(Vec::len).sum()
    }

    /// Appends another snapshot's records after this one's, lane by lane.
    pub fn merge(&mut self, other: Self) {
        for (lane, mut records) in other.lanes {
            self.lanes.entry(lane).or_default().append(&mut records);
        }
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<Arc<R>>> {
        self.lanes
    }
}

impl<R> Clone for LaneSnapshot<R> {
    fn clone(&self) -> Self {
        Self {
            lanes: self.lanes.clone(),
        }
    }
}

impl<R> Default for LaneSnapshot<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> IntoIterator for LaneSnapshot<R> {
    type Item = (String, Vec<Arc<R>>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<Arc<R>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lanes.into_iter()
    }
}
