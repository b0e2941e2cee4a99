//! Lane-addressed record routing.
//!
//! A [`LaneRouter`] is created once per stage invocation. The stage emits
//! records into it, then the runner takes a [`LaneSnapshot`] and hands each
//! lane's records to the downstream stages wired to that lane.

#[cfg(test)]
mod router_tests;
mod snapshot;

pub use snapshot::LaneSnapshot;

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::core::LaneSet;
use crate::errors::{AmbiguousDefaultLaneError, LaneError, UnknownLaneError};

/// Collects the records a stage emits during one invocation, grouped by lane.
///
/// Records are shared, never copied: fanning a record out to several lanes
/// stores the same `Arc` in each. Within a lane, records keep the order of
/// the `add_record` calls that named it.
///
/// Taking a [`snapshot`](Self::snapshot) does not close the router; records
/// added afterwards show up in later snapshots only. Use
/// [`into_snapshot`](Self::into_snapshot) to consume it.
#[derive(Debug)]
pub struct LaneRouter<R> {
    valid_lanes: LaneSet,
    default_lane: Option<String>,
    contents: BTreeMap<String, Vec<Arc<R>>>,
}

impl<R> LaneRouter<R> {
    /// Creates a router for a stage with the given output lanes.
    ///
    /// A stage with exactly one lane gets it as its default lane.
    #[must_use]
    pub fn new(valid_lanes: LaneSet) -> Self {
        let default_lane = valid_lanes.single().map(str::to_string);
        Self {
            valid_lanes,
            default_lane,
            contents: BTreeMap::new(),
        }
    }

    /// Returns the lanes the router was constructed with.
    #[must_use]
    pub fn lanes(&self) -> &LaneSet {
        &self.valid_lanes
    }

    /// Returns the default lane, if the stage has exactly one.
    #[must_use]
    pub fn default_lane(&self) -> Option<&str> {
        self.default_lane.as_deref()
    }

    /// Routes a record to the named lanes, or to the default lane when
    /// `lanes` is empty.
    ///
    /// Every lane name is checked before anything is appended, so a failed
    /// call leaves the router unchanged. Naming a lane twice appends the
    /// record twice.
    ///
    /// # Errors
    ///
    /// - [`LaneError::Unknown`] if a named lane is not in [`lanes`](Self::lanes).
    /// - [`LaneError::AmbiguousDefault`] if `lanes` is empty and the stage
    ///   does not have exactly one lane.
    pub fn add_record<S: AsRef<str>>(
        &mut self,
        record: impl Into<Arc<R>>,
        lanes: &[S],
    ) -> Result<(), LaneError> {
        let record = record.into();

        if lanes.is_empty() {
            let Some(lane) = self.default_lane.as_deref() else {
                debug!(
                    valid_lanes = %self.valid_lanes.joined(),
                    "Rejected unqualified record: no default lane"
                );
                return Err(AmbiguousDefaultLaneError::new(self.valid_lanes.clone()).into());
            };
            trace!(lane = %lane, "Routing record to default lane");
            self.contents.entry(lane.to_string()).or_default().push(record);
            return Ok(());
        }

        if let Some(unknown) = lanes
            .iter()
            .map(AsRef::as_ref)
            .find(|lane| !self.valid_lanes.contains(lane))
        {
            debug!(
                lane = %unknown,
                valid_lanes = %self.valid_lanes.joined(),
                "Rejected record for unknown lane"
            );
            return Err(UnknownLaneError::new(unknown, self.valid_lanes.clone()).into());
        }

        for lane in lanes {
            let lane = lane.as_ref();
            trace!(lane = %lane, "Routing record");
            self.contents
                .entry(lane.to_string())
                .or_default()
                .push(Arc::clone(&record));
        }

        Ok(())
    }

    /// Routes a record to the default lane.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::AmbiguousDefault`] if the stage does not have
    /// exactly one lane.
    pub fn emit(&mut self, record: impl Into<Arc<R>>) -> Result<(), LaneError> {
        let no_lanes: &[&str] = &[];
        self.add_record(record, no_lanes)
    }

    /// Returns the number of records routed to a lane.
    #[must_use]
    pub fn lane_len(&self, lane: &str) -> usize {
        self.contents.get(lane).map_or(0, Vec::len)
    }

    /// Returns the total number of lane entries, counting fan-out copies.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.contents.values().map(Vec::len).sum()
    }

    /// Returns true if nothing has been routed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Returns a copy of the current lane contents.
    ///
    /// The router stays usable; the snapshot does not see later records.
    #[must_use]
    pub fn snapshot(&self) -> LaneSnapshot<R> {
        LaneSnapshot::from_map(self.contents.clone())
    }

    /// Consumes the router and returns its lane contents.
    #[must_use]
    pub fn into_snapshot(self) -> LaneSnapshot<R> {
        LaneSnapshot::from_map(self.contents)
    }
}
