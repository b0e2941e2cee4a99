//! Immutable lane sets.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// The set of output lanes a stage is configured with.
///
/// Cloning is cheap; the underlying set is shared and never mutated after
/// construction. Iteration is in lexicographic order.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LaneSet {
    lanes: Arc<BTreeSet<String>>,
}

impl LaneSet {
    /// Creates a lane set from any collection of lane names.
    ///
    /// Duplicate names collapse into one entry.
    pub fn new<I, S>(lanes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lanes: Arc::new(lanes.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates an empty lane set (a terminal stage with no output).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the lane is in the set.
    #[must_use]
    pub fn contains(&self, lane: &str) -> bool {
        self.lanes.contains(lane)
    }

    /// Returns the number of lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns true if the set has no lanes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Returns the only lane when the set has exactly one entry.
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        if self.lanes.len() == 1 {
            self.lanes.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    /// Iterates over the lane names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lanes.iter().map(String::as_str)
    }

    /// Returns the lane names joined by `", "`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Debug for LaneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.lanes.iter()).finish()
    }
}

impl<S: Into<String>> FromIterator<S> for LaneSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
