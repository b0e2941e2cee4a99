//! Test assertions for lane snapshots.

use std::fmt::Debug;

use crate::errors::StageError;
use crate::router::LaneSnapshot;

/// Asserts that a lane holds exactly `expected`, in order.
pub fn assert_lane_records<R>(snapshot: &LaneSnapshot<R>, lane: &str, expected: &[R])
where
    R: PartialEq + Debug,
{
    let records = snapshot.get(lane).unwrap_or_else(|| {
        panic!(
            "Expected lane '{lane}' to be present, lanes: {:?}",
            snapshot.lanes().collect::<Vec<_>>()
        )
    });
    let actual: Vec<&R> = records
        .iter()
        .map(AsRef::as_ref)
        .collect();
    let expected: Vec<&R> = expected.iter().collect();
    assert_eq!(actual, expected, "Unexpected records in lane '{lane}'");
}

/// Asserts that a lane received `expected` records.
pub fn assert_lane_len<R>(snapshot: &LaneSnapshot<R>, lane: &str, expected: usize) {
    let actual = snapshot.get(lane).map_or(0, <[_]>::len);
    assert_eq!(
        actual, expected,
        "Expected {expected} records in lane '{lane}', got {actual}"
    );
}

/// Asserts that a lane received no records.
pub fn assert_lane_absent<R>(snapshot: &LaneSnapshot<R>, lane: &str) {
    assert!(
        !snapshot.contains_lane(lane),
        "Expected lane '{lane}' to be absent, but it has {} records",
        snapshot.get(lane).map_or(0, <[_]>::len)
    );
}

/// Asserts the exact set of populated lanes.
pub fn assert_lanes<R>(snapshot: &LaneSnapshot<R>, expected: &[&str]) {
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    let actual: Vec<&str> = snapshot.lanes().collect();
    assert_eq!(actual, expected, "Unexpected populated lanes");
}

/// Asserts that a stage error is a lane error with the given code.
pub fn assert_lane_error_code(err: &StageError, code: &str) {
    match err.as_lane_error() {
        Some(lane_err) => assert_eq!(
            lane_err.code(),
            code,
            "Expected lane error {code}, got {lane_err}"
        ),
        None => panic!("Expected lane error {code}, got: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LaneSet;
    use crate::errors::{AmbiguousDefaultLaneError, UNKNOWN_LANE_CODE, AMBIGUOUS_DEFAULT_LANE_CODE};
    use crate::router::LaneRouter;

    fn sample() -> LaneSnapshot<&'static str> {
        let mut router = LaneRouter::<&'static str>::new(LaneSet::new(["a", "b", "c"]));
        router.add_record("r1", &["a"]).unwrap();
        router.add_record("r2", &["a", "b"]).unwrap();
        router.into_snapshot()
    }

    #[test]
    fn test_assert_lane_records() {
        let snapshot = sample();
        assert_lane_records(&snapshot, "a", &["r1", "r2"]);
        assert_lane_records(&snapshot, "b", &["r2"]);
    }

    #[test]
    #[should_panic(expected = "Unexpected records in lane 'a'")]
    fn test_assert_lane_records_order_matters() {
        assert_lane_records(&sample(), "a", &["r2", "r1"]);
    }

    #[test]
    fn test_assert_lane_len_and_absent() {
        let snapshot = sample();
        assert_lane_len(&snapshot, "a", 2);
        assert_lane_len(&snapshot, "c", 0);
        assert_lane_absent(&snapshot, "c");
        assert_lanes(&snapshot, &["b", "a"]);
    }

    #[test]
    #[should_panic(expected = "to be absent")]
    fn test_assert_lane_absent_fails() {
        assert_lane_absent(&sample(), "a");
    }

    #[test]
    fn test_assert_lane_error_code() {
        let err: StageError = AmbiguousDefaultLaneError::new(LaneSet::empty()).into();
        assert_lane_error_code(&err, AMBIGUOUS_DEFAULT_LANE_CODE);
    }

    #[test]
    #[should_panic(expected = "Expected lane error")]
    fn test_assert_lane_error_code_fails_for_other_errors() {
        assert_lane_error_code(&StageError::failed("s", "boom"), UNKNOWN_LANE_CODE);
    }
}
