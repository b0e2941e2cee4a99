//! Testing utilities for lanekit processors.
//!
//! This module provides:
//! - Mock processors that record invocations or fail on demand
//! - Assertions over lane snapshots and lane errors

mod assertions;
mod mocks;

pub use assertions::{
    assert_lane_absent, assert_lane_error_code, assert_lane_len, assert_lane_records,
    assert_lanes,
};
pub use mocks::{FailingProcessor, RecordedCall, RecordingProcessor};
