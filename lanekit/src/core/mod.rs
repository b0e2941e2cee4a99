//! Core domain types for lanekit.
//!
//! - Lane sets fixed at router construction
//! - Input batches handed to processors

mod batch;
mod lanes;

pub use batch::Batch;
pub use lanes::LaneSet;
