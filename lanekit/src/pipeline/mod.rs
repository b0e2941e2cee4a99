//! Pipeline runner side of the routing contract.
//!
//! The runner builds a [`LaneRouter`](crate::router::LaneRouter) over the
//! stage's configured lanes for every batch, invokes the processor, and
//! collects the resulting lane snapshots.

mod output;
mod runner;

pub use output::{BatchOutput, RunOutput};
pub use runner::{ProcessorRunner, ProcessorRunnerBuilder};
