//! # Lanekit
//!
//! Lane-addressed record routing for pipeline stages.
//!
//! A pipeline connects stages through named lanes. During one invocation a
//! stage emits its output records into a [`LaneRouter`](router::LaneRouter),
//! which groups them per lane so the pipeline can hand each lane's records
//! to the stages wired downstream of it. Lanekit provides:
//!
//! - **Routing**: lane-set validation, default-lane inference, fan-out, and
//!   per-lane order preservation
//! - **Processors**: the async stage entry point and reference stages
//! - **Runner**: batches input, builds a fresh router per batch, and
//!   collects lane snapshots
//! - **Testing**: mock processors and lane assertions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lanekit::prelude::*;
//!
//! let runner = ProcessorRunner::builder(Arc::new(IdentityProcessor::default()))
//!     .output_lanes(["out"])
//!     .max_batch_size(100)
//!     .build()?;
//!
//! let lanes = runner.run(records).await?.into_merged();
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod observability;
pub mod pipeline;
pub mod router;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{RunnerConfig, DEFAULT_LANE};
    pub use crate::core::{Batch, LaneSet};
    pub use crate::errors::{
        AmbiguousDefaultLaneError, ConfigError, LaneError, LanekitError, StageError,
        UnknownLaneError,
    };
    pub use crate::pipeline::{ProcessorRunner, RunOutput};
    pub use crate::router::{LaneRouter, LaneSnapshot};
    pub use crate::stages::{FnProcessor, IdentityProcessor, Processor, SelectorProcessor};
}
