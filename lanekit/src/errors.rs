//! Error types for lanekit.
//!
//! Lane errors are contract violations by the calling stage. They are
//! surfaced synchronously from [`LaneRouter::add_record`](crate::router::LaneRouter::add_record)
//! and never retried at this layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::core::LaneSet;

/// Error code for routing to a lane outside the valid set.
pub const UNKNOWN_LANE_CODE: &str = "LANE-001-UNKNOWN";

/// Error code for an unqualified emission without a default lane.
pub const AMBIGUOUS_DEFAULT_LANE_CODE: &str = "LANE-002-AMBIGUOUS";

/// The main error type for lanekit operations.
#[derive(Debug, Error)]
pub enum LanekitError {
    /// A routing contract was violated.
    #[error("{0}")]
    Lane(#[from] LaneError),

    /// A processor failed while handling a batch.
    #[error("{0}")]
    Stage(#[from] StageError),

    /// The runner configuration is invalid.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Metadata about a contract error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "LANE-001-UNKNOWN").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ContractErrorInfo {
    /// Creates a new contract error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code));
        map.insert("summary".to_string(), serde_json::json!(self.summary));

        if let Some(ref hint) = self.fix_hint {
            map.insert("fix_hint".to_string(), serde_json::json!(hint));
        }
        if !self.context.is_empty() {
            map.insert("context".to_string(), serde_json::json!(self.context));
        }

        map
    }
}

/// Error raised when a record is routed to a lane the stage does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown lane '{lane}': valid lanes are [{}]", .valid_lanes.joined())]
pub struct UnknownLaneError {
    /// The lane that was named.
    pub lane: String,
    /// The lanes the router was constructed with.
    pub valid_lanes: LaneSet,
}

impl UnknownLaneError {
    /// Creates a new unknown lane error.
    #[must_use]
    pub fn new(lane: impl Into<String>, valid_lanes: LaneSet) -> Self {
        Self {
            lane: lane.into(),
            valid_lanes,
        }
    }

    /// Returns the contract error info for this error.
    #[must_use]
    pub fn error_info(&self) -> ContractErrorInfo {
        ContractErrorInfo::new(UNKNOWN_LANE_CODE, format!("Lane '{}' is not declared", self.lane))
            .with_fix_hint("Emit only to lanes configured for the stage, or add the lane to its output lanes.")
            .with_context_entry("lane", &self.lane)
            .with_context_entry("valid_lanes", self.valid_lanes.joined())
    }
}

/// Error raised when a record is emitted without a lane and the stage has
/// zero or several lanes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "No default lane: stage has {} output lanes [{}], name one explicitly",
    .valid_lanes.len(),
    .valid_lanes.joined()
)]
pub struct AmbiguousDefaultLaneError {
    /// The lanes the router was constructed with.
    pub valid_lanes: LaneSet,
}

impl AmbiguousDefaultLaneError {
    /// Creates a new ambiguous default lane error.
    #[must_use]
    pub fn new(valid_lanes: LaneSet) -> Self {
        Self { valid_lanes }
    }

    /// Returns the contract error info for this error.
    #[must_use]
    pub fn error_info(&self) -> ContractErrorInfo {
        ContractErrorInfo::new(
            AMBIGUOUS_DEFAULT_LANE_CODE,
            format!("Unqualified emission with {} output lanes", self.valid_lanes.len()),
        )
        .with_fix_hint("Pass the target lane(s) to add_record when the stage has more or fewer than one lane.")
        .with_context_entry("valid_lanes", self.valid_lanes.joined())
    }
}

/// Routing contract violations raised by the router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneError {
    /// A named lane is not in the valid set.
    #[error("{0}")]
    Unknown(#[from] UnknownLaneError),

    /// No lane was named and no default lane exists.
    #[error("{0}")]
    AmbiguousDefault(#[from] AmbiguousDefaultLaneError),
}

impl LaneError {
    /// Returns the contract error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unknown(_) => UNKNOWN_LANE_CODE,
            Self::AmbiguousDefault(_) => AMBIGUOUS_DEFAULT_LANE_CODE,
        }
    }

    /// Returns the contract error info.
    #[must_use]
    pub fn error_info(&self) -> ContractErrorInfo {
        match self {
            Self::Unknown(err) => err.error_info(),
            Self::AmbiguousDefault(err) => err.error_info(),
        }
    }
}

/// Error returned by a processor invocation.
#[derive(Debug, Error)]
pub enum StageError {
    /// The processor violated the routing contract.
    #[error("{0}")]
    Lane(#[from] LaneError),

    /// The processor reported a failure.
    #[error("Stage '{stage}' failed: {message}")]
    Failed {
        /// The stage name.
        stage: String,
        /// The failure message.
        message: String,
    },

    /// The processor did not finish within the batch timeout.
    #[error("Stage '{stage}' timed out after {timeout_ms}ms")]
    Timeout {
        /// The stage name.
        stage: String,
        /// The configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Any other processor error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    /// Creates a failed stage error.
    #[must_use]
    pub fn failed(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Returns the lane error if this failure was a routing violation.
    #[must_use]
    pub fn as_lane_error(&self) -> Option<&LaneError> {
        match self {
            Self::Lane(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UnknownLaneError> for StageError {
    fn from(err: UnknownLaneError) -> Self {
        Self::Lane(err.into())
    }
}

impl From<AmbiguousDefaultLaneError> for StageError {
    fn from(err: AmbiguousDefaultLaneError) -> Self {
        Self::Lane(err.into())
    }
}

/// Errors raised while validating a runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A lane name contains characters outside `[A-Za-z0-9_.-]` or is empty.
    #[error("Invalid lane name '{0}'")]
    InvalidLaneName(String),

    /// The same lane was listed more than once.
    #[error("Duplicate lane '{0}'")]
    DuplicateLane(String),

    /// The batch size must be at least one.
    #[error("Invalid max batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// The configuration could not be parsed.
    #[error("Failed to parse runner config: {0}")]
    Parse(String),
}

/// Provides default suggestions for lane contract error codes.
pub struct ContractSuggestions;

impl ContractSuggestions {
    /// Gets a suggestion for a given error code.
    #[must_use]
    pub fn get(code: &str) -> Option<&'static str> {
        match code {
            UNKNOWN_LANE_CODE => Some(
                "The stage emitted to a lane that is not wired in the pipeline. \
                 Check for typos or add the lane to the stage's output lanes.",
            ),
            AMBIGUOUS_DEFAULT_LANE_CODE => Some(
                "Only stages with exactly one output lane may emit without naming a lane. \
                 Route each record explicitly.",
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_lane_message() {
        let err = UnknownLaneError::new("c", LaneSet::new(["a", "b"]));
        assert_eq!(err.to_string(), "Unknown lane 'c': valid lanes are [a, b]");
    }

    #[test]
    fn test_ambiguous_default_lane_message() {
        let err = AmbiguousDefaultLaneError::new(LaneSet::empty());
        assert!(err.to_string().contains("0 output lanes"));

        let err = AmbiguousDefaultLaneError::new(LaneSet::new(["b", "a"]));
        assert_eq!(
            err.to_string(),
            "No default lane: stage has 2 output lanes [a, b], name one explicitly"
        );
    }

    #[test]
    fn test_lane_error_info() {
        let err: LaneError = UnknownLaneError::new("x", LaneSet::new(["out"])).into();
        let info = err.error_info();

        assert_eq!(err.code(), UNKNOWN_LANE_CODE);
        assert_eq!(info.code, UNKNOWN_LANE_CODE);
        assert_eq!(info.context.get("lane"), Some(&"x".to_string()));
        assert!(info.fix_hint.is_some());
    }

    #[test]
    fn test_contract_error_info_to_dict() {
        let info = ContractErrorInfo::new("TEST-001", "Test error").with_fix_hint("Do that");
        let dict = info.to_dict();

        assert_eq!(dict.get("code").unwrap(), "TEST-001");
        assert_eq!(dict.get("fix_hint").unwrap(), "Do that");
        assert!(dict.get("context").is_none());
    }

    #[test]
    fn test_stage_error_from_lane_error() {
        let err: StageError = AmbiguousDefaultLaneError::new(LaneSet::new(["a", "b"])).into();
        assert_eq!(err.as_lane_error().map(LaneError::code), Some(AMBIGUOUS_DEFAULT_LANE_CODE));

        let failed = StageError::failed("parse", "bad input");
        assert!(failed.as_lane_error().is_none());
        assert_eq!(failed.to_string(), "Stage 'parse' failed: bad input");
    }

    #[test]
    fn test_contract_suggestions() {
        assert!(ContractSuggestions::get(UNKNOWN_LANE_CODE).is_some());
        assert!(ContractSuggestions::get(AMBIGUOUS_DEFAULT_LANE_CODE).is_some());
        assert!(ContractSuggestions::get("UNKNOWN").is_none());
    }
}
