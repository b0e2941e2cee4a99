//! Configuration for the processor runner.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use crate::core::LaneSet;
use crate::errors::ConfigError;

/// Lane used when a stage does not configure its own output lanes.
pub const DEFAULT_LANE: &str = "lane";

/// Batch size used when none is configured.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10;

#[allow(clippy::expect_used)]
static LANE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("lane name pattern is valid"));

/// Returns true if `lane` is a well-formed lane name.
#[must_use]
pub fn is_valid_lane_name(lane: &str) -> bool {
    LANE_NAME.is_match(lane)
}

/// Configuration for running a processor over input records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Output lanes of the stage.
    #[serde(default = "default_output_lanes")]
    pub output_lanes: Vec<String>,
    /// Maximum number of records per invocation.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Offset reported to the processor with every batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_offset: Option<String>,
    /// Per-batch processing timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_timeout_ms: Option<u64>,
}

fn default_output_lanes() -> Vec<String> {
    vec![DEFAULT_LANE.to_string()]
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            output_lanes: default_output_lanes(),
            max_batch_size: default_max_batch_size(),
            source_offset: None,
            batch_timeout_ms: None,
        }
    }
}

impl RunnerConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any validation
    /// error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the output lanes.
    #[must_use]
    pub fn with_output_lanes<I, S>(mut self, lanes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_lanes = lanes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the maximum batch size.
    #[must_use]
    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size;
        self
    }

    /// Sets the source offset.
    #[must_use]
    pub fn with_source_offset(mut self, offset: impl Into<String>) -> Self {
        self.source_offset = Some(offset.into());
        self
    }

    /// Sets the per-batch timeout.
    #[must_use]
    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the per-batch timeout, if configured.
    #[must_use]
    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout_ms.map(Duration::from_millis)
    }

    /// Returns the output lanes as a lane set.
    #[must_use]
    pub fn lane_set(&self) -> LaneSet {
        LaneSet::new(self.output_lanes.iter().cloned())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch size is zero, a lane name is malformed,
    /// or a lane is listed twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.max_batch_size));
        }

        let mut seen = HashSet::new();
        for lane in &self.output_lanes {
            if !is_valid_lane_name(lane) {
                return Err(ConfigError::InvalidLaneName(lane.clone()));
            }
            if !seen.insert(lane.as_str()) {
                return Err(ConfigError::DuplicateLane(lane.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.output_lanes, vec!["lane".to_string()]);
        assert_eq!(config.max_batch_size, 10);
        assert!(config.source_offset.is_none());
        assert!(config.batch_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = RunnerConfig::from_json(r#"{"max_batch_size": 35}"#).unwrap();
        assert_eq!(config.max_batch_size, 35);
        assert_eq!(config.lane_set(), LaneSet::new([DEFAULT_LANE]));
    }

    #[test]
    fn test_from_json_full() {
        let config = RunnerConfig::from_json(
            r#"{"output_lanes": ["good", "bad"], "source_offset": "0", "batch_timeout_ms": 250}"#,
        )
        .unwrap();

        assert_eq!(config.lane_set(), LaneSet::new(["bad", "good"]));
        assert_eq!(config.source_offset.as_deref(), Some("0"));
        assert_eq!(config.batch_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = RunnerConfig::new().with_max_batch_size(0).validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidBatchSize(0));
    }

    #[test]
    fn test_invalid_lane_names_rejected() {
        for lane in ["", "has space", "slash/lane"] {
            let err = RunnerConfig::new().with_output_lanes([lane]).validate().unwrap_err();
            assert_eq!(err, ConfigError::InvalidLaneName(lane.to_string()));
        }
    }

    #[test]
    fn test_duplicate_lane_rejected() {
        let err = RunnerConfig::new()
            .with_output_lanes(["a", "b", "a"])
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLane("a".to_string()));
    }

    #[test]
    fn test_empty_lanes_allowed() {
        let config = RunnerConfig::new().with_output_lanes(Vec::<String>::new());
        assert!(config.validate().is_ok());
        assert!(config.lane_set().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = RunnerConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_lane_name_pattern() {
        assert!(is_valid_lane_name("outputLane"));
        assert!(is_valid_lane_name("lane-1.errors_2"));
        assert!(!is_valid_lane_name("a\tb"));
    }
}
