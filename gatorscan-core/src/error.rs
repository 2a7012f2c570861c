//! Engine error taxonomy.
//!
//! "No signal" is not an error: it is a `SignalDecision` with `active = false`.
//! Everything here aborts the invocation for one (instrument, timeframe) pair.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort an engine invocation before a decision is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("insufficient data: need at least {required} bars, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error("invalid engine config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a price series is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedInput {
    #[error("bar {index}: timestamp {timestamp} is earlier than the previous bar")]
    NonMonotonicTimestamp {
        index: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("bar {index}: duplicate timestamp {timestamp}")]
    DuplicateTimestamp {
        index: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("bar {index}: {field} is missing or not finite")]
    MissingValue { index: usize, field: &'static str },

    #[error("bar {index}: high {high} is below low {low}")]
    InvertedRange { index: usize, high: f64, low: f64 },
}
