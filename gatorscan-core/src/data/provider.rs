//! Market data source trait and structured error types.
//!
//! `MarketDataSource` abstracts over where bars come from (Yahoo Finance,
//! CSV files, a synthetic random walk) so the sweep can swap implementations
//! and tests can mock them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PriceSeries, Timeframe};
use crate::error::MalformedInput;

/// What to fetch: one instrument on one timeframe, the latest `length` bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub instrument: String,
    pub timeframe: Timeframe,
    pub length: usize,
}

impl FetchRequest {
    pub fn new(instrument: impl Into<String>, timeframe: Timeframe, length: usize) -> Self {
        Self {
            instrument: instrument.into(),
            timeframe,
            length,
        }
    }
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("malformed bars: {0}")]
    Malformed(#[from] MalformedInput),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data error: {0}")]
    Other(String),
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
}

/// A source of validated price windows.
pub trait MarketDataSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn kind(&self) -> DataSource;

    /// Fetch the most recent `request.length` bars, oldest first.
    fn fetch(&self, request: &FetchRequest) -> Result<PriceSeries, DataError>;

    /// Check if the source is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool {
        true
    }
}
