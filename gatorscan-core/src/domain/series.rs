//! PriceSeries: a validated, chronologically ordered window of bars.

use crate::domain::Bar;
use crate::error::MalformedInput;

/// Ordered bars with strictly increasing timestamps and complete OHLC values.
///
/// Construction is the only validation point: every `PriceSeries` that exists
/// is well-formed, so the indicator stages never re-check their input.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Validate and wrap a vector of bars.
    ///
    /// Rejects missing/non-finite prices, `high < low`, duplicate timestamps and
    /// timestamps that go backwards. The first offending bar is reported.
    pub fn new(bars: Vec<Bar>) -> Result<Self, MalformedInput> {
        for (index, bar) in bars.iter().enumerate() {
            if let Some(field) = bar.missing_field() {
                return Err(MalformedInput::MissingValue { index, field });
            }
            if bar.high < bar.low {
                return Err(MalformedInput::InvertedRange {
                    index,
                    high: bar.high,
                    low: bar.low,
                });
            }
            if index > 0 {
                let prev = bars[index - 1].timestamp;
                if bar.timestamp == prev {
                    return Err(MalformedInput::DuplicateTimestamp {
                        index,
                        timestamp: bar.timestamp,
                    });
                }
                if bar.timestamp < prev {
                    return Err(MalformedInput::NonMonotonicTimestamp {
                        index,
                        timestamp: bar.timestamp,
                    });
                }
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Keep only the most recent `n` bars. A suffix of a valid series is valid.
    pub fn tail(mut self, n: usize) -> Self {
        if self.bars.len() > n {
            let cut = self.bars.len() - n;
            self.bars.drain(..cut);
        }
        self
    }
}
