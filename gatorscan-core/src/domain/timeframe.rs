//! Timeframe labels such as `5m`, `1h`, `1d`, `1wk`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unit of a bar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    fn suffix(self) -> &'static str {
        match self {
            Self::Minute => "m",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Week => "wk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeframeError {
    #[error("empty timeframe label")]
    Empty,

    #[error("timeframe '{0}' has no valid count (expected e.g. 5m, 1h, 1d)")]
    BadCount(String),

    #[error("timeframe '{0}' has an unknown unit (expected m, h, d or wk)")]
    BadUnit(String),
}

/// Bar interval: a positive count of a [`TimeUnit`].
///
/// Serializes as its label so config files read `timeframes = ["5m", "1h"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timeframe {
    count: u32,
    unit: TimeUnit,
}

impl Timeframe {
    pub fn new(count: u32, unit: TimeUnit) -> Self {
        assert!(count >= 1, "timeframe count must be >= 1");
        Self { count, unit }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Length of one bar.
    pub fn duration(&self) -> chrono::Duration {
        let n = i64::from(self.count);
        match self.unit {
            TimeUnit::Minute => chrono::Duration::minutes(n),
            TimeUnit::Hour => chrono::Duration::hours(n),
            TimeUnit::Day => chrono::Duration::days(n),
            TimeUnit::Week => chrono::Duration::weeks(n),
        }
    }

    /// How far back the market-data provider must look to cover a full window
    /// at this interval. Intraday history is only served for short ranges.
    pub fn history_range(&self) -> &'static str {
        match (self.count, self.unit) {
            (1 | 2, TimeUnit::Minute) => "1d",
            (5, TimeUnit::Minute) => "2d",
            (15, TimeUnit::Minute) => "7d",
            (30, TimeUnit::Minute) => "14d",
            (1, TimeUnit::Hour) => "30d",
            (1, TimeUnit::Day) => "150d",
            (1, TimeUnit::Week) => "3y",
            _ => "30d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeframeError::Empty);
        }
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TimeframeError::BadUnit(s.to_string()))?;
        let (digits, suffix) = s.split_at(split);
        let count: u32 = digits
            .parse()
            .ok()
            .filter(|c| *c >= 1)
            .ok_or_else(|| TimeframeError::BadCount(s.to_string()))?;
        let unit = match suffix {
            "m" => TimeUnit::Minute,
            "h" => TimeUnit::Hour,
            "d" => TimeUnit::Day,
            "wk" => TimeUnit::Week,
            _ => return Err(TimeframeError::BadUnit(s.to_string())),
        };
        Ok(Self { count, unit })
    }
}

impl TryFrom<String> for Timeframe {
    type Error = TimeframeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.to_string()
    }
}
