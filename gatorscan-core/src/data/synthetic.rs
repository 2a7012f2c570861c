//! Synthetic bars for smoke runs and benchmarks.
//!
//! A seeded random walk: the same (instrument, timeframe, length) always
//! produces the same window. Clearly fake, tagged `DataSource::Synthetic`.

use chrono::{DateTime, DurationRound, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataSource, FetchRequest, MarketDataSource};
use crate::domain::{Bar, PriceSeries, Timeframe};

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    /// Timestamp of the last generated bar.
    end: DateTime<Utc>,
    start_price: f64,
    /// Maximum relative move per bar.
    volatility: f64,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self {
            end: Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
            start_price: 1.1,
            volatility: 0.002,
        }
    }
}

impl SyntheticSource {
    pub fn new(end: DateTime<Utc>) -> Self {
        Self {
            end,
            ..Self::default()
        }
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility.abs();
        self
    }

    fn seed(instrument: &str, timeframe: Timeframe) -> [u8; 32] {
        let key = format!("{instrument}/{timeframe}");
        *blake3::hash(key.as_bytes()).as_bytes()
    }

    /// Generate `length` bars ending at (the interval boundary at or before) `end`.
    ///
    /// Fails when the window does not fit in the representable time range.
    pub fn generate(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        length: usize,
    ) -> Result<Vec<Bar>, DataError> {
        let step = timeframe.duration();
        let last = self.end.duration_trunc(step).unwrap_or(self.end);
        let out_of_range =
            || DataError::Other(format!("{length} bars of {timeframe} do not fit before {last}"));
        let offset = |i: usize| i32::try_from(i).ok().and_then(|i| step.checked_mul(i));
        let span = offset(length.saturating_sub(1)).ok_or_else(out_of_range)?;
        let first = last.checked_sub_signed(span).ok_or_else(out_of_range)?;

        let mut rng = StdRng::from_seed(Self::seed(instrument, timeframe));
        let mut price = self.start_price;
        let v = self.volatility.max(f64::EPSILON);
        (0..length)
            .map(|i| -> Result<Bar, DataError> {
                let timestamp = offset(i)
                    .and_then(|d| first.checked_add_signed(d))
                    .ok_or_else(out_of_range)?;
                let open = price;
                let close = price * (1.0 + rng.gen_range(-v..v));
                let high = open.max(close) * (1.0 + rng.gen_range(0.0..v / 2.0));
                let low = open.min(close) * (1.0 - rng.gen_range(0.0..v / 2.0));
                price = close;
                Ok(Bar::new(timestamp, open, high, low, close))
            })
            .collect()
    }
}

impl MarketDataSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn kind(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(&self, request: &FetchRequest) -> Result<PriceSeries, DataError> {
        let bars = self.generate(&request.instrument, request.timeframe, request.length)?;
        Ok(PriceSeries::new(bars)?)
    }
}
