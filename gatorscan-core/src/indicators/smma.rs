//! Smoothed Moving Average (SMMA, Wilder smoothing) of midprice.
//!
//! Seeded with the simple mean of the first `period` values, then
//! `smma[i] = (smma[i-1] * (period - 1) + value[i]) / period`.
//! Lookback: period - 1.

use super::midprices;
use crate::components::indicator::Indicator;
use crate::domain::Bar;

/// Wilder-smoothed mean of `values`. A NaN resets the recursion; the next
/// value is emitted once `period` consecutive finite inputs have been seen.
pub fn smoothed_mean(values: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    if period == 0 {
        return result;
    }

    let p = period as f64;
    let mut prev: Option<f64> = None;
    let mut seed_sum = 0.0;
    let mut seed_count = 0;

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            prev = None;
            seed_sum = 0.0;
            seed_count = 0;
            continue;
        }
        match prev {
            Some(last) => {
                let next = (last * (p - 1.0) + v) / p;
                result[i] = next;
                prev = Some(next);
            }
            None => {
                seed_sum += v;
                seed_count += 1;
                if seed_count == period {
                    let seed = seed_sum / p;
                    result[i] = seed;
                    prev = Some(seed);
                }
            }
        }
    }

    result
}

#[derive(Debug, Clone)]
pub struct Smma {
    period: usize,
    name: String,
}

impl Smma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMMA period must be >= 1");
        Self {
            period,
            name: format!("smma_{period}"),
        }
    }
}

impl Indicator for Smma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        smoothed_mean(&midprices(bars), self.period)
    }
}
