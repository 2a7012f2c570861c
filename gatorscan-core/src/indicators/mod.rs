//! Concrete indicator implementations.
//!
//! Column indicators (moving averages, envelope lines, the oscillator)
//! implement the `Indicator` trait from `components::indicator`. Fractals and
//! the aim box produce marker/level columns and are plain functions over the
//! window, since they need bars on both sides of an index.

pub mod aim_box;
pub mod envelope;
pub mod fractal;
pub mod oscillator;
pub mod sma;
pub mod smma;

pub use aim_box::{build_aim_box, carry_forward, AimBox};
pub use envelope::{compute_envelope, Envelope, ShiftedAverage};
pub use fractal::{detect_fractals, FractalMarks};
pub use oscillator::{compute_momentum, AwesomeOscillator, Momentum, MomentumColor};
pub use sma::{rolling_mean, Sma};
pub use smma::{smoothed_mean, Smma};

use crate::domain::Bar;

/// `(high + low) / 2` for every bar.
pub fn midprices(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(Bar::midprice).collect()
}

/// Move a column `shift` bars forward in time: `out[i] = values[i - shift]`.
/// The first `shift` entries become NaN; the length is unchanged.
pub fn shift_forward(values: &[f64], shift: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if shift < n {
        out[shift..].copy_from_slice(&values[..n - shift]);
    }
    out
}

/// `out[i] = values[i] - values[i - 1]`, NaN at index 0.
pub fn first_difference(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = values[i] - values[i - 1];
    }
    out
}

/// NaN (undefined) becomes `None`.
pub fn defined(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Create synthetic bars whose midprice equals the given values.
///
/// open = close = mid, high = mid + 1.0, low = mid - 1.0, five-minute spacing.
#[cfg(test)]
pub fn make_bars(mids: &[f64]) -> Vec<Bar> {
    let ranges: Vec<(f64, f64)> = mids.iter().map(|&m| (m + 1.0, m - 1.0)).collect();
    make_hl_bars(&ranges)
}

/// Create synthetic bars from explicit (high, low) pairs.
#[cfg(test)]
pub fn make_hl_bars(ranges: &[(f64, f64)]) -> Vec<Bar> {
    use chrono::TimeZone;
    let start = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(high, low))| {
            let mid = (high + low) / 2.0;
            Bar::new(
                start + chrono::Duration::minutes(5 * i as i64),
                mid,
                high,
                low,
                mid,
            )
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
