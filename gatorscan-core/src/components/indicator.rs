//! Indicator trait.
//!
//! Indicators are pure functions: bar window in, numeric column out. They are
//! computed once over the whole window when the series is annotated.

use crate::domain::Bar;

/// A numeric column derived from a bar window.
///
/// Output has the same length as the input. Undefined entries (warm-up,
/// shifted-in gaps) are `f64::NAN`.
///
/// # Look-ahead guard
/// A value at bar t may depend only on bars `0..=t`. Every implementation must
/// give identical values on a truncated window and on the full window.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "jaw_13_8", "ao_5_34").
    fn name(&self) -> &str;

    /// Index of the first defined value.
    fn lookback(&self) -> usize;

    /// Compute the column for the whole window.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}
