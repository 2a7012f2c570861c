//! Fractals: strict local extremes over a centered window (default 5 bars).
//!
//! Bar i is a fractal high when its High is strictly above every other High
//! in `[i - half, i + half]`; a fractal low mirrors this with Low and
//! strictly-below. Ties never qualify. The first and last `half` bars are
//! never marked because their window is incomplete.
//!
//! Fractals read bars after i, so they are confirmed `half` bars late. This is
//! why they are not an `Indicator` column.

use crate::domain::Bar;

/// Per-bar swing markers.
///
/// `high` and `low` are never both set. `strict_low` records every bar that
/// passes the strict-low test, outside bars reported as highs included; the
/// aim box reads it so support still moves at an outside bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractalMarks {
    pub high: Vec<bool>,
    pub low: Vec<bool>,
    pub strict_low: Vec<bool>,
}

impl FractalMarks {
    pub fn len(&self) -> usize {
        self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty()
    }

    pub fn high_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.high.iter().enumerate().filter(|(_, m)| **m).map(|(i, _)| i)
    }

    pub fn low_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.low.iter().enumerate().filter(|(_, m)| **m).map(|(i, _)| i)
    }
}

/// Mark fractal highs and lows for a window of `width` bars (odd, >= 3).
///
/// An outside bar that is both the strict highest High and the strict lowest
/// Low of its window is reported as a fractal high.
pub fn detect_fractals(bars: &[Bar], width: usize) -> FractalMarks {
    assert!(width >= 3 && width % 2 == 1, "fractal width must be odd and >= 3");
    let n = bars.len();
    let half = width / 2;
    let mut high = vec![false; n];
    let mut low = vec![false; n];
    let mut strict_low = vec![false; n];

    if n < width {
        return FractalMarks { high, low, strict_low };
    }

    for i in half..n - half {
        let neighbours = (i - half..=i + half).filter(|&j| j != i);
        let mut is_high = true;
        let mut is_low = true;
        for j in neighbours {
            is_high &= bars[i].high > bars[j].high;
            is_low &= bars[i].low < bars[j].low;
        }
        high[i] = is_high;
        low[i] = is_low && !is_high;
        strict_low[i] = is_low;
    }

    FractalMarks { high, low, strict_low }
}
