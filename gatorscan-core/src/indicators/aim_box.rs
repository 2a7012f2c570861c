//! Aim box: the most recent fractal extremes carried forward as running
//! resistance (`high`) and support (`low`).
//!
//! One left-to-right pass: at a fractal index take that bar's price, otherwise
//! repeat the previous level. NaN before the first fractal of each kind.
//! Support follows every strict low, so an outside bar moves both levels.

use super::fractal::FractalMarks;
use crate::domain::Bar;

/// Running resistance and support levels.
#[derive(Debug, Clone)]
pub struct AimBox {
    pub high: Vec<f64>,
    pub low: Vec<f64>,
}

/// Last-observation-carried-forward of `values` sampled where `marks` is set.
pub fn carry_forward(values: &[f64], marks: &[bool]) -> Vec<f64> {
    debug_assert_eq!(values.len(), marks.len());
    let mut level = f64::NAN;
    values
        .iter()
        .zip(marks)
        .map(|(&value, &marked)| {
            if marked {
                level = value;
            }
            level
        })
        .collect()
}

pub fn build_aim_box(bars: &[Bar], fractals: &FractalMarks) -> AimBox {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    AimBox {
        high: carry_forward(&highs, &fractals.high),
        low: carry_forward(&lows, &fractals.strict_low),
    }
}
