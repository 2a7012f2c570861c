//! Alligator envelope: three shifted moving averages of midprice.
//!
//! Each line averages midprice over its period, then moves the result forward:
//! `line[i] = average[i - shift]`. Defaults: jaw 13/8, teeth 8/5, lips 5/3.
//! Lookback: period - 1 + shift.
//!
//! Converging lines mean a sleeping market; lips above teeth above jaw is an
//! up-trend, the mirror a down-trend.

use super::{midprices, rolling_mean, shift_forward, smoothed_mean};
use crate::components::indicator::Indicator;
use crate::config::{AverageKind, EnvelopeConfig, LineConfig};
use crate::domain::Bar;

/// One envelope line as an indicator column.
#[derive(Debug, Clone)]
pub struct ShiftedAverage {
    line: LineConfig,
    average: AverageKind,
    name: String,
}

impl ShiftedAverage {
    pub fn new(label: &str, line: LineConfig, average: AverageKind) -> Self {
        assert!(line.period >= 1, "{label} period must be >= 1");
        Self {
            line,
            average,
            name: format!("{label}_{}_{}", line.period, line.shift),
        }
    }
}

impl Indicator for ShiftedAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.line.first_defined()
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mids = midprices(bars);
        let averaged = match self.average {
            AverageKind::Simple => rolling_mean(&mids, self.line.period),
            AverageKind::Smoothed => smoothed_mean(&mids, self.line.period),
        };
        shift_forward(&averaged, self.line.shift)
    }
}

/// The three envelope columns.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub jaw: Vec<f64>,
    pub teeth: Vec<f64>,
    pub lips: Vec<f64>,
}

/// Compute jaw, teeth and lips. A window shorter than a line's lookback
/// leaves that line entirely NaN; this never fails.
pub fn compute_envelope(bars: &[Bar], config: &EnvelopeConfig) -> Envelope {
    let line = |label: &str, cfg: LineConfig| {
        ShiftedAverage::new(label, cfg, config.average).compute(bars)
    };
    Envelope {
        jaw: line("jaw", config.jaw),
        teeth: line("teeth", config.teeth),
        lips: line("lips", config.lips),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn rising(n: usize) -> Vec<Bar> {
        let mids: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        make_bars(&mids)
    }

    #[test]
    fn line_is_shifted_average() {
        let bars = rising(12);
        let lips = ShiftedAverage::new("lips", LineConfig::new(5, 3), AverageKind::Simple);
        let out = lips.compute(&bars);

        // Average defined from index 4, shifted by 3 → first value at 7.
        for v in &out[..7] {
            assert!(v.is_nan());
        }
        // out[7] = mean(mid[0..=4]) = 102
        assert_approx(out[7], 102.0, DEFAULT_EPSILON);
        // out[11] = mean(mid[4..=8]) = 106
        assert_approx(out[11], 106.0, DEFAULT_EPSILON);
        assert_eq!(lips.lookback(), 7);
    }

    #[test]
    fn line_names_carry_parameters() {
        let jaw = ShiftedAverage::new("jaw", LineConfig::new(13, 8), AverageKind::Simple);
        assert_eq!(jaw.name(), "jaw_13_8");
    }

    #[test]
    fn first_defined_index_per_default_line() {
        let bars = rising(40);
        let env = compute_envelope(&bars, &EnvelopeConfig::default());
        let first = |col: &[f64]| col.iter().position(|v| !v.is_nan()).unwrap();
        assert_eq!(first(&env.jaw), 20);
        assert_eq!(first(&env.teeth), 12);
        assert_eq!(first(&env.lips), 7);
    }

    #[test]
    fn short_window_leaves_line_undefined() {
        let bars = rising(15);
        let env = compute_envelope(&bars, &EnvelopeConfig::default());
        assert!(env.jaw.iter().all(|v| v.is_nan()));
        assert!(env.lips.iter().any(|v| !v.is_nan()));
    }

    #[test]
    fn rising_prices_order_lips_teeth_jaw() {
        let bars = rising(60);
        let env = compute_envelope(&bars, &EnvelopeConfig::default());
        for i in 20..60 {
            assert!(env.lips[i] > env.teeth[i], "lips <= teeth at {i}");
            assert!(env.teeth[i] > env.jaw[i], "teeth <= jaw at {i}");
        }
    }

    #[test]
    fn smoothed_lines_use_smma() {
        let bars = rising(30);
        let config = EnvelopeConfig {
            average: AverageKind::Smoothed,
            ..EnvelopeConfig::default()
        };
        let env = compute_envelope(&bars, &config);
        let simple = compute_envelope(&bars, &EnvelopeConfig::default());
        // Same seed at the first defined index, diverging afterwards.
        assert_approx(env.lips[7], simple.lips[7], DEFAULT_EPSILON);
        assert!(env.lips[20] < simple.lips[20]);
    }
}
