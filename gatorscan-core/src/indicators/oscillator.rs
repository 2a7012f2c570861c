//! Awesome oscillator (fast minus slow SMA of midprice) and its first
//! difference.
//!
//! Lookback: slow - 1 for the oscillator, slow for the difference.

use serde::{Deserialize, Serialize};

use super::{first_difference, midprices, rolling_mean};
use crate::components::indicator::Indicator;
use crate::config::OscillatorConfig;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct AwesomeOscillator {
    fast: usize,
    slow: usize,
    name: String,
}

impl AwesomeOscillator {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1, "oscillator fast period must be >= 1");
        assert!(fast < slow, "oscillator fast period must be below slow");
        Self {
            fast,
            slow,
            name: format!("ao_{fast}_{slow}"),
        }
    }
}

impl Indicator for AwesomeOscillator {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mids = midprices(bars);
        let fast = rolling_mean(&mids, self.fast);
        let slow = rolling_mean(&mids, self.slow);
        fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
    }
}

/// Oscillator column and its bar-to-bar change.
#[derive(Debug, Clone)]
pub struct Momentum {
    pub oscillator: Vec<f64>,
    pub diff: Vec<f64>,
}

pub fn compute_momentum(bars: &[Bar], config: &OscillatorConfig) -> Momentum {
    let oscillator = AwesomeOscillator::new(config.fast, config.slow).compute(bars);
    let diff = first_difference(&oscillator);
    Momentum { oscillator, diff }
}

/// Histogram shade of one oscillator bar: sign of the level, then of the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumColor {
    /// Above zero and rising.
    RisingPositive,
    /// Above zero, flat or falling.
    FallingPositive,
    /// At or below zero and rising.
    RisingNegative,
    /// At or below zero, flat or falling.
    FallingNegative,
}

impl MomentumColor {
    /// `None` while either input is undefined.
    pub fn classify(oscillator: f64, diff: f64) -> Option<Self> {
        if oscillator.is_nan() || diff.is_nan() {
            return None;
        }
        Some(match (oscillator > 0.0, diff > 0.0) {
            (true, true) => Self::RisingPositive,
            (true, false) => Self::FallingPositive,
            (false, true) => Self::RisingNegative,
            (false, false) => Self::FallingNegative,
        })
    }

    pub fn css_name(self) -> &'static str {
        match self {
            Self::RisingPositive => "lightgreen",
            Self::FallingPositive => "darkgreen",
            Self::RisingNegative => "darkred",
            Self::FallingNegative => "red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn oscillator_is_fast_minus_slow() {
        let mids: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let bars = make_bars(&mids);
        let out = AwesomeOscillator::new(2, 4).compute(&bars);
        for v in &out[..3] {
            assert!(v.is_nan());
        }
        // index 3: mean(2,3) - mean(0..=3) = 2.5 - 1.5
        assert_approx(out[3], 1.0, DEFAULT_EPSILON);
        // linear input → constant gap
        for v in &out[3..] {
            assert_approx(*v, 1.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn default_lookbacks() {
        let ao = AwesomeOscillator::new(5, 34);
        assert_eq!(ao.name(), "ao_5_34");
        assert_eq!(ao.lookback(), 33);
    }

    #[test]
    fn diff_starts_one_bar_after_oscillator() {
        let mids: Vec<f64> = (0..50).map(|i| (i as f64 * 0.3).sin()).collect();
        let m = compute_momentum(&make_bars(&mids), &OscillatorConfig::default());
        assert!(m.oscillator[32].is_nan());
        assert!(!m.oscillator[33].is_nan());
        assert!(m.diff[33].is_nan());
        assert!(!m.diff[34].is_nan());
        assert_approx(m.diff[40], m.oscillator[40] - m.oscillator[39], DEFAULT_EPSILON);
    }

    #[test]
    fn flat_prices_give_zero_momentum() {
        let m = compute_momentum(&make_bars(&[1.25; 60]), &OscillatorConfig::default());
        for i in 34..60 {
            assert_approx(m.oscillator[i], 0.0, 1e-9);
            assert_approx(m.diff[i], 0.0, 1e-9);
        }
    }

    #[test]
    fn color_classification() {
        assert_eq!(MomentumColor::classify(1.0, 0.5), Some(MomentumColor::RisingPositive));
        assert_eq!(MomentumColor::classify(1.0, -0.5), Some(MomentumColor::FallingPositive));
        assert_eq!(MomentumColor::classify(1.0, 0.0), Some(MomentumColor::FallingPositive));
        assert_eq!(MomentumColor::classify(-1.0, 0.5), Some(MomentumColor::RisingNegative));
        assert_eq!(MomentumColor::classify(0.0, -0.1), Some(MomentumColor::FallingNegative));
        assert_eq!(MomentumColor::classify(f64::NAN, 0.1), None);
        assert_eq!(MomentumColor::RisingPositive.css_name(), "lightgreen");
        assert_eq!(MomentumColor::FallingNegative.css_name(), "red");
    }
}
