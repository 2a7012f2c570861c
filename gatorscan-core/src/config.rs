//! Engine configuration: every period, shift, width and threshold the
//! pipeline uses. Nothing in the engine is a hard-coded constant.
//!
//! All sections deserialize with defaults, so a TOML file only has to name
//! the values it changes:
//!
//! ```toml
//! warmup = 60
//!
//! [envelope]
//! average = "smoothed"
//!
//! [rule]
//! momentum_gate = "diff_and_level"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{line} period must be >= 1")]
    ZeroPeriod { line: &'static str },

    #[error("oscillator fast period ({fast}) must be below slow period ({slow})")]
    OscillatorPeriods { fast: usize, slow: usize },

    #[error("fractal width must be odd and >= 3, got {0}")]
    FractalWidth(usize),

    #[error("breakout buffer must be a finite value >= 0, got {0}")]
    BreakoutBuffer(f64),

    #[error("parse engine config: {0}")]
    Parse(String),
}

/// Averaging method for the envelope lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageKind {
    #[default]
    Simple,
    /// Wilder smoothing (SMMA), the classic alligator formulation.
    Smoothed,
}

/// One envelope line: average period and forward shift in bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineConfig {
    pub period: usize,
    pub shift: usize,
}

impl LineConfig {
    pub const fn new(period: usize, shift: usize) -> Self {
        Self { period, shift }
    }

    /// Index of the first defined value: `period - 1 + shift`.
    pub fn first_defined(&self) -> usize {
        self.period.saturating_sub(1) + self.shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    pub jaw: LineConfig,
    pub teeth: LineConfig,
    pub lips: LineConfig,
    pub average: AverageKind,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            jaw: LineConfig::new(13, 8),
            teeth: LineConfig::new(8, 5),
            lips: LineConfig::new(5, 3),
            average: AverageKind::Simple,
        }
    }
}

impl EnvelopeConfig {
    pub fn lines(&self) -> [(&'static str, LineConfig); 3] {
        [("jaw", self.jaw), ("teeth", self.teeth), ("lips", self.lips)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorConfig {
    pub fast: usize,
    pub slow: usize,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self { fast: 5, slow: 34 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    /// Centered window width; the candidate bar sits in the middle.
    pub width: usize,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self { width: 5 }
    }
}

/// How the momentum gate reads the oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumGate {
    /// Direction of `oscillator_diff` only.
    #[default]
    DiffSign,
    /// `oscillator_diff` and `oscillator` must both point the same way.
    DiffAndLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalRuleConfig {
    pub momentum_gate: MomentumGate,
    /// Distance the close must clear beyond the aim box, in price units.
    pub breakout_buffer: f64,
}

impl Default for SignalRuleConfig {
    fn default() -> Self {
        Self {
            momentum_gate: MomentumGate::DiffSign,
            breakout_buffer: 0.0,
        }
    }
}

/// Complete engine parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub envelope: EnvelopeConfig,
    pub oscillator: OscillatorConfig,
    pub fractal: FractalConfig,
    /// Leading rows discarded before the rule runs. Raised automatically to
    /// [`EngineConfig::required_warmup`] when set lower.
    pub warmup: usize,
    pub rule: SignalRuleConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            envelope: EnvelopeConfig::default(),
            oscillator: OscillatorConfig::default(),
            fractal: FractalConfig::default(),
            warmup: 50,
            rule: SignalRuleConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse from a TOML string; missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (line, cfg) in self.envelope.lines() {
            if cfg.period == 0 {
                return Err(ConfigError::ZeroPeriod { line });
            }
        }
        let OscillatorConfig { fast, slow } = self.oscillator;
        if fast == 0 {
            return Err(ConfigError::ZeroPeriod { line: "oscillator fast" });
        }
        if fast >= slow {
            return Err(ConfigError::OscillatorPeriods { fast, slow });
        }
        let width = self.fractal.width;
        if width < 3 || width % 2 == 0 {
            return Err(ConfigError::FractalWidth(width));
        }
        let buffer = self.rule.breakout_buffer;
        if !buffer.is_finite() || buffer < 0.0 {
            return Err(ConfigError::BreakoutBuffer(buffer));
        }
        Ok(())
    }

    /// Smallest number of leading rows whose removal leaves every envelope
    /// and oscillator column defined: the latest first-defined index across
    /// the three lines, and `slow` for the oscillator diff (the oscillator
    /// itself starts at `slow - 1`, its diff one bar later).
    pub fn required_warmup(&self) -> usize {
        self.envelope
            .lines()
            .iter()
            .map(|(_, line)| line.first_defined())
            .chain(std::iter::once(self.oscillator.slow))
            .max()
            .unwrap_or(0)
    }

    /// Rows actually trimmed: the configured warm-up, never less than required.
    pub fn effective_warmup(&self) -> usize {
        self.warmup.max(self.required_warmup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.envelope.jaw, LineConfig::new(13, 8));
        assert_eq!(cfg.envelope.teeth, LineConfig::new(8, 5));
        assert_eq!(cfg.envelope.lips, LineConfig::new(5, 3));
        assert_eq!(cfg.oscillator, OscillatorConfig { fast: 5, slow: 34 });
        assert_eq!(cfg.fractal.width, 5);
        assert_eq!(cfg.warmup, 50);
    }

    #[test]
    fn required_warmup_from_defaults() {
        // jaw: 12 + 8 = 20, teeth: 7 + 5 = 12, lips: 4 + 3 = 7, oscillator diff: 34
        assert_eq!(EngineConfig::default().required_warmup(), 34);
        assert_eq!(EngineConfig::default().effective_warmup(), 50);
    }

    #[test]
    fn warmup_rederived_when_lines_grow() {
        let mut cfg = EngineConfig::default();
        cfg.envelope.jaw = LineConfig::new(40, 20);
        assert_eq!(cfg.required_warmup(), 59);
        assert_eq!(cfg.effective_warmup(), 59);
    }

    #[test]
    fn warmup_never_below_required() {
        let cfg = EngineConfig {
            warmup: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.effective_warmup(), 34);
    }

    #[test]
    fn rejects_zero_period() {
        let mut cfg = EngineConfig::default();
        cfg.envelope.teeth.period = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroPeriod { line: "teeth" }));
    }

    #[test]
    fn rejects_fast_not_below_slow() {
        let mut cfg = EngineConfig::default();
        cfg.oscillator = OscillatorConfig { fast: 34, slow: 34 };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::OscillatorPeriods { fast: 34, slow: 34 })
        );
    }

    #[test]
    fn rejects_even_or_tiny_fractal_width() {
        for width in [0, 1, 2, 4, 6] {
            let mut cfg = EngineConfig::default();
            cfg.fractal.width = width;
            assert_eq!(cfg.validate(), Err(ConfigError::FractalWidth(width)));
        }
    }

    #[test]
    fn rejects_negative_buffer() {
        let mut cfg = EngineConfig::default();
        cfg.rule.breakout_buffer = -0.5;
        assert!(matches!(cfg.validate(), Err(ConfigError::BreakoutBuffer(_))));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = EngineConfig::from_toml(
            r#"
            warmup = 60

            [envelope]
            average = "smoothed"

            [envelope.jaw]
            period = 21
            shift = 13

            [rule]
            momentum_gate = "diff_and_level"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.warmup, 60);
        assert_eq!(cfg.envelope.average, AverageKind::Smoothed);
        assert_eq!(cfg.envelope.jaw, LineConfig::new(21, 13));
        assert_eq!(cfg.envelope.teeth, LineConfig::new(8, 5));
        assert_eq!(cfg.rule.momentum_gate, MomentumGate::DiffAndLevel);
        assert_eq!(cfg.oscillator.slow, 34);
    }

    #[test]
    fn toml_validation_runs() {
        let err = EngineConfig::from_toml("[fractal]\nwidth = 4\n").unwrap_err();
        assert_eq!(err, ConfigError::FractalWidth(4));
    }

    #[test]
    fn toml_parse_error_is_reported() {
        let err = EngineConfig::from_toml("warmup = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
