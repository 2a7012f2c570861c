//! Alligator breakout confirmation.
//!
//! Three gates are read on the latest bar:
//! - envelope: lips > teeth > jaw is bullish, lips < teeth < jaw bearish
//! - momentum: sign of the oscillator diff (optionally also the oscillator level)
//! - breakout: close beyond the aim box (`aim_high + buffer` / `aim_low - buffer`)
//!
//! The signal fires only when all three point the same way.

use crate::components::signal::{GateReadout, SignalConfirmation, SignalDecision, SignalDirection};
use crate::config::{MomentumGate, SignalRuleConfig};
use crate::engine::{AnnotatedRow, AnnotatedSeries};

pub fn envelope_gate(row: &AnnotatedRow<'_>) -> Option<SignalDirection> {
    let (jaw, teeth, lips) = (row.jaw?, row.teeth?, row.lips?);
    if lips > teeth && teeth > jaw {
        Some(SignalDirection::Bullish)
    } else if lips < teeth && teeth < jaw {
        Some(SignalDirection::Bearish)
    } else {
        None
    }
}

pub fn momentum_gate(row: &AnnotatedRow<'_>, mode: MomentumGate) -> Option<SignalDirection> {
    let diff = row.oscillator_diff?;
    let direction = if diff > 0.0 {
        SignalDirection::Bullish
    } else if diff < 0.0 {
        SignalDirection::Bearish
    } else {
        return None;
    };
    match mode {
        MomentumGate::DiffSign => Some(direction),
        MomentumGate::DiffAndLevel => {
            let level = row.oscillator?;
            let agrees = match direction {
                SignalDirection::Bullish => level > 0.0,
                SignalDirection::Bearish => level < 0.0,
            };
            agrees.then_some(direction)
        }
    }
}

/// Close above resistance is bullish, below support bearish. Closing beyond
/// both (support above resistance after a sharp reversal) is ambiguous.
pub fn breakout_gate(row: &AnnotatedRow<'_>, buffer: f64) -> Option<SignalDirection> {
    let close = row.bar.close;
    let above = row.aim_high.is_some_and(|high| close > high + buffer);
    let below = row.aim_low.is_some_and(|low| close < low - buffer);
    match (above, below) {
        (true, false) => Some(SignalDirection::Bullish),
        (false, true) => Some(SignalDirection::Bearish),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlligatorConfirmation {
    config: SignalRuleConfig,
}

impl AlligatorConfirmation {
    pub fn new(config: SignalRuleConfig) -> Self {
        Self { config }
    }

    pub fn read_gates(&self, row: &AnnotatedRow<'_>) -> GateReadout {
        GateReadout {
            envelope: envelope_gate(row),
            momentum: momentum_gate(row, self.config.momentum_gate),
            breakout: breakout_gate(row, self.config.breakout_buffer),
        }
    }
}

impl SignalConfirmation for AlligatorConfirmation {
    fn name(&self) -> &str {
        "alligator_breakout"
    }

    fn confirm(&self, series: &AnnotatedSeries) -> SignalDecision {
        let Some(row) = series.last_row() else {
            return SignalDecision::inactive(GateReadout::default(), None);
        };
        let gates = self.read_gates(&row);
        let evaluated_at = Some(row.bar.timestamp);

        if !row.is_complete() {
            return SignalDecision::inactive(gates, evaluated_at);
        }
        match gates.agreed() {
            Some(direction) => SignalDecision::fired(direction, gates, evaluated_at),
            None => SignalDecision::inactive(gates, evaluated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use chrono::{TimeZone, Utc};

    fn bar(close: f64) -> Bar {
        let ts = Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap();
        Bar::new(ts, close, close + 0.001, close - 0.001, close)
    }

    /// A complete bullish row: ordered lines, rising momentum, close over resistance.
    fn bullish_row(bar: &Bar) -> AnnotatedRow<'_> {
        AnnotatedRow {
            index: 0,
            bar,
            jaw: Some(1.0950),
            teeth: Some(1.0960),
            lips: Some(1.0970),
            oscillator: Some(0.0004),
            oscillator_diff: Some(0.0001),
            fractal_high: false,
            fractal_low: false,
            aim_high: Some(1.0980),
            aim_low: Some(1.0900),
        }
    }

    #[test]
    fn envelope_ordering() {
        let b = bar(1.1);
        let row = bullish_row(&b);
        assert_eq!(envelope_gate(&row), Some(SignalDirection::Bullish));

        let bearish = AnnotatedRow {
            jaw: row.lips,
            lips: row.jaw,
            ..row
        };
        assert_eq!(envelope_gate(&bearish), Some(SignalDirection::Bearish));

        let tangled = AnnotatedRow {
            teeth: Some(1.0990),
            ..row
        };
        assert_eq!(envelope_gate(&tangled), None);

        let equal = AnnotatedRow {
            teeth: row.lips,
            ..row
        };
        assert_eq!(envelope_gate(&equal), None);

        let missing = AnnotatedRow { jaw: None, ..row };
        assert_eq!(envelope_gate(&missing), None);
    }

    #[test]
    fn momentum_by_diff_sign() {
        let b = bar(1.1);
        let row = bullish_row(&b);
        assert_eq!(
            momentum_gate(&row, MomentumGate::DiffSign),
            Some(SignalDirection::Bullish)
        );
        let falling = AnnotatedRow {
            oscillator_diff: Some(-0.0002),
            ..row
        };
        assert_eq!(
            momentum_gate(&falling, MomentumGate::DiffSign),
            Some(SignalDirection::Bearish)
        );
        let flat = AnnotatedRow {
            oscillator_diff: Some(0.0),
            ..row
        };
        assert_eq!(momentum_gate(&flat, MomentumGate::DiffSign), None);
    }

    #[test]
    fn momentum_with_level_requires_same_side_of_zero() {
        let b = bar(1.1);
        let row = AnnotatedRow {
            oscillator: Some(-0.0003),
            ..bullish_row(&b)
        };
        assert_eq!(
            momentum_gate(&row, MomentumGate::DiffSign),
            Some(SignalDirection::Bullish)
        );
        assert_eq!(momentum_gate(&row, MomentumGate::DiffAndLevel), None);

        let bearish = AnnotatedRow {
            oscillator_diff: Some(-0.0001),
            ..row
        };
        assert_eq!(
            momentum_gate(&bearish, MomentumGate::DiffAndLevel),
            Some(SignalDirection::Bearish)
        );
    }

    #[test]
    fn breakout_against_aim_box() {
        let above = bar(1.0990);
        assert_eq!(
            breakout_gate(&bullish_row(&above), 0.0),
            Some(SignalDirection::Bullish)
        );
        // buffer not cleared
        assert_eq!(breakout_gate(&bullish_row(&above), 0.002), None);

        let inside = bar(1.0950);
        assert_eq!(breakout_gate(&bullish_row(&inside), 0.0), None);

        let below = bar(1.0890);
        assert_eq!(
            breakout_gate(&bullish_row(&below), 0.0),
            Some(SignalDirection::Bearish)
        );
    }

    #[test]
    fn breakout_through_both_levels_is_ambiguous() {
        let b = bar(1.0950);
        let row = AnnotatedRow {
            aim_high: Some(1.0900),
            aim_low: Some(1.1000),
            ..bullish_row(&b)
        };
        assert_eq!(breakout_gate(&row, 0.0), None);
    }

    #[test]
    fn breakout_with_undefined_resistance() {
        let b = bar(1.0990);
        let row = AnnotatedRow {
            aim_high: None,
            ..bullish_row(&b)
        };
        assert_eq!(breakout_gate(&row, 0.0), None);
    }

    #[test]
    fn all_gates_read_together() {
        let b = bar(1.0990);
        let rule = AlligatorConfirmation::default();
        let gates = rule.read_gates(&bullish_row(&b));
        assert_eq!(gates.agreed(), Some(SignalDirection::Bullish));
        assert_eq!(rule.name(), "alligator_breakout");
    }
}
