//! Signal confirmation: reads an annotated window, decides whether a signal
//! is active on its latest bar.
//!
//! Confirmation is stateless: one call, one decision. "Already fired" style
//! memory belongs to the caller's scheduler, never to an implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::AnnotatedSeries;

/// Direction a gate (or the whole rule) points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Bullish,
    Bearish,
}

impl SignalDirection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What each gate of the rule read on the latest bar. `None` means the gate
/// did not point anywhere (flat, mixed, or undefined inputs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateReadout {
    pub envelope: Option<SignalDirection>,
    pub momentum: Option<SignalDirection>,
    pub breakout: Option<SignalDirection>,
}

impl GateReadout {
    /// The shared direction when every gate agrees.
    pub fn agreed(&self) -> Option<SignalDirection> {
        match (self.envelope, self.momentum, self.breakout) {
            (Some(a), Some(b), Some(c)) if a == b && b == c => Some(a),
            _ => None,
        }
    }
}

/// Outcome of one confirmation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub active: bool,
    /// Human-readable situation ("bullish breakout"); empty when inactive.
    pub description: String,
    pub direction: Option<SignalDirection>,
    pub gates: GateReadout,
    /// Timestamp of the bar the rule was evaluated on.
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl SignalDecision {
    pub fn inactive(gates: GateReadout, evaluated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            active: false,
            description: String::new(),
            direction: None,
            gates,
            evaluated_at,
        }
    }

    pub fn fired(
        direction: SignalDirection,
        gates: GateReadout,
        evaluated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            active: true,
            description: format!("{direction} breakout"),
            direction: Some(direction),
            gates,
            evaluated_at,
        }
    }

    /// `(active, description)` pair handed to notification collaborators.
    pub fn as_pair(&self) -> (bool, &str) {
        (self.active, &self.description)
    }
}

/// Trait for confirmation rules.
pub trait SignalConfirmation: Send + Sync {
    /// Human-readable name (e.g., "alligator_breakout").
    fn name(&self) -> &str;

    /// Evaluate the rule on the latest bar of a trimmed series. Never fails:
    /// anything short of a confirmed signal is `active = false`.
    fn confirm(&self, series: &AnnotatedSeries) -> SignalDecision;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gates_agree_only_when_all_match() {
        let all_bull = GateReadout {
            envelope: Some(SignalDirection::Bullish),
            momentum: Some(SignalDirection::Bullish),
            breakout: Some(SignalDirection::Bullish),
        };
        assert_eq!(all_bull.agreed(), Some(SignalDirection::Bullish));

        let mixed = GateReadout {
            breakout: Some(SignalDirection::Bearish),
            ..all_bull
        };
        assert_eq!(mixed.agreed(), None);

        let missing = GateReadout {
            momentum: None,
            ..all_bull
        };
        assert_eq!(missing.agreed(), None);
        assert_eq!(GateReadout::default().agreed(), None);
    }

    #[test]
    fn fired_decision_describes_direction() {
        let d = SignalDecision::fired(SignalDirection::Bearish, GateReadout::default(), None);
        assert_eq!(d.as_pair(), (true, "bearish breakout"));
        assert_eq!(d.direction, Some(SignalDirection::Bearish));
    }

    #[test]
    fn inactive_decision_has_empty_description() {
        let d = SignalDecision::inactive(GateReadout::default(), None);
        assert_eq!(d.as_pair(), (false, ""));
    }

    #[test]
    fn decision_serialization_roundtrip() {
        let d = SignalDecision::fired(SignalDirection::Bullish, GateReadout::default(), None);
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"bullish\""));
        let back: SignalDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
