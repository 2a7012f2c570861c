//! Component traits: indicators produce columns, confirmation rules read them.

pub mod indicator;
pub mod signal;

pub use indicator::Indicator;
pub use signal::{GateReadout, SignalConfirmation, SignalDecision, SignalDirection};
