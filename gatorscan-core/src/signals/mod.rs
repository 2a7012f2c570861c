//! Confirmation rules.
//!
//! Rules read only the annotated window they are given. They keep no memory
//! between calls and must give the same decision for the same window.

pub mod confirm;

pub use confirm::{breakout_gate, envelope_gate, momentum_gate, AlligatorConfirmation};
