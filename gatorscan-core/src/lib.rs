//! GatorScan Core: alligator indicator and signal-confirmation engine.
//!
//! This crate contains everything that turns a window of OHLC bars into a
//! trading decision:
//! - Domain types (bars, validated price series, timeframes)
//! - Indicators: envelope jaw/teeth/lips, fractals, aim box, awesome oscillator
//! - Annotation and warm-up trimming
//! - The signal-confirmation rule
//! - Market data sources (Yahoo Finance, synthetic)
//!
//! The engine itself is pure and synchronous; see [`engine::run`].

pub mod components;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod signals;

pub use config::EngineConfig;
pub use domain::{Bar, PriceSeries, Timeframe};
pub use engine::{run, AnnotatedSeries, EngineOutput};
pub use error::{EngineError, MalformedInput};
