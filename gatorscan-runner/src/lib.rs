//! GatorScan Runner: scan orchestration around the signal engine.
//!
//! This crate builds on `gatorscan-core` to provide:
//! - Scan configuration (TOML file plus environment overlay)
//! - The wall-clock schedule for the watch loop
//! - Offline CSV market data
//! - Parallel (timeframe, instrument) sweeps with per-pair isolation
//! - CSV rendering of fired signals
//! - Alert delivery (Telegram, log)

pub mod config;
pub mod csv_source;
pub mod notify;
pub mod render;
pub mod schedule;
pub mod sweep;

pub use config::{ScanConfig, ScanConfigError, TelegramConfig};
pub use csv_source::CsvSource;
pub use notify::{Alert, LogNotifier, NotifyError, Notifier, TelegramNotifier};
pub use render::{CsvRenderer, RenderError, RenderRequest, SignalRenderer};
pub use schedule::{due_timeframes, is_due, next_minute, until_next_minute};
pub use sweep::{run_sweep, scan_pair, PairError, PairOutcome, PairStatus, SweepContext, SweepReport};
