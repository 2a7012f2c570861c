//! The scan sweep: every (timeframe, instrument) pair through
//! fetch → engine → render → notify, in parallel with rayon.
//!
//! Pairs are independent. One pair failing (data, engine, render or notify)
//! is recorded in its outcome and never stops the others.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use gatorscan_core::data::{DataError, DataSource, FetchRequest, MarketDataSource};
use gatorscan_core::domain::Timeframe;
use gatorscan_core::engine::{run, EngineOutput};
use gatorscan_core::error::EngineError;
use gatorscan_core::fingerprint::series_fingerprint;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::notify::{Alert, NotifyError, Notifier};
use crate::render::{RenderError, RenderRequest, SignalRenderer};

/// Why a single pair failed.
#[derive(Debug, Error)]
pub enum PairError {
    #[error("data: {0}")]
    Data(#[from] DataError),
    #[error("engine: {0}")]
    Engine(#[from] EngineError),
    #[error("render: {0}")]
    Render(#[from] RenderError),
    #[error("notify: {0}")]
    Notify(#[from] NotifyError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairStatus {
    Signal {
        description: String,
        artifact: PathBuf,
    },
    NoSignal,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PairOutcome {
    pub instrument: String,
    pub timeframe: Timeframe,
    pub status: PairStatus,
    /// Fingerprint of the trimmed window, when the engine ran.
    pub fingerprint: Option<String>,
    pub elapsed: Duration,
}

impl PairOutcome {
    pub fn is_signal(&self) -> bool {
        matches!(self.status, PairStatus::Signal { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, PairStatus::Failed { .. })
    }
}

/// Outcomes in (timeframe, instrument) order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Kind of source every pair was fetched from.
    pub source: DataSource,
    pub outcomes: Vec<PairOutcome>,
    pub elapsed: Duration,
}

impl SweepReport {
    pub fn signals(&self) -> impl Iterator<Item = &PairOutcome> {
        self.outcomes.iter().filter(|o| o.is_signal())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PairOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    pub fn signal_count(&self) -> usize {
        self.signals().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Collaborators one sweep talks to.
pub struct SweepContext<'a> {
    pub config: &'a ScanConfig,
    pub source: &'a dyn MarketDataSource,
    pub renderer: &'a dyn SignalRenderer,
    pub notifier: &'a dyn Notifier,
}

/// Scan one pair end to end. Returns the engine output (when it ran) and the
/// artifact path plus description (when the signal fired).
fn scan_pair_inner(
    ctx: &SweepContext<'_>,
    instrument: &str,
    timeframe: Timeframe,
    fingerprint: &mut Option<String>,
) -> Result<Option<(String, PathBuf)>, PairError> {
    let request = FetchRequest::new(instrument, timeframe, ctx.config.history_length);
    let series = ctx.source.fetch(&request)?;
    let EngineOutput { series, decision, .. } = run(&series, &ctx.config.engine)?;
    *fingerprint = Some(series_fingerprint(&series));

    let Some(alert) = Alert::from_decision(instrument, timeframe, &decision) else {
        return Ok(None);
    };

    let artifact = ctx.renderer.render(&RenderRequest {
        instrument,
        timeframe,
        series: &series,
        decision: &decision,
    })?;
    ctx.notifier.send(&alert)?;
    Ok(Some((alert.description, artifact)))
}

pub fn scan_pair(ctx: &SweepContext<'_>, instrument: &str, timeframe: Timeframe) -> PairOutcome {
    let start = Instant::now();
    let mut fingerprint = None;
    let result = scan_pair_inner(ctx, instrument, timeframe, &mut fingerprint);
    let elapsed = start.elapsed();

    let status = match result {
        Ok(Some((description, artifact))) => {
            info!(%instrument, %timeframe, %description, artifact = %artifact.display(), "signal");
            PairStatus::Signal {
                description,
                artifact,
            }
        }
        Ok(None) => {
            debug!(%instrument, %timeframe, "no signal");
            PairStatus::NoSignal
        }
        Err(e) => {
            warn!(%instrument, %timeframe, error = %e, "pair failed");
            PairStatus::Failed {
                reason: e.to_string(),
            }
        }
    };

    PairOutcome {
        instrument: instrument.to_string(),
        timeframe,
        status,
        fingerprint,
        elapsed,
    }
}

/// Sweep `timeframes` × `config.instruments` in parallel.
pub fn run_sweep(ctx: &SweepContext<'_>, timeframes: &[Timeframe]) -> SweepReport {
    let start = Instant::now();
    let pairs: Vec<(Timeframe, &str)> = timeframes
        .iter()
        .flat_map(|&tf| ctx.config.instruments.iter().map(move |i| (tf, i.as_str())))
        .collect();

    if !ctx.source.is_available() {
        warn!(source = ctx.source.name(), "data source reports unavailable");
    }

    let outcomes: Vec<PairOutcome> = pairs
        .par_iter()
        .map(|&(tf, instrument)| scan_pair(ctx, instrument, tf))
        .collect();

    let report = SweepReport {
        source: ctx.source.kind(),
        outcomes,
        elapsed: start.elapsed(),
    };
    info!(
        source = ?report.source,
        pairs = report.outcomes.len(),
        signals = report.signal_count(),
        failures = report.failure_count(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "sweep complete"
    );
    report
}
