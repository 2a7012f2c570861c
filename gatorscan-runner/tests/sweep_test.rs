//! Sweep integration tests with mock collaborators.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Duration, TimeZone, Utc};
use gatorscan_core::data::{DataError, DataSource, FetchRequest, MarketDataSource};
use gatorscan_core::domain::{Bar, PriceSeries, Timeframe};
use gatorscan_runner::{
    run_sweep, Alert, CsvRenderer, CsvSource, NotifyError, Notifier, PairStatus, ScanConfig,
    SweepContext,
};

// ── Mocks ────────────────────────────────────────────────────────────

/// Steady climb with a swing low at bar 70 and a swing high at bar 90,
/// then an accelerating breakout through the swing high on the last bar.
fn breakout_bars() -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    (0..120)
        .map(|i| {
            let mid = if i <= 110 {
                100.0 + 0.1 * i as f64
            } else {
                111.0 + 0.3 * (i - 110) as f64
            };
            let mut high = mid + 1.0;
            let mut low = mid - 1.0;
            if i == 90 {
                high += 0.5;
            }
            if i == 70 {
                low -= 0.5;
            }
            let close = (high + low) / 2.0;
            Bar::new(start + Duration::minutes(5 * i as i64), close, high, low, close)
        })
        .collect()
}

fn flat_bars() -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    (0..120)
        .map(|i| Bar::new(start + Duration::minutes(5 * i), 1.25, 2.25, 0.25, 1.25))
        .collect()
}

/// EURUSD breaks out, GBPUSD is flat, everything else fails to fetch.
struct MockSource;

impl MarketDataSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn kind(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(&self, request: &FetchRequest) -> Result<PriceSeries, DataError> {
        let bars = match request.instrument.as_str() {
            "EURUSD" => breakout_bars(),
            "GBPUSD" => flat_bars(),
            other => {
                return Err(DataError::SymbolNotFound {
                    symbol: other.to_string(),
                })
            }
        };
        Ok(PriceSeries::new(bars)?.tail(request.length))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Alert>>,
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn send(&self, _alert: &Alert) -> Result<(), NotifyError> {
        Err(NotifyError::Rejected("chat not found".into()))
    }
}

fn config(instruments: &[&str], output_dir: PathBuf) -> ScanConfig {
    ScanConfig {
        instruments: instruments.iter().map(|s| s.to_string()).collect(),
        timeframes: vec![tf("5m")],
        output_dir,
        ..ScanConfig::default()
    }
}

fn tf(label: &str) -> Timeframe {
    label.parse().unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────

#[test]
fn sweep_isolates_pairs_and_reports_each() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&["EURUSD", "GBPUSD", "XXXYYY"], dir.path().to_path_buf());
    let renderer = CsvRenderer::new(&cfg.output_dir);
    let notifier = RecordingNotifier::default();
    let ctx = SweepContext {
        config: &cfg,
        source: &MockSource,
        renderer: &renderer,
        notifier: &notifier,
    };

    let report = run_sweep(&ctx, &cfg.timeframes);

    assert_eq!(report.source, DataSource::Synthetic);
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.signal_count(), 1);
    assert_eq!(report.failure_count(), 1);

    let eur = &report.outcomes[0];
    assert_eq!(eur.instrument, "EURUSD");
    match &eur.status {
        PairStatus::Signal {
            description,
            artifact,
        } => {
            assert_eq!(description, "bullish breakout");
            assert_eq!(artifact, &dir.path().join("EURUSD_5m.csv"));
            assert!(artifact.exists());
        }
        other => panic!("expected signal, got {other:?}"),
    }
    assert!(eur.fingerprint.is_some());

    assert_eq!(report.outcomes[1].status, PairStatus::NoSignal);
    assert!(matches!(report.outcomes[2].status, PairStatus::Failed { .. }));
    assert!(report.outcomes[2].fingerprint.is_none());

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].message(),
        "bullish breakout in 5m timeframe, in EURUSD currency"
    );
}

#[test]
fn outcomes_follow_timeframe_then_instrument_order() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&["GBPUSD", "EURUSD"], dir.path().to_path_buf());
    let renderer = CsvRenderer::new(&cfg.output_dir);
    let notifier = RecordingNotifier::default();
    let ctx = SweepContext {
        config: &cfg,
        source: &MockSource,
        renderer: &renderer,
        notifier: &notifier,
    };

    let report = run_sweep(&ctx, &[tf("1h"), tf("5m")]);
    let order: Vec<(String, String)> = report
        .outcomes
        .iter()
        .map(|o| (o.timeframe.to_string(), o.instrument.clone()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("1h".to_string(), "GBPUSD".to_string()),
            ("1h".to_string(), "EURUSD".to_string()),
            ("5m".to_string(), "GBPUSD".to_string()),
            ("5m".to_string(), "EURUSD".to_string()),
        ]
    );
    assert_eq!(notifier.sent.lock().unwrap().len(), 2);
}

#[test]
fn notify_failure_marks_pair_failed() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&["EURUSD", "GBPUSD"], dir.path().to_path_buf());
    let renderer = CsvRenderer::new(&cfg.output_dir);
    let ctx = SweepContext {
        config: &cfg,
        source: &MockSource,
        renderer: &renderer,
        notifier: &FailingNotifier,
    };

    let report = run_sweep(&ctx, &cfg.timeframes);
    match &report.outcomes[0].status {
        PairStatus::Failed { reason } => assert!(reason.contains("chat not found")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(report.outcomes[1].status, PairStatus::NoSignal);
}

#[test]
fn short_history_fails_every_pair_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(&["EURUSD", "GBPUSD"], dir.path().to_path_buf());
    cfg.history_length = 40;
    let renderer = CsvRenderer::new(&cfg.output_dir);
    let notifier = RecordingNotifier::default();
    let ctx = SweepContext {
        config: &cfg,
        source: &MockSource,
        renderer: &renderer,
        notifier: &notifier,
    };

    let report = run_sweep(&ctx, &cfg.timeframes);
    assert_eq!(report.failure_count(), 2);
    for outcome in report.failures() {
        match &outcome.status {
            PairStatus::Failed { reason } => assert!(reason.contains("insufficient data")),
            _ => unreachable!(),
        }
    }
}

#[test]
fn rendered_csv_reads_back_as_offline_data() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&["EURUSD"], dir.path().to_path_buf());
    let renderer = CsvRenderer::new(&cfg.output_dir);
    let notifier = RecordingNotifier::default();
    let ctx = SweepContext {
        config: &cfg,
        source: &MockSource,
        renderer: &renderer,
        notifier: &notifier,
    };
    run_sweep(&ctx, &cfg.timeframes);

    // the rendered window is the trimmed one: 120 - 50 rows
    let offline = CsvSource::new(dir.path());
    let series = offline
        .fetch(&FetchRequest::new("EURUSD", tf("5m"), 150))
        .unwrap();
    assert_eq!(series.len(), 70);
    assert_eq!(series.last(), breakout_bars().last());
}
