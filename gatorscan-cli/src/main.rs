//! GatorScan CLI: scan, watch and annotate commands.
//!
//! Commands:
//! - `scan`: sweep every configured (timeframe, instrument) pair once
//! - `watch`: sweep the timeframes whose bar just closed, every minute
//! - `annotate`: run the engine over one CSV file and write the annotated window

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use gatorscan_core::config::EngineConfig;
use gatorscan_core::data::{CircuitBreaker, MarketDataSource, SyntheticSource, YahooProvider};
use gatorscan_core::domain::{PriceSeries, TimeUnit, Timeframe};
use gatorscan_core::engine::run;
use gatorscan_runner::csv_source::read_bars;
use gatorscan_runner::render::write_annotated_csv;
use gatorscan_runner::{
    due_timeframes, next_minute, run_sweep, until_next_minute, CsvRenderer, CsvSource, LogNotifier, Notifier,
    PairStatus, ScanConfig, SweepContext, SweepReport, TelegramNotifier,
};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "gatorscan",
    about = "GatorScan CLI: alligator breakout scanner for currency pairs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep all configured pairs once and exit.
    Scan {
        /// Path to a TOML scan config. Environment variables override it.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only these timeframes (e.g. 5m, 1h). Repeatable. Defaults to the configured list.
        #[arg(long = "timeframe")]
        timeframes: Vec<String>,

        /// Read bars from `{DIR}/{instrument}_{timeframe}.csv` instead of Yahoo Finance.
        #[arg(long, value_name = "DIR")]
        offline: Option<PathBuf>,

        /// Use a seeded random walk instead of real data.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Run forever, sweeping each timeframe when its bar closes.
    Watch {
        /// Path to a TOML scan config. Environment variables override it.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run the engine over one CSV file of bars.
    Annotate {
        /// Input CSV with timestamp,open,high,low,close columns.
        #[arg(long)]
        csv: PathBuf,

        /// Output path. Defaults to `<input>_annotated.csv`.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Engine parameters as TOML. Defaults to the standard alligator settings.
        #[arg(long)]
        engine: Option<PathBuf>,
    },
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            config,
            timeframes,
            offline,
            synthetic,
        } => run_scan(config.as_deref(), &timeframes, offline, synthetic),
        Commands::Watch { config } => run_watch(config.as_deref()),
        Commands::Annotate { csv, out, engine } => run_annotate(&csv, out, engine.as_deref()),
    }
}

fn build_source(offline: Option<PathBuf>, synthetic: bool) -> Result<Box<dyn MarketDataSource>> {
    match (offline, synthetic) {
        (Some(_), true) => bail!("--offline and --synthetic are mutually exclusive"),
        (Some(dir), false) => {
            if !dir.is_dir() {
                bail!("offline data directory {} does not exist", dir.display());
            }
            Ok(Box::new(CsvSource::new(dir)))
        }
        (None, true) => Ok(Box::new(SyntheticSource::new(Utc::now()))),
        (None, false) => {
            let breaker = Arc::new(CircuitBreaker::default_provider());
            Ok(Box::new(YahooProvider::new(breaker)?))
        }
    }
}

fn build_notifier(config: &ScanConfig) -> Result<Box<dyn Notifier>> {
    match &config.telegram {
        Some(tg) => Ok(Box::new(TelegramNotifier::new(tg.clone())?)),
        None => {
            info!("no Telegram credentials configured; alerts go to the log");
            Ok(Box::new(LogNotifier))
        }
    }
}

fn run_scan(
    config_path: Option<&Path>,
    timeframes: &[String],
    offline: Option<PathBuf>,
    synthetic: bool,
) -> Result<()> {
    let config = ScanConfig::load(config_path)?;
    let timeframes: Vec<Timeframe> = if timeframes.is_empty() {
        config.timeframes.clone()
    } else {
        timeframes
            .iter()
            .map(|s| s.parse::<Timeframe>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid --timeframe")?
    };

    let source = build_source(offline, synthetic)?;
    let renderer = CsvRenderer::new(&config.output_dir);
    let notifier = build_notifier(&config)?;
    let ctx = SweepContext {
        config: &config,
        source: source.as_ref(),
        renderer: &renderer,
        notifier: notifier.as_ref(),
    };

    let report = run_sweep(&ctx, &timeframes);
    print_report(&report);
    Ok(())
}

fn run_watch(config_path: Option<&Path>) -> Result<()> {
    let config = ScanConfig::load(config_path)?;
    for tf in config.timeframes.iter().filter(|tf| tf.unit() == TimeUnit::Week) {
        warn!(timeframe = %tf, "weekly timeframes are never scheduled by watch");
    }

    let source = build_source(None, false)?;
    let renderer = CsvRenderer::new(&config.output_dir);
    let notifier = build_notifier(&config)?;
    let ctx = SweepContext {
        config: &config,
        source: source.as_ref(),
        renderer: &renderer,
        notifier: notifier.as_ref(),
    };

    info!(
        instruments = config.instruments.len(),
        timeframes = config.timeframes.len(),
        "watching"
    );
    loop {
        let now = Utc::now();
        let tick = next_minute(now);
        std::thread::sleep(until_next_minute(now));

        let due = due_timeframes(&config.timeframes, tick);
        if due.is_empty() {
            continue;
        }
        let labels: Vec<String> = due.iter().map(ToString::to_string).collect();
        info!(at = %tick, timeframes = ?labels, "sweep due");

        let report = run_sweep(&ctx, &due);
        if report.failure_count() > 0 {
            warn!(
                failures = report.failure_count(),
                pairs = report.outcomes.len(),
                "sweep finished with failures"
            );
        }
    }
}

fn run_annotate(csv: &Path, out: Option<PathBuf>, engine_path: Option<&Path>) -> Result<()> {
    let engine = match engine_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            EngineConfig::from_toml(&content)?
        }
        None => EngineConfig::default(),
    };

    let bars = read_bars(csv)?;
    let series = PriceSeries::new(bars)?;
    let output = run(&series, &engine)?;

    let out = out.unwrap_or_else(|| default_annotated_path(csv));
    let file = std::fs::File::create(&out)
        .with_context(|| format!("failed to create {}", out.display()))?;
    write_annotated_csv(std::io::BufWriter::new(file), &output.series)?;

    let decision = &output.decision;
    if decision.active {
        println!("SIGNAL: {}", decision.description);
    } else {
        println!("no signal");
    }
    println!(
        "  envelope={:?} momentum={:?} breakout={:?}",
        decision.gates.envelope, decision.gates.momentum, decision.gates.breakout
    );
    if let Some(ts) = decision.evaluated_at {
        println!("  evaluated at {ts}");
    }
    println!("Annotated {} rows → {}", output.series.len(), out.display());
    Ok(())
}

fn default_annotated_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bars".to_string());
    input.with_file_name(format!("{stem}_annotated.csv"))
}

fn print_report(report: &SweepReport) {
    println!();
    println!("=== Scan Summary ({:?}) ===", report.source);
    for outcome in &report.outcomes {
        let status = match &outcome.status {
            PairStatus::Signal { description, artifact } => {
                format!("SIGNAL  {description} ({})", artifact.display())
            }
            PairStatus::NoSignal => "-".to_string(),
            PairStatus::Failed { reason } => format!("FAILED  {reason}"),
        };
        println!("{:<10} {:<5} {status}", outcome.instrument, outcome.timeframe.to_string());
    }
    println!(
        "{} pairs, {} signals, {} failures in {:.2}s",
        report.outcomes.len(),
        report.signal_count(),
        report.failure_count(),
        report.elapsed.as_secs_f64()
    );
}
