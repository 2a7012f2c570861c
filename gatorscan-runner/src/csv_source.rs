//! Offline market data from CSV files.
//!
//! One file per pair, `{dir}/{instrument}_{timeframe}.csv`, with at least the
//! columns `timestamp,open,high,low,close` (RFC 3339 timestamps). Extra
//! columns are ignored, so files written by `CsvRenderer` read back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gatorscan_core::data::{DataError, DataSource, FetchRequest, MarketDataSource};
use gatorscan_core::domain::{Bar, PriceSeries, Timeframe};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvBar {
    timestamp: DateTime<Utc>,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
}

/// Read every complete row of a bar file, oldest first. Rows with an empty
/// OHLC cell are skipped.
pub fn read_bars(path: &Path) -> Result<Vec<Bar>, DataError> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(std::io::BufReader::new(file));
    let mut bars = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in rdr.deserialize::<CsvBar>().enumerate() {
        let row = record.map_err(|e| {
            DataError::Other(format!("{}: row {}: {e}", path.display(), line + 1))
        })?;
        match (row.open, row.high, row.low, row.close) {
            (Some(open), Some(high), Some(low), Some(close)) => {
                bars.push(Bar::new(row.timestamp, open, high, low, close));
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(path = %path.display(), skipped, "skipped incomplete rows");
    }
    Ok(bars)
}

#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, instrument: &str, timeframe: Timeframe) -> PathBuf {
        self.dir.join(format!("{instrument}_{timeframe}.csv"))
    }
}

impl MarketDataSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn kind(&self) -> DataSource {
        DataSource::CsvImport
    }

    fn fetch(&self, request: &FetchRequest) -> Result<PriceSeries, DataError> {
        let path = self.path_for(&request.instrument, request.timeframe);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: format!("{} ({})", request.instrument, path.display()),
            });
        }
        let bars = read_bars(&path)?;
        Ok(PriceSeries::new(bars)?.tail(request.length))
    }

    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }
}
