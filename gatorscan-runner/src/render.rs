//! Rendering of a fired signal's annotated window.
//!
//! `CsvRenderer` writes one row per bar with every derived column and the
//! oscillator histogram shade, ready for an external charting tool.

use std::io::Write;
use std::path::PathBuf;

use gatorscan_core::components::signal::SignalDecision;
use gatorscan_core::domain::Timeframe;
use gatorscan_core::engine::AnnotatedSeries;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Everything a renderer needs for one (instrument, timeframe) pair.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub instrument: &'a str,
    pub timeframe: Timeframe,
    pub series: &'a AnnotatedSeries,
    pub decision: &'a SignalDecision,
}

pub trait SignalRenderer: Send + Sync {
    fn name(&self) -> &str;

    /// Render and return the path of the written artifact.
    fn render(&self, request: &RenderRequest<'_>) -> Result<PathBuf, RenderError>;
}

const HEADER: [&str; 15] = [
    "timestamp",
    "open",
    "high",
    "low",
    "close",
    "jaw",
    "teeth",
    "lips",
    "oscillator",
    "oscillator_diff",
    "momentum_color",
    "fractal_high",
    "fractal_low",
    "aim_high",
    "aim_low",
];

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write the annotated window as CSV. Undefined values are empty cells.
pub fn write_annotated_csv<W: Write>(writer: W, series: &AnnotatedSeries) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for row in series.rows() {
        let bar = row.bar;
        wtr.write_record([
            bar.timestamp.to_rfc3339(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            cell(row.jaw),
            cell(row.teeth),
            cell(row.lips),
            cell(row.oscillator),
            cell(row.oscillator_diff),
            row.momentum_color()
                .map(|c| c.css_name().to_string())
                .unwrap_or_default(),
            row.fractal_high.to_string(),
            row.fractal_low.to_string(),
            cell(row.aim_high),
            cell(row.aim_low),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `{output_dir}/{instrument}_{timeframe}.csv`, replacing any earlier file.
#[derive(Debug, Clone)]
pub struct CsvRenderer {
    output_dir: PathBuf,
}

impl CsvRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, instrument: &str, timeframe: Timeframe) -> PathBuf {
        self.output_dir.join(format!("{instrument}_{timeframe}.csv"))
    }
}

impl SignalRenderer for CsvRenderer {
    fn name(&self) -> &str {
        "csv"
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<PathBuf, RenderError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| RenderError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.path_for(request.instrument, request.timeframe);
        let file = std::fs::File::create(&path).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        write_annotated_csv(std::io::BufWriter::new(file), request.series)?;
        debug!(path = %path.display(), rows = request.series.len(), "rendered");
        Ok(path)
    }
}
