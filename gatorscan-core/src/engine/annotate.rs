//! Annotation: every derived column computed once over the whole window.
//!
//! Stage order: envelope → fractals → aim box → oscillator. All columns have
//! the same length as the bar window; undefined entries are NaN.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::domain::{Bar, PriceSeries};
use crate::indicators::{
    build_aim_box, compute_envelope, compute_momentum, defined, detect_fractals, MomentumColor,
};

/// A price window with its derived columns.
///
/// Immutable once built: the only transformation is [`AnnotatedSeries::drop_front`],
/// which consumes the series and returns a shorter one.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedSeries {
    bars: Vec<Bar>,
    jaw: Vec<f64>,
    teeth: Vec<f64>,
    lips: Vec<f64>,
    oscillator: Vec<f64>,
    oscillator_diff: Vec<f64>,
    fractal_high: Vec<bool>,
    fractal_low: Vec<bool>,
    aim_high: Vec<f64>,
    aim_low: Vec<f64>,
}

/// One row of an [`AnnotatedSeries`], with undefined values as `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedRow<'a> {
    pub index: usize,
    pub bar: &'a Bar,
    pub jaw: Option<f64>,
    pub teeth: Option<f64>,
    pub lips: Option<f64>,
    pub oscillator: Option<f64>,
    pub oscillator_diff: Option<f64>,
    pub fractal_high: bool,
    pub fractal_low: bool,
    pub aim_high: Option<f64>,
    pub aim_low: Option<f64>,
}

impl AnnotatedRow<'_> {
    /// True when every numeric field is defined.
    pub fn is_complete(&self) -> bool {
        self.jaw.is_some()
            && self.teeth.is_some()
            && self.lips.is_some()
            && self.oscillator.is_some()
            && self.oscillator_diff.is_some()
            && self.aim_high.is_some()
            && self.aim_low.is_some()
    }

    pub fn momentum_color(&self) -> Option<MomentumColor> {
        MomentumColor::classify(self.oscillator?, self.oscillator_diff?)
    }
}

impl AnnotatedSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn jaw(&self) -> &[f64] {
        &self.jaw
    }

    pub fn teeth(&self) -> &[f64] {
        &self.teeth
    }

    pub fn lips(&self) -> &[f64] {
        &self.lips
    }

    pub fn oscillator(&self) -> &[f64] {
        &self.oscillator
    }

    pub fn oscillator_diff(&self) -> &[f64] {
        &self.oscillator_diff
    }

    pub fn fractal_high(&self) -> &[bool] {
        &self.fractal_high
    }

    pub fn fractal_low(&self) -> &[bool] {
        &self.fractal_low
    }

    pub fn aim_high(&self) -> &[f64] {
        &self.aim_high
    }

    pub fn aim_low(&self) -> &[f64] {
        &self.aim_low
    }

    pub fn row(&self, index: usize) -> Option<AnnotatedRow<'_>> {
        let bar = self.bars.get(index)?;
        Some(AnnotatedRow {
            index,
            bar,
            jaw: defined(self.jaw[index]),
            teeth: defined(self.teeth[index]),
            lips: defined(self.lips[index]),
            oscillator: defined(self.oscillator[index]),
            oscillator_diff: defined(self.oscillator_diff[index]),
            fractal_high: self.fractal_high[index],
            fractal_low: self.fractal_low[index],
            aim_high: defined(self.aim_high[index]),
            aim_low: defined(self.aim_low[index]),
        })
    }

    pub fn last_row(&self) -> Option<AnnotatedRow<'_>> {
        self.len().checked_sub(1).and_then(|i| self.row(i))
    }

    pub fn rows(&self) -> impl Iterator<Item = AnnotatedRow<'_>> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }

    /// Remove the first `n` rows from every column; the remaining rows are
    /// re-indexed from zero.
    pub fn drop_front(mut self, n: usize) -> Self {
        let n = n.min(self.len());
        self.bars.drain(..n);
        for col in [
            &mut self.jaw,
            &mut self.teeth,
            &mut self.lips,
            &mut self.oscillator,
            &mut self.oscillator_diff,
            &mut self.aim_high,
            &mut self.aim_low,
        ] {
            col.drain(..n);
        }
        self.fractal_high.drain(..n);
        self.fractal_low.drain(..n);
        self
    }
}

/// Compute every derived column for a validated price window.
pub fn annotate(series: &PriceSeries, config: &EngineConfig) -> AnnotatedSeries {
    let bars = series.bars();
    let envelope = compute_envelope(bars, &config.envelope);
    let fractals = detect_fractals(bars, config.fractal.width);
    let aim = build_aim_box(bars, &fractals);
    let momentum = compute_momentum(bars, &config.oscillator);

    AnnotatedSeries {
        bars: bars.to_vec(),
        jaw: envelope.jaw,
        teeth: envelope.teeth,
        lips: envelope.lips,
        oscillator: momentum.oscillator,
        oscillator_diff: momentum.diff,
        fractal_high: fractals.high,
        fractal_low: fractals.low,
        aim_high: aim.high,
        aim_low: aim.low,
    }
}
