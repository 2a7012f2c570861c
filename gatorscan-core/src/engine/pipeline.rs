//! Engine entry point: validated bars in, trimmed annotated window and
//! decision out.
//!
//! validate config → check window → annotate → trim warm-up → confirm.
//! Pure and synchronous; safe to call from any number of threads at once.

use tracing::debug;

use super::annotate::{annotate, AnnotatedSeries};
use super::warmup::{ensure_window, trim_warmup};
use crate::components::signal::{SignalConfirmation, SignalDecision};
use crate::config::EngineConfig;
use crate::domain::PriceSeries;
use crate::error::EngineError;
use crate::signals::AlligatorConfirmation;

/// Result of one engine invocation.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// Trimmed window, row 0 is the first bar after warm-up.
    pub series: AnnotatedSeries,
    pub decision: SignalDecision,
    /// Rows dropped from the front of the input.
    pub warmup: usize,
}

/// Run the engine with the alligator breakout rule configured in `config.rule`.
pub fn run(series: &PriceSeries, config: &EngineConfig) -> Result<EngineOutput, EngineError> {
    let rule = AlligatorConfirmation::new(config.rule);
    run_with_rule(series, config, &rule)
}

/// Run the engine with a caller-supplied confirmation rule.
pub fn run_with_rule(
    series: &PriceSeries,
    config: &EngineConfig,
    rule: &dyn SignalConfirmation,
) -> Result<EngineOutput, EngineError> {
    config.validate()?;
    let warmup = config.effective_warmup();
    ensure_window(series.len(), warmup)?;

    let annotated = annotate(series, config);
    let trimmed = trim_warmup(annotated, warmup)?;
    let decision = rule.confirm(&trimmed);

    debug!(
        rule = rule.name(),
        bars = series.len(),
        warmup,
        active = decision.active,
        description = %decision.description,
        "engine run complete"
    );

    Ok(EngineOutput {
        series: trimmed,
        decision,
        warmup,
    })
}
