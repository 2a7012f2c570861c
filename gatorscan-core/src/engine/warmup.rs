//! Warm-up trimming: drop the leading rows whose indicators are undefined or
//! still settling, and re-index what is left.

use super::annotate::AnnotatedSeries;
use crate::error::EngineError;

/// Check that a window of `len` bars leaves at least one row after dropping
/// `warmup` rows.
pub fn ensure_window(len: usize, warmup: usize) -> Result<(), EngineError> {
    if len <= warmup {
        return Err(EngineError::InsufficientData {
            required: warmup + 1,
            actual: len,
        });
    }
    Ok(())
}

/// Drop the first `warmup` rows. Fails rather than return an empty series.
pub fn trim_warmup(series: AnnotatedSeries, warmup: usize) -> Result<AnnotatedSeries, EngineError> {
    ensure_window(series.len(), warmup)?;
    Ok(series.drop_front(warmup))
}
