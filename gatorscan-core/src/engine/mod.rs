//! Signal engine: annotate a price window, trim its warm-up, confirm.

pub mod annotate;
pub mod pipeline;
pub mod warmup;

pub use annotate::{annotate, AnnotatedRow, AnnotatedSeries};
pub use pipeline::{run, run_with_rule, EngineOutput};
pub use warmup::{ensure_window, trim_warmup};
