//! Domain types for GatorScan

pub mod bar;
pub mod series;
pub mod timeframe;

pub use bar::Bar;
pub use series::PriceSeries;
pub use timeframe::{TimeUnit, Timeframe, TimeframeError};
