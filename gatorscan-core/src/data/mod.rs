//! Market data: source trait, Yahoo Finance, synthetic bars, circuit breaker.

pub mod circuit_breaker;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use provider::{DataError, DataSource, FetchRequest, MarketDataSource};
pub use synthetic::SyntheticSource;
pub use yahoo::YahooProvider;
