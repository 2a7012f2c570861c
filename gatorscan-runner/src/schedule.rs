//! Wall-clock schedule for the watch loop.
//!
//! The loop wakes at second 0 of every UTC minute and sweeps the timeframes
//! whose bar just closed:
//! - `Nm`: minute divisible by N
//! - `Nh`: on the hour, hour divisible by N
//! - `Nd`: at midnight, day of month divisible by N
//!
//! Weekly timeframes are never due; they are only scanned on demand.

use chrono::{DateTime, Datelike, DurationRound, Timelike, Utc};
use gatorscan_core::domain::{TimeUnit, Timeframe};

pub fn is_due(timeframe: Timeframe, now: DateTime<Utc>) -> bool {
    let n = timeframe.count();
    match timeframe.unit() {
        TimeUnit::Minute => now.minute() % n == 0,
        TimeUnit::Hour => now.minute() == 0 && now.hour() % n == 0,
        TimeUnit::Day => now.minute() == 0 && now.hour() == 0 && now.day() % n == 0,
        TimeUnit::Week => false,
    }
}

/// Timeframes from `configured` that are due at `now`, in configured order.
pub fn due_timeframes(configured: &[Timeframe], now: DateTime<Utc>) -> Vec<Timeframe> {
    configured
        .iter()
        .copied()
        .filter(|tf| is_due(*tf, now))
        .collect()
}

/// Start of the next UTC minute strictly after `now`.
pub fn next_minute(now: DateTime<Utc>) -> DateTime<Utc> {
    let minute = chrono::Duration::minutes(1);
    now.duration_trunc(minute).unwrap_or(now) + minute
}

/// Time left until [`next_minute`].
pub fn until_next_minute(now: DateTime<Utc>) -> std::time::Duration {
    (next_minute(now) - now)
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}
