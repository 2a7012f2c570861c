//! Content fingerprint of an annotated window.
//!
//! Hashes every timestamp and the raw bit pattern of every column, so two
//! windows share a fingerprint only when they are bit-identical (NaN
//! payloads included). Used for determinism checks and to correlate log
//! lines across a sweep.

use crate::engine::AnnotatedSeries;

/// blake3 hex digest of the window's bars and derived columns.
pub fn series_fingerprint(series: &AnnotatedSeries) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(series.len() as u64).to_le_bytes());

    for bar in series.bars() {
        hasher.update(&bar.timestamp.timestamp_micros().to_le_bytes());
        for v in [bar.open, bar.high, bar.low, bar.close] {
            hasher.update(&v.to_bits().to_le_bytes());
        }
    }

    let columns: [(&str, &[f64]); 7] = [
        ("jaw", series.jaw()),
        ("teeth", series.teeth()),
        ("lips", series.lips()),
        ("oscillator", series.oscillator()),
        ("oscillator_diff", series.oscillator_diff()),
        ("aim_high", series.aim_high()),
        ("aim_low", series.aim_low()),
    ];
    for (name, values) in columns {
        hasher.update(name.as_bytes());
        for v in values {
            hasher.update(&v.to_bits().to_le_bytes());
        }
    }

    let markers: [(&str, &[bool]); 2] = [
        ("fractal_high", series.fractal_high()),
        ("fractal_low", series.fractal_low()),
    ];
    for (name, marks) in markers {
        hasher.update(name.as_bytes());
        let bytes: Vec<u8> = marks.iter().map(|&m| m as u8).collect();
        hasher.update(&bytes);
    }

    hasher.finalize().to_hex().to_string()
}
