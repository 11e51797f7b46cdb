//! Chart generation models

use chrono::{DateTime, TimeZone, Utc};

/// Maximum number of points a display series carries
pub const DISPLAY_POINTS: usize = 10;

/// A single `(timestamp, price)` observation. Raw, hourly and display samples
/// all share this shape; the sampler stage that produced a `Vec` decides which
/// one it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self { timestamp_ms, price }
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_ms).single()
    }
}

/// A sampled series ready for display, plus how much of the source survived
/// each stage
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySeries {
    pub label: String,
    pub points: Vec<PricePoint>,
    pub raw_len: usize,
    pub hourly_len: usize,
}

impl DisplaySeries {
    /// True when fewer than the full display count of points were available
    pub fn is_short(&self) -> bool {
        self.points.len() < DISPLAY_POINTS
    }
}

/// Multi-series chart: shared x labels plus one series per coin
#[derive(Debug, Clone)]
pub struct PriceChart {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<DisplaySeries>,
}
