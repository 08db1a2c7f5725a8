//! Price history domain — chart samples, series, nearest-point lookup.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::{AssetId, Interval};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use state::{ChartPhase, ChartState, HistoryRequest};

/// A single (timestamp, price) sample on a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub time: DateTime<Utc>,
    pub price: f64,
}

/// A chronologically ordered series, scoped to one asset and one interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub asset_id: AssetId,
    pub interval: Interval,
    pub points: Vec<HistoricalPoint>,
}

impl PriceSeries {
    pub fn new(asset_id: AssetId, interval: Interval, points: Vec<HistoricalPoint>) -> Self {
        Self {
            asset_id,
            interval,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        SeriesSummary::from_points(&self.points)
    }
}

/// Axis bounds and overall move of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub min_price: f64,
    pub max_price: f64,
    pub first_price: f64,
    pub last_price: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SeriesSummary {
    pub fn from_points(points: &[HistoricalPoint]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;
        let (min_price, max_price) = points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), p| (lo.min(p.price), hi.max(p.price)),
        );
        Some(Self {
            min_price,
            max_price,
            first_price: first.price,
            last_price: last.price,
            start: first.time,
            end: last.time,
        })
    }

    /// Percent move from the first to the last sample; 0 when the series starts at 0.
    pub fn change_percent(&self) -> f64 {
        if self.first_price == 0.0 {
            return 0.0;
        }
        (self.last_price - self.first_price) / self.first_price * 100.0
    }
}

/// Index of the point closest in time to `at`.
///
/// Linear scan with a strict `<`, so on a tie the earlier point wins.
pub fn nearest_point(points: &[HistoricalPoint], at: DateTime<Utc>) -> Option<usize> {
    let mut best: Option<(usize, TimeDelta)> = None;
    for (i, point) in points.iter().enumerate() {
        let distance = (point.time - at).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    InvalidTimestamp(f64),
    NonFinitePrice { timestamp_ms: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidTimestamp(ms) => write!(f, "Invalid timestamp: {}", ms),
            ValidationError::NonFinitePrice { timestamp_ms } => {
                write!(f, "Non-finite price at {}", timestamp_ms)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
