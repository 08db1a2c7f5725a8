//! Conversion: PricePair / MarketChartResponse → HistoricalPoint.

use super::wire::{MarketChartResponse, PricePair};
use super::{HistoricalPoint, ValidationError};
use chrono::{DateTime, Utc};

impl TryFrom<PricePair> for HistoricalPoint {
    type Error = ValidationError;

    fn try_from(PricePair(timestamp_ms, price): PricePair) -> Result<Self, Self::Error> {
        if !timestamp_ms.is_finite() {
            return Err(ValidationError::InvalidTimestamp(timestamp_ms));
        }
        let time = DateTime::<Utc>::from_timestamp_millis(timestamp_ms.round() as i64)
            .ok_or(ValidationError::InvalidTimestamp(timestamp_ms))?;
        if !price.is_finite() {
            return Err(ValidationError::NonFinitePrice { timestamp_ms });
        }
        Ok(HistoricalPoint { time, price })
    }
}

impl TryFrom<MarketChartResponse> for Vec<HistoricalPoint> {
    type Error = ValidationError;

    fn try_from(source: MarketChartResponse) -> Result<Self, Self::Error> {
        source
            .prices
            .into_iter()
            .map(HistoricalPoint::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_to_point() {
        let p = HistoricalPoint::try_from(PricePair(1714521600000.0, 60123.45)).unwrap();
        assert_eq!(p.time.timestamp_millis(), 1714521600000);
        assert_eq!(p.price, 60123.45);
    }

    #[test]
    fn test_pair_rejects_non_finite() {
        assert!(matches!(
            HistoricalPoint::try_from(PricePair(f64::NAN, 1.0)),
            Err(ValidationError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            HistoricalPoint::try_from(PricePair(1.0, f64::INFINITY)),
            Err(ValidationError::NonFinitePrice { .. })
        ));
    }

    #[test]
    fn test_chart_keeps_source_order() {
        let chart = MarketChartResponse {
            prices: vec![PricePair(1000.0, 1.0), PricePair(2000.0, 2.0), PricePair(3000.0, 3.0)],
            market_caps: Vec::new(),
            total_volumes: Vec::new(),
        };
        let points: Vec<HistoricalPoint> = chart.try_into().unwrap();
        let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
        assert_eq!(prices, [1.0, 2.0, 3.0]);
    }
}
