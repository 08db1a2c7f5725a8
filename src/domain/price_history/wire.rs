//! Wire types for the market chart endpoint (REST).

use serde::{Deserialize, Serialize};

/// Raw `[epoch_millis, price]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePair(pub f64, pub f64);

/// `/coins/{id}/market_chart` response.
///
/// `market_caps` and `total_volumes` arrive alongside `prices`; only
/// `prices` is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketChartResponse {
    pub prices: Vec<PricePair>,
    #[serde(default)]
    pub market_caps: Vec<PricePair>,
    #[serde(default)]
    pub total_volumes: Vec<PricePair>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_market_chart() {
        let json = r#"{
            "prices": [[1714521600000, 60123.45], [1714525200000, 60210.0]],
            "market_caps": [[1714521600000, 1.18e12]],
            "total_volumes": [[1714521600000, 2.9e10]]
        }"#;
        let chart: MarketChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(chart.prices.len(), 2);
        assert_eq!(chart.prices[0], PricePair(1714521600000.0, 60123.45));
        assert_eq!(chart.market_caps.len(), 1);
    }

    #[test]
    fn test_deserialize_prices_only() {
        let chart: MarketChartResponse = serde_json::from_str(r#"{"prices": []}"#).unwrap();
        assert!(chart.prices.is_empty());
        assert!(chart.total_volumes.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_missing_prices() {
        assert!(serde_json::from_str::<MarketChartResponse>(r#"{"error":"invalid"}"#).is_err());
        assert!(serde_json::from_str::<MarketChartResponse>(r#"{"prices":[[1]]}"#).is_err());
    }
}
