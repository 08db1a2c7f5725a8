//! Wire types for the market listing endpoint (REST).

use serde::{Deserialize, Serialize};

/// One element of the `/coins/markets` response array.
///
/// Only the fields the client reads are declared; serde ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetResponse {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

/// The listing endpoint returns a bare JSON array.
pub type MarketsResponse = Vec<AssetResponse>;
