//! Asset domain — market snapshots, sort keys, validation.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::AssetId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub use state::{FetchPhase, MarketListState, PageRequest};

// ─── Asset ───────────────────────────────────────────────────────────────────

/// One tracked cryptocurrency and its latest market snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    pub image_url: Option<String>,
    pub current_price: f64,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

impl Asset {
    pub fn price(&self) -> f64 {
        self.current_price
    }

    /// 24h change in percent; 0 when the API omitted it.
    pub fn percent_change(&self) -> f64 {
        self.price_change_percentage_24h.unwrap_or(0.0)
    }

    /// Value this asset is ranked by under `sort`.
    pub fn sort_value(&self, sort: SortOption) -> f64 {
        match sort {
            SortOption::MarketCap => self.market_cap.unwrap_or(0.0),
            SortOption::Price => self.current_price,
            SortOption::PercentChange => self.percent_change(),
        }
    }
}

// ─── SortOption ──────────────────────────────────────────────────────────────

/// Key the market list is ordered by. Every option sorts descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    MarketCap,
    Price,
    PercentChange,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarketCap => "Market Cap",
            Self::Price => "Price",
            Self::PercentChange => "24h Change",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sorts `assets` descending by `sort`.
///
/// `sort_by` is stable, so assets with equal values keep their current
/// relative order.
pub fn sort_assets(assets: &mut [Asset], sort: SortOption) {
    assets.sort_by(|a, b| descending(a.sort_value(sort), b.sort_value(sort)));
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    MissingId,
    MissingSymbol(String),
    MissingPrice(String),
    NonFinitePrice(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Missing asset id"),
            ValidationError::MissingSymbol(id) => write!(f, "Missing symbol ({id})"),
            ValidationError::MissingPrice(id) => write!(f, "Missing current price ({id})"),
            ValidationError::NonFinitePrice(id) => write!(f, "Non-finite current price ({id})"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_asset(id: &str, price: f64, market_cap: Option<f64>, change: Option<f64>) -> Asset {
        Asset {
            id: AssetId::from(id),
            symbol: id.chars().take(3).collect(),
            name: id.to_string(),
            image_url: None,
            current_price: price,
            market_cap,
            market_cap_rank: None,
            total_volume: None,
            high_24h: None,
            low_24h: None,
            price_change_percentage_24h: change,
        }
    }

    fn ids(assets: &[Asset]) -> Vec<&str> {
        assets.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_percent_change_defaults_to_zero() {
        let asset = make_asset("btc", 1.0, None, None);
        assert_eq!(asset.percent_change(), 0.0);
    }

    #[test]
    fn test_sort_by_percent_change_descending() {
        let mut assets = vec![
            make_asset("a", 1.0, None, Some(-3.0)),
            make_asset("b", 1.0, None, None),
            make_asset("c", 1.0, None, Some(7.5)),
            make_asset("d", 1.0, None, Some(0.4)),
        ];
        sort_assets(&mut assets, SortOption::PercentChange);
        assert_eq!(ids(&assets), ["c", "d", "b", "a"]);
        for pair in assets.windows(2) {
            assert!(pair[0].percent_change() >= pair[1].percent_change());
        }
    }

    #[test]
    fn test_sort_by_price_descending() {
        let mut assets = vec![
            make_asset("a", 2.0, None, None),
            make_asset("b", 60_000.0, None, None),
            make_asset("c", 0.3, None, None),
        ];
        sort_assets(&mut assets, SortOption::Price);
        assert_eq!(ids(&assets), ["b", "a", "c"]);
    }

    #[test]
    fn test_sort_by_market_cap_missing_sorts_last() {
        let mut assets = vec![
            make_asset("a", 1.0, None, None),
            make_asset("b", 1.0, Some(5.0e9), None),
            make_asset("c", 1.0, Some(9.0e11), None),
        ];
        sort_assets(&mut assets, SortOption::MarketCap);
        assert_eq!(ids(&assets), ["c", "b", "a"]);
    }

    #[test]
    fn test_sort_keeps_order_of_equal_values() {
        let mut assets = vec![
            make_asset("first", 1.0, None, Some(2.0)),
            make_asset("top", 1.0, None, Some(9.0)),
            make_asset("second", 1.0, None, Some(2.0)),
        ];
        sort_assets(&mut assets, SortOption::PercentChange);
        assert_eq!(ids(&assets), ["top", "first", "second"]);
    }
}
