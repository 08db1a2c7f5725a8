//! Portfolio domain — user-entered holdings valued at live prices.
//!
//! Nothing here is fetched: the app records holdings and feeds in the latest
//! asset snapshots via [`Portfolio::update_prices`]. Value, cost and profit
//! are always derived, never stored.

use crate::domain::asset::Asset;
use crate::shared::AssetId;
use serde::{Deserialize, Serialize};

// ─── Holding ─────────────────────────────────────────────────────────────────

/// A position in one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub asset_id: AssetId,
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    pub buy_price: f64,
    pub current_price: f64,
}

impl Holding {
    /// A holding priced at the asset's current snapshot until the next update.
    pub fn new(asset: &Asset, amount: f64, buy_price: f64) -> Self {
        Self {
            asset_id: asset.id.clone(),
            symbol: asset.symbol.clone(),
            name: asset.name.clone(),
            amount,
            buy_price,
            current_price: asset.current_price,
        }
    }

    pub fn value(&self) -> f64 {
        self.amount * self.current_price
    }

    pub fn cost(&self) -> f64 {
        self.amount * self.buy_price
    }

    pub fn profit(&self) -> f64 {
        self.value() - self.cost()
    }

    pub fn profit_percent(&self) -> f64 {
        percent_of(self.profit(), self.cost())
    }
}

// ─── Portfolio ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn get(&self, asset_id: &AssetId) -> Option<&Holding> {
        self.holdings.iter().find(|h| &h.asset_id == asset_id)
    }

    /// Add a holding. A second buy of the same asset merges into the existing
    /// holding at the amount-weighted average buy price.
    pub fn add(&mut self, holding: Holding) {
        match self
            .holdings
            .iter()
            .position(|h| h.asset_id == holding.asset_id)
        {
            Some(index) => {
                let existing = &mut self.holdings[index];
                let amount = existing.amount + holding.amount;
                if amount != 0.0 {
                    existing.buy_price = (existing.cost() + holding.cost()) / amount;
                }
                existing.amount = amount;
                existing.current_price = holding.current_price;
            }
            None => self.holdings.push(holding),
        }
    }

    pub fn remove(&mut self, asset_id: &AssetId) -> Option<Holding> {
        let index = self.holdings.iter().position(|h| &h.asset_id == asset_id)?;
        Some(self.holdings.remove(index))
    }

    /// Refresh `current_price` from the latest snapshots. Holdings with no
    /// matching asset keep their last known price. Returns how many were updated.
    pub fn update_prices(&mut self, assets: &[Asset]) -> usize {
        let mut updated = 0;
        for holding in &mut self.holdings {
            if let Some(asset) = assets.iter().find(|a| a.id == holding.asset_id) {
                holding.current_price = asset.current_price;
                updated += 1;
            }
        }
        tracing::trace!(updated, held = self.holdings.len(), "Updated portfolio prices");
        updated
    }

    pub fn total_value(&self) -> f64 {
        self.holdings.iter().map(Holding::value).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.holdings.iter().map(Holding::cost).sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.total_value() - self.total_cost()
    }

    pub fn total_profit_percent(&self) -> f64 {
        percent_of(self.total_profit(), self.total_cost())
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::tests::make_asset;

    fn holding(id: &str, amount: f64, buy: f64, current: f64) -> Holding {
        let mut h = Holding::new(&make_asset(id, current, None, None), amount, buy);
        h.current_price = current;
        h
    }

    #[test]
    fn test_holding_derived_fields() {
        let h = holding("bitcoin", 0.5, 40_000.0, 60_000.0);
        assert_eq!(h.value(), 30_000.0);
        assert_eq!(h.cost(), 20_000.0);
        assert_eq!(h.profit(), 10_000.0);
        assert_eq!(h.profit_percent(), 50.0);
    }

    #[test]
    fn test_zero_cost_percent_is_zero() {
        let h = holding("airdrop", 100.0, 0.0, 2.0);
        assert_eq!(h.profit(), 200.0);
        assert_eq!(h.profit_percent(), 0.0);
    }

    #[test]
    fn test_add_merges_at_average_price() {
        let mut portfolio = Portfolio::new();
        portfolio.add(holding("eth", 1.0, 1_000.0, 2_000.0));
        portfolio.add(holding("eth", 3.0, 2_000.0, 2_000.0));
        assert_eq!(portfolio.len(), 1);
        let eth = portfolio.get(&AssetId::from("eth")).unwrap();
        assert_eq!(eth.amount, 4.0);
        assert_eq!(eth.buy_price, 1_750.0);
    }

    #[test]
    fn test_update_prices_and_totals() {
        let mut portfolio = Portfolio::new();
        portfolio.add(holding("btc", 1.0, 100.0, 100.0));
        portfolio.add(holding("eth", 2.0, 50.0, 50.0));
        portfolio.add(holding("delisted", 10.0, 1.0, 1.0));

        let updated = portfolio.update_prices(&[
            make_asset("btc", 150.0, None, None),
            make_asset("eth", 25.0, None, None),
            make_asset("sol", 99.0, None, None),
        ]);
        assert_eq!(updated, 2);
        assert_eq!(portfolio.total_value(), 150.0 + 50.0 + 10.0);
        assert_eq!(portfolio.total_cost(), 100.0 + 100.0 + 10.0);
        assert_eq!(portfolio.total_profit(), 0.0);
        assert_eq!(portfolio.total_profit_percent(), 0.0);
    }

    #[test]
    fn test_remove() {
        let mut portfolio = Portfolio::new();
        portfolio.add(holding("btc", 1.0, 1.0, 1.0));
        assert!(portfolio.remove(&AssetId::from("btc")).is_some());
        assert!(portfolio.remove(&AssetId::from("btc")).is_none());
        assert!(portfolio.is_empty());
    }

    #[test]
    fn test_portfolio_serde() {
        let mut portfolio = Portfolio::new();
        portfolio.add(holding("btc", 0.25, 30_000.0, 60_000.0));
        let json = serde_json::to_string(&portfolio).unwrap();
        let back: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(back, portfolio);
    }
}
