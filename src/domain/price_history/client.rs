//! Price history sub-client — market chart queries.

use crate::client::CoinscopeClient;
use crate::domain::price_history::{self, HistoricalPoint, PriceSeries};
use crate::error::SdkError;
use crate::shared::{AssetId, Interval};

/// Sub-client for price history operations.
pub struct PriceHistoryClient<'a> {
    pub(crate) client: &'a CoinscopeClient,
}

impl<'a> PriceHistoryClient<'a> {
    /// Chronologically ordered price samples for `asset_id` over `interval`.
    pub async fn get(
        &self,
        asset_id: &AssetId,
        interval: Interval,
    ) -> Result<Vec<HistoricalPoint>, SdkError> {
        let resp = self
            .client
            .http
            .get_market_chart(asset_id.as_str(), &self.client.currency, interval)
            .await?;
        resp.try_into()
            .map_err(|e: price_history::ValidationError| SdkError::Validation(e.to_string()))
    }

    /// Same as [`get`](Self::get), wrapped with its asset and interval.
    pub async fn series(&self, asset_id: &AssetId, interval: Interval) -> Result<PriceSeries, SdkError> {
        let points = self.get(asset_id, interval).await?;
        Ok(PriceSeries::new(asset_id.clone(), interval, points))
    }
}
