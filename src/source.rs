//! The `MarketDataSource` seam between state containers and the network.
//!
//! The state managers never talk to HTTP directly. They drive any
//! implementation of this trait: `CoinscopeClient` in production, a scripted
//! double in tests.

use crate::domain::asset::Asset;
use crate::domain::price_history::HistoricalPoint;
use crate::error::SdkError;
use crate::shared::{AssetId, Interval};
use async_trait::async_trait;

/// Read-only access to market listings and price history.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataSource: Send + Sync {
    /// One page of assets, in the order the source ranks them.
    async fn fetch_markets(&self, page: u32, per_page: u32) -> Result<Vec<Asset>, SdkError>;

    /// Chronologically ordered price samples for one asset over `interval`.
    async fn fetch_history(
        &self,
        asset_id: &AssetId,
        interval: Interval,
    ) -> Result<Vec<HistoricalPoint>, SdkError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted source: pops one queued response per call and records the calls.
    #[derive(Default)]
    pub(crate) struct ScriptedSource {
        pages: Mutex<VecDeque<Result<Vec<Asset>, SdkError>>>,
        histories: Mutex<VecDeque<Result<Vec<HistoricalPoint>, SdkError>>>,
        pub(crate) page_calls: Mutex<Vec<(u32, u32)>>,
        pub(crate) history_calls: Mutex<Vec<(AssetId, Interval)>>,
    }

    impl ScriptedSource {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn push_page(&self, page: Result<Vec<Asset>, SdkError>) {
            self.pages.lock().unwrap().push_back(page);
        }

        pub(crate) fn push_history(&self, history: Result<Vec<HistoricalPoint>, SdkError>) {
            self.histories.lock().unwrap().push_back(history);
        }

        pub(crate) fn page_calls(&self) -> Vec<(u32, u32)> {
            self.page_calls.lock().unwrap().clone()
        }

        pub(crate) fn history_calls(&self) -> Vec<(AssetId, Interval)> {
            self.history_calls.lock().unwrap().clone()
        }
    }

    /// Source whose fetches never resolve.
    pub(crate) struct PendingSource;

    #[async_trait]
    impl MarketDataSource for PendingSource {
        async fn fetch_markets(&self, _page: u32, _per_page: u32) -> Result<Vec<Asset>, SdkError> {
            std::future::pending().await
        }

        async fn fetch_history(
            &self,
            _asset_id: &AssetId,
            _interval: Interval,
        ) -> Result<Vec<HistoricalPoint>, SdkError> {
            std::future::pending().await
        }
    }

    #[async_trait]
    impl MarketDataSource for ScriptedSource {
        async fn fetch_markets(&self, page: u32, per_page: u32) -> Result<Vec<Asset>, SdkError> {
            self.page_calls.lock().unwrap().push((page, per_page));
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SdkError::Other("no scripted page".to_string())))
        }

        async fn fetch_history(
            &self,
            asset_id: &AssetId,
            interval: Interval,
        ) -> Result<Vec<HistoricalPoint>, SdkError> {
            self.history_calls
                .lock()
                .unwrap()
                .push((asset_id.clone(), interval));
            self.histories
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SdkError::Other("no scripted history".to_string())))
        }
    }
}
