//! High-level client — `CoinscopeClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared configuration, and accessor methods.

use crate::domain::asset::client::Markets;
use crate::domain::asset::Asset;
use crate::domain::price_history::client::PriceHistoryClient;
use crate::domain::price_history::HistoricalPoint;
use crate::error::SdkError;
use crate::http::{CoinscopeHttp, RetryPolicy};
use crate::settings::Settings;
use crate::shared::{AssetId, Interval};
use crate::source::MarketDataSource;

use async_trait::async_trait;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::asset::client::Markets as MarketsClient;
pub use crate::domain::price_history::client::PriceHistoryClient as PriceHistorySubClient;

/// The primary entry point for market data.
///
/// Provides nested sub-client accessors for each domain:
/// `client.markets()`, `client.price_history()`. Cheap to clone; clones share
/// the underlying connection pool.
#[derive(Clone)]
pub struct CoinscopeClient {
    pub(crate) http: CoinscopeHttp,
    pub(crate) currency: String,
    pub(crate) page_size: u32,
}

impl CoinscopeClient {
    pub fn builder() -> CoinscopeClientBuilder {
        CoinscopeClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn price_history(&self) -> PriceHistoryClient<'_> {
        PriceHistoryClient { client: self }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataSource for CoinscopeClient {
    async fn fetch_markets(&self, page: u32, per_page: u32) -> Result<Vec<Asset>, SdkError> {
        self.markets().page(page, per_page).await
    }

    async fn fetch_history(
        &self,
        asset_id: &AssetId,
        interval: Interval,
    ) -> Result<Vec<HistoricalPoint>, SdkError> {
        self.price_history().get(asset_id, interval).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinscopeClientBuilder {
    base_url: String,
    currency: String,
    page_size: u32,
    timeout: Option<Duration>,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl Default for CoinscopeClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            currency: crate::network::DEFAULT_CURRENCY.to_string(),
            page_size: crate::network::DEFAULT_PAGE_SIZE,
            timeout: None,
            api_key: None,
            retry: RetryPolicy::None,
        }
    }
}

impl CoinscopeClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Quote currency, e.g. `"usd"` or `"eur"`.
    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_lowercase();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Request timeout. Unset by default, leaving reqwest's transport
    /// defaults in place. Native only; the browser owns timeouts on WASM.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Take currency and page size from persisted user settings.
    pub fn settings(self, settings: &Settings) -> Self {
        self.currency(&settings.currency).page_size(settings.page_size)
    }

    pub fn build(self) -> Result<CoinscopeClient, SdkError> {
        if self.currency.trim().is_empty() {
            return Err(SdkError::Validation("currency must not be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(SdkError::Validation("page size must be at least 1".to_string()));
        }
        Ok(CoinscopeClient {
            http: CoinscopeHttp::new(
                &self.base_url,
                self.timeout,
                self.api_key.as_deref(),
                self.retry,
            )?,
            currency: self.currency,
            page_size: self.page_size,
        })
    }
}
