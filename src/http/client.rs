//! Low-level HTTP client — `CoinscopeHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). `CoinscopeClient` wraps this.

use crate::domain::asset::wire::MarketsResponse;
use crate::domain::price_history::wire::MarketChartResponse;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::Interval;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Header carrying a CoinGecko demo-plan API key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Low-level HTTP client for the market data REST API.
pub struct CoinscopeHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl CoinscopeHttp {
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        api_key: Option<&str>,
        retry: RetryPolicy,
    ) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| HttpError::BadRequest(format!("Invalid API key header: {}", e)))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.pool_max_idle_per_host(4);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Markets ──────────────────────────────────────────────────────────

    pub fn markets_url(&self, currency: &str, page: u32, per_page: u32) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page={}&sparkline=false&price_change_percentage=24h",
            self.base_url,
            urlencoding::encode(currency),
            per_page,
            page
        )
    }

    pub async fn get_markets(
        &self,
        currency: &str,
        page: u32,
        per_page: u32,
    ) -> Result<MarketsResponse, HttpError> {
        let url = self.markets_url(currency, page, per_page);
        self.get(&url).await
    }

    // ── Market chart ─────────────────────────────────────────────────────

    pub fn market_chart_url(&self, asset_id: &str, currency: &str, interval: Interval) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(asset_id),
            urlencoding::encode(currency),
            interval.days_param()
        )
    }

    pub async fn get_market_chart(
        &self,
        asset_id: &str,
        currency: &str,
        interval: Interval,
    ) -> Result<MarketChartResponse, HttpError> {
        let url = self.market_chart_url(asset_id, currency, interval);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let config = match &self.retry {
            RetryPolicy::None => return self.do_get(url).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut attempt = 0;
        loop {
            let error = match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };
            let Some(delay) = config.delay_after(&error, attempt) else {
                return Err(error);
            };
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: error.to_string(),
                });
            }

            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Retrying {} after: {}",
                url,
                error
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for CoinscopeHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            retry: self.retry.clone(),
        }
    }
}
