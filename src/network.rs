//! Network defaults for the market data API.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Quote currency used for every price, market cap and chart value.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Number of assets requested per market-list page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
