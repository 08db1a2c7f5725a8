//! # coinscope
//!
//! Client core for a cryptocurrency market viewer: a paginated market list,
//! per-asset price charts, and a local portfolio ledger. Rendering is left to
//! the host application; this crate owns fetching, decoding, and view state.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, state containers (always available, WASM-safe)
//! 2. **Settings** — Explicit user settings over a pluggable key-value store
//! 3. **HTTP API** — `CoinscopeHttp` with an opt-in retry policy
//! 4. **High-Level Client** — `CoinscopeClient` with nested sub-clients
//!
//! State containers (`MarketListState`, `ChartState`) are driven through the
//! `MarketDataSource` trait, which `CoinscopeClient` implements.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinscope::prelude::*;
//!
//! let client = CoinscopeClient::builder().build()?;
//!
//! let mut list = MarketListState::new(client.page_size());
//! list.load(&client, false).await?;
//! list.set_sort(SortOption::PercentChange);
//!
//! let mut chart = ChartState::new();
//! chart.select(&client, AssetId::from("bitcoin"), Interval::OneYear).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// The data-source seam between state containers and the network.
pub mod source;

/// Unified SDK error types.
pub mod error;

/// Network defaults.
pub mod network;

// ── Layer 2: Settings ────────────────────────────────────────────────────────

/// User settings and their persistence.
pub mod settings;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `CoinscopeClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, Interval};

    // Domain types — assets
    pub use crate::domain::asset::{
        sort_assets, Asset, FetchPhase, MarketListState, PageRequest, SortOption,
    };

    // Domain types — price history
    pub use crate::domain::price_history::{
        nearest_point, ChartPhase, ChartState, HistoricalPoint, HistoryRequest, PriceSeries,
        SeriesSummary,
    };

    // Domain types — portfolio
    pub use crate::domain::portfolio::{Holding, Portfolio};

    // Data source
    pub use crate::source::MarketDataSource;

    // Settings
    pub use crate::settings::{ColorScheme, MemorySettingsStore, Settings, SettingsStore};

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_CURRENCY, DEFAULT_PAGE_SIZE};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        CoinscopeClient, CoinscopeClientBuilder, MarketsClient, PriceHistorySubClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
