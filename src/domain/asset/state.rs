//! Market list state container — app-owned, SDK-provided update logic.

use super::{sort_assets, Asset, SortOption};
use crate::error::SdkError;
use crate::network::DEFAULT_PAGE_SIZE;
use crate::shared::AssetId;
use crate::source::MarketDataSource;

/// Page number the listing endpoint starts counting from.
pub const FIRST_PAGE: u32 = 1;

/// Distance from the end of the held list at which the next page is requested.
pub const LOAD_MORE_THRESHOLD: usize = 10;

/// What the list is currently fetching. Only `Idle` may start a fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPhase {
    #[default]
    Idle,
    /// First load or next-page load.
    Loading,
    /// Pull-to-refresh.
    Refreshing,
}

/// Ticket for one in-flight page fetch. Returned by `begin_*`, consumed by
/// [`MarketListState::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    id: u64,
    pub page: u32,
    pub per_page: u32,
    /// Replace the held list instead of appending to it.
    pub reset: bool,
}

/// Paginated, sortable market list.
///
/// The app owns instances of this type. Fetches go through a two-phase
/// protocol: `begin_load` / `begin_refresh` / `item_appeared` hand out a
/// [`PageRequest`] (or `None` when a fetch is already in flight), and
/// `complete` applies the outcome. The async `load` / `refresh` /
/// `load_more_if_needed` helpers run both phases against a
/// [`MarketDataSource`].
///
/// A failed fetch leaves the list, cursor and end-of-data flag untouched.
/// A fetch abandoned by dropping its future returns the list to `Idle`.
#[derive(Debug, Clone)]
pub struct MarketListState {
    assets: Vec<Asset>,
    page: u32,
    per_page: u32,
    has_more: bool,
    sort: SortOption,
    phase: FetchPhase,
    /// Id of the in-flight ticket. Meaningless while `phase` is `Idle`.
    active_request: u64,
    next_request_id: u64,
}

impl Default for MarketListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl MarketListState {
    pub fn new(per_page: u32) -> Self {
        Self {
            assets: Vec::new(),
            page: FIRST_PAGE,
            per_page: per_page.max(1),
            has_more: true,
            sort: SortOption::default(),
            phase: FetchPhase::Idle,
            active_request: 0,
            next_request_id: 0,
        }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Page that the next non-reset load will request.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// `false` once a short page has been received.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == FetchPhase::Refreshing
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    // ── Two-phase protocol ───────────────────────────────────────────────

    /// Start a load. `reset` requests the first page and replaces the list on success.
    pub fn begin_load(&mut self, reset: bool) -> Option<PageRequest> {
        self.begin(FetchPhase::Loading, reset)
    }

    /// Start a pull-to-refresh (a reset load in the `Refreshing` phase).
    pub fn begin_refresh(&mut self) -> Option<PageRequest> {
        self.begin(FetchPhase::Refreshing, true)
    }

    /// Report that `asset_id` is on screen. Starts a next-page load when it is
    /// the asset `LOAD_MORE_THRESHOLD` positions from the end.
    pub fn item_appeared(&mut self, asset_id: &AssetId) -> Option<PageRequest> {
        if self.should_load_more(asset_id) {
            self.begin_load(false)
        } else {
            None
        }
    }

    pub fn should_load_more(&self, asset_id: &AssetId) -> bool {
        if self.phase != FetchPhase::Idle || !self.has_more {
            return false;
        }
        let threshold = self.assets.len().saturating_sub(LOAD_MORE_THRESHOLD);
        self.assets
            .get(threshold)
            .is_some_and(|asset| &asset.id == asset_id)
    }

    fn begin(&mut self, phase: FetchPhase, reset: bool) -> Option<PageRequest> {
        if self.phase != FetchPhase::Idle {
            tracing::trace!(current = ?self.phase, "Market list fetch already in flight, dropping request");
            return None;
        }
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.phase = phase;
        self.active_request = id;
        Some(PageRequest {
            id,
            page: if reset { FIRST_PAGE } else { self.page },
            per_page: self.per_page,
            reset,
        })
    }

    fn is_active(&self, request: &PageRequest) -> bool {
        self.phase != FetchPhase::Idle && self.active_request == request.id
    }

    /// Abandon the fetch started by `request` without touching the list.
    /// Returns `false` when `request` is not the fetch in flight.
    pub fn cancel(&mut self, request: &PageRequest) -> bool {
        if !self.is_active(request) {
            return false;
        }
        tracing::debug!(page = request.page, phase = ?self.phase, "Market list fetch cancelled");
        self.phase = FetchPhase::Idle;
        true
    }

    /// Apply the outcome of the fetch started by `request`.
    ///
    /// Returns the number of assets received. The phase is back to `Idle`
    /// afterwards whatever the outcome. A ticket other than the one in
    /// flight is ignored and yields `Ok(0)`.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<Vec<Asset>, SdkError>,
    ) -> Result<usize, SdkError> {
        if !self.is_active(&request) {
            tracing::trace!(page = request.page, "Not the market list fetch in flight, ignoring completion");
            return Ok(0);
        }
        self.phase = FetchPhase::Idle;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(page = request.page, reset = request.reset, "Market list fetch failed: {}", e);
                return Err(e);
            }
        };

        let received = page.len();
        if request.reset {
            self.assets = page;
        } else {
            self.assets.extend(page);
        }
        sort_assets(&mut self.assets, self.sort);

        if received >= request.per_page as usize {
            self.page = request.page + 1;
            self.has_more = true;
        } else {
            self.page = request.page;
            self.has_more = false;
        }

        tracing::debug!(
            page = request.page,
            received,
            total = self.assets.len(),
            has_more = self.has_more,
            "Applied market page"
        );
        Ok(received)
    }

    /// Re-order the held list by `sort`. Does not refetch.
    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        sort_assets(&mut self.assets, sort);
    }

    // ── Async helpers ────────────────────────────────────────────────────

    /// Fetch and apply one page. Returns `Ok(0)` without fetching when a fetch
    /// is already in flight.
    pub async fn load<S>(&mut self, source: &S, reset: bool) -> Result<usize, SdkError>
    where
        S: MarketDataSource + ?Sized,
    {
        match self.begin_load(reset) {
            Some(request) => self.run(source, request).await,
            None => Ok(0),
        }
    }

    pub async fn refresh<S>(&mut self, source: &S) -> Result<usize, SdkError>
    where
        S: MarketDataSource + ?Sized,
    {
        match self.begin_refresh() {
            Some(request) => self.run(source, request).await,
            None => Ok(0),
        }
    }

    pub async fn load_more_if_needed<S>(
        &mut self,
        source: &S,
        asset_id: &AssetId,
    ) -> Result<usize, SdkError>
    where
        S: MarketDataSource + ?Sized,
    {
        match self.item_appeared(asset_id) {
            Some(request) => self.run(source, request).await,
            None => Ok(0),
        }
    }

    async fn run<S>(&mut self, source: &S, request: PageRequest) -> Result<usize, SdkError>
    where
        S: MarketDataSource + ?Sized,
    {
        let mut guard = InFlight {
            state: self,
            request,
            settled: false,
        };
        let result = source.fetch_markets(request.page, request.per_page).await;
        guard.settled = true;
        guard.state.complete(request, result)
    }
}

/// Puts the list back to `Idle` if the fetch future is dropped before the
/// page arrives.
struct InFlight<'a> {
    state: &'a mut MarketListState,
    request: PageRequest,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.cancel(&self.request);
        }
    }
}
