//! Chart state container — app-owned, SDK-provided update logic.

use super::{nearest_point, HistoricalPoint, PriceSeries, SeriesSummary};
use crate::error::SdkError;
use crate::shared::{AssetId, Interval};
use crate::source::MarketDataSource;
use chrono::{DateTime, Utc};

/// Whether a history fetch is outstanding, and which one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartPhase {
    #[default]
    Idle,
    Loading { request_id: u64 },
}

/// Ticket for one history fetch. Returned by `begin_*`, consumed by
/// [`ChartState::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub id: u64,
    pub asset_id: AssetId,
    pub interval: Interval,
}

/// Price chart for the selected asset.
///
/// Holds at most one [`PriceSeries`], always scoped to a single asset and
/// interval, plus the point currently highlighted by the pointer.
///
/// Every `begin_*` call supersedes any fetch still in flight: only the
/// completion matching the latest ticket is applied, whatever order the
/// network delivers them in. A failed fetch leaves the held series untouched,
/// and a fetch whose future is dropped leaves the chart `Idle`.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    selected: Option<(AssetId, Interval)>,
    series: Option<PriceSeries>,
    highlighted: Option<usize>,
    phase: ChartPhase,
    next_request_id: u64,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ChartPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ChartPhase::Loading { .. })
    }

    /// Asset of the most recent selection (which may still be loading).
    pub fn selected_asset(&self) -> Option<&AssetId> {
        self.selected.as_ref().map(|(id, _)| id)
    }

    /// Interval of the most recent selection (which may still be loading).
    pub fn selected_interval(&self) -> Option<Interval> {
        self.selected.as_ref().map(|(_, interval)| *interval)
    }

    pub fn series(&self) -> Option<&PriceSeries> {
        self.series.as_ref()
    }

    pub fn points(&self) -> &[HistoricalPoint] {
        self.series
            .as_ref()
            .map(|s| s.points.as_slice())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        self.series.as_ref().and_then(PriceSeries::summary)
    }

    pub fn highlighted(&self) -> Option<&HistoricalPoint> {
        self.highlighted.and_then(|i| self.points().get(i))
    }

    // ── Two-phase protocol ───────────────────────────────────────────────

    /// Start fetching `interval` history for `asset_id`.
    pub fn begin_select(&mut self, asset_id: AssetId, interval: Interval) -> HistoryRequest {
        let id = self.next_request_id;
        self.next_request_id += 1;

        if let ChartPhase::Loading { request_id } = self.phase {
            tracing::trace!(superseded = request_id, by = id, "Superseding history fetch");
        }
        self.phase = ChartPhase::Loading { request_id: id };
        self.selected = Some((asset_id.clone(), interval));

        HistoryRequest {
            id,
            asset_id,
            interval,
        }
    }

    /// Start fetching a different interval for the selected asset.
    /// `None` when no asset has been selected yet.
    pub fn begin_interval(&mut self, interval: Interval) -> Option<HistoryRequest> {
        let asset_id = self.selected_asset()?.clone();
        Some(self.begin_select(asset_id, interval))
    }

    /// Apply the outcome of `request`.
    ///
    /// Returns `Ok(true)` when the series was replaced and `Ok(false)` when
    /// the completion belongs to a superseded request and was discarded.
    pub fn complete(
        &mut self,
        request: HistoryRequest,
        result: Result<Vec<HistoricalPoint>, SdkError>,
    ) -> Result<bool, SdkError> {
        if self.phase != (ChartPhase::Loading { request_id: request.id }) {
            tracing::trace!(request_id = request.id, "Discarding stale history completion");
            return Ok(false);
        }
        self.phase = ChartPhase::Idle;

        match result {
            Ok(points) => {
                tracing::debug!(
                    asset = %request.asset_id,
                    interval = %request.interval,
                    points = points.len(),
                    "Applied price history"
                );
                self.series = Some(PriceSeries::new(request.asset_id, request.interval, points));
                self.highlighted = None;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(
                    asset = %request.asset_id,
                    interval = %request.interval,
                    "Price history fetch failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    /// Abandon `request` if it is still the fetch in flight. The selection
    /// and the held series are kept.
    pub fn cancel(&mut self, request: &HistoryRequest) -> bool {
        self.cancel_id(request.id)
    }

    fn cancel_id(&mut self, request_id: u64) -> bool {
        if self.phase != (ChartPhase::Loading { request_id }) {
            return false;
        }
        tracing::debug!(request_id, "History fetch cancelled");
        self.phase = ChartPhase::Idle;
        true
    }

    // ── Interaction ──────────────────────────────────────────────────────

    /// Highlight the point nearest in time to `at` and return it.
    pub fn pick_nearest(&mut self, at: DateTime<Utc>) -> Option<&HistoricalPoint> {
        self.highlighted = nearest_point(self.points(), at);
        self.highlighted()
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    // ── Async helpers ────────────────────────────────────────────────────

    pub async fn select<S>(
        &mut self,
        source: &S,
        asset_id: AssetId,
        interval: Interval,
    ) -> Result<bool, SdkError>
    where
        S: MarketDataSource + ?Sized,
    {
        let request = self.begin_select(asset_id, interval);
        self.run(source, request).await
    }

    /// Refetch the selected asset at `interval`. `Ok(false)` when nothing is selected.
    pub async fn change_interval<S>(&mut self, source: &S, interval: Interval) -> Result<bool, SdkError>
    where
        S: MarketDataSource + ?Sized,
    {
        match self.begin_interval(interval) {
            Some(request) => self.run(source, request).await,
            None => Ok(false),
        }
    }

    async fn run<S>(&mut self, source: &S, request: HistoryRequest) -> Result<bool, SdkError>
    where
        S: MarketDataSource + ?Sized,
    {
        let mut guard = InFlight {
            state: self,
            request_id: request.id,
            settled: false,
        };
        let result = source.fetch_history(&request.asset_id, request.interval).await;
        guard.settled = true;
        guard.state.complete(request, result)
    }
}

/// Clears the loading phase if the fetch future is dropped before the
/// history arrives.
struct InFlight<'a> {
    state: &'a mut ChartState,
    request_id: u64,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.cancel_id(self.request_id);
        }
    }
}
