use tracing::{debug, trace, warn};

use crate::config::PaginationConfig;
use crate::domain::entities::lifecycle::{FetchLifecycle, FetchTicket};
use crate::domain::entities::query::{
    ColumnFiltersState, PaginationState, QueryState, SortingState,
};
use crate::domain::entities::request::{derive_request_params, PageResponse, RequestParams};
use crate::usecase::ports::fetcher::{FetchError, PageFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSnapshot {
    pub page_index: usize,
    pub page_size: usize,
    pub total_records: usize,
    pub page_count: usize,
}

/// Read-only view handed to table components.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot<T> {
    pub data: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub pagination: PaginationSnapshot,
    pub sorting: SortingState,
    pub column_filters: ColumnFiltersState,
    pub global_filter: String,
}

/// Owns the query inputs of one paginated table and the lifecycle of its fetches.
///
/// Mutators never fetch. They mark the coordinator pending, and the next scheduler
/// step ([`QueryCoordinator::take_pending`] or [`QueryCoordinator::run_pending`])
/// starts a single fetch with whatever the state is at that point, so a burst of
/// mutations costs one request.
///
/// Fetches are not cancelled. With `discard_stale_responses` off, whichever fetch
/// settles last overwrites the result; with it on, only the most recently started
/// fetch may apply its outcome.
#[derive(Debug, Clone)]
pub struct QueryCoordinator<T> {
    config: PaginationConfig,
    query: QueryState,
    lifecycle: FetchLifecycle<T>,
    pending: bool,
    generation: u64,
}

impl<T> QueryCoordinator<T> {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config,
            query: QueryState::new(config.initial_page_size),
            lifecycle: FetchLifecycle::default(),
            // Nothing loaded yet; the first scheduler step fetches the initial page.
            pending: true,
            generation: 0,
        }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn pagination(&self) -> PaginationState {
        self.query.pagination
    }

    pub fn sorting(&self) -> &SortingState {
        &self.query.sorting
    }

    pub fn column_filters(&self) -> &ColumnFiltersState {
        &self.query.column_filters
    }

    pub fn global_filter(&self) -> &str {
        &self.query.global_filter
    }

    pub fn data(&self) -> &[T] {
        &self.lifecycle.data
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error.as_deref()
    }

    pub fn total_records(&self) -> usize {
        self.lifecycle.total_records
    }

    pub fn total_pages(&self) -> usize {
        self.lifecycle.total_pages
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn request_params(&self) -> RequestParams {
        derive_request_params(&self.query)
    }

    pub fn set_page(&mut self, page_index: usize) {
        trace!(page_index, "set page");
        self.query.pagination.page_index = page_index;
        self.invalidate();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        trace!(page_size, "set page size");
        self.query.pagination = PaginationState::new(page_size);
        self.invalidate();
    }

    pub fn set_sorting(&mut self, sorting: SortingState) {
        trace!(columns = sorting.len(), "set sorting");
        self.query.sorting = sorting;
        self.invalidate();
    }

    pub fn set_column_filters(&mut self, column_filters: ColumnFiltersState) {
        trace!(filters = column_filters.len(), "set column filters");
        self.query.column_filters = column_filters;
        self.snap_to_first_page_on_filter();
        self.invalidate();
    }

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.query.global_filter = text.into();
        trace!(search = %self.query.global_filter, "set global filter");
        self.snap_to_first_page_on_filter();
        self.invalidate();
    }

    pub fn reset(&mut self) {
        debug!("reset query state");
        self.query = QueryState::new(self.config.initial_page_size);
        self.invalidate();
    }

    /// Marks the current parameters as needing a fetch.
    pub fn invalidate(&mut self) {
        self.pending = true;
    }

    /// Scheduler step: consumes the pending mark and starts at most one fetch.
    pub fn take_pending(&mut self) -> Option<FetchTicket> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        Some(self.begin_fetch())
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        let params = self.request_params();
        debug!(
            generation = self.generation,
            page = params.page,
            page_size = params.page_size,
            "fetch started"
        );
        self.lifecycle.start();
        FetchTicket::new(self.generation, params)
    }

    /// Applies the outcome of a started fetch. Returns false when the outcome was
    /// dropped as stale.
    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<PageResponse<T>, FetchError>,
    ) -> bool {
        if self.config.discard_stale_responses && ticket.generation() != self.generation {
            debug!(
                generation = ticket.generation(),
                latest = self.generation,
                "stale fetch result discarded"
            );
            return false;
        }

        match outcome {
            Ok(response) => {
                debug!(
                    generation = ticket.generation(),
                    rows = response.data.len(),
                    total_records = response.total_records,
                    "fetch succeeded"
                );
                self.lifecycle.succeed(response);
            }
            Err(err) => {
                warn!(generation = ticket.generation(), error = %err, "fetch failed");
                self.lifecycle.fail(err.to_string());
            }
        }
        true
    }

    pub async fn fetch<F>(&mut self, fetcher: &F)
    where
        F: PageFetcher<T>,
    {
        let ticket = self.begin_fetch();
        let outcome = fetcher.fetch_page(ticket.params().clone()).await;
        self.settle(ticket, outcome);
    }

    pub async fn refresh<F>(&mut self, fetcher: &F)
    where
        F: PageFetcher<T>,
    {
        self.fetch(fetcher).await;
    }

    /// Runs the scheduler step to completion. Returns whether a fetch happened.
    pub async fn run_pending<F>(&mut self, fetcher: &F) -> bool
    where
        F: PageFetcher<T>,
    {
        let Some(ticket) = self.take_pending() else {
            return false;
        };
        let outcome = fetcher.fetch_page(ticket.params().clone()).await;
        self.settle(ticket, outcome);
        true
    }

    fn snap_to_first_page_on_filter(&mut self) {
        if self.config.reset_on_filter_change && self.query.has_active_filter() {
            self.query.pagination.page_index = 0;
        }
    }
}

impl<T: Clone> QuerySnapshot<T> {
    pub fn of(coordinator: &QueryCoordinator<T>) -> Self {
        Self {
            data: coordinator.lifecycle.data.clone(),
            is_loading: coordinator.lifecycle.is_loading,
            error: coordinator.lifecycle.error.clone(),
            pagination: PaginationSnapshot {
                page_index: coordinator.query.pagination.page_index,
                page_size: coordinator.query.pagination.page_size,
                total_records: coordinator.lifecycle.total_records,
                page_count: coordinator.lifecycle.total_pages,
            },
            sorting: coordinator.query.sorting.clone(),
            column_filters: coordinator.query.column_filters.clone(),
            global_filter: coordinator.query.global_filter.clone(),
        }
    }
}

impl<T: Clone> QueryCoordinator<T> {
    pub fn snapshot(&self) -> QuerySnapshot<T> {
        QuerySnapshot::of(self)
    }
}
