use std::ops::Range;

use tracing::trace;

use crate::config::PaginationConfig;
use crate::domain::entities::query::PaginationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalPagination {
    pub page_index: usize,
    pub page_size: usize,
    pub total_records: usize,
}

/// Page state over a collection that is already fully in memory.
///
/// The paginator never holds the collection. Callers pass it in whenever they
/// need the record count, so the count always reflects the live data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPaginator {
    state: PaginationState,
    reset_on_data_change: bool,
    seen_len: Option<usize>,
}

impl LocalPaginator {
    pub fn new(config: &PaginationConfig) -> Self {
        Self {
            state: PaginationState::new(config.initial_page_size),
            reset_on_data_change: config.reset_on_data_change,
            seen_len: None,
        }
    }

    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.state.page_index = page_index;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.state = PaginationState::new(page_size);
    }

    /// Records the current length of the source and snaps back to the first
    /// page if it changed.
    pub fn sync<T>(&mut self, source: &[T]) -> LocalPagination {
        let len = source.len();
        if self.reset_on_data_change && self.seen_len.is_some_and(|seen| seen != len) {
            trace!(from = ?self.seen_len, to = len, "source length changed, back to first page");
            self.state.page_index = 0;
        }
        self.seen_len = Some(len);
        self.pagination(source)
    }

    /// Page state for `source`. A length change not yet recorded by
    /// [`LocalPaginator::sync`] already reads as the first page here; `sync`
    /// makes that reset stick.
    pub fn pagination<T>(&self, source: &[T]) -> LocalPagination {
        LocalPagination {
            page_index: self.current_page_index(source.len()),
            page_size: self.state.page_size,
            total_records: source.len(),
        }
    }

    fn current_page_index(&self, len: usize) -> usize {
        if self.reset_on_data_change && self.seen_len.is_some_and(|seen| seen != len) {
            0
        } else {
            self.state.page_index
        }
    }

    pub fn page_count<T>(&self, source: &[T]) -> usize {
        source.len().div_ceil(self.state.page_size)
    }

    /// Index range of the current page, clamped to the collection.
    pub fn page_range<T>(&self, source: &[T]) -> Range<usize> {
        let len = source.len();
        let start = self
            .current_page_index(len)
            .saturating_mul(self.state.page_size)
            .min(len);
        let end = start.saturating_add(self.state.page_size).min(len);
        start..end
    }
}
