use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::PaginationConfig;
use crate::domain::entities::query::{ColumnFiltersState, SortingState};
use crate::usecase::ports::fetcher::PageFetcher;
use crate::usecase::services::query_coordinator::{QueryCoordinator, QuerySnapshot};

/// Handle returned by [`use_server_pagination`]. Copyable into event handlers.
pub struct ServerPagination<T: 'static, F: 'static> {
    coordinator: Signal<QueryCoordinator<T>>,
    fetcher: Signal<Rc<F>>,
}

impl<T: 'static, F: 'static> Clone for ServerPagination<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static, F: 'static> Copy for ServerPagination<T, F> {}

pub fn use_server_pagination<T, F>(
    config: PaginationConfig,
    make_fetcher: impl FnOnce() -> F,
) -> ServerPagination<T, F>
where
    T: 'static,
    F: PageFetcher<T> + 'static,
{
    let coordinator = use_signal(|| QueryCoordinator::new(config));
    let fetcher = use_signal(|| Rc::new(make_fetcher()));
    let pagination = ServerPagination {
        coordinator,
        fetcher,
    };
    use_hook(move || pagination.schedule());
    pagination
}

impl<T, F> ServerPagination<T, F>
where
    T: 'static,
    F: PageFetcher<T> + 'static,
{
    pub fn snapshot(&self) -> QuerySnapshot<T>
    where
        T: Clone,
    {
        self.coordinator.read().snapshot()
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.coordinator.write().set_page(page_index);
        self.schedule();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.coordinator.write().set_page_size(page_size);
        self.schedule();
    }

    pub fn set_sorting(&mut self, sorting: SortingState) {
        self.coordinator.write().set_sorting(sorting);
        self.schedule();
    }

    pub fn set_column_filters(&mut self, column_filters: ColumnFiltersState) {
        self.coordinator.write().set_column_filters(column_filters);
        self.schedule();
    }

    pub fn set_global_filter(&mut self, text: String) {
        self.coordinator.write().set_global_filter(text);
        self.schedule();
    }

    pub fn refresh(&mut self) {
        self.coordinator.write().invalidate();
        self.schedule();
    }

    pub fn reset(&mut self) {
        self.coordinator.write().reset();
        self.schedule();
    }

    // Every mutation spawns a step, but only the first step to run after a burst
    // finds the pending mark, so the burst is fetched once.
    fn schedule(&self) {
        let mut coordinator = self.coordinator;
        let fetcher = self.fetcher;
        spawn(async move {
            let Some(ticket) = coordinator.write().take_pending() else {
                return;
            };
            let fetcher = fetcher();
            let outcome = fetcher.fetch_page(ticket.params().clone()).await;
            coordinator.write().settle(ticket, outcome);
        });
    }
}
