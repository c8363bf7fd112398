pub mod app;
pub mod config;
pub mod logging;

pub mod domain {
    pub mod entities {
        pub mod audit;
        pub mod lifecycle;
        pub mod query;
        pub mod request;
        pub mod vendor;
    }
}

pub mod usecase {
    pub mod ports {
        pub mod fetcher;
    }
    pub mod services {
        pub mod local_paginator;
        pub mod query_coordinator;
    }
}

pub mod infra {
    pub mod mock {
        pub mod audit_log;
        pub mod vendors;
    }
}

pub mod ui {
    pub mod components {
        pub mod dropdown;
    }
    pub mod hooks {
        pub mod server_pagination;
    }
    pub mod views {
        pub mod audit_log;
        pub mod vendor_table;
    }
}

pub use config::{AppConfig, PaginationConfig};
pub use domain::entities::query::{
    ColumnFilter, ColumnFiltersState, ColumnSort, PaginationState, QueryState, SortingState,
};
pub use domain::entities::request::{
    build_request_params, derive_request_params, PageResponse, RequestParams, SortOrder,
};
pub use usecase::ports::fetcher::{FetchError, PageFetcher};
pub use usecase::services::local_paginator::{LocalPagination, LocalPaginator};
pub use usecase::services::query_coordinator::{
    PaginationSnapshot, QueryCoordinator, QuerySnapshot,
};

#[cfg(test)]
mod tests;
