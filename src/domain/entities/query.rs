use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }
}

/// One sort request as a table header produces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub column_id: String,
    pub descending: bool,
}

impl ColumnSort {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: false,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: true,
        }
    }
}

pub type SortingState = Vec<ColumnSort>;

/// A filter value is opaque to the query layer; the data source decides what it means.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    pub id: String,
    pub value: Value,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

pub type ColumnFiltersState = Vec<ColumnFilter>;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub pagination: PaginationState,
    pub sorting: SortingState,
    pub column_filters: ColumnFiltersState,
    pub global_filter: String,
}

impl QueryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            pagination: PaginationState::new(page_size),
            sorting: Vec::new(),
            column_filters: Vec::new(),
            global_filter: String::new(),
        }
    }

    pub fn has_active_filter(&self) -> bool {
        !self.column_filters.is_empty() || !self.global_filter.is_empty()
    }
}
