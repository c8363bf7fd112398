use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::query::{ColumnFilter, ColumnSort, PaginationState, QueryState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<&ColumnSort> for SortOrder {
    fn from(sort: &ColumnSort) -> Self {
        if sort.descending {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Parameters handed to the data source for one page request.
///
/// `page` is 1-based. Optional fields are left out of the serialized form
/// instead of being sent empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    pub page: usize,
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, Value>>,
}

impl RequestParams {
    pub fn page_index(&self) -> usize {
        self.page.saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub total_records: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl<T: Clone> PageResponse<T> {
    /// Cuts the requested page out of a fully loaded collection.
    pub fn from_slice(all: &[T], params: &RequestParams) -> Self {
        let page_size = params.page_size.max(1);
        let total_records = all.len();
        let start = params.page_index().saturating_mul(page_size).min(total_records);
        let end = start.saturating_add(page_size).min(total_records);

        Self {
            data: all[start..end].to_vec(),
            total_records,
            total_pages: total_records.div_ceil(page_size),
            current_page: params.page,
            page_size,
        }
    }
}

pub fn build_request_params(
    pagination: &PaginationState,
    sorting: &[ColumnSort],
    column_filters: &[ColumnFilter],
    global_filter: &str,
) -> RequestParams {
    // Single-column sort: anything past the first entry is dropped.
    let first_sort = sorting.first();

    let filters = if column_filters.is_empty() {
        None
    } else {
        let mut map = BTreeMap::new();
        for filter in column_filters {
            map.insert(filter.id.clone(), filter.value.clone());
        }
        Some(map)
    };

    RequestParams {
        page: pagination.page_index + 1,
        page_size: pagination.page_size,
        sort_by: first_sort.map(|sort| sort.column_id.clone()),
        sort_order: first_sort.map(SortOrder::from),
        search: (!global_filter.is_empty()).then(|| global_filter.to_string()),
        filters,
    }
}

pub fn derive_request_params(state: &QueryState) -> RequestParams {
    build_request_params(
        &state.pagination,
        &state.sorting,
        &state.column_filters,
        &state.global_filter,
    )
}
