use std::cell::Cell;
use std::fs;
use std::future::ready;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

use crate::config::{
    ensure_webview_data_dir, parse_flag, PaginationConfig, DISCARD_STALE_ENV, PAGE_SIZE_ENV,
    RESET_ON_FILTER_CHANGE_ENV,
};
use crate::domain::entities::query::{ColumnFilter, ColumnSort, PaginationState, QueryState};
use crate::domain::entities::request::{
    build_request_params, derive_request_params, PageResponse, RequestParams, SortOrder,
};
use crate::domain::entities::vendor::{Vendor, VendorStatus};
use crate::infra::mock::audit_log::{next_audit_entry, seed_audit_log};
use crate::infra::mock::vendors::{seed_vendors, MockVendorApi};
use crate::ui::views::vendor_table::{next_sorting, with_status_filter, NONE_OPTION_VALUE};
use crate::usecase::ports::fetcher::{FetchError, FETCH_FAILED_FALLBACK};
use crate::usecase::services::local_paginator::LocalPaginator;
use crate::usecase::services::query_coordinator::QueryCoordinator;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("promano-{prefix}-{nanos}"))
}

fn numbers(len: u32) -> Vec<u32> {
    (1..=len).collect()
}

fn page_of(items: &[u32], params: &RequestParams) -> Result<PageResponse<u32>, FetchError> {
    Ok(PageResponse::from_slice(items, params))
}

fn state_at_page(page_index: usize) -> QueryState {
    let mut state = QueryState::new(10);
    state.pagination.page_index = page_index;
    state
}

#[test]
fn derived_page_is_one_based() {
    assert_eq!(derive_request_params(&state_at_page(0)).page, 1);
    assert_eq!(derive_request_params(&state_at_page(4)).page, 5);
}

#[test]
fn empty_global_filter_omits_search() {
    let mut state = QueryState::new(10);
    assert_eq!(derive_request_params(&state).search, None);

    state.global_filter = "abc".to_string();
    assert_eq!(
        derive_request_params(&state).search,
        Some("abc".to_string())
    );
}

#[test]
fn column_filters_become_one_entry_per_id() {
    let mut state = QueryState::new(10);
    assert_eq!(derive_request_params(&state).filters, None);

    state.column_filters = vec![
        ColumnFilter::new("status", "active"),
        ColumnFilter::new("category", json!(["Concrete", "Timber"])),
    ];
    let filters = derive_request_params(&state)
        .filters
        .expect("filters should be present");

    assert_eq!(filters.len(), 2);
    assert_eq!(filters.get("status"), Some(&json!("active")));
    assert_eq!(filters.get("category"), Some(&json!(["Concrete", "Timber"])));
}

#[test]
fn duplicate_filter_ids_keep_last_value() {
    let mut state = QueryState::new(10);
    state.column_filters = vec![
        ColumnFilter::new("status", "active"),
        ColumnFilter::new("status", "pending"),
    ];
    let filters = derive_request_params(&state)
        .filters
        .expect("filters should be present");

    assert_eq!(filters.len(), 1);
    assert_eq!(filters.get("status"), Some(&json!("pending")));
}

#[test]
fn only_first_sort_entry_is_used() {
    let mut state = QueryState::new(10);
    let params = derive_request_params(&state);
    assert_eq!(params.sort_by, None);
    assert_eq!(params.sort_order, None);

    state.sorting = vec![ColumnSort::desc("name"), ColumnSort::asc("rating")];
    let params = derive_request_params(&state);
    assert_eq!(params.sort_by.as_deref(), Some("name"));
    assert_eq!(params.sort_order, Some(SortOrder::Desc));
}

#[test]
fn serialized_params_leave_out_unset_fields() {
    let params = derive_request_params(&QueryState::new(25));
    let value = serde_json::to_value(&params).expect("params should serialize");

    assert_eq!(value, json!({ "page": 1, "pageSize": 25 }));
}

#[test]
fn serialized_params_use_camel_case_names() {
    let pagination = PaginationState {
        page_index: 2,
        page_size: 10,
    };
    let params = build_request_params(
        &pagination,
        &[ColumnSort::asc("onboarded")],
        &[ColumnFilter::new("status", "active")],
        "steel",
    );
    let value = serde_json::to_value(&params).expect("params should serialize");

    assert_eq!(
        value,
        json!({
            "page": 3,
            "pageSize": 10,
            "sortBy": "onboarded",
            "sortOrder": "asc",
            "search": "steel",
            "filters": { "status": "active" }
        })
    );
}

#[test]
fn page_response_slices_requested_page() {
    let items = numbers(47);
    let params = build_request_params(
        &PaginationState {
            page_index: 4,
            page_size: 10,
        },
        &[],
        &[],
        "",
    );

    let response = PageResponse::from_slice(&items, &params);

    assert_eq!(response.data, vec![41, 42, 43, 44, 45, 46, 47]);
    assert_eq!(response.total_records, 47);
    assert_eq!(response.total_pages, 5);
    assert_eq!(response.current_page, 5);
}

#[test]
fn page_response_past_the_end_is_empty() {
    let items = numbers(5);
    let params = build_request_params(
        &PaginationState {
            page_index: 3,
            page_size: 10,
        },
        &[],
        &[],
        "",
    );

    let response = PageResponse::from_slice(&items, &params);

    assert!(response.data.is_empty());
    assert_eq!(response.total_records, 5);
    assert_eq!(response.total_pages, 1);
}

#[test]
fn new_coordinator_uses_configured_page_size_and_is_pending() {
    let coordinator =
        QueryCoordinator::<u32>::new(PaginationConfig::default().with_initial_page_size(20));

    assert!(coordinator.has_pending());
    assert_eq!(coordinator.pagination().page_index, 0);
    assert_eq!(coordinator.pagination().page_size, 20);
    assert!(!coordinator.is_loading());
    assert_eq!(coordinator.error(), None);
}

#[test]
fn set_page_size_returns_to_first_page() {
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    coordinator.set_page(7);

    coordinator.set_page_size(25);

    assert_eq!(coordinator.pagination().page_index, 0);
    assert_eq!(coordinator.pagination().page_size, 25);
}

#[test]
fn zero_page_size_is_clamped_to_one() {
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());

    coordinator.set_page_size(0);

    assert_eq!(coordinator.pagination().page_size, 1);
}

#[test]
fn global_filter_snaps_back_to_first_page() {
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    coordinator.set_page(3);

    coordinator.set_global_filter("x");

    assert_eq!(coordinator.request_params().page, 1);
    assert_eq!(coordinator.request_params().search.as_deref(), Some("x"));
}

#[test]
fn column_filter_snaps_back_to_first_page() {
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    coordinator.set_page(2);

    coordinator.set_column_filters(vec![ColumnFilter::new("status", "active")]);

    assert_eq!(coordinator.pagination().page_index, 0);
}

#[test]
fn filter_change_keeps_page_when_reset_disabled() {
    let config = PaginationConfig::default().with_reset_on_filter_change(false);
    let mut coordinator = QueryCoordinator::<u32>::new(config);
    coordinator.set_page(3);

    coordinator.set_global_filter("x");

    assert_eq!(coordinator.request_params().page, 4);
}

#[test]
fn clearing_every_filter_keeps_current_page() {
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    coordinator.set_page(3);

    coordinator.set_global_filter("");
    coordinator.set_column_filters(Vec::new());

    assert_eq!(coordinator.pagination().page_index, 3);
}

#[test]
fn sorting_change_keeps_current_page() {
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    coordinator.set_page(2);

    coordinator.set_sorting(vec![ColumnSort::asc("name")]);

    assert_eq!(coordinator.pagination().page_index, 2);
    assert_eq!(coordinator.request_params().sort_by.as_deref(), Some("name"));
}

#[test]
fn reset_restores_initial_query() {
    let config = PaginationConfig::default().with_initial_page_size(15);
    let mut coordinator = QueryCoordinator::<u32>::new(config);
    coordinator.set_page_size(50);
    coordinator.set_page(4);
    coordinator.set_sorting(vec![ColumnSort::desc("rating")]);
    coordinator.set_column_filters(vec![ColumnFilter::new("status", "pending")]);
    coordinator.set_global_filter("steel");

    coordinator.reset();

    assert_eq!(coordinator.pagination().page_index, 0);
    assert_eq!(coordinator.pagination().page_size, 15);
    assert!(coordinator.sorting().is_empty());
    assert!(coordinator.column_filters().is_empty());
    assert_eq!(coordinator.global_filter(), "");
}

#[test]
fn burst_of_mutations_is_fetched_once_with_final_state() {
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    let _initial = coordinator.take_pending().expect("initial fetch should be pending");

    coordinator.set_sorting(vec![ColumnSort::asc("name")]);
    coordinator.set_page(2);
    coordinator.set_page_size(5);

    let ticket = coordinator
        .take_pending()
        .expect("mutations should leave a pending fetch");
    assert_eq!(ticket.params().page, 1);
    assert_eq!(ticket.params().page_size, 5);
    assert_eq!(ticket.params().sort_by.as_deref(), Some("name"));
    assert!(coordinator.take_pending().is_none());
}

#[test]
fn begin_fetch_sets_loading_and_clears_error() {
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    let ticket = coordinator.begin_fetch();
    coordinator.settle(ticket, Err(FetchError::message("boom")));
    assert_eq!(coordinator.error(), Some("boom"));

    let _ticket = coordinator.begin_fetch();

    assert!(coordinator.is_loading());
    assert_eq!(coordinator.error(), None);
}

#[tokio::test]
async fn successful_fetch_populates_data_and_totals() {
    let items = numbers(47);
    let fetcher = |params: RequestParams| ready(page_of(&items, &params));
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    coordinator.set_page(1);

    coordinator.fetch(&fetcher).await;

    assert!(!coordinator.is_loading());
    assert_eq!(coordinator.error(), None);
    assert_eq!(coordinator.data(), (11..=20).collect::<Vec<u32>>().as_slice());
    assert_eq!(coordinator.total_records(), 47);
    assert_eq!(coordinator.total_pages(), 5);
}

#[tokio::test]
async fn failed_fetch_clears_results_and_next_success_clears_error() {
    let items = numbers(12);
    let good = |params: RequestParams| ready(page_of(&items, &params));
    let bad = |_params: RequestParams| {
        ready(Err::<PageResponse<u32>, _>(FetchError::message(
            "backend unavailable",
        )))
    };
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    coordinator.fetch(&good).await;
    assert_eq!(coordinator.data().len(), 10);

    coordinator.fetch(&bad).await;

    assert!(!coordinator.is_loading());
    assert_eq!(coordinator.error(), Some("backend unavailable"));
    assert!(coordinator.data().is_empty());
    assert_eq!(coordinator.total_records(), 0);
    assert_eq!(coordinator.total_pages(), 0);

    coordinator.refresh(&good).await;

    assert_eq!(coordinator.error(), None);
    assert_eq!(coordinator.total_records(), 12);
}

#[tokio::test]
async fn failure_without_message_uses_fallback_text() {
    let fetcher =
        |_params: RequestParams| ready(Err::<PageResponse<u32>, _>(FetchError::message("  ")));
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());

    coordinator.fetch(&fetcher).await;

    assert_eq!(coordinator.error(), Some(FETCH_FAILED_FALLBACK));
}

#[tokio::test]
async fn blank_message_variant_uses_fallback_text() {
    let fetcher = |_params: RequestParams| {
        ready(Err::<PageResponse<u32>, _>(FetchError::Message(String::new())))
    };
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());

    coordinator.fetch(&fetcher).await;

    assert_eq!(coordinator.error(), Some(FETCH_FAILED_FALLBACK));
    assert_eq!(
        FetchError::Message("   ".to_string()).to_string(),
        FETCH_FAILED_FALLBACK
    );
}

#[tokio::test]
async fn run_pending_fetches_only_when_something_changed() {
    let items = numbers(30);
    let calls = Cell::new(0_usize);
    let fetcher = |params: RequestParams| {
        calls.set(calls.get() + 1);
        ready(page_of(&items, &params))
    };
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());

    assert!(coordinator.run_pending(&fetcher).await);
    assert!(!coordinator.run_pending(&fetcher).await);

    coordinator.set_global_filter("");
    coordinator.set_page(2);
    assert!(coordinator.run_pending(&fetcher).await);

    assert_eq!(calls.get(), 2);
    assert_eq!(coordinator.data().first(), Some(&21));
}

#[test]
fn overlapping_fetches_let_last_settled_win_by_default() {
    let items = numbers(40);
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    let first = coordinator.begin_fetch();
    coordinator.set_page(1);
    let second = coordinator.begin_fetch();
    let first_outcome = page_of(&items, first.params());
    let second_outcome = page_of(&items, second.params());

    assert!(coordinator.settle(second, second_outcome));
    assert!(coordinator.settle(first, first_outcome));

    assert_eq!(coordinator.data().first(), Some(&1));
    assert_eq!(coordinator.pagination().page_index, 1);
}

#[test]
fn stale_fetch_is_dropped_when_guard_enabled() {
    let items = numbers(40);
    let config = PaginationConfig::default().with_discard_stale_responses(true);
    let mut coordinator = QueryCoordinator::<u32>::new(config);
    let first = coordinator.begin_fetch();
    coordinator.set_page(1);
    let second = coordinator.begin_fetch();
    let first_outcome = page_of(&items, first.params());
    let second_outcome = page_of(&items, second.params());

    assert!(coordinator.settle(second, second_outcome));
    assert!(!coordinator.settle(first, first_outcome));

    assert_eq!(coordinator.data().first(), Some(&11));
    assert!(!coordinator.is_loading());
}

#[test]
fn stale_guard_keeps_loading_until_latest_settles() {
    let items = numbers(40);
    let config = PaginationConfig::default().with_discard_stale_responses(true);
    let mut coordinator = QueryCoordinator::<u32>::new(config);
    let first = coordinator.begin_fetch();
    let _second = coordinator.begin_fetch();
    let outcome = page_of(&items, first.params());

    assert!(!coordinator.settle(first, outcome));

    assert!(coordinator.is_loading());
    assert!(coordinator.data().is_empty());
}

#[tokio::test]
async fn snapshot_reports_query_and_result() {
    let items = numbers(23);
    let fetcher = |params: RequestParams| ready(page_of(&items, &params));
    let mut coordinator = QueryCoordinator::<u32>::new(PaginationConfig::default());
    coordinator.set_sorting(vec![ColumnSort::asc("id")]);
    coordinator.set_global_filter("abc");
    coordinator.run_pending(&fetcher).await;

    let snapshot = coordinator.snapshot();

    assert_eq!(snapshot.data.len(), 10);
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.pagination.page_index, 0);
    assert_eq!(snapshot.pagination.page_size, 10);
    assert_eq!(snapshot.pagination.total_records, 23);
    assert_eq!(snapshot.pagination.page_count, 3);
    assert_eq!(snapshot.sorting, vec![ColumnSort::asc("id")]);
    assert_eq!(snapshot.global_filter, "abc");
}

#[test]
fn local_paginator_tracks_live_collection_length() {
    let mut records = seed_audit_log(47);
    let mut paginator = LocalPaginator::new(&PaginationConfig::default());

    let view = paginator.sync(&records);
    assert_eq!(view.total_records, 47);
    assert_eq!(view.page_size, 10);
    assert_eq!(paginator.page_count(&records), 5);

    let entry = next_audit_entry(&records);
    records.push(entry);

    assert_eq!(paginator.pagination(&records).total_records, 48);
}

#[test]
fn local_paginator_returns_to_first_page_when_length_changes() {
    let mut records = numbers(47);
    let mut paginator = LocalPaginator::new(&PaginationConfig::default());
    paginator.sync(&records);
    paginator.set_page(3);

    assert_eq!(paginator.sync(&records).page_index, 3);

    records.truncate(30);
    assert_eq!(paginator.sync(&records).page_index, 0);
}

#[test]
fn local_paginator_reads_first_page_before_sync_records_new_length() {
    let mut records = numbers(47);
    let mut paginator = LocalPaginator::new(&PaginationConfig::default());
    paginator.sync(&records);
    paginator.set_page(3);

    records.truncate(30);

    let view = paginator.pagination(&records);
    assert_eq!(view.page_index, 0);
    assert_eq!(view.total_records, 30);
    assert_eq!(paginator.page_range(&records), 0..10);

    assert_eq!(paginator.sync(&records).page_index, 0);
    assert_eq!(paginator.page_index(), 0);
}

#[test]
fn local_paginator_keeps_page_when_reset_on_data_change_disabled() {
    let mut records = numbers(47);
    let config = PaginationConfig::default().with_reset_on_data_change(false);
    let mut paginator = LocalPaginator::new(&config);
    paginator.sync(&records);
    paginator.set_page(3);

    records.push(48);

    assert_eq!(paginator.sync(&records).page_index, 3);
}

#[test]
fn local_paginator_page_size_change_returns_to_first_page() {
    let records = numbers(47);
    let mut paginator = LocalPaginator::new(&PaginationConfig::default());
    paginator.set_page(2);

    paginator.set_page_size(25);

    assert_eq!(paginator.page_index(), 0);
    assert_eq!(paginator.page_size(), 25);
    assert_eq!(paginator.page_count(&records), 2);
}

#[test]
fn local_paginator_page_range_is_clamped() {
    let records = numbers(47);
    let mut paginator = LocalPaginator::new(&PaginationConfig::default());

    paginator.set_page(4);
    assert_eq!(paginator.page_range(&records), 40..47);

    paginator.set_page(9);
    assert_eq!(paginator.page_range(&records), 47..47);
}

#[test]
fn pagination_config_defaults() {
    let config = PaginationConfig::default();

    assert_eq!(config.initial_page_size, 10);
    assert!(config.reset_on_data_change);
    assert!(config.reset_on_filter_change);
    assert!(!config.discard_stale_responses);
}

#[test]
fn pagination_config_reads_overrides() {
    let config = PaginationConfig::default()
        .apply_overrides(|name| match name {
            PAGE_SIZE_ENV => Some("25".to_string()),
            RESET_ON_FILTER_CHANGE_ENV => Some("off".to_string()),
            DISCARD_STALE_ENV => Some("YES".to_string()),
            _ => None,
        })
        .expect("overrides should parse");

    assert_eq!(config.initial_page_size, 25);
    assert!(!config.reset_on_filter_change);
    assert!(config.reset_on_data_change);
    assert!(config.discard_stale_responses);
}

#[test]
fn pagination_config_rejects_bad_page_size() {
    let zero = PaginationConfig::default()
        .apply_overrides(|name| (name == PAGE_SIZE_ENV).then(|| "0".to_string()));
    let text = PaginationConfig::default()
        .apply_overrides(|name| (name == PAGE_SIZE_ENV).then(|| "ten".to_string()));

    assert!(zero.is_err());
    let err = text.expect_err("non-numeric page size should fail");
    assert!(err.to_string().contains(PAGE_SIZE_ENV));
}

#[test]
fn parse_flag_rejects_unknown_words() {
    assert!(parse_flag("FLAG", "maybe").is_err());
    assert!(parse_flag("FLAG", " 1 ").expect("should parse"));
}

#[test]
fn ensure_webview_data_dir_creates_webview2_subdir() {
    let temp_dir = unique_test_dir("webview");

    let created = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

    assert_eq!(created, temp_dir.join("webview2"));
    assert!(created.is_dir());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn mock_vendor_api_filters_by_search_and_status() {
    let api = MockVendorApi::seeded();
    let params = build_request_params(
        &PaginationState::new(100),
        &[],
        &[ColumnFilter::new("status", "Active")],
        "electrical",
    );

    let response = api.query(&params).expect("query should succeed");

    assert!(!response.data.is_empty());
    assert_eq!(response.total_records, response.data.len());
    for vendor in &response.data {
        assert_eq!(vendor.status, VendorStatus::Active);
        assert!(vendor.category.eq_ignore_ascii_case("electrical"));
    }
}

#[test]
fn mock_vendor_api_sorts_descending() {
    let api = MockVendorApi::seeded();
    let params = build_request_params(
        &PaginationState::new(100),
        &[ColumnSort::desc("rating")],
        &[],
        "",
    );

    let response = api.query(&params).expect("query should succeed");

    assert_eq!(response.total_records, seed_vendors().len());
    for pair in response.data.windows(2) {
        assert!(pair[0].rating >= pair[1].rating);
    }
}

#[tokio::test]
async fn unknown_sort_column_surfaces_as_coordinator_error() {
    let api = MockVendorApi::seeded();
    let mut coordinator = QueryCoordinator::<Vendor>::new(PaginationConfig::default());
    coordinator.set_sorting(vec![ColumnSort::asc("budget")]);

    coordinator.run_pending(&api).await;

    assert_eq!(coordinator.error(), Some("unknown sort column: budget"));
    assert!(coordinator.data().is_empty());
}

#[tokio::test]
async fn vendor_directory_pages_through_coordinator() {
    let api = MockVendorApi::seeded();
    let mut coordinator = QueryCoordinator::<Vendor>::new(PaginationConfig::default());
    coordinator.run_pending(&api).await;
    let total = api.vendors().len();

    coordinator.set_page(coordinator.total_pages() - 1);
    coordinator.run_pending(&api).await;

    assert_eq!(coordinator.total_records(), total);
    assert_eq!(coordinator.data().len(), total - (coordinator.total_pages() - 1) * 10);
}

#[test]
fn header_clicks_cycle_sort_direction() {
    let unsorted = Vec::new();
    let ascending = next_sorting(&unsorted, "name");
    let descending = next_sorting(&ascending, "name");
    let cleared = next_sorting(&descending, "name");
    let other = next_sorting(&descending, "rating");

    assert_eq!(ascending, vec![ColumnSort::asc("name")]);
    assert_eq!(descending, vec![ColumnSort::desc("name")]);
    assert!(cleared.is_empty());
    assert_eq!(other, vec![ColumnSort::asc("rating")]);
}

#[test]
fn status_filter_selection_replaces_previous_status() {
    let current = vec![
        ColumnFilter::new("category", "Concrete"),
        ColumnFilter::new("status", "active"),
    ];

    let next = with_status_filter(&current, "pending");
    let cleared = with_status_filter(&next, NONE_OPTION_VALUE);

    assert_eq!(
        next,
        vec![
            ColumnFilter::new("category", "Concrete"),
            ColumnFilter::new("status", "pending"),
        ]
    );
    assert_eq!(cleared, vec![ColumnFilter::new("category", "Concrete")]);
}
