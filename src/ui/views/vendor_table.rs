use dioxus::prelude::*;

use crate::config::PaginationConfig;
use crate::domain::entities::query::{ColumnFilter, ColumnFiltersState, ColumnSort, SortingState};
use crate::domain::entities::vendor::Vendor;
use crate::infra::mock::vendors::MockVendorApi;
use crate::ui::components::dropdown::{
    page_size_options, table_cell_style, table_header_cell_style, DropdownId, DropdownOption,
    DropdownSelect,
};
use crate::ui::hooks::server_pagination::use_server_pagination;

pub const NONE_OPTION_VALUE: &str = "__none__";
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

const VENDOR_COLUMNS: [(&str, &str); 5] = [
    ("name", "Vendor"),
    ("category", "Category"),
    ("status", "Status"),
    ("rating", "Rating"),
    ("onboarded", "Onboarded"),
];

/// Header click cycle: unsorted, ascending, descending, unsorted.
pub fn next_sorting(current: &SortingState, column_id: &str) -> SortingState {
    match current.first() {
        Some(sort) if sort.column_id == column_id && !sort.descending => {
            vec![ColumnSort::desc(column_id)]
        }
        Some(sort) if sort.column_id == column_id => Vec::new(),
        _ => vec![ColumnSort::asc(column_id)],
    }
}

pub fn sort_indicator(sorting: &SortingState, column_id: &str) -> &'static str {
    match sorting.first() {
        Some(sort) if sort.column_id == column_id && sort.descending => " ▼",
        Some(sort) if sort.column_id == column_id => " ▲",
        _ => "",
    }
}

/// Replaces the status filter while keeping filters on other columns.
pub fn with_status_filter(current: &ColumnFiltersState, value: &str) -> ColumnFiltersState {
    let mut next: ColumnFiltersState = current
        .iter()
        .filter(|filter| filter.id != "status")
        .cloned()
        .collect();
    if value != NONE_OPTION_VALUE && !value.is_empty() {
        next.push(ColumnFilter::new("status", value));
    }
    next
}

fn status_filter_value(filters: &ColumnFiltersState) -> String {
    filters
        .iter()
        .find(|filter| filter.id == "status")
        .and_then(|filter| filter.value.as_str())
        .unwrap_or(NONE_OPTION_VALUE)
        .to_string()
}

fn vendor_cell(vendor: &Vendor, column_id: &str) -> String {
    match column_id {
        "name" => vendor.name.clone(),
        "category" => vendor.category.clone(),
        "status" => vendor.status.as_str().to_string(),
        "rating" => format!("{:.1}", vendor.rating),
        "onboarded" => vendor.onboarded.format("%Y-%m-%d").to_string(),
        _ => String::new(),
    }
}

#[component]
pub fn VendorTable(config: PaginationConfig) -> Element {
    let mut pagination =
        use_server_pagination::<Vendor, MockVendorApi>(config, MockVendorApi::seeded);
    let open_dropdown = use_context::<Signal<Option<DropdownId>>>();
    let mut search_text = use_signal(String::new);

    let snapshot = pagination.snapshot();
    let page = snapshot.pagination;
    let page_count = page.page_count.max(1);
    let current_page = page.page_index + 1;
    let total_records = page.total_records;
    let sorting = snapshot.sorting.clone();
    let filters = snapshot.column_filters.clone();
    let status_options = vec![
        DropdownOption::new(NONE_OPTION_VALUE, "All"),
        DropdownOption::new("active", "Active"),
        DropdownOption::new("pending", "Pending"),
        DropdownOption::new("suspended", "Suspended"),
    ];

    rsx! {
        div {
            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; margin: 12px 0;",
                input {
                    placeholder: "Search vendors",
                    value: search_text(),
                    oninput: move |event| search_text.set(event.value()),
                    onkeydown: move |event| {
                        if event.key() == Key::Enter {
                            pagination.set_global_filter(search_text());
                        }
                    },
                }
                button {
                    onclick: move |_| pagination.set_global_filter(search_text()),
                    "Search"
                }
                DropdownSelect {
                    id: DropdownId::StatusFilter,
                    label: "Status",
                    options: status_options,
                    selected: Some(status_filter_value(&filters)),
                    open_dropdown: open_dropdown,
                    on_select: {
                        let filters = filters.clone();
                        move |value: String| {
                            pagination.set_column_filters(with_status_filter(&filters, &value));
                        }
                    },
                }
                DropdownSelect {
                    id: DropdownId::PageSize,
                    label: "Rows",
                    options: page_size_options(&PAGE_SIZES),
                    selected: Some(page.page_size.to_string()),
                    open_dropdown: open_dropdown,
                    on_select: move |value: String| {
                        if let Ok(size) = value.parse::<usize>() {
                            pagination.set_page_size(size);
                        }
                    },
                }
                button {
                    disabled: snapshot.is_loading,
                    onclick: move |_| pagination.refresh(),
                    "Refresh"
                }
                button {
                    onclick: move |_| {
                        search_text.set(String::new());
                        pagination.reset();
                    },
                    "Reset"
                }
            }

            if let Some(error) = snapshot.error.clone() {
                div { style: "padding: 8px; color: #b00020; border: 1px solid #f3c2c8; background: #fff5f6;",
                    "{error}"
                }
            } else {
                table { style: "border-collapse: collapse; width: 100%; border: 1px solid #bbb;",
                    thead {
                        tr {
                            for (column_id, title) in VENDOR_COLUMNS {
                                th {
                                    style: "{table_header_cell_style()}",
                                    onclick: {
                                        let sorting = sorting.clone();
                                        move |_| pagination.set_sorting(next_sorting(&sorting, column_id))
                                    },
                                    "{title}{sort_indicator(&sorting, column_id)}"
                                }
                            }
                        }
                    }
                    tbody {
                        if snapshot.is_loading && snapshot.data.is_empty() {
                            tr {
                                td { style: "{table_cell_style()}", colspan: VENDOR_COLUMNS.len(), "Loading…" }
                            }
                        } else if snapshot.data.is_empty() {
                            tr {
                                td { style: "{table_cell_style()}", colspan: VENDOR_COLUMNS.len(), "No vendors match" }
                            }
                        } else {
                            for vendor in snapshot.data.iter() {
                                tr {
                                    for (column_id, _) in VENDOR_COLUMNS {
                                        td { style: "{table_cell_style()}", "{vendor_cell(vendor, column_id)}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div { style: "display: flex; gap: 12px; align-items: center; margin-top: 8px;",
                button {
                    disabled: page.page_index == 0,
                    onclick: move |_| pagination.set_page(page.page_index.saturating_sub(1)),
                    "Previous"
                }
                span { "Page {current_page} of {page_count} · {total_records} vendors" }
                button {
                    disabled: page.page_index + 1 >= page_count,
                    onclick: move |_| pagination.set_page(page.page_index + 1),
                    "Next"
                }
            }
        }
    }
}
