use dioxus::prelude::*;

use crate::config::PaginationConfig;
use crate::domain::entities::audit::AuditEntry;
use crate::infra::mock::audit_log::{next_audit_entry, seed_audit_log};
use crate::ui::components::dropdown::{
    page_size_options, table_cell_style, table_header_cell_style, DropdownId, DropdownSelect,
};
use crate::ui::views::vendor_table::PAGE_SIZES;
use crate::usecase::services::local_paginator::LocalPaginator;

pub const SEED_AUDIT_ENTRIES: usize = 47;

#[component]
pub fn AuditLog(config: PaginationConfig) -> Element {
    let mut entries = use_signal(|| seed_audit_log(SEED_AUDIT_ENTRIES));
    let mut paginator = use_signal(|| LocalPaginator::new(&config));
    let open_dropdown = use_context::<Signal<Option<DropdownId>>>();

    use_hook(move || {
        paginator.write().sync(entries.peek().as_slice());
    });

    let (view, page_count, visible) = {
        let log = entries.read();
        let log = log.as_slice();
        let pager = paginator.read();
        let visible: Vec<AuditEntry> = log[pager.page_range(log)].to_vec();
        let view = pager.pagination(log);
        let page_count = pager.page_count(log).max(1);
        (view, page_count, visible)
    };
    let current_page = view.page_index + 1;
    let total_records = view.total_records;

    rsx! {
        div {
            div {
                style: "display: flex; gap: 12px; align-items: center; margin: 12px 0;",
                DropdownSelect {
                    id: DropdownId::AuditPageSize,
                    label: "Rows",
                    options: page_size_options(&PAGE_SIZES),
                    selected: Some(view.page_size.to_string()),
                    open_dropdown: open_dropdown,
                    on_select: move |value: String| {
                        if let Ok(size) = value.parse::<usize>() {
                            paginator.write().set_page_size(size);
                        }
                    },
                }
                button {
                    onclick: move |_| {
                        let entry = next_audit_entry(entries.read().as_slice());
                        entries.write().push(entry);
                        paginator.write().sync(entries.read().as_slice());
                    },
                    "Record event"
                }
            }

            table { style: "border-collapse: collapse; width: 100%; border: 1px solid #bbb;",
                thead {
                    tr {
                        th { style: "{table_header_cell_style()}", "Date" }
                        th { style: "{table_header_cell_style()}", "Actor" }
                        th { style: "{table_header_cell_style()}", "Action" }
                        th { style: "{table_header_cell_style()}", "Target" }
                    }
                }
                tbody {
                    for entry in visible.iter() {
                        tr {
                            td { style: "{table_cell_style()}", "{entry.at}" }
                            td { style: "{table_cell_style()}", "{entry.actor}" }
                            td { style: "{table_cell_style()}", "{entry.action}" }
                            td { style: "{table_cell_style()}", "{entry.target}" }
                        }
                    }
                }
            }

            div { style: "display: flex; gap: 12px; align-items: center; margin-top: 8px;",
                button {
                    disabled: view.page_index == 0,
                    onclick: move |_| paginator.write().set_page(view.page_index.saturating_sub(1)),
                    "Previous"
                }
                span { "Page {current_page} of {page_count} · {total_records} entries" }
                button {
                    disabled: current_page >= page_count,
                    onclick: move |_| paginator.write().set_page(view.page_index + 1),
                    "Next"
                }
            }
        }
    }
}
