use dioxus::prelude::*;

use crate::config::PaginationConfig;
use crate::ui::components::dropdown::DropdownId;
use crate::ui::views::audit_log::AuditLog;
use crate::ui::views::vendor_table::VendorTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppTab {
    Vendors,
    AuditLog,
}

impl AppTab {
    pub fn label(self) -> &'static str {
        match self {
            AppTab::Vendors => "Procurement · Vendors",
            AppTab::AuditLog => "Audit log",
        }
    }
}

#[component]
pub fn App(config: PaginationConfig) -> Element {
    let mut active_tab = use_signal(|| AppTab::Vendors);
    let mut open_dropdown = use_context_provider(|| Signal::new(None::<DropdownId>));

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px;",
            onclick: move |_| open_dropdown.set(None),
            nav {
                style: "display: flex; gap: 12px; align-items: center; padding: 8px 0; border-bottom: 1px solid #ddd;",
                strong { "ProMano" }
                for tab in [AppTab::Vendors, AppTab::AuditLog] {
                    button {
                        style: if active_tab() == tab { "font-weight: bold;" } else { "" },
                        onclick: move |_| active_tab.set(tab),
                        "{tab.label()}"
                    }
                }
            }

            {match active_tab() {
                AppTab::Vendors => rsx! { VendorTable { config } },
                AppTab::AuditLog => rsx! { AuditLog { config } },
            }}
        }
    }
}

/// Launch root; reads the pagination settings provided by the launcher.
#[component]
pub fn Root() -> Element {
    let config = use_context::<PaginationConfig>();
    rsx! { App { config } }
}
