use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownId {
    StatusFilter,
    PageSize,
    AuditPageSize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn dropdown_label(options: &[DropdownOption], selected: Option<&str>) -> String {
    selected
        .and_then(|value| options.iter().find(|opt| opt.value == value))
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| "(none)".to_string())
}

#[component]
pub fn DropdownSelect(
    id: DropdownId,
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: Option<String>,
    mut open_dropdown: Signal<Option<DropdownId>>,
    on_select: EventHandler<String>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let selected_label = dropdown_label(&options, selected.as_deref());

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |event| {
                    event.stop_propagation();
                    if open_dropdown() == Some(id) {
                        open_dropdown.set(None);
                    } else {
                        open_dropdown.set(Some(id));
                    }
                },
                "{selected_label}"
            }

            if is_open {
                div {
                    style: "position: absolute; left: 0; top: 100%; min-width: 160px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                    onclick: move |event| event.stop_propagation(),
                    {options.iter().map(|opt| {
                        let value = opt.value.clone();
                        let label = opt.label.clone();
                        let is_selected = selected.as_deref() == Some(value.as_str());
                        let background = if is_selected { "#eef4ff" } else { "transparent" };
                        rsx!(
                            div {
                                style: "padding: 8px 10px; cursor: pointer; background: {background};",
                                onclick: move |_| {
                                    on_select.call(value.clone());
                                    open_dropdown.set(None);
                                },
                                "{label}"
                            }
                        )
                    })}
                }
            }
        }
    }
}

pub fn page_size_options(sizes: &[usize]) -> Vec<DropdownOption> {
    sizes
        .iter()
        .map(|size| DropdownOption::new(size.to_string(), format!("{size} / page")))
        .collect()
}

pub fn table_header_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 6px; background: #f2f2f2; text-align: left; cursor: pointer;"
}

pub fn table_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 6px;"
}
