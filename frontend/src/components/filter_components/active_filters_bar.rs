//! Applied filters as removable chips, with a "Clear all" action.

use common::active_filters::{FilterChip, build_chips};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use crate::components::filter_components::use_filters::use_filters;

#[component]
pub fn ActiveFiltersBar() -> Element {
    let mut filters = use_filters();
    let chips = use_memo(move || build_chips(&filters.state()));

    if chips.read().is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            id: "x-active-filters-bar",
            role: "region",
            "aria-label": "Active filters",
            style: "
                position: sticky;
                top: 0px;
                z-index: 30;
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 8px;
                padding: 8px 16px;
                background-color: rgba(245, 246, 248, 0.8);
                backdrop-filter: blur(6px);
                overflow-x: auto;
            ",
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 8px;
                    flex: 1 1 auto;
                    min-width: 0;
                ",
                for chip in chips() {
                    RemovableChip { key: "{chip.key}", chip: chip.clone() }
                }
            }
            button {
                style: "
                    cursor: pointer;
                    border: none;
                    background: none;
                    font-size: 14px;
                    color: rgb(75, 87, 112);
                    flex-shrink: 0;
                ",
                "aria-label": "Clear all filters",
                onclick: move |_| {
                    filters.clear_all();
                },
                "Clear all"
            }
        }
    }
}

#[component]
fn RemovableChip(chip: FilterChip) -> Element {
    let mut filters = use_filters();
    let remove = chip.remove.clone();
    let remove_on_key = chip.remove.clone();

    rsx! {
        button {
            style: "
                cursor: pointer;
                display: flex;
                align-items: center;
                gap: 4px;
                height: 28px;
                padding: 0px 10px;
                border: 1px solid rgba(0,0,0,0.2);
                border-radius: 1000px;
                background-color: white;
                font-size: 12px;
                white-space: nowrap;
                flex-shrink: 0;
            ",
            "aria-label": "Remove {chip.label}",
            onclick: move |_| {
                filters.update(remove.clone());
            },
            onkeydown: move |event: Event<KeyboardData>| {
                if event.key() == Key::Backspace || event.key() == Key::Delete {
                    event.prevent_default();
                    filters.update(remove_on_key.clone());
                }
            },
            span {
                style: "overflow: hidden; text-overflow: ellipsis;",
                "{chip.label}"
            }
            Icon { icon: MdClose, style: "width: 12px; height: 12px; opacity: 0.7;" }
        }
    }
}
