use dioxus::prelude::*;

use crate::components::filter_components::active_filters_bar::ActiveFiltersBar;
use crate::components::filter_components::chip_row::ChipRow;

/// Filter header for the shop page. Needs a filter controller in context,
/// see [`use_filter_control_provider`](super::use_filters::use_filter_control_provider).
#[component]
pub fn CategoryFilter(#[props(default = true)] show_active_bar: bool) -> Element {
    rsx! {
        div {
            id: "x-category-filter",
            ChipRow {}
            if show_active_bar {
                ActiveFiltersBar {}
            }
        }
    }
}
