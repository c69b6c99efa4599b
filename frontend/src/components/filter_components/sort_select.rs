//! Result ordering select. Writes `sort` through the filter controller.

use common::filter_patch::{FilterPatch, Patch};
use common::filter_types::{SORT_OPTIONS, SortKey};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::components::filter_components::use_filters::use_filters;

#[component]
pub fn SortSelect(#[props(default = "Sort".to_string())] placeholder: String) -> Element {
    let mut filters = use_filters();
    let current = use_memo(move || filters.state().sort.map(|s| s.to_string()).unwrap_or_default());

    rsx! {
        select {
            style: "
                height: 32px;
                width: 12rem;
                padding: 0px 12px;
                border: 1px solid rgba(0,0,0,0.5);
                border-radius: 1000px;
                background-color: white;
                font-size: 14px;
            ",
            value: "{current}",
            onchange: move |event: Event<FormData>| {
                // an empty selection clears the sort
                let sort = event.value().parse::<SortKey>().ok();
                tracing::info!("Sort changed: {:?}", sort);
                filters.update(FilterPatch {
                    sort: Patch::from(sort),
                    ..Default::default()
                });
            },
            option { value: "", selected: current().is_empty(), "{placeholder}" }
            for (key, label) in SORT_OPTIONS.iter() {
                option {
                    key: "{key}",
                    value: "{key}",
                    selected: current() == key.as_str(),
                    "{label}"
                }
            }
        }
    }
}
