use common::filter_patch::{FilterPatch, Patch};
use common::filter_types::CATEGORIES;
use dioxus::prelude::*;

use crate::components::filter_components::use_filters::use_filters;

#[component]
pub fn CategoryChips() -> Element {
    rsx! {
        div {
            role: "toolbar",
            "aria-label": "Categories",
            style: "
                display: flex;
                flex-direction: row;
                gap: 8px;
                overflow-x: auto;
                padding-bottom: 4px;
            ",
            for category in CATEGORIES.iter() {
                CategoryChip {
                    key: "{category.slug}",
                    slug: category.slug.to_string(),
                    label: category.label.to_string(),
                }
            }
        }
    }
}

#[component]
fn CategoryChip(slug: ReadSignal<String>, label: ReadSignal<String>) -> Element {
    let mut filters = use_filters();
    let is_active = use_memo(move || filters.state().cat.as_deref() == Some(slug.read().as_str()));
    let background = use_memo(move || if is_active() { "rgb(28, 33, 45)" } else { "white" });
    let color = use_memo(move || if is_active() { "white" } else { "rgb(28, 33, 45)" });

    rsx! {
        button {
            style: "
                cursor: pointer;
                height: 32px;
                padding: 0px 14px;
                border: 1px solid rgba(0,0,0,0.5);
                border-radius: 1000px;
                background-color: {background()};
                color: {color()};
                font-size: 14px;
                white-space: nowrap;
                flex-shrink: 0;
            ",
            "aria-pressed": "{is_active()}",
            onclick: move |_| {
                let next = if is_active() { None } else { Some(slug.read().clone()) };
                filters.update(FilterPatch {
                    cat: Patch::from(next),
                    ..Default::default()
                });
            },
            "{label}"
        }
    }
}
