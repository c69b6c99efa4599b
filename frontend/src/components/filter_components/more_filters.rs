//! "More filters (n)" button and dialog.
//!
//! The dialog edits a draft copy of the filters. Apply commits the draft with
//! a single update, Cancel throws it away.

use common::active_filters::count_active;
use common::filter_patch::FilterPatch;
use common::filter_types::{Facet, FilterState, Flag, QUICK_PRICE_PRESETS};
use dioxus::logger::tracing;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_image_icons::MdTune, md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}}};

use crate::components::filter_components::use_filters::use_filters;

#[component]
pub fn MoreFilters() -> Element {
    let mut filters = use_filters();
    let mut is_open = use_signal(|| false);
    let mut draft = use_signal(FilterState::default);
    let active = use_memo(move || count_active(&filters.state()));
    let badge = use_memo(move || if active() > 0 { format!(" ({})", active()) } else { "".to_string() });

    rsx! {
        button {
            style: "
                cursor: pointer;
                display: flex;
                align-items: center;
                gap: 6px;
                height: 32px;
                padding: 0px 12px;
                border: 1px solid rgba(0,0,0,0.5);
                border-radius: 1000px;
                background-color: white;
                font-size: 14px;
                white-space: nowrap;
            ",
            onclick: move |_| {
                draft.set(filters.state());
                is_open.set(true);
            },
            Icon { icon: MdTune, style: "width: 16px; height: 16px;" }
            "More filters{badge}"
        }

        if is_open() {
            div {
                style: "
                    position: fixed;
                    top: 0px;
                    left: 0px;
                    z-index: 999;
                    background-color: rgba(0,0,0,0.3);
                    width: 100%;
                    height: 100%;
                ",
                onclick: move |_| {
                    is_open.set(false);
                },
            }
            div {
                role: "dialog",
                "aria-label": "Filters",
                style: "
                    position: fixed;
                    top: 50%;
                    left: 50%;
                    transform: translate(-50%, -50%);
                    z-index: 1000;
                    width: min(48rem, calc(100vw - 32px));
                    max-height: calc(100vh - 64px);
                    display: flex;
                    flex-direction: column;
                    background-color: white;
                    border-radius: 10px;
                    box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
                ",
                div {
                    style: "padding: 12px 16px; border-bottom: 1px solid rgba(0,0,0,0.1);",
                    h2 { style: "font-size: 18px; margin: 0px;", "Filters" }
                    p {
                        style: "font-size: 14px; color: rgba(28, 33, 45, 0.7); margin: 4px 0px 0px 0px;",
                        "Narrow results by origin, materials, availability, shipping, and more."
                    }
                }

                div {
                    style: "
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr));
                        gap: 16px;
                        padding: 16px;
                        overflow-y: auto;
                    ",
                    FilterSection {
                        title: "Identity & Origin".to_string(),
                        FacetChecklist { facet: Facet::Origin, draft }
                        FacetChecklist { facet: Facet::Impact, draft }
                    }
                    FilterSection {
                        title: "Craft & Materials".to_string(),
                        FacetChecklist { facet: Facet::Tech, draft }
                        FacetChecklist { facet: Facet::Mat, draft }
                        FacetChecklist { facet: Facet::Motif, draft }
                    }
                    FilterSection {
                        title: "Size & Price".to_string(),
                        FacetChecklist { facet: Facet::Size, draft }
                        PricePresets { draft }
                    }
                    FilterSection {
                        title: "Availability & Shipping".to_string(),
                        FacetChecklist { facet: Facet::Avail, draft }
                        FacetChecklist { facet: Facet::Ship, draft }
                        for flag in Flag::ALL {
                            FlagToggle { key: "{flag.key()}", flag, draft }
                        }
                    }
                }

                div {
                    style: "
                        display: flex;
                        flex-direction: row;
                        align-items: center;
                        gap: 8px;
                        padding: 12px 16px;
                        border-top: 1px solid rgba(0,0,0,0.1);
                    ",
                    DialogButton {
                        label: "Clear all".to_string(),
                        onclick: move |_| {
                            filters.clear_all();
                            is_open.set(false);
                        },
                    }
                    div { style: "flex-grow: 1;" }
                    DialogButton {
                        label: "Cancel".to_string(),
                        onclick: move |_| {
                            is_open.set(false);
                        },
                    }
                    DialogButton {
                        label: "Apply".to_string(),
                        primary: true,
                        onclick: move |_| {
                            let next = draft.read().clone();
                            tracing::info!("Applying {} filters", count_active(&next));
                            filters.update(FilterPatch::replace_all(next));
                            is_open.set(false);
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn FilterSection(title: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        section {
            h3 { style: "font-size: 14px; font-weight: 500; margin: 0px 0px 8px 0px;", "{title}" }
            div {
                style: "display: flex; flex-direction: column; gap: 8px;",
                {children}
            }
        }
    }
}

#[component]
fn FacetChecklist(facet: Facet, draft: Signal<FilterState>) -> Element {
    rsx! {
        div {
            div {
                style: "font-size: 13px; color: rgba(28, 33, 45, 0.7);",
                "{facet.label()}"
            }
            ul {
                style: "list-style: none; margin: 0px; padding: 0px;",
                for value in facet.known_values().iter() {
                    li {
                        key: "{value}",
                        FacetCheckbox { facet, draft, facet_value: value.to_string() }
                    }
                }
            }
        }
    }
}

#[component]
fn FacetCheckbox(facet: Facet, mut draft: Signal<FilterState>, facet_value: ReadSignal<String>) -> Element {
    let is_checked = use_memo(move || draft.read().facet(facet).contains(&*facet_value.read()));
    rsx! {
        CheckRow {
            checked: is_checked(),
            label: facet_value.read().clone(),
            onclick: move |_| {
                let value = facet_value.read().clone();
                draft.write().toggle_token(facet, &value);
            },
        }
    }
}

#[component]
fn FlagToggle(flag: Flag, mut draft: Signal<FilterState>) -> Element {
    let is_on = use_memo(move || draft.read().flag(flag) == Some(true));
    rsx! {
        CheckRow {
            checked: is_on(),
            label: flag.label().to_string(),
            onclick: move |_| {
                let next = if is_on() { None } else { Some(true) };
                *draft.write().flag_mut(flag) = next;
            },
        }
    }
}

#[component]
fn PricePresets(mut draft: Signal<FilterState>) -> Element {
    rsx! {
        div {
            div {
                style: "font-size: 13px; color: rgba(28, 33, 45, 0.7);",
                "Price"
            }
            for preset in QUICK_PRICE_PRESETS.iter() {
                CheckRow {
                    key: "{preset.label}",
                    checked: draft.read().price == preset.range,
                    label: preset.label.to_string(),
                    onclick: move |_| {
                        let mut state = draft.write();
                        state.price = if state.price == preset.range { Default::default() } else { preset.range };
                    },
                }
            }
        }
    }
}

#[component]
fn CheckRow(checked: bool, label: ReadSignal<String>, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div {
            class: "x-facet-list-item",
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                align-items: center;
            ",
            onclick: move |e| onclick.call(e),
            if checked {
                Icon { icon: MdCheckBox, style: "width: 20px; height: 20px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 20px; height: 20px; color: black; flex-shrink: 0;" }
            }
            div {
                style: "
                    font-size: 14px;
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    min-width: 0;
                ",
                "{label}"
            }
        }
    }
}

#[component]
fn DialogButton(label: ReadSignal<String>, #[props(default)] primary: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let (background, color) = if primary { ("rgb(28, 33, 45)", "white") } else { ("white", "rgb(28, 33, 45)") };
    rsx! {
        button {
            style: "
                cursor: pointer;
                height: 32px;
                padding: 0px 14px;
                border: 1px solid rgba(0,0,0,0.5);
                border-radius: 6px;
                background-color: {background};
                color: {color};
                font-size: 14px;
            ",
            onclick: move |e| onclick.call(e),
            "{label}"
        }
    }
}
