//! Top bar and page container shared by all routes.

use common::filter_types::FilterState;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdStore};

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::data_definitions::filter_query::FilterQuery;
use crate::routes::Route;

#[component]
pub fn Header() -> Element {
    rsx! {
        div {
            id: "x-header-container",
            style: "
                display: flex;
                flex-direction: column;
                width: 100%;
                min-height: 100%;
            ",

            header {
                id: "x-header",
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 16px;
                    height: 56px;
                    padding: 0px 16px;
                    background-color: #1C212D;
                    color: white;
                ",
                Link {
                    to: Route::shop_page_from_filters(FilterQuery(FilterState::default())),
                    style: "display: flex; align-items: center; gap: 8px; color: white; text-decoration: none;",
                    Icon { icon: MdStore, style: "width: 26px; height: 26px;" }
                    span { style: "font-size: 18px; font-weight: 500;", "Storefront" }
                }
                div { style: "flex-grow: 1;" }
                Link {
                    to: Route::shop_page_from_filters(FilterQuery(FilterState::default())),
                    style: "color: white; font-size: 14px;",
                    "Shop all"
                }
            }

            div {
                id: "x-page-container",
                style: "flex-grow: 1; min-width: 100px;",
                GlobalErrorBoundary {
                    boundary_name: "Header".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}
