use common::active_filters::count_active;
use common::filter_schema::serialize_state_to_query;
use dioxus::prelude::*;

use crate::components::error_boundary::SectionErrorBoundary;
use crate::components::filter_components::category_filter::CategoryFilter;
use crate::components::filter_components::use_filters::{use_filter_control_provider, use_filters};
use crate::data_definitions::filter_query::FilterQuery;

/// Shop listing page. The route's query is the filter state.
#[component]
pub fn ShopPage(filters: FilterQuery) -> Element {
    use_filter_control_provider(filters);

    rsx! {
        ShopTitle {}
        CategoryFilter {}
        SectionErrorBoundary {
            FilterSummary {}
        }
    }
}

#[component]
fn ShopTitle() -> Element {
    let filters = use_filters();
    let title = use_memo(move || match count_active(&filters.state()) {
        0 => "Shop".to_string(),
        1 => "Shop (1 filter)".to_string(),
        n => format!("Shop ({n} filters)"),
    });
    rsx! {
        Title { "{title}" }
    }
}

/// Listing placeholder: shows the query a product search would receive.
#[component]
fn FilterSummary() -> Element {
    let filters = use_filters();
    let params = use_memo(move || {
        serialize_state_to_query(&filters.state())
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
    });

    rsx! {
        div {
            id: "x-filter-summary",
            style: "padding: 16px; font-size: 14px; color: rgb(28, 33, 45);",
            if params.read().is_empty() {
                p { "Showing all products." }
            } else {
                p { "Showing products matching:" }
                ul {
                    style: "margin: 0px; padding-left: 20px;",
                    for (key, value) in params() {
                        li {
                            key: "{key}",
                            code { "{key}" }
                            " = "
                            code { "{value}" }
                        }
                    }
                }
            }
        }
    }
}
