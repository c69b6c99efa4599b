//! URL-synced filter state for the shop page.
//!
//! The shop page owns a single [`FilterController`] and shares it with the
//! filter components through context. Components only see [`FilterControl`]:
//! `state`, `update` and `clear_all`.

use common::filter_controller::{FilterController, QueryLocation};
use common::filter_patch::FilterPatch;
use common::filter_schema::parse_query_string;
use common::filter_types::FilterState;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use dioxus::router::Navigator;

use crate::data_definitions::filter_query::FilterQuery;
use crate::routes::Route;

/// The shop route's query, written through the router.
pub struct RouterLocation {
    navigator: Navigator,
    query: String,
}

impl QueryLocation for RouterLocation {
    fn current_query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        // replace: no new history entry, no scroll reset
        self.navigator.replace(Route::shop_page_from_filters(FilterQuery(parse_query_string(query))));
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct FilterControl {
    controller: Signal<FilterController<RouterLocation>>,
}

impl FilterControl {
    /// Current filters. Subscribes the calling scope to changes.
    pub fn state(&self) -> FilterState {
        self.controller.read().state().clone()
    }

    pub fn update(&mut self, patch: FilterPatch) {
        self.controller.write().update(patch);
    }

    pub fn clear_all(&mut self) {
        self.controller.write().clear_all();
    }
}

/// Creates the page's filter controller and provides it to child components.
///
/// `filters` is the route's query segment; every navigation that changes it
/// (back/forward, links, our own replaces) is fed back into the controller.
pub fn use_filter_control_provider(filters: FilterQuery) -> FilterControl {
    let location_query = filters.to_string();
    let initial_query = location_query.clone();
    let mut controller = use_signal(move || {
        FilterController::new(RouterLocation {
            navigator: navigator(),
            query: initial_query,
        })
    });

    // the route props change on navigation, but signals are not reset by it
    use_effect(use_reactive!(|location_query| {
        if controller.write().on_location_change(&location_query) {
            tracing::info!("Filters changed by navigation: {}", location_query);
        }
    }));

    use_context_provider(|| FilterControl { controller })
}

pub fn use_filters() -> FilterControl {
    use_context::<FilterControl>()
}
