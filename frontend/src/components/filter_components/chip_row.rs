use dioxus::prelude::*;

use crate::components::filter_components::category_chips::CategoryChips;
use crate::components::filter_components::more_filters::MoreFilters;
use crate::components::filter_components::sort_select::SortSelect;

/// Category chips on the left, sort and "More filters" on the right.
#[component]
pub fn ChipRow() -> Element {
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                padding: 8px 16px;
                border-bottom: 1px solid rgba(0,0,0,0.1);
            ",
            div {
                style: "flex: 1 1 auto; min-width: 0;",
                CategoryChips {}
            }
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 8px;
                    flex-shrink: 0;
                ",
                SortSelect {}
                MoreFilters {}
            }
        }
    }
}
