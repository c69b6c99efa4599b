use dioxus::prelude::*;

use crate::components::header::Header;
use crate::data_definitions::filter_query::FilterQuery;
use crate::pages::shop_page::ShopPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Header)]


    #[redirect("/", || Route::shop_page_from_filters(FilterQuery::default()))]
    #[route("/shop?:..filters")]
    ShopPage { filters: FilterQuery },

}

impl Route {
    pub fn shop_page_from_filters(filters: FilterQuery) -> Self {
        Self::ShopPage { filters }
    }
}
