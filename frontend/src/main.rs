//! Storefront application entry point.

use storefront::app::App;

fn main() {
    dioxus::launch(App);
}
