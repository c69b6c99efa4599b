pub mod use_filters;
pub mod active_filters_bar;
pub mod category_chips;
pub mod sort_select;
pub mod more_filters;
pub mod chip_row;
pub mod category_filter;
