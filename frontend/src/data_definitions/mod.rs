pub mod filter_query;
