pub mod error_boundary;
pub mod header;
pub mod filter_components;
