//! Common library shared by the storefront frontend: the filter model, its
//! URL codec and the controller that keeps both in sync.

extern crate serde;


pub mod filter_types;
pub mod filter_schema;
pub mod filter_patch;
pub mod filter_controller;
pub mod active_filters;
