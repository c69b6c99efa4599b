//! Shop page query segment.

use std::fmt::Display;

use common::filter_schema::{parse_query_string, serialize_state_to_query_string};
use common::filter_types::FilterState;
use dioxus::router::FromQuery;


// The whole query string of the shop route, in canonical form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterQuery(pub FilterState);

impl From<FilterState> for FilterQuery {
    fn from(value: FilterState) -> Self {
        FilterQuery(value)
    }
}

// Display the state in a way that can be parsed by FromQuery
impl Display for FilterQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serialize_state_to_query_string(&self.0))
    }
}

// Parsing never fails: malformed or unknown parameters are dropped
impl FromQuery for FilterQuery {
    fn from_query(query: &str) -> Self {
        FilterQuery(parse_query_string(query))
    }
}
