//! Parse <-> serialize between URL query strings and [`FilterState`].
//!
//! Compact URL keys:
//!
//! | key | value |
//! |---|---|
//! | `cat` | category slug path, `home-living/decor` |
//! | `price`, `w`, `h`, `d`, `wt`, `lead` | range `min..max`, either side may be empty |
//! | `stock`, `sale`, `custom`, `bundle`, `gift`, `story` | `1` / `0` |
//! | `rate`, `rating`, `warr` | number |
//! | `origin`, `coop`, `impact`, `tech`, `mat`, `motif`, `color`, `size`, `avail`, `shipFrom`, `ship` | comma list, sorted |
//! | `ret` | `free` |
//! | `sort` | sort key |
//!
//! Parsing is total: malformed values drop the field, never the query.

use std::collections::BTreeSet;
use std::fmt::Display;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::filter_types::{FilterState, NumRange, Returns, SortKey};

pub const RANGE_DELIMITER: &str = "..";
pub const LIST_SEPARATOR: char = ',';

/// Characters left readable in query values: ranges and comma lists stay
/// as written (`price=20..120&mat=cotton,sisal`).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b',')
    .remove(b':');

/// Ordered key/value pairs of a URL query string.
///
/// Keeps duplicate keys in order; lookups return the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (decode_component(k), decode_component(v)),
                None => (decode_component(pair), String::new()),
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every value of `key` with `value`, keeping the position of
    /// the first occurrence. Appends when the key is new.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value;
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn set_if(&mut self, key: &str, value: Option<String>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.set(key, value);
        }
    }
}

impl From<&str> for QueryParams {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

// Display writes the encoded query without the leading `?`
impl Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, (k, v)) in self.pairs.iter().enumerate() {
            if idx > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                utf8_percent_encode(k, QUERY_VALUE),
                utf8_percent_encode(v, QUERY_VALUE)
            )?;
        }
        Ok(())
    }
}

fn decode_component(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

// ------------------------------- helpers -------------------------------------

fn to_num(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn num_to_string(n: Option<f64>) -> Option<String> {
    n.filter(|n| n.is_finite()).map(|n| n.to_string())
}

fn parse_flag(s: Option<&str>) -> Option<bool> {
    match s {
        Some("1") => Some(true),
        Some("0") => Some(false),
        _ => None,
    }
}

fn flag_to_string(b: Option<bool>) -> Option<String> {
    (b == Some(true)).then(|| "1".to_string())
}

fn split_list(s: Option<&str>) -> BTreeSet<String> {
    let Some(s) = s else {
        return BTreeSet::new();
    };
    s.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

// BTreeSet iterates in byte order, which is the canonical order
fn join_list(set: &BTreeSet<String>) -> Option<String> {
    if set.is_empty() {
        return None;
    }
    let parts: Vec<&str> = set.iter().map(String::as_str).collect();
    Some(parts.join(","))
}

fn parse_range(s: Option<&str>) -> NumRange {
    let Some(s) = s.filter(|s| !s.is_empty()) else {
        return NumRange::default();
    };
    let mut parts = s.split(RANGE_DELIMITER);
    let min = to_num(parts.next());
    let max = to_num(parts.next());
    NumRange::new(min, max)
}

fn range_to_string(r: &NumRange) -> Option<String> {
    let a = num_to_string(r.min).unwrap_or_default();
    let b = num_to_string(r.max).unwrap_or_default();
    if a.is_empty() && b.is_empty() {
        return None;
    }
    Some(format!("{a}{RANGE_DELIMITER}{b}"))
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(str::to_string)
}

// --------------------------- parse: URL -> state -----------------------------

pub fn parse_query_to_state(params: &QueryParams) -> FilterState {
    let q = |k: &str| params.get(k);

    FilterState {
        cat: non_empty(q("cat")),

        price: parse_range(q("price")),
        in_stock: parse_flag(q("stock")),
        on_sale: parse_flag(q("sale")),
        rating_min: to_num(q("rate")),

        origin: split_list(q("origin")),
        coop: split_list(q("coop")),
        impact: split_list(q("impact")),

        tech: split_list(q("tech")),
        mat: split_list(q("mat")),
        motif: split_list(q("motif")),
        color: split_list(q("color")),

        size: split_list(q("size")),
        w: parse_range(q("w")),
        h: parse_range(q("h")),
        d: parse_range(q("d")),
        wt: parse_range(q("wt")),

        avail: split_list(q("avail")),
        lead: parse_range(q("lead")),
        custom: parse_flag(q("custom")),
        bundle: parse_flag(q("bundle")),
        gift: parse_flag(q("gift")),

        ship_from: split_list(q("shipFrom")),
        ship: split_list(q("ship")),
        rating: to_num(q("rating")),
        ret: q("ret").and_then(|s| s.parse::<Returns>().ok()),
        warr: to_num(q("warr")),
        story: parse_flag(q("story")),

        sort: q("sort").and_then(|s| s.parse::<SortKey>().ok()),
    }
}

/// Parses a raw query string straight into a [`FilterState`].
pub fn parse_query_string(query: &str) -> FilterState {
    parse_query_to_state(&QueryParams::parse(query))
}

// ------------------------- serialize: state -> URL ---------------------------

/// Serializes `state` into canonical query params.
///
/// `Some(false)` flags are omitted just like unset ones, so they come back
/// as `None` after a round trip through the URL.
pub fn serialize_state_to_query(state: &FilterState) -> QueryParams {
    let mut params = QueryParams::new();

    params.set_if("cat", state.cat.clone());

    params.set_if("price", range_to_string(&state.price));
    params.set_if("stock", flag_to_string(state.in_stock));
    params.set_if("sale", flag_to_string(state.on_sale));
    params.set_if("rate", num_to_string(state.rating_min));

    params.set_if("origin", join_list(&state.origin));
    params.set_if("coop", join_list(&state.coop));
    params.set_if("impact", join_list(&state.impact));

    params.set_if("tech", join_list(&state.tech));
    params.set_if("mat", join_list(&state.mat));
    params.set_if("motif", join_list(&state.motif));
    params.set_if("color", join_list(&state.color));

    params.set_if("size", join_list(&state.size));
    params.set_if("w", range_to_string(&state.w));
    params.set_if("h", range_to_string(&state.h));
    params.set_if("d", range_to_string(&state.d));
    params.set_if("wt", range_to_string(&state.wt));

    params.set_if("avail", join_list(&state.avail));
    params.set_if("lead", range_to_string(&state.lead));
    params.set_if("custom", flag_to_string(state.custom));
    params.set_if("bundle", flag_to_string(state.bundle));
    params.set_if("gift", flag_to_string(state.gift));

    params.set_if("shipFrom", join_list(&state.ship_from));
    params.set_if("ship", join_list(&state.ship));
    params.set_if("rating", num_to_string(state.rating));
    params.set_if("ret", state.ret.map(|r| r.to_string()));
    params.set_if("warr", num_to_string(state.warr));
    params.set_if("story", flag_to_string(state.story));

    params.set_if("sort", state.sort.as_ref().map(|s| s.to_string()));

    params
}

/// Serializes `state` into an encoded query string without the leading `?`.
pub fn serialize_state_to_query_string(state: &FilterState) -> String {
    serialize_state_to_query(state).to_string()
}

/// Canonical form of an arbitrary query string: unknown keys and
/// malformed values dropped, keys in fixed order, lists sorted.
pub fn canonicalize_query(query: &str) -> String {
    serialize_state_to_query_string(&parse_query_string(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_types::Facet;
    use pretty_assertions::assert_eq;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn query_params_parse_and_lookup() {
        let params = QueryParams::parse("?cat=home-living%2Fdecor&mat=cotton,wool&flag&&cat=other");
        assert_eq!(params.get("cat"), Some("home-living/decor"));
        assert_eq!(params.get("mat"), Some("cotton,wool"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn query_params_decode_plus_as_space() {
        let params = QueryParams::parse("color=deep+indigo%20blue");
        assert_eq!(params.get("color"), Some("deep indigo blue"));
    }

    #[test]
    fn query_params_invalid_percent_sequences_are_lossy() {
        let params = QueryParams::parse("cat=%E0%A4%A&x=%zz");
        assert!(params.get("cat").is_some());
        assert_eq!(params.get("x"), Some("%zz"));
    }

    #[test]
    fn query_params_set_replaces_duplicates() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.to_string(), "a=9&b=2");
        params.set("c", "x y");
        assert_eq!(params.to_string(), "a=9&b=2&c=x%20y");
        params.remove("b");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn display_keeps_ranges_and_lists_readable() {
        let mut params = QueryParams::new();
        params.set("price", "20..120");
        params.set("origin", "west-africa:gh,east-africa:ke");
        params.set("cat", "home-living/decor");
        assert_eq!(
            params.to_string(),
            "price=20..120&origin=west-africa:gh,east-africa:ke&cat=home-living%2Fdecor"
        );
    }

    #[test]
    fn parse_full_query() {
        let state = parse_query_string(
            "cat=home-living/decor&price=20..120&stock=1&sale=0&rate=4.5&mat=wool,cotton&w=..40&avail=mto&ret=free&warr=12&sort=price_asc",
        );
        assert_eq!(
            state,
            FilterState {
                cat: Some("home-living/decor".to_string()),
                price: NumRange::between(20.0, 120.0),
                in_stock: Some(true),
                on_sale: Some(false),
                rating_min: Some(4.5),
                mat: set(&["cotton", "wool"]),
                w: NumRange::at_most(40.0),
                avail: set(&["mto"]),
                ret: Some(Returns::Free),
                warr: Some(12.0),
                sort: Some(SortKey::PriceAsc),
                ..Default::default()
            }
        );
    }

    #[test]
    fn parse_flags_are_tri_state() {
        assert_eq!(parse_query_string("gift=1").gift, Some(true));
        assert_eq!(parse_query_string("gift=0").gift, Some(false));
        assert_eq!(parse_query_string("gift=true").gift, None);
        assert_eq!(parse_query_string("gift=").gift, None);
        assert_eq!(parse_query_string("").gift, None);
    }

    #[test]
    fn parse_ranges() {
        assert_eq!(parse_query_string("price=20..").price, NumRange::at_least(20.0));
        assert_eq!(parse_query_string("price=..120").price, NumRange::at_most(120.0));
        assert_eq!(parse_query_string("lead=0..14").lead, NumRange::between(0.0, 14.0));
        assert_eq!(parse_query_string("wt=-1.5..2").wt, NumRange::between(-1.5, 2.0));
        // legacy single value is a lower bound
        assert_eq!(parse_query_string("price=20").price, NumRange::at_least(20.0));
        // only the first two pieces count
        assert_eq!(parse_query_string("price=1..2..3").price, NumRange::between(1.0, 2.0));
    }

    #[test]
    fn parse_malformed_ranges_drop_the_field() {
        assert!(parse_query_string("price=abc..xyz").price.is_unset());
        assert!(parse_query_string("price=..").price.is_unset());
        assert!(parse_query_string("price=free").price.is_unset());
        assert!(parse_query_string("price=inf..NaN").price.is_unset());
        // one good side survives
        assert_eq!(parse_query_string("price=abc..50").price, NumRange::at_most(50.0));
    }

    #[test]
    fn parse_malformed_numbers_drop_the_field() {
        assert_eq!(parse_query_string("rate=notanumber").rating_min, None);
        assert_eq!(parse_query_string("rate=").rating_min, None);
        assert_eq!(parse_query_string("rating=1e400").rating, None);
        assert_eq!(parse_query_string("warr=%2012%20").warr, Some(12.0));
    }

    #[test]
    fn parse_lists_trim_and_drop_empty_tokens() {
        let state = parse_query_string("color=%20indigo%20,,earth,&size=&tech=,,");
        assert_eq!(state.color, set(&["earth", "indigo"]));
        assert!(state.size.is_empty());
        assert!(state.tech.is_empty());
    }

    #[test]
    fn parse_ignores_unknown_keys_and_bad_values() {
        let state = parse_query_string("cat=shoes&price=free&unknownKey=xyz");
        assert_eq!(
            state,
            FilterState {
                cat: Some("shoes".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn parse_plain_strings_must_be_non_empty() {
        let state = parse_query_string("cat=&sort=&ret=paid");
        assert!(state.is_empty());
    }

    #[test]
    fn parse_keeps_unknown_sort_keys() {
        let state = parse_query_string("sort=distance");
        assert_eq!(state.sort, Some(SortKey::Other("distance".to_string())));
    }

    #[test]
    fn serialize_empty_state_is_empty() {
        assert_eq!(serialize_state_to_query_string(&FilterState::default()), "");
    }

    #[test]
    fn serialize_uses_canonical_key_order() {
        let state = FilterState {
            sort: Some(SortKey::Newest),
            mat: set(&["sisal", "cotton"]),
            price: NumRange::between(20.0, 120.0),
            on_sale: Some(true),
            cat: Some("fashion-accessories/jewelry".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serialize_state_to_query_string(&state),
            "cat=fashion-accessories%2Fjewelry&price=20..120&sale=1&mat=cotton,sisal&sort=newest"
        );
    }

    #[test]
    fn serialize_omits_false_flags() {
        let state = FilterState {
            in_stock: Some(false),
            story: Some(true),
            ..Default::default()
        };
        assert_eq!(serialize_state_to_query_string(&state), "story=1");
    }

    #[test]
    fn serialize_omits_empty_sets_and_unset_ranges() {
        let mut state = FilterState::default();
        state.insert_token(Facet::Color, "indigo");
        state.color.clear();
        state.w = NumRange::new(None, None);
        state.h = NumRange::new(Some(f64::NAN), None);
        assert_eq!(serialize_state_to_query_string(&state), "");
    }

    #[test]
    fn serialize_open_range_sides() {
        let state = FilterState {
            price: NumRange::at_least(20.0),
            lead: NumRange::at_most(14.0),
            ..Default::default()
        };
        assert_eq!(serialize_state_to_query_string(&state), "price=20..&lead=..14");
    }

    #[test]
    fn serialize_numbers_use_shortest_form() {
        let state = FilterState {
            rating_min: Some(4.0),
            rating: Some(4.5),
            warr: Some(f64::INFINITY),
            ..Default::default()
        };
        assert_eq!(serialize_state_to_query_string(&state), "rate=4&rating=4.5");
    }

    #[test]
    fn canonicalize_sorts_and_drops() {
        assert_eq!(
            canonicalize_query("?mat=sisal,cotton&zzz=1&price=20..120&stock=0"),
            "price=20..120&mat=cotton,sisal"
        );
    }
}
