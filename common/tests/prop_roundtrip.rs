use std::collections::BTreeSet;

use common::filter_schema::{
    QueryParams, canonicalize_query, parse_query_string, parse_query_to_state,
    serialize_state_to_query, serialize_state_to_query_string,
};
use common::filter_types::{Facet, FilterState, Flag, NumRange, Returns, SortKey};
use proptest::option;
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
    "[a-z0-9_:-]{1,12}"
}

fn tokens() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(token(), 0..4)
}

fn num() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1000i32..100_000).prop_map(f64::from),
        -1.0e6f64..1.0e6f64,
    ]
}

fn range() -> impl Strategy<Value = NumRange> {
    (option::of(num()), option::of(num())).prop_map(|(min, max)| NumRange::new(min, max))
}

fn flag() -> impl Strategy<Value = Option<bool>> {
    option::of(any::<bool>())
}

fn sort() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Relevance),
        Just(SortKey::Newest),
        Just(SortKey::PriceAsc),
        Just(SortKey::PriceDesc),
        Just(SortKey::RatingDesc),
        Just(SortKey::BestSellers),
        "x[a-z_]{0,8}".prop_map(SortKey::Other),
    ]
}

fn category() -> impl Strategy<Value = String> {
    "[a-z-]{1,10}(/[a-z-]{1,10})?"
}

fn state() -> impl Strategy<Value = FilterState> {
    let primary = (option::of(category()), range(), flag(), flag(), option::of(num()));
    let craft = (tokens(), tokens(), tokens(), tokens(), tokens(), tokens(), tokens(), tokens());
    let dims = (range(), range(), range(), range(), tokens(), range());
    let seller = (
        flag(),
        flag(),
        flag(),
        tokens(),
        tokens(),
        option::of(num()),
        option::of(Just(Returns::Free)),
        option::of(num()),
        flag(),
        option::of(sort()),
    );
    (primary, craft, dims, seller).prop_map(|(primary, craft, dims, seller)| {
        let (cat, price, in_stock, on_sale, rating_min) = primary;
        let (origin, coop, impact, tech, mat, motif, color, size) = craft;
        let (w, h, d, wt, avail, lead) = dims;
        let (custom, bundle, gift, ship_from, ship, rating, ret, warr, story, sort) = seller;
        FilterState {
            cat,
            price,
            in_stock,
            on_sale,
            rating_min,
            origin,
            coop,
            impact,
            tech,
            mat,
            motif,
            color,
            size,
            w,
            h,
            d,
            wt,
            avail,
            lead,
            custom,
            bundle,
            gift,
            ship_from,
            ship,
            rating,
            ret,
            warr,
            story,
            sort,
        }
    })
}

/// What survives the URL: explicit `false` flags come back unset.
fn without_false_flags(mut state: FilterState) -> FilterState {
    for flag in Flag::ALL {
        let value = state.flag_mut(flag);
        if *value == Some(false) {
            *value = None;
        }
    }
    state
}

proptest! {
    #[test]
    fn prop_roundtrip_state(s in state()) {
        let back = parse_query_to_state(&serialize_state_to_query(&s));
        prop_assert_eq!(back, without_false_flags(s));
    }

    #[test]
    fn prop_serialize_is_idempotent(s in state()) {
        let once = serialize_state_to_query_string(&s);
        let twice = serialize_state_to_query_string(&parse_query_string(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_is_empty_matches_serializer(s in state()) {
        prop_assert_eq!(s.is_empty(), serialize_state_to_query(&s).is_empty());
    }

    #[test]
    fn prop_encoded_query_parses_back(s in state()) {
        let query = serialize_state_to_query_string(&s);
        prop_assert_eq!(QueryParams::parse(&query), serialize_state_to_query(&s));
    }

    #[test]
    fn prop_list_order_does_not_matter(
        values in prop::collection::vec(token(), 1..6).prop_shuffle(),
    ) {
        let mut sorted = values.clone();
        sorted.sort();
        let shuffled_query = format!("mat={}", values.join(","));
        let sorted_query = format!("mat={}", sorted.join(","));
        prop_assert_eq!(canonicalize_query(&shuffled_query), canonicalize_query(&sorted_query));

        let mut forward = FilterState::default();
        let mut backward = FilterState::default();
        for v in &values {
            forward.insert_token(Facet::Color, v);
        }
        for v in values.iter().rev() {
            backward.insert_token(Facet::Color, v);
        }
        prop_assert_eq!(
            serialize_state_to_query_string(&forward),
            serialize_state_to_query_string(&backward)
        );
    }

    #[test]
    fn prop_parse_is_total(raw in ".*") {
        let canonical = canonicalize_query(&raw);
        prop_assert_eq!(canonicalize_query(&canonical), canonical);
    }

    #[test]
    fn prop_parse_is_total_on_known_keys(
        key in prop::sample::select(vec![
            "cat", "price", "stock", "sale", "rate", "mat", "w", "lead", "ret", "warr", "sort",
        ]),
        value in "[ -~]{0,16}",
    ) {
        let raw = format!("{key}={value}");
        let canonical = canonicalize_query(&raw);
        prop_assert_eq!(canonicalize_query(&canonical), canonical);
    }
}

#[test]
fn explicit_false_flags_normalize_to_unset() {
    let s = FilterState {
        in_stock: Some(false),
        on_sale: Some(true),
        story: Some(false),
        ..Default::default()
    };
    let back = parse_query_string(&serialize_state_to_query_string(&s));
    assert_eq!(back.in_stock, None);
    assert_eq!(back.story, None);
    assert_eq!(back.on_sale, Some(true));
    assert_ne!(back, s);
}

#[test]
fn empty_set_collapses() {
    let s = FilterState {
        color: BTreeSet::new(),
        ..Default::default()
    };
    assert_eq!(serialize_state_to_query_string(&s), "");
    assert!(parse_query_string("color=").color.is_empty());
}
