//! Removable chips and badge counts derived from a [`FilterState`].

use serde::{Deserialize, Serialize};

use crate::filter_patch::{FilterPatch, Patch};
use crate::filter_types::{Facet, FilterState, Flag, NumRange, RangeField};

/// One applied filter, with the patch that removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterChip {
    pub key: String,
    pub label: String,
    pub remove: FilterPatch,
}

fn fmt_num(n: f64) -> String {
    n.to_string()
}

/// `20–120`, `≥20`, `≤120`, with `unit` appended; empty for unset ranges.
pub fn format_range(range: &NumRange, unit: &str) -> String {
    if range.is_unset() {
        return String::new();
    }
    let min = range.min.filter(|n| n.is_finite());
    let max = range.max.filter(|n| n.is_finite());
    let core = match (min, max) {
        (Some(a), Some(b)) => format!("{}–{}", fmt_num(a), fmt_num(b)),
        (Some(a), None) => format!("≥{}", fmt_num(a)),
        (None, Some(b)) => format!("≤{}", fmt_num(b)),
        (None, None) => String::new(),
    };
    format!("{core}{unit}")
}

fn range_label(field: RangeField, range: &NumRange) -> String {
    let prefix = match field {
        RangeField::Price => "Price",
        RangeField::Width => "W",
        RangeField::Height => "H",
        RangeField::Depth => "D",
        RangeField::Weight => "Weight",
        RangeField::Lead => "Lead",
    };
    format!("{} {}", prefix, format_range(range, field.unit()))
}

fn flag_label(flag: Flag, value: bool) -> &'static str {
    match (flag, value) {
        (Flag::InStock, false) => "Out of stock",
        (Flag::OnSale, false) => "Not on sale",
        _ => flag.label(),
    }
}

struct ChipBuilder {
    chips: Vec<FilterChip>,
}

impl ChipBuilder {
    fn push(&mut self, key: impl Into<String>, label: impl Into<String>, remove: FilterPatch) {
        self.chips.push(FilterChip {
            key: key.into(),
            label: label.into(),
            remove,
        });
    }

    fn range(&mut self, state: &FilterState, field: RangeField) {
        let range = state.range(field);
        if !range.is_unset() {
            self.push(field.key(), range_label(field, range), FilterPatch::clear_range(field));
        }
    }

    fn flag(&mut self, state: &FilterState, flag: Flag) {
        if let Some(value) = state.flag(flag) {
            self.push(flag.key(), flag_label(flag, value), FilterPatch::set_flag(flag, None));
        }
    }

    fn facet(&mut self, state: &FilterState, facet: Facet) {
        for token in state.facet(facet) {
            self.push(
                format!("{}:{}", facet.key(), token),
                format!("{}: {}", facet.label(), token),
                FilterPatch::remove_token(state, facet, token),
            );
        }
    }
}

/// Chips for every applied filter, in URL key order. Sort is not a filter
/// and never becomes a chip.
pub fn build_chips(state: &FilterState) -> Vec<FilterChip> {
    let mut b = ChipBuilder { chips: Vec::new() };

    if let Some(cat) = &state.cat {
        b.push(
            "cat",
            cat.clone(),
            FilterPatch {
                cat: Patch::Clear,
                ..Default::default()
            },
        );
    }

    b.range(state, RangeField::Price);
    b.flag(state, Flag::InStock);
    b.flag(state, Flag::OnSale);
    if let Some(rating_min) = state.rating_min {
        b.push(
            "rate",
            format!("Rating ≥ {}", fmt_num(rating_min)),
            FilterPatch {
                rating_min: Patch::Clear,
                ..Default::default()
            },
        );
    }

    for facet in [Facet::Origin, Facet::Coop, Facet::Impact, Facet::Tech, Facet::Mat, Facet::Motif, Facet::Color, Facet::Size] {
        b.facet(state, facet);
    }
    for field in [RangeField::Width, RangeField::Height, RangeField::Depth, RangeField::Weight] {
        b.range(state, field);
    }

    b.facet(state, Facet::Avail);
    b.range(state, RangeField::Lead);
    b.flag(state, Flag::Custom);
    b.flag(state, Flag::Bundle);
    b.flag(state, Flag::Gift);

    b.facet(state, Facet::ShipFrom);
    b.facet(state, Facet::Ship);
    if let Some(rating) = state.rating {
        b.push(
            "rating",
            format!("Min rating {}", fmt_num(rating)),
            FilterPatch {
                rating: Patch::Clear,
                ..Default::default()
            },
        );
    }
    if state.ret.is_some() {
        b.push(
            "ret",
            "Free returns",
            FilterPatch {
                ret: Patch::Clear,
                ..Default::default()
            },
        );
    }
    if let Some(warr) = state.warr {
        b.push(
            "warr",
            format!("Warranty ≥ {}m", fmt_num(warr)),
            FilterPatch {
                warr: Patch::Clear,
                ..Default::default()
            },
        );
    }
    b.flag(state, Flag::Story);

    b.chips
}

/// Number of applied filters for the "More filters (n)" badge.
///
/// Category and sort have their own controls and are not counted; set
/// facets count one per token.
pub fn count_active(state: &FilterState) -> usize {
    let ranges = RangeField::ALL.iter().filter(|f| !state.range(**f).is_unset()).count();
    let flags = Flag::ALL.iter().filter(|f| state.flag(**f).is_some()).count();
    let tokens: usize = Facet::ALL.iter().map(|f| state.facet(*f).len()).sum();
    let numbers = [state.rating_min, state.rating, state.warr]
        .iter()
        .filter(|n| n.is_some())
        .count();
    let ret = usize::from(state.ret.is_some());

    ranges + flags + tokens + numbers + ret
}
