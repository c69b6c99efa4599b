//! Merge-patch updates for [`FilterState`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::filter_types::{Facet, FilterState, Flag, NumRange, RangeField, Returns, SortKey};

/// A single field of a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Patch<T> {
    /// Leave the field untouched.
    Keep,
    /// Reset the field to "not filtered".
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    fn apply_option(self, target: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *target = None,
            Self::Set(v) => *target = Some(v),
        }
    }

    fn apply_value(self, target: &mut T)
    where
        T: Default,
    {
        match self {
            Self::Keep => {}
            Self::Clear => *target = T::default(),
            Self::Set(v) => *target = v,
        }
    }
}

// `None` clears, so `Patch::from(selection)` works for optional UI values.
impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Clear,
        }
    }
}

fn replace_option<T>(value: Option<T>) -> Patch<T> {
    Patch::from(value)
}

fn replace_set(value: BTreeSet<String>) -> Patch<BTreeSet<String>> {
    if value.is_empty() { Patch::Clear } else { Patch::Set(value) }
}

fn replace_range(value: NumRange) -> Patch<NumRange> {
    if value.is_unset() { Patch::Clear } else { Patch::Set(value) }
}

/// Partial [`FilterState`]: only fields that are not [`Patch::Keep`] are
/// written by [`FilterState::merge`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterPatch {
    pub cat: Patch<String>,
    pub price: Patch<NumRange>,
    pub in_stock: Patch<bool>,
    pub on_sale: Patch<bool>,
    pub rating_min: Patch<f64>,
    pub origin: Patch<BTreeSet<String>>,
    pub coop: Patch<BTreeSet<String>>,
    pub impact: Patch<BTreeSet<String>>,
    pub tech: Patch<BTreeSet<String>>,
    pub mat: Patch<BTreeSet<String>>,
    pub motif: Patch<BTreeSet<String>>,
    pub color: Patch<BTreeSet<String>>,
    pub size: Patch<BTreeSet<String>>,
    pub w: Patch<NumRange>,
    pub h: Patch<NumRange>,
    pub d: Patch<NumRange>,
    pub wt: Patch<NumRange>,
    pub avail: Patch<BTreeSet<String>>,
    pub lead: Patch<NumRange>,
    pub custom: Patch<bool>,
    pub bundle: Patch<bool>,
    pub gift: Patch<bool>,
    pub ship_from: Patch<BTreeSet<String>>,
    pub ship: Patch<BTreeSet<String>>,
    pub rating: Patch<f64>,
    pub ret: Patch<Returns>,
    pub warr: Patch<f64>,
    pub story: Patch<bool>,
    pub sort: Patch<SortKey>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that overwrites every field with `state`.
    pub fn replace_all(state: FilterState) -> Self {
        Self {
            cat: replace_option(state.cat),
            price: replace_range(state.price),
            in_stock: replace_option(state.in_stock),
            on_sale: replace_option(state.on_sale),
            rating_min: replace_option(state.rating_min),
            origin: replace_set(state.origin),
            coop: replace_set(state.coop),
            impact: replace_set(state.impact),
            tech: replace_set(state.tech),
            mat: replace_set(state.mat),
            motif: replace_set(state.motif),
            color: replace_set(state.color),
            size: replace_set(state.size),
            w: replace_range(state.w),
            h: replace_range(state.h),
            d: replace_range(state.d),
            wt: replace_range(state.wt),
            avail: replace_set(state.avail),
            lead: replace_range(state.lead),
            custom: replace_option(state.custom),
            bundle: replace_option(state.bundle),
            gift: replace_option(state.gift),
            ship_from: replace_set(state.ship_from),
            ship: replace_set(state.ship),
            rating: replace_option(state.rating),
            ret: replace_option(state.ret),
            warr: replace_option(state.warr),
            story: replace_option(state.story),
            sort: replace_option(state.sort),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn facet_mut(&mut self, facet: Facet) -> &mut Patch<BTreeSet<String>> {
        match facet {
            Facet::Origin => &mut self.origin,
            Facet::Coop => &mut self.coop,
            Facet::Impact => &mut self.impact,
            Facet::Tech => &mut self.tech,
            Facet::Mat => &mut self.mat,
            Facet::Motif => &mut self.motif,
            Facet::Color => &mut self.color,
            Facet::Size => &mut self.size,
            Facet::Avail => &mut self.avail,
            Facet::ShipFrom => &mut self.ship_from,
            Facet::Ship => &mut self.ship,
        }
    }

    pub fn range_mut(&mut self, field: RangeField) -> &mut Patch<NumRange> {
        match field {
            RangeField::Price => &mut self.price,
            RangeField::Width => &mut self.w,
            RangeField::Height => &mut self.h,
            RangeField::Depth => &mut self.d,
            RangeField::Weight => &mut self.wt,
            RangeField::Lead => &mut self.lead,
        }
    }

    pub fn flag_mut(&mut self, flag: Flag) -> &mut Patch<bool> {
        match flag {
            Flag::InStock => &mut self.in_stock,
            Flag::OnSale => &mut self.on_sale,
            Flag::Custom => &mut self.custom,
            Flag::Bundle => &mut self.bundle,
            Flag::Gift => &mut self.gift,
            Flag::Story => &mut self.story,
        }
    }

    pub fn set_facet(facet: Facet, values: BTreeSet<String>) -> Self {
        let mut patch = Self::default();
        *patch.facet_mut(facet) = replace_set(values);
        patch
    }

    /// Removes one token from the facet as it is in `state`.
    pub fn remove_token(state: &FilterState, facet: Facet, token: &str) -> Self {
        let mut values = state.facet(facet).clone();
        values.remove(token);
        Self::set_facet(facet, values)
    }

    pub fn set_range(field: RangeField, range: NumRange) -> Self {
        let mut patch = Self::default();
        *patch.range_mut(field) = replace_range(range);
        patch
    }

    pub fn clear_range(field: RangeField) -> Self {
        Self::set_range(field, NumRange::default())
    }

    pub fn set_flag(flag: Flag, value: Option<bool>) -> Self {
        let mut patch = Self::default();
        *patch.flag_mut(flag) = Patch::from(value);
        patch
    }
}

impl FilterState {
    /// Shallow per-field overwrite with the non-`Keep` fields of `patch`.
    pub fn merge(&mut self, patch: FilterPatch) {
        patch.cat.apply_option(&mut self.cat);
        patch.price.apply_value(&mut self.price);
        patch.in_stock.apply_option(&mut self.in_stock);
        patch.on_sale.apply_option(&mut self.on_sale);
        patch.rating_min.apply_option(&mut self.rating_min);
        patch.origin.apply_value(&mut self.origin);
        patch.coop.apply_value(&mut self.coop);
        patch.impact.apply_value(&mut self.impact);
        patch.tech.apply_value(&mut self.tech);
        patch.mat.apply_value(&mut self.mat);
        patch.motif.apply_value(&mut self.motif);
        patch.color.apply_value(&mut self.color);
        patch.size.apply_value(&mut self.size);
        patch.w.apply_value(&mut self.w);
        patch.h.apply_value(&mut self.h);
        patch.d.apply_value(&mut self.d);
        patch.wt.apply_value(&mut self.wt);
        patch.avail.apply_value(&mut self.avail);
        patch.lead.apply_value(&mut self.lead);
        patch.custom.apply_option(&mut self.custom);
        patch.bundle.apply_option(&mut self.bundle);
        patch.gift.apply_option(&mut self.gift);
        patch.ship_from.apply_value(&mut self.ship_from);
        patch.ship.apply_value(&mut self.ship);
        patch.rating.apply_option(&mut self.rating);
        patch.ret.apply_option(&mut self.ret);
        patch.warr.apply_option(&mut self.warr);
        patch.story.apply_option(&mut self.story);
        patch.sort.apply_option(&mut self.sort);
    }

    pub fn merged(mut self, patch: FilterPatch) -> Self {
        self.merge(patch);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> FilterState {
        FilterState {
            cat: Some("kids-toys".to_string()),
            price: NumRange::between(10.0, 30.0),
            on_sale: Some(true),
            mat: set(&["cotton", "wool"]),
            sort: Some(SortKey::Newest),
            ..Default::default()
        }
    }

    #[test]
    fn empty_patch_keeps_everything() {
        assert!(FilterPatch::new().is_empty());
        assert_eq!(sample().merged(FilterPatch::new()), sample());
    }

    #[test]
    fn merge_overwrites_only_patched_fields() {
        let patch = FilterPatch {
            on_sale: Patch::Clear,
            in_stock: Patch::Set(false),
            mat: Patch::Set(set(&["sisal"])),
            ..Default::default()
        };
        assert_eq!(
            sample().merged(patch),
            FilterState {
                cat: Some("kids-toys".to_string()),
                price: NumRange::between(10.0, 30.0),
                in_stock: Some(false),
                mat: set(&["sisal"]),
                sort: Some(SortKey::Newest),
                ..Default::default()
            }
        );
    }

    #[test]
    fn option_none_becomes_clear() {
        let patch = FilterPatch {
            sort: Patch::from(None),
            cat: Patch::from(Some("stationery-gifts".to_string())),
            ..Default::default()
        };
        let merged = sample().merged(patch);
        assert_eq!(merged.sort, None);
        assert_eq!(merged.cat.as_deref(), Some("stationery-gifts"));
    }

    #[test]
    fn replace_all_overwrites_every_field() {
        let target = FilterState {
            ship: set(&["express"]),
            story: Some(true),
            ..Default::default()
        };
        assert_eq!(sample().merged(FilterPatch::replace_all(target.clone())), target);
        assert_eq!(
            sample().merged(FilterPatch::replace_all(FilterState::default())),
            FilterState::default()
        );
    }

    #[test]
    fn remove_token_keeps_other_tokens() {
        let state = sample();
        let merged = state.clone().merged(FilterPatch::remove_token(&state, Facet::Mat, "wool"));
        assert_eq!(merged.mat, set(&["cotton"]));

        let merged = merged.clone().merged(FilterPatch::remove_token(&merged, Facet::Mat, "cotton"));
        assert!(merged.mat.is_empty());
    }

    #[test]
    fn range_and_flag_helpers() {
        let merged = sample()
            .merged(FilterPatch::clear_range(RangeField::Price))
            .merged(FilterPatch::set_range(RangeField::Lead, NumRange::at_most(14.0)))
            .merged(FilterPatch::set_flag(Flag::OnSale, None))
            .merged(FilterPatch::set_flag(Flag::Gift, Some(true)));
        assert!(merged.price.is_unset());
        assert_eq!(merged.lead, NumRange::at_most(14.0));
        assert_eq!(merged.on_sale, None);
        assert_eq!(merged.gift, Some(true));
    }
}
