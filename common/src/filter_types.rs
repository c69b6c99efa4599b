//! Filter model for the marketplace storefront.
//!
//! These types are UI-agnostic: the URL codec, the controller and the
//! frontend components all share them.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric range with inclusive bounds; either side may be open.
///
/// A range with both sides open is the same as no range at all.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    pub fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    /// True when neither bound is a finite number.
    pub fn is_unset(&self) -> bool {
        !is_finite(self.min) && !is_finite(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

fn is_finite(v: Option<f64>) -> bool {
    v.is_some_and(f64::is_finite)
}

/// Free returns is the only returns policy the storefront filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Returns {
    Free,
}

impl Returns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
        }
    }
}

impl Display for Returns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Returns {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            other => Err(TokenParseError::UnknownReturns(other.to_string())),
        }
    }
}

/// Result ordering. Unknown keys are kept verbatim so URLs written by a
/// newer storefront still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SortKey {
    Relevance,
    Newest,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    BestSellers,
    Other(String),
}

impl SortKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Relevance => "relevance",
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::RatingDesc => "rating_desc",
            Self::BestSellers => "best_sellers",
            Self::Other(s) => s,
        }
    }

    pub fn from_token(token: &str) -> Self {
        match token {
            "relevance" => Self::Relevance,
            "newest" => Self::Newest,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "rating_desc" => Self::RatingDesc,
            "best_sellers" => Self::BestSellers,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TokenParseError::Empty);
        }
        Ok(Self::from_token(s))
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.as_str().to_string()
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::from_token(&value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenParseError {
    Empty,
    UnknownReturns(String),
}

impl std::fmt::Display for TokenParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty token"),
            Self::UnknownReturns(s) => write!(f, "Unknown returns policy: {}", s),
        }
    }
}

impl std::error::Error for TokenParseError {}

/// The canonical filter/sort query of the shop page.
///
/// Every dimension is optional. Multi-select facets are sets: an empty set
/// means "not filtered", and iteration order is the canonical URL order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    // Primary chips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat: Option<String>,
    #[serde(skip_serializing_if = "NumRange::is_unset")]
    pub price: NumRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_min: Option<f64>,

    // Identity & origin
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub origin: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub coop: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub impact: BTreeSet<String>,

    // Craft & materials
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tech: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub mat: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub motif: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub color: BTreeSet<String>,

    // Size & dimensions, cm / kg
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub size: BTreeSet<String>,
    #[serde(skip_serializing_if = "NumRange::is_unset")]
    pub w: NumRange,
    #[serde(skip_serializing_if = "NumRange::is_unset")]
    pub h: NumRange,
    #[serde(skip_serializing_if = "NumRange::is_unset")]
    pub d: NumRange,
    #[serde(skip_serializing_if = "NumRange::is_unset")]
    pub wt: NumRange,

    // Buying & availability
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub avail: BTreeSet<String>,
    #[serde(skip_serializing_if = "NumRange::is_unset")]
    pub lead: NumRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift: Option<bool>,

    // Shipping & seller
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub ship_from: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub ship: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ret: Option<Returns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
}

impl FilterState {
    /// True when no dimension (including sort) would be written to the URL.
    ///
    /// Ranges without a finite bound, `Some(false)` flags and non-finite
    /// scalars count as unset, same as for the serializer.
    pub fn is_empty(&self) -> bool {
        let unset_num = |n: Option<f64>| !n.is_some_and(f64::is_finite);
        self.cat.as_deref().is_none_or(str::is_empty)
            && Facet::ALL.iter().all(|&f| self.facet(f).is_empty())
            && RangeField::ALL.iter().all(|&r| self.range(r).is_unset())
            && Flag::ALL.iter().all(|&f| self.flag(f) != Some(true))
            && unset_num(self.rating_min)
            && unset_num(self.rating)
            && unset_num(self.warr)
            && self.ret.is_none()
            && self.sort.is_none()
    }

    pub fn facet(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Origin => &self.origin,
            Facet::Coop => &self.coop,
            Facet::Impact => &self.impact,
            Facet::Tech => &self.tech,
            Facet::Mat => &self.mat,
            Facet::Motif => &self.motif,
            Facet::Color => &self.color,
            Facet::Size => &self.size,
            Facet::Avail => &self.avail,
            Facet::ShipFrom => &self.ship_from,
            Facet::Ship => &self.ship,
        }
    }

    pub fn facet_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
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

    /// Adds a token to a facet. Tokens are trimmed; empty tokens and
    /// tokens containing the list separator are rejected.
    pub fn insert_token(&mut self, facet: Facet, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() || token.contains(',') {
            return false;
        }
        self.facet_mut(facet).insert(token.to_string())
    }

    /// Adds the token when missing, removes it when present.
    pub fn toggle_token(&mut self, facet: Facet, token: &str) {
        if !self.facet_mut(facet).remove(token) {
            self.insert_token(facet, token);
        }
    }

    pub fn range(&self, field: RangeField) -> &NumRange {
        match field {
            RangeField::Price => &self.price,
            RangeField::Width => &self.w,
            RangeField::Height => &self.h,
            RangeField::Depth => &self.d,
            RangeField::Weight => &self.wt,
            RangeField::Lead => &self.lead,
        }
    }

    pub fn range_mut(&mut self, field: RangeField) -> &mut NumRange {
        match field {
            RangeField::Price => &mut self.price,
            RangeField::Width => &mut self.w,
            RangeField::Height => &mut self.h,
            RangeField::Depth => &mut self.d,
            RangeField::Weight => &mut self.wt,
            RangeField::Lead => &mut self.lead,
        }
    }

    pub fn flag(&self, flag: Flag) -> Option<bool> {
        match flag {
            Flag::InStock => self.in_stock,
            Flag::OnSale => self.on_sale,
            Flag::Custom => self.custom,
            Flag::Bundle => self.bundle,
            Flag::Gift => self.gift,
            Flag::Story => self.story,
        }
    }

    pub fn flag_mut(&mut self, flag: Flag) -> &mut Option<bool> {
        match flag {
            Flag::InStock => &mut self.in_stock,
            Flag::OnSale => &mut self.on_sale,
            Flag::Custom => &mut self.custom,
            Flag::Bundle => &mut self.bundle,
            Flag::Gift => &mut self.gift,
            Flag::Story => &mut self.story,
        }
    }
}

/// Multi-select facets, in canonical URL order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Origin,
    Coop,
    Impact,
    Tech,
    Mat,
    Motif,
    Color,
    Size,
    Avail,
    ShipFrom,
    Ship,
}

impl Facet {
    pub const ALL: [Facet; 11] = [
        Facet::Origin,
        Facet::Coop,
        Facet::Impact,
        Facet::Tech,
        Facet::Mat,
        Facet::Motif,
        Facet::Color,
        Facet::Size,
        Facet::Avail,
        Facet::ShipFrom,
        Facet::Ship,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Coop => "coop",
            Self::Impact => "impact",
            Self::Tech => "tech",
            Self::Mat => "mat",
            Self::Motif => "motif",
            Self::Color => "color",
            Self::Size => "size",
            Self::Avail => "avail",
            Self::ShipFrom => "shipFrom",
            Self::Ship => "ship",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Origin => "Origin",
            Self::Coop => "Co-op",
            Self::Impact => "Impact",
            Self::Tech => "Technique",
            Self::Mat => "Material",
            Self::Motif => "Motif",
            Self::Color => "Color",
            Self::Size => "Size",
            Self::Avail => "Availability",
            Self::ShipFrom => "Ships from",
            Self::Ship => "Shipping",
        }
    }

    /// Curated values for UI controls. Empty for fully open facets; the
    /// data layer accepts any token either way.
    pub fn known_values(&self) -> &'static [&'static str] {
        match self {
            Self::Origin => REGIONS,
            Self::Impact => IMPACT_BADGES,
            Self::Tech => TECHNIQUES,
            Self::Mat => MATERIALS,
            Self::Motif => MOTIFS,
            Self::Avail => AVAIL_FLAGS,
            Self::Ship => SHIPPING_OPTIONS,
            Self::Size => SIZES,
            Self::Coop | Self::Color | Self::ShipFrom => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeField {
    Price,
    Width,
    Height,
    Depth,
    Weight,
    Lead,
}

impl RangeField {
    pub const ALL: [RangeField; 6] = [
        RangeField::Price,
        RangeField::Width,
        RangeField::Height,
        RangeField::Depth,
        RangeField::Weight,
        RangeField::Lead,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Width => "w",
            Self::Height => "h",
            Self::Depth => "d",
            Self::Weight => "wt",
            Self::Lead => "lead",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Price => "",
            Self::Width | Self::Height | Self::Depth => "cm",
            Self::Weight => "kg",
            Self::Lead => "d",
        }
    }
}

/// Tri-state boolean filters. `None` means "don't filter", which is not
/// the same as `Some(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    InStock,
    OnSale,
    Custom,
    Bundle,
    Gift,
    Story,
}

impl Flag {
    pub const ALL: [Flag; 6] = [
        Flag::InStock,
        Flag::OnSale,
        Flag::Custom,
        Flag::Bundle,
        Flag::Gift,
        Flag::Story,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::InStock => "stock",
            Self::OnSale => "sale",
            Self::Custom => "custom",
            Self::Bundle => "bundle",
            Self::Gift => "gift",
            Self::Story => "story",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In stock",
            Self::OnSale => "On sale",
            Self::Custom => "Customizable",
            Self::Bundle => "Bundle",
            Self::Gift => "Giftable",
            Self::Story => "Has story",
        }
    }
}

pub const REGIONS: &[&str] = &[
    "west-africa",
    "east-africa",
    "southern-africa",
    "north-africa",
    "central-africa",
];

pub const AVAIL_FLAGS: &[&str] = &["ready", "mto", "oneofakind"];

pub const SHIPPING_OPTIONS: &[&str] = &[
    "free",
    "express",
    "local_pickup",
    "in_country",
    "in_country_only",
    "intl",
];

pub const IMPACT_BADGES: &[&str] = &[
    "fairtrade",
    "woman_led",
    "coop_made",
    "co_op",
    "upcycled",
    "natural_dyes",
    "carbon_neutral",
];

pub const TECHNIQUES: &[&str] = &[
    "weaving",
    "carving",
    "beadwork",
    "batik",
    "mudcloth",
    "metalwork",
    "leatherwork",
    "macrame",
];

pub const MATERIALS: &[&str] = &[
    "cotton",
    "wool",
    "sisal",
    "raffia",
    "kente",
    "ankara",
    "leather",
    "recycled_brass",
    "soapstone",
    "reclaimed_wood",
    "horn_bone",
];

pub const MOTIFS: &[&str] = &[
    "kente_asante",
    "adire_oniko",
    "bogolanfini_symbols",
    "ankara_prints",
];

pub const SIZES: &[&str] = &["xs", "s", "m", "l", "xl"];

pub static SORT_OPTIONS: &[(SortKey, &str)] = &[
    (SortKey::Relevance, "Relevance"),
    (SortKey::Newest, "Newest"),
    (SortKey::PriceAsc, "Price: Low to High"),
    (SortKey::PriceDesc, "Price: High to Low"),
    (SortKey::RatingDesc, "Rating"),
    (SortKey::BestSellers, "Best sellers"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePreset {
    pub label: &'static str,
    pub range: NumRange,
}

pub const QUICK_PRICE_PRESETS: &[PricePreset] = &[
    PricePreset { label: "Under €25", range: NumRange { min: Some(0.0), max: Some(25.0) } },
    PricePreset { label: "€25–€50", range: NumRange { min: Some(25.0), max: Some(50.0) } },
    PricePreset { label: "€50+", range: NumRange { min: Some(50.0), max: None } },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub slug: &'static str,
    pub label: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { slug: "home-living/decor", label: "Home & Living" },
    Category { slug: "home-living/baskets", label: "Baskets" },
    Category { slug: "home-living/textiles-throws", label: "Textiles & Throws" },
    Category { slug: "fashion-accessories/apparel", label: "Apparel" },
    Category { slug: "fashion-accessories/jewelry", label: "Jewelry" },
    Category { slug: "art-sculpture/stone-soapstone", label: "Stone/Soapstone" },
    Category { slug: "art-sculpture/wood-carvings", label: "Wood Carvings" },
    Category { slug: "kids-toys", label: "Kids & Toys" },
    Category { slug: "music-instruments", label: "Music & Instruments" },
    Category { slug: "stationery-gifts", label: "Stationery & Gifts" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unset_range_ignores_non_finite_bounds() {
        assert!(NumRange::default().is_unset());
        assert!(NumRange::new(Some(f64::NAN), None).is_unset());
        assert!(!NumRange::at_most(120.0).is_unset());
    }

    #[test]
    fn state_with_only_unwritable_values_is_empty() {
        let mut state = FilterState {
            price: NumRange::new(Some(f64::NAN), Some(f64::INFINITY)),
            wt: NumRange::at_least(f64::NEG_INFINITY),
            in_stock: Some(false),
            rating: Some(f64::NAN),
            cat: Some(String::new()),
            ..Default::default()
        };
        assert!(state.is_empty());

        state.lead = NumRange::at_most(14.0);
        assert!(!state.is_empty());
    }

    #[test]
    fn range_contains_is_inclusive() {
        let r = NumRange::between(20.0, 120.0);
        assert!(r.contains(20.0));
        assert!(r.contains(120.0));
        assert!(!r.contains(120.5));
        assert!(NumRange::at_least(50.0).contains(1e9));
    }

    #[test]
    fn unknown_sort_key_is_kept() {
        assert_eq!(SortKey::from_token("price_asc"), SortKey::PriceAsc);
        assert_eq!(
            SortKey::from_token("distance"),
            SortKey::Other("distance".to_string())
        );
        assert_eq!(SortKey::from_token("distance").to_string(), "distance");
        assert_eq!("".parse::<SortKey>(), Err(TokenParseError::Empty));
    }

    #[test]
    fn returns_only_knows_free() {
        assert_eq!("free".parse::<Returns>(), Ok(Returns::Free));
        assert!("paid".parse::<Returns>().is_err());
    }

    #[test]
    fn insert_token_trims_and_rejects_separators() {
        let mut state = FilterState::default();
        assert!(state.insert_token(Facet::Mat, " cotton "));
        assert!(!state.insert_token(Facet::Mat, "cotton"));
        assert!(!state.insert_token(Facet::Mat, "   "));
        assert!(!state.insert_token(Facet::Mat, "a,b"));
        assert_eq!(state.mat, BTreeSet::from(["cotton".to_string()]));
    }

    #[test]
    fn toggle_token_adds_then_removes() {
        let mut state = FilterState::default();
        state.toggle_token(Facet::Ship, "express");
        assert!(state.ship.contains("express"));
        state.toggle_token(Facet::Ship, "express");
        assert!(state.is_empty());
    }

    #[test]
    fn serde_uses_camel_case_and_skips_unset() {
        let state = FilterState {
            in_stock: Some(true),
            ship_from: BTreeSet::from(["GH".to_string()]),
            sort: Some(SortKey::Newest),
            ..Default::default()
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"inStock":true,"shipFrom":["GH"],"sort":"newest"}"#);
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
