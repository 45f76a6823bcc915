//! Plan normalization
//!
//! The upstream API has renamed its plan types between versions ("NewBasic",
//! "Slim", "Professional", ...). Everything downstream works on [`PlanKey`],
//! resolved through a static table. Unrecognized types are preserved under
//! [`PlanKey::Unknown`] instead of being dropped.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::LazyLock;

use crate::core::catalog::{Catalog, Currency, RawCatalog, RawPlan, Timeframe};

/// Canonical plan identifier, as used in `data-pricing` attributes
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlanKey {
    Slim,
    StarterFee,
    StarterNoFee,
    Pro,
    Ultimate,
    /// Upstream type with no table entry, kept under its raw name
    Unknown(String),
}

impl PlanKey {
    /// Plans shown on the page, in display order
    pub const CANONICAL: [PlanKey; 5] = [
        PlanKey::Slim,
        PlanKey::StarterFee,
        PlanKey::StarterNoFee,
        PlanKey::Pro,
        PlanKey::Ultimate,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PlanKey::Slim => "slim",
            PlanKey::StarterFee => "starter-fee",
            PlanKey::StarterNoFee => "starter-no-fee",
            PlanKey::Pro => "pro",
            PlanKey::Ultimate => "ultimate",
            PlanKey::Unknown(raw) => raw,
        }
    }

    /// Parse a `data-pricing` attribute value. Only canonical keys are accepted.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::CANONICAL.into_iter().find(|k| k.as_str() == key.trim())
    }

    /// Resolve an upstream plan type through the mapping table
    pub fn from_upstream(kind: &str) -> Self {
        UPSTREAM_PLAN_TYPES
            .get(kind)
            .cloned()
            .unwrap_or_else(|| PlanKey::Unknown(kind.to_string()))
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, PlanKey::Unknown(_))
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream plan type names across API generations
static UPSTREAM_PLAN_TYPES: LazyLock<HashMap<&'static str, PlanKey>> = LazyLock::new(|| {
    [
        // v3
        ("Slim", PlanKey::Slim),
        ("StarterWithFee", PlanKey::StarterFee),
        ("StarterNoFee", PlanKey::StarterNoFee),
        ("Professional", PlanKey::Pro),
        ("Ultimate", PlanKey::Ultimate),
        // v2
        ("NewBasic", PlanKey::StarterFee),
        ("NewBasicNoFee", PlanKey::StarterNoFee),
        // v1
        ("Starter", PlanKey::StarterFee),
        ("Pro", PlanKey::Pro),
    ]
    .into_iter()
    .collect()
});

/// Plans of one currency keyed by canonical key
pub type NormalizedPlans = BTreeMap<PlanKey, RawPlan>;

/// Key every plan of a raw catalog by its canonical name.
///
/// When two upstream plans resolve to the same key the first one wins.
pub fn normalize(catalog: &RawCatalog) -> NormalizedPlans {
    let mut plans = NormalizedPlans::new();
    for plan in &catalog.plans {
        let key = PlanKey::from_upstream(&plan.kind);
        if let Some(existing) = plans.get(&key) {
            leptos::logging::warn!(
                "Plan type `{}` maps to `{}` already taken by `{}`, ignoring it",
                plan.kind,
                key,
                existing.kind
            );
            continue;
        }
        plans.insert(key, plan.clone());
    }
    plans
}

/// Normalized plans for every currency of a catalog
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedCatalog {
    currencies: BTreeMap<Currency, NormalizedPlans>,
}

impl NormalizedCatalog {
    /// Normalize each currency of `catalog`; an empty catalog stays empty.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let currencies = Currency::ALL
            .into_iter()
            .filter_map(|currency| Some((currency, normalize(catalog.get(currency)?))))
            .collect();
        Self { currencies }
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    pub fn plans(&self, currency: Currency) -> Option<&NormalizedPlans> {
        self.currencies.get(&currency)
    }
}

/// Price of `units` rentals for a recurrence, exact tier match only.
///
/// Returns `None` when the plan, the recurrence or the exact tier is missing.
/// Prices are never interpolated between tiers.
pub fn unit_price(plan: Option<&RawPlan>, timeframe: Timeframe, units: u32) -> Option<f64> {
    plan?
        .recurrence(timeframe)?
        .prices
        .iter()
        .find(|entry| entry.unit == units)
        .map(|entry| entry.unit_price)
}
