//! Pricing state
//!
//! Holds the three visitor inputs (currency, timeframe, rental count) and the
//! prices derived from them. Derived values are a pure function of the inputs,
//! the catalog and the discount configuration: every input change is followed
//! by a full [`PricingState::recompute`], there is no partial invalidation.

use std::collections::BTreeMap;

use crate::core::catalog::{Catalog, Currency, Timeframe, UnitCount};
use crate::core::discount::{self, DiscountTable};
use crate::core::normalizer::{self, NormalizedCatalog, NormalizedPlans, PlanKey};
use crate::core::tiers::{self, Availability};

/// Derived prices of one plan
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanPricing {
    /// Raw monthly unit price at the current rental count
    pub monthly_price: Option<f64>,
    /// Monthly-equivalent price after discounts for the current timeframe
    pub displayed_price: Option<i64>,
    /// Monthly-equivalent price before discounts (strike-through)
    pub original_price: Option<i64>,
    pub availability: Availability,
    /// Saving badge text value; `None` on monthly billing
    pub badge_percent: Option<u32>,
}

/// Derived prices of every canonical plan
pub type PerPlanDerived = BTreeMap<PlanKey, PlanPricing>;

/// Derive the prices of every canonical plan for one set of inputs.
///
/// Missing upstream data propagates as `None`; nothing is ever defaulted to 0.
pub fn recompute(
    catalog: &NormalizedCatalog,
    discounts: &DiscountTable,
    currency: Currency,
    timeframe: Timeframe,
    units: UnitCount,
) -> PerPlanDerived {
    let plans = catalog.plans(currency);
    PlanKey::CANONICAL
        .into_iter()
        .map(|key| {
            let pricing = price_plan(plans, discounts, &key, timeframe, units);
            (key, pricing)
        })
        .collect()
}

fn price_plan(
    plans: Option<&NormalizedPlans>,
    discounts: &DiscountTable,
    key: &PlanKey,
    timeframe: Timeframe,
    units: UnitCount,
) -> PlanPricing {
    let plan = plans.and_then(|plans| plans.get(key));
    let units = units.get();
    let overrides = discounts.for_plan(key);

    let monthly_price = normalizer::unit_price(plan, Timeframe::Monthly, units);
    let availability = plan
        .map(|plan| Availability::from_resolution(tiers::resolve(plan, units)))
        .unwrap_or_default();

    let mut pricing = PlanPricing {
        monthly_price,
        displayed_price: None,
        original_price: None,
        availability,
        badge_percent: overrides.badge_percent(timeframe),
    };

    if !availability.is_priced() {
        return pricing;
    }

    let discount_percent = overrides.percent_for(timeframe);
    pricing.displayed_price = match timeframe {
        Timeframe::Monthly => monthly_price.map(|price| price.round() as i64),
        _ if discount_percent.is_some() && monthly_price.is_some() => {
            discount::displayed_monthly_equivalent(monthly_price, timeframe, discount_percent)
        }
        _ => match normalizer::unit_price(plan, timeframe, units) {
            // Published yearly/biyearly tiers are totals for the whole period
            Some(total) => Some((total / f64::from(timeframe.months())).round() as i64),
            None => {
                discount::displayed_monthly_equivalent(monthly_price, timeframe, discount_percent)
            }
        },
    };
    pricing.original_price = monthly_price.map(|price| {
        let months = f64::from(timeframe.months());
        ((price * months).round() / months).round() as i64
    });

    pricing
}

/// The pricing widget's single state instance
#[derive(Clone, Debug)]
pub struct PricingState {
    catalog: NormalizedCatalog,
    discounts: DiscountTable,
    currency: Currency,
    timeframe: Timeframe,
    units: UnitCount,
    derived: PerPlanDerived,
}

impl PricingState {
    /// Build the state once the catalog fetch has settled (successfully or not)
    pub fn new(catalog: &Catalog, discounts: DiscountTable, currency: Currency) -> Self {
        let mut state = Self {
            catalog: NormalizedCatalog::from_catalog(catalog),
            discounts,
            currency,
            timeframe: Timeframe::default(),
            units: UnitCount::default(),
            derived: PerPlanDerived::new(),
        };
        state.recompute();
        state
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn units(&self) -> UnitCount {
        self.units
    }

    pub fn has_catalog(&self) -> bool {
        !self.catalog.is_empty()
    }

    pub fn derived(&self) -> &PerPlanDerived {
        &self.derived
    }

    pub fn plan(&self, key: &PlanKey) -> Option<&PlanPricing> {
        self.derived.get(key)
    }

    pub fn set_currency(&mut self, currency: Currency) -> bool {
        let changed = self.currency != currency;
        self.currency = currency;
        changed
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> bool {
        let changed = self.timeframe != timeframe;
        self.timeframe = timeframe;
        changed
    }

    pub fn increment_units(&mut self) -> bool {
        self.units.increment()
    }

    pub fn decrement_units(&mut self) -> bool {
        self.units.decrement()
    }

    /// Re-derive every plan from the current inputs
    pub fn recompute(&mut self) {
        self.derived = recompute(
            &self.catalog,
            &self.discounts,
            self.currency,
            self.timeframe,
            self.units,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{RawCatalog, RawPlan, RawPriceEntry, RawRecurrence};
    use crate::core::discount::DiscountOverrides;

    fn recurrence(kind: &str, prices: &[(u32, f64)]) -> RawRecurrence {
        RawRecurrence {
            kind: kind.to_string(),
            prices: prices
                .iter()
                .map(|&(unit, unit_price)| RawPriceEntry { unit, unit_price })
                .collect(),
        }
    }

    fn plan(kind: &str, recurrences: Vec<RawRecurrence>) -> RawPlan {
        RawPlan {
            kind: kind.to_string(),
            recurrences,
        }
    }

    fn sample_catalog() -> Catalog {
        let usd = RawCatalog {
            plans: vec![
                plan(
                    "Slim",
                    vec![
                        recurrence("Monthly", &[(1, 19.0), (5, 17.0), (10, 15.0)]),
                        recurrence("Yearly", &[(1, 180.0), (5, 168.0), (10, 150.0)]),
                    ],
                ),
                plan("Professional", vec![recurrence("Monthly", &[(1, 50.0), (2, 48.4)])]),
                plan(
                    "Ultimate",
                    vec![
                        recurrence("Monthly", &[(1, 80.0)]),
                        recurrence("BiYearly", &[(1, 1560.0)]),
                    ],
                ),
            ],
        };
        let eur = RawCatalog {
            plans: vec![plan("Professional", vec![recurrence("Monthly", &[(1, 45.0)])])],
        };
        Catalog::new(eur, usd, RawCatalog::default())
    }

    fn derive(
        discounts: &DiscountTable,
        currency: Currency,
        timeframe: Timeframe,
        units: u32,
    ) -> PerPlanDerived {
        let catalog = NormalizedCatalog::from_catalog(&sample_catalog());
        recompute(&catalog, discounts, currency, timeframe, UnitCount::new(units))
    }

    #[test]
    fn test_yearly_without_tier_or_discount_extrapolates_monthly() {
        let derived = derive(&DiscountTable::new(), Currency::Usd, Timeframe::Yearly, 1);

        let pro = &derived[&PlanKey::Pro];
        assert_eq!(pro.monthly_price, Some(50.0));
        assert_eq!(pro.displayed_price, Some(50));
        assert_eq!(pro.original_price, Some(50));
    }

    #[test]
    fn test_configured_discount_takes_precedence() {
        let discounts = DiscountTable::new().with_plan(
            PlanKey::Pro,
            DiscountOverrides {
                yearly: Some(20.0),
                biyearly: None,
            },
        );

        let derived = derive(&discounts, Currency::Usd, Timeframe::Yearly, 1);

        assert_eq!(derived[&PlanKey::Pro].displayed_price, Some(40));
        assert_eq!(derived[&PlanKey::Pro].original_price, Some(50));
        assert_eq!(derived[&PlanKey::Pro].badge_percent, Some(20));
    }

    #[test]
    fn test_discount_beats_published_tier() {
        let discounts = DiscountTable::new().with_plan(
            PlanKey::Slim,
            DiscountOverrides {
                yearly: Some(10.0),
                biyearly: None,
            },
        );

        let derived = derive(&discounts, Currency::Usd, Timeframe::Yearly, 1);

        // round(19 * 0.9) rather than the published 180 / 12
        assert_eq!(derived[&PlanKey::Slim].displayed_price, Some(17));
    }

    #[test]
    fn test_published_tier_is_divided_into_monthly_equivalent() {
        let derived = derive(&DiscountTable::new(), Currency::Usd, Timeframe::Yearly, 5);
        assert_eq!(derived[&PlanKey::Slim].displayed_price, Some(14));

        let derived = derive(&DiscountTable::new(), Currency::Usd, Timeframe::BiYearly, 1);
        assert_eq!(derived[&PlanKey::Ultimate].displayed_price, Some(65));
        assert_eq!(derived[&PlanKey::Ultimate].original_price, Some(80));
        assert_eq!(derived[&PlanKey::Ultimate].badge_percent, Some(25));
    }

    #[test]
    fn test_monthly_shows_rounded_monthly_price() {
        let derived = derive(&DiscountTable::new(), Currency::Usd, Timeframe::Monthly, 2);

        let pro = &derived[&PlanKey::Pro];
        assert_eq!(pro.monthly_price, Some(48.4));
        assert_eq!(pro.displayed_price, Some(48));
        assert_eq!(pro.badge_percent, None);
    }

    #[test]
    fn test_missing_plan_is_null_not_zero() {
        let derived = derive(&DiscountTable::new(), Currency::Usd, Timeframe::Yearly, 1);

        let starter = &derived[&PlanKey::StarterFee];
        assert_eq!(starter.monthly_price, None);
        assert_eq!(starter.displayed_price, None);
        assert_eq!(starter.original_price, None);
        assert_eq!(starter.availability, Availability::Priced);
    }

    #[test]
    fn test_every_canonical_plan_is_derived() {
        let derived = derive(&DiscountTable::new(), Currency::Gbp, Timeframe::Yearly, 1);

        assert_eq!(derived.len(), PlanKey::CANONICAL.len());
        assert!(derived.values().all(|p| p.displayed_price.is_none()));
    }

    #[test]
    fn test_missing_tier_is_limited_without_price() {
        let derived = derive(&DiscountTable::new(), Currency::Usd, Timeframe::Yearly, 7);

        let slim = &derived[&PlanKey::Slim];
        assert_eq!(slim.availability, Availability::Limited { max_units: 5 });
        assert_eq!(slim.displayed_price, None);
        assert_eq!(slim.original_price, None);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let discounts = DiscountTable::new().with_plan(
            PlanKey::Ultimate,
            DiscountOverrides {
                yearly: Some(15.0),
                biyearly: Some(30.0),
            },
        );

        for timeframe in Timeframe::ALL {
            for units in [1, 2, 5, 7, 10, 100] {
                let first = derive(&discounts, Currency::Usd, timeframe, units);
                let second = derive(&discounts, Currency::Usd, timeframe, units);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_state_initial_inputs() {
        let state = PricingState::new(&sample_catalog(), DiscountTable::new(), Currency::Eur);

        assert_eq!(state.currency(), Currency::Eur);
        assert_eq!(state.timeframe(), Timeframe::Yearly);
        assert_eq!(state.units().get(), 1);
        assert!(state.has_catalog());
        assert_eq!(state.plan(&PlanKey::Pro).unwrap().displayed_price, Some(45));
    }

    #[test]
    fn test_state_returns_to_identical_output() {
        let mut state = PricingState::new(&sample_catalog(), DiscountTable::new(), Currency::Usd);
        let initial = state.derived().clone();

        assert!(state.set_currency(Currency::Eur));
        state.recompute();
        assert!(state.increment_units());
        state.recompute();
        assert_ne!(state.derived(), &initial);

        assert!(state.set_currency(Currency::Usd));
        assert!(state.decrement_units());
        state.recompute();
        assert_eq!(state.derived(), &initial);
    }

    #[test]
    fn test_state_without_catalog_derives_nulls() {
        let state = PricingState::new(&Catalog::empty(), DiscountTable::new(), Currency::Usd);

        assert!(!state.has_catalog());
        assert!(
            state
                .derived()
                .values()
                .all(|p| p.monthly_price.is_none() && p.displayed_price.is_none())
        );
    }

    #[test]
    fn test_state_unit_bounds() {
        let mut state = PricingState::new(&Catalog::empty(), DiscountTable::new(), Currency::Usd);

        assert!(!state.decrement_units());
        for _ in 0..99 {
            assert!(state.increment_units());
        }
        assert_eq!(state.units().get(), 100);
        assert!(!state.increment_units());
    }
}
