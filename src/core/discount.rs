//! Discount policy
//!
//! Turns a monthly unit price into the monthly-equivalent figure shown for the
//! selected timeframe. Two modes exist and are applied in this order:
//!
//! 1. A discount is configured for the timeframe and the monthly unit price is
//!    known: the discount is applied straight to the monthly unit price.
//! 2. Otherwise the discount (0 when not configured) is applied to the
//!    timeframe total, which is then divided back to a monthly figure.

use std::collections::BTreeMap;

use crate::core::catalog::Timeframe;
use crate::core::normalizer::PlanKey;

/// Badge percent shown for yearly billing when a card has no override
pub const DEFAULT_YEARLY_BADGE_PERCENT: u32 = 20;

/// Badge percent shown for two-year billing when a card has no override
pub const DEFAULT_BIYEARLY_BADGE_PERCENT: u32 = 25;

/// Per-plan discount overrides, read from `data-discount-yearly` / `data-discount-biyearly`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiscountOverrides {
    pub yearly: Option<f64>,
    pub biyearly: Option<f64>,
}

impl DiscountOverrides {
    /// Build from the raw attribute strings. Unparseable values count as absent.
    pub fn from_attributes(yearly: Option<&str>, biyearly: Option<&str>) -> Self {
        Self {
            yearly: yearly.and_then(parse_percent),
            biyearly: biyearly.and_then(parse_percent),
        }
    }

    /// Discount configured for a timeframe. Monthly billing is never discounted.
    pub fn percent_for(&self, timeframe: Timeframe) -> Option<f64> {
        match timeframe {
            Timeframe::Monthly => None,
            Timeframe::Yearly => self.yearly,
            Timeframe::BiYearly => self.biyearly,
        }
    }

    /// Rounded percent for the `[data-percent]` badge; `None` on monthly billing.
    ///
    /// Falls back to the cosmetic defaults, which never affect the price math.
    pub fn badge_percent(&self, timeframe: Timeframe) -> Option<u32> {
        let fallback = match timeframe {
            Timeframe::Monthly => return None,
            Timeframe::Yearly => DEFAULT_YEARLY_BADGE_PERCENT,
            Timeframe::BiYearly => DEFAULT_BIYEARLY_BADGE_PERCENT,
        };
        Some(
            self.percent_for(timeframe)
                .map(|pct| pct.round() as u32)
                .unwrap_or(fallback),
        )
    }
}

fn parse_percent(raw: &str) -> Option<f64> {
    let pct: f64 = raw.trim().trim_end_matches('%').trim().parse().ok()?;
    pct.is_finite().then(|| pct.clamp(0.0, 100.0))
}

/// Discount overrides of every plan card on the page
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiscountTable {
    overrides: BTreeMap<PlanKey, DiscountOverrides>,
}

impl DiscountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(mut self, plan: PlanKey, overrides: DiscountOverrides) -> Self {
        self.insert(plan, overrides);
        self
    }

    pub fn insert(&mut self, plan: PlanKey, overrides: DiscountOverrides) {
        self.overrides.insert(plan, overrides);
    }

    pub fn for_plan(&self, plan: &PlanKey) -> DiscountOverrides {
        self.overrides.get(plan).copied().unwrap_or_default()
    }
}

/// Monthly-equivalent price for a timeframe, see the module docs for the mode order.
pub fn displayed_monthly_equivalent(
    monthly_unit: Option<f64>,
    timeframe: Timeframe,
    discount_percent: Option<f64>,
) -> Option<i64> {
    let monthly = monthly_unit?;
    if timeframe == Timeframe::Monthly {
        return Some(monthly.round() as i64);
    }

    if let Some(pct) = discount_percent {
        return Some(apply_discount(monthly, pct).round() as i64);
    }

    let months = f64::from(timeframe.months());
    let total = apply_discount(monthly * months, discount_percent.unwrap_or(0.0));
    Some((total / months).round() as i64)
}

fn apply_discount(amount: f64, pct: f64) -> f64 {
    amount * (1.0 - pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_is_rounded_monthly_price() {
        assert_eq!(
            displayed_monthly_equivalent(Some(49.6), Timeframe::Monthly, None),
            Some(50)
        );
        // Monthly billing ignores any discount argument
        assert_eq!(
            displayed_monthly_equivalent(Some(49.6), Timeframe::Monthly, Some(20.0)),
            Some(50)
        );
    }

    #[test]
    fn test_yearly_without_discount_is_undiscounted_equivalent() {
        assert_eq!(
            displayed_monthly_equivalent(Some(50.0), Timeframe::Yearly, None),
            Some(50)
        );
        assert_eq!(
            displayed_monthly_equivalent(Some(50.0), Timeframe::BiYearly, None),
            Some(50)
        );
    }

    #[test]
    fn test_configured_discount_applies_to_monthly_unit() {
        assert_eq!(
            displayed_monthly_equivalent(Some(50.0), Timeframe::Yearly, Some(20.0)),
            Some(40)
        );
        assert_eq!(
            displayed_monthly_equivalent(Some(33.0), Timeframe::BiYearly, Some(25.0)),
            Some((33.0_f64 * 0.75).round() as i64)
        );
    }

    #[test]
    fn test_missing_monthly_price_stays_missing() {
        assert_eq!(
            displayed_monthly_equivalent(None, Timeframe::Yearly, Some(20.0)),
            None
        );
        assert_eq!(displayed_monthly_equivalent(None, Timeframe::Monthly, None), None);
    }

    #[test]
    fn test_overrides_parse_attribute_values() {
        let overrides = DiscountOverrides::from_attributes(Some("15"), Some(" 30% "));
        assert_eq!(overrides.yearly, Some(15.0));
        assert_eq!(overrides.biyearly, Some(30.0));

        let overrides = DiscountOverrides::from_attributes(Some("abc"), Some("NaN"));
        assert_eq!(overrides, DiscountOverrides::default());

        let overrides = DiscountOverrides::from_attributes(Some("150"), Some("-5"));
        assert_eq!(overrides.yearly, Some(100.0));
        assert_eq!(overrides.biyearly, Some(0.0));
    }

    #[test]
    fn test_percent_for_timeframe() {
        let overrides = DiscountOverrides {
            yearly: Some(10.0),
            biyearly: Some(18.0),
        };
        assert_eq!(overrides.percent_for(Timeframe::Monthly), None);
        assert_eq!(overrides.percent_for(Timeframe::Yearly), Some(10.0));
        assert_eq!(overrides.percent_for(Timeframe::BiYearly), Some(18.0));
    }

    #[test]
    fn test_badge_defaults_are_cosmetic() {
        let none = DiscountOverrides::default();
        assert_eq!(none.badge_percent(Timeframe::Monthly), None);
        assert_eq!(none.badge_percent(Timeframe::Yearly), Some(20));
        assert_eq!(none.badge_percent(Timeframe::BiYearly), Some(25));
        // The defaults never leak into the price math
        assert_eq!(none.percent_for(Timeframe::Yearly), None);

        let configured = DiscountOverrides {
            yearly: Some(12.6),
            biyearly: None,
        };
        assert_eq!(configured.badge_percent(Timeframe::Yearly), Some(13));
        assert_eq!(configured.badge_percent(Timeframe::BiYearly), Some(25));
    }

    #[test]
    fn test_discount_table_lookup() {
        let table = DiscountTable::new().with_plan(
            PlanKey::Pro,
            DiscountOverrides {
                yearly: Some(20.0),
                biyearly: None,
            },
        );

        assert_eq!(table.for_plan(&PlanKey::Pro).yearly, Some(20.0));
        assert_eq!(table.for_plan(&PlanKey::Slim), DiscountOverrides::default());
    }
}
