//! Tier fallback resolution
//!
//! Price tables are sparse. When the requested rental count has no exact
//! entry, the plan is offered at the nearest lower tier instead. We never
//! round up: a larger tier would look cheaper per rental than what the
//! visitor can actually buy.

use std::collections::BTreeSet;

use crate::core::catalog::{RawPlan, Timeframe};

/// Outcome of looking up a rental count in a plan's tiers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierResolution {
    /// A Monthly, Yearly or BiYearly price exists for the requested count
    pub exact: bool,
    /// Greatest published tier strictly below the requested count (only when not exact)
    pub nearest_lower_tier: Option<u32>,
}

/// What the page can offer for a plan at the current rental count
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Priced,
    /// No exact tier, capped at `max_units` rentals
    Limited { max_units: u32 },
    /// No exact tier and nothing below it either
    Unavailable,
}

impl Availability {
    pub fn from_resolution(resolution: TierResolution) -> Self {
        match resolution {
            TierResolution { exact: true, .. } => Availability::Priced,
            TierResolution {
                nearest_lower_tier: Some(max_units),
                ..
            } => Availability::Limited { max_units },
            TierResolution { .. } => Availability::Unavailable,
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, Availability::Priced)
    }

    /// Text of the `.plan-limited-note`, `None` when the plan is fully priced
    pub fn note(&self, requested_units: u32) -> Option<String> {
        match self {
            Availability::Priced => None,
            Availability::Limited { max_units } => {
                Some(format!("Available for up to {} rentals", max_units))
            }
            Availability::Unavailable => {
                Some(format!("Not available for {} rentals", requested_units))
            }
        }
    }
}

/// Every unit tier published by the plan across all recurrences, ascending
pub fn tiers(plan: &RawPlan) -> Vec<u32> {
    plan.recurrences
        .iter()
        .flat_map(|r| r.prices.iter().map(|p| p.unit))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Check whether `requested` rentals are priced, otherwise find the nearest lower tier.
pub fn resolve(plan: &RawPlan, requested: u32) -> TierResolution {
    let exact = Timeframe::ALL.iter().any(|&timeframe| {
        plan.recurrence(timeframe)
            .is_some_and(|r| r.prices.iter().any(|p| p.unit == requested))
    });

    if exact {
        return TierResolution {
            exact: true,
            nearest_lower_tier: None,
        };
    }

    TierResolution {
        exact: false,
        nearest_lower_tier: tiers(plan).into_iter().rev().find(|&tier| tier < requested),
    }
}
