//! Price catalog data model
//!
//! Wire types for the `plan-prices` API plus the small enums (currency,
//! billing timeframe, unit count) the rest of the pricing engine is keyed on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest number of rentals a visitor can price
pub const MIN_UNITS: u32 = 1;

/// Highest number of rentals a visitor can price (also the `numberOfRentals` we request)
pub const MAX_UNITS: u32 = 100;

/// Currencies the pricing table can be shown in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Gbp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eur => "eur",
            Currency::Usd => "usd",
            Currency::Gbp => "gbp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eur" => Some(Currency::Eur),
            "usd" => Some(Currency::Usd),
            "gbp" => Some(Currency::Gbp),
            _ => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
        }
    }

    /// EUR prices read `49 €`, the others `$49`
    pub fn glyph_after_digits(&self) -> bool {
        matches!(self, Currency::Eur)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing timeframe selected by the visitor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    Monthly,
    #[default]
    Yearly,
    BiYearly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Monthly, Timeframe::Yearly, Timeframe::BiYearly];

    /// Recurrence type string used by the upstream API and the `data-change-timeframe` controls
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Monthly => "Monthly",
            Timeframe::Yearly => "Yearly",
            Timeframe::BiYearly => "BiYearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "Monthly" => Some(Timeframe::Monthly),
            "Yearly" => Some(Timeframe::Yearly),
            "BiYearly" => Some(Timeframe::BiYearly),
            _ => None,
        }
    }

    /// Number of months one billing period covers
    pub fn months(&self) -> u32 {
        match self {
            Timeframe::Monthly => 1,
            Timeframe::Yearly => 12,
            Timeframe::BiYearly => 24,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of rentals being priced, always within `[MIN_UNITS, MAX_UNITS]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitCount(u32);

impl UnitCount {
    pub fn new(units: u32) -> Self {
        Self(units.clamp(MIN_UNITS, MAX_UNITS))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Step up by one; returns `false` when already at the maximum
    pub fn increment(&mut self) -> bool {
        if self.0 >= MAX_UNITS {
            return false;
        }
        self.0 += 1;
        true
    }

    /// Step down by one; returns `false` when already at the minimum
    pub fn decrement(&mut self) -> bool {
        if self.0 <= MIN_UNITS {
            return false;
        }
        self.0 -= 1;
        true
    }

    /// Two-digit zero padded label for `[data-unit]`
    pub fn label(&self) -> String {
        format!("{:02}", self.0)
    }
}

impl Default for UnitCount {
    fn default() -> Self {
        Self(MIN_UNITS)
    }
}

/// Single price tier of a recurrence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceEntry {
    pub unit: u32,
    pub unit_price: f64,
}

/// Billing recurrence of a plan; `kind` is kept as the raw upstream string
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecurrence {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub prices: Vec<RawPriceEntry>,
}

impl RawRecurrence {
    pub fn is(&self, timeframe: Timeframe) -> bool {
        self.kind == timeframe.as_str()
    }
}

/// Plan as published upstream; `kind` drifts between API versions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPlan {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub recurrences: Vec<RawRecurrence>,
}

impl RawPlan {
    pub fn recurrence(&self, timeframe: Timeframe) -> Option<&RawRecurrence> {
        self.recurrences.iter().find(|r| r.is(timeframe))
    }
}

/// Response body of `GET /api/v3/plan-prices/{currency}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub plans: Vec<RawPlan>,
}

/// Catalogs for all currencies. Either every currency is present or none is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    currencies: Option<CurrencyCatalogs>,
}

#[derive(Clone, Debug, PartialEq)]
struct CurrencyCatalogs {
    eur: RawCatalog,
    usd: RawCatalog,
    gbp: RawCatalog,
}

impl Catalog {
    /// Catalog after a failed fetch: every currency absent
    pub fn empty() -> Self {
        Self { currencies: None }
    }

    pub fn new(eur: RawCatalog, usd: RawCatalog, gbp: RawCatalog) -> Self {
        Self {
            currencies: Some(CurrencyCatalogs { eur, usd, gbp }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_none()
    }

    pub fn get(&self, currency: Currency) -> Option<&RawCatalog> {
        let catalogs = self.currencies.as_ref()?;
        Some(match currency {
            Currency::Eur => &catalogs.eur,
            Currency::Usd => &catalogs.usd,
            Currency::Gbp => &catalogs.gbp,
        })
    }
}
