//! Core pricing engine: catalog model, normalization, discount and tier policy, state

pub mod catalog;
pub mod client;
pub mod config;
pub mod countdown;
pub mod discount;
pub mod error;
pub mod normalizer;
pub mod state;
pub mod tiers;

pub use catalog::{Catalog, Currency, RawCatalog, RawPlan, Timeframe, UnitCount};
pub use client::{PriceCatalogClient, PriceSource};
pub use config::{CatalogQuery, Endpoint, PricingConfig};
pub use discount::{DiscountOverrides, DiscountTable};
pub use error::{BindingError, FetchError};
pub use normalizer::{NormalizedCatalog, PlanKey};
pub use state::{PerPlanDerived, PlanPricing, PricingState};
pub use tiers::{Availability, TierResolution};
