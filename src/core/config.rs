//! Pricing widget configuration.
//!
//! Everything is derived from the page the widget runs on: the hostname picks
//! the price API, `<html lang>` picks the initial currency, the page URL may
//! carry `country`/`region` passthrough parameters, and plan cards may carry
//! discount overrides. Build it with [`PricingConfig::from_page`].

use serde::Serialize;

use crate::core::catalog::{Currency, MAX_UNITS};
use crate::core::discount::DiscountTable;

/// Production subscriptions API
pub const PRODUCTION_BASE_URL: &str = "https://subscriptions.lodgify.com";

/// Staging subscriptions API, also used for unknown hosts
pub const STAGING_BASE_URL: &str = "https://subscriptions.lodgifyintegration.com";

/// Page locales that open the pricing table in euros
pub const EURO_LOCALES: [&str; 5] = ["es-ES", "fr-FR", "pt-PT", "de-DE", "it-IT"];

/// Page URL parameters forwarded to the price API
const PASSTHROUGH_PARAMS: [&str; 2] = ["country", "region"];

/// Price API deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Production,
    Staging,
}

impl Endpoint {
    /// Match the page hostname against the known domains, defaulting to staging
    pub fn for_hostname(hostname: &str) -> Self {
        let hostname = hostname.to_ascii_lowercase();
        if hostname.contains("lodgifyintegrations.com") {
            Endpoint::Staging
        } else if hostname.contains("lodgify.com") {
            Endpoint::Production
        } else {
            Endpoint::Staging
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Endpoint::Production => PRODUCTION_BASE_URL,
            Endpoint::Staging => STAGING_BASE_URL,
        }
    }
}

/// Query string sent with every `plan-prices` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub number_of_rentals: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            number_of_rentals: MAX_UNITS,
            country: None,
            region: None,
        }
    }
}

impl CatalogQuery {
    /// Pick the passthrough parameters out of a page URL query (`?country=DE&utm=x`).
    ///
    /// The first non-empty value of each parameter wins. A query that is not
    /// valid form encoding forwards nothing.
    pub fn from_page_search(search: &str) -> Self {
        let pairs: Vec<(String, String)> =
            match serde_urlencoded::from_str(search.trim_start_matches('?')) {
                Ok(pairs) => pairs,
                Err(e) => {
                    leptos::logging::warn!("Ignoring malformed page query: {}", e);
                    Vec::new()
                }
            };

        let mut query = Self::default();
        for (name, value) in pairs {
            if value.is_empty() || !PASSTHROUGH_PARAMS.contains(&name.as_str()) {
                continue;
            }
            let slot = match name.as_str() {
                "country" => &mut query.country,
                _ => &mut query.region,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Form-encoded query string, without the leading `?`
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_else(|e| {
            leptos::logging::warn!("Dropping passthrough parameters: {}", e);
            format!("numberOfRentals={}", self.number_of_rentals)
        })
    }
}

/// Initial currency for a page locale
pub fn initial_currency(lang: &str) -> Currency {
    if EURO_LOCALES.contains(&lang.trim()) {
        Currency::Eur
    } else {
        Currency::Usd
    }
}

/// Configuration of one pricing widget instance
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub endpoint: Endpoint,
    pub query: CatalogQuery,
    pub initial_currency: Currency,
    pub discounts: DiscountTable,
}

impl PricingConfig {
    pub fn from_page(hostname: &str, lang: &str, search: &str, discounts: DiscountTable) -> Self {
        Self {
            endpoint: Endpoint::for_hostname(hostname),
            query: CatalogQuery::from_page_search(search),
            initial_currency: initial_currency(lang),
            discounts,
        }
    }

    /// URL of the price list for one currency
    pub fn plan_prices_url(&self, currency: Currency) -> String {
        format!(
            "{}/api/v3/plan-prices/{}?{}",
            self.endpoint.base_url(),
            currency,
            self.query.to_query_string()
        )
    }
}
