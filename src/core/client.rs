//! Price catalog client
//!
//! Loads the price lists of all currencies at once. The three requests run
//! concurrently and the result is all-or-nothing: if any of them fails the
//! catalog stays empty rather than being shown with a currency missing.

use std::future::Future;

use futures::future::try_join3;

use crate::core::catalog::{Catalog, Currency, RawCatalog};
use crate::core::config::PricingConfig;
use crate::core::error::FetchError;

/// Transport used to fetch one currency's price list
pub trait PriceSource {
    fn fetch_prices(
        &self,
        currency: Currency,
        url: &str,
    ) -> impl Future<Output = Result<RawCatalog, FetchError>>;
}

/// Fetches the catalog for every currency from the configured API
pub struct PriceCatalogClient<S> {
    source: S,
    config: PricingConfig,
}

impl<S: PriceSource> PriceCatalogClient<S> {
    pub fn new(source: S, config: PricingConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Fetch all three currencies concurrently, failing on the first error
    pub async fn fetch_catalog(&self) -> Result<Catalog, FetchError> {
        let urls = Currency::ALL.map(|currency| self.config.plan_prices_url(currency));
        let (eur, usd, gbp) = try_join3(
            self.source.fetch_prices(Currency::Eur, &urls[0]),
            self.source.fetch_prices(Currency::Usd, &urls[1]),
            self.source.fetch_prices(Currency::Gbp, &urls[2]),
        )
        .await?;
        Ok(Catalog::new(eur, usd, gbp))
    }

    /// Fetch the catalog, falling back to an empty one on any failure
    pub async fn load(&self) -> Catalog {
        match self.fetch_catalog().await {
            Ok(catalog) => {
                leptos::logging::log!(
                    "Loaded plan prices from {}",
                    self.config.endpoint.base_url()
                );
                catalog
            }
            Err(e) => {
                leptos::logging::warn!("Plan prices unavailable: {}", e);
                Catalog::empty()
            }
        }
    }
}

/// Browser transport backed by `fetch`
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPriceSource;

#[cfg(feature = "hydrate")]
impl PriceSource for BrowserPriceSource {
    async fn fetch_prices(&self, currency: Currency, url: &str) -> Result<RawCatalog, FetchError> {
        use gloo_net::http::Request;

        let response = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                currency,
                reason: e.to_string(),
            })?;

        if !response.ok() {
            return Err(FetchError::Status {
                currency,
                status: response.status(),
            });
        }

        response
            .json::<RawCatalog>()
            .await
            .map_err(|e| FetchError::Decode {
                currency,
                reason: e.to_string(),
            })
    }
}
