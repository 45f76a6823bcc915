//! Pricing widget: binds the pricing engine to the page's `data-*` markup

pub mod binder;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod surface;

pub use binder::{PLACEHOLDER, PricingInput, RenderBinder};
pub use surface::PageSurface;

use crate::core::discount::{DiscountOverrides, DiscountTable};
use crate::core::normalizer::PlanKey;

/// Control attributes the widget listens on, with their input kind
pub const CONTROL_KINDS: [&str; 3] = ["currency", "timeframe", "unit"];

/// Collect the discount overrides of every `[data-pricing]` card.
///
/// The override attributes may sit on the card itself or on any element inside it.
pub fn read_discounts<S: PageSurface>(surface: &S) -> DiscountTable {
    let mut table = DiscountTable::new();
    for root in surface.query_all("[data-pricing]") {
        let Some(key) = surface
            .attribute(&root, "data-pricing")
            .and_then(|k| PlanKey::from_key(&k))
        else {
            continue;
        };
        let read = |name: &str| {
            surface.attribute(&root, name).or_else(|| {
                surface
                    .query_in(&root, &format!("[{}]", name))
                    .and_then(|node| surface.attribute(&node, name))
            })
        };
        let overrides = DiscountOverrides::from_attributes(
            read("data-discount-yearly").as_deref(),
            read("data-discount-biyearly").as_deref(),
        );
        if overrides != DiscountOverrides::default() {
            table.insert(key, overrides);
        }
    }
    table
}

/// Load prices and bind the widget to the current document
#[cfg(feature = "hydrate")]
pub async fn boot() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::client::{BrowserPriceSource, PriceCatalogClient};
    use crate::core::config::PricingConfig;
    use crate::core::state::PricingState;
    use crate::ui::pricing::dom::DomSurface;

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(surface) = DomSurface::from_window() else {
        leptos::logging::warn!("Pricing widget: no document available");
        return;
    };
    if surface.query_all("[data-pricing], [data-price]").is_empty() {
        return;
    }

    let location = window.location();
    let hostname = location.hostname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    let lang = surface
        .document()
        .document_element()
        .and_then(|html| html.get_attribute("lang"))
        .unwrap_or_default();

    let config = PricingConfig::from_page(&hostname, &lang, &search, read_discounts(&surface));
    let currency = config.initial_currency;
    let discounts = config.discounts.clone();
    let catalog = PriceCatalogClient::new(BrowserPriceSource, config).load().await;

    let state = PricingState::new(&catalog, discounts, currency);
    let binder = Rc::new(RefCell::new(RenderBinder::new(surface, state)));
    wire_controls(&binder);
    binder.borrow_mut().render();
}

#[cfg(feature = "hydrate")]
fn wire_controls(
    binder: &std::rc::Rc<std::cell::RefCell<RenderBinder<dom::DomSurface>>>,
) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    for kind in CONTROL_KINDS {
        let attribute = format!("data-change-{}", kind);
        let controls = binder.borrow().surface().query_all(&format!("[{}]", attribute));
        for control in controls {
            let Some(input) = control
                .get_attribute(&attribute)
                .and_then(|value| PricingInput::from_control(kind, &value))
            else {
                leptos::logging::warn!("Ignoring pricing control with invalid `{}`", attribute);
                continue;
            };

            let binder = std::rc::Rc::clone(binder);
            let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                binder.borrow_mut().handle(input);
            });
            let _ = control
                .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());

            // Keep the closure alive for the page lifetime
            handler.forget();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pricing::surface::testing::FakePage;

    #[test]
    fn test_read_discounts_from_cards() {
        let mut page = FakePage::new();
        let body = page.root();
        page.add(body, "div[data-pricing=pro][data-discount-yearly=20]", "");
        let ultimate = page.add(body, "div[data-pricing=ultimate]", "");
        page.add(ultimate, "span[data-discount-biyearly=30]", "");
        page.add(body, "div[data-pricing=slim]", "");
        page.add(body, "div[data-pricing=enterprise][data-discount-yearly=50]", "");

        let table = read_discounts(&page);

        assert_eq!(table.for_plan(&PlanKey::Pro).yearly, Some(20.0));
        assert_eq!(table.for_plan(&PlanKey::Pro).biyearly, None);
        assert_eq!(table.for_plan(&PlanKey::Ultimate).biyearly, Some(30.0));
        assert_eq!(table.for_plan(&PlanKey::Slim), DiscountOverrides::default());
        assert_eq!(
            table.for_plan(&PlanKey::Unknown("enterprise".to_string())),
            DiscountOverrides::default()
        );
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let mut page = FakePage::new();
        let body = page.root();
        page.add(body, "div[data-pricing=pro][data-discount-yearly=soon]", "");

        let table = read_discounts(&page);

        assert_eq!(table.for_plan(&PlanKey::Pro), DiscountOverrides::default());
    }
}
