//! Render binder
//!
//! Owns the pricing state and writes its derived values into the page. Every
//! input goes through [`RenderBinder::handle`], which recomputes the state and
//! renders again. Rendering is idempotent: elements the binder creates are
//! looked up by a stable class first and updated in place.

use crate::core::catalog::{Currency, Timeframe};
use crate::core::error::BindingError;
use crate::core::normalizer::PlanKey;
use crate::core::state::{PlanPricing, PricingState};
use crate::core::tiers::Availability;
use crate::ui::pricing::surface::PageSurface;

/// Shown instead of a number whenever a price is unknown
pub const PLACEHOLDER: &str = "–";

/// Class of the note synthesized for limited or unavailable plans
pub const LIMITED_NOTE_CLASS: &str = "plan-limited-note";

/// Call-to-action text of plans that cannot be bought at the selected count
pub const LIMITED_CTA_TEXT: &str = "Contact sales";

const ACTIVE_CLASS: &str = "is-active";
const CTA_DEFAULT_ATTR: &str = "data-cta-default";

/// A visitor action on one of the pricing controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PricingInput {
    Currency(Currency),
    Timeframe(Timeframe),
    UnitsUp,
    UnitsDown,
}

impl PricingInput {
    /// Parse the value of a `data-change-{kind}` control
    pub fn from_control(kind: &str, value: &str) -> Option<Self> {
        match kind {
            "currency" => Currency::from_str(value).map(PricingInput::Currency),
            "timeframe" => Timeframe::from_str(value).map(PricingInput::Timeframe),
            "unit" => match value.trim() {
                "plus" => Some(PricingInput::UnitsUp),
                "minus" => Some(PricingInput::UnitsDown),
                _ => None,
            },
            _ => None,
        }
    }
}

pub struct RenderBinder<S: PageSurface> {
    surface: S,
    state: PricingState,
    rendered_once: bool,
}

impl<S: PageSurface> RenderBinder<S> {
    pub fn new(surface: S, state: PricingState) -> Self {
        Self {
            surface,
            state,
            rendered_once: false,
        }
    }

    pub fn state(&self) -> &PricingState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Apply a visitor input, then recompute and render
    pub fn handle(&mut self, input: PricingInput) -> Vec<BindingError> {
        match input {
            PricingInput::Currency(currency) => {
                self.state.set_currency(currency);
            }
            PricingInput::Timeframe(timeframe) => {
                self.state.set_timeframe(timeframe);
            }
            PricingInput::UnitsUp => {
                self.state.increment_units();
            }
            PricingInput::UnitsDown => {
                self.state.decrement_units();
            }
        }
        self.state.recompute();
        self.render()
    }

    /// Write the current derived state into the page.
    ///
    /// Each write is guarded on its own; failures are logged and returned but
    /// never stop the remaining writes.
    pub fn render(&mut self) -> Vec<BindingError> {
        let animate = self.rendered_once;
        let mut errors = Vec::new();

        let plans: Vec<(PlanKey, PlanPricing)> = self
            .state
            .derived()
            .iter()
            .map(|(key, pricing)| (key.clone(), pricing.clone()))
            .collect();
        for (key, pricing) in &plans {
            self.bind_prices(key, pricing, animate, &mut errors);
            self.bind_original(key, pricing, animate, &mut errors);
            self.bind_card(key, pricing, &mut errors);
        }

        self.bind_currency(&mut errors);
        self.bind_active("data-change-currency", self.state.currency().as_str(), &mut errors);
        self.bind_active("data-change-timeframe", self.state.timeframe().as_str(), &mut errors);
        self.bind_units(&mut errors);

        for error in &errors {
            leptos::logging::warn!("Pricing binding skipped: {}", error);
        }
        self.rendered_once = true;
        errors
    }

    fn write_number(
        &mut self,
        node: &S::Node,
        value: Option<i64>,
        animate: bool,
    ) -> Result<(), BindingError> {
        match value {
            Some(value) if animate => self.surface.animate_number(node, value),
            Some(value) => self.surface.set_text(node, &value.to_string()),
            None => self.surface.set_text(node, PLACEHOLDER),
        }
    }

    /// `#<key>-price strong` and `[data-price="<key>"] strong`
    fn bind_prices(
        &mut self,
        key: &PlanKey,
        pricing: &PlanPricing,
        animate: bool,
        errors: &mut Vec<BindingError>,
    ) {
        let by_id = format!("#{}-price", key);
        let by_attr = format!("[data-price=\"{}\"]", key);
        let mut targets = self.surface.query_all(&by_id);
        targets.extend(self.surface.query_all(&by_attr));

        if targets.is_empty() {
            // Pages may leave plans out; only a card without its price is broken markup
            if !self.card_roots(key).is_empty() {
                errors.push(BindingError::missing(by_id));
            }
            return;
        }

        for target in targets {
            let Some(strong) = self.surface.query_in(&target, "strong") else {
                errors.push(BindingError::missing(format!("{} strong", by_attr)));
                continue;
            };
            errors.extend(self.write_number(&strong, pricing.displayed_price, animate).err());
        }
    }

    /// `[data-original="<key>"]`, hidden on monthly billing
    fn bind_original(
        &mut self,
        key: &PlanKey,
        pricing: &PlanPricing,
        animate: bool,
        errors: &mut Vec<BindingError>,
    ) {
        let hidden = self.state.timeframe() == Timeframe::Monthly;
        for target in self.surface.query_all(&format!("[data-original=\"{}\"]", key)) {
            let node = self
                .surface
                .query_in(&target, "strong")
                .unwrap_or_else(|| target.clone());
            errors.extend(self.write_number(&node, pricing.original_price, animate).err());
            errors.extend(self.surface.set_hidden(&target, hidden).err());
        }
    }

    fn card_roots(&self, key: &PlanKey) -> Vec<S::Node> {
        self.surface
            .query_all(&format!("[data-pricing=\"{}\"]", key))
    }

    /// Badge, limited-availability note and call to action inside the plan card
    fn bind_card(&mut self, key: &PlanKey, pricing: &PlanPricing, errors: &mut Vec<BindingError>) {
        let units = self.state.units().get();
        for root in self.card_roots(key) {
            if let Some(badge) = self.surface.query_in(&root, "[data-percent]") {
                match pricing.badge_percent {
                    Some(percent) => {
                        errors.extend(self.surface.set_text(&badge, &percent.to_string()).err());
                        errors.extend(self.surface.set_hidden(&badge, false).err());
                    }
                    None => errors.extend(self.surface.set_hidden(&badge, true).err()),
                }
            }

            self.bind_note(&root, pricing.availability.note(units), errors);

            if let Some(cta) = self.surface.query_in(&root, "[data-cta]") {
                self.bind_cta(&cta, pricing.availability, errors);
            }
        }
    }

    /// Create the note once, then only update or hide it
    fn bind_note(&mut self, root: &S::Node, note: Option<String>, errors: &mut Vec<BindingError>) {
        let selector = format!(".{}", LIMITED_NOTE_CLASS);
        let existing = self.surface.query_in(root, &selector);
        match (existing, note) {
            (Some(node), Some(text)) => {
                errors.extend(self.surface.set_text(&node, &text).err());
                errors.extend(self.surface.set_hidden(&node, false).err());
            }
            (None, Some(text)) => match self.surface.append_child(root, LIMITED_NOTE_CLASS) {
                Ok(node) => errors.extend(self.surface.set_text(&node, &text).err()),
                Err(e) => errors.push(e),
            },
            (Some(node), None) => errors.extend(self.surface.set_hidden(&node, true).err()),
            (None, None) => {}
        }
    }

    fn bind_cta(
        &mut self,
        cta: &S::Node,
        availability: Availability,
        errors: &mut Vec<BindingError>,
    ) {
        let default = self.surface.attribute(cta, CTA_DEFAULT_ATTR);
        if availability.is_priced() {
            if let Some(default) = default {
                errors.extend(self.surface.set_text(cta, &default).err());
            }
            return;
        }
        if default.is_none() {
            let current = self.surface.text(cta);
            if let Err(e) = self.surface.set_attribute(cta, CTA_DEFAULT_ATTR, &current) {
                // The default must be saved before the text is swapped
                errors.push(e);
                return;
            }
        }
        errors.extend(self.surface.set_text(cta, LIMITED_CTA_TEXT).err());
    }

    fn bind_currency(&mut self, errors: &mut Vec<BindingError>) {
        let currency = self.state.currency();
        let glyphs = self.surface.query_all("[data-currency]");
        if glyphs.is_empty() {
            errors.push(BindingError::missing("[data-currency]"));
            return;
        }
        for glyph in glyphs {
            errors.extend(self.surface.set_text(&glyph, currency.glyph()).err());
            errors.extend(
                self.surface
                    .place_in_parent(&glyph, currency.glyph_after_digits())
                    .err(),
            );
        }
    }

    /// Mark the control whose `attribute` equals `selected` as active
    fn bind_active(&mut self, attribute: &str, selected: &str, errors: &mut Vec<BindingError>) {
        let controls = self.surface.query_all(&format!("[{}]", attribute));
        if controls.is_empty() {
            errors.push(BindingError::missing(format!("[{}]", attribute)));
            return;
        }
        for control in controls {
            let value = self.surface.attribute(&control, attribute);
            let active = value.as_deref().map(str::trim) == Some(selected)
                || value.as_deref().and_then(Currency::from_str).map(|c| c.as_str())
                    == Some(selected);
            errors.extend(self.surface.set_class(&control, ACTIVE_CLASS, active).err());
        }
    }

    fn bind_units(&mut self, errors: &mut Vec<BindingError>) {
        let label = self.state.units().label();
        let targets = self.surface.query_all("[data-unit]");
        if targets.is_empty() {
            errors.push(BindingError::missing("[data-unit]"));
            return;
        }
        for target in targets {
            errors.extend(self.surface.set_text(&target, &label).err());
        }
    }
}
