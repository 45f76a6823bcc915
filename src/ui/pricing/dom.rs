//! Browser implementation of [`PageSurface`] on top of `web-sys`

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::core::error::BindingError;
use crate::ui::pricing::surface::PageSurface;

/// Duration of a numeric tween
const TWEEN_MS: u32 = 500;

/// Delay between tween frames
const FRAME_MS: u32 = 16;

/// Attribute holding the id of the tween that currently owns an element
const TWEEN_ATTR: &str = "data-tween";

pub struct DomSurface {
    document: Document,
    next_tween: u64,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            next_tween: 0,
        }
    }

    /// Surface over the current window's document
    pub fn from_window() -> Option<Self> {
        Some(Self::new(web_sys::window()?.document()?))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn describe(node: &Element) -> String {
    let id = node.id();
    if id.is_empty() {
        node.tag_name().to_lowercase()
    } else {
        format!("#{}", id)
    }
}

fn dom_error(node: &Element, err: wasm_bindgen::JsValue) -> BindingError {
    BindingError::dom(describe(node), format!("{:?}", err))
}

/// power2.out easing
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(2)
}

impl PageSurface for DomSurface {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<(), BindingError> {
        // Cancels any running tween on this node
        let _ = node.remove_attribute(TWEEN_ATTR);
        node.set_text_content(Some(text));
        Ok(())
    }

    fn animate_number(&mut self, node: &Element, to: i64) -> Result<(), BindingError> {
        self.next_tween += 1;
        let tween_id = self.next_tween.to_string();
        node.set_attribute(TWEEN_ATTR, &tween_id)
            .map_err(|e| dom_error(node, e))?;

        let from = self.text(node).trim().parse::<i64>().unwrap_or(0);
        let node = node.clone();
        spawn_local(async move {
            let frames = (TWEEN_MS / FRAME_MS).max(1);
            for frame in 1..=frames {
                TimeoutFuture::new(FRAME_MS).await;
                if node.get_attribute(TWEEN_ATTR).as_deref() != Some(tween_id.as_str()) {
                    return;
                }
                let progress = ease_out(f64::from(frame) / f64::from(frames));
                let value = from as f64 + (to - from) as f64 * progress;
                node.set_text_content(Some(&(value.round() as i64).to_string()));
            }
            node.set_text_content(Some(&to.to_string()));
            let _ = node.remove_attribute(TWEEN_ATTR);
        });
        Ok(())
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(
        &mut self,
        node: &Element,
        name: &str,
        value: &str,
    ) -> Result<(), BindingError> {
        node.set_attribute(name, value).map_err(|e| dom_error(node, e))
    }

    fn set_class(&mut self, node: &Element, class: &str, on: bool) -> Result<(), BindingError> {
        node.class_list()
            .toggle_with_force(class, on)
            .map(|_| ())
            .map_err(|e| dom_error(node, e))
    }

    fn set_hidden(&mut self, node: &Element, hidden: bool) -> Result<(), BindingError> {
        if hidden {
            node.set_attribute("hidden", "").map_err(|e| dom_error(node, e))
        } else {
            node.remove_attribute("hidden").map_err(|e| dom_error(node, e))
        }
    }

    fn append_child(&mut self, parent: &Element, class: &str) -> Result<Element, BindingError> {
        let child = self
            .document
            .create_element("div")
            .map_err(|e| dom_error(parent, e))?;
        child.set_class_name(class);
        parent.append_child(&child).map_err(|e| dom_error(parent, e))?;
        Ok(child)
    }

    fn place_in_parent(&mut self, node: &Element, after: bool) -> Result<(), BindingError> {
        let parent = node
            .parent_element()
            .ok_or_else(|| BindingError::dom(describe(node), "element has no parent"))?;
        let moved = if after {
            parent.append_child(node).map(|_| ())
        } else {
            parent.prepend_with_node_1(node)
        };
        moved.map_err(|e| dom_error(node, e))
    }
}
