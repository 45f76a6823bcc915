//! Page surface abstraction
//!
//! The render binder only talks to the page through this trait. The browser
//! implementation lives in `dom.rs`; tests use the in-memory page below.

use crate::core::error::BindingError;

/// Minimal set of element operations the pricing widget needs
pub trait PageSurface {
    type Node: Clone;

    /// All elements matching a CSS selector, in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` matching a CSS selector
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn text(&self, node: &Self::Node) -> String;

    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), BindingError>;

    /// Tween the node's numeric text from its current value to `to`
    fn animate_number(&mut self, node: &Self::Node, to: i64) -> Result<(), BindingError>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(
        &mut self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), BindingError>;

    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool) -> Result<(), BindingError>;

    fn set_hidden(&mut self, node: &Self::Node, hidden: bool) -> Result<(), BindingError>;

    /// Create a `<div class="{class}">` as the last child of `parent`
    fn append_child(
        &mut self,
        parent: &Self::Node,
        class: &str,
    ) -> Result<Self::Node, BindingError>;

    /// Move the node to the start (`after == false`) or end of its parent
    fn place_in_parent(&mut self, node: &Self::Node, after: bool) -> Result<(), BindingError>;
}

#[cfg(test)]
pub mod testing {
    //! In-memory page for binder tests

    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[derive(Clone, Debug, Default)]
    pub struct FakeElement {
        pub tag: String,
        pub id: Option<String>,
        pub classes: BTreeSet<String>,
        pub attributes: BTreeMap<String, String>,
        pub text: String,
        pub hidden: bool,
        pub animations: usize,
        pub parent: Option<usize>,
        pub children: Vec<usize>,
    }

    /// Tree of fake elements; node handles are indices
    #[derive(Debug, Default)]
    pub struct FakePage {
        pub elements: Vec<FakeElement>,
        /// Every `set_text` / `animate_number` call, for counting writes
        pub writes: usize,
        /// Nodes whose writes are rejected
        pub broken: BTreeSet<usize>,
    }

    impl FakePage {
        pub fn new() -> Self {
            Self {
                elements: vec![FakeElement {
                    tag: "body".to_string(),
                    ..Default::default()
                }],
                writes: 0,
                broken: BTreeSet::new(),
            }
        }

        /// Make every write to `node` fail, like a detached or read-only element
        pub fn break_writes(&mut self, node: usize) {
            self.broken.insert(node);
        }

        fn writable(&self, node: usize) -> Result<(), BindingError> {
            if self.broken.contains(&node) {
                return Err(BindingError::dom(
                    self.elements[node].tag.clone(),
                    "write rejected",
                ));
            }
            Ok(())
        }

        pub fn root(&self) -> usize {
            0
        }

        /// Add an element; `markup` is `tag#id.class[attr=value]...` in any order after the tag
        pub fn add(&mut self, parent: usize, markup: &str, text: &str) -> usize {
            let mut element = parse_markup(markup);
            element.text = text.to_string();
            element.parent = Some(parent);
            self.elements.push(element);
            let id = self.elements.len() - 1;
            self.elements[parent].children.push(id);
            id
        }

        pub fn element(&self, node: usize) -> &FakeElement {
            &self.elements[node]
        }

        pub fn first(&self, selector: &str) -> Option<usize> {
            self.query_all(selector).into_iter().next()
        }

        pub fn text_of(&self, selector: &str) -> Option<String> {
            self.first(selector).map(|n| self.elements[n].text.clone())
        }

        fn descendants(&self, node: usize, out: &mut Vec<usize>) {
            for &child in &self.elements[node].children {
                out.push(child);
                self.descendants(child, out);
            }
        }

        fn matches(&self, node: usize, selector: &str) -> bool {
            let element = &self.elements[node];
            let selector = selector.trim();
            if let Some(id) = selector.strip_prefix('#') {
                return element.id.as_deref() == Some(id);
            }
            if let Some(class) = selector.strip_prefix('.') {
                return element.classes.contains(class);
            }
            if let Some(attr) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                return match attr.split_once('=') {
                    Some((name, value)) => {
                        element.attributes.get(name).map(String::as_str)
                            == Some(value.trim_matches('"'))
                    }
                    None => element.attributes.contains_key(attr),
                };
            }
            element.tag == selector
        }
    }

    fn parse_markup(markup: &str) -> FakeElement {
        let mut element = FakeElement::default();
        let tag_end = markup.find(['#', '.', '[']).unwrap_or(markup.len());
        element.tag = markup[..tag_end].to_string();
        let mut rest = &markup[tag_end..];
        while !rest.is_empty() {
            if let Some(attr) = rest.strip_prefix('[') {
                let end = attr.find(']').unwrap();
                let (name, value) = attr[..end].split_once('=').unwrap_or((&attr[..end], ""));
                element
                    .attributes
                    .insert(name.to_string(), value.trim_matches('"').to_string());
                rest = &attr[end + 1..];
            } else {
                let marker = &rest[..1];
                let body = &rest[1..];
                let end = body.find(['#', '.', '[']).unwrap_or(body.len());
                if marker == "#" {
                    element.id = Some(body[..end].to_string());
                } else {
                    element.classes.insert(body[..end].to_string());
                }
                rest = &body[end..];
            }
        }
        element
    }

    impl PageSurface for FakePage {
        type Node = usize;

        fn query_all(&self, selector: &str) -> Vec<usize> {
            let mut all = Vec::new();
            self.descendants(self.root(), &mut all);
            all.into_iter().filter(|&n| self.matches(n, selector)).collect()
        }

        fn query_in(&self, scope: &usize, selector: &str) -> Option<usize> {
            let mut all = Vec::new();
            self.descendants(*scope, &mut all);
            all.into_iter().find(|&n| self.matches(n, selector))
        }

        fn text(&self, node: &usize) -> String {
            self.elements[*node].text.clone()
        }

        fn set_text(&mut self, node: &usize, text: &str) -> Result<(), BindingError> {
            self.writable(*node)?;
            self.writes += 1;
            self.elements[*node].text = text.to_string();
            Ok(())
        }

        fn animate_number(&mut self, node: &usize, to: i64) -> Result<(), BindingError> {
            self.writable(*node)?;
            self.writes += 1;
            let element = &mut self.elements[*node];
            element.animations += 1;
            element.text = to.to_string();
            Ok(())
        }

        fn attribute(&self, node: &usize, name: &str) -> Option<String> {
            self.elements[*node].attributes.get(name).cloned()
        }

        fn set_attribute(
            &mut self,
            node: &usize,
            name: &str,
            value: &str,
        ) -> Result<(), BindingError> {
            self.writable(*node)?;
            self.elements[*node]
                .attributes
                .insert(name.to_string(), value.to_string());
            Ok(())
        }

        fn set_class(&mut self, node: &usize, class: &str, on: bool) -> Result<(), BindingError> {
            self.writable(*node)?;
            let classes = &mut self.elements[*node].classes;
            if on {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
            Ok(())
        }

        fn set_hidden(&mut self, node: &usize, hidden: bool) -> Result<(), BindingError> {
            self.writable(*node)?;
            self.elements[*node].hidden = hidden;
            Ok(())
        }

        fn append_child(&mut self, parent: &usize, class: &str) -> Result<usize, BindingError> {
            self.writable(*parent)?;
            Ok(self.add(*parent, &format!("div.{}", class), ""))
        }

        fn place_in_parent(&mut self, node: &usize, after: bool) -> Result<(), BindingError> {
            self.writable(*node)?;
            let parent = self.elements[*node]
                .parent
                .ok_or_else(|| BindingError::dom("[data-currency]", "detached"))?;
            let children = &mut self.elements[parent].children;
            children.retain(|c| c != node);
            if after {
                children.push(*node);
            } else {
                children.insert(0, *node);
            }
            Ok(())
        }
    }
}
