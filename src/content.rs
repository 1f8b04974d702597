//! Nodes that a popup can adopt through `wrap()`.
//!
//! A host keeps not-yet-placed components in a [`NodeRegistry`] under string
//! ids. Wrapping by selector moves the component out of the registry and
//! into the panel; wrapping a component directly skips the lookup.

use std::collections::BTreeMap;

use crate::components::Component;

#[derive(Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<String, Box<dyn Component>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, node: Box<dyn Component>) {
        self.nodes.insert(id.into(), node);
    }

    /// Remove and return the node matching `selector` (`#id` or bare `id`).
    pub fn take(&mut self, selector: &str) -> Option<Box<dyn Component>> {
        self.nodes.remove(Self::id_of(selector))
    }

    fn id_of(selector: &str) -> &str {
        let selector = selector.trim();
        selector.strip_prefix('#').unwrap_or(selector)
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.nodes.keys()).finish()
    }
}

/// What `Popup::wrap` should adopt.
pub enum WrapTarget<'a> {
    Component(Box<dyn Component>),
    Selector {
        registry: &'a mut NodeRegistry,
        selector: &'a str,
    },
}
