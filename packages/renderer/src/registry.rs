//! Component registry: type name → render function.

use crate::context::RenderContext;
use crate::vnode::VNode;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use streamui_catalog::Catalog;
use streamui_protocol::Element;

/// Everything a component body sees
pub struct ComponentInput<'a> {
    pub element: &'a Element,
    /// Already rendered children, in order
    pub children: Vec<VNode>,
    pub context: &'a RenderContext,
}

impl<'a> ComponentInput<'a> {
    /// String prop with data tokens interpolated; empty strings count as absent
    pub fn text(&self, name: &str) -> Option<String> {
        self.element
            .prop_str(name)
            .filter(|text| !text.is_empty())
            .map(|text| self.context.data().interpolate(text))
    }

    /// Enum-like prop with a default
    pub fn choice(&self, name: &str, default: &'a str) -> &'a str {
        self.element.prop_str(name).unwrap_or(default)
    }

    pub fn flag(&self, name: &str, default: bool) -> bool {
        self.element.prop_bool(name).unwrap_or(default)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.element.prop_f64(name)
    }

    /// Array prop, empty when absent
    pub fn list(&self, name: &str) -> &'a [Value] {
        self.element
            .prop(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Interpolated string field of an object inside an array prop
    pub fn field(&self, item: &Value, name: &str) -> Option<String> {
        item.get(name)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(|text| self.context.data().interpolate(text))
    }
}

pub type RenderFn = Arc<dyn Fn(ComponentInput<'_>) -> VNode + Send + Sync>;

/// Dispatch table consulted for every rendered element
#[derive(Clone)]
pub struct Registry {
    components: HashMap<String, RenderFn>,
    fallback: RenderFn,
}

impl Registry {
    /// Empty registry whose fallback renders [`VNode::Fallback`]
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            fallback: Arc::new(|input: ComponentInput<'_>| {
                VNode::fallback(&input.element.key, &input.element.component_type)
                    .with_children(input.children)
            }),
        }
    }

    pub fn register<F>(mut self, component_type: impl Into<String>, render: F) -> Self
    where
        F: Fn(ComponentInput<'_>) -> VNode + Send + Sync + 'static,
    {
        self.components.insert(component_type.into(), Arc::new(render));
        self
    }

    pub fn with_fallback<F>(mut self, render: F) -> Self
    where
        F: Fn(ComponentInput<'_>) -> VNode + Send + Sync + 'static,
    {
        self.fallback = Arc::new(render);
        self
    }

    pub fn get(&self, component_type: &str) -> Option<&RenderFn> {
        self.components.get(component_type)
    }

    /// Renderer for `component_type`, or the fallback
    pub fn resolve(&self, component_type: &str) -> &RenderFn {
        self.components.get(component_type).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.components.contains_key(component_type)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Catalog types that have no renderer here, in catalog order
    pub fn missing_from<'c>(&self, catalog: &'c Catalog) -> Vec<&'c str> {
        catalog
            .component_names()
            .filter(|name| !self.contains(name))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.components.keys().map(String::as_str).collect();
        types.sort_unstable();
        f.debug_struct("Registry").field("components", &types).finish()
    }
}
