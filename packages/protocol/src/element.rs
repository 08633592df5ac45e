use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of the UI tree as held by the tree store.
///
/// `children` are plain keys into the store, resolved lazily at render time;
/// they may name elements that have not arrived yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub key: String,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl Element {
    pub fn new(key: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            component_type: component_type.into(),
            props: Map::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, key: impl Into<String>) -> Self {
        self.children.push(key.into());
        self
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name).filter(|value| !value.is_null())
    }

    /// String prop, treating `null` as absent
    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.prop(name).and_then(Value::as_str)
    }

    pub fn prop_bool(&self, name: &str) -> Option<bool> {
        self.prop(name).and_then(Value::as_bool)
    }

    pub fn prop_f64(&self, name: &str) -> Option<f64> {
        self.prop(name).and_then(Value::as_f64)
    }
}

/// Element payload of an `add` operation before catalog validation
#[derive(Debug, Clone, PartialEq)]
pub struct RawElement {
    pub key: String,
    pub component_type: String,
    pub props: Value,
    pub children: Vec<String>,
}
