use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only data the embedding application exposes to rendered text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataModel(Value);

impl DataModel {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Look up a JSON pointer (`/mission/crew`)
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    /// Replace `{{/json/pointer}}` tokens. Tokens that do not resolve are
    /// left as written.
    pub fn interpolate(&self, text: &str) -> String {
        if !text.contains("{{") {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                out.push_str(&rest[open..]);
                return out;
            };

            let pointer = after[..close].trim();
            match self.resolve(pointer) {
                Some(value) => out.push_str(&value),
                None => out.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after[close + 2..];
        }

        out.push_str(rest);
        out
    }

    fn resolve(&self, pointer: &str) -> Option<String> {
        if !pointer.starts_with('/') {
            return None;
        }
        match self.get(pointer)? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<Value> for DataModel {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
