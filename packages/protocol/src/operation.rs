//! Wire operations.
//!
//! Exactly two line shapes are accepted:
//!
//! ```text
//! {"op":"set","path":"/root","value":"<key>"}
//! {"op":"add","path":"/elements/<key>","value":{"key":"<key>","type":"<Type>","props":{...},"children":[...]}}
//! ```
//!
//! The `<key>` path segment is a JSON pointer token, so `~1` stands for `/`
//! and `~0` for `~`.

use crate::element::{Element, RawElement};
use serde_json::{json, Map, Value};
use thiserror::Error;

const ROOT_PATH: &str = "/root";
const ELEMENTS_PREFIX: &str = "/elements/";

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unsupported operation '{op}' on path '{path}'")]
    UnsupportedOperation { op: String, path: String },

    #[error("Malformed operation: {0}")]
    Malformed(String),
}

impl DecodeError {
    /// Whether the line failed to parse as JSON at all
    pub fn is_syntax(&self) -> bool {
        matches!(self, DecodeError::InvalidJson(_))
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// One decoded protocol line
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    SetRoot { key: String },
    AddElement { key: String, element: RawElement },
}

impl Operation {
    /// Decode one protocol line
    pub fn parse(line: &str) -> DecodeResult<Self> {
        let value: Value = serde_json::from_str(line)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> DecodeResult<Self> {
        let Value::Object(mut object) = value else {
            return Err(DecodeError::Malformed(
                "operation must be a JSON object".to_string(),
            ));
        };

        let op = take_string(&mut object, "op")?;
        let path = take_string(&mut object, "path")?;
        let value = object.remove("value").unwrap_or(Value::Null);

        match op.as_str() {
            "set" if path == ROOT_PATH => match value {
                Value::String(key) => Ok(Operation::SetRoot { key }),
                other => Err(DecodeError::Malformed(format!(
                    "root must be set to a string key, got {}",
                    other
                ))),
            },
            "add" => match path.strip_prefix(ELEMENTS_PREFIX) {
                Some(token) if !token.is_empty() && !token.contains('/') => {
                    let key = unescape_token(token);
                    let element = decode_element(&key, value)?;
                    Ok(Operation::AddElement { key, element })
                }
                _ => Err(DecodeError::UnsupportedOperation { op, path }),
            },
            _ => Err(DecodeError::UnsupportedOperation { op, path }),
        }
    }

    /// Key of the element this operation targets or points the root at
    pub fn key(&self) -> &str {
        match self {
            Operation::SetRoot { key } => key,
            Operation::AddElement { key, .. } => key,
        }
    }

    pub fn set_root(key: impl Into<String>) -> Self {
        Operation::SetRoot { key: key.into() }
    }

    pub fn add(element: &Element) -> Self {
        Operation::AddElement {
            key: element.key.clone(),
            element: RawElement {
                key: element.key.clone(),
                component_type: element.component_type.clone(),
                props: Value::Object(element.props.clone()),
                children: element.children.clone(),
            },
        }
    }

    /// Encode as a single protocol line (no trailing newline)
    pub fn to_line(&self) -> String {
        let value = match self {
            Operation::SetRoot { key } => json!({"op": "set", "path": ROOT_PATH, "value": key}),
            Operation::AddElement { key, element } => {
                let mut body = Map::new();
                body.insert("key".to_string(), json!(element.key));
                body.insert("type".to_string(), json!(element.component_type));
                body.insert("props".to_string(), element.props.clone());
                if !element.children.is_empty() {
                    body.insert("children".to_string(), json!(element.children));
                }
                json!({
                    "op": "add",
                    "path": format!("{}{}", ELEMENTS_PREFIX, escape_token(key)),
                    "value": Value::Object(body),
                })
            }
        };
        value.to_string()
    }
}

fn take_string(object: &mut Map<String, Value>, field: &str) -> DecodeResult<String> {
    match object.remove(field) {
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(DecodeError::Malformed(format!("'{}' must be a string", field))),
        None => Err(DecodeError::Malformed(format!("missing '{}'", field))),
    }
}

fn decode_element(path_key: &str, value: Value) -> DecodeResult<RawElement> {
    let Value::Object(mut body) = value else {
        return Err(DecodeError::Malformed(format!(
            "element '{}' must be a JSON object",
            path_key
        )));
    };

    match body.remove("key") {
        None | Some(Value::Null) => {}
        Some(Value::String(key)) if key == path_key => {}
        Some(other) => {
            return Err(DecodeError::Malformed(format!(
                "element key {} does not match path key '{}'",
                other, path_key
            )))
        }
    }

    let component_type = match body.remove("type") {
        Some(Value::String(ty)) => ty,
        _ => {
            return Err(DecodeError::Malformed(format!(
                "element '{}' has no string type",
                path_key
            )))
        }
    };

    let props = match body.remove("props") {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(props) => props,
    };

    let children = match body.remove("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(key) => Ok(key),
                other => Err(DecodeError::Malformed(format!(
                    "child reference {} of '{}' is not a string key",
                    other, path_key
                ))),
            })
            .collect::<DecodeResult<Vec<_>>>()?,
        Some(_) => {
            return Err(DecodeError::Malformed(format!(
                "children of '{}' must be an array",
                path_key
            )))
        }
    };

    Ok(RawElement {
        key: path_key.to_string(),
        component_type,
        props,
        children,
    })
}

fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn escape_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
