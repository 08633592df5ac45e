//! Declarative prop schemas and the value checker behind catalog validation.
//!
//! Optional fields accept both `null` and absence. Fields not declared in a
//! schema are stripped from the validated output.

use crate::error::PropIssue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shape of a single prop value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropType {
    String,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Enum {
        values: Vec<String>,
    },
    Array {
        items: Box<PropType>,
    },
    Object {
        fields: IndexMap<String, FieldSchema>,
    },
}

impl PropType {
    pub fn number_between(min: f64, max: f64) -> Self {
        PropType::Number {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn enumeration(values: &[&str]) -> Self {
        PropType::Enum {
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn array_of(items: PropType) -> Self {
        PropType::Array {
            items: Box::new(items),
        }
    }

    pub fn object(fields: PropsSchema) -> Self {
        PropType::Object {
            fields: fields.fields,
        }
    }

    /// Short name used in error messages
    pub fn expected_name(&self) -> &'static str {
        match self {
            PropType::String => "string",
            PropType::Number { .. } => "number",
            PropType::Boolean => "boolean",
            PropType::Enum { .. } => "string",
            PropType::Array { .. } => "array",
            PropType::Object { .. } => "object",
        }
    }
}

/// A named field inside an object schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(flatten)]
    pub ty: PropType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldSchema {
    pub fn required(ty: PropType) -> Self {
        Self {
            ty,
            optional: false,
        }
    }

    pub fn optional(ty: PropType) -> Self {
        Self { ty, optional: true }
    }
}

/// Object schema describing a component's props
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropsSchema {
    pub fields: IndexMap<String, FieldSchema>,
}

impl PropsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: impl Into<String>, ty: PropType) -> Self {
        self.fields.insert(name.into(), FieldSchema::required(ty));
        self
    }

    pub fn optional(mut self, name: impl Into<String>, ty: PropType) -> Self {
        self.fields.insert(name.into(), FieldSchema::optional(ty));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check a props object, returning only the declared fields.
    ///
    /// On failure returns the offending path (dotted, with `[i]` for array
    /// indices) together with the issue.
    pub fn check(&self, value: &Value) -> Result<Map<String, Value>, (String, PropIssue)> {
        check_object(&self.fields, value, "")
    }
}

fn check_object(
    fields: &IndexMap<String, FieldSchema>,
    value: &Value,
    path: &str,
) -> Result<Map<String, Value>, (String, PropIssue)> {
    let object = value.as_object().ok_or_else(|| {
        (
            path.to_string(),
            PropIssue::WrongType {
                expected: "object",
                found: json_type_name(value),
            },
        )
    })?;

    let mut validated = Map::new();
    for (name, field) in fields {
        let field_path = join_path(path, name);
        match object.get(name) {
            None if field.optional => {}
            None => return Err((field_path, PropIssue::Missing)),
            Some(Value::Null) if field.optional => {
                validated.insert(name.clone(), Value::Null);
            }
            Some(raw) => {
                let checked = check_value(&field.ty, raw, &field_path)?;
                validated.insert(name.clone(), checked);
            }
        }
    }

    Ok(validated)
}

fn check_value(ty: &PropType, value: &Value, path: &str) -> Result<Value, (String, PropIssue)> {
    let wrong_type = || {
        (
            path.to_string(),
            PropIssue::WrongType {
                expected: ty.expected_name(),
                found: json_type_name(value),
            },
        )
    };

    match ty {
        PropType::String => value.as_str().map(|_| value.clone()).ok_or_else(wrong_type),
        PropType::Boolean => value.as_bool().map(|_| value.clone()).ok_or_else(wrong_type),
        PropType::Number { min, max } => {
            let number = value.as_f64().ok_or_else(wrong_type)?;
            let below = min.map_or(false, |min| number < min);
            let above = max.map_or(false, |max| number > max);
            if below || above {
                return Err((
                    path.to_string(),
                    PropIssue::OutOfRange {
                        value: number,
                        min: *min,
                        max: *max,
                    },
                ));
            }
            Ok(value.clone())
        }
        PropType::Enum { values } => {
            let text = value.as_str().ok_or_else(wrong_type)?;
            if values.iter().any(|allowed| allowed == text) {
                Ok(value.clone())
            } else {
                Err((
                    path.to_string(),
                    PropIssue::NotInEnum {
                        value: text.to_string(),
                        allowed: values.clone(),
                    },
                ))
            }
        }
        PropType::Array { items } => {
            let array = value.as_array().ok_or_else(wrong_type)?;
            array
                .iter()
                .enumerate()
                .map(|(index, item)| check_value(items, item, &format!("{}[{}]", path, index)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        PropType::Object { fields } => check_object(fields, value, path).map(Value::Object),
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec_schema() -> PropsSchema {
        PropsSchema::new().required("name", PropType::String).required(
            "specs",
            PropType::array_of(PropType::object(
                PropsSchema::new()
                    .required("label", PropType::String)
                    .required("value", PropType::String),
            )),
        )
    }

    #[test]
    fn test_strips_unknown_fields() {
        let schema = PropsSchema::new().optional("title", PropType::String);
        let validated = schema
            .check(&json!({"title": "Hi", "color": "red"}))
            .unwrap();

        assert_eq!(validated.len(), 1);
        assert_eq!(validated["title"], "Hi");
    }

    #[test]
    fn test_optional_accepts_null_and_absence() {
        let schema = PropsSchema::new().optional("subtitle", PropType::String);

        assert!(schema.check(&json!({})).unwrap().is_empty());
        let with_null = schema.check(&json!({"subtitle": null})).unwrap();
        assert_eq!(with_null["subtitle"], Value::Null);
    }

    #[test]
    fn test_required_rejects_null() {
        let schema = PropsSchema::new().required("content", PropType::String);
        let (path, issue) = schema.check(&json!({"content": null})).unwrap_err();

        assert_eq!(path, "content");
        assert_eq!(
            issue,
            PropIssue::WrongType {
                expected: "string",
                found: "null"
            }
        );
    }

    #[test]
    fn test_nested_path_reported() {
        let (path, issue) = spec_schema()
            .check(&json!({
                "name": "Starship",
                "specs": [{"label": "Height", "value": "120m"}, {"label": "Payload"}]
            }))
            .unwrap_err();

        assert_eq!(path, "specs[1].value");
        assert_eq!(issue, PropIssue::Missing);
    }

    #[test]
    fn test_number_bounds_inclusive() {
        let schema = PropsSchema::new().optional("columns", PropType::number_between(1.0, 4.0));

        assert!(schema.check(&json!({"columns": 1})).is_ok());
        assert!(schema.check(&json!({"columns": 4})).is_ok());
        let (_, issue) = schema.check(&json!({"columns": 5})).unwrap_err();
        assert!(matches!(issue, PropIssue::OutOfRange { value, .. } if value == 5.0));
    }

    #[test]
    fn test_schema_document_shape() {
        let schema = PropsSchema::new()
            .optional("gap", PropType::enumeration(&["sm", "md"]))
            .required("columns", PropType::number_between(1.0, 4.0));

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            json!({
                "gap": {"type": "enum", "values": ["sm", "md"], "optional": true},
                "columns": {"type": "number", "min": 1.0, "max": 4.0}
            })
        );

        let parsed: PropsSchema = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, schema);
    }
}
