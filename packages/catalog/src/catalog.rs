use crate::error::{CatalogError, SchemaError, SchemaResult};
use crate::schema::PropsSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Props that passed schema validation (undeclared fields removed)
pub type ValidatedProps = Map<String, Value>;

/// Definition of one component type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    #[serde(default)]
    pub props: PropsSchema,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub description: String,
}

impl ComponentDefinition {
    pub fn new(props: PropsSchema, description: impl Into<String>) -> Self {
        Self {
            props,
            has_children: false,
            description: description.into(),
        }
    }

    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }
}

/// Definition of one action name. Actions carry no payload schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    #[serde(default)]
    pub description: String,
}

/// Immutable registry of component types and action names.
///
/// Built once at startup and shared read-only (`Arc<Catalog>`); every
/// method takes `&self`, so validation is safe from any number of readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    #[serde(default)]
    components: IndexMap<String, ComponentDefinition>,
    #[serde(default)]
    actions: IndexMap<String, ActionDefinition>,
}

impl Catalog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: IndexMap::new(),
            actions: IndexMap::new(),
        }
    }

    pub fn with_component(
        mut self,
        name: impl Into<String>,
        definition: ComponentDefinition,
    ) -> Self {
        self.components.insert(name.into(), definition);
        self
    }

    pub fn with_action(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.actions.insert(
            name.into(),
            ActionDefinition {
                description: description.into(),
            },
        );
        self
    }

    /// Parse a catalog document
    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a catalog document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> String {
        // A catalog is plain data with string keys; serialisation cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn component(&self, name: &str) -> Option<&ComponentDefinition> {
        self.components.get(name)
    }

    pub fn components(&self) -> impl Iterator<Item = (&str, &ComponentDefinition)> {
        self.components.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn has_children(&self, name: &str) -> bool {
        self.components
            .get(name)
            .map_or(false, |definition| definition.has_children)
    }

    pub fn action(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.get(name)
    }

    pub fn actions(&self) -> impl Iterator<Item = (&str, &ActionDefinition)> {
        self.actions.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Validate raw props for a component type
    pub fn validate(&self, component_type: &str, raw_props: &Value) -> SchemaResult<ValidatedProps> {
        let definition = self
            .components
            .get(component_type)
            .ok_or_else(|| SchemaError::UnknownType(component_type.to_string()))?;

        definition
            .props
            .check(raw_props)
            .map_err(|(path, issue)| SchemaError::InvalidProp {
                component: component_type.to_string(),
                path,
                issue,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropIssue;
    use crate::schema::PropType;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::new("test")
            .with_component(
                "Stack",
                ComponentDefinition::new(
                    PropsSchema::new()
                        .optional("direction", PropType::enumeration(&["horizontal", "vertical"])),
                    "Flex layout container",
                )
                .with_children(),
            )
            .with_component(
                "Text",
                ComponentDefinition::new(
                    PropsSchema::new().required("content", PropType::String),
                    "Paragraph text",
                ),
            )
            .with_action("learn_more", "Navigate to details section")
    }

    #[test]
    fn test_unknown_type() {
        let err = catalog().validate("Carousel", &json!({})).unwrap_err();
        assert_eq!(err, SchemaError::UnknownType("Carousel".to_string()));
    }

    #[test]
    fn test_missing_required_prop() {
        let err = catalog().validate("Text", &json!({})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidProp {
                component: "Text".to_string(),
                path: "content".to_string(),
                issue: PropIssue::Missing,
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid prop 'content' on Text: required field is missing"
        );
    }

    #[test]
    fn test_enum_violation() {
        let err = catalog()
            .validate("Stack", &json!({"direction": "diagonal"}))
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidProp { issue: PropIssue::NotInEnum { ref value, .. }, .. } if value == "diagonal"
        ));
    }

    #[test]
    fn test_props_must_be_object() {
        let err = catalog().validate("Text", &json!("Hello")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid prop 'props' on Text: expected object, found string");
    }

    #[test]
    fn test_children_flag_and_actions() {
        let catalog = catalog();
        assert!(catalog.has_children("Stack"));
        assert!(!catalog.has_children("Text"));
        assert!(!catalog.has_children("Missing"));
        assert_eq!(catalog.action_names().collect::<Vec<_>>(), vec!["learn_more"]);
    }

    #[test]
    fn test_document_roundtrip_preserves_order() {
        let catalog = catalog();
        let parsed = Catalog::from_json(&catalog.to_json_pretty()).unwrap();

        assert_eq!(parsed, catalog);
        assert_eq!(parsed.component_names().collect::<Vec<_>>(), vec!["Stack", "Text"]);
    }

    #[test]
    fn test_parse_catalog_document() {
        let document = r#"{
            "name": "mini",
            "components": {
                "Grid": {
                    "props": { "columns": { "type": "number", "min": 1, "max": 4, "optional": true } },
                    "hasChildren": true,
                    "description": "Grid layout"
                }
            },
            "actions": { "apply_now": { "description": "Open application form" } }
        }"#;

        let catalog = Catalog::from_json(document).unwrap();
        assert!(catalog.has_children("Grid"));
        assert!(catalog.validate("Grid", &json!({"columns": 2})).is_ok());
        assert!(catalog.validate("Grid", &json!({"columns": 0})).is_err());
        assert_eq!(
            catalog.action("apply_now").map(|a| a.description.as_str()),
            Some("Open application form")
        );
    }

    #[test]
    fn test_catalog_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
