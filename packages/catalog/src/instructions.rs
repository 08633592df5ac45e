//! Producer-side instructions derived from a catalog.
//!
//! The generator and the consumer validate against the same [`Catalog`]
//! value, so the prompt text is rendered from it instead of being kept by
//! hand next to the schemas.

use crate::catalog::Catalog;
use crate::schema::{FieldSchema, PropType};
use indexmap::IndexMap;

const PREAMBLE: &str = "You are an expert UI generator that creates rich, detailed interfaces using JSONL patches.
Follow the user's instructions and create comprehensive, polished UIs with realistic content.

DESIGN PRINCIPLES:
- Create DETAILED content with realistic data, not placeholders
- Use multiple sections and components to build complete experiences
- Add descriptive text, specific numbers, and meaningful labels
- Include visual hierarchy with headings, labels, and dividers";

const OUTPUT_FORMAT: &str = r#"OUTPUT FORMAT (JSONL):
{"op":"set","path":"/root","value":"root-key"}
{"op":"add","path":"/elements/key","value":{"key":"key","type":"ComponentType","props":{...},"children":["child-key-1","child-key-2"]}}

RULES:
1. First line: set /root to root element key
2. Add elements: /elements/{key}
3. Children array = string keys referencing other elements
4. Add parent before children
5. Each element: key, type, props (children optional)
6. One JSON object per line, no code fences, no commentary"#;

/// One reference line per component type
pub fn component_reference(catalog: &Catalog) -> String {
    catalog
        .components()
        .map(|(name, definition)| {
            let mut line = format!(
                "- {}: {} - {}",
                name,
                describe_fields(&definition.props.fields, true),
                definition.description
            );
            if definition.has_children {
                if !line.ends_with('.') {
                    line.push('.');
                }
                line.push_str(" Has children.");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full system prompt for a producer. `example` is a block of protocol
/// lines appended as a worked example.
pub fn system_prompt(catalog: &Catalog, example: Option<&str>) -> String {
    let mut prompt = String::new();
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\nAVAILABLE COMPONENTS:\n");
    prompt.push_str(&catalog.component_names().collect::<Vec<_>>().join(", "));
    prompt.push_str("\n\nCOMPONENT REFERENCE:\n");
    prompt.push_str(&component_reference(catalog));

    let actions: Vec<String> = catalog
        .actions()
        .map(|(name, action)| format!("- {}: {}", name, action.description))
        .collect();
    if !actions.is_empty() {
        prompt.push_str("\n\nAVAILABLE ACTIONS (use as action/ctaAction values):\n");
        prompt.push_str(&actions.join("\n"));
    }

    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_FORMAT);

    if let Some(example) = example {
        prompt.push_str("\n\nEXAMPLE:\n");
        prompt.push_str(example.trim());
    }

    prompt.push_str("\n\nNow generate a detailed, comprehensive UI based on the user's request:");
    prompt
}

fn describe_fields(fields: &IndexMap<String, FieldSchema>, top_level: bool) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }

    let parts: Vec<String> = fields
        .iter()
        .map(|(name, field)| {
            let marker = if field.optional { "?" } else { "" };
            format!("{}{}: {}", name, marker, describe_type(&field.ty))
        })
        .collect();

    if top_level {
        format!("{{ {} }}", parts.join(", "))
    } else {
        format!("{{{}}}", parts.join(", "))
    }
}

fn describe_type(ty: &PropType) -> String {
    match ty {
        PropType::String => "string".to_string(),
        PropType::Boolean => "boolean".to_string(),
        PropType::Number {
            min: Some(min),
            max: Some(max),
        } => format!("{}-{}", min, max),
        PropType::Number { .. } => "number".to_string(),
        PropType::Enum { values } => values
            .iter()
            .map(|v| format!("\"{}\"", v))
            .collect::<Vec<_>>()
            .join("|"),
        PropType::Array { items } => match items.as_ref() {
            PropType::Object { fields } => format!("[{}]", describe_fields(fields, false)),
            other => format!("{}[]", describe_type(other)),
        },
        PropType::Object { fields } => describe_fields(fields, false),
    }
}
