use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual node produced by rendering a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// Markup element
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<VNode>,
        /// Key of the tree element this node was rendered from (outermost node only)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// Component type of that element
        #[serde(default, skip_serializing_if = "Option::is_none")]
        component: Option<String>,
    },

    /// Text node
    Text { content: String },

    /// Placeholder for a child key that does not resolve (yet)
    Slot { key: String },

    /// Element whose type has no registered renderer. Its rendered
    /// children are kept so registered descendants still show.
    Fallback {
        key: String,
        component: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<VNode>,
    },

    /// Inline error instead of a subtree that cannot be rendered
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            key: None,
            component: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn slot(key: impl Into<String>) -> Self {
        VNode::Slot { key: key.into() }
    }

    pub fn fallback(key: impl Into<String>, component: impl Into<String>) -> Self {
        VNode::Fallback {
            key: key.into(),
            component: component.into(),
            children: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, key: Option<&str>) -> Self {
        VNode::Error {
            message: message.into(),
            key: key.map(str::to_string),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Append a class name; empty names are ignored
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref().trim();
        if class.is_empty() {
            return self;
        }
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes
                .entry("class".to_string())
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(class);
                })
                .or_insert_with(|| class.to_string());
        }
        self
    }

    pub fn with_child(self, child: VNode) -> Self {
        self.with_children([child])
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        match self {
            VNode::Element {
                ref mut children, ..
            }
            | VNode::Fallback {
                ref mut children, ..
            } => children.extend(new_children),
            _ => {}
        }
        self
    }

    /// Shorthand for an element holding a single text node
    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(VNode::text(content))
    }

    pub(crate) fn stamped(mut self, element_key: &str, element_type: &str) -> Self {
        if let VNode::Element {
            ref mut key,
            ref mut component,
            ..
        } = self
        {
            *key = Some(element_key.to_string());
            *component = Some(element_type.to_string());
        }
        self
    }

    /// Key of the tree element behind this node, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            VNode::Element { key, .. } | VNode::Error { key, .. } => key.as_deref(),
            VNode::Slot { key } | VNode::Fallback { key, .. } => Some(key),
            VNode::Text { .. } => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } | VNode::Fallback { children, .. } => children,
            _ => &[],
        }
    }

    /// Whether this node is the outermost node of a rendered tree element
    pub fn is_component(&self) -> bool {
        matches!(
            self,
            VNode::Element {
                component: Some(_),
                ..
            } | VNode::Fallback { .. }
        )
    }

    /// Concatenated text content of the subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text { content } => out.push_str(content),
            VNode::Element { children, .. } | VNode::Fallback { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let node = VNode::element("p")
            .with_class("text")
            .with_class("")
            .with_class("text--lead")
            .with_text("Hello");

        assert_eq!(node.attr("class"), Some("text text--lead"));
        assert_eq!(node.text_content(), "Hello");
        assert!(!node.is_component());
        assert!(node.clone().stamped("t", "Text").is_component());
    }

    #[test]
    fn test_fallback_keeps_children() {
        let node = VNode::fallback("m", "Moon").with_child(VNode::text("inside"));

        assert_eq!(node.children().len(), 1);
        assert_eq!(node.text_content(), "inside");
        assert_eq!(
            serde_json::to_value(&VNode::fallback("m", "Moon")).unwrap(),
            json!({"type": "Fallback", "key": "m", "component": "Moon"})
        );
    }

    #[test]
    fn test_serialized_shape() {
        let node = VNode::element("div")
            .with_child(VNode::slot("b"))
            .stamped("a", "Stack");

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "Element",
                "tag": "div",
                "children": [{"type": "Slot", "key": "b"}],
                "key": "a",
                "component": "Stack"
            })
        );
    }
}
