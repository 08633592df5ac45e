use crate::context::RenderContext;
use crate::registry::{ComponentInput, Registry};
use crate::vnode::VNode;
use serde::Serialize;
use streamui_protocol::Element;
use streamui_tree::Snapshot;
use tracing::{instrument, warn};

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTree {
    pub root: Option<VNode>,
    /// Store version the pass was rendered from
    pub version: u64,
}

impl RenderedTree {
    pub fn empty(version: u64) -> Self {
        Self { root: None, version }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Outermost node rendered for the element `key`
    pub fn find(&self, key: &str) -> Option<&VNode> {
        self.root.as_ref().and_then(|root| find_component(root, key))
    }

    /// Action bound to the element `key` (a button's `action`, a pricing
    /// card's `ctaAction`)
    pub fn action_for(&self, key: &str) -> Option<&str> {
        let node = self.find(key)?;
        node.attr("data-action").or_else(|| first_action(node.children()))
    }

    /// Keys still rendered as placeholders
    pub fn pending(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        if let Some(root) = &self.root {
            collect_slots(root, &mut keys);
        }
        keys
    }

    /// Indented text rendering for terminals
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if let Some(root) = &self.root {
            outline_node(root, 0, &mut out);
        }
        out
    }
}

/// Render a snapshot. Pure: the same snapshot, registry and context always
/// produce the same tree.
#[instrument(skip_all, fields(version = snapshot.version(), elements = snapshot.len()))]
pub fn render(snapshot: &Snapshot, registry: &Registry, context: &RenderContext) -> RenderedTree {
    let Some(root) = snapshot.resolve_root() else {
        return RenderedTree::empty(snapshot.version());
    };

    let mut walker = Walker {
        snapshot,
        registry,
        context,
        ancestors: Vec::new(),
    };

    RenderedTree {
        root: walker.element(root),
        version: snapshot.version(),
    }
}

struct Walker<'a> {
    snapshot: &'a Snapshot,
    registry: &'a Registry,
    context: &'a RenderContext,
    /// Keys on the path from the root to the element being rendered
    ancestors: Vec<&'a str>,
}

impl<'a> Walker<'a> {
    fn child(&mut self, key: &'a str) -> Option<VNode> {
        if self.ancestors.contains(&key) {
            warn!(key = %key, "Reference cycle in tree");
            return Some(VNode::error(
                format!("Reference cycle: '{}' contains itself", key),
                Some(key),
            ));
        }
        if self.ancestors.len() >= self.context.max_depth() {
            warn!(key = %key, max_depth = self.context.max_depth(), "Tree too deep");
            return Some(VNode::error(
                format!("Maximum depth of {} exceeded", self.context.max_depth()),
                Some(key),
            ));
        }

        match self.snapshot.element(key) {
            Some(element) => self.element(element),
            None => Some(VNode::slot(key)),
        }
    }

    fn element(&mut self, element: &'a Element) -> Option<VNode> {
        if !self.context.is_visible(element) {
            return None;
        }

        self.ancestors.push(&element.key);
        let children: Vec<VNode> = element
            .children
            .iter()
            .filter_map(|key| self.child(key))
            .collect();
        self.ancestors.pop();

        let body = self.registry.resolve(&element.component_type);
        let node = body(ComponentInput {
            element,
            children,
            context: self.context,
        });
        Some(node.stamped(&element.key, &element.component_type))
    }
}

fn find_component<'n>(node: &'n VNode, key: &str) -> Option<&'n VNode> {
    if node.is_component() && node.key() == Some(key) {
        return Some(node);
    }
    node.children().iter().find_map(|child| find_component(child, key))
}

/// First action attribute below `nodes`, not descending into nested components
fn first_action(nodes: &[VNode]) -> Option<&str> {
    nodes.iter().find_map(|node| {
        if node.is_component() {
            return None;
        }
        node.attr("data-action").or_else(|| first_action(node.children()))
    })
}

fn collect_slots<'n>(node: &'n VNode, keys: &mut Vec<&'n str>) {
    match node {
        VNode::Slot { key } => keys.push(key),
        other => {
            for child in other.children() {
                collect_slots(child, keys);
            }
        }
    }
}

fn outline_node(node: &VNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        VNode::Element {
            component: Some(component),
            key,
            children,
            ..
        } => {
            let mut texts = Vec::new();
            let mut nested = Vec::new();
            let mut action = node.attr("data-action");
            gather(children, &mut texts, &mut nested, &mut action);

            out.push_str(&indent);
            out.push_str(component);
            if let Some(key) = key {
                out.push_str(" #");
                out.push_str(key);
            }
            if !texts.is_empty() {
                out.push_str(&format!(" \"{}\"", texts.join(" · ")));
            }
            if let Some(action) = action {
                out.push_str(&format!(" -> {}", action));
            }
            out.push('\n');

            for child in nested {
                outline_node(child, depth + 1, out);
            }
        }
        VNode::Element { children, .. } => {
            for child in children {
                outline_node(child, depth, out);
            }
        }
        VNode::Text { content } => {
            out.push_str(&format!("{}\"{}\"\n", indent, content.trim()));
        }
        VNode::Slot { key } => {
            out.push_str(&format!("{}… #{} (pending)\n", indent, key));
        }
        VNode::Fallback {
            key,
            component,
            children,
        } => {
            out.push_str(&format!("{}? {} #{} (no renderer)\n", indent, component, key));
            for child in children {
                outline_node(child, depth + 1, out);
            }
        }
        VNode::Error { message, .. } => {
            out.push_str(&format!("{}! {}\n", indent, message));
        }
    }
}

/// Split the markup below a component into its own text and nested nodes
fn gather<'n>(
    nodes: &'n [VNode],
    texts: &mut Vec<&'n str>,
    nested: &mut Vec<&'n VNode>,
    action: &mut Option<&'n str>,
) {
    for node in nodes {
        match node {
            VNode::Text { content } => {
                let content = content.trim();
                if !content.is_empty() {
                    texts.push(content);
                }
            }
            VNode::Element {
                component: None,
                children,
                ..
            } => {
                if action.is_none() {
                    *action = node.attr("data-action");
                }
                gather(children, texts, nested, action);
            }
            other => nested.push(other),
        }
    }
}
