//! HTML serialisation of a rendered tree.

use crate::render::RenderedTree;
use crate::vnode::VNode;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// One node per line, indented
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap the fragment in a complete document
    pub document: bool,
    /// Document title, used with `document`
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            document: false,
            title: "StreamUI".to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

struct Writer<'o> {
    options: &'o HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'o> Writer<'o> {
    fn new(options: &'o HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Serialise a rendered tree. An empty tree yields an empty fragment.
pub fn to_html(tree: &RenderedTree, options: &HtmlOptions) -> String {
    let mut writer = Writer::new(options);

    if options.document {
        writer.add_line("<!DOCTYPE html>");
        writer.add_line("<html>");
        writer.indent();
        writer.add_line("<head>");
        writer.indent();
        writer.add_line("<meta charset=\"UTF-8\">");
        writer.add_line(&format!("<title>{}</title>", escape_text(&options.title)));
        writer.dedent();
        writer.add_line("</head>");
        writer.add_line("<body>");
        writer.indent();
    }

    if let Some(root) = &tree.root {
        write_node(root, &mut writer);
    }

    if options.document {
        writer.dedent();
        writer.add_line("</body>");
        writer.dedent();
        writer.add_line("</html>");
    }

    writer.finish()
}

/// Serialise a single node
pub fn node_to_html(node: &VNode, options: &HtmlOptions) -> String {
    let mut writer = Writer::new(options);
    write_node(node, &mut writer);
    writer.finish()
}

fn write_node(node: &VNode, writer: &mut Writer<'_>) {
    match node {
        VNode::Element {
            tag,
            attributes,
            children,
            key,
            component,
        } => {
            let mut open = format!("<{}", tag);
            for (name, value) in attributes {
                open.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
            }
            if let Some(component) = component {
                open.push_str(&format!(" data-component=\"{}\"", escape_attr(component)));
            }
            if let Some(key) = key {
                open.push_str(&format!(" data-key=\"{}\"", escape_attr(key)));
            }
            open.push('>');

            if VOID_TAGS.contains(&tag.as_str()) {
                writer.add_line(&open);
                return;
            }

            let inline = children.iter().all(|child| matches!(child, VNode::Text { .. }));
            if inline {
                let text: String = children
                    .iter()
                    .map(|child| escape_text(&child.text_content()))
                    .collect();
                writer.add_line(&format!("{}{}</{}>", open, text, tag));
                return;
            }

            writer.add_line(&open);
            writer.indent();
            for child in children {
                write_node(child, writer);
            }
            writer.dedent();
            writer.add_line(&format!("</{}>", tag));
        }
        VNode::Text { content } => writer.add_line(&escape_text(content)),
        VNode::Slot { key } => writer.add_line(&format!(
            "<div class=\"streamui-slot\" data-key=\"{}\" aria-busy=\"true\"></div>",
            escape_attr(key)
        )),
        VNode::Fallback {
            key,
            component,
            children,
        } => {
            let open = format!(
                "<div class=\"streamui-unknown\" data-component=\"{}\" data-key=\"{}\">",
                escape_attr(component),
                escape_attr(key)
            );
            let label = format!("Unknown component: {}", escape_text(component));
            if children.is_empty() {
                writer.add_line(&format!("{}{}</div>", open, label));
                return;
            }

            writer.add_line(&open);
            writer.indent();
            writer.add_line(&label);
            for child in children {
                write_node(child, writer);
            }
            writer.dedent();
            writer.add_line("</div>");
        }
        VNode::Error { message, key } => {
            let key_attr = key
                .as_deref()
                .map(|key| format!(" data-key=\"{}\"", escape_attr(key)))
                .unwrap_or_default();
            writer.add_line(&format!(
                "<div class=\"streamui-error\" role=\"alert\"{}>{}</div>",
                key_attr,
                escape_text(message)
            ));
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
