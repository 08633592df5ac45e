//! # StreamUI Renderer
//!
//! Turns a tree [`Snapshot`](streamui_tree::Snapshot) into a [`VNode`] tree by
//! dispatching every element on its type through a [`Registry`].
//!
//! Rendering is tolerant of partial trees: a child key that has not arrived
//! renders as [`VNode::Slot`], an unregistered type goes through the
//! registry's fallback, and reference cycles or runaway nesting become an
//! inline [`VNode::Error`]. Nothing here fails.
//!
//! ```rust
//! use std::sync::Arc;
//! use streamui_catalog::space_mission;
//! use streamui_renderer::{render, Registry, RenderContext};
//! use streamui_tree::Interpreter;
//!
//! let mut interp = Interpreter::new(Arc::new(space_mission()));
//! interp.apply(r#"{"op":"set","path":"/root","value":"a"}"#);
//! interp.apply(r#"{"op":"add","path":"/elements/a","value":{"key":"a","type":"Stack","children":["b"]}}"#);
//!
//! let tree = render(&interp.snapshot(), &Registry::space_mission(), &RenderContext::new());
//! assert_eq!(tree.pending(), vec!["b"]);
//! ```

mod actions;
mod components;
mod context;
mod data;
pub mod html;
mod registry;
mod render;
mod vnode;

pub use actions::{ActionDispatcher, ActionHandler};
pub use context::{AlwaysVisible, RenderContext, Visibility, DEFAULT_MAX_DEPTH};
pub use data::DataModel;
pub use html::HtmlOptions;
pub use registry::{ComponentInput, Registry, RenderFn};
pub use render::{render, RenderedTree};
pub use vnode::VNode;
