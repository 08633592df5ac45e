//! # StreamUI Tree
//!
//! The flat element store and the interpreter that feeds it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ protocol: chunks → lines → Operation        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ interpreter: admission + application        │
//! │  - Decode failures become diagnostics       │
//! │  - Catalog validates every element          │
//! │  - Leaf types lose their children           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: key → Element, root pointer          │
//! │  - Copy-on-write snapshots for readers      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use streamui_catalog::space_mission;
//! use streamui_tree::Interpreter;
//!
//! let mut interp = Interpreter::new(Arc::new(space_mission()));
//! interp.apply(r#"{"op":"set","path":"/root","value":"a"}"#);
//! interp.apply(r#"{"op":"add","path":"/elements/a","value":{"key":"a","type":"Stack","props":{},"children":["b"]}}"#);
//!
//! let snapshot = interp.snapshot();
//! assert_eq!(snapshot.root(), Some("a"));
//! assert_eq!(snapshot.dangling(), vec!["b"]);
//! ```

mod diagnostics;
mod interpreter;
mod store;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use interpreter::{ApplyOutcome, Interpreter};
pub use store::{Snapshot, TreeError, TreeStore, UiTree};
