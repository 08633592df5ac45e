//! # StreamUI Catalog
//!
//! Static registry of the component types and action names a producer may
//! use, plus the per-element schema validator the patch interpreter calls
//! before admitting an element into the tree.
//!
//! ```rust
//! use serde_json::json;
//! use streamui_catalog::{space_mission, SchemaError};
//!
//! let catalog = space_mission();
//! assert!(catalog.validate("Text", &json!({"content": "Hello"})).is_ok());
//! assert!(matches!(
//!     catalog.validate("Carousel", &json!({})),
//!     Err(SchemaError::UnknownType(_))
//! ));
//! ```

mod builtin;
mod catalog;
mod error;
pub mod instructions;
mod schema;

pub use builtin::{space_mission, SPACE_MISSION_EXAMPLE};
pub use catalog::{ActionDefinition, Catalog, ComponentDefinition, ValidatedProps};
pub use error::{CatalogError, PropIssue, SchemaError, SchemaResult};
pub use schema::{FieldSchema, PropType, PropsSchema};
