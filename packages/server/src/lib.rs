//! # StreamUI Server
//!
//! Producer side of the patch stream. A [`Generator`] turns a prompt into
//! protocol text; [`GenerationService`] validates the prompt, hands the
//! generator the catalog's system prompt and bounds how long a response
//! may run. [`router`] exposes it over HTTP:
//!
//! ```text
//! POST /api/generate-ui   {"prompt": "..."}  ->  text/plain JSONL stream
//! GET  /api/catalog                           ->  catalog JSON
//! ```
//!
//! [`LocalTransport`] plugs the same service straight into a
//! `streamui_session::UiStream` without a socket in between.

pub mod demo;
mod error;
mod generator;
mod local;
mod routes;
mod service;

pub use error::{GeneratorError, RequestError};
pub use generator::{GenerationRequest, Generator, ScriptedGenerator, TextStream};
pub use local::LocalTransport;
pub use routes::{router, serve, CATALOG_PATH, GENERATE_PATH};
pub use service::GenerationService;
