//! # StreamUI Protocol
//!
//! Wire types for the line-delimited patch stream and the decoder that
//! turns arbitrarily chunked transport text into complete protocol lines.
//!
//! ```text
//! chunks ──▶ LineAssembler::feed ──▶ lines ──▶ Operation::parse ──▶ Operation
//! ```

mod assembler;
mod element;
mod operation;

pub use assembler::LineAssembler;
pub use element::{Element, RawElement};
pub use operation::{DecodeError, DecodeResult, Operation};
