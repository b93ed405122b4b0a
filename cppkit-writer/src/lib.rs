//! Style-preserving C++ source writer.
//!
//! Renders a [`cppkit_ast::Entity`] tree back into C++ text in the layout of
//! a hand-maintained header: Allman braces, two-space indentation, access
//! specifiers flush with the class keyword, namespace members unindented and
//! preprocessor directives indented after the `#` by conditional depth.
//! Text the parser kept verbatim (blobs, comments, macro calls, directive
//! conditions) is reproduced byte for byte.
//!
//! # Architecture
//!
//! ```text
//! WriterConfig ──► Writer ──► EmitContext ──► CodeBuffer ──► String
//!                   │  emit_entity dispatch
//!                   └─ per-construct emit_* methods
//! ```
//!
//! - [`Writer`] is immutable and can be shared; each call to
//!   [`Writer::emit`] creates its own [`EmitContext`].
//! - [`EmitMode`] selects raw, header or source rendering.
//! - Errors are [`miette`] diagnostics; a failed emission yields no text.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
mod config;
mod error;
mod writer;

pub use config::{EmitMode, WriterConfig};
pub use error::{Error, Result};
pub use writer::{EmitContext, ParamStyle, Writer};
