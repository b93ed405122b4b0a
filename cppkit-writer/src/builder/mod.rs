//! Low-level text building blocks used by the writer.

mod code_buffer;
mod indent;

pub use code_buffer::CodeBuffer;
pub use indent::{Indent, Indentation};
