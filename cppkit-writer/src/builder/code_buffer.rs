//! Output sink for emitted source text.

use super::{Indent, Indentation};

/// Text buffer that knows how to render an [`Indentation`].
///
/// ```
/// use cppkit_writer::builder::{CodeBuffer, Indent, Indentation};
///
/// let mut buf = CodeBuffer::new(Indent::CPP);
/// let top = Indentation::default();
/// buf.push_line(top, "class A")
///     .push_line(top, "{")
///     .push_line(top.inner(), "int x;")
///     .push_line(top, "};");
/// assert_eq!(buf.as_str(), "class A\n{\n  int x;\n};\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuffer {
    unit: String,
    buffer: String,
}

impl CodeBuffer {
    pub fn new(indent: Indent) -> Self {
        Self {
            unit: indent.unit(),
            buffer: String::new(),
        }
    }

    /// Write the whitespace for `indentation`.
    pub fn push_indent(&mut self, indentation: Indentation) -> &mut Self {
        for _ in 0..indentation.depth() {
            self.buffer.push_str(&self.unit);
        }
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_str(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    pub fn push_char(&mut self, c: char) -> &mut Self {
        self.buffer.push(c);
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add a line with indentation.
    pub fn push_line(&mut self, indentation: Indentation, s: &str) -> &mut Self {
        self.push_indent(indentation).push_str(s).newline()
    }

    /// Append `items` separated by `sep`, rendering each with `f`.
    pub fn push_separated<T, E>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        sep: &str,
        mut f: impl FnMut(&mut Self, T) -> Result<(), E>,
    ) -> Result<(), E> {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.push_str(sep);
            }
            f(self, item)?;
        }
        Ok(())
    }

    pub fn ends_with_newline(&self) -> bool {
        self.buffer.ends_with('\n')
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}
