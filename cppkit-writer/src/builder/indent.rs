//! Indentation style and nesting depth.

use serde::{Deserialize, Serialize};

/// Indentation style for emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation of the historical C++ corpus.
    pub const CPP: Self = Self::Spaces(2);

    /// Text of one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CPP
    }
}

/// Nesting depth of the construct being emitted.
///
/// Passed by value down the recursion, so every call sees the depth of its
/// own context and nothing has to be restored on the way back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Indentation {
    depth: usize,
}

impl Indentation {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// One level deeper.
    pub fn inner(self) -> Self {
        Self {
            depth: self.depth + 1,
        }
    }

    /// One level shallower, stopping at zero.
    pub fn outer(self) -> Self {
        Self {
            depth: self.depth.saturating_sub(1),
        }
    }
}
