//! Preprocessor directives.

use serde::{Deserialize, Serialize};

/// Kind of an `#if`-family directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionalKind {
    If,
    Ifdef,
    Ifndef,
    Elif,
    Else,
}

impl ConditionalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionalKind::If => "if",
            ConditionalKind::Ifdef => "ifdef",
            ConditionalKind::Ifndef => "ifndef",
            ConditionalKind::Elif => "elif",
            ConditionalKind::Else => "else",
        }
    }

    /// Returns true for directives that open a new conditional.
    pub fn opens(&self) -> bool {
        matches!(
            self,
            ConditionalKind::If | ConditionalKind::Ifdef | ConditionalKind::Ifndef
        )
    }
}

/// `#define NAME(args) body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Define {
    pub name: String,
    /// `Some` for function-like macros, even with no parameters.
    pub params: Option<Vec<String>>,
    /// Replacement text verbatim, continuation lines included.
    pub body: String,
}

impl Define {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
            body: String::new(),
        }
    }

    pub fn function_like(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            params: Some(params),
            ..Self::new(name)
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preprocessor {
    Define(Define),
    /// `#undef NAME`
    Undef(String),
    /// `#include <path>`; the path keeps its delimiters.
    Include(String),
    /// `#import <path>`
    Import(String),
    /// `#pragma text`
    Pragma(String),
    /// `#error text`
    Error(String),
    /// `#warning text`
    Warning(String),
    /// `#if`, `#ifdef`, `#ifndef`, `#elif`, `#else`
    Conditional {
        kind: ConditionalKind,
        condition: String,
    },
    /// `#endif`
    EndIf,
    /// Any other directive, text after `#` verbatim.
    Unrecognized(String),
}

impl Preprocessor {
    pub fn define(name: impl Into<String>) -> Self {
        Preprocessor::Define(Define::new(name))
    }

    /// `#include "path"`
    pub fn include_local(path: &str) -> Self {
        Preprocessor::Include(format!("\"{}\"", path))
    }

    /// `#include <path>`
    pub fn include_system(path: &str) -> Self {
        Preprocessor::Include(format!("<{}>", path))
    }

    pub fn conditional(kind: ConditionalKind, condition: impl Into<String>) -> Self {
        Preprocessor::Conditional {
            kind,
            condition: condition.into(),
        }
    }

    pub fn if_(condition: impl Into<String>) -> Self {
        Self::conditional(ConditionalKind::If, condition)
    }

    pub fn ifdef(name: impl Into<String>) -> Self {
        Self::conditional(ConditionalKind::Ifdef, name)
    }

    pub fn ifndef(name: impl Into<String>) -> Self {
        Self::conditional(ConditionalKind::Ifndef, name)
    }

    pub fn else_() -> Self {
        Self::conditional(ConditionalKind::Else, "")
    }

    /// Nesting effect of this directive: `+1`, `-1` or `0`.
    pub fn depth_delta(&self) -> i32 {
        match self {
            Preprocessor::Conditional { kind, .. } if kind.opens() => 1,
            Preprocessor::EndIf => -1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_delimiters() {
        assert_eq!(
            Preprocessor::include_local("wx/choice.h"),
            Preprocessor::Include("\"wx/choice.h\"".into())
        );
        assert_eq!(
            Preprocessor::include_system("vector"),
            Preprocessor::Include("<vector>".into())
        );
    }

    #[test]
    fn test_depth_delta() {
        assert_eq!(Preprocessor::ifndef("X").depth_delta(), 1);
        assert_eq!(Preprocessor::if_("defined(X)").depth_delta(), 1);
        assert_eq!(Preprocessor::else_().depth_delta(), 0);
        assert_eq!(
            Preprocessor::conditional(ConditionalKind::Elif, "Y").depth_delta(),
            0
        );
        assert_eq!(Preprocessor::EndIf.depth_delta(), -1);
        assert_eq!(Preprocessor::define("X").depth_delta(), 0);
    }
}
