use miette::Diagnostic;
use thiserror::Error;

use crate::Attribs;

/// Result type for entity model operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    #[error("invalid access: expected {expected}, found {found}")]
    #[diagnostic(
        code(cppkit::ast::invalid_access),
        help("check the handle with `is_valid()` before dereferencing it")
    )]
    InvalidAccess {
        expected: &'static str,
        found: &'static str,
    },

    #[error("inconsistent attributes '{attribs}': {reason}")]
    #[diagnostic(code(cppkit::ast::inconsistent_attributes))]
    InconsistentAttributes {
        attribs: Attribs,
        reason: &'static str,
    },
}

impl Error {
    /// Create an invalid access error.
    pub fn invalid_access(expected: &'static str, found: &'static str) -> Self {
        Error::InvalidAccess { expected, found }
    }

    /// Create an inconsistent attributes error.
    pub fn inconsistent(attribs: Attribs, reason: &'static str) -> Self {
        Error::InconsistentAttributes { attribs, reason }
    }
}
