use std::path::PathBuf;

use cppkit_ast::EntityKind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for writer operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("malformed {node}: {reason}")]
    #[diagnostic(
        code(cppkit::writer::malformed_tree),
        help("the producer of the tree left a required field empty")
    )]
    MalformedTree {
        node: EntityKind,
        reason: &'static str,
    },

    #[error("{depth} preprocessor conditional(s) left open at end of emission")]
    #[diagnostic(
        code(cppkit::writer::unbalanced_conditional),
        help("every #if, #ifdef and #ifndef needs a matching #endif")
    )]
    UnbalancedConditional { depth: usize },

    #[error("#endif without a matching #if")]
    #[diagnostic(code(cppkit::writer::unmatched_endif))]
    UnmatchedEndif,

    #[error("#{directive} without a matching #if")]
    #[diagnostic(code(cppkit::writer::unmatched_else))]
    UnmatchedElse { directive: &'static str },

    #[error("attribute validation failed on {node}")]
    #[diagnostic(code(cppkit::writer::attributes))]
    Attributes {
        node: EntityKind,
        #[source]
        #[diagnostic_source]
        source: cppkit_ast::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(cppkit::writer::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write emitted source")]
    #[diagnostic(code(cppkit::writer::io))]
    Write(#[source] std::io::Error),

    #[error("failed to parse writer configuration")]
    #[diagnostic(code(cppkit::writer::config))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a malformed tree error
    pub fn malformed(node: EntityKind, reason: &'static str) -> Box<Self> {
        Box::new(Error::MalformedTree { node, reason })
    }

    /// Wrap an attribute validation failure
    pub fn attributes(node: EntityKind, source: cppkit_ast::Error) -> Box<Self> {
        Box::new(Error::Attributes { node, source })
    }

    /// Create a config parse error from a toml error with source context
    pub fn config(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Config {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}
