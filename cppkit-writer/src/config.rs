//! Writer configuration.
//!
//! ```toml
//! mode = "header"
//! indent = { spaces = 4 }
//! strict_attributes = true
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, builder::Indent};

/// Decides per context whether and how an entity is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// Everything is emitted as structured.
    #[default]
    Raw,
    /// Function bodies are dropped unless the function is explicitly inline.
    Header,
    /// Member declarations are dropped unless their class is defined in the
    /// same emission; standalone classes yield out-of-line definitions.
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    pub mode: EmitMode,
    pub indent: Indent,
    /// Validate the attribute bitmask of every function-like entity before
    /// emitting it.
    pub strict_attributes: bool,
}

impl WriterConfig {
    pub fn new(mode: EmitMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Self::from_toml_named(src, "cppkit.toml")
    }

    /// Parse a configuration, naming `filename` in diagnostics.
    pub fn from_toml_named(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| Error::config(e, src, filename))
    }

    pub fn with_mode(mut self, mode: EmitMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_attributes = strict;
        self
    }
}

impl FromStr for WriterConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WriterConfig::from_toml_str("").unwrap();
        assert_eq!(config.mode, EmitMode::Raw);
        assert_eq!(config.indent, Indent::Spaces(2));
        assert!(!config.strict_attributes);
    }

    #[test]
    fn test_parse_all_fields() {
        let config: WriterConfig = r#"
            mode = "header"
            indent = { spaces = 4 }
            strict_attributes = true
        "#
        .parse()
        .unwrap();
        assert_eq!(
            config,
            WriterConfig::new(EmitMode::Header)
                .with_indent(Indent::Spaces(4))
                .strict(true)
        );
    }

    #[test]
    fn test_tab_indent() {
        let config = WriterConfig::from_toml_str(r#"indent = "tab""#).unwrap();
        assert_eq!(config.indent, Indent::Tab);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = WriterConfig::from_toml_str("style = \"allman\"").unwrap_err();
        assert!(matches!(*err, Error::Config { .. }));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(WriterConfig::from_toml_str(r#"mode = "module""#).is_err());
    }
}
