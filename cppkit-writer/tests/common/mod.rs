//! Shared helpers for the writer integration tests.

#![allow(dead_code)]

use std::{fs, path::PathBuf};

use cppkit_ast::{Blob, Compound, DocComment, Entity, Preprocessor, Var, VarType};
use eyre::{Result, WrapErr};

/// Path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a golden file.
pub fn fixture(name: &str) -> Result<String> {
    let path = fixture_path(name);
    fs::read_to_string(&path).wrap_err_with(|| format!("reading fixture {}", path.display()))
}

pub fn var(ty: VarType, name: &str) -> Var {
    Var::new(ty, name)
}

/// `const T&`
pub fn const_ref(base: &str) -> VarType {
    VarType::new(base).const_().reference()
}

pub fn ptr(base: &str) -> VarType {
    VarType::new(base).pointer()
}

pub fn doc(text: &str) -> Entity {
    DocComment::new(text).into()
}

/// A body whose statements are kept as raw text.
pub fn raw_body(text: &str) -> Compound {
    Compound::block().member(Blob::new(text))
}

pub fn pp(directive: Preprocessor) -> Entity {
    Entity::Preprocessor(directive)
}
