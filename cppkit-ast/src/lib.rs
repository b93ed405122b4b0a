//! Entity model for C++ source trees.
//!
//! A parsed (or generated) C++ file is a tree of [`Entity`] values rooted in
//! a [`Compound`] of kind [`CompoundKind::File`]. Compounds own their
//! members in declaration order; every node is plain owned data that can be
//! cloned, compared and serialized.
//!
//! # Architecture
//!
//! ```text
//! parser (external) → Entity tree → cppkit-writer → C++ text
//! ```
//!
//! - [`Attribs`] is the qualifier bitmask; [`function_info`] answers the
//!   named predicates over it.
//! - [`EntityRef`] / [`EntityMut`] narrow an `Entity` to a concrete type
//!   without panicking.
//! - [`AttributeSpecifierSequence`] holds `[[...]]` attributes.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod attribs;
mod attribute_sequence;
mod compound;
mod decl;
mod entity;
mod entity_ptr;
mod error;
mod expr;
mod function;
pub mod function_info;
mod preprocessor;
mod stmt;
mod types;
mod var;

pub use attribs::{Attribs, Virtuality};
pub use attribute_sequence::{AttributeSpecifierSequence, HasAttributeSpecifiers};
pub use compound::{AccessType, BaseClass, Compound, CompoundKind};
pub use decl::{
    Blob, DocComment, Enum, EnumItem, ForwardClassDecl, MacroCall, NamespaceAlias, UsingDecl,
    UsingNamespace, UsingTarget,
};
pub use entity::{Entity, EntityKind};
pub use entity_ptr::{Downcast, EntityMut, EntityRef};
pub use error::{Error, Result};
pub use expr::{
    AtomicExpr, BinaryExpr, BinaryOp, CastExpr, CastKind, Expr, FunctionCallExpr, LambdaExpr,
    TernaryExpr, UnaryExpr, UnaryOp, UniformInitializerExpr,
};
pub use function::{
    Constructor, Destructor, FuncOrCtorCommon, Function, FunctionCommon,
    FunctionOrFuncPtrCommon, FunctionPointer, MemberInit, Param, TypeConverter,
};
pub use preprocessor::{ConditionalKind, Define, Preprocessor};
pub use stmt::{
    Condition, DoWhileBlock, ForBlock, ForInit, IfBlock, RangeForBlock, SwitchBlock, SwitchCase,
    WhileBlock,
};
pub use types::{RefKind, TemplateParam, TemplateParams, TypeModifier, VarType};
pub use var::{Initializer, TypedefList, TypedefName, Var, VarDecl, VarList, VarListItem};
