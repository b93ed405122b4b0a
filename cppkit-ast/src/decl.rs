//! Remaining declarations: enums, using-declarations, forward declarations,
//! macro calls, comments and raw text.

use serde::{Deserialize, Serialize};

use crate::{
    AttributeSpecifierSequence, Compound, CompoundKind, Entity, Expr, FunctionPointer,
    HasAttributeSpecifiers, TemplateParams, VarType,
};

/// An enumerator list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnumItem {
    Constant { name: String, value: Option<Expr> },
    /// Comments, preprocessor directives or raw text between enumerators.
    Entity(Box<Entity>),
}

impl EnumItem {
    pub fn constant(name: impl Into<String>) -> Self {
        EnumItem::Constant {
            name: name.into(),
            value: None,
        }
    }

    pub fn valued(name: impl Into<String>, value: Expr) -> Self {
        EnumItem::Constant {
            name: name.into(),
            value: Some(value),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, EnumItem::Constant { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    /// Empty for an anonymous enum.
    pub name: String,
    /// `enum class`
    pub scoped: bool,
    pub underlying: Option<String>,
    /// `None` for an opaque declaration (`enum class E : int;`).
    pub items: Option<Vec<EnumItem>>,
    pub attribute_specifiers: AttributeSpecifierSequence,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scoped: false,
            underlying: None,
            items: Some(Vec::new()),
            attribute_specifiers: AttributeSpecifierSequence::default(),
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            items: None,
            ..Self::new(name)
        }
    }

    pub fn scoped(mut self) -> Self {
        self.scoped = true;
        self
    }

    pub fn underlying(mut self, ty: impl Into<String>) -> Self {
        self.underlying = Some(ty.into());
        self
    }

    pub fn item(mut self, item: EnumItem) -> Self {
        self.items.get_or_insert_with(Vec::new).push(item);
        self
    }

    /// Enumerator names in declaration order.
    pub fn constants(&self) -> Vec<&str> {
        self.items
            .iter()
            .flatten()
            .filter_map(|item| match item {
                EnumItem::Constant { name, .. } => Some(name.as_str()),
                EnumItem::Entity(_) => None,
            })
            .collect()
    }
}

impl HasAttributeSpecifiers for Enum {
    fn attribute_specifiers(&self) -> &AttributeSpecifierSequence {
        &self.attribute_specifiers
    }

    fn attribute_specifiers_mut(&mut self) -> &mut AttributeSpecifierSequence {
        &mut self.attribute_specifiers
    }
}

/// Right-hand side of an alias declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UsingTarget {
    Type(VarType),
    FunctionPointer(Box<FunctionPointer>),
    Compound(Box<Compound>),
}

/// `using Name = Target;` or `using Base::member;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsingDecl {
    pub name: String,
    pub target: Option<UsingTarget>,
    pub template_params: Option<TemplateParams>,
}

impl UsingDecl {
    /// `using name;`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            template_params: None,
        }
    }

    /// `using name = target;`
    pub fn alias(name: impl Into<String>, target: UsingTarget) -> Self {
        Self {
            target: Some(target),
            ..Self::new(name)
        }
    }

    pub fn template(mut self, params: TemplateParams) -> Self {
        self.template_params = Some(params);
        self
    }
}

/// `class WXDLLIMPEXP_FWD_CORE wxDC;` or `friend class Foo;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardClassDecl {
    pub kind: CompoundKind,
    pub name: String,
    pub apidecor: Option<String>,
    pub template_params: Option<TemplateParams>,
    pub friend: bool,
}

impl ForwardClassDecl {
    pub fn new(kind: CompoundKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            apidecor: None,
            template_params: None,
            friend: false,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(CompoundKind::Class, name)
    }

    pub fn struct_(name: impl Into<String>) -> Self {
        Self::new(CompoundKind::Struct, name)
    }

    pub fn apidecor(mut self, apidecor: impl Into<String>) -> Self {
        self.apidecor = Some(apidecor.into());
        self
    }

    pub fn template(mut self, params: TemplateParams) -> Self {
        self.template_params = Some(params);
        self
    }

    pub fn friend(mut self) -> Self {
        self.friend = true;
        self
    }
}

/// A macro invocation at declaration level, kept verbatim
/// (`wxDECLARE_EVENT_TABLE();`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroCall {
    pub text: String,
}

impl MacroCall {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A comment attached to the declarations that follow it, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    pub text: String,
}

impl DocComment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Raw source text the parser did not structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub text: String,
}

impl Blob {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// `namespace fs = std::filesystem;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceAlias {
    pub alias: String,
    pub target: String,
}

impl NamespaceAlias {
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }
}

/// `using namespace std;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsingNamespace {
    pub name: String,
}

impl UsingNamespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
