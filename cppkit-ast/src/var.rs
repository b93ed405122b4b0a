//! Variables, variable lists and typedefs.

use serde::{Deserialize, Serialize};

use crate::{
    AttributeSpecifierSequence, Expr, HasAttributeSpecifiers, TemplateParams, TypeModifier,
    VarType,
};

/// Initializer of a declarator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Initializer {
    /// `= expr`
    Assign(Expr),
    /// `{args}`
    Brace(Vec<Expr>),
    /// `(args)`
    Paren(Vec<Expr>),
}

/// Declarator part of a variable: name, array dimensions, bit field, initializer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    /// One entry per `[...]`; `None` for `[]`.
    pub array_dims: Vec<Option<Expr>>,
    pub bit_field: Option<Expr>,
    pub init: Option<Initializer>,
}

impl VarDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn array(mut self, size: Option<Expr>) -> Self {
        self.array_dims.push(size);
        self
    }

    pub fn bit_field(mut self, width: Expr) -> Self {
        self.bit_field = Some(width);
        self
    }

    pub fn init(mut self, init: Initializer) -> Self {
        self.init = Some(init);
        self
    }

    /// `= value`
    pub fn assign(self, value: Expr) -> Self {
        self.init(Initializer::Assign(value))
    }
}

/// A variable declaration. Also the representation of function parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Var {
    pub var_type: VarType,
    pub decl: VarDecl,
    pub apidecor: Option<String>,
    pub template_params: Option<TemplateParams>,
    pub attribute_specifiers: AttributeSpecifierSequence,
}

impl Var {
    pub fn new(var_type: VarType, name: impl Into<String>) -> Self {
        Self::with_decl(var_type, VarDecl::new(name))
    }

    pub fn with_decl(var_type: VarType, decl: VarDecl) -> Self {
        Self {
            var_type,
            decl,
            apidecor: None,
            template_params: None,
            attribute_specifiers: AttributeSpecifierSequence::default(),
        }
    }

    /// An unnamed variable, as used for parameters declared by type only.
    pub fn unnamed(var_type: VarType) -> Self {
        Self::new(var_type, "")
    }

    /// The `...` of a variadic parameter list.
    pub fn ellipsis() -> Self {
        Self::unnamed(VarType::new("..."))
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// Default value or `= init` initializer.
    pub fn assign(mut self, value: Expr) -> Self {
        self.decl.init = Some(Initializer::Assign(value));
        self
    }

    pub fn init(mut self, init: Initializer) -> Self {
        self.decl.init = Some(init);
        self
    }

    pub fn apidecor(mut self, apidecor: impl Into<String>) -> Self {
        self.apidecor = Some(apidecor.into());
        self
    }

    pub fn template(mut self, params: TemplateParams) -> Self {
        self.template_params = Some(params);
        self
    }

    pub fn attribute(mut self, specifier: Expr) -> Self {
        self.attribute_specifiers.push(specifier);
        self
    }
}

impl HasAttributeSpecifiers for Var {
    fn attribute_specifiers(&self) -> &AttributeSpecifierSequence {
        &self.attribute_specifiers
    }

    fn attribute_specifiers_mut(&mut self) -> &mut AttributeSpecifierSequence {
        &mut self.attribute_specifiers
    }
}

/// Additional declarator of a variable list: `*b` in `int a, *b;`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarListItem {
    pub modifier: TypeModifier,
    pub decl: VarDecl,
}

/// `int a = 1, *b, &c = a;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarList {
    pub first: Var,
    pub rest: Vec<VarListItem>,
}

impl VarList {
    pub fn new(first: Var) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    pub fn item(mut self, modifier: TypeModifier, decl: VarDecl) -> Self {
        self.rest.push(VarListItem { modifier, decl });
        self
    }

    /// Declarator names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        std::iter::once(self.first.name())
            .chain(self.rest.iter().map(|item| item.decl.name.as_str()))
            .collect()
    }
}

/// `typedef unsigned int UINT;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedefName {
    pub var: Var,
}

impl TypedefName {
    pub fn new(var_type: VarType, name: impl Into<String>) -> Self {
        Self {
            var: Var::new(var_type, name),
        }
    }
}

/// `typedef struct tagX X, *PX;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedefList {
    pub var_list: VarList,
}
