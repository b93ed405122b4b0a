//! Function-like entities and the capability traits they share.
//!
//! ```text
//! FunctionCommon              Function, FunctionPointer, Constructor, Destructor, TypeConverter
//! ├── FunctionOrFuncPtrCommon Function, FunctionPointer, Constructor
//! └── FuncOrCtorCommon        Function, Constructor
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    Attribs, AttributeSpecifierSequence, Compound, Expr, HasAttributeSpecifiers, TemplateParams,
    Var, VarType,
};

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Param {
    Var(Var),
    FunctionPointer(Box<FunctionPointer>),
}

impl Param {
    /// Parameter name; empty when only the type was written.
    pub fn name(&self) -> &str {
        match self {
            Param::Var(var) => var.name(),
            Param::FunctionPointer(fp) => &fp.name,
        }
    }

    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Param::Var(var) => Some(var),
            Param::FunctionPointer(_) => None,
        }
    }
}

impl From<Var> for Param {
    fn from(var: Var) -> Self {
        Param::Var(var)
    }
}

impl From<FunctionPointer> for Param {
    fn from(fp: FunctionPointer) -> Self {
        Param::FunctionPointer(Box::new(fp))
    }
}

/// Data shared by every function-like entity.
pub trait FunctionCommon {
    fn attribs(&self) -> Attribs;
}

/// Signature shape shared by functions, function pointers and constructors.
pub trait FunctionOrFuncPtrCommon: FunctionCommon {
    fn name(&self) -> &str;

    /// `None` for constructors.
    fn return_type(&self) -> Option<&VarType>;

    fn params(&self) -> &[Param];
}

/// Parameter visiting contract of functions and constructors.
pub trait FuncOrCtorCommon: FunctionCommon {
    fn params(&self) -> &[Param];

    /// Function body, if this is a definition.
    fn definition(&self) -> Option<&Compound>;

    /// Call `callback` on each parameter in declaration order until it
    /// returns `false`.
    fn visit_params<'a>(&'a self, mut callback: impl FnMut(&'a Param) -> bool) -> bool
    where
        Self: Sized,
    {
        for param in FuncOrCtorCommon::params(self) {
            if !callback(param) {
                return false;
            }
        }
        true
    }

    fn visit_all_params<'a>(&'a self, mut callback: impl FnMut(&'a Param))
    where
        Self: Sized,
    {
        self.visit_params(|param| {
            callback(param);
            true
        });
    }
}

/// A free function or member function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: VarType,
    pub params: Vec<Param>,
    pub attribs: Attribs,
    pub body: Option<Compound>,
    pub template_params: Option<TemplateParams>,
    /// `auto f() -> T`
    pub trailing_return: Option<VarType>,
    pub apidecor: Option<String>,
    pub attribute_specifiers: AttributeSpecifierSequence,
}

impl Function {
    pub fn new(return_type: VarType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: Vec::new(),
            attribs: Attribs::NONE,
            body: None,
            template_params: None,
            trailing_return: None,
            apidecor: None,
            attribute_specifiers: AttributeSpecifierSequence::default(),
        }
    }

    pub fn param(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn with_attribs(mut self, attribs: Attribs) -> Self {
        self.attribs |= attribs;
        self
    }

    pub fn body(mut self, body: Compound) -> Self {
        self.body = Some(body);
        self
    }

    pub fn template(mut self, params: TemplateParams) -> Self {
        self.template_params = Some(params);
        self
    }

    pub fn trailing_return(mut self, ty: VarType) -> Self {
        self.trailing_return = Some(ty);
        self
    }

    pub fn apidecor(mut self, apidecor: impl Into<String>) -> Self {
        self.apidecor = Some(apidecor.into());
        self
    }

    pub fn attribute(mut self, specifier: Expr) -> Self {
        self.attribute_specifiers.push(specifier);
        self
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// `int (*callback)(int)`; a typedef when `attribs` has `TYPEDEF`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionPointer {
    /// Empty for an abstract declarator (`void (*)(int)`).
    pub name: String,
    pub return_type: VarType,
    pub params: Vec<Param>,
    pub attribs: Attribs,
    /// Class of a pointer to member: `int (Foo::*pmf)()`.
    pub owner: Option<String>,
    pub attribute_specifiers: AttributeSpecifierSequence,
}

impl FunctionPointer {
    pub fn new(return_type: VarType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: Vec::new(),
            attribs: Attribs::NONE,
            owner: None,
            attribute_specifiers: AttributeSpecifierSequence::default(),
        }
    }

    pub fn param(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn with_attribs(mut self, attribs: Attribs) -> Self {
        self.attribs |= attribs;
        self
    }

    pub fn typedef(self) -> Self {
        self.with_attribs(Attribs::TYPEDEF)
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn is_typedef(&self) -> bool {
        self.attribs.contains(Attribs::TYPEDEF)
    }
}

/// One entry of a constructor's member initializer list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInit {
    pub name: String,
    pub args: Vec<Expr>,
    /// `name{args}` instead of `name(args)`.
    pub braced: bool,
}

impl MemberInit {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
            braced: false,
        }
    }

    pub fn braced(mut self) -> Self {
        self.braced = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    pub name: String,
    pub params: Vec<Param>,
    pub attribs: Attribs,
    pub member_inits: Vec<MemberInit>,
    pub body: Option<Compound>,
    pub template_params: Option<TemplateParams>,
    pub attribute_specifiers: AttributeSpecifierSequence,
}

impl Constructor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            attribs: Attribs::NONE,
            member_inits: Vec::new(),
            body: None,
            template_params: None,
            attribute_specifiers: AttributeSpecifierSequence::default(),
        }
    }

    pub fn param(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn with_attribs(mut self, attribs: Attribs) -> Self {
        self.attribs |= attribs;
        self
    }

    pub fn member_init(mut self, init: MemberInit) -> Self {
        self.member_inits.push(init);
        self
    }

    pub fn body(mut self, body: Compound) -> Self {
        self.body = Some(body);
        self
    }

    pub fn template(mut self, params: TemplateParams) -> Self {
        self.template_params = Some(params);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destructor {
    /// Class name, without the `~`.
    pub name: String,
    pub attribs: Attribs,
    pub body: Option<Compound>,
    pub attribute_specifiers: AttributeSpecifierSequence,
}

impl Destructor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribs: Attribs::NONE,
            body: None,
            attribute_specifiers: AttributeSpecifierSequence::default(),
        }
    }

    pub fn with_attribs(mut self, attribs: Attribs) -> Self {
        self.attribs |= attribs;
        self
    }

    pub fn body(mut self, body: Compound) -> Self {
        self.body = Some(body);
        self
    }
}

/// `operator int() const`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeConverter {
    pub target: VarType,
    pub attribs: Attribs,
    pub body: Option<Compound>,
    pub template_params: Option<TemplateParams>,
    pub attribute_specifiers: AttributeSpecifierSequence,
}

impl TypeConverter {
    pub fn new(target: VarType) -> Self {
        Self {
            target,
            attribs: Attribs::NONE,
            body: None,
            template_params: None,
            attribute_specifiers: AttributeSpecifierSequence::default(),
        }
    }

    pub fn with_attribs(mut self, attribs: Attribs) -> Self {
        self.attribs |= attribs;
        self
    }

    pub fn body(mut self, body: Compound) -> Self {
        self.body = Some(body);
        self
    }
}

macro_rules! impl_function_common {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FunctionCommon for $ty {
                fn attribs(&self) -> Attribs {
                    self.attribs
                }
            }

            impl HasAttributeSpecifiers for $ty {
                fn attribute_specifiers(&self) -> &AttributeSpecifierSequence {
                    &self.attribute_specifiers
                }

                fn attribute_specifiers_mut(&mut self) -> &mut AttributeSpecifierSequence {
                    &mut self.attribute_specifiers
                }
            }
        )*
    };
}

impl_function_common!(Function, FunctionPointer, Constructor, Destructor, TypeConverter);

impl FunctionOrFuncPtrCommon for Function {
    fn name(&self) -> &str {
        &self.name
    }

    fn return_type(&self) -> Option<&VarType> {
        Some(&self.return_type)
    }

    fn params(&self) -> &[Param] {
        &self.params
    }
}

impl FunctionOrFuncPtrCommon for FunctionPointer {
    fn name(&self) -> &str {
        &self.name
    }

    fn return_type(&self) -> Option<&VarType> {
        Some(&self.return_type)
    }

    fn params(&self) -> &[Param] {
        &self.params
    }
}

impl FunctionOrFuncPtrCommon for Constructor {
    fn name(&self) -> &str {
        &self.name
    }

    fn return_type(&self) -> Option<&VarType> {
        None
    }

    fn params(&self) -> &[Param] {
        &self.params
    }
}

impl FuncOrCtorCommon for Function {
    fn params(&self) -> &[Param] {
        &self.params
    }

    fn definition(&self) -> Option<&Compound> {
        self.body.as_ref()
    }
}

impl FuncOrCtorCommon for Constructor {
    fn params(&self) -> &[Param] {
        &self.params
    }

    fn definition(&self) -> Option<&Compound> {
        self.body.as_ref()
    }
}
