//! Scopes: files, namespaces, classes, structs, unions, `extern "C"` and blocks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AttributeSpecifierSequence, Entity, Expr, HasAttributeSpecifiers, TemplateParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundKind {
    /// A whole translation unit or header.
    File,
    Namespace,
    Class,
    Struct,
    Union,
    /// `extern "C" { ... }`
    ExternC,
    /// Braced statement block: function bodies and control-flow bodies.
    Block,
}

impl CompoundKind {
    /// Class-like kinds own members and access specifiers.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            CompoundKind::Class | CompoundKind::Struct | CompoundKind::Union
        )
    }

    /// Keyword introducing the compound, if it has one.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            CompoundKind::Namespace => Some("namespace"),
            CompoundKind::Class => Some("class"),
            CompoundKind::Struct => Some("struct"),
            CompoundKind::Union => Some("union"),
            CompoundKind::ExternC => Some("extern \"C\""),
            CompoundKind::File | CompoundKind::Block => None,
        }
    }
}

impl fmt::Display for CompoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundKind::File => f.write_str("file"),
            CompoundKind::Block => f.write_str("block"),
            other => f.write_str(other.keyword().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessType {
    Public,
    Protected,
    Private,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Public => "public",
            AccessType::Protected => "protected",
            AccessType::Private => "private",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a base-class list: `public virtual Base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseClass {
    pub access: Option<AccessType>,
    pub is_virtual: bool,
    pub name: String,
}

impl BaseClass {
    pub fn new(access: AccessType, name: impl Into<String>) -> Self {
        Self {
            access: Some(access),
            is_virtual: false,
            name: name.into(),
        }
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self::new(AccessType::Public, name)
    }

    pub fn virtual_(mut self) -> Self {
        self.is_virtual = true;
        self
    }
}

/// A scope owning an ordered list of member entities.
///
/// Member order is declaration order and is preserved on emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub kind: CompoundKind,
    /// Empty for anonymous namespaces, classes and for blocks.
    pub name: String,
    pub apidecor: Option<String>,
    pub bases: Vec<BaseClass>,
    pub template_params: Option<TemplateParams>,
    pub is_final: bool,
    pub attribute_specifiers: AttributeSpecifierSequence,
    members: Vec<Entity>,
}

impl Compound {
    pub fn new(kind: CompoundKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            apidecor: None,
            bases: Vec::new(),
            template_params: None,
            is_final: false,
            attribute_specifiers: AttributeSpecifierSequence::default(),
            members: Vec::new(),
        }
    }

    pub fn file() -> Self {
        Self::new(CompoundKind::File, "")
    }

    pub fn block() -> Self {
        Self::new(CompoundKind::Block, "")
    }

    pub fn namespace(name: impl Into<String>) -> Self {
        Self::new(CompoundKind::Namespace, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(CompoundKind::Class, name)
    }

    pub fn struct_(name: impl Into<String>) -> Self {
        Self::new(CompoundKind::Struct, name)
    }

    pub fn union(name: impl Into<String>) -> Self {
        Self::new(CompoundKind::Union, name)
    }

    pub fn extern_c() -> Self {
        Self::new(CompoundKind::ExternC, "")
    }

    pub fn apidecor(mut self, apidecor: impl Into<String>) -> Self {
        self.apidecor = Some(apidecor.into());
        self
    }

    pub fn base(mut self, base: BaseClass) -> Self {
        self.bases.push(base);
        self
    }

    pub fn template(mut self, params: TemplateParams) -> Self {
        self.template_params = Some(params);
        self
    }

    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn attribute(mut self, specifier: Expr) -> Self {
        self.attribute_specifiers.push(specifier);
        self
    }

    /// Append a member and return the compound (builder form of [`Compound::add`]).
    pub fn member(mut self, member: impl Into<Entity>) -> Self {
        self.add(member);
        self
    }

    /// Append a member after the existing ones.
    pub fn add(&mut self, member: impl Into<Entity>) {
        self.members.push(member.into());
    }

    /// Insert a member at `index`, shifting later members back.
    pub fn insert(&mut self, index: usize, member: impl Into<Entity>) {
        self.members.insert(index, member.into());
    }

    /// Detach and return the member at `index`.
    pub fn remove(&mut self, index: usize) -> Entity {
        self.members.remove(index)
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Entity] {
        &mut self.members
    }

    pub fn into_members(self) -> Vec<Entity> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_class_like(&self) -> bool {
        self.kind.is_class_like()
    }

    /// Call `callback` on each member in order until it returns `false`.
    pub fn visit(&self, mut callback: impl FnMut(&Entity) -> bool) -> bool {
        for member in &self.members {
            if !callback(member) {
                return false;
            }
        }
        true
    }

    pub fn visit_all(&self, mut callback: impl FnMut(&Entity)) {
        self.visit(|member| {
            callback(member);
            true
        });
    }

    pub fn visit_mut(&mut self, mut callback: impl FnMut(&mut Entity) -> bool) -> bool {
        for member in &mut self.members {
            if !callback(member) {
                return false;
            }
        }
        true
    }

    pub fn visit_all_mut(&mut self, mut callback: impl FnMut(&mut Entity)) {
        self.visit_mut(|member| {
            callback(member);
            true
        });
    }
}

impl HasAttributeSpecifiers for Compound {
    fn attribute_specifiers(&self) -> &AttributeSpecifierSequence {
        &self.attribute_specifiers
    }

    fn attribute_specifiers_mut(&mut self) -> &mut AttributeSpecifierSequence {
        &mut self.attribute_specifiers
    }
}
