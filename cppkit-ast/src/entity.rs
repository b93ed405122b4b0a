//! The universal node type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    AccessType, AttributeSpecifierSequence, Blob, Compound, Constructor, Destructor, DoWhileBlock,
    DocComment, Downcast, Enum, EntityMut, EntityRef, Expr, ForBlock, ForwardClassDecl, Function,
    FunctionPointer, HasAttributeSpecifiers, IfBlock, MacroCall, NamespaceAlias, Preprocessor,
    RangeForBlock, SwitchBlock, TypeConverter, TypedefList, TypedefName, UsingDecl,
    UsingNamespace, Var, VarList, WhileBlock,
};

/// Every construct of a C++ source tree.
///
/// Compounds own their members, so a tree is plain owned data with no
/// back-links; navigation goes top-down through [`Compound::visit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Var(Var),
    VarList(VarList),
    Enum(Enum),
    TypedefName(TypedefName),
    TypedefList(TypedefList),
    UsingDecl(UsingDecl),
    ForwardClassDecl(ForwardClassDecl),
    MacroCall(MacroCall),
    /// `public:` inside a class body.
    AccessSpecifier(AccessType),
    Compound(Compound),
    Function(Function),
    FunctionPointer(FunctionPointer),
    Constructor(Constructor),
    Destructor(Destructor),
    TypeConverter(TypeConverter),
    DocComment(DocComment),
    Preprocessor(Preprocessor),
    Blob(Blob),
    NamespaceAlias(NamespaceAlias),
    UsingNamespace(UsingNamespace),
    /// Expression statement: `foo(x);`
    Expr(Expr),
    IfBlock(IfBlock),
    WhileBlock(WhileBlock),
    DoWhileBlock(DoWhileBlock),
    ForBlock(ForBlock),
    RangeForBlock(RangeForBlock),
    SwitchBlock(SwitchBlock),
    Return(Option<Expr>),
    Throw(Option<Expr>),
    Goto(String),
    Label(String),
    Break,
    Continue,
}

/// Discriminant of [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Var,
    VarList,
    Enum,
    TypedefName,
    TypedefList,
    UsingDecl,
    ForwardClassDecl,
    MacroCall,
    AccessSpecifier,
    Compound,
    Function,
    FunctionPointer,
    Constructor,
    Destructor,
    TypeConverter,
    DocComment,
    Preprocessor,
    Blob,
    NamespaceAlias,
    UsingNamespace,
    Expr,
    IfBlock,
    WhileBlock,
    DoWhileBlock,
    ForBlock,
    RangeForBlock,
    SwitchBlock,
    Return,
    Throw,
    Goto,
    Label,
    Break,
    Continue,
}

impl EntityKind {
    /// Name used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            EntityKind::Var => "variable",
            EntityKind::VarList => "variable list",
            EntityKind::Enum => "enum",
            EntityKind::TypedefName => "typedef",
            EntityKind::TypedefList => "typedef list",
            EntityKind::UsingDecl => "using declaration",
            EntityKind::ForwardClassDecl => "forward declaration",
            EntityKind::MacroCall => "macro call",
            EntityKind::AccessSpecifier => "access specifier",
            EntityKind::Compound => "compound",
            EntityKind::Function => "function",
            EntityKind::FunctionPointer => "function pointer",
            EntityKind::Constructor => "constructor",
            EntityKind::Destructor => "destructor",
            EntityKind::TypeConverter => "type converter",
            EntityKind::DocComment => "doc comment",
            EntityKind::Preprocessor => "preprocessor directive",
            EntityKind::Blob => "blob",
            EntityKind::NamespaceAlias => "namespace alias",
            EntityKind::UsingNamespace => "using namespace",
            EntityKind::Expr => "expression",
            EntityKind::IfBlock => "if",
            EntityKind::WhileBlock => "while",
            EntityKind::DoWhileBlock => "do-while",
            EntityKind::ForBlock => "for",
            EntityKind::RangeForBlock => "range-for",
            EntityKind::SwitchBlock => "switch",
            EntityKind::Return => "return",
            EntityKind::Throw => "throw",
            EntityKind::Goto => "goto",
            EntityKind::Label => "label",
            EntityKind::Break => "break",
            EntityKind::Continue => "continue",
        }
    }

    /// Statements only appear inside blocks.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            EntityKind::Expr
                | EntityKind::IfBlock
                | EntityKind::WhileBlock
                | EntityKind::DoWhileBlock
                | EntityKind::ForBlock
                | EntityKind::RangeForBlock
                | EntityKind::SwitchBlock
                | EntityKind::Return
                | EntityKind::Throw
                | EntityKind::Goto
                | EntityKind::Label
                | EntityKind::Break
                | EntityKind::Continue
        )
    }

    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            EntityKind::Function
                | EntityKind::FunctionPointer
                | EntityKind::Constructor
                | EntityKind::Destructor
                | EntityKind::TypeConverter
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Var(_) => EntityKind::Var,
            Entity::VarList(_) => EntityKind::VarList,
            Entity::Enum(_) => EntityKind::Enum,
            Entity::TypedefName(_) => EntityKind::TypedefName,
            Entity::TypedefList(_) => EntityKind::TypedefList,
            Entity::UsingDecl(_) => EntityKind::UsingDecl,
            Entity::ForwardClassDecl(_) => EntityKind::ForwardClassDecl,
            Entity::MacroCall(_) => EntityKind::MacroCall,
            Entity::AccessSpecifier(_) => EntityKind::AccessSpecifier,
            Entity::Compound(_) => EntityKind::Compound,
            Entity::Function(_) => EntityKind::Function,
            Entity::FunctionPointer(_) => EntityKind::FunctionPointer,
            Entity::Constructor(_) => EntityKind::Constructor,
            Entity::Destructor(_) => EntityKind::Destructor,
            Entity::TypeConverter(_) => EntityKind::TypeConverter,
            Entity::DocComment(_) => EntityKind::DocComment,
            Entity::Preprocessor(_) => EntityKind::Preprocessor,
            Entity::Blob(_) => EntityKind::Blob,
            Entity::NamespaceAlias(_) => EntityKind::NamespaceAlias,
            Entity::UsingNamespace(_) => EntityKind::UsingNamespace,
            Entity::Expr(_) => EntityKind::Expr,
            Entity::IfBlock(_) => EntityKind::IfBlock,
            Entity::WhileBlock(_) => EntityKind::WhileBlock,
            Entity::DoWhileBlock(_) => EntityKind::DoWhileBlock,
            Entity::ForBlock(_) => EntityKind::ForBlock,
            Entity::RangeForBlock(_) => EntityKind::RangeForBlock,
            Entity::SwitchBlock(_) => EntityKind::SwitchBlock,
            Entity::Return(_) => EntityKind::Return,
            Entity::Throw(_) => EntityKind::Throw,
            Entity::Goto(_) => EntityKind::Goto,
            Entity::Label(_) => EntityKind::Label,
            Entity::Break => EntityKind::Break,
            Entity::Continue => EntityKind::Continue,
        }
    }

    /// Narrow to `T`, or `None` on mismatch.
    pub fn downcast<T: ?Sized + Downcast>(&self) -> Option<&T> {
        T::from_entity(self)
    }

    pub fn downcast_mut<T: ?Sized + Downcast>(&mut self) -> Option<&mut T> {
        T::from_entity_mut(self)
    }

    /// Read-only handle narrowed to `T`.
    pub fn handle<T: ?Sized + Downcast>(&self) -> EntityRef<'_, T> {
        EntityRef::new(self)
    }

    /// Mutable handle narrowed to `T`.
    pub fn handle_mut<T: ?Sized + Downcast>(&mut self) -> EntityMut<'_, T> {
        EntityMut::new(self)
    }

    /// Attribute-specifier sequence of declarations that carry one.
    pub fn attribute_specifiers(&self) -> Option<&AttributeSpecifierSequence> {
        self.downcast::<dyn HasAttributeSpecifiers>()
            .map(|decl| decl.attribute_specifiers())
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Entity::Compound(compound) => Some(compound),
            _ => None,
        }
    }
}

macro_rules! impl_from_for_entity {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Entity {
                fn from(value: $ty) -> Self {
                    Entity::$variant(value)
                }
            }
        )*
    };
}

impl_from_for_entity!(
    Var(Var),
    VarList(VarList),
    Enum(Enum),
    TypedefName(TypedefName),
    TypedefList(TypedefList),
    UsingDecl(UsingDecl),
    ForwardClassDecl(ForwardClassDecl),
    MacroCall(MacroCall),
    AccessSpecifier(AccessType),
    Compound(Compound),
    Function(Function),
    FunctionPointer(FunctionPointer),
    Constructor(Constructor),
    Destructor(Destructor),
    TypeConverter(TypeConverter),
    DocComment(DocComment),
    Preprocessor(Preprocessor),
    Blob(Blob),
    NamespaceAlias(NamespaceAlias),
    UsingNamespace(UsingNamespace),
    Expr(Expr),
    IfBlock(IfBlock),
    WhileBlock(WhileBlock),
    DoWhileBlock(DoWhileBlock),
    ForBlock(ForBlock),
    RangeForBlock(RangeForBlock),
    SwitchBlock(SwitchBlock),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VarType;

    #[test]
    fn test_kind_names() {
        assert_eq!(Entity::Break.kind(), EntityKind::Break);
        assert_eq!(EntityKind::FunctionPointer.to_string(), "function pointer");
        assert!(EntityKind::Return.is_statement());
        assert!(!EntityKind::Function.is_statement());
        assert!(EntityKind::Destructor.is_function_like());
    }

    #[test]
    fn test_attribute_specifiers_by_kind() {
        let var = Entity::from(Var::new(VarType::new("int"), "x").attribute(Expr::name("maybe_unused")));
        assert_eq!(var.attribute_specifiers().map(|s| s.len()), Some(1));
        assert!(Entity::Break.attribute_specifiers().is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let entity = Entity::from(
            Compound::namespace("ns").member(Var::new(VarType::new("int").const_(), "answer")),
        );
        let json = serde_json::to_string(&entity).unwrap();
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, back);
    }
}
