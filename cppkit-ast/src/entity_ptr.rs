//! Safe downcast handles over [`Entity`].
//!
//! A handle is a short-lived, non-owning view narrowed to one target type.
//! Narrowing never panics: a mismatch yields an empty handle, and reading
//! through an empty handle returns [`Error::InvalidAccess`].
//!
//! Mutability follows the borrow: [`EntityRef`] can only be built from a
//! shared reference and only hands out shared references, so a read-only
//! entity can never be narrowed into a mutable view. [`EntityMut`] requires
//! `&mut Entity`.
//!
//! ```
//! use cppkit_ast::{Entity, Function, Var, VarType};
//!
//! let entity = Entity::from(Var::new(VarType::new("int"), "x"));
//! assert!(entity.handle::<Var>().is_valid());
//! assert!(entity.handle::<Function>().get().is_err());
//! ```

use std::{fmt, marker::PhantomData};

use crate::{
    AccessType, Blob, Compound, Constructor, Destructor, DoWhileBlock, DocComment, Entity,
    EntityKind, Enum, Error, Expr, ForBlock, ForwardClassDecl, FuncOrCtorCommon, Function,
    FunctionCommon, FunctionOrFuncPtrCommon, FunctionPointer, HasAttributeSpecifiers, IfBlock,
    MacroCall, NamespaceAlias, Preprocessor, RangeForBlock, Result, SwitchBlock, TypeConverter,
    TypedefList, TypedefName, UsingDecl, UsingNamespace, Var, VarList, WhileBlock,
};

/// Types an [`Entity`] can be narrowed to.
///
/// Implemented for every concrete node type, for `Entity` itself and for the
/// capability trait objects (`dyn FunctionCommon`, ...), which gives upcasts
/// and sidecasts through the same checked path.
pub trait Downcast {
    /// Target name reported by [`Error::InvalidAccess`].
    const NAME: &'static str;

    fn from_entity(entity: &Entity) -> Option<&Self>;

    fn from_entity_mut(entity: &mut Entity) -> Option<&mut Self>;
}

impl Downcast for Entity {
    const NAME: &'static str = "entity";

    fn from_entity(entity: &Entity) -> Option<&Self> {
        Some(entity)
    }

    fn from_entity_mut(entity: &mut Entity) -> Option<&mut Self> {
        Some(entity)
    }
}

macro_rules! impl_downcast_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl Downcast for $ty {
                const NAME: &'static str = EntityKind::$variant.name();

                fn from_entity(entity: &Entity) -> Option<&Self> {
                    match entity {
                        Entity::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn from_entity_mut(entity: &mut Entity) -> Option<&mut Self> {
                    match entity {
                        Entity::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_downcast_variant!(
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

macro_rules! impl_downcast_capability {
    ($name:literal, $tr:ident => $($variant:ident),* $(,)?) => {
        impl Downcast for dyn $tr {
            const NAME: &'static str = $name;

            fn from_entity(entity: &Entity) -> Option<&Self> {
                match entity {
                    $(Entity::$variant(value) => Some(value as &Self),)*
                    _ => None,
                }
            }

            fn from_entity_mut(entity: &mut Entity) -> Option<&mut Self> {
                match entity {
                    $(Entity::$variant(value) => Some(value as &mut Self),)*
                    _ => None,
                }
            }
        }
    };
}

impl_downcast_capability!(
    "function-like entity", FunctionCommon =>
    Function, FunctionPointer, Constructor, Destructor, TypeConverter,
);
impl_downcast_capability!(
    "function or function pointer", FunctionOrFuncPtrCommon =>
    Function, FunctionPointer, Constructor,
);
impl_downcast_capability!(
    "function or constructor", FuncOrCtorCommon =>
    Function, Constructor,
);
impl_downcast_capability!(
    "declaration with attributes", HasAttributeSpecifiers =>
    Var, Enum, Compound, Function, FunctionPointer, Constructor, Destructor, TypeConverter,
);

fn found_name(entity: Option<&Entity>) -> &'static str {
    entity.map(|e| e.kind().name()).unwrap_or("nothing")
}

/// Read-only handle narrowed to `T`.
pub struct EntityRef<'a, T: ?Sized> {
    entity: Option<&'a Entity>,
    target: Option<&'a T>,
}

impl<'a, T: ?Sized + Downcast> EntityRef<'a, T> {
    /// Checked narrowing; empty on mismatch.
    pub fn new(entity: &'a Entity) -> Self {
        Self {
            entity: Some(entity),
            target: T::from_entity(entity),
        }
    }

    /// Identity wrap of an already typed reference.
    ///
    /// The handle has no enclosing entity, so [`EntityRef::cast`] on it
    /// yields an empty handle.
    pub fn from_target(target: &'a T) -> Self {
        Self {
            entity: None,
            target: Some(target),
        }
    }

    pub fn null() -> Self {
        Self {
            entity: None,
            target: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.target.is_some()
    }

    /// The narrowed reference, or [`Error::InvalidAccess`] if the handle is empty.
    pub fn get(&self) -> Result<&'a T> {
        self.target
            .ok_or_else(|| Error::invalid_access(T::NAME, found_name(self.entity)))
    }

    pub fn as_option(&self) -> Option<&'a T> {
        self.target
    }

    /// The viewed entity, whether or not narrowing succeeded.
    pub fn entity(&self) -> Option<&'a Entity> {
        self.entity
    }

    /// Re-narrow to `U`. An empty handle stays empty.
    pub fn cast<U: ?Sized + Downcast>(&self) -> EntityRef<'a, U> {
        match (self.target, self.entity) {
            (Some(_), Some(entity)) => EntityRef::new(entity),
            _ => EntityRef::null(),
        }
    }
}

impl<T: ?Sized> Clone for EntityRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for EntityRef<'_, T> {}

impl<T: ?Sized + Downcast> fmt::Debug for EntityRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("target", &T::NAME)
            .field("found", &found_name(self.entity))
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Mutable handle narrowed to `T`.
pub struct EntityMut<'a, T: ?Sized> {
    entity: Option<&'a mut Entity>,
    /// Kind name of the viewed entity, kept after a failed narrowing.
    found: &'static str,
    _target: PhantomData<fn(&T)>,
}

impl<'a, T: ?Sized + Downcast> EntityMut<'a, T> {
    /// Checked narrowing; empty on mismatch.
    pub fn new(entity: &'a mut Entity) -> Self {
        let found = entity.kind().name();
        let entity = if T::from_entity(entity).is_some() {
            Some(entity)
        } else {
            None
        };
        Self {
            entity,
            found,
            _target: PhantomData,
        }
    }

    pub fn null() -> Self {
        Self {
            entity: None,
            found: found_name(None),
            _target: PhantomData,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.entity.is_some()
    }

    pub fn get(&self) -> Result<&T> {
        self.entity
            .as_deref()
            .and_then(T::from_entity)
            .ok_or_else(|| Error::invalid_access(T::NAME, self.found))
    }

    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.entity
            .as_deref_mut()
            .and_then(T::from_entity_mut)
            .ok_or_else(|| Error::invalid_access(T::NAME, self.found))
    }

    /// Consume the handle, keeping the full borrow.
    pub fn into_mut(self) -> Result<&'a mut T> {
        let found = self.found;
        self.entity
            .and_then(T::from_entity_mut)
            .ok_or_else(|| Error::invalid_access(T::NAME, found))
    }

    /// Re-narrow to `U`. An empty handle stays empty.
    pub fn cast<U: ?Sized + Downcast>(self) -> EntityMut<'a, U> {
        match self.entity {
            Some(entity) => EntityMut::new(entity),
            None => EntityMut::null(),
        }
    }

    /// Reborrow as a read-only handle.
    pub fn as_ref(&self) -> EntityRef<'_, T> {
        match self.entity.as_deref() {
            Some(entity) => EntityRef::new(entity),
            None => EntityRef::null(),
        }
    }
}

impl<T: ?Sized + Downcast> fmt::Debug for EntityMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMut")
            .field("target", &T::NAME)
            .field("found", &self.found)
            .field("valid", &self.is_valid())
            .finish()
    }
}
