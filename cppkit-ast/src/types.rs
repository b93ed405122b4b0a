//! Type spellings and template parameter lists.

use serde::{Deserialize, Serialize};

use crate::{Attribs, Entity, Expr};

/// Reference qualifier of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RefKind {
    #[default]
    None,
    /// `&`
    LValue,
    /// `&&`
    RValue,
}

impl RefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::None => "",
            RefKind::LValue => "&",
            RefKind::RValue => "&&",
        }
    }
}

/// Pointer and reference decoration that follows a base type.
///
/// Bit `i` of `const_mask` marks pointer level `i` as `* const`. Only the
/// first [`TypeModifier::CONST_LEVELS`] levels can carry `const`; deeper
/// levels are always plain `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TypeModifier {
    pub ptr_levels: u8,
    pub const_mask: u64,
    pub ref_kind: RefKind,
}

impl TypeModifier {
    pub const CONST_LEVELS: u8 = u64::BITS as u8;

    pub fn pointer(levels: u8) -> Self {
        Self {
            ptr_levels: levels,
            ..Self::default()
        }
    }

    pub fn lvalue_ref() -> Self {
        Self {
            ref_kind: RefKind::LValue,
            ..Self::default()
        }
    }

    pub fn rvalue_ref() -> Self {
        Self {
            ref_kind: RefKind::RValue,
            ..Self::default()
        }
    }

    /// Mark pointer level `level` (0-based) as const. Levels at or past
    /// [`Self::CONST_LEVELS`] are left unchanged.
    pub fn const_at(mut self, level: u8) -> Self {
        if let Some(bit) = 1u64.checked_shl(u32::from(level)) {
            self.const_mask |= bit;
        }
        self
    }

    pub fn is_const_at(&self, level: u8) -> bool {
        1u64.checked_shl(u32::from(level))
            .is_some_and(|bit| self.const_mask & bit != 0)
    }

    pub fn is_plain(&self) -> bool {
        self.ptr_levels == 0 && self.ref_kind == RefKind::None
    }
}

/// A C++ type as written in a declaration: `const std::string&`, `char* const`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarType {
    /// Base type spelling, e.g. `unsigned int` or `std::vector<int>`.
    pub base_type: String,
    pub attribs: Attribs,
    pub modifier: TypeModifier,
    /// An enum or compound defined in place of the base type
    /// (`struct { int x; } point;`).
    pub definition: Option<Box<Entity>>,
    /// `Args...`
    pub param_pack: bool,
}

impl VarType {
    pub fn new(base_type: impl Into<String>) -> Self {
        Self {
            base_type: base_type.into(),
            attribs: Attribs::NONE,
            modifier: TypeModifier::default(),
            definition: None,
            param_pack: false,
        }
    }

    /// A type defined in place by `definition`.
    pub fn defined_by(definition: Entity) -> Self {
        Self {
            definition: Some(Box::new(definition)),
            ..Self::new("")
        }
    }

    pub fn with_attribs(mut self, attribs: Attribs) -> Self {
        self.attribs |= attribs;
        self
    }

    pub fn const_(self) -> Self {
        self.with_attribs(Attribs::CONST)
    }

    pub fn static_(self) -> Self {
        self.with_attribs(Attribs::STATIC)
    }

    pub fn modifier(mut self, modifier: TypeModifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn pointer(self) -> Self {
        let levels = self.modifier.ptr_levels.saturating_add(1);
        let modifier = TypeModifier {
            ptr_levels: levels,
            ..self.modifier
        };
        self.modifier(modifier)
    }

    pub fn reference(mut self) -> Self {
        self.modifier.ref_kind = RefKind::LValue;
        self
    }

    pub fn rvalue_reference(mut self) -> Self {
        self.modifier.ref_kind = RefKind::RValue;
        self
    }

    pub fn pack(mut self) -> Self {
        self.param_pack = true;
        self
    }

    /// Returns true for the `...` placeholder of a variadic parameter list.
    pub fn is_ellipsis(&self) -> bool {
        self.base_type == "..." && self.definition.is_none()
    }
}

/// One parameter of a template parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateParam {
    /// Type of a non-type parameter; `None` declares a type parameter.
    pub param_type: Option<VarType>,
    pub name: String,
    pub default: Option<Expr>,
    pub pack: bool,
}

impl TemplateParam {
    /// `typename T`
    pub fn typename(name: impl Into<String>) -> Self {
        Self {
            param_type: None,
            name: name.into(),
            default: None,
            pack: false,
        }
    }

    /// `int N`
    pub fn non_type(param_type: VarType, name: impl Into<String>) -> Self {
        Self {
            param_type: Some(param_type),
            ..Self::typename(name)
        }
    }

    pub fn default(mut self, value: Expr) -> Self {
        self.default = Some(value);
        self
    }

    pub fn pack(mut self) -> Self {
        self.pack = true;
        self
    }
}

/// `template <...>` prefix. An empty list is an explicit specialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateParams(pub Vec<TemplateParam>);

impl TemplateParams {
    pub fn new(params: impl IntoIterator<Item = TemplateParam>) -> Self {
        Self(params.into_iter().collect())
    }

    /// Argument list naming each parameter, as used to qualify an
    /// out-of-line member: `<T, N>` or `<Ts...>`.
    pub fn arguments(&self) -> String {
        let args: Vec<String> = self
            .0
            .iter()
            .map(|p| {
                if p.pack {
                    format!("{}...", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect();
        format!("<{}>", args.join(", "))
    }

    pub fn is_specialization(&self) -> bool {
        self.0.is_empty()
    }
}
