//! Expressions.
//!
//! Literals keep their source spelling (quotes, prefixes and suffixes
//! included) so that re-emission is byte-faithful. The `*_literal`
//! constructors quote plain text for generated code.

use serde::{Deserialize, Serialize};

use crate::{Compound, Param, VarType};

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Atomic(AtomicExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Ternary(TernaryExpr),
    FunctionCall(FunctionCallExpr),
    /// `Type{args}`
    UniformInitializer(UniformInitializerExpr),
    /// `{args}`
    InitializerList(Vec<Expr>),
    Cast(CastExpr),
}

/// Leaf expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AtomicExpr {
    StringLiteral(String),
    CharLiteral(String),
    NumberLiteral(String),
    /// Identifiers, qualified names and keywords such as `this` or `nullptr`.
    Name(String),
    VarType(Box<VarType>),
    Lambda(Box<LambdaExpr>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaExpr {
    /// Capture list entries: `&`, `this`, `=x`.
    pub captures: Vec<String>,
    pub params: Vec<Param>,
    pub is_mutable: bool,
    pub return_type: Option<VarType>,
    pub body: Compound,
}

impl LambdaExpr {
    pub fn new(body: Compound) -> Self {
        Self {
            captures: Vec::new(),
            params: Vec::new(),
            is_mutable: false,
            return_type: None,
            body,
        }
    }

    pub fn capture(mut self, capture: impl Into<String>) -> Self {
        self.captures.push(capture.into());
        self
    }

    pub fn param(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn mutable(mut self) -> Self {
        self.is_mutable = true;
        self
    }

    pub fn returns(mut self, ty: VarType) -> Self {
        self.return_type = Some(ty);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-x`
    Minus,
    /// `+x`
    Plus,
    /// `!x`
    Not,
    /// `~x`
    Complement,
    /// `*x`
    Deref,
    /// `&x`
    AddressOf,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    /// `sizeof(x)`
    Sizeof,
    /// `alignof(x)`
    Alignof,
    /// `new x`
    New,
    /// `delete x`
    Delete,
    /// `delete[] x`
    DeleteArray,
    /// `(x)`
    Parenthesize,
    /// `x...`
    PackExpansion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub term: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    ThreeWay,
    LogicalAnd,
    LogicalOr,
    Comma,
    /// `a.b`
    Dot,
    /// `a->b`
    Arrow,
    /// `a.*b`
    DotStar,
    /// `a->*b`
    ArrowStar,
    /// `a::b`
    Scope,
    /// `a[b]`
    Subscript,
}

impl BinaryOp {
    /// Operator token. `Subscript` has no infix token and returns `[`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::ModAssign => "%=",
            BinaryOp::AndAssign => "&=",
            BinaryOp::OrAssign => "|=",
            BinaryOp::XorAssign => "^=",
            BinaryOp::ShlAssign => "<<=",
            BinaryOp::ShrAssign => ">>=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::ThreeWay => "<=>",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Comma => ",",
            BinaryOp::Dot => ".",
            BinaryOp::Arrow => "->",
            BinaryOp::DotStar => ".*",
            BinaryOp::ArrowStar => "->*",
            BinaryOp::Scope => "::",
            BinaryOp::Subscript => "[",
        }
    }

    /// Member access and scope resolution bind without surrounding spaces.
    pub fn is_tight(&self) -> bool {
        matches!(
            self,
            BinaryOp::Dot
                | BinaryOp::Arrow
                | BinaryOp::DotStar
                | BinaryOp::ArrowStar
                | BinaryOp::Scope
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

/// `cond ? then : otherwise`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TernaryExpr {
    pub condition: Box<Expr>,
    pub then: Box<Expr>,
    pub otherwise: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallExpr {
    pub function: Box<Expr>,
    /// Explicit template arguments: `make<T, 4>(...)`.
    #[serde(default)]
    pub template_args: Vec<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformInitializerExpr {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastKind {
    /// `(T) e`
    CStyle,
    /// `T(e)`
    FunctionStyle,
    Static,
    Const,
    Dynamic,
    Reinterpret,
}

impl CastKind {
    /// Keyword of the named casts.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            CastKind::CStyle | CastKind::FunctionStyle => None,
            CastKind::Static => Some("static_cast"),
            CastKind::Const => Some("const_cast"),
            CastKind::Dynamic => Some("dynamic_cast"),
            CastKind::Reinterpret => Some("reinterpret_cast"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    pub kind: CastKind,
    pub target: VarType,
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Atomic(AtomicExpr::Name(name.into()))
    }

    /// A number literal in its source spelling (`0x10`, `1.5f`).
    pub fn number(spelling: impl ToString) -> Self {
        Expr::Atomic(AtomicExpr::NumberLiteral(spelling.to_string()))
    }

    /// A string literal already in source spelling, quotes included.
    pub fn string_spelling(spelling: impl Into<String>) -> Self {
        Expr::Atomic(AtomicExpr::StringLiteral(spelling.into()))
    }

    /// Quote and escape `text` as a narrow string literal.
    pub fn string_literal(text: &str) -> Self {
        Self::string_spelling(format!("\"{}\"", escape(text, '"')))
    }

    /// Quote and escape `c` as a character literal.
    pub fn char_literal(c: char) -> Self {
        let mut buf = [0u8; 4];
        Expr::Atomic(AtomicExpr::CharLiteral(format!(
            "'{}'",
            escape(c.encode_utf8(&mut buf), '\'')
        )))
    }

    pub fn var_type(ty: VarType) -> Self {
        Expr::Atomic(AtomicExpr::VarType(Box::new(ty)))
    }

    pub fn lambda(lambda: LambdaExpr) -> Self {
        Expr::Atomic(AtomicExpr::Lambda(Box::new(lambda)))
    }

    pub fn unary(op: UnaryOp, term: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            op,
            term: Box::new(term),
        })
    }

    pub fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn ternary(condition: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Ternary(TernaryExpr {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    pub fn call(function: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::FunctionCall(FunctionCallExpr {
            function: Box::new(function),
            template_args: Vec::new(),
            args: args.into_iter().collect(),
        })
    }

    /// Call with explicit template arguments.
    pub fn call_template(
        function: Expr,
        template_args: impl IntoIterator<Item = Expr>,
        args: impl IntoIterator<Item = Expr>,
    ) -> Self {
        Expr::FunctionCall(FunctionCallExpr {
            function: Box::new(function),
            template_args: template_args.into_iter().collect(),
            args: args.into_iter().collect(),
        })
    }

    pub fn uniform_init(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::UniformInitializer(UniformInitializerExpr {
            name: name.into(),
            args: args.into_iter().collect(),
        })
    }

    pub fn init_list(items: impl IntoIterator<Item = Expr>) -> Self {
        Expr::InitializerList(items.into_iter().collect())
    }

    pub fn cast(kind: CastKind, target: VarType, expr: Expr) -> Self {
        Expr::Cast(CastExpr {
            kind,
            target,
            expr: Box::new(expr),
        })
    }

    /// `self.member`
    pub fn dot(self, member: impl Into<String>) -> Self {
        Self::binary(self, BinaryOp::Dot, Self::name(member))
    }

    /// `self->member`
    pub fn arrow(self, member: impl Into<String>) -> Self {
        Self::binary(self, BinaryOp::Arrow, Self::name(member))
    }

    /// The identifier of a plain name expression.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Expr::Atomic(AtomicExpr::Name(name)) => Some(name),
            _ => None,
        }
    }
}

impl From<AtomicExpr> for Expr {
    fn from(atomic: AtomicExpr) -> Self {
        Expr::Atomic(atomic)
    }
}

fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_escapes() {
        let expr = Expr::string_literal("say \"hi\"\n");
        assert_eq!(
            expr,
            Expr::Atomic(AtomicExpr::StringLiteral("\"say \\\"hi\\\"\\n\"".into()))
        );
    }

    #[test]
    fn test_char_literal_escapes_quote() {
        assert_eq!(
            Expr::char_literal('\''),
            Expr::Atomic(AtomicExpr::CharLiteral("'\\''".into()))
        );
        assert_eq!(
            Expr::char_literal('"'),
            Expr::Atomic(AtomicExpr::CharLiteral("'\"'".into()))
        );
    }

    #[test]
    fn test_member_access_helpers() {
        let expr = Expr::name("this").arrow("flush");
        match expr {
            Expr::Binary(BinaryExpr { op, lhs, rhs }) => {
                assert_eq!(op, BinaryOp::Arrow);
                assert_eq!(lhs.as_name(), Some("this"));
                assert_eq!(rhs.as_name(), Some("flush"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tight_operators() {
        assert!(BinaryOp::Scope.is_tight());
        assert!(BinaryOp::Arrow.is_tight());
        assert!(!BinaryOp::Add.is_tight());
        assert!(!BinaryOp::Comma.is_tight());
    }

    #[test]
    fn test_cast_keywords() {
        assert_eq!(CastKind::Static.keyword(), Some("static_cast"));
        assert_eq!(CastKind::CStyle.keyword(), None);
    }
}
