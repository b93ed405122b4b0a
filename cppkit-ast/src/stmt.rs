//! Control-flow statements.
//!
//! Bodies are entities: usually a [`CompoundKind::Block`](crate::CompoundKind)
//! compound, but a single statement is allowed as in C++.

use serde::{Deserialize, Serialize};

use crate::{Compound, Entity, Expr, Var, VarList};

/// Condition of `if`, `while` and `switch`: an expression or a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Expr(Expr),
    /// `if (auto* p = find())`
    Var(Box<Var>),
}

impl From<Expr> for Condition {
    fn from(expr: Expr) -> Self {
        Condition::Expr(expr)
    }
}

impl From<Var> for Condition {
    fn from(var: Var) -> Self {
        Condition::Var(Box::new(var))
    }
}

/// First clause of a `for` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForInit {
    Expr(Expr),
    Var(Box<Var>),
    VarList(Box<VarList>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfBlock {
    pub condition: Condition,
    pub body: Box<Entity>,
    /// Another [`IfBlock`] renders as `else if`.
    pub else_part: Option<Box<Entity>>,
}

impl IfBlock {
    pub fn new(condition: impl Into<Condition>, body: impl Into<Entity>) -> Self {
        Self {
            condition: condition.into(),
            body: Box::new(body.into()),
            else_part: None,
        }
    }

    pub fn otherwise(mut self, else_part: impl Into<Entity>) -> Self {
        self.else_part = Some(Box::new(else_part.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileBlock {
    pub condition: Condition,
    pub body: Box<Entity>,
}

impl WhileBlock {
    pub fn new(condition: impl Into<Condition>, body: impl Into<Entity>) -> Self {
        Self {
            condition: condition.into(),
            body: Box::new(body.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoWhileBlock {
    pub body: Box<Entity>,
    pub condition: Expr,
}

impl DoWhileBlock {
    pub fn new(body: impl Into<Entity>, condition: Expr) -> Self {
        Self {
            body: Box::new(body.into()),
            condition,
        }
    }
}

/// `for (start; condition; step)`; every clause is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForBlock {
    pub start: Option<ForInit>,
    pub condition: Option<Expr>,
    pub step: Option<Expr>,
    pub body: Box<Entity>,
}

impl ForBlock {
    pub fn new(body: impl Into<Entity>) -> Self {
        Self {
            start: None,
            condition: None,
            step: None,
            body: Box::new(body.into()),
        }
    }

    pub fn start(mut self, start: ForInit) -> Self {
        self.start = Some(start);
        self
    }

    pub fn condition(mut self, condition: Expr) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn step(mut self, step: Expr) -> Self {
        self.step = Some(step);
        self
    }
}

/// `for (const auto& item : items)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeForBlock {
    pub var: Var,
    pub range: Expr,
    pub body: Box<Entity>,
}

impl RangeForBlock {
    pub fn new(var: Var, range: Expr, body: impl Into<Entity>) -> Self {
        Self {
            var,
            range,
            body: Box::new(body.into()),
        }
    }
}

/// One `case` section; `label` is `None` for `default:`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub label: Option<Expr>,
    pub body: Vec<Entity>,
}

impl SwitchCase {
    pub fn case(label: Expr) -> Self {
        Self {
            label: Some(label),
            body: Vec::new(),
        }
    }

    pub fn default_case() -> Self {
        Self {
            label: None,
            body: Vec::new(),
        }
    }

    pub fn stmt(mut self, stmt: impl Into<Entity>) -> Self {
        self.body.push(stmt.into());
        self
    }

    pub fn is_default(&self) -> bool {
        self.label.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchBlock {
    pub condition: Condition,
    pub cases: Vec<SwitchCase>,
}

impl SwitchBlock {
    pub fn new(condition: impl Into<Condition>) -> Self {
        Self {
            condition: condition.into(),
            cases: Vec::new(),
        }
    }

    pub fn case(mut self, case: SwitchCase) -> Self {
        self.cases.push(case);
        self
    }
}

impl Compound {
    /// A block holding `stmts` in order.
    pub fn block_of(stmts: impl IntoIterator<Item = Entity>) -> Self {
        let mut block = Compound::block();
        for stmt in stmts {
            block.add(stmt);
        }
        block
    }
}
