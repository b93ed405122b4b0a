//! Control-flow statements.

use cppkit_ast::{
    CompoundKind, Condition, DoWhileBlock, Entity, EntityKind, Expr, ForBlock, ForInit, IfBlock,
    RangeForBlock, SwitchBlock, WhileBlock,
};

use super::{EmitContext, Writer};
use crate::{Error, Result, builder::Indentation};

impl Writer {
    pub fn emit_if_block(
        &self,
        block: &IfBlock,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation);
        self.emit_if_chain(block, ctx, indentation)
    }

    /// `if (...)` onwards; the caller has written the indentation (and
    /// `else ` for a chained branch).
    fn emit_if_chain(
        &self,
        block: &IfBlock,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_str("if (");
        self.emit_condition(&block.condition, ctx, indentation)?;
        ctx.out.push_char(')').newline();
        self.emit_stmt_body(&block.body, ctx, indentation)?;
        match block.else_part.as_deref() {
            Some(Entity::IfBlock(chained)) => {
                ctx.out.push_indent(indentation).push_str("else ");
                self.emit_if_chain(chained, ctx, indentation)
            }
            Some(other) => {
                ctx.out.push_line(indentation, "else");
                self.emit_stmt_body(other, ctx, indentation)
            }
            None => Ok(()),
        }
    }

    pub fn emit_while_block(
        &self,
        block: &WhileBlock,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation).push_str("while (");
        self.emit_condition(&block.condition, ctx, indentation)?;
        ctx.out.push_char(')').newline();
        self.emit_stmt_body(&block.body, ctx, indentation)
    }

    pub fn emit_do_block(
        &self,
        block: &DoWhileBlock,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_line(indentation, "do");
        self.emit_stmt_body(&block.body, ctx, indentation)?;
        ctx.out.push_indent(indentation).push_str("while (");
        self.emit_expr(&block.condition, ctx)?;
        ctx.out.push_str(");").newline();
        Ok(())
    }

    pub fn emit_for_block(
        &self,
        block: &ForBlock,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation).push_str("for (");
        match &block.start {
            Some(ForInit::Expr(expr)) => self.emit_expr(expr, ctx)?,
            Some(ForInit::Var(var)) => self.emit_var_inline(var, ctx, indentation)?,
            Some(ForInit::VarList(list)) => self.emit_var_list_inline(list, ctx, indentation)?,
            None => {}
        }
        ctx.out.push_char(';');
        if let Some(condition) = &block.condition {
            ctx.out.push_char(' ');
            self.emit_expr(condition, ctx)?;
        }
        ctx.out.push_char(';');
        if let Some(step) = &block.step {
            ctx.out.push_char(' ');
            self.emit_expr(step, ctx)?;
        }
        ctx.out.push_char(')').newline();
        self.emit_stmt_body(&block.body, ctx, indentation)
    }

    pub fn emit_range_for_block(
        &self,
        block: &RangeForBlock,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation).push_str("for (");
        self.emit_var_inline(&block.var, ctx, indentation)?;
        ctx.out.push_str(" : ");
        self.emit_expr(&block.range, ctx)?;
        ctx.out.push_char(')').newline();
        self.emit_stmt_body(&block.body, ctx, indentation)
    }

    /// Case labels align with `switch`; their statements go one level in.
    pub fn emit_switch_block(
        &self,
        block: &SwitchBlock,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation).push_str("switch (");
        self.emit_condition(&block.condition, ctx, indentation)?;
        ctx.out.push_char(')').newline().push_line(indentation, "{");
        for case in &block.cases {
            ctx.out.push_indent(indentation);
            match &case.label {
                Some(label) => {
                    ctx.out.push_str("case ");
                    self.emit_expr(label, ctx)?;
                    ctx.out.push_char(':').newline();
                }
                None => {
                    ctx.out.push_str("default:").newline();
                }
            }
            for stmt in &case.body {
                self.emit_entity(stmt, ctx, indentation.inner())?;
            }
        }
        ctx.out.push_line(indentation, "}");
        Ok(())
    }

    /// `return x;`, `throw;`, `break;`
    pub(crate) fn emit_keyword_stmt(
        &self,
        keyword: &str,
        expr: Option<&Expr>,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation).push_str(keyword);
        if let Some(expr) = expr {
            ctx.out.push_char(' ');
            self.emit_expr(expr, ctx)?;
        }
        ctx.out.push_char(';').newline();
        Ok(())
    }

    pub fn emit_expr_stmt(
        &self,
        expr: &Expr,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation);
        self.emit_expr(expr, ctx)?;
        ctx.out.push_char(';').newline();
        Ok(())
    }

    pub fn emit_goto(&self, label: &str, ctx: &mut EmitContext, indentation: Indentation) -> Result<()> {
        if label.is_empty() {
            return Err(Error::malformed(EntityKind::Goto, "goto target is empty"));
        }
        ctx.out.push_line(indentation, &format!("goto {};", label));
        Ok(())
    }

    pub fn emit_label(&self, label: &str, ctx: &mut EmitContext, indentation: Indentation) -> Result<()> {
        if label.is_empty() {
            return Err(Error::malformed(EntityKind::Label, "label name is empty"));
        }
        ctx.out.push_line(indentation, &format!("{}:", label));
        Ok(())
    }

    fn emit_condition(
        &self,
        condition: &Condition,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        match condition {
            Condition::Expr(expr) => self.emit_expr(expr, ctx),
            Condition::Var(var) => self.emit_var_inline(var, ctx, indentation),
        }
    }

    /// A braced body stays at the statement's level, a single statement
    /// goes one level in.
    fn emit_stmt_body(
        &self,
        body: &Entity,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        match body {
            Entity::Compound(block) if block.kind == CompoundKind::Block => {
                self.emit_block_body(block, ctx, indentation)
            }
            other => self.emit_entity(other, ctx, indentation.inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use cppkit_ast::{BinaryOp, Compound, SwitchCase, UnaryOp, Var, VarType};

    use super::*;

    fn render(entity: impl Into<Entity>) -> String {
        Writer::default().emit(&entity.into()).unwrap()
    }

    fn call(name: &str) -> Entity {
        Entity::Expr(Expr::call(Expr::name(name), []))
    }

    #[test]
    fn test_if_else_chain() {
        let chain = IfBlock::new(Expr::name("a"), Compound::block_of([call("f")])).otherwise(
            IfBlock::new(Expr::name("b"), call("g")).otherwise(Compound::block_of([call("h")])),
        );
        assert_eq!(
            render(chain),
            "if (a)\n{\n  f();\n}\nelse if (b)\n  g();\nelse\n{\n  h();\n}\n"
        );
    }

    #[test]
    fn test_if_with_declaration() {
        let var = Var::new(VarType::new("auto").pointer(), "p").assign(Expr::call(Expr::name("find"), []));
        let block = IfBlock::new(var, Entity::Return(Some(Expr::name("p"))));
        assert_eq!(render(block), "if (auto* p = find())\n  return p;\n");
    }

    #[test]
    fn test_loops() {
        let counted = ForBlock::new(Compound::block())
            .start(ForInit::Var(Box::new(
                Var::new(VarType::new("int"), "i").assign(Expr::number(0)),
            )))
            .condition(Expr::binary(Expr::name("i"), BinaryOp::Lt, Expr::name("n")))
            .step(Expr::unary(UnaryOp::PreIncrement, Expr::name("i")));
        assert_eq!(render(counted), "for (int i = 0; i < n; ++i)\n{\n}\n");

        assert_eq!(render(ForBlock::new(Entity::Break)), "for (;;)\n  break;\n");

        let ranged = RangeForBlock::new(
            Var::new(VarType::new("auto").const_().reference(), "item"),
            Expr::name("items"),
            Entity::Continue,
        );
        assert_eq!(render(ranged), "for (const auto& item : items)\n  continue;\n");

        let do_while = DoWhileBlock::new(Compound::block_of([call("poll")]), Expr::name("busy"));
        assert_eq!(render(do_while), "do\n{\n  poll();\n}\nwhile (busy);\n");
    }

    #[test]
    fn test_switch() {
        let switch = SwitchBlock::new(Expr::name("kind"))
            .case(
                SwitchCase::case(Expr::name("Kind::A"))
                    .stmt(call("a"))
                    .stmt(Entity::Break),
            )
            .case(SwitchCase::default_case().stmt(Entity::Throw(None)));
        assert_eq!(
            render(switch),
            "switch (kind)\n{\ncase Kind::A:\n  a();\n  break;\ndefault:\n  throw;\n}\n"
        );
    }

    #[test]
    fn test_jumps() {
        let block = Compound::block_of([
            Entity::Label("retry".into()),
            Entity::Goto("retry".into()),
        ]);
        assert_eq!(render(block), "{\n  retry:\n  goto retry;\n}\n");
        assert!(Writer::default().emit(&Entity::Goto(String::new())).is_err());
    }

    #[test]
    fn test_empty_label_is_malformed() {
        let err = Writer::default()
            .emit(&Entity::Label(String::new()))
            .unwrap_err();
        assert!(matches!(
            *err,
            Error::MalformedTree {
                node: EntityKind::Label,
                ..
            }
        ));
    }
}
