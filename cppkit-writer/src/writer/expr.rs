//! Expressions.

use cppkit_ast::{
    AtomicExpr, BinaryExpr, BinaryOp, CastExpr, CastKind, Expr, FunctionCallExpr, LambdaExpr,
    UnaryExpr, UnaryOp,
};

use super::{EmitContext, Writer};
use crate::{ParamStyle, Result};

impl Writer {
    pub fn emit_expr(&self, expr: &Expr, ctx: &mut EmitContext) -> Result<()> {
        match expr {
            Expr::Atomic(atomic) => self.emit_atomic_expr(atomic, ctx),
            Expr::Unary(unary) => self.emit_unary_expr(unary, ctx),
            Expr::Binary(binary) => self.emit_binary_expr(binary, ctx),
            Expr::Ternary(ternary) => {
                self.emit_expr(&ternary.condition, ctx)?;
                ctx.out.push_str(" ? ");
                self.emit_expr(&ternary.then, ctx)?;
                ctx.out.push_str(" : ");
                self.emit_expr(&ternary.otherwise, ctx)
            }
            Expr::FunctionCall(call) => self.emit_function_call(call, ctx),
            Expr::UniformInitializer(init) => {
                ctx.out.push_str(&init.name).push_char('{');
                self.emit_expr_list(&init.args, ctx)?;
                ctx.out.push_char('}');
                Ok(())
            }
            Expr::InitializerList(items) => {
                ctx.out.push_char('{');
                self.emit_expr_list(items, ctx)?;
                ctx.out.push_char('}');
                Ok(())
            }
            Expr::Cast(cast) => self.emit_cast(cast, ctx),
        }
    }

    /// Literals and names are written in their stored spelling.
    pub fn emit_atomic_expr(&self, atomic: &AtomicExpr, ctx: &mut EmitContext) -> Result<()> {
        match atomic {
            AtomicExpr::StringLiteral(text)
            | AtomicExpr::CharLiteral(text)
            | AtomicExpr::NumberLiteral(text)
            | AtomicExpr::Name(text) => {
                ctx.out.push_str(text);
                Ok(())
            }
            AtomicExpr::VarType(ty) => {
                let indentation = ctx.expr_indent;
                self.emit_var_type(ty, ctx, indentation)
            }
            AtomicExpr::Lambda(lambda) => self.emit_lambda(lambda, ctx),
        }
    }

    /// `[captures](params) mutable -> T` and a block body. The body is
    /// indented relative to the statement holding the lambda.
    pub fn emit_lambda(&self, lambda: &LambdaExpr, ctx: &mut EmitContext) -> Result<()> {
        let indentation = ctx.expr_indent;
        ctx.out
            .push_char('[')
            .push_str(&lambda.captures.join(", "))
            .push_char(']');
        self.emit_param_list(&lambda.params, ctx, indentation, ParamStyle::FULL)?;
        if lambda.is_mutable {
            ctx.out.push_str(" mutable");
        }
        if let Some(ret) = &lambda.return_type {
            ctx.out.push_str(" -> ");
            self.emit_var_type(ret, ctx, indentation)?;
        }
        if lambda.body.is_empty() {
            ctx.out.push_str(" {}");
            return Ok(());
        }
        ctx.out.push_str(" {").newline();
        for stmt in lambda.body.members() {
            self.emit_entity(stmt, ctx, indentation.inner())?;
        }
        ctx.out.push_indent(indentation).push_char('}');
        Ok(())
    }

    pub fn emit_unary_expr(&self, unary: &UnaryExpr, ctx: &mut EmitContext) -> Result<()> {
        let (prefix, suffix) = match unary.op {
            UnaryOp::Minus => ("-", ""),
            UnaryOp::Plus => ("+", ""),
            UnaryOp::Not => ("!", ""),
            UnaryOp::Complement => ("~", ""),
            UnaryOp::Deref => ("*", ""),
            UnaryOp::AddressOf => ("&", ""),
            UnaryOp::PreIncrement => ("++", ""),
            UnaryOp::PreDecrement => ("--", ""),
            UnaryOp::PostIncrement => ("", "++"),
            UnaryOp::PostDecrement => ("", "--"),
            UnaryOp::Sizeof => ("sizeof(", ")"),
            UnaryOp::Alignof => ("alignof(", ")"),
            UnaryOp::New => ("new ", ""),
            UnaryOp::Delete => ("delete ", ""),
            UnaryOp::DeleteArray => ("delete[] ", ""),
            UnaryOp::Parenthesize => ("(", ")"),
            UnaryOp::PackExpansion => ("", "..."),
        };
        ctx.out.push_str(prefix);
        self.emit_expr(&unary.term, ctx)?;
        ctx.out.push_str(suffix);
        Ok(())
    }

    pub fn emit_binary_expr(&self, binary: &BinaryExpr, ctx: &mut EmitContext) -> Result<()> {
        self.emit_expr(&binary.lhs, ctx)?;
        match binary.op {
            BinaryOp::Subscript => {
                ctx.out.push_char('[');
                self.emit_expr(&binary.rhs, ctx)?;
                ctx.out.push_char(']');
                return Ok(());
            }
            BinaryOp::Comma => {
                ctx.out.push_str(", ");
            }
            op if op.is_tight() => {
                ctx.out.push_str(op.as_str());
            }
            op => {
                ctx.out.push_char(' ').push_str(op.as_str()).push_char(' ');
            }
        }
        self.emit_expr(&binary.rhs, ctx)
    }

    /// `f<T>(a, b)`
    pub fn emit_function_call(&self, call: &FunctionCallExpr, ctx: &mut EmitContext) -> Result<()> {
        self.emit_expr(&call.function, ctx)?;
        if !call.template_args.is_empty() {
            ctx.out.push_char('<');
            self.emit_expr_list(&call.template_args, ctx)?;
            ctx.out.push_char('>');
        }
        ctx.out.push_char('(');
        self.emit_expr_list(&call.args, ctx)?;
        ctx.out.push_char(')');
        Ok(())
    }

    pub fn emit_cast(&self, cast: &CastExpr, ctx: &mut EmitContext) -> Result<()> {
        let indentation = ctx.expr_indent;
        match cast.kind {
            CastKind::CStyle => {
                ctx.out.push_char('(');
                self.emit_var_type(&cast.target, ctx, indentation)?;
                ctx.out.push_str(") ");
                self.emit_expr(&cast.expr, ctx)
            }
            CastKind::FunctionStyle => {
                self.emit_var_type(&cast.target, ctx, indentation)?;
                ctx.out.push_char('(');
                self.emit_expr(&cast.expr, ctx)?;
                ctx.out.push_char(')');
                Ok(())
            }
            named => {
                ctx.out
                    .push_str(named.keyword().unwrap_or_default())
                    .push_char('<');
                self.emit_var_type(&cast.target, ctx, indentation)?;
                ctx.out.push_str(">(");
                self.emit_expr(&cast.expr, ctx)?;
                ctx.out.push_char(')');
                Ok(())
            }
        }
    }
}
