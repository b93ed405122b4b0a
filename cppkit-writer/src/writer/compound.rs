//! Files, namespaces, classes and blocks.

use cppkit_ast::{Compound, CompoundKind, Entity, EntityKind};
use tracing::trace;

use super::{ClassScope, EmitContext, Writer, function::needs_out_of_line_definition};
use crate::{EmitMode, Error, Result, builder::Indentation};

impl Writer {
    pub fn emit_compound(
        &self,
        compound: &Compound,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        match compound.kind {
            CompoundKind::File => {
                let enclosing = ctx.in_file;
                ctx.in_file = true;
                let result = self.emit_members(compound, ctx, indentation);
                ctx.in_file = enclosing;
                result
            }
            CompoundKind::Block => self.emit_block_body(compound, ctx, indentation),
            CompoundKind::Namespace | CompoundKind::ExternC => {
                ctx.out.push_indent(indentation);
                ctx.out.push_str(compound.kind.keyword().unwrap_or_default());
                self.emit_attribute_specifiers_after_keyword(compound, ctx)?;
                if !compound.name.is_empty() {
                    ctx.out.push_char(' ').push_str(&compound.name);
                }
                ctx.out.newline().push_line(indentation, "{");
                self.emit_members(compound, ctx, indentation)?;
                ctx.out.push_line(indentation, "}");
                Ok(())
            }
            CompoundKind::Class | CompoundKind::Struct | CompoundKind::Union => {
                if self.mode() == EmitMode::Source && !ctx.in_file {
                    return self.emit_out_of_line_definitions(compound, ctx, indentation);
                }
                if let Some(params) = &compound.template_params {
                    self.emit_template_spec(params, ctx, indentation)?;
                }
                ctx.out.push_indent(indentation);
                self.emit_compound_definition(compound, ctx, indentation)?;
                ctx.out.push_str(";").newline();
                Ok(())
            }
        }
    }

    /// Head and braced body of a class-like compound, without indentation
    /// or terminator.
    pub(crate) fn emit_compound_definition(
        &self,
        compound: &Compound,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        let Some(keyword) = compound.kind.keyword().filter(|_| compound.is_class_like()) else {
            return Err(Error::malformed(
                EntityKind::Compound,
                "only classes, structs and unions can be defined inline",
            ));
        };
        ctx.out.push_str(keyword);
        self.emit_attribute_specifiers_after_keyword(compound, ctx)?;
        if let Some(apidecor) = &compound.apidecor {
            ctx.out.push_char(' ').push_str(apidecor);
        }
        if !compound.name.is_empty() {
            ctx.out.push_char(' ').push_str(&compound.name);
        }
        if compound.is_final {
            ctx.out.push_str(" final");
        }
        for (i, base) in compound.bases.iter().enumerate() {
            ctx.out.push_str(if i == 0 { " : " } else { ", " });
            if let Some(access) = base.access {
                ctx.out.push_str(access.as_str()).push_char(' ');
            }
            if base.is_virtual {
                ctx.out.push_str("virtual ");
            }
            ctx.out.push_str(&base.name);
        }
        ctx.out.newline().push_line(indentation, "{");
        self.emit_members(compound, ctx, indentation.inner())?;
        ctx.out.push_indent(indentation).push_char('}');
        Ok(())
    }

    /// `{`, the members one level in, `}`.
    pub(crate) fn emit_block_body(
        &self,
        block: &Compound,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_line(indentation, "{");
        self.emit_members(block, ctx, indentation.inner())?;
        ctx.out.push_line(indentation, "}");
        Ok(())
    }

    fn emit_members(
        &self,
        compound: &Compound,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        for member in compound.members() {
            self.emit_entity(member, ctx, indentation)?;
        }
        Ok(())
    }

    /// Source rendering of a class that is not defined in this emission:
    /// member function bodies become qualified definitions, everything
    /// else except preprocessor directives is dropped.
    fn emit_out_of_line_definitions(
        &self,
        compound: &Compound,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        if compound.name.is_empty() {
            trace!(kind = %compound.kind, "skipping anonymous class in source mode");
            return Ok(());
        }
        ctx.scopes.push(ClassScope {
            name: compound.name.clone(),
            template_params: compound.template_params.clone(),
        });
        let result = self.emit_member_definitions(compound, ctx, indentation);
        ctx.scopes.pop();
        result
    }

    fn emit_member_definitions(
        &self,
        compound: &Compound,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        for member in compound.members() {
            match member {
                Entity::Function(func) if needs_out_of_line_definition(func, func.has_body()) => {
                    self.emit_function_definition(func, ctx, indentation)?
                }
                Entity::Constructor(ctor)
                    if needs_out_of_line_definition(ctor, ctor.body.is_some()) =>
                {
                    self.emit_constructor_definition(ctor, ctx, indentation)?
                }
                Entity::Destructor(dtor)
                    if needs_out_of_line_definition(dtor, dtor.body.is_some()) =>
                {
                    self.emit_destructor_definition(dtor, ctx, indentation)?
                }
                Entity::TypeConverter(conv)
                    if needs_out_of_line_definition(conv, conv.body.is_some()) =>
                {
                    self.emit_type_converter_definition(conv, ctx, indentation)?
                }
                Entity::Compound(nested) if nested.is_class_like() => {
                    self.emit_out_of_line_definitions(nested, ctx, indentation)?
                }
                Entity::Preprocessor(pp) => self.emit_preprocessor(pp, ctx)?,
                other => {
                    trace!(kind = %other.kind(), "dropping member declaration in source mode");
                }
            }
        }
        Ok(())
    }

    /// Template prefix lines of the enclosing classes; returns the
    /// qualifier `Outer<T>::Inner::`.
    pub(crate) fn emit_scope_templates(
        &self,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<String> {
        let scopes = ctx.scopes.clone();
        let mut qualifier = String::new();
        for scope in &scopes {
            qualifier.push_str(&scope.name);
            if let Some(params) = scope
                .template_params
                .as_ref()
                .filter(|params| !params.is_specialization())
            {
                self.emit_template_spec(params, ctx, indentation)?;
                qualifier.push_str(&params.arguments());
            }
            qualifier.push_str("::");
        }
        Ok(qualifier)
    }
}
