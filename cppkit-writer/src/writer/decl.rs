//! Variables, types, typedefs and the smaller declarations.

use cppkit_ast::{
    AccessType, Attribs, Blob, DocComment, Entity, EntityKind, Enum, EnumItem, ForwardClassDecl,
    HasAttributeSpecifiers, Initializer, MacroCall, NamespaceAlias, TemplateParams, TypeModifier,
    TypedefList, TypedefName, UsingDecl, UsingNamespace, UsingTarget, Var, VarDecl, VarList,
    VarType,
};

use super::{EmitContext, SignatureStyle, Writer};
use crate::{Error, Result, builder::Indentation};

/// Storage and cv qualifiers of a type, in emission order.
const TYPE_QUALIFIERS: [(Attribs, &str); 9] = [
    (Attribs::STATIC, "static "),
    (Attribs::EXTERN_C, "extern \"C\" "),
    (Attribs::EXTERN, "extern "),
    (Attribs::THREAD_LOCAL, "thread_local "),
    (Attribs::MUTABLE, "mutable "),
    (Attribs::INLINE, "inline "),
    (Attribs::CONST_EXPR, "constexpr "),
    (Attribs::CONST, "const "),
    (Attribs::VOLATILE, "volatile "),
];

/// Pointer and reference suffix: `*`, `* const*`, `&&`.
pub(crate) fn modifier_text(modifier: &TypeModifier) -> String {
    let mut text = String::new();
    for level in 0..modifier.ptr_levels {
        text.push('*');
        if modifier.is_const_at(level) {
            text.push_str(" const");
        }
    }
    text.push_str(modifier.ref_kind.as_str());
    text
}

impl Writer {
    /// `template <typename T, int N = 3>` on its own line.
    pub fn emit_template_spec(
        &self,
        params: &TemplateParams,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation).push_str("template <");
        for (i, param) in params.0.iter().enumerate() {
            if i > 0 {
                ctx.out.push_str(", ");
            }
            match &param.param_type {
                Some(ty) => self.emit_var_type(ty, ctx, indentation)?,
                None => {
                    ctx.out.push_str("typename");
                }
            }
            if param.pack {
                ctx.out.push_str("...");
            }
            if !param.name.is_empty() {
                ctx.out.push_char(' ').push_str(&param.name);
            }
            if let Some(default) = &param.default {
                ctx.out.push_str(" = ");
                self.emit_expr(default, ctx)?;
            }
        }
        ctx.out.push_str(">").newline();
        Ok(())
    }

    pub fn emit_var(&self, var: &Var, ctx: &mut EmitContext, indentation: Indentation) -> Result<()> {
        if let Some(params) = &var.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out.push_indent(indentation);
        self.emit_var_inline(var, ctx, indentation)?;
        ctx.out.push_str(";").newline();
        Ok(())
    }

    /// A variable without indentation or terminator, as used for parameters,
    /// conditions and loop headers.
    pub fn emit_var_inline(
        &self,
        var: &Var,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        self.emit_attribute_specifiers(var, ctx)?;
        self.emit_type_qualifiers(var.var_type.attribs, ctx);
        if let Some(apidecor) = &var.apidecor {
            ctx.out.push_str(apidecor).push_char(' ');
        }
        self.emit_type_core(&var.var_type, ctx, indentation)?;
        if !var.decl.name.is_empty() {
            ctx.out.push_char(' ');
        }
        self.emit_var_decl(&var.decl, ctx)
    }

    /// Qualifiers, base type (or inline definition) and pointer/reference
    /// decoration.
    pub fn emit_var_type(
        &self,
        var_type: &VarType,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        self.emit_type_qualifiers(var_type.attribs, ctx);
        self.emit_type_core(var_type, ctx, indentation)
    }

    fn emit_type_qualifiers(&self, attribs: Attribs, ctx: &mut EmitContext) {
        for (flag, text) in TYPE_QUALIFIERS {
            if attribs.contains(flag) {
                ctx.out.push_str(text);
            }
        }
    }

    fn emit_type_core(
        &self,
        var_type: &VarType,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        match var_type.definition.as_deref() {
            Some(Entity::Compound(compound)) => {
                self.emit_compound_definition(compound, ctx, indentation)?
            }
            Some(Entity::Enum(e)) => self.emit_enum_definition(e, ctx, indentation)?,
            Some(_) => {
                return Err(Error::malformed(
                    EntityKind::Var,
                    "inline type definition must be an enum or compound",
                ));
            }
            None if var_type.base_type.is_empty() => {
                return Err(Error::malformed(EntityKind::Var, "variable type is empty"));
            }
            None => {
                ctx.out.push_str(&var_type.base_type);
            }
        }
        ctx.out.push_str(&modifier_text(&var_type.modifier));
        if var_type.param_pack {
            ctx.out.push_str("...");
        }
        Ok(())
    }

    /// Declarator: name, array dimensions, bit field and initializer.
    pub fn emit_var_decl(&self, decl: &VarDecl, ctx: &mut EmitContext) -> Result<()> {
        ctx.out.push_str(&decl.name);
        for dim in &decl.array_dims {
            ctx.out.push_char('[');
            if let Some(size) = dim {
                self.emit_expr(size, ctx)?;
            }
            ctx.out.push_char(']');
        }
        if let Some(width) = &decl.bit_field {
            ctx.out.push_str(" : ");
            self.emit_expr(width, ctx)?;
        }
        match &decl.init {
            Some(Initializer::Assign(value)) => {
                ctx.out.push_str(" = ");
                self.emit_expr(value, ctx)?;
            }
            Some(Initializer::Brace(args)) => {
                ctx.out.push_char('{');
                self.emit_expr_list(args, ctx)?;
                ctx.out.push_char('}');
            }
            Some(Initializer::Paren(args)) => {
                ctx.out.push_char('(');
                self.emit_expr_list(args, ctx)?;
                ctx.out.push_char(')');
            }
            None => {}
        }
        Ok(())
    }

    pub fn emit_var_list(
        &self,
        list: &VarList,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation);
        self.emit_var_list_inline(list, ctx, indentation)?;
        ctx.out.push_str(";").newline();
        Ok(())
    }

    pub(crate) fn emit_var_list_inline(
        &self,
        list: &VarList,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        self.emit_var_inline(&list.first, ctx, indentation)?;
        for item in &list.rest {
            ctx.out.push_str(", ");
            let modifier = modifier_text(&item.modifier);
            ctx.out.push_str(&modifier);
            if modifier.ends_with(|c: char| c.is_ascii_alphabetic()) {
                ctx.out.push_char(' ');
            }
            self.emit_var_decl(&item.decl, ctx)?;
        }
        Ok(())
    }

    pub fn emit_typedef(
        &self,
        typedef: &TypedefName,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        if typedef.var.name().is_empty() {
            return Err(Error::malformed(EntityKind::TypedefName, "typedef name is empty"));
        }
        ctx.out.push_indent(indentation).push_str("typedef ");
        self.emit_var_inline(&typedef.var, ctx, indentation)?;
        ctx.out.push_str(";").newline();
        Ok(())
    }

    pub fn emit_typedef_list(
        &self,
        list: &TypedefList,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_indent(indentation).push_str("typedef ");
        self.emit_var_list_inline(&list.var_list, ctx, indentation)?;
        ctx.out.push_str(";").newline();
        Ok(())
    }

    pub fn emit_using_decl(
        &self,
        using: &UsingDecl,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        if using.name.is_empty() {
            return Err(Error::malformed(EntityKind::UsingDecl, "using name is empty"));
        }
        if let Some(params) = &using.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out
            .push_indent(indentation)
            .push_str("using ")
            .push_str(&using.name);
        match &using.target {
            Some(UsingTarget::Type(ty)) => {
                ctx.out.push_str(" = ");
                self.emit_var_type(ty, ctx, indentation)?;
            }
            Some(UsingTarget::FunctionPointer(fp)) => {
                ctx.out.push_str(" = ");
                let style = SignatureStyle {
                    is_func_ptr: true,
                    skip_name: true,
                    ..SignatureStyle::default()
                };
                self.emit_func_ptr_signature(fp, ctx, indentation, style)?;
            }
            Some(UsingTarget::Compound(compound)) => {
                ctx.out.push_str(" = ");
                self.emit_compound_definition(compound, ctx, indentation)?;
            }
            None => {}
        }
        ctx.out.push_str(";").newline();
        Ok(())
    }

    pub fn emit_fwd_decl(
        &self,
        fwd: &ForwardClassDecl,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        if fwd.name.is_empty() {
            return Err(Error::malformed(
                EntityKind::ForwardClassDecl,
                "forward declaration name is empty",
            ));
        }
        let keyword = match fwd.kind.keyword() {
            Some(keyword) if fwd.kind.is_class_like() => keyword,
            _ => {
                return Err(Error::malformed(
                    EntityKind::ForwardClassDecl,
                    "only classes, structs and unions can be forward declared",
                ));
            }
        };
        if let Some(params) = &fwd.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out.push_indent(indentation);
        if fwd.friend {
            ctx.out.push_str("friend ");
        }
        ctx.out.push_str(keyword).push_char(' ');
        if let Some(apidecor) = &fwd.apidecor {
            ctx.out.push_str(apidecor).push_char(' ');
        }
        ctx.out.push_str(&fwd.name).push_str(";").newline();
        Ok(())
    }

    pub fn emit_macro_call(
        &self,
        call: &MacroCall,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_line(indentation, &call.text);
        Ok(())
    }

    /// `public:` one level out from the members it introduces.
    pub fn emit_access_specifier(
        &self,
        access: AccessType,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out
            .push_indent(indentation.outer())
            .push_str(access.as_str())
            .push_char(':')
            .newline();
        Ok(())
    }

    /// Comments keep their original leading whitespace, so no indentation
    /// is added.
    pub fn emit_doc_comment(
        &self,
        doc: &DocComment,
        ctx: &mut EmitContext,
        _indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_str(&doc.text).newline();
        Ok(())
    }

    /// Raw text. With `format_line_starts` every line is stripped of its
    /// leading whitespace and re-indented at `indentation`.
    pub fn emit_blob(
        &self,
        blob: &Blob,
        ctx: &mut EmitContext,
        format_line_starts: bool,
        indentation: Indentation,
    ) -> Result<()> {
        if format_line_starts {
            for line in blob.text.lines() {
                let line = line.trim_start();
                if line.is_empty() {
                    ctx.out.newline();
                } else {
                    ctx.out.push_line(indentation, line);
                }
            }
            return Ok(());
        }
        ctx.out.push_str(&blob.text);
        if !blob.text.ends_with('\n') {
            ctx.out.newline();
        }
        Ok(())
    }

    pub fn emit_namespace_alias(
        &self,
        alias: &NamespaceAlias,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_line(
            indentation,
            &format!("namespace {} = {};", alias.alias, alias.target),
        );
        Ok(())
    }

    pub fn emit_using_namespace(
        &self,
        using: &UsingNamespace,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out
            .push_line(indentation, &format!("using namespace {};", using.name));
        Ok(())
    }

    pub fn emit_enum(&self, e: &Enum, ctx: &mut EmitContext, indentation: Indentation) -> Result<()> {
        ctx.out.push_indent(indentation);
        self.emit_enum_definition(e, ctx, indentation)?;
        ctx.out.push_str(";").newline();
        Ok(())
    }

    /// Enum head and body without indentation or terminator.
    pub(crate) fn emit_enum_definition(
        &self,
        e: &Enum,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        ctx.out.push_str("enum");
        if e.scoped {
            ctx.out.push_str(" class");
        }
        self.emit_attribute_specifiers_after_keyword(e, ctx)?;
        if !e.name.is_empty() {
            ctx.out.push_char(' ').push_str(&e.name);
        }
        if let Some(underlying) = &e.underlying {
            ctx.out.push_str(" : ").push_str(underlying);
        }
        let Some(items) = &e.items else {
            return Ok(());
        };
        ctx.out.newline().push_line(indentation, "{");
        let inner = indentation.inner();
        for (i, item) in items.iter().enumerate() {
            match item {
                EnumItem::Constant { name, value } => {
                    ctx.out.push_indent(inner).push_str(name);
                    if let Some(value) = value {
                        ctx.out.push_str(" = ");
                        self.emit_expr(value, ctx)?;
                    }
                    if items[i + 1..].iter().any(EnumItem::is_constant) {
                        ctx.out.push_char(',');
                    }
                    ctx.out.newline();
                }
                EnumItem::Entity(entity) => self.emit_entity(entity, ctx, inner)?,
            }
        }
        ctx.out.push_indent(indentation).push_char('}');
        Ok(())
    }

    /// ` [[a, b]]` after a class or enum keyword.
    pub(crate) fn emit_attribute_specifiers_after_keyword(
        &self,
        decl: &impl HasAttributeSpecifiers,
        ctx: &mut EmitContext,
    ) -> Result<()> {
        let seq = decl.attribute_specifiers();
        if seq.is_empty() {
            return Ok(());
        }
        ctx.out.push_str(" [[");
        self.emit_expr_list(seq, ctx)?;
        ctx.out.push_str("]]");
        Ok(())
    }
}
