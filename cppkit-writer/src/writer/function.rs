//! Functions, function pointers, constructors, destructors and type
//! converters.
//!
//! Functions, function pointers and constructors share one signature routine
//! so that all three stay visually consistent.

use cppkit_ast::{
    Attribs, Compound, Constructor, Destructor, EntityKind, Function, FunctionCommon,
    FunctionPointer, Initializer, Param, TypeConverter, VarType, function_info,
};
use tracing::trace;

use super::{EmitContext, Writer};
use crate::{EmitMode, Error, Result, builder::Indentation};

/// How a parameter list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamStyle {
    /// Emit parameter names; `false` yields a type-only signature.
    pub names: bool,
    /// Emit default arguments.
    pub defaults: bool,
}

impl ParamStyle {
    /// Names and default arguments, as in a declaration.
    pub const FULL: Self = Self {
        names: true,
        defaults: true,
    };

    /// Types only: `(int, const char*)`.
    pub const TYPES_ONLY: Self = Self {
        names: false,
        defaults: false,
    };

    /// Names without default arguments, as in an out-of-line definition.
    pub const DEFINITION: Self = Self {
        names: true,
        defaults: false,
    };
}

impl Default for ParamStyle {
    fn default() -> Self {
        Self::FULL
    }
}

/// Options of the shared signature routine.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SignatureStyle<'a> {
    pub is_func_ptr: bool,
    pub skip_name: bool,
    pub skip_param_names: bool,
    /// Terminate the signature with `;` and a newline.
    pub emit_newline: bool,
    /// Scope prefix of an out-of-line definition, e.g. `Foo<T>::`.
    pub qualifier: Option<&'a str>,
}

#[derive(Clone, Copy)]
enum Callable<'a> {
    Function(&'a Function),
    FunctionPointer(&'a FunctionPointer),
    Constructor(&'a Constructor),
}

impl Callable<'_> {
    fn attribs(&self) -> Attribs {
        match self {
            Callable::Function(f) => f.attribs,
            Callable::FunctionPointer(fp) => fp.attribs,
            Callable::Constructor(c) => c.attribs,
        }
    }

    fn params(&self) -> &[Param] {
        match self {
            Callable::Function(f) => &f.params,
            Callable::FunctionPointer(fp) => &fp.params,
            Callable::Constructor(c) => &c.params,
        }
    }
}

/// Specifiers written before the return type of an in-class declaration.
const DECL_SPECIFIERS: [(Attribs, &str); 8] = [
    (Attribs::FRIEND, "friend "),
    (Attribs::STATIC, "static "),
    (Attribs::EXTERN_C, "extern \"C\" "),
    (Attribs::EXTERN, "extern "),
    (Attribs::INLINE, "inline "),
    (Attribs::CONST_EXPR, "constexpr "),
    (Attribs::VIRTUAL, "virtual "),
    (Attribs::EXPLICIT, "explicit "),
];

impl Writer {
    pub fn emit_function(
        &self,
        func: &Function,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        self.check_attribs(EntityKind::Function, func.attribs)?;
        if func.name.is_empty() {
            return Err(Error::malformed(EntityKind::Function, "function name is empty"));
        }
        if let Some(params) = &func.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out.push_indent(indentation);
        self.emit_function_or_func_ptr_common(
            Callable::Function(func),
            ctx,
            indentation,
            SignatureStyle::default(),
        )?;
        let body = self.body_to_emit(EntityKind::Function, func.attribs, func.body.as_ref());
        self.finish_definition(body, ctx, indentation)
    }

    /// A function pointer declaration; anonymous typedefs produce nothing.
    pub fn emit_function_ptr(
        &self,
        fp: &FunctionPointer,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        self.check_attribs(EntityKind::FunctionPointer, fp.attribs)?;
        if fp.is_typedef() && fp.name.is_empty() {
            trace!("dropping anonymous function pointer typedef");
            return Ok(());
        }
        ctx.out.push_indent(indentation);
        let style = SignatureStyle {
            is_func_ptr: true,
            emit_newline: true,
            ..SignatureStyle::default()
        };
        self.emit_func_ptr_signature(fp, ctx, indentation, style)
    }

    pub(crate) fn emit_func_ptr_signature(
        &self,
        fp: &FunctionPointer,
        ctx: &mut EmitContext,
        indentation: Indentation,
        style: SignatureStyle<'_>,
    ) -> Result<()> {
        self.emit_function_or_func_ptr_common(
            Callable::FunctionPointer(fp),
            ctx,
            indentation,
            style,
        )
    }

    pub fn emit_constructor(
        &self,
        ctor: &Constructor,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        self.check_attribs(EntityKind::Constructor, ctor.attribs)?;
        if ctor.name.is_empty() {
            return Err(Error::malformed(
                EntityKind::Constructor,
                "constructor name is empty",
            ));
        }
        if let Some(params) = &ctor.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out.push_indent(indentation);
        self.emit_function_or_func_ptr_common(
            Callable::Constructor(ctor),
            ctx,
            indentation,
            SignatureStyle::default(),
        )?;
        let body = self.body_to_emit(EntityKind::Constructor, ctor.attribs, ctor.body.as_ref());
        if body.is_some() {
            self.emit_member_inits(ctor, ctx, indentation)?;
        }
        self.finish_definition(body, ctx, indentation)
    }

    pub fn emit_destructor(
        &self,
        dtor: &Destructor,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        self.check_attribs(EntityKind::Destructor, dtor.attribs)?;
        if dtor.name.is_empty() {
            return Err(Error::malformed(
                EntityKind::Destructor,
                "destructor name is empty",
            ));
        }
        ctx.out.push_indent(indentation);
        self.emit_attribute_specifiers(dtor, ctx)?;
        self.emit_specifiers(dtor.attribs, ctx);
        ctx.out.push_char('~').push_str(&dtor.name).push_str("()");
        self.emit_signature_suffix(dtor.attribs, ctx);
        self.emit_virt_suffix(dtor.attribs, ctx);
        let body = self.body_to_emit(EntityKind::Destructor, dtor.attribs, dtor.body.as_ref());
        self.finish_definition(body, ctx, indentation)
    }

    /// `operator T() const`
    pub fn emit_type_converter(
        &self,
        conv: &TypeConverter,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        self.check_attribs(EntityKind::TypeConverter, conv.attribs)?;
        if let Some(params) = &conv.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out.push_indent(indentation);
        self.emit_attribute_specifiers(conv, ctx)?;
        self.emit_specifiers(conv.attribs, ctx);
        self.emit_converter_head(conv, ctx, indentation)?;
        self.emit_signature_suffix(conv.attribs, ctx);
        self.emit_virt_suffix(conv.attribs, ctx);
        let body = self.body_to_emit(EntityKind::TypeConverter, conv.attribs, conv.body.as_ref());
        self.finish_definition(body, ctx, indentation)
    }

    /// `(int x, char y = 'a', ...)`
    pub fn emit_param_list(
        &self,
        params: &[Param],
        ctx: &mut EmitContext,
        indentation: Indentation,
        style: ParamStyle,
    ) -> Result<()> {
        ctx.out.push_char('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                ctx.out.push_str(", ");
            }
            match param {
                Param::Var(var) => {
                    self.emit_attribute_specifiers(var, ctx)?;
                    self.emit_var_type(&var.var_type, ctx, indentation)?;
                    if style.names && !var.decl.name.is_empty() {
                        ctx.out.push_char(' ').push_str(&var.decl.name);
                    }
                    if style.names {
                        for dim in &var.decl.array_dims {
                            ctx.out.push_char('[');
                            if let Some(size) = dim {
                                self.emit_expr(size, ctx)?;
                            }
                            ctx.out.push_char(']');
                        }
                    }
                    if let (true, Some(Initializer::Assign(value))) =
                        (style.defaults, &var.decl.init)
                    {
                        ctx.out.push_str(" = ");
                        self.emit_expr(value, ctx)?;
                    }
                }
                Param::FunctionPointer(fp) => {
                    let signature = SignatureStyle {
                        is_func_ptr: true,
                        skip_name: !style.names,
                        skip_param_names: !style.names,
                        ..SignatureStyle::default()
                    };
                    self.emit_func_ptr_signature(fp, ctx, indentation, signature)?;
                }
            }
        }
        ctx.out.push_char(')');
        Ok(())
    }

    /// Shared signature routine. Writes no leading indentation.
    fn emit_function_or_func_ptr_common(
        &self,
        callable: Callable<'_>,
        ctx: &mut EmitContext,
        indentation: Indentation,
        style: SignatureStyle<'_>,
    ) -> Result<()> {
        let attribs = callable.attribs();
        let out_of_line = style.qualifier.is_some();

        if style.is_func_ptr && attribs.contains(Attribs::TYPEDEF) {
            ctx.out.push_str("typedef ");
        }
        if !out_of_line {
            match callable {
                Callable::Function(f) => self.emit_attribute_specifiers(f, ctx)?,
                Callable::FunctionPointer(fp) => self.emit_attribute_specifiers(fp, ctx)?,
                Callable::Constructor(c) => self.emit_attribute_specifiers(c, ctx)?,
            }
            self.emit_specifiers(attribs, ctx);
        } else if attribs.contains(Attribs::CONST_EXPR) {
            ctx.out.push_str("constexpr ");
        }

        match callable {
            Callable::Function(func) => {
                if let (false, Some(apidecor)) = (out_of_line, &func.apidecor) {
                    ctx.out.push_str(apidecor).push_char(' ');
                }
                self.emit_return_type(&func.return_type, EntityKind::Function, ctx, indentation)?;
                ctx.out.push_char(' ');
                if !style.skip_name {
                    ctx.out.push_str(style.qualifier.unwrap_or_default());
                    ctx.out.push_str(&func.name);
                }
            }
            Callable::FunctionPointer(fp) => {
                self.emit_return_type(
                    &fp.return_type,
                    EntityKind::FunctionPointer,
                    ctx,
                    indentation,
                )?;
                ctx.out.push_str(" (");
                if let Some(owner) = &fp.owner {
                    ctx.out.push_str(owner).push_str("::");
                }
                ctx.out.push_char('*');
                if !style.skip_name {
                    ctx.out.push_str(&fp.name);
                }
                ctx.out.push_char(')');
            }
            Callable::Constructor(ctor) => {
                if !style.skip_name {
                    ctx.out.push_str(style.qualifier.unwrap_or_default());
                    ctx.out.push_str(&ctor.name);
                }
            }
        }

        let params = ParamStyle {
            names: !style.skip_param_names,
            defaults: !out_of_line,
        };
        self.emit_param_list(callable.params(), ctx, indentation, params)?;

        self.emit_signature_suffix(attribs, ctx);
        if let Callable::Function(Function {
            trailing_return: Some(trailing),
            ..
        }) = callable
        {
            ctx.out.push_str(" -> ");
            self.emit_var_type(trailing, ctx, indentation)?;
        }
        if !out_of_line {
            self.emit_virt_suffix(attribs, ctx);
        }
        if style.emit_newline {
            ctx.out.push_str(";").newline();
        }
        Ok(())
    }

    fn emit_return_type(
        &self,
        return_type: &VarType,
        node: EntityKind,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        if return_type.base_type.is_empty() && return_type.definition.is_none() {
            return Err(Error::malformed(node, "return type is empty"));
        }
        self.emit_var_type(return_type, ctx, indentation)
    }

    fn emit_specifiers(&self, attribs: Attribs, ctx: &mut EmitContext) {
        for (flag, text) in DECL_SPECIFIERS {
            if attribs.contains(flag) {
                ctx.out.push_str(text);
            }
        }
    }

    /// ` const` and ` noexcept`.
    fn emit_signature_suffix(&self, attribs: Attribs, ctx: &mut EmitContext) {
        if attribs.contains(Attribs::CONST) {
            ctx.out.push_str(" const");
        }
        if attribs.contains(Attribs::NO_EXCEPT) {
            ctx.out.push_str(" noexcept");
        }
    }

    /// `override`, `final` and the `= 0` family; declarations only.
    fn emit_virt_suffix(&self, attribs: Attribs, ctx: &mut EmitContext) {
        if attribs.contains(Attribs::OVERRIDE) {
            ctx.out.push_str(" override");
        }
        if attribs.contains(Attribs::FINAL) {
            ctx.out.push_str(" final");
        }
        if attribs.contains(Attribs::PURE_VIRTUAL) {
            ctx.out.push_str(" = 0");
        } else if attribs.contains(Attribs::DELETE) {
            ctx.out.push_str(" = delete");
        } else if attribs.contains(Attribs::DEFAULT) {
            ctx.out.push_str(" = default");
        }
    }

    fn emit_converter_head(
        &self,
        conv: &TypeConverter,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        let target = &conv.target;
        if target.base_type.is_empty() && target.definition.is_none() {
            return Err(Error::malformed(
                EntityKind::TypeConverter,
                "conversion target type is empty",
            ));
        }
        ctx.out.push_str("operator ");
        self.emit_var_type(target, ctx, indentation)?;
        ctx.out.push_str("()");
        Ok(())
    }

    /// `:  a(x), b{y}` on its own line below the signature.
    fn emit_member_inits(
        &self,
        ctor: &Constructor,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        if ctor.member_inits.is_empty() {
            return Ok(());
        }
        ctx.out.newline().push_indent(indentation.inner()).push_str(":  ");
        for (i, init) in ctor.member_inits.iter().enumerate() {
            if i > 0 {
                ctx.out.push_str(", ");
            }
            let (open, close) = if init.braced { ('{', '}') } else { ('(', ')') };
            ctx.out.push_str(&init.name).push_char(open);
            self.emit_expr_list(&init.args, ctx)?;
            ctx.out.push_char(close);
        }
        Ok(())
    }

    /// The body allowed by the emission mode.
    fn body_to_emit<'b>(
        &self,
        node: EntityKind,
        attribs: Attribs,
        body: Option<&'b Compound>,
    ) -> Option<&'b Compound> {
        let body = body?;
        if attribs.intersects(DEFINITION_SUFFIXES) {
            trace!(%node, "dropping body after `= 0`, `= delete` or `= default`");
            return None;
        }
        if self.mode() == EmitMode::Header
            && !attribs.intersects(Attribs::INLINE | Attribs::FRIEND)
        {
            trace!(%node, "suppressing body of non-inline definition in header");
            return None;
        }
        Some(body)
    }

    /// `;` for a declaration, the braced body for a definition.
    fn finish_definition(
        &self,
        body: Option<&Compound>,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        match body {
            Some(body) => {
                ctx.out.newline();
                self.emit_block_body(body, ctx, indentation)
            }
            None => {
                ctx.out.push_str(";").newline();
                Ok(())
            }
        }
    }

    /// Out-of-line definition of a member function of the classes in
    /// `ctx.scopes`.
    pub(crate) fn emit_function_definition(
        &self,
        func: &Function,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        let Some(body) = &func.body else {
            return Ok(());
        };
        self.check_attribs(EntityKind::Function, func.attribs)?;
        if func.name.is_empty() {
            return Err(Error::malformed(EntityKind::Function, "function name is empty"));
        }
        trace!(name = %func.name, "emitting out-of-line definition");
        let qualifier = self.emit_scope_templates(ctx, indentation)?;
        if let Some(params) = &func.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out.push_indent(indentation);
        let style = SignatureStyle {
            qualifier: Some(&qualifier),
            ..SignatureStyle::default()
        };
        self.emit_function_or_func_ptr_common(Callable::Function(func), ctx, indentation, style)?;
        ctx.out.newline();
        self.emit_block_body(body, ctx, indentation)
    }

    pub(crate) fn emit_constructor_definition(
        &self,
        ctor: &Constructor,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        let Some(body) = &ctor.body else {
            return Ok(());
        };
        self.check_attribs(EntityKind::Constructor, ctor.attribs)?;
        trace!(name = %ctor.name, "emitting out-of-line definition");
        let qualifier = self.emit_scope_templates(ctx, indentation)?;
        if let Some(params) = &ctor.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out.push_indent(indentation);
        let style = SignatureStyle {
            qualifier: Some(&qualifier),
            ..SignatureStyle::default()
        };
        self.emit_function_or_func_ptr_common(
            Callable::Constructor(ctor),
            ctx,
            indentation,
            style,
        )?;
        self.emit_member_inits(ctor, ctx, indentation)?;
        ctx.out.newline();
        self.emit_block_body(body, ctx, indentation)
    }

    pub(crate) fn emit_destructor_definition(
        &self,
        dtor: &Destructor,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        let Some(body) = &dtor.body else {
            return Ok(());
        };
        self.check_attribs(EntityKind::Destructor, dtor.attribs)?;
        trace!(name = %dtor.name, "emitting out-of-line definition");
        let qualifier = self.emit_scope_templates(ctx, indentation)?;
        ctx.out
            .push_indent(indentation)
            .push_str(&qualifier)
            .push_char('~')
            .push_str(&dtor.name)
            .push_str("()");
        self.emit_signature_suffix(dtor.attribs, ctx);
        ctx.out.newline();
        self.emit_block_body(body, ctx, indentation)
    }

    pub(crate) fn emit_type_converter_definition(
        &self,
        conv: &TypeConverter,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        let Some(body) = &conv.body else {
            return Ok(());
        };
        self.check_attribs(EntityKind::TypeConverter, conv.attribs)?;
        trace!("emitting out-of-line conversion operator");
        let qualifier = self.emit_scope_templates(ctx, indentation)?;
        if let Some(params) = &conv.template_params {
            self.emit_template_spec(params, ctx, indentation)?;
        }
        ctx.out.push_indent(indentation).push_str(&qualifier);
        self.emit_converter_head(conv, ctx, indentation)?;
        self.emit_signature_suffix(conv.attribs, ctx);
        ctx.out.newline();
        self.emit_block_body(body, ctx, indentation)
    }
}

/// Suffixes that replace a function body.
const DEFINITION_SUFFIXES: Attribs = Attribs::PURE_VIRTUAL
    .union(Attribs::DELETE)
    .union(Attribs::DEFAULT);

/// Member functions that a Source emission defines out of line.
///
/// Friends defined in a class are implicitly inline and are not members,
/// so they never get a qualified definition. A pure virtual body may still
/// be defined outside the class.
pub(crate) fn needs_out_of_line_definition<F>(func: &F, has_body: bool) -> bool
where
    F: FunctionCommon + ?Sized,
{
    has_body
        && !function_info::is_inline(func)
        && !function_info::is_friend(func)
        && !function_info::is_deleted(func)
        && !function_info::is_defaulted(func)
}
