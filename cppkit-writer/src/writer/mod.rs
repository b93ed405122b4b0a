//! The emission engine.
//!
//! [`Writer`] holds only configuration and is shared freely; everything that
//! changes during an emission lives in an [`EmitContext`] created per call.
//! Each node kind has its own `emit_*` method taking the node, the context
//! and the [`Indentation`] of the construct.

mod compound;
mod decl;
mod expr;
mod function;
mod preprocessor;
mod stmt;

use std::{fs, io, path::Path};

use cppkit_ast::{Attribs, Entity, EntityKind, Expr, HasAttributeSpecifiers, TemplateParams};
use tracing::{debug, warn};

pub use function::ParamStyle;
pub(crate) use function::SignatureStyle;

use crate::{
    EmitMode, Error, Result, WriterConfig,
    builder::{CodeBuffer, Indent, Indentation},
};

/// Enclosing class of an out-of-line definition.
#[derive(Debug, Clone)]
pub(crate) struct ClassScope {
    name: String,
    template_params: Option<TemplateParams>,
}

/// Mutable state of a single emission.
///
/// Holds the output, the preprocessor conditional depth and the scope
/// information that decides how members are rendered. A context is never
/// shared between emissions.
#[derive(Debug)]
pub struct EmitContext {
    pub(crate) out: CodeBuffer,
    pub(crate) preprocessor_depth: usize,
    /// An enclosing `File` compound is being emitted.
    pub(crate) in_file: bool,
    pub(crate) scopes: Vec<ClassScope>,
    /// Indentation of the statement owning the expression being emitted.
    pub(crate) expr_indent: Indentation,
}

impl EmitContext {
    pub fn new(indent: Indent) -> Self {
        Self {
            out: CodeBuffer::new(indent),
            preprocessor_depth: 0,
            in_file: false,
            scopes: Vec::new(),
            expr_indent: Indentation::default(),
        }
    }

    /// Number of currently open `#if`-family conditionals.
    pub fn preprocessor_depth(&self) -> usize {
        self.preprocessor_depth
    }

    /// Text emitted so far.
    pub fn as_str(&self) -> &str {
        self.out.as_str()
    }

    /// Finish the emission, rejecting unclosed conditionals.
    pub fn finish(self) -> Result<String> {
        if self.preprocessor_depth != 0 {
            return Err(Box::new(Error::UnbalancedConditional {
                depth: self.preprocessor_depth,
            }));
        }
        Ok(self.out.build())
    }
}

/// Renders entity trees as C++ source.
///
/// ```
/// use cppkit_ast::{Attribs, Compound, Function, VarType};
/// use cppkit_writer::Writer;
///
/// let class = Compound::struct_("Shape").member(
///     Function::new(VarType::new("double"), "area").with_attribs(Attribs::CONST),
/// );
/// let text = Writer::default().emit(&class.into()).unwrap();
/// assert_eq!(text, "struct Shape\n{\n  double area() const;\n};\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Writer {
    config: WriterConfig,
}

impl Writer {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn with_mode(mode: EmitMode) -> Self {
        Self::new(WriterConfig::new(mode))
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn mode(&self) -> EmitMode {
        self.config.mode
    }

    /// A fresh context for emitting with this writer's settings.
    pub fn context(&self) -> EmitContext {
        EmitContext::new(self.config.indent)
    }

    /// Emit `entity` and return the source text.
    ///
    /// On error nothing is returned; partial output is discarded.
    pub fn emit(&self, entity: &Entity) -> Result<String> {
        debug!(kind = %entity.kind(), mode = ?self.config.mode, "emission started");
        let mut ctx = self.context();
        self.emit_entity(entity, &mut ctx, Indentation::default())?;
        let text = ctx.finish()?;
        debug!(kind = %entity.kind(), bytes = text.len(), "emission finished");
        Ok(text)
    }

    /// Emit `entity` into `sink`. Nothing is written if emission fails.
    pub fn write_to(&self, entity: &Entity, sink: &mut impl io::Write) -> Result<()> {
        let text = self.emit(entity)?;
        sink.write_all(text.as_bytes())
            .map_err(|e| Box::new(Error::Write(e)))
    }

    /// Emit `entity` into the file at `path`, replacing its contents.
    pub fn write_file(&self, entity: &Entity, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.emit(entity)?;
        fs::write(path, text).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    /// Dispatch on the entity kind.
    pub fn emit_entity(
        &self,
        entity: &Entity,
        ctx: &mut EmitContext,
        indentation: Indentation,
    ) -> Result<()> {
        let saved = ctx.expr_indent;
        ctx.expr_indent = indentation;
        let result = self.dispatch(entity, ctx, indentation);
        ctx.expr_indent = saved;
        result
    }

    fn dispatch(&self, entity: &Entity, ctx: &mut EmitContext, indentation: Indentation) -> Result<()> {
        match entity {
            Entity::Var(var) => self.emit_var(var, ctx, indentation),
            Entity::VarList(list) => self.emit_var_list(list, ctx, indentation),
            Entity::Enum(e) => self.emit_enum(e, ctx, indentation),
            Entity::TypedefName(typedef) => self.emit_typedef(typedef, ctx, indentation),
            Entity::TypedefList(list) => self.emit_typedef_list(list, ctx, indentation),
            Entity::UsingDecl(using) => self.emit_using_decl(using, ctx, indentation),
            Entity::ForwardClassDecl(fwd) => self.emit_fwd_decl(fwd, ctx, indentation),
            Entity::MacroCall(call) => self.emit_macro_call(call, ctx, indentation),
            Entity::AccessSpecifier(access) => {
                self.emit_access_specifier(*access, ctx, indentation)
            }
            Entity::Compound(compound) => self.emit_compound(compound, ctx, indentation),
            Entity::Function(func) => self.emit_function(func, ctx, indentation),
            Entity::FunctionPointer(fp) => self.emit_function_ptr(fp, ctx, indentation),
            Entity::Constructor(ctor) => self.emit_constructor(ctor, ctx, indentation),
            Entity::Destructor(dtor) => self.emit_destructor(dtor, ctx, indentation),
            Entity::TypeConverter(conv) => self.emit_type_converter(conv, ctx, indentation),
            Entity::DocComment(doc) => self.emit_doc_comment(doc, ctx, indentation),
            Entity::Preprocessor(pp) => self.emit_preprocessor(pp, ctx),
            Entity::Blob(blob) => self.emit_blob(blob, ctx, false, indentation),
            Entity::NamespaceAlias(alias) => self.emit_namespace_alias(alias, ctx, indentation),
            Entity::UsingNamespace(using) => self.emit_using_namespace(using, ctx, indentation),
            Entity::Expr(expr) => self.emit_expr_stmt(expr, ctx, indentation),
            Entity::IfBlock(block) => self.emit_if_block(block, ctx, indentation),
            Entity::WhileBlock(block) => self.emit_while_block(block, ctx, indentation),
            Entity::DoWhileBlock(block) => self.emit_do_block(block, ctx, indentation),
            Entity::ForBlock(block) => self.emit_for_block(block, ctx, indentation),
            Entity::RangeForBlock(block) => self.emit_range_for_block(block, ctx, indentation),
            Entity::SwitchBlock(block) => self.emit_switch_block(block, ctx, indentation),
            Entity::Return(expr) => {
                self.emit_keyword_stmt("return", expr.as_ref(), ctx, indentation)
            }
            Entity::Throw(expr) => self.emit_keyword_stmt("throw", expr.as_ref(), ctx, indentation),
            Entity::Goto(label) => self.emit_goto(label, ctx, indentation),
            Entity::Label(label) => self.emit_label(label, ctx, indentation),
            Entity::Break => self.emit_keyword_stmt("break", None, ctx, indentation),
            Entity::Continue => self.emit_keyword_stmt("continue", None, ctx, indentation),
        }
    }

    /// `[[a, b]] ` prefix; nothing for an empty sequence.
    pub fn emit_attribute_specifiers(
        &self,
        decl: &impl HasAttributeSpecifiers,
        ctx: &mut EmitContext,
    ) -> Result<()> {
        let seq = decl.attribute_specifiers();
        if seq.is_empty() {
            return Ok(());
        }
        ctx.out.push_str("[[");
        self.emit_expr_list(seq.iter(), ctx)?;
        ctx.out.push_str("]] ");
        Ok(())
    }

    /// Validate `attribs` of a function-like entity as configured.
    fn check_attribs(&self, node: EntityKind, attribs: Attribs) -> Result<()> {
        match attribs.validate() {
            Ok(()) => Ok(()),
            Err(source) if self.config.strict_attributes => Err(Error::attributes(node, source)),
            Err(source) => {
                warn!(%node, error = %source, "emitting inconsistent attributes");
                Ok(())
            }
        }
    }

    fn emit_expr_list<'e>(
        &self,
        exprs: impl IntoIterator<Item = &'e Expr>,
        ctx: &mut EmitContext,
    ) -> Result<()> {
        for (i, expr) in exprs.into_iter().enumerate() {
            if i > 0 {
                ctx.out.push_str(", ");
            }
            self.emit_expr(expr, ctx)?;
        }
        Ok(())
    }
}
