//! Preprocessor directives.
//!
//! Directives start in column 0; nesting inside `#if` blocks is shown by
//! indentation between the `#` and the keyword, one unit per open
//! conditional:
//!
//! ```text
//! #ifndef GUARD
//! #  define GUARD
//! #  ifdef X
//! #    include "x.h"
//! #  endif
//! #endif
//! ```

use cppkit_ast::{ConditionalKind, Define, EntityKind, Preprocessor};

use super::{EmitContext, Writer};
use crate::{Error, Result, builder::Indentation};

impl Writer {
    pub fn emit_preprocessor(&self, pp: &Preprocessor, ctx: &mut EmitContext) -> Result<()> {
        match pp {
            Preprocessor::Define(define) => self.emit_define(define, ctx),
            Preprocessor::Undef(name) => self.emit_directive("undef", name, ctx),
            Preprocessor::Include(path) => {
                if path.is_empty() {
                    return Err(Error::malformed(
                        EntityKind::Preprocessor,
                        "include path is empty",
                    ));
                }
                self.emit_directive("include", path, ctx)
            }
            Preprocessor::Import(path) => self.emit_directive("import", path, ctx),
            Preprocessor::Pragma(text) => self.emit_directive("pragma", text, ctx),
            Preprocessor::Error(text) => self.emit_directive("error", text, ctx),
            Preprocessor::Warning(text) => self.emit_directive("warning", text, ctx),
            Preprocessor::Conditional { kind, condition } => {
                self.emit_conditional(*kind, condition, ctx)
            }
            Preprocessor::EndIf => self.emit_endif(ctx),
            Preprocessor::Unrecognized(text) => {
                self.emit_hash(ctx.preprocessor_depth, ctx);
                ctx.out.push_str(text).newline();
                Ok(())
            }
        }
    }

    /// `#define NAME(a, b) body`
    pub fn emit_define(&self, define: &Define, ctx: &mut EmitContext) -> Result<()> {
        if define.name.is_empty() {
            return Err(Error::malformed(
                EntityKind::Preprocessor,
                "macro name is empty",
            ));
        }
        self.emit_hash(ctx.preprocessor_depth, ctx);
        ctx.out.push_str("define ").push_str(&define.name);
        if let Some(params) = &define.params {
            ctx.out.push_char('(').push_str(&params.join(", ")).push_char(')');
        }
        if !define.body.is_empty() {
            ctx.out.push_char(' ').push_str(&define.body);
        }
        ctx.out.newline();
        Ok(())
    }

    /// `#if`, `#ifdef` and `#ifndef` open a level; `#elif` and `#else` sit
    /// at the level of the directive they continue.
    pub fn emit_conditional(
        &self,
        kind: ConditionalKind,
        condition: &str,
        ctx: &mut EmitContext,
    ) -> Result<()> {
        let depth = if kind.opens() {
            let depth = ctx.preprocessor_depth;
            ctx.preprocessor_depth += 1;
            depth
        } else {
            let Some(depth) = ctx.preprocessor_depth.checked_sub(1) else {
                return Err(Box::new(Error::UnmatchedElse {
                    directive: kind.as_str(),
                }));
            };
            depth
        };
        self.emit_hash(depth, ctx);
        ctx.out.push_str(kind.as_str()).push_char(' ').push_str(condition).newline();
        Ok(())
    }

    pub fn emit_endif(&self, ctx: &mut EmitContext) -> Result<()> {
        let Some(depth) = ctx.preprocessor_depth.checked_sub(1) else {
            return Err(Box::new(Error::UnmatchedEndif));
        };
        ctx.preprocessor_depth = depth;
        self.emit_hash(ctx.preprocessor_depth, ctx);
        ctx.out.push_str("endif").newline();
        Ok(())
    }

    fn emit_directive(&self, keyword: &str, text: &str, ctx: &mut EmitContext) -> Result<()> {
        self.emit_hash(ctx.preprocessor_depth, ctx);
        ctx.out.push_str(keyword).push_char(' ').push_str(text).newline();
        Ok(())
    }

    fn emit_hash(&self, depth: usize, ctx: &mut EmitContext) {
        ctx.out.push_char('#').push_indent(Indentation::new(depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_all(directives: &[Preprocessor]) -> Result<String> {
        let writer = Writer::default();
        let mut ctx = writer.context();
        for pp in directives {
            writer.emit_preprocessor(pp, &mut ctx)?;
        }
        ctx.finish()
    }

    #[test]
    fn test_guard_layout() {
        let text = emit_all(&[
            Preprocessor::ifndef("_WX_RENDERER_H_"),
            Preprocessor::define("_WX_RENDERER_H_"),
            Preprocessor::include_local("wx/gdicmn.h"),
            Preprocessor::EndIf,
        ])
        .unwrap();
        assert_eq!(
            text,
            "#ifndef _WX_RENDERER_H_\n#  define _WX_RENDERER_H_\n#  include \"wx/gdicmn.h\"\n#endif\n"
        );
    }

    #[test]
    fn test_else_keeps_verbatim_condition() {
        let text = emit_all(&[
            Preprocessor::if_(" defined(__WXMSW__)"),
            Preprocessor::define("wxHAS_NATIVE_RENDERER"),
            Preprocessor::else_(),
            Preprocessor::Undef("wxHAS_NATIVE_RENDERER".into()),
            Preprocessor::EndIf,
        ])
        .unwrap();
        assert_eq!(
            text,
            "#if  defined(__WXMSW__)\n#  define wxHAS_NATIVE_RENDERER\n#else \n#  undef wxHAS_NATIVE_RENDERER\n#endif\n"
        );
    }

    #[test]
    fn test_function_like_define() {
        let text = emit_all(&[Preprocessor::Define(
            Define::function_like("MAX", vec!["a".into(), "b".into()]).body("((a) > (b) ? (a) : (b))"),
        )])
        .unwrap();
        assert_eq!(text, "#define MAX(a, b) ((a) > (b) ? (a) : (b))\n");
    }

    #[test]
    fn test_unmatched_directives() {
        assert!(matches!(
            *emit_all(&[Preprocessor::EndIf]).unwrap_err(),
            Error::UnmatchedEndif
        ));
        assert!(matches!(
            *emit_all(&[Preprocessor::else_()]).unwrap_err(),
            Error::UnmatchedElse { directive: "else" }
        ));
    }

    #[test]
    fn test_empty_include_is_malformed() {
        assert!(emit_all(&[Preprocessor::Include(String::new())]).is_err());
    }
}
