//! Conditional nesting across whole files.

use cppkit_ast::{Compound, ConditionalKind, Entity, Preprocessor, Var, VarType};
use cppkit_writer::{Error, Writer};

fn directive(pp: Preprocessor) -> Entity {
    Entity::Preprocessor(pp)
}

#[test]
fn test_nested_conditionals_indent_then_dedent() {
    let file = Compound::file()
        .member(directive(Preprocessor::if_("A")))
        .member(directive(Preprocessor::ifdef("B")))
        .member(directive(Preprocessor::ifndef("C")))
        .member(directive(Preprocessor::include_system("vector")))
        .member(directive(Preprocessor::EndIf))
        .member(directive(Preprocessor::conditional(ConditionalKind::Elif, "D")))
        .member(directive(Preprocessor::Pragma("once".into())))
        .member(directive(Preprocessor::EndIf))
        .member(directive(Preprocessor::EndIf));
    let text = Writer::default().emit(&file.into()).unwrap();
    insta::assert_snapshot!(text, @r"
#if A
#  ifdef B
#    ifndef C
#      include <vector>
#    endif
#  elif D
#    pragma once
#  endif
#endif
");

    let widths: Vec<usize> = text
        .lines()
        .map(|line| line[1..].len() - line[1..].trim_start().len())
        .collect();
    assert_eq!(widths, [0, 2, 4, 6, 4, 2, 4, 2, 0]);
}

#[test]
fn test_directives_inside_class_ignore_member_indentation() {
    let class = Compound::class("Gpu")
        .member(directive(Preprocessor::ifdef("SK_METAL")))
        .member(Var::new(VarType::new("void").pointer(), "device"))
        .member(directive(Preprocessor::EndIf));
    assert_eq!(
        Writer::default().emit(&class.into()).unwrap(),
        "class Gpu\n{\n#ifdef SK_METAL\n  void* device;\n#endif\n};\n"
    );
}

#[test]
fn test_unbalanced_file_is_rejected() {
    let open = Compound::file()
        .member(directive(Preprocessor::ifndef("GUARD")))
        .member(directive(Preprocessor::ifdef("X")))
        .member(directive(Preprocessor::EndIf));
    let err = Writer::default().emit(&open.into()).unwrap_err();
    assert!(matches!(*err, Error::UnbalancedConditional { depth: 1 }));

    let extra = Compound::file().member(directive(Preprocessor::EndIf));
    let err = Writer::default().emit(&extra.into()).unwrap_err();
    assert!(matches!(*err, Error::UnmatchedEndif));
}

#[test]
fn test_unrecognized_directive_is_verbatim() {
    let file = Compound::file()
        .member(directive(Preprocessor::ifdef("X")))
        .member(directive(Preprocessor::Unrecognized("line 42 \"gen.h\"".into())))
        .member(directive(Preprocessor::EndIf));
    assert_eq!(
        Writer::default().emit(&file.into()).unwrap(),
        "#ifdef X\n#  line 42 \"gen.h\"\n#endif\n"
    );
}
