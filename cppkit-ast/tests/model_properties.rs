//! Behavioral properties of the entity model: downcast safety, attribute
//! predicates, visitor order and parameter order.

use cppkit_ast::{
    Attribs, AttributeSpecifierSequence, Compound, Constructor, Entity, EntityKind, Error, Expr,
    Function, FunctionCommon, FunctionPointer, HasAttributeSpecifiers, Param, Var, VarType,
    Virtuality, function_info,
};

fn sample_entities() -> Vec<Entity> {
    vec![
        Var::new(VarType::new("int"), "count").into(),
        Function::new(VarType::new("void"), "draw")
            .with_attribs(Attribs::CONST)
            .into(),
        Constructor::new("Widget").into(),
        Compound::class("Widget").into(),
        FunctionPointer::new(VarType::new("void"), "cb").into(),
        Entity::Break,
    ]
}

#[test]
fn test_downcast_mismatch_is_always_invalid() {
    for entity in sample_entities() {
        let as_var = entity.handle::<Var>();
        let as_func = entity.handle::<Function>();
        assert_eq!(as_var.is_valid(), entity.kind() == EntityKind::Var);
        assert_eq!(as_func.is_valid(), entity.kind() == EntityKind::Function);
        if !as_func.is_valid() {
            assert!(matches!(
                as_func.get(),
                Err(Error::InvalidAccess { expected: "function", .. })
            ));
        }
    }
}

#[test]
fn test_downcast_match_exposes_fields() {
    let original = Function::new(VarType::new("int"), "area")
        .with_attribs(Attribs::CONST | Attribs::VIRTUAL)
        .param(Var::new(VarType::new("int"), "scale"));
    let entity = Entity::from(original.clone());
    let func = entity.handle::<Function>().get().unwrap();
    assert_eq!(func, &original);
    assert_eq!(func.name, "area");
    assert_eq!(func.params.len(), 1);
}

#[test]
fn test_capability_cast_covers_function_like_kinds() {
    let function_like: Vec<bool> = sample_entities()
        .iter()
        .map(|e| e.handle::<dyn FunctionCommon>().is_valid())
        .collect();
    assert_eq!(function_like, [false, true, true, false, true, false]);
}

#[test]
fn test_predicates_on_bit_combinations() {
    let f = |attribs| Function::new(VarType::new("void"), "f").with_attribs(attribs);

    let overriding = f(Attribs::VIRTUAL | Attribs::OVERRIDE);
    assert!(!function_info::is_virtual(&overriding));
    assert!(function_info::is_override(&overriding));
    assert_eq!(overriding.attribs.virtuality(), Virtuality::VirtualOverride);

    let pure = f(Attribs::PURE_VIRTUAL);
    assert!(function_info::is_pure_virtual(&pure));
    assert!(!function_info::is_virtual(&pure));
    assert_eq!(pure.attribs.virtuality(), Virtuality::PureVirtual);

    let plain = f(Attribs::VIRTUAL);
    assert!(function_info::is_virtual(&plain));
    assert_eq!(plain.attribs.virtuality(), Virtuality::Virtual);
}

#[test]
fn test_predicates_through_entity_handle() {
    let entity = Entity::from(
        Function::new(VarType::new("void"), "f").with_attribs(Attribs::STATIC | Attribs::INLINE),
    );
    let common = entity.handle::<dyn FunctionCommon>().get().unwrap();
    assert!(function_info::is_static(common));
    assert!(function_info::is_inline(common));
    assert!(!function_info::is_const(common));
}

#[test]
fn test_attribute_sequence_visit_order_and_early_exit() {
    let mut var = Var::new(VarType::new("int"), "x");
    var.set_attribute_specifiers(vec![Expr::name("a0"), Expr::name("a1"), Expr::name("a2")]);
    let seq: &AttributeSpecifierSequence = var.attribute_specifiers();

    let mut all = Vec::new();
    seq.visit_all(|e| all.push(e.as_name().unwrap_or_default().to_string()));
    assert_eq!(all, ["a0", "a1", "a2"]);

    let mut seen = Vec::new();
    let completed = seq.visit(|e| {
        let name = e.as_name().unwrap_or_default();
        seen.push(name.to_string());
        name != "a1"
    });
    assert!(!completed);
    assert_eq!(seen, ["a0", "a1"]);
}

#[test]
fn test_get_all_params_preserves_declaration_order() {
    let func = Function::new(VarType::new("void"), "mix")
        .param(Var::new(VarType::new("int"), "x"))
        .param(Var::new(VarType::new("char"), "y"))
        .param(Var::new(VarType::new("float"), "z"));
    let params = function_info::get_all_params(&func);
    let summary: Vec<(&str, &str)> = params
        .iter()
        .map(|p| match p {
            Param::Var(var) => (var.var_type.base_type.as_str(), var.name()),
            Param::FunctionPointer(fp) => ("(*)", fp.name.as_str()),
        })
        .collect();
    assert_eq!(summary, [("int", "x"), ("char", "y"), ("float", "z")]);
}

#[test]
fn test_strict_validation_is_opt_in() {
    let attribs = Attribs::STATIC | Attribs::VIRTUAL;
    let f = Function::new(VarType::new("void"), "f").with_attribs(attribs);
    assert!(function_info::is_static(&f));
    assert!(matches!(
        attribs.validate(),
        Err(Error::InconsistentAttributes { .. })
    ));
}
