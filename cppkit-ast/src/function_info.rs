//! Named predicates over the attribute bitmask of function-like entities.
//!
//! These answer the historical bit-exact questions. An override-only
//! function is reported as override, not virtual:
//!
//! ```
//! use cppkit_ast::{function_info, Attribs, Function, VarType};
//!
//! let f = Function::new(VarType::new("void"), "paint")
//!     .with_attribs(Attribs::VIRTUAL | Attribs::OVERRIDE);
//! assert!(!function_info::is_virtual(&f));
//! assert!(function_info::is_override(&f));
//! ```
//!
//! No validation happens here; see [`Attribs::validate`](crate::Attribs::validate).

use crate::{Attribs, FuncOrCtorCommon, FunctionCommon, Param};

pub fn is_const<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::CONST)
}

/// `VIRTUAL` set and `OVERRIDE` clear.
pub fn is_virtual<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    let attribs = func.attribs();
    attribs.contains(Attribs::VIRTUAL) && !attribs.contains(Attribs::OVERRIDE)
}

pub fn is_pure_virtual<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::PURE_VIRTUAL)
}

pub fn is_static<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::STATIC)
}

pub fn is_inline<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::INLINE)
}

pub fn is_override<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::OVERRIDE)
}

/// `= delete`
pub fn is_deleted<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::DELETE)
}

pub fn is_final<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::FINAL)
}

/// `= default`
pub fn is_defaulted<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::DEFAULT)
}

pub fn is_explicit<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::EXPLICIT)
}

pub fn is_friend<F: FunctionCommon + ?Sized>(func: &F) -> bool {
    func.attribs().contains(Attribs::FRIEND)
}

/// Parameters in declaration order.
pub fn get_all_params<F: FuncOrCtorCommon>(func: &F) -> Vec<&Param> {
    let mut params = Vec::new();
    func.visit_all_params(|param| params.push(param));
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constructor, Destructor, Function, Var, VarType};

    fn with(attribs: Attribs) -> Function {
        Function::new(VarType::new("void"), "f").with_attribs(attribs)
    }

    #[test]
    fn test_virtual_requires_override_clear() {
        assert!(is_virtual(&with(Attribs::VIRTUAL)));
        assert!(!is_virtual(&with(Attribs::VIRTUAL | Attribs::OVERRIDE)));
        assert!(is_override(&with(Attribs::VIRTUAL | Attribs::OVERRIDE)));
    }

    #[test]
    fn test_pure_virtual_alone() {
        let f = with(Attribs::PURE_VIRTUAL);
        assert!(is_pure_virtual(&f));
        assert!(!is_virtual(&f));
    }

    #[test]
    fn test_no_validation() {
        let f = with(Attribs::STATIC | Attribs::VIRTUAL);
        assert!(is_static(&f));
        assert!(is_virtual(&f));
    }

    #[test]
    fn test_single_bit_predicates() {
        let f = with(Attribs::CONST | Attribs::INLINE | Attribs::FINAL);
        assert!(is_const(&f));
        assert!(is_inline(&f));
        assert!(is_final(&f));
        assert!(!is_deleted(&f));

        let dtor = Destructor::new("Foo").with_attribs(Attribs::DEFAULT);
        assert!(is_defaulted(&dtor));
        let ctor = Constructor::new("Foo").with_attribs(Attribs::EXPLICIT | Attribs::DELETE);
        assert!(is_explicit(&ctor));
        assert!(is_deleted(&ctor));
    }

    #[test]
    fn test_get_all_params_on_constructor() {
        let ctor = Constructor::new("Point")
            .param(Var::new(VarType::new("int"), "x"))
            .param(Var::new(VarType::new("int"), "y"));
        let names: Vec<&str> = get_all_params(&ctor).iter().map(|p| p.name()).collect();
        assert_eq!(names, ["x", "y"]);
    }
}
