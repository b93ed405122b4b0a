//! C++11 attribute-specifier sequences (`[[nodiscard, deprecated("x")]]`).

use serde::{Deserialize, Serialize};

use crate::Expr;

/// Ordered, owned sequence of attribute expressions attached to a declaration.
///
/// Insertion order is visit order and emission order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSpecifierSequence {
    specifiers: Vec<Expr>,
}

impl AttributeSpecifierSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored sequence, discarding the previous contents.
    pub fn set_sequence(&mut self, sequence: Vec<Expr>) {
        self.specifiers = sequence;
    }

    pub fn push(&mut self, specifier: Expr) {
        self.specifiers.push(specifier);
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.specifiers.iter()
    }

    /// Call `callback` on every specifier in order.
    pub fn visit_all(&self, mut callback: impl FnMut(&Expr)) {
        self.visit(|specifier| {
            callback(specifier);
            true
        });
    }

    /// Call `callback` on every specifier in order until it returns `false`.
    ///
    /// Returns `false` if the walk stopped early, `true` if every specifier
    /// was visited.
    pub fn visit(&self, mut callback: impl FnMut(&Expr) -> bool) -> bool {
        for specifier in &self.specifiers {
            if !callback(specifier) {
                return false;
            }
        }
        true
    }

    pub fn visit_all_mut(&mut self, mut callback: impl FnMut(&mut Expr)) {
        self.visit_mut(|specifier| {
            callback(specifier);
            true
        });
    }

    pub fn visit_mut(&mut self, mut callback: impl FnMut(&mut Expr) -> bool) -> bool {
        for specifier in &mut self.specifiers {
            if !callback(specifier) {
                return false;
            }
        }
        true
    }
}

impl From<Vec<Expr>> for AttributeSpecifierSequence {
    fn from(specifiers: Vec<Expr>) -> Self {
        Self { specifiers }
    }
}

impl FromIterator<Expr> for AttributeSpecifierSequence {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        Self {
            specifiers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeSpecifierSequence {
    type Item = &'a Expr;
    type IntoIter = std::slice::Iter<'a, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Declarations that can carry an attribute-specifier sequence.
pub trait HasAttributeSpecifiers {
    fn attribute_specifiers(&self) -> &AttributeSpecifierSequence;

    fn attribute_specifiers_mut(&mut self) -> &mut AttributeSpecifierSequence;

    /// Replace the attached sequence.
    fn set_attribute_specifiers(&mut self, sequence: Vec<Expr>) {
        self.attribute_specifiers_mut().set_sequence(sequence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(seq: &AttributeSpecifierSequence) -> Vec<String> {
        let mut out = Vec::new();
        seq.visit_all(|e| out.push(e.as_name().unwrap_or_default().to_string()));
        out
    }

    #[test]
    fn test_set_sequence_replaces() {
        let mut seq = AttributeSpecifierSequence::from(vec![Expr::name("old")]);
        seq.set_sequence(vec![Expr::name("nodiscard"), Expr::name("maybe_unused")]);
        assert_eq!(names(&seq), ["nodiscard", "maybe_unused"]);
    }

    #[test]
    fn test_visit_mut_rewrites_in_order() {
        let mut seq: AttributeSpecifierSequence =
            [Expr::name("a"), Expr::name("b")].into_iter().collect();
        let mut n = 0;
        seq.visit_all_mut(|e| {
            n += 1;
            *e = Expr::name(format!("attr{}", n));
        });
        assert_eq!(names(&seq), ["attr1", "attr2"]);
    }

    #[test]
    fn test_visit_on_empty_returns_true() {
        let seq = AttributeSpecifierSequence::new();
        assert!(seq.visit(|_| false));
    }
}
