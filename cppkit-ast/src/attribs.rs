//! Identifier attributes encoded as a bitmask.
//!
//! The parser records every qualifier it sees on a declaration as a bit in
//! [`Attribs`]. Predicates over function-like entities are defined by exact bit
//! combinations (see [`crate::function_info`]); [`Virtuality`] offers a
//! mutually exclusive view of the virtual/override/pure bits.

use std::{
    fmt,
    ops::{BitAnd, BitOr, BitOrAssign, Not},
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Bit set of C++ declaration qualifiers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribs(u32);

impl Attribs {
    pub const NONE: Self = Self(0);
    pub const STATIC: Self = Self(1 << 0);
    pub const EXTERN: Self = Self(1 << 1);
    pub const EXTERN_C: Self = Self(1 << 2);
    pub const CONST: Self = Self(1 << 3);
    pub const VOLATILE: Self = Self(1 << 4);
    pub const MUTABLE: Self = Self(1 << 5);
    pub const CONST_EXPR: Self = Self(1 << 6);
    pub const THREAD_LOCAL: Self = Self(1 << 7);
    pub const INLINE: Self = Self(1 << 8);
    pub const VIRTUAL: Self = Self(1 << 9);
    pub const OVERRIDE: Self = Self(1 << 10);
    pub const FINAL: Self = Self(1 << 11);
    pub const PURE_VIRTUAL: Self = Self(1 << 12);
    pub const DELETE: Self = Self(1 << 13);
    pub const DEFAULT: Self = Self(1 << 14);
    pub const EXPLICIT: Self = Self(1 << 15);
    pub const FRIEND: Self = Self(1 << 16);
    pub const TYPEDEF: Self = Self(1 << 17);
    pub const NO_EXCEPT: Self = Self(1 << 18);

    const NAMES: [(Attribs, &'static str); 19] = [
        (Self::STATIC, "STATIC"),
        (Self::EXTERN, "EXTERN"),
        (Self::EXTERN_C, "EXTERN_C"),
        (Self::CONST, "CONST"),
        (Self::VOLATILE, "VOLATILE"),
        (Self::MUTABLE, "MUTABLE"),
        (Self::CONST_EXPR, "CONST_EXPR"),
        (Self::THREAD_LOCAL, "THREAD_LOCAL"),
        (Self::INLINE, "INLINE"),
        (Self::VIRTUAL, "VIRTUAL"),
        (Self::OVERRIDE, "OVERRIDE"),
        (Self::FINAL, "FINAL"),
        (Self::PURE_VIRTUAL, "PURE_VIRTUAL"),
        (Self::DELETE, "DELETE"),
        (Self::DEFAULT, "DEFAULT"),
        (Self::EXPLICIT, "EXPLICIT"),
        (Self::FRIEND, "FRIEND"),
        (Self::TYPEDEF, "TYPEDEF"),
        (Self::NO_EXCEPT, "NO_EXCEPT"),
    ];

    /// Wrap a raw bitmask as produced by a parser. Unknown bits are kept.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn empty() -> Self {
        Self::NONE
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if any bit of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Set or clear `other` depending on `value`.
    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    /// Mutually exclusive view of the virtual, override and pure-virtual bits.
    pub fn virtuality(self) -> Virtuality {
        let is_virtual = self.contains(Self::VIRTUAL);
        let is_override = self.contains(Self::OVERRIDE);
        if self.contains(Self::PURE_VIRTUAL) {
            if is_override {
                Virtuality::PureOverride
            } else {
                Virtuality::PureVirtual
            }
        } else if is_override {
            if is_virtual {
                Virtuality::VirtualOverride
            } else {
                Virtuality::Override
            }
        } else if is_virtual {
            Virtuality::Virtual
        } else {
            Virtuality::NonVirtual
        }
    }

    /// Reject combinations that cannot appear on a well-formed declaration.
    ///
    /// Parsers are trusted by default and nothing calls this implicitly; the
    /// writer only runs it when strict attribute checking is configured.
    pub fn validate(self) -> Result<()> {
        let overriding = Self::VIRTUAL
            .union(Self::OVERRIDE)
            .union(Self::PURE_VIRTUAL)
            .union(Self::FINAL);
        if self.contains(Self::STATIC) && self.intersects(overriding) {
            return Err(Error::inconsistent(
                self,
                "a static member function cannot be virtual, override or final",
            ));
        }
        if self.contains(Self::STATIC) && self.contains(Self::CONST) {
            return Err(Error::inconsistent(
                self,
                "a static member function cannot be const",
            ));
        }
        if self.contains(Self::DELETE) && self.contains(Self::DEFAULT) {
            return Err(Error::inconsistent(
                self,
                "a function cannot be both deleted and defaulted",
            ));
        }
        if self.contains(Self::PURE_VIRTUAL) && self.intersects(Self::DELETE.union(Self::DEFAULT)) {
            return Err(Error::inconsistent(
                self,
                "a pure virtual function cannot be deleted or defaulted",
            ));
        }
        Ok(())
    }
}

impl BitOr for Attribs {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Attribs {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl BitAnd for Attribs {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Attribs {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl From<u32> for Attribs {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl fmt::Display for Attribs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut known = Self::NONE;
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                known.insert(flag);
                first = false;
            }
        }
        let unknown = self.difference(known);
        if !unknown.is_empty() {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{:#x}", unknown.0)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Attribs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attribs({})", self)
    }
}

/// Virtual dispatch state of a member function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Virtuality {
    NonVirtual,
    /// `virtual void f();`
    Virtual,
    /// `virtual void f() = 0;`
    PureVirtual,
    /// `void f() override;`
    Override,
    /// `virtual void f() override;`
    VirtualOverride,
    /// `void f() override = 0;`
    PureOverride,
}

impl Virtuality {
    /// Returns true if the function participates in virtual dispatch.
    pub fn is_dynamic(self) -> bool {
        !matches!(self, Virtuality::NonVirtual)
    }

    /// Returns true for the override states.
    pub fn is_overriding(self) -> bool {
        matches!(
            self,
            Virtuality::Override | Virtuality::VirtualOverride | Virtuality::PureOverride
        )
    }

    /// Returns true for the pure states.
    pub fn is_pure(self) -> bool {
        matches!(self, Virtuality::PureVirtual | Virtuality::PureOverride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_intersects() {
        let attribs = Attribs::VIRTUAL | Attribs::CONST;
        assert!(attribs.contains(Attribs::VIRTUAL));
        assert!(attribs.contains(Attribs::VIRTUAL | Attribs::CONST));
        assert!(!attribs.contains(Attribs::VIRTUAL | Attribs::OVERRIDE));
        assert!(attribs.intersects(Attribs::VIRTUAL | Attribs::OVERRIDE));
    }

    #[test]
    fn test_set_and_remove() {
        let mut attribs = Attribs::empty();
        attribs.set(Attribs::INLINE, true);
        attribs.insert(Attribs::STATIC);
        assert_eq!(attribs, Attribs::INLINE | Attribs::STATIC);
        attribs.set(Attribs::INLINE, false);
        assert_eq!(attribs, Attribs::STATIC);
    }

    #[test]
    fn test_unknown_bits_are_kept() {
        let attribs = Attribs::from_bits(1 << 30 | 1);
        assert_eq!(attribs.bits(), 1 << 30 | 1);
        assert_eq!(attribs.to_string(), "STATIC | 0x40000000");
    }

    #[test]
    fn test_virtuality() {
        assert_eq!(Attribs::NONE.virtuality(), Virtuality::NonVirtual);
        assert_eq!(Attribs::VIRTUAL.virtuality(), Virtuality::Virtual);
        assert_eq!(
            (Attribs::VIRTUAL | Attribs::PURE_VIRTUAL).virtuality(),
            Virtuality::PureVirtual
        );
        assert_eq!(Attribs::OVERRIDE.virtuality(), Virtuality::Override);
        assert_eq!(
            (Attribs::VIRTUAL | Attribs::OVERRIDE).virtuality(),
            Virtuality::VirtualOverride
        );
        assert_eq!(
            (Attribs::OVERRIDE | Attribs::PURE_VIRTUAL).virtuality(),
            Virtuality::PureOverride
        );
        assert!(Virtuality::PureOverride.is_pure());
        assert!(Virtuality::PureOverride.is_overriding());
        assert!(!Virtuality::NonVirtual.is_dynamic());
    }

    #[test]
    fn test_validate_accepts_legal_combinations() {
        assert!((Attribs::VIRTUAL | Attribs::PURE_VIRTUAL | Attribs::CONST).validate().is_ok());
        assert!((Attribs::OVERRIDE | Attribs::FINAL).validate().is_ok());
        assert!((Attribs::STATIC | Attribs::INLINE).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_static_virtual() {
        let err = (Attribs::STATIC | Attribs::VIRTUAL).validate().unwrap_err();
        assert!(matches!(err, Error::InconsistentAttributes { .. }));
    }

    #[test]
    fn test_validate_rejects_deleted_defaulted() {
        assert!((Attribs::DELETE | Attribs::DEFAULT).validate().is_err());
        assert!((Attribs::PURE_VIRTUAL | Attribs::DELETE).validate().is_err());
        assert!((Attribs::STATIC | Attribs::CONST).validate().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Attribs::NONE.to_string(), "NONE");
        assert_eq!(
            (Attribs::CONST | Attribs::OVERRIDE).to_string(),
            "CONST | OVERRIDE"
        );
    }
}
