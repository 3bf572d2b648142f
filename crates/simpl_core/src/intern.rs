//! String interning for symbol names.
//!
//! Every declared name is interned once by the symbol table so that scope
//! lookups compare integer keys instead of strings.

use lasso::{Rodeo, Spur};
use std::fmt;

/// An interned string identifier. This is a lightweight handle (u32)
/// that can be used to look up the actual string content.
///
/// Comparing two `InternedString` values is an O(1) integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    /// Create from a raw lasso key.
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    /// Get the raw lasso key.
    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Single-threaded string interner.
///
/// The IR core runs on one logical thread, so this wraps lasso's `Rodeo`
/// rather than its threaded variant.
#[derive(Default)]
pub struct StringInterner {
    rodeo: Rodeo,
}

impl StringInterner {
    /// Create a new string interner.
    pub fn new() -> Self {
        Self { rodeo: Rodeo::new() }
    }

    /// Intern a string, returning a handle to the interned value.
    /// If the string was already interned, returns the existing handle.
    #[inline]
    pub fn intern(&mut self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    /// Look up an already-interned string without interning it if absent.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    /// Resolve an interned string handle back to its string content.
    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    /// Returns the number of interned strings.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Returns true if no strings have been interned.
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let mut interner = StringInterner::new();
        let a = interner.intern("counter");
        let b = interner.intern("counter");
        let c = interner.intern("limit");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "counter");
        assert_eq!(interner.resolve(c), "limit");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_get_does_not_intern() {
        let mut interner = StringInterner::new();
        assert!(interner.get("x").is_none());
        assert!(interner.is_empty());
        let x = interner.intern("x");
        assert_eq!(interner.get("x"), Some(x));
    }
}
