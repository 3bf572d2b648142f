//! Variable records and the handles that locate them.

use simpl_core::{InternedString, ValueType};
use std::fmt;

/// Identifies a scope slot in the table's arena.
///
/// The generation changes every time the slot is released, so an id kept
/// past `destroy` no longer matches and resolves to nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ScopeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ScopeId {
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// A non-owning reference to a record: the owning scope plus the record's
/// insertion position inside it.
///
/// Records are never removed individually, so the position stays valid for
/// as long as the scope lives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SymbolRef {
    pub(crate) scope: ScopeId,
    pub(crate) index: u32,
}

impl SymbolRef {
    #[inline]
    pub fn scope(self) -> ScopeId {
        self.scope
    }

    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: InternedString,
    pub value_type: ValueType,
    /// Scratch slot for constant folding; nothing reads it yet.
    pub value: f64,
}

impl Record {
    pub fn new(name: InternedString, value_type: ValueType) -> Self {
        Self {
            name,
            value_type,
            value: 0.0,
        }
    }
}
