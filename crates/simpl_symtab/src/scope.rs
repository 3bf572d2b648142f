//! A single scope in the table's arena.

use crate::symbol::{Record, ScopeId};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use simpl_core::InternedString;

/// Records keyed by name, iterated in declaration order. A record's
/// position in this map is the index stored in its `SymbolRef`.
pub(crate) type RecordMap = IndexMap<InternedString, Record, FxBuildHasher>;

#[derive(Debug)]
pub struct Scope {
    /// The enclosing scope (None for a root). Not an owning link.
    pub parent: Option<ScopeId>,
    /// Set by `hide`. Lookup ignores it.
    pub hidden: bool,
    pub(crate) records: RecordMap,
    /// Nested scopes, destroyed together with this one.
    pub children: Vec<ScopeId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            hidden: false,
            records: RecordMap::default(),
            children: Vec::new(),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// An arena slot. `scope` is None while the slot sits on the free list.
#[derive(Debug)]
pub(crate) struct Slot {
    pub generation: u32,
    pub scope: Option<Scope>,
}
