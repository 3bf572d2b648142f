//! The scoped symbol table.
//!
//! All scopes live in one arena owned by [`SymbolTable`]. A scope refers to
//! its parent by id without owning it and owns the ids of its children:
//! destroying a scope releases its whole subtree.

use crate::error::SymtabError;
use crate::scope::{Scope, Slot};
use crate::symbol::{Record, ScopeId, SymbolRef};
use simpl_core::{StringInterner, ValueType};
use simpl_options::{AllocPolicy, BuildOptions};

#[derive(Debug, Default)]
pub struct SymbolTable {
    slots: Vec<Slot>,
    /// Released slot indices, reused before the arena grows.
    free: Vec<u32>,
    interner: StringInterner,
    policy: AllocPolicy,
    live: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &BuildOptions) -> Self {
        Self {
            policy: options.alloc_policy,
            ..Self::default()
        }
    }

    // ========================================================================
    // Scope lifecycle
    // ========================================================================

    /// Create a scope nested in `parent`, or a new root when `parent` is None.
    pub fn create_scope(&mut self, parent: Option<ScopeId>) -> Result<ScopeId, SymtabError> {
        if let Some(p) = parent {
            let parent_scope = self.scope_mut(p).ok_or(SymtabError::UnknownScope(p))?;
            if parent_scope.children.try_reserve(1).is_err() {
                return Err(self.exhausted("scope"));
            }
        }

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.scope = Some(Scope::new(parent));
                ScopeId { index, generation: slot.generation }
            }
            None => {
                if self.slots.try_reserve(1).is_err() {
                    return Err(self.exhausted("scope"));
                }
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, scope: Some(Scope::new(parent)) });
                ScopeId { index, generation: 0 }
            }
        };

        if let Some(p) = parent.and_then(|p| self.scope_mut(p)) {
            p.children.push(id);
        }
        self.live += 1;
        tracing::debug!(scope = %id, parent = ?parent.map(|p| p.to_string()), "created scope");
        Ok(id)
    }

    /// Mark a scope hidden. Returns false if the scope does not exist.
    ///
    /// Only the flag is recorded: lookups do not consult it, and records in a
    /// hidden scope stay reachable both through existing handles and through
    /// lexical search. Callers wanting visibility rules must apply them.
    pub fn hide(&mut self, scope: ScopeId) -> bool {
        match self.scope_mut(scope) {
            Some(s) => {
                s.hidden = true;
                tracing::warn!(scope = %scope, "hide only records a flag; lookup is unaffected");
                true
            }
            None => {
                tracing::warn!(scope = %scope, "hide on a scope that no longer exists");
                false
            }
        }
    }

    /// Release `scope` and every scope nested in it. Returns the number of
    /// scopes released (0 if `scope` was already gone).
    ///
    /// Handles into the released subtree must not be used afterwards. They
    /// resolve to nothing rather than to whatever later reuses the slots. A
    /// slot whose generation is exhausted is retired instead of reused, so a
    /// stale id can never match again.
    pub fn destroy(&mut self, scope: ScopeId) -> usize {
        let parent = match self.get(scope) {
            Some(s) => s.parent,
            None => return 0,
        };
        if let Some(p) = parent.and_then(|p| self.scope_mut(p)) {
            p.children.retain(|&child| child != scope);
        }

        let mut released = 0;
        let mut pending = vec![scope];
        while let Some(id) = pending.pop() {
            let slot = &mut self.slots[id.index()];
            if let Some(dead) = slot.scope.take() {
                match slot.generation.checked_add(1) {
                    Some(next) => {
                        slot.generation = next;
                        self.free.push(id.index);
                    }
                    None => tracing::debug!(scope = %id, "retired exhausted scope slot"),
                }
                pending.extend(dead.children);
                released += 1;
            }
        }
        self.live -= released;
        tracing::debug!(scope = %scope, released, "destroyed scope subtree");
        released
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Declare `name` in `scope`. Only `scope`'s own records are checked for
    /// a clash; enclosing scopes may declare the same name.
    pub fn insert(
        &mut self,
        scope: ScopeId,
        name: &str,
        value_type: ValueType,
    ) -> Result<SymbolRef, SymtabError> {
        let s = self.get(scope).ok_or(SymtabError::UnknownScope(scope))?;
        if let Some(existing) = self.interner.get(name) {
            if s.records.contains_key(&existing) {
                tracing::warn!(scope = %scope, name, "duplicate declaration rejected");
                return Err(SymtabError::DuplicateName { name: name.to_string() });
            }
        }

        let key = self.interner.intern(name);
        let policy = self.policy;
        let s = self.scope_mut(scope).ok_or(SymtabError::UnknownScope(scope))?;
        if s.records.try_reserve(1).is_err() {
            policy.exhausted("symbol record");
            return Err(SymtabError::OutOfMemory("symbol record"));
        }
        let (index, _) = s.records.insert_full(key, Record::new(key, value_type));
        tracing::trace!(scope = %scope, name, index, %value_type, "inserted record");
        Ok(SymbolRef { scope, index: index as u32 })
    }

    /// Find `name` among `scope`'s own records.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolRef> {
        let key = self.interner.get(name)?;
        let index = self.get(scope)?.records.get_index_of(&key)?;
        Some(SymbolRef { scope, index: index as u32 })
    }

    /// Find `name` in `scope` or the nearest enclosing scope declaring it.
    pub fn lookup_lexical(&self, scope: ScopeId, name: &str) -> Option<SymbolRef> {
        let key = self.interner.get(name)?;
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.get(id)?;
            if let Some(index) = s.records.get_index_of(&key) {
                return Some(SymbolRef { scope: id, index: index as u32 });
            }
            current = s.parent;
        }
        None
    }

    pub fn record(&self, symbol: SymbolRef) -> Option<&Record> {
        self.get(symbol.scope)?
            .records
            .get_index(symbol.index())
            .map(|(_, record)| record)
    }

    pub fn name_of(&self, symbol: SymbolRef) -> Option<&str> {
        self.record(symbol).map(|r| self.interner.resolve(r.name))
    }

    pub fn value_type_of(&self, symbol: SymbolRef) -> Option<ValueType> {
        self.record(symbol).map(|r| r.value_type)
    }

    /// Store into the record's scratch value. Returns false for a dead handle.
    pub fn set_value(&mut self, symbol: SymbolRef, value: f64) -> bool {
        let record = self
            .scope_mut(symbol.scope)
            .and_then(|s| s.records.get_index_mut(symbol.index()))
            .map(|(_, record)| record);
        match record {
            Some(r) => {
                r.value = value;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Scope queries
    // ========================================================================

    pub fn get(&self, scope: ScopeId) -> Option<&Scope> {
        self.slots
            .get(scope.index())
            .filter(|slot| slot.generation == scope.generation)
            .and_then(|slot| slot.scope.as_ref())
    }

    pub fn contains_scope(&self, scope: ScopeId) -> bool {
        self.get(scope).is_some()
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.get(scope)?.parent
    }

    pub fn children(&self, scope: ScopeId) -> &[ScopeId] {
        self.get(scope).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    pub fn is_hidden(&self, scope: ScopeId) -> bool {
        self.get(scope).is_some_and(|s| s.hidden)
    }

    /// Number of records declared directly in `scope`.
    pub fn len(&self, scope: ScopeId) -> usize {
        self.get(scope).map_or(0, Scope::len)
    }

    pub fn is_empty(&self, scope: ScopeId) -> bool {
        self.len(scope) == 0
    }

    /// Number of live scopes across all roots.
    pub fn scope_count(&self) -> usize {
        self.live
    }

    fn scope_mut(&mut self, scope: ScopeId) -> Option<&mut Scope> {
        self.slots
            .get_mut(scope.index())
            .filter(|slot| slot.generation == scope.generation)
            .and_then(|slot| slot.scope.as_mut())
    }

    fn exhausted(&self, what: &'static str) -> SymtabError {
        self.policy.exhausted(what);
        SymtabError::OutOfMemory(what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_returns_increasing_indices() {
        let mut table = SymbolTable::new();
        let root = table.create_scope(None).unwrap();

        let a = table.insert(root, "a", ValueType::Int).unwrap();
        let b = table.insert(root, "b", ValueType::Double).unwrap();
        let c = table.insert(root, "c", ValueType::Char).unwrap();

        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
        assert_eq!(table.len(root), 3);
    }

    #[test]
    fn test_duplicate_leaves_scope_unchanged() {
        let mut table = SymbolTable::new();
        let root = table.create_scope(None).unwrap();
        table.insert(root, "x", ValueType::Int).unwrap();

        let err = table.insert(root, "x", ValueType::Bool).unwrap_err();
        assert_eq!(err, SymtabError::DuplicateName { name: "x".to_string() });
        assert_eq!(table.len(root), 1);
        assert_eq!(table.value_type_of(table.lookup_local(root, "x").unwrap()), Some(ValueType::Int));
    }

    #[test]
    fn test_lookup_of_never_interned_name() {
        let mut table = SymbolTable::new();
        let root = table.create_scope(None).unwrap();
        assert!(table.lookup_local(root, "ghost").is_none());
        assert!(table.lookup_lexical(root, "ghost").is_none());
    }

    #[test]
    fn test_set_value() {
        let mut table = SymbolTable::new();
        let root = table.create_scope(None).unwrap();
        let x = table.insert(root, "x", ValueType::Double).unwrap();

        assert!(table.set_value(x, 2.5));
        assert_eq!(table.record(x).unwrap().value, 2.5);
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut table = SymbolTable::new();
        let first = table.create_scope(None).unwrap();
        let x = table.insert(first, "x", ValueType::Int).unwrap();
        table.destroy(first);

        let second = table.create_scope(None).unwrap();
        assert_eq!(second.index(), first.index());
        assert_ne!(second, first);
        table.insert(second, "x", ValueType::Bool).unwrap();

        assert!(table.record(x).is_none());
        assert!(!table.set_value(x, 1.0));
    }

    #[test]
    fn test_failed_insert_does_not_intern() {
        let mut table = SymbolTable::new();
        let root = table.create_scope(None).unwrap();
        table.insert(root, "x", ValueType::Int).unwrap();
        let stale = table.create_scope(None).unwrap();
        table.destroy(stale);

        assert_eq!(
            table.insert(stale, "never_declared", ValueType::Int),
            Err(SymtabError::UnknownScope(stale))
        );
        assert!(table.insert(root, "x", ValueType::Bool).is_err());
        assert_eq!(table.interner.len(), 1);
        assert!(table.interner.get("never_declared").is_none());
    }

    #[test]
    fn test_exhausted_generation_retires_slot() {
        let mut table = SymbolTable::new();
        let first = table.create_scope(None).unwrap();
        table.slots[first.index()].generation = u32::MAX;
        let last = ScopeId { index: first.index, generation: u32::MAX };

        assert_eq!(table.destroy(last), 1);
        assert!(table.free.is_empty());

        let next = table.create_scope(None).unwrap();
        assert_ne!(next.index(), last.index());
        assert!(!table.contains_scope(last));
        assert!(!table.contains_scope(first));
        assert_eq!(table.scope_count(), 1);
    }

    #[test]
    fn test_create_under_destroyed_parent() {
        let mut table = SymbolTable::new();
        let root = table.create_scope(None).unwrap();
        table.destroy(root);
        assert_eq!(table.create_scope(Some(root)), Err(SymtabError::UnknownScope(root)));
    }

    #[test]
    fn test_error_diagnostics() {
        let dup = SymtabError::DuplicateName { name: "n".to_string() };
        assert_eq!(dup.to_diagnostic().message_text, "Duplicate identifier 'n'.");
        assert_eq!(dup.to_diagnostic().code, 2300);

        let oom = SymtabError::OutOfMemory("scope");
        assert_eq!(oom.to_diagnostic().message_text, "Out of space while allocating scope.");
    }
}
