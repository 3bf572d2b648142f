//! simpl_symtab: Scoped symbol table.
//!
//! The parser opens a scope per block, declares variables into it and
//! resolves identifiers through the chain of enclosing scopes. Resolved
//! names are handed to the node builder as [`SymbolRef`] handles.

mod error;
mod scope;
mod symbol;
mod table;

pub use error::SymtabError;
pub use scope::Scope;
pub use symbol::{Record, ScopeId, SymbolRef};
pub use table::SymbolTable;
