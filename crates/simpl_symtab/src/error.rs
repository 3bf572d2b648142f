use crate::symbol::ScopeId;
use simpl_diagnostics::{messages, Diagnostic};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymtabError {
    #[error("duplicate identifier '{name}'")]
    DuplicateName { name: String },
    #[error("scope {0} no longer exists")]
    UnknownScope(ScopeId),
    #[error("out of space while allocating {0}")]
    OutOfMemory(&'static str),
}

impl SymtabError {
    /// The diagnostic a front end reports for this failure.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SymtabError::DuplicateName { name } => {
                Diagnostic::new(&messages::DUPLICATE_IDENTIFIER_0, &[name.as_str()])
            }
            SymtabError::UnknownScope(scope) => {
                Diagnostic::new(&messages::SCOPE_0_NO_LONGER_EXISTS, &[scope.to_string().as_str()])
            }
            SymtabError::OutOfMemory(what) => {
                Diagnostic::new(&messages::OUT_OF_SPACE_WHILE_ALLOCATING_0, &[*what])
            }
        }
    }
}
