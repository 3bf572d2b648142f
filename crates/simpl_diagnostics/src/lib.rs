//! simpl_diagnostics: Diagnostic messages handed to the front end.
//!
//! The IR core never prints user-facing errors itself. Recoverable failures
//! (a duplicate declaration, a handle into a scope that no longer exists)
//! are returned to the parser collaborator, which turns them into
//! diagnostics through this crate and reports them with its own location.

use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 2300).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with optional location and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The source file, if the reporter knows it.
    pub file: Option<String>,
    /// The 1-based source line, if the reporter knows it.
    pub line: Option<u32>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            line: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Attach the location the front end was at when the failure surfaced.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} S{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated while building a tree.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Symbol table (2300-2399)
    // ========================================================================
    pub const DUPLICATE_IDENTIFIER_0: DiagnosticMessage = diag!(2300, Error, "Duplicate identifier '{0}'.");
    pub const SCOPE_0_NO_LONGER_EXISTS: DiagnosticMessage = diag!(2301, Error, "Scope {0} no longer exists.");

    // ========================================================================
    // Node construction (2400-2499)
    // ========================================================================
    pub const OPERATOR_0_IS_LONGER_THAN_1_BYTES: DiagnosticMessage = diag!(2400, Error, "Operator '{0}' is longer than {1} bytes.");

    // ========================================================================
    // Resource exhaustion (9000-9099)
    // ========================================================================
    pub const OUT_OF_SPACE_WHILE_ALLOCATING_0: DiagnosticMessage = diag!(9000, Error, "Out of space while allocating {0}.");
    pub const NODE_BUDGET_OF_0_EXCEEDED: DiagnosticMessage = diag!(9001, Warning, "Node budget of {0} exceeded.");
}
