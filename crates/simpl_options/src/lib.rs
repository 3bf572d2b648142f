//! simpl_options: Configuration for tree construction and printing.
//!
//! Options are plain data with defaults matching the front end's historical
//! behavior: abort on resource exhaustion, no node budget, two-space indent.
//! They can be loaded from a JSON document such as:
//!
//! ```json
//! {
//!   "build": { "allocPolicy": "propagate", "maxNodes": 100000 },
//!   "printer": { "indentWidth": 2 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when allocating a node, a scope or an array payload fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocPolicy {
    /// Report and terminate the process immediately, without unwinding.
    #[default]
    Abort,
    /// Hand an out-of-memory error back to the caller.
    Propagate,
}

impl AllocPolicy {
    /// Apply the policy to an allocation of `what` that could not be satisfied.
    ///
    /// Under [`AllocPolicy::Abort`] this reports and terminates the process
    /// and never returns. Under [`AllocPolicy::Propagate`] it returns so the
    /// caller can hand back its out-of-memory error.
    pub fn exhausted(self, what: &str) {
        match self {
            AllocPolicy::Abort => {
                tracing::error!(what, "out of space");
                eprintln!("out of space: {}", what);
                std::process::abort();
            }
            AllocPolicy::Propagate => tracing::warn!(what, "out of space, propagating"),
        }
    }
}

/// Options consumed by the node builder and the symbol table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
    pub alloc_policy: AllocPolicy,
    /// Upper bound on nodes one builder may create. Exceeding it counts as
    /// resource exhaustion.
    pub max_nodes: Option<usize>,
}

/// Options consumed by the text dump and the structured serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrinterOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Line terminator.
    pub new_line: String,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            new_line: "\n".to_string(),
        }
    }
}

/// The full options document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimplOptions {
    pub build: BuildOptions,
    pub printer: PrinterOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to read options file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse an options document from a string.
pub fn parse_options(content: &str) -> Result<SimplOptions, OptionsError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse an options document from a path.
pub fn parse_options_file(path: impl AsRef<Path>) -> Result<SimplOptions, OptionsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_options(&content)
}
