//! simpl_core: Leaf types shared by the simpl IR crates.
//!
//! Provides the value type domain, string interning, stack safety for deep
//! recursion and tracing initialisation.

pub mod intern;
pub mod logging;
pub mod stack;
pub mod value_type;

// Re-export commonly used types
pub use intern::{InternedString, StringInterner};
pub use logging::init_tracing;
pub use stack::ensure_sufficient_stack;
pub use value_type::ValueType;
