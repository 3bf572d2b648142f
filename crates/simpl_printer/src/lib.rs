//! simpl_printer: AST to text output.
//!
//! Two read-only renderings of a finished tree: an indented dump with one
//! line per node ([`AstDumper`]) and a nested markup document for external
//! tools ([`XmlWriter`]). Neither mutates the tree or the symbol table.

mod dump;
mod format;
mod xml;

pub use dump::AstDumper;
pub use format::{format_double, literal_text};
pub use xml::{escape_xml, XmlWriter, XML_REPLACEMENT};

use simpl_ast::Node;
use simpl_options::PrinterOptions;
use simpl_symtab::{SymbolRef, SymbolTable};

/// Printed in place of a name when a handle is absent or points into a
/// destroyed scope.
pub const BAD_REFERENCE: &str = "(bad reference)";

/// Dump `node` with default options.
pub fn dump_ast(node: &Node, table: &SymbolTable) -> String {
    AstDumper::new(table).dump(node)
}

/// Serialize `node` with default options.
pub fn write_xml(node: &Node, table: &SymbolTable) -> String {
    XmlWriter::new(table).write(node)
}

/// Resolve a stored handle to its name, or [`BAD_REFERENCE`].
pub(crate) fn symbol_name(table: &SymbolTable, symbol: Option<SymbolRef>) -> &str {
    match symbol.and_then(|s| table.name_of(s)) {
        Some(name) => name,
        None => {
            if symbol.is_some() {
                tracing::warn!("printing a handle into a destroyed scope");
            }
            BAD_REFERENCE
        }
    }
}

/// Output buffer shared by both printers.
pub(crate) struct Writer {
    output: String,
    options: PrinterOptions,
}

impl Writer {
    pub(crate) fn new(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            options,
        }
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(crate) fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    pub(crate) fn write_indent(&mut self, level: usize) {
        let width = level * self.options.indent_width;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    /// Indent to `level`, write `s` and end the line.
    pub(crate) fn write_line(&mut self, level: usize, s: &str) {
        self.write_indent(level);
        self.write(s);
        self.write_newline();
    }

    pub(crate) fn take(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
