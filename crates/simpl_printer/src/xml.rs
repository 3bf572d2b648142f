//! Structured serialization.
//!
//! Leaves become `<value name="...">` elements, operators and statements
//! become `<node type="...">` elements wrapping their children. Control-flow
//! nodes wrap each part in a named section:
//!
//! ```text
//! <node type="LOOP">
//!   <node type="CONDITION">
//!     <value name="BOOL">1</value>
//!   </node>
//!   <node type="LOOP_BODY">
//!     <value name="JUMP"></value>
//!   </node>
//! </node>
//! ```
//!
//! An assignment has no wrapper: it emits its `=` operator, target and value
//! at its own level. The output is a sequence of elements with no root.

use crate::format::literal_text;
use crate::{symbol_name, Writer};
use simpl_ast::{BinaryKind, ControlFlowNode, FlowKind, Literal, Node, UnaryKind};
use simpl_core::ensure_sufficient_stack;
use simpl_options::PrinterOptions;
use simpl_symtab::SymbolTable;
use std::borrow::Cow;
use std::io;

/// Stands in for characters XML 1.0 cannot carry, even as references.
pub const XML_REPLACEMENT: char = '\u{FFFD}';

/// Escape text for use inside an element or a quoted attribute.
///
/// Tab, line feed and carriage return become character references so they
/// survive attribute normalization. Every other C0 control character, and
/// the noncharacters U+FFFE and U+FFFF, are replaced by [`XML_REPLACEMENT`].
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => escaped.push(XML_REPLACEMENT),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'' | '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

pub struct XmlWriter<'t> {
    writer: Writer,
    table: &'t SymbolTable,
}

impl<'t> XmlWriter<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self::with_options(table, PrinterOptions::default())
    }

    pub fn with_options(table: &'t SymbolTable, options: PrinterOptions) -> Self {
        Self {
            writer: Writer::new(options),
            table,
        }
    }

    /// Serialize a tree to a string.
    pub fn write(&mut self, node: &Node) -> String {
        self.write_node(node, 0);
        self.writer.take()
    }

    /// Serialize a tree into `sink`.
    pub fn write_to<W: io::Write>(&mut self, node: &Node, sink: &mut W) -> io::Result<()> {
        let text = self.write(node);
        sink.write_all(text.as_bytes())
    }

    fn write_node(&mut self, node: &Node, level: usize) {
        ensure_sufficient_stack(|| match node {
            Node::Literal(n) => {
                let text = literal_text(&n.value);
                self.value(level, literal_tag(&n.value), &text);
            }
            Node::Jump => self.value(level, "JUMP", ""),
            Node::Return => self.writer.write_line(level, "<node type=\"RETURN\"></node>"),
            Node::Reference(n) => {
                let name = symbol_name(self.table, n.symbol);
                self.value(level, "VARIABLE", name);
            }
            Node::Binary(n) => {
                let element = match n.kind {
                    BinaryKind::Op => "binary_op",
                    BinaryKind::List => "stmt_list",
                };
                self.open(level, element);
                if n.kind == BinaryKind::Op {
                    self.value(level + 1, "OP", n.op.as_str());
                }
                self.write_node(&n.left, level + 1);
                self.write_node(&n.right, level + 1);
                self.close(level);
            }
            Node::Unary(n) => {
                match n.kind {
                    UnaryKind::Op => {
                        self.open(level, "UNOP");
                        self.value(level + 1, "OP", n.op.as_str());
                    }
                    UnaryKind::Input => self.open(level, "INPUT"),
                    UnaryKind::Output => self.open(level, "OUTPUT"),
                }
                self.write_node(&n.operand, level + 1);
                self.close(level);
            }
            Node::Assignment(n) => {
                let name = symbol_name(self.table, n.target);
                self.value(level, "OP", "=");
                self.value(level, "VARIABLE", name);
                self.write_node(&n.value, level);
            }
            Node::ControlFlow(n) => self.write_control_flow(n, level),
        })
    }

    fn write_control_flow(&mut self, node: &ControlFlowNode, level: usize) {
        match node.kind {
            FlowKind::If => {
                self.open(level, "IF");
                self.section(level + 1, "CONDITION", node.condition.as_ref());
                self.section(level + 1, "IF_TRUE", node.then_branch.as_ref());
                self.section(level + 1, "IF_FALSE", node.else_branch.as_ref());
                self.close(level);
            }
            FlowKind::While => {
                self.open(level, "LOOP");
                self.section(level + 1, "CONDITION", node.condition.as_ref());
                self.section(level + 1, "LOOP_BODY", node.then_branch.as_ref());
                self.close(level);
            }
            FlowKind::Function => {
                self.open(level, "FUNC");
                if let Some(body) = &node.then_branch {
                    self.write_node(body, level + 1);
                }
                self.close(level);
            }
        }
    }

    /// A named wrapper around one part of a control-flow node. Absent parts
    /// emit no section.
    fn section(&mut self, level: usize, name: &str, child: Option<&Node>) {
        if let Some(child) = child {
            self.open(level, name);
            self.write_node(child, level + 1);
            self.close(level);
        }
    }

    fn open(&mut self, level: usize, node_type: &str) {
        self.writer.write_line(level, &format!("<node type=\"{}\">", node_type));
    }

    fn close(&mut self, level: usize) {
        self.writer.write_line(level, "</node>");
    }

    fn value(&mut self, level: usize, name: &str, text: &str) {
        let line = format!("<value name=\"{}\">{}</value>", name, escape_xml(text));
        self.writer.write_line(level, &line);
    }
}

/// Element name for a literal. Double arrays share the scalar `DOUBLE` name
/// for compatibility with existing consumers.
fn literal_tag(literal: &Literal) -> &'static str {
    match literal {
        Literal::Int(_) => "INT",
        Literal::Double(_) | Literal::DoubleArray(_) => "DOUBLE",
        Literal::Char(_) | Literal::CharArray(_) => "STRING",
        Literal::Bool(_) => "BOOL",
        Literal::IntArray(_) => "INT ARRAY",
        Literal::BoolArray(_) => "BOOL ARRAY",
    }
}
