//! Indented text dump.
//!
//! One line per node, children one level deeper than their parent. Branch
//! labels of control-flow nodes sit at the child level and the branch itself
//! one level below its label:
//!
//! ```text
//! flow - if
//!   bnumber 1
//!   true-branch
//!     goto
//! ```
//!
//! Control characters in names and literals are written as their escape
//! sequences (`\n`, `\t`, `\u{1}`), so no payload can break a line.

use crate::format::literal_text;
use crate::{symbol_name, Writer};
use simpl_ast::{ControlFlowNode, FlowKind, Literal, LiteralNode, Node, UnaryKind};
use simpl_core::ensure_sufficient_stack;
use simpl_options::PrinterOptions;
use simpl_symtab::SymbolTable;
use std::borrow::Cow;
use std::io;

pub struct AstDumper<'t> {
    writer: Writer,
    table: &'t SymbolTable,
}

impl<'t> AstDumper<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self::with_options(table, PrinterOptions::default())
    }

    pub fn with_options(table: &'t SymbolTable, options: PrinterOptions) -> Self {
        Self {
            writer: Writer::new(options),
            table,
        }
    }

    /// Dump a tree to a string.
    pub fn dump(&mut self, node: &Node) -> String {
        self.print_node(Some(node), 0);
        self.writer.take()
    }

    /// Dump a tree into `sink`.
    pub fn dump_to<W: io::Write>(&mut self, node: &Node, sink: &mut W) -> io::Result<()> {
        let text = self.dump(node);
        sink.write_all(text.as_bytes())
    }

    fn print_node(&mut self, node: Option<&Node>, level: usize) {
        ensure_sufficient_stack(|| {
            self.writer.write_indent(level);
            let Some(node) = node else {
                self.line("NULL");
                return;
            };
            let level = level + 1;

            match node {
                Node::Literal(n) => {
                    let text = format!("{} {}", literal_label(n), literal_text(&n.value));
                    self.line(&text);
                }
                Node::Jump => self.line("goto"),
                Node::Return => self.line("return Expression"),
                Node::Reference(n) => {
                    let name = symbol_name(self.table, n.symbol);
                    self.line(&format!("ref {}", name));
                }
                // Sequences print as operators with their `L` label.
                Node::Binary(n) => {
                    self.line(&format!("binop {}", n.op));
                    self.print_node(Some(&n.left), level);
                    self.print_node(Some(&n.right), level);
                }
                Node::Unary(n) => {
                    match n.kind {
                        UnaryKind::Op => self.line(&format!("unop {}", n.op)),
                        UnaryKind::Input => self.line("vox"),
                        UnaryKind::Output => self.line("wouf"),
                    }
                    self.print_node(Some(&n.operand), level);
                }
                Node::Assignment(n) => {
                    let name = symbol_name(self.table, n.target);
                    self.line(&format!("= {}", name));
                    self.print_node(Some(&n.value), level);
                }
                Node::ControlFlow(n) => self.print_control_flow(n, level),
            }
        })
    }

    fn print_control_flow(&mut self, node: &ControlFlowNode, level: usize) {
        match node.kind {
            FlowKind::If => {
                self.line("flow - if");
                self.print_node(node.condition.as_ref(), level);
                self.print_branch("true-branch", node.then_branch.as_ref(), level);
                self.print_branch("false-branch", node.else_branch.as_ref(), level);
            }
            FlowKind::While => {
                self.line("flow - while");
                self.print_node(node.condition.as_ref(), level);
                self.print_branch("loop-body", node.then_branch.as_ref(), level);
            }
            FlowKind::Function => {
                self.line("flow - func");
                self.print_node(node.then_branch.as_ref(), level);
            }
        }
    }

    /// Absent branches print nothing, not even their label.
    fn print_branch(&mut self, label: &str, branch: Option<&Node>, level: usize) {
        if let Some(branch) = branch {
            self.writer.write_line(level, label);
            self.print_node(Some(branch), level + 1);
        }
    }

    fn line(&mut self, text: &str) {
        self.writer.write(&printable(text));
        self.writer.write_newline();
    }
}

fn printable(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if c.is_control() {
            escaped.extend(c.escape_debug());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

fn literal_label(node: &LiteralNode) -> &'static str {
    match node.value {
        Literal::Int(_) => "inumber",
        Literal::Double(_) => "dnumber",
        Literal::Char(_) => "cnumber",
        Literal::Bool(_) => "bnumber",
        Literal::IntArray(_) => "iarraynumber",
        Literal::DoubleArray(_) => "darraynumber",
        Literal::CharArray(_) => "carraynumber",
        Literal::BoolArray(_) => "barraynumber",
    }
}
