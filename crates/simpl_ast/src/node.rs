//! AST node definitions.
//!
//! A [`Node`] is a two-word handle: a tag plus a box holding exactly the
//! shape its kind needs. Every child is owned by its single parent, so a
//! tree is released by one post-order walk (see [`crate::release`]).
//!
//! Dropping a tree without releasing it is also safe at any depth: the shapes
//! that own children tear them down with an explicit work list instead of
//! recursing through the generated drop glue.

use crate::types::{BinaryKind, FlowKind, NodeKind, OpLabel, UnaryKind};
use crate::visitor::{walk_node, NodeVisitor};
use simpl_core::ValueType;
use simpl_symtab::SymbolRef;
use std::mem;

// ============================================================================
// Node
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Binary(Box<BinaryNode>),
    Unary(Box<UnaryNode>),
    Literal(Box<LiteralNode>),
    Reference(Box<ReferenceNode>),
    Assignment(Box<AssignmentNode>),
    ControlFlow(Box<ControlFlowNode>),
    /// `break` or `continue`.
    Jump,
    Return,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Binary(n) => n.kind.into(),
            Node::Unary(n) => n.kind.into(),
            Node::Literal(_) => NodeKind::Const,
            Node::Reference(_) => NodeKind::Identifier,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::ControlFlow(n) => n.kind.into(),
            Node::Jump => NodeKind::Jump,
            Node::Return => NodeKind::Return,
        }
    }

    /// The resolved value type, for kinds where one is meaningful.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Node::Binary(n) => n.value_type,
            Node::Unary(n) => n.value_type,
            Node::Literal(n) => Some(n.value_type()),
            Node::Reference(n) => n.value_type,
            Node::Assignment(_) | Node::ControlFlow(_) | Node::Jump | Node::Return => None,
        }
    }

    /// Number of nodes in this tree, this one included.
    pub fn count(&self) -> usize {
        let mut counter = NodeCounter::default();
        counter.visit_node(self);
        counter.count
    }

    /// Every symbol handle stored in the tree, in pre-order.
    ///
    /// Lets a caller check that no handle points into a scope it is about
    /// to destroy.
    pub fn symbol_refs(&self) -> Vec<SymbolRef> {
        let mut collector = SymbolCollector::default();
        collector.visit_node(self);
        collector.refs
    }

    pub fn as_literal(&self) -> Option<&LiteralNode> {
        match self {
            Node::Literal(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryNode> {
        match self {
            Node::Binary(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_unary(&self) -> Option<&UnaryNode> {
        match self {
            Node::Unary(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceNode> {
        match self {
            Node::Reference(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_assignment(&self) -> Option<&AssignmentNode> {
        match self {
            Node::Assignment(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_control_flow(&self) -> Option<&ControlFlowNode> {
        match self {
            Node::ControlFlow(n) => Some(n),
            _ => None,
        }
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// Binary operator or list: two owned children.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryNode {
    pub kind: BinaryKind,
    pub op: OpLabel,
    /// Copied from `left` at construction.
    pub value_type: Option<ValueType>,
    pub left: Node,
    pub right: Node,
}

/// Unary operator, input or output: one owned child.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryNode {
    pub kind: UnaryKind,
    pub op: OpLabel,
    /// Copied from `operand` at construction.
    pub value_type: Option<ValueType>,
    pub operand: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub value: Literal,
}

/// Use of a declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceNode {
    /// Copied from the record at construction; None for an absent handle.
    pub value_type: Option<ValueType>,
    /// Non-owning. None when the parser could not resolve the name.
    pub symbol: Option<SymbolRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentNode {
    /// Non-owning handle to the assigned variable.
    pub target: Option<SymbolRef>,
    pub value: Node,
}

/// `if`, `while` or a function body.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlFlowNode {
    pub kind: FlowKind,
    /// Always present for `if` and `while`, absent for a function.
    pub condition: Option<Node>,
    /// The true branch, loop body or function body.
    pub then_branch: Option<Node>,
    /// Only ever set for `if`.
    pub else_branch: Option<Node>,
}

// ============================================================================
// Drop
// ============================================================================

/// Detach a child, leaving a payload-free placeholder that owns nothing.
fn detach(slot: &mut Node) -> Node {
    mem::replace(slot, Node::Jump)
}

/// Nodes still holding children, dropped one at a time by [`Teardown::run`].
/// Leaves are dropped as soon as they are queued, so a node whose children
/// were already detached never touches the allocator here.
#[derive(Default)]
struct Teardown {
    pending: Vec<Node>,
}

impl Teardown {
    fn queue(&mut self, child: Node) {
        match child {
            Node::Binary(_) | Node::Unary(_) | Node::Assignment(_) | Node::ControlFlow(_) => {
                self.pending.push(child)
            }
            Node::Literal(_) | Node::Reference(_) | Node::Jump | Node::Return => {}
        }
    }

    fn queue_branch(&mut self, branch: &mut Option<Node>) {
        if let Some(child) = branch.take() {
            self.queue(child);
        }
    }

    fn run(mut self) {
        while let Some(mut node) = self.pending.pop() {
            match &mut node {
                Node::Binary(n) => {
                    self.queue(detach(&mut n.right));
                    self.queue(detach(&mut n.left));
                }
                Node::Unary(n) => self.queue(detach(&mut n.operand)),
                Node::Assignment(n) => self.queue(detach(&mut n.value)),
                Node::ControlFlow(n) => {
                    self.queue_branch(&mut n.else_branch);
                    self.queue_branch(&mut n.then_branch);
                    self.queue_branch(&mut n.condition);
                }
                Node::Literal(_) | Node::Reference(_) | Node::Jump | Node::Return => {}
            }
        }
    }
}

impl Drop for BinaryNode {
    fn drop(&mut self) {
        let mut teardown = Teardown::default();
        teardown.queue(detach(&mut self.right));
        teardown.queue(detach(&mut self.left));
        teardown.run();
    }
}

impl Drop for UnaryNode {
    fn drop(&mut self) {
        let mut teardown = Teardown::default();
        teardown.queue(detach(&mut self.operand));
        teardown.run();
    }
}

impl Drop for AssignmentNode {
    fn drop(&mut self) {
        let mut teardown = Teardown::default();
        teardown.queue(detach(&mut self.value));
        teardown.run();
    }
}

impl Drop for ControlFlowNode {
    fn drop(&mut self) {
        let mut teardown = Teardown::default();
        teardown.queue_branch(&mut self.else_branch);
        teardown.queue_branch(&mut self.then_branch);
        teardown.queue_branch(&mut self.condition);
        teardown.run();
    }
}

// ============================================================================
// Literals
// ============================================================================

/// A literal's payload. The variant is the value type; there is no way to
/// hold one kind of payload while claiming another.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Double(f64),
    Char(char),
    Bool(bool),
    IntArray(Box<[i32]>),
    DoubleArray(Box<[f64]>),
    CharArray(Box<str>),
    BoolArray(Box<[bool]>),
}

impl Literal {
    pub fn value_type(&self) -> ValueType {
        match self {
            Literal::Int(_) => ValueType::Int,
            Literal::Double(_) => ValueType::Double,
            Literal::Char(_) => ValueType::Char,
            Literal::Bool(_) => ValueType::Bool,
            Literal::IntArray(_) => ValueType::IntArray,
            Literal::DoubleArray(_) => ValueType::DoubleArray,
            Literal::CharArray(_) => ValueType::CharArray,
            Literal::BoolArray(_) => ValueType::BoolArray,
        }
    }
}

impl LiteralNode {
    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    pub fn as_int(&self) -> Option<i32> {
        match self.value {
            Literal::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            Literal::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self.value {
            Literal::Char(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Literal::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match &self.value {
            Literal::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double_array(&self) -> Option<&[f64]> {
        match &self.value {
            Literal::DoubleArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_char_array(&self) -> Option<&str> {
        match &self.value {
            Literal::CharArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool_array(&self) -> Option<&[bool]> {
        match &self.value {
            Literal::BoolArray(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// Tree queries
// ============================================================================

#[derive(Default)]
struct NodeCounter {
    count: usize,
}

impl NodeVisitor for NodeCounter {
    fn visit_node(&mut self, node: &Node) {
        self.count += 1;
        walk_node(self, node);
    }
}

#[derive(Default)]
struct SymbolCollector {
    refs: Vec<SymbolRef>,
}

impl NodeVisitor for SymbolCollector {
    fn visit_reference(&mut self, node: &ReferenceNode) {
        self.refs.extend(node.symbol);
    }

    fn visit_assignment(&mut self, node: &AssignmentNode) {
        self.refs.extend(node.target);
        self.visit_node(&node.value);
    }
}
