//! AST visitor trait for traversing the tree.
//!
//! Provides both a `NodeVisitor` trait for customizable traversal and
//! a `for_each_child` function for generic iteration over direct children.

use crate::node::*;
use simpl_core::ensure_sufficient_stack;

/// A visitor over the AST. Default implementations walk into children,
/// left before right, condition before branches.
pub trait NodeVisitor {
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_binary(&mut self, node: &BinaryNode) {
        self.visit_node(&node.left);
        self.visit_node(&node.right);
    }

    fn visit_unary(&mut self, node: &UnaryNode) {
        self.visit_node(&node.operand);
    }

    fn visit_literal(&mut self, _node: &LiteralNode) {}

    fn visit_reference(&mut self, _node: &ReferenceNode) {}

    fn visit_assignment(&mut self, node: &AssignmentNode) {
        self.visit_node(&node.value);
    }

    fn visit_control_flow(&mut self, node: &ControlFlowNode) {
        if let Some(condition) = &node.condition {
            self.visit_node(condition);
        }
        if let Some(then_branch) = &node.then_branch {
            self.visit_node(then_branch);
        }
        if let Some(else_branch) = &node.else_branch {
            self.visit_node(else_branch);
        }
    }

    fn visit_jump(&mut self) {}

    fn visit_return(&mut self) {}
}

/// Dispatch `node` to the matching `visit_*` method.
///
/// Deep statement lists nest one level per statement, so the dispatch grows
/// the stack on demand instead of overflowing.
pub fn walk_node<V: NodeVisitor + ?Sized>(visitor: &mut V, node: &Node) {
    ensure_sufficient_stack(|| match node {
        Node::Binary(n) => visitor.visit_binary(n),
        Node::Unary(n) => visitor.visit_unary(n),
        Node::Literal(n) => visitor.visit_literal(n),
        Node::Reference(n) => visitor.visit_reference(n),
        Node::Assignment(n) => visitor.visit_assignment(n),
        Node::ControlFlow(n) => visitor.visit_control_flow(n),
        Node::Jump => visitor.visit_jump(),
        Node::Return => visitor.visit_return(),
    })
}

/// Call `f` on each direct child of `node`, in visiting order.
pub fn for_each_child<'a>(node: &'a Node, mut f: impl FnMut(&'a Node)) {
    match node {
        Node::Binary(n) => {
            f(&n.left);
            f(&n.right);
        }
        Node::Unary(n) => f(&n.operand),
        Node::Assignment(n) => f(&n.value),
        Node::ControlFlow(n) => {
            for child in [&n.condition, &n.then_branch, &n.else_branch]
                .into_iter()
                .flatten()
            {
                f(child);
            }
        }
        Node::Literal(_) | Node::Reference(_) | Node::Jump | Node::Return => {}
    }
}
