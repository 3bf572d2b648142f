//! Tree deallocation.
//!
//! A tree is released in one post-order pass: children first (right before
//! left, else before then before condition), then the node's own storage.

use crate::node::*;
use crate::types::NodeKind;
use simpl_core::ensure_sufficient_stack;
use std::mem;

/// Release `node` and everything it owns. Returns the number of nodes freed.
pub fn release(node: Node) -> usize {
    release_with(node, |_| {})
}

/// Like [`release`], calling `on_release` with each node's kind just before
/// that node's storage is freed.
pub fn release_with(node: Node, mut on_release: impl FnMut(NodeKind)) -> usize {
    let released = release_node(node, &mut on_release);
    tracing::debug!(released, "released tree");
    released
}

fn release_node(node: Node, on_release: &mut dyn FnMut(NodeKind)) -> usize {
    ensure_sufficient_stack(|| {
        let kind = node.kind();
        let children = match node {
            Node::Binary(mut n) => {
                let right = release_node(take(&mut n.right), on_release);
                let left = release_node(take(&mut n.left), on_release);
                on_release(kind);
                drop(n);
                right + left
            }
            Node::Unary(mut n) => {
                let operand = release_node(take(&mut n.operand), on_release);
                on_release(kind);
                drop(n);
                operand
            }
            Node::Assignment(mut n) => {
                let value = release_node(take(&mut n.value), on_release);
                on_release(kind);
                drop(n);
                value
            }
            Node::ControlFlow(mut n) => {
                let mut freed = 0;
                for branch in [&mut n.else_branch, &mut n.then_branch, &mut n.condition] {
                    if let Some(child) = branch.take() {
                        freed += release_node(child, on_release);
                    }
                }
                on_release(kind);
                drop(n);
                freed
            }
            Node::Literal(n) => {
                on_release(kind);
                drop(n);
                0
            }
            Node::Reference(n) => {
                on_release(kind);
                drop(n);
                0
            }
            Node::Jump | Node::Return => {
                on_release(kind);
                0
            }
        };
        children + 1
    })
}

fn take(slot: &mut Node) -> Node {
    mem::replace(slot, Node::Jump)
}
