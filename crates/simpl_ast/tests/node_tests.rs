//! Node model tests: shapes, kinds, typed payload readers and traversal.

use pretty_assertions::assert_eq;
use simpl_ast::*;
use simpl_core::ValueType;
use simpl_symtab::SymbolTable;

fn literal(value: Literal) -> Node {
    Node::Literal(Box::new(LiteralNode { value }))
}

fn binary(kind: BinaryKind, op: &str, left: Node, right: Node) -> Node {
    Node::Binary(Box::new(BinaryNode {
        kind,
        op: OpLabel::new(op).unwrap(),
        value_type: left.value_type(),
        left,
        right,
    }))
}

// ============================================================================
// Kinds and value types
// ============================================================================

#[test]
fn test_kind_follows_shape_sub_kind() {
    let list = binary(BinaryKind::List, "L", Node::Jump, Node::Return);
    assert_eq!(list.kind(), NodeKind::List);

    let output = Node::Unary(Box::new(UnaryNode {
        kind: UnaryKind::Output,
        op: OpLabel::EMPTY,
        value_type: None,
        operand: literal(Literal::Int(3)),
    }));
    assert_eq!(output.kind(), NodeKind::Output);

    let func = Node::ControlFlow(Box::new(ControlFlowNode {
        kind: FlowKind::Function,
        condition: None,
        then_branch: Some(Node::Return),
        else_branch: None,
    }));
    assert_eq!(func.kind(), NodeKind::Function);
    assert_eq!(func.value_type(), None);
}

#[test]
fn test_literal_type_comes_from_payload() {
    let cases = [
        (Literal::Int(7), ValueType::Int),
        (Literal::Double(0.5), ValueType::Double),
        (Literal::Char('q'), ValueType::Char),
        (Literal::Bool(true), ValueType::Bool),
        (Literal::IntArray(vec![1, 2].into()), ValueType::IntArray),
        (Literal::DoubleArray(vec![1.5].into()), ValueType::DoubleArray),
        (Literal::CharArray("hi".into()), ValueType::CharArray),
        (Literal::BoolArray(vec![false].into()), ValueType::BoolArray),
    ];
    for (value, expected) in cases {
        assert_eq!(literal(value).value_type(), Some(expected));
    }
}

#[test]
fn test_typed_readers_reject_other_payloads() {
    let node = literal(Literal::Double(2.25));
    let lit = node.as_literal().unwrap();

    assert_eq!(lit.as_double(), Some(2.25));
    assert_eq!(lit.as_int(), None);
    assert_eq!(lit.as_double_array(), None);

    let node = literal(Literal::CharArray("abc".into()));
    let lit = node.as_literal().unwrap();
    assert_eq!(lit.as_char_array(), Some("abc"));
    assert_eq!(lit.as_char(), None);
}

#[test]
fn test_binary_type_is_left_childs() {
    let tree = binary(
        BinaryKind::Op,
        "+",
        literal(Literal::Char('a')),
        literal(Literal::Double(1.0)),
    );
    assert_eq!(tree.value_type(), Some(ValueType::Char));
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_count_includes_every_branch() {
    let tree = Node::ControlFlow(Box::new(ControlFlowNode {
        kind: FlowKind::If,
        condition: Some(literal(Literal::Bool(true))),
        then_branch: Some(binary(BinaryKind::List, "L", Node::Jump, Node::Return)),
        else_branch: Some(Node::Jump),
    }));
    assert_eq!(tree.count(), 6);
}

#[test]
fn test_for_each_child_order() {
    let tree = Node::ControlFlow(Box::new(ControlFlowNode {
        kind: FlowKind::While,
        condition: Some(literal(Literal::Bool(false))),
        then_branch: Some(Node::Jump),
        else_branch: None,
    }));

    let mut kinds = Vec::new();
    for_each_child(&tree, |child| kinds.push(child.kind()));
    assert_eq!(kinds, vec![NodeKind::Const, NodeKind::Jump]);
}

#[test]
fn test_symbol_refs_collects_targets_and_references() {
    let mut table = SymbolTable::new();
    let scope = table.create_scope(None).unwrap();
    let x = table.insert(scope, "x", ValueType::Int).unwrap();
    let y = table.insert(scope, "y", ValueType::Int).unwrap();

    let read_y = Node::Reference(Box::new(ReferenceNode {
        value_type: Some(ValueType::Int),
        symbol: Some(y),
    }));
    let unresolved = Node::Reference(Box::new(ReferenceNode { value_type: None, symbol: None }));
    let tree = Node::Assignment(Box::new(AssignmentNode {
        target: Some(x),
        value: binary(BinaryKind::Op, "+", read_y, unresolved),
    }));

    assert_eq!(tree.symbol_refs(), vec![x, y]);
}

#[test]
fn test_custom_visitor_sees_operators() {
    struct Ops(Vec<String>);

    impl NodeVisitor for Ops {
        fn visit_binary(&mut self, node: &BinaryNode) {
            self.0.push(node.op.to_string());
            self.visit_node(&node.left);
            self.visit_node(&node.right);
        }

        fn visit_unary(&mut self, node: &UnaryNode) {
            self.0.push(node.op.to_string());
            self.visit_node(&node.operand);
        }
    }

    let neg = Node::Unary(Box::new(UnaryNode {
        kind: UnaryKind::Op,
        op: OpLabel::new("-").unwrap(),
        value_type: Some(ValueType::Int),
        operand: literal(Literal::Int(1)),
    }));
    let tree = binary(
        BinaryKind::Op,
        "<=",
        neg,
        binary(BinaryKind::Op, "*", literal(Literal::Int(2)), literal(Literal::Int(3))),
    );

    let mut ops = Ops(Vec::new());
    ops.visit_node(&tree);
    assert_eq!(ops.0, vec!["<=", "-", "*"]);
}

// ============================================================================
// Dropping
// ============================================================================

fn deep_list(depth: usize) -> Node {
    let mut tree = Node::Jump;
    for _ in 0..depth {
        tree = binary(BinaryKind::List, "L", tree, Node::Return);
    }
    tree
}

#[test]
fn test_drop_deep_list_without_release() {
    let tree = deep_list(200_000);
    assert_eq!(tree.count(), 400_001);
    drop(tree);
}

#[test]
fn test_drop_deep_mixed_shapes() {
    let mut tree = literal(Literal::Int(0));
    for i in 0..50_000 {
        tree = match i % 4 {
            0 => Node::Unary(Box::new(UnaryNode {
                kind: UnaryKind::Op,
                op: OpLabel::new("-").unwrap(),
                value_type: Some(ValueType::Int),
                operand: tree,
            })),
            1 => Node::Assignment(Box::new(AssignmentNode { target: None, value: tree })),
            2 => Node::ControlFlow(Box::new(ControlFlowNode {
                kind: FlowKind::If,
                condition: Some(literal(Literal::Bool(true))),
                then_branch: Some(tree),
                else_branch: Some(Node::Jump),
            })),
            _ => binary(BinaryKind::Op, "+", literal(Literal::Int(1)), tree),
        };
    }
    drop(tree);
}
