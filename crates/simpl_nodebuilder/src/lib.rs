//! simpl_nodebuilder: AST node construction.
//!
//! The parser calls one constructor per completed grammar production,
//! passing already-built children and already-resolved symbol handles.
//! Constructors check nothing about operand types; compound nodes take the
//! value type of their left (or only) child.

use simpl_ast::{
    AssignmentNode, BinaryKind, BinaryNode, ControlFlowNode, FlowKind, Literal, LiteralNode, Node,
    OpLabel, OpLabelError, ReferenceNode, UnaryKind, UnaryNode,
};
use simpl_diagnostics::{messages, Diagnostic};
use simpl_options::BuildOptions;
use simpl_symtab::{SymbolRef, SymbolTable};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("out of space while allocating {0}")]
    OutOfMemory(&'static str),
    #[error("node budget of {max} exceeded")]
    BudgetExceeded { max: usize },
    #[error(transparent)]
    InvalidOperator(#[from] OpLabelError),
}

impl BuildError {
    /// The diagnostic a front end reports for this failure.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            BuildError::OutOfMemory(what) => {
                Diagnostic::new(&messages::OUT_OF_SPACE_WHILE_ALLOCATING_0, &[*what])
            }
            BuildError::BudgetExceeded { max } => {
                Diagnostic::new(&messages::NODE_BUDGET_OF_0_EXCEEDED, &[max.to_string().as_str()])
            }
            BuildError::InvalidOperator(OpLabelError::TooLong(op)) => Diagnostic::new(
                &messages::OPERATOR_0_IS_LONGER_THAN_1_BYTES,
                &[op.as_str(), OpLabel::CAPACITY.to_string().as_str()],
            ),
        }
    }
}

/// Allocates AST nodes under a [`BuildOptions`] policy.
#[derive(Debug, Default)]
pub struct NodeBuilder {
    options: BuildOptions,
    allocated: usize,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options, allocated: 0 }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Nodes created by this builder so far.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    // ========================================================================
    // Operators and sequences
    // ========================================================================

    /// Build a binary operator node.
    ///
    /// # Example
    /// ```
    /// use simpl_core::ValueType;
    /// use simpl_nodebuilder::NodeBuilder;
    /// let mut builder = NodeBuilder::new();
    /// let one = builder.int(1).unwrap();
    /// let half = builder.double(0.5).unwrap();
    /// let sum = builder.binary("+", one, half).unwrap();
    /// assert_eq!(sum.value_type(), Some(ValueType::Int));
    /// ```
    pub fn binary(&mut self, op: &str, left: Node, right: Node) -> Result<Node, BuildError> {
        let op = OpLabel::new(op)?;
        self.binary_node(BinaryKind::Op, op, left, right)
    }

    /// Chain two statements or expressions into a sequence.
    pub fn list(&mut self, left: Node, right: Node) -> Result<Node, BuildError> {
        self.binary_node(BinaryKind::List, OpLabel::LIST, left, right)
    }

    pub fn unary(&mut self, op: &str, operand: Node) -> Result<Node, BuildError> {
        let op = OpLabel::new(op)?;
        self.unary_node(UnaryKind::Op, op, operand)
    }

    /// Read from standard input into the expression `target`.
    pub fn input(&mut self, target: Node) -> Result<Node, BuildError> {
        self.unary_node(UnaryKind::Input, OpLabel::EMPTY, target)
    }

    pub fn output(&mut self, value: Node) -> Result<Node, BuildError> {
        self.unary_node(UnaryKind::Output, OpLabel::EMPTY, value)
    }

    fn binary_node(
        &mut self,
        kind: BinaryKind,
        op: OpLabel,
        left: Node,
        right: Node,
    ) -> Result<Node, BuildError> {
        let value_type = left.value_type();
        let node = self.alloc(
            "binary node",
            BinaryNode { kind, op, value_type, left, right },
        )?;
        tracing::trace!(?kind, %op, ?value_type, "built binary node");
        Ok(Node::Binary(node))
    }

    fn unary_node(&mut self, kind: UnaryKind, op: OpLabel, operand: Node) -> Result<Node, BuildError> {
        let value_type = operand.value_type();
        let node = self.alloc("unary node", UnaryNode { kind, op, value_type, operand })?;
        tracing::trace!(?kind, %op, ?value_type, "built unary node");
        Ok(Node::Unary(node))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    pub fn int(&mut self, value: i32) -> Result<Node, BuildError> {
        self.literal(Literal::Int(value))
    }

    pub fn double(&mut self, value: f64) -> Result<Node, BuildError> {
        self.literal(Literal::Double(value))
    }

    pub fn char(&mut self, value: char) -> Result<Node, BuildError> {
        self.literal(Literal::Char(value))
    }

    pub fn bool(&mut self, value: bool) -> Result<Node, BuildError> {
        self.literal(Literal::Bool(value))
    }

    pub fn int_array(&mut self, values: &[i32]) -> Result<Node, BuildError> {
        let payload = self.copy_slice(values)?;
        self.literal(Literal::IntArray(payload))
    }

    pub fn double_array(&mut self, values: &[f64]) -> Result<Node, BuildError> {
        let payload = self.copy_slice(values)?;
        self.literal(Literal::DoubleArray(payload))
    }

    /// A character array literal, i.e. a string.
    pub fn char_array(&mut self, value: &str) -> Result<Node, BuildError> {
        let mut payload = String::new();
        if payload.try_reserve_exact(value.len()).is_err() {
            return Err(self.exhausted("array payload"));
        }
        payload.push_str(value);
        self.literal(Literal::CharArray(payload.into_boxed_str()))
    }

    pub fn bool_array(&mut self, values: &[bool]) -> Result<Node, BuildError> {
        let payload = self.copy_slice(values)?;
        self.literal(Literal::BoolArray(payload))
    }

    fn literal(&mut self, value: Literal) -> Result<Node, BuildError> {
        let value_type = value.value_type();
        let node = self.alloc("literal node", LiteralNode { value })?;
        tracing::trace!(%value_type, "built literal node");
        Ok(Node::Literal(node))
    }

    fn copy_slice<T: Copy>(&mut self, values: &[T]) -> Result<Box<[T]>, BuildError> {
        let mut payload = Vec::new();
        if payload.try_reserve_exact(values.len()).is_err() {
            return Err(self.exhausted("array payload"));
        }
        payload.extend_from_slice(values);
        Ok(payload.into_boxed_slice())
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// Build a use of a variable.
    ///
    /// The value type is copied from the record `symbol` points to. An
    /// absent handle is accepted: the node carries no type and printers
    /// render it as a bad reference.
    pub fn reference(
        &mut self,
        table: &SymbolTable,
        symbol: Option<SymbolRef>,
    ) -> Result<Node, BuildError> {
        let value_type = symbol.and_then(|s| table.value_type_of(s));
        if symbol.is_some() && value_type.is_none() {
            tracing::warn!("reference built from a handle into a destroyed scope");
        }
        let node = self.alloc("reference node", ReferenceNode { value_type, symbol })?;
        tracing::trace!(?value_type, "built reference node");
        Ok(Node::Reference(node))
    }

    pub fn assignment(&mut self, target: Option<SymbolRef>, value: Node) -> Result<Node, BuildError> {
        let node = self.alloc("assignment node", AssignmentNode { target, value })?;
        tracing::trace!("built assignment node");
        Ok(Node::Assignment(node))
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    pub fn if_else(
        &mut self,
        condition: Node,
        then_branch: Option<Node>,
        else_branch: Option<Node>,
    ) -> Result<Node, BuildError> {
        self.flow(FlowKind::If, Some(condition), then_branch, else_branch)
    }

    pub fn while_loop(&mut self, condition: Node, body: Option<Node>) -> Result<Node, BuildError> {
        self.flow(FlowKind::While, Some(condition), body, None)
    }

    /// A function body. Signatures are not modelled.
    pub fn function(&mut self, body: Option<Node>) -> Result<Node, BuildError> {
        self.flow(FlowKind::Function, None, body, None)
    }

    fn flow(
        &mut self,
        kind: FlowKind,
        condition: Option<Node>,
        then_branch: Option<Node>,
        else_branch: Option<Node>,
    ) -> Result<Node, BuildError> {
        let node = self.alloc(
            "control flow node",
            ControlFlowNode { kind, condition, then_branch, else_branch },
        )?;
        tracing::trace!(?kind, "built control flow node");
        Ok(Node::ControlFlow(node))
    }

    /// `break` or `continue`.
    pub fn jump(&mut self) -> Result<Node, BuildError> {
        self.reserve("jump node")?;
        Ok(Node::Jump)
    }

    pub fn return_stmt(&mut self) -> Result<Node, BuildError> {
        self.reserve("return node")?;
        Ok(Node::Return)
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    fn alloc<T>(&mut self, what: &'static str, shape: T) -> Result<Box<T>, BuildError> {
        self.reserve(what)?;
        Ok(Box::new(shape))
    }

    /// Count one more node against the budget.
    fn reserve(&mut self, what: &'static str) -> Result<(), BuildError> {
        if let Some(max) = self.options.max_nodes {
            if self.allocated >= max {
                tracing::warn!(max, what, "node budget exhausted");
                self.options.alloc_policy.exhausted(what);
                return Err(BuildError::BudgetExceeded { max });
            }
        }
        self.allocated += 1;
        Ok(())
    }

    fn exhausted(&self, what: &'static str) -> BuildError {
        self.options.alloc_policy.exhausted(what);
        BuildError::OutOfMemory(what)
    }
}
