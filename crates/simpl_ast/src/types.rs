//! Kind tags and operator labels for AST nodes.

use std::fmt;

/// Every kind of node the parser can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    BinaryOp,
    UnaryOp,
    Assignment,
    Const,
    Identifier,
    If,
    While,
    /// `break` or `continue`.
    Jump,
    /// Expression or statement list.
    List,
    Input,
    Output,
    Return,
    Function,
}

/// The kinds sharing the two-child shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryKind {
    Op,
    List,
}

/// The kinds sharing the one-child shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryKind {
    Op,
    Input,
    Output,
}

/// The kinds sharing the condition/branches shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    If,
    While,
    /// Uses only the first branch, as the body.
    Function,
}

impl From<BinaryKind> for NodeKind {
    fn from(kind: BinaryKind) -> Self {
        match kind {
            BinaryKind::Op => NodeKind::BinaryOp,
            BinaryKind::List => NodeKind::List,
        }
    }
}

impl From<UnaryKind> for NodeKind {
    fn from(kind: UnaryKind) -> Self {
        match kind {
            UnaryKind::Op => NodeKind::UnaryOp,
            UnaryKind::Input => NodeKind::Input,
            UnaryKind::Output => NodeKind::Output,
        }
    }
}

impl From<FlowKind> for NodeKind {
    fn from(kind: FlowKind) -> Self {
        match kind {
            FlowKind::If => NodeKind::If,
            FlowKind::While => NodeKind::While,
            FlowKind::Function => NodeKind::Function,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpLabelError {
    #[error("operator '{0}' is longer than {max} bytes", max = OpLabel::CAPACITY)]
    TooLong(String),
}

const LABEL_CAPACITY: usize = 2;

/// A short operator label such as `+`, `<=` or `!`.
///
/// Holds at most [`OpLabel::CAPACITY`] bytes inline.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OpLabel {
    bytes: [u8; LABEL_CAPACITY],
    len: u8,
}

impl OpLabel {
    pub const CAPACITY: usize = LABEL_CAPACITY;

    /// The label sequences carry. Printers do not emit it as an operator.
    pub const LIST: OpLabel = OpLabel { bytes: [b'L', 0], len: 1 };

    pub const EMPTY: OpLabel = OpLabel { bytes: [0, 0], len: 0 };

    pub fn new(text: &str) -> Result<Self, OpLabelError> {
        if text.len() > Self::CAPACITY {
            return Err(OpLabelError::TooLong(text.to_string()));
        }
        let mut bytes = [0; LABEL_CAPACITY];
        bytes[..text.len()].copy_from_slice(text.as_bytes());
        Ok(Self { bytes, len: text.len() as u8 })
    }

    pub fn as_str(&self) -> &str {
        // Built only from a whole &str, so the prefix is valid UTF-8.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl TryFrom<&str> for OpLabel {
    type Error = OpLabelError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        OpLabel::new(text)
    }
}

impl fmt::Display for OpLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for OpLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpLabel({:?})", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_label_round_trip() {
        for text in ["+", "-", "<=", "==", "&&", "!"] {
            assert_eq!(OpLabel::new(text).unwrap().as_str(), text);
        }
    }

    #[test]
    fn test_op_label_too_long() {
        let err = OpLabel::new("<<=").unwrap_err();
        assert_eq!(err, OpLabelError::TooLong("<<=".to_string()));
        assert_eq!(err.to_string(), "operator '<<=' is longer than 2 bytes");
    }

    #[test]
    fn test_op_label_constants() {
        assert_eq!(OpLabel::LIST.as_str(), "L");
        assert!(OpLabel::EMPTY.is_empty());
        assert_eq!(OpLabel::default(), OpLabel::EMPTY);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(NodeKind::from(BinaryKind::List), NodeKind::List);
        assert_eq!(NodeKind::from(UnaryKind::Output), NodeKind::Output);
        assert_eq!(NodeKind::from(FlowKind::Function), NodeKind::Function);
    }
}
