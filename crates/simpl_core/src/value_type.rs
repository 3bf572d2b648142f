//! The value kinds a sub-expression can carry.

use std::fmt;

/// Primitive and array value kinds.
///
/// Assigned once to a literal, a symbol record or a compound node and
/// never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Double,
    Char,
    Bool,
    IntArray,
    DoubleArray,
    CharArray,
    BoolArray,
}

impl ValueType {
    pub fn is_array(self) -> bool {
        matches!(
            self,
            ValueType::IntArray | ValueType::DoubleArray | ValueType::CharArray | ValueType::BoolArray
        )
    }

    /// The scalar kind stored in an array; scalars map to themselves.
    pub fn element_type(self) -> ValueType {
        match self {
            ValueType::IntArray => ValueType::Int,
            ValueType::DoubleArray => ValueType::Double,
            ValueType::CharArray => ValueType::Char,
            ValueType::BoolArray => ValueType::Bool,
            scalar => scalar,
        }
    }

    /// The array kind holding elements of this kind; arrays map to themselves.
    pub fn array_of(self) -> ValueType {
        match self {
            ValueType::Int => ValueType::IntArray,
            ValueType::Double => ValueType::DoubleArray,
            ValueType::Char => ValueType::CharArray,
            ValueType::Bool => ValueType::BoolArray,
            array => array,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.element_type() {
            ValueType::Int => "int",
            ValueType::Double => "double",
            ValueType::Char => "char",
            _ => "bool",
        };
        if self.is_array() {
            write!(f, "{}[]", keyword)
        } else {
            write!(f, "{}", keyword)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_round_trip() {
        for scalar in [ValueType::Int, ValueType::Double, ValueType::Char, ValueType::Bool] {
            assert!(!scalar.is_array());
            assert!(scalar.array_of().is_array());
            assert_eq!(scalar.array_of().element_type(), scalar);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueType::Double.to_string(), "double");
        assert_eq!(ValueType::BoolArray.to_string(), "bool[]");
        assert_eq!(ValueType::CharArray.to_string(), "char[]");
    }
}
