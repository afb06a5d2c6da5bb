//! # Generic Document Nodes
//!
//! Untyped representation of anything the parser does not model
//! specifically. Unrecognized assignments and classes are kept as [`Node`]
//! trees so they survive a parse/format round trip unchanged.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::ast::{AssignNode, Node, Value};
//!
//! let node = Node::Assign(AssignNode::new("mainLight", false, Value::String("Sun".into())));
//! assert_eq!(node.name(), "mainLight");
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// VALUE
// =============================================================================

/// A literal value on the right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Numeric literal.
    Number(f64),
    /// Quoted string literal (unescaped contents).
    String(String),
    /// Bare identifier such as `none` or `$STR_name`.
    Ident(String),
    /// Brace-delimited array, possibly nested.
    Array(Vec<Value>),
}

impl Value {
    /// Returns the number if this is a numeric literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text of a string or identifier literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

// =============================================================================
// NODES
// =============================================================================

/// A generic document node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// `name = value;` or `name[] = value;`
    Assign(AssignNode),
    /// `class Name : Base { ... };`
    Class(ClassNode),
}

impl Node {
    /// Name of the assigned field or declared class.
    pub fn name(&self) -> &str {
        match self {
            Self::Assign(a) => &a.name,
            Self::Class(c) => &c.name,
        }
    }
}

impl From<AssignNode> for Node {
    fn from(node: AssignNode) -> Self {
        Self::Assign(node)
    }
}

impl From<ClassNode> for Node {
    fn from(node: ClassNode) -> Self {
        Self::Class(node)
    }
}

/// An assignment that was not recognized as a known field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignNode {
    /// Field name as written.
    pub name: String,
    /// Declared with the `[]` suffix.
    pub is_array: bool,
    /// Assigned value.
    pub value: Value,
}

impl AssignNode {
    /// Create a new assignment node.
    pub fn new(name: impl Into<String>, is_array: bool, value: Value) -> Self {
        Self {
            name: name.into(),
            is_array,
            value,
        }
    }
}

/// A class block that was not recognized as a known shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    /// Class name as written.
    pub name: String,
    /// Base class, empty when absent.
    pub base: String,
    /// Body in source order.
    pub body: Vec<Node>,
}

impl ClassNode {
    /// Create a new class node.
    pub fn new(name: impl Into<String>, base: impl Into<String>, body: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            body,
        }
    }

    /// Whether the class declares a base.
    pub fn has_base(&self) -> bool {
        !self.base.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::Ident("none".into()).as_str(), Some("none"));
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Number(1.0).as_str(), None);
        let array = Value::Array(vec![Value::Number(1.0)]);
        assert_eq!(array.as_array().map(<[Value]>::len), Some(1));
    }

    #[test]
    fn test_node_name() {
        let class: Node = ClassNode::new("Light", "", Vec::new()).into();
        assert_eq!(class.name(), "Light");
        let assign: Node = AssignNode::new("x", true, Value::Array(Vec::new())).into();
        assert_eq!(assign.name(), "x");
    }

    #[test]
    fn test_class_has_base() {
        assert!(ClassNode::new("Stage1", "Base", Vec::new()).has_base());
        assert!(!ClassNode::new("Stage1", "", Vec::new()).has_base());
    }
}
