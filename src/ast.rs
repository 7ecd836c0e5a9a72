//! This module defines the expression tree produced by the reader and consumed by the
//! evaluator. A [`Node`] is either a [`Node::Leaf`] holding the raw text of an atom
//! (a number or an operator symbol, not yet classified) or a [`Node::Form`] holding a
//! parenthesized group. [`Form`] can only be built through [`Form::new`], which rejects
//! groups shorter than an operator plus two operands, so every `Form` in a tree is
//! structurally valid. Display renders a tree back to S-expression text.

use std::fmt;

/// Minimum number of children in a form: one operator and two operands
pub const MIN_FORM_LEN: usize = 3;

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single atom, stored as source text
    Leaf(String),
    /// A parenthesized group
    Form(Form),
}

/// A parenthesized group with at least [`MIN_FORM_LEN`] children.
///
/// By convention the first child names the operator and the rest are operands. Whether
/// the first child really is an operator is only checked at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    children: Vec<Node>,
}

impl Form {
    /// Build a form, returning `None` if `children` is too short
    pub fn new(children: Vec<Node>) -> Option<Self> {
        if children.len() < MIN_FORM_LEN {
            return None;
        }
        Some(Form { children })
    }

    /// The node in operator position
    pub fn head(&self) -> &Node {
        &self.children[0]
    }

    /// The nodes in operand position (never fewer than two)
    pub fn operands(&self) -> &[Node] {
        &self.children[1..]
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Node {
    pub fn leaf(text: impl Into<String>) -> Self {
        Node::Leaf(text.into())
    }

    /// The sentinel tree returned by [`crate::parse_expression`] on a syntax error
    pub fn sentinel() -> Self {
        Node::Leaf(crate::SENTINEL.to_owned())
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Node::Leaf(text) if text == crate::SENTINEL)
    }

    /// Text of a leaf, `None` for forms
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            Node::Form(_) => None,
        }
    }

    pub fn as_form(&self) -> Option<&Form> {
        match self {
            Node::Form(form) => Some(form),
            Node::Leaf(_) => None,
        }
    }

    /// Nesting depth: 0 for a leaf, 1 for a flat form
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Form(form) => 1 + form.children.iter().map(Node::depth).max().unwrap_or(0),
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Leaf(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Leaf(text)
    }
}

impl From<Form> for Node {
    fn from(form: Form) -> Self {
        Node::Form(form)
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(text) => write!(f, "{text}"),
            Node::Form(form) => write!(f, "{form}"),
        }
    }
}

/// Helper for building forms in tests, panics on a short group
#[cfg(test)]
#[expect(clippy::unwrap_used)] // test code OK
pub(crate) fn form<const N: usize>(children: [Node; N]) -> Node {
    Node::Form(Form::new(children.into()).unwrap())
}

/// Helper for building leaves in tests
#[cfg(test)]
pub(crate) fn leaf(text: &str) -> Node {
    Node::leaf(text)
}
