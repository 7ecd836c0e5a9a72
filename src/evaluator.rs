//! Recursive evaluation of expression trees to `f32`.
//!
//! Recursion is bounded: [`evaluate`] stops at [`MAX_EVAL_DEPTH`] levels, and
//! [`evaluate_with_config`] raises that bound so that any tree the reader accepted under
//! the same [`ParseConfig`] can be evaluated.

use log::trace;

use crate::ast::{Form, Node};
use crate::operators::Operator;
use crate::reader::ParseConfig;
use crate::{EvalError, EvalErrorKind, Error, MAX_EVAL_DEPTH, SENTINEL};

/// Evaluate an expression tree (public API)
///
/// A bare leaf evaluates to the number it spells. The sentinel produced by
/// [`crate::parse_expression`] on a syntax error fails as an unknown operator.
pub fn evaluate(node: &Node) -> Result<f32, Error> {
    evaluate_with_limit(node, MAX_EVAL_DEPTH)
}

/// Evaluate a tree read under `config`.
///
/// The depth limit is at least one level past `config.max_depth`, so reader output is
/// never rejected for depth.
pub fn evaluate_with_config(node: &Node, config: &ParseConfig) -> Result<f32, Error> {
    evaluate_with_limit(node, MAX_EVAL_DEPTH.max(config.max_depth.saturating_add(1)))
}

fn evaluate_with_limit(node: &Node, max_depth: usize) -> Result<f32, Error> {
    if node.is_sentinel() {
        return Err(EvalError::unknown_operator(SENTINEL).into());
    }

    let value = eval_with_depth_tracking(node, 0, max_depth)?;
    trace!("{node} => {value:?}");
    Ok(value)
}

/// Evaluate a node with depth tracking to prevent stack overflow
fn eval_with_depth_tracking(
    node: &Node,
    depth: usize,
    max_depth: usize,
) -> Result<f32, EvalError> {
    if depth >= max_depth {
        return Err(EvalError::new(
            EvalErrorKind::DepthExceeded,
            format!("evaluation depth limit exceeded (max: {max_depth})"),
        ));
    }

    match node {
        Node::Leaf(text) => parse_number(text),
        Node::Form(form) => eval_form(form, depth, max_depth),
    }
}

/// Evaluate a form: resolve the head, evaluate operands left to right, apply.
///
/// Failures inside an operand are returned with this form attached as context.
fn eval_form(form: &Form, depth: usize, max_depth: usize) -> Result<f32, EvalError> {
    let operator = resolve_operator(form.head())?;
    let operands =
        eval_operands(form.operands(), depth, max_depth).map_err(|err| err.in_context(form))?;

    let value = operator.apply(&operands);
    trace!("({operator} {operands:?}) => {value:?}");
    Ok(value)
}

/// Helper function to evaluate a list of operand expressions with depth tracking
fn eval_operands(
    operands: &[Node],
    depth: usize,
    max_depth: usize,
) -> Result<Vec<f32>, EvalError> {
    operands
        .iter()
        .map(|operand| eval_with_depth_tracking(operand, depth + 1, max_depth))
        .collect()
}

/// The head of a form must be a leaf naming one of the four operators
fn resolve_operator(head: &Node) -> Result<Operator, EvalError> {
    match head {
        Node::Leaf(symbol) => {
            Operator::from_symbol(symbol).ok_or_else(|| EvalError::unknown_operator(symbol))
        }
        Node::Form(inner) => Err(EvalError::unknown_operator(inner)),
    }
}

/// Parse a numeric literal.
///
/// Literals need at least one digit: `inf`, `infinity` and `NaN` are rejected, while a
/// digit-bearing literal that overflows `f32` (`1e39`) still yields infinity.
fn parse_number(text: &str) -> Result<f32, EvalError> {
    text.parse::<f32>()
        .ok()
        .filter(|_| text.bytes().any(|b| b.is_ascii_digit()))
        .ok_or_else(|| EvalError::invalid_number(text))
}
