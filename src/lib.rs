//! sexpcalc - prefix arithmetic expression evaluator
//!
//! This crate parses and evaluates fully-parenthesized prefix arithmetic written as
//! S-expressions. Every operator is written first and every group is explicitly
//! parenthesized, so there is no precedence to resolve:
//!
//! ```scheme
//! (+ 10 10 10)                      ; 30
//! (+ 10 (* 5 2) (- 8 3) (/ 20 4))   ; 10 + 10 + 5 + 5 = 30
//! (/ 1 0)                           ; inf, not an error
//! ```
//!
//! ## Pipeline
//!
//! text → [`tokenizer`] → tokens → [`reader`] → [`ast::Node`] tree → [`evaluator`] → `f32`
//!
//! All arithmetic happens in single precision. A group must hold an operator plus at
//! least two operands; the reader rejects anything shorter before evaluation starts.
//!
//! ## Sentinel parsing
//!
//! [`parse_expression`] never fails. A syntax error is swallowed and replaced by the
//! leaf [`SENTINEL`], whose evaluation then fails with `unknown operator ERROR`. Callers
//! that want the precise syntax error use [`read_expression`] instead.
//!
//! ```
//! use sexpcalc::{evaluate, parse_expression, read_expression};
//!
//! let tree = parse_expression("(+ 10 (* 5 2) (- 8 3) (/ 20 4))");
//! assert_eq!(evaluate(&tree).unwrap(), 30.0);
//!
//! let err = evaluate(&parse_expression("(+ 5)")).unwrap_err();
//! assert_eq!(err.to_string(), "EvaluationError: unknown operator ERROR");
//!
//! let err = read_expression("(+ 5)").unwrap_err();
//! assert_eq!(err.to_string(), "SyntaxError: invalid expression");
//! ```
//!
//! ## Modules
//!
//! - `tokenizer`: splits text into parenthesis and atom tokens
//! - `reader`: builds the expression tree and validates its structure
//! - `ast`: the expression tree types
//! - `operators`: the closed set of arithmetic operators
//! - `evaluator`: recursive evaluation of trees to numbers

use std::fmt;

/// Maximum parsing depth to prevent stack overflow on deeply nested input
pub const MAX_PARSE_DEPTH: usize = 32;

/// Default evaluation depth. Trees read under the default [`ParseConfig`] never get near
/// it; [`evaluator::evaluate_with_config`] raises it to match a larger parse limit.
pub const MAX_EVAL_DEPTH: usize = 64;

/// Leaf text substituted for the tree when [`parse_expression`] hits a syntax error
pub const SENTINEL: &str = "ERROR";

/// Categorizes the different kinds of syntax errors raised by the reader.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SyntaxErrorKind {
    /// Input ran out before an expression was complete (empty input, unclosed parens)
    UnexpectedEnd,
    /// A `)` appeared where an expression was expected
    UnexpectedClosingParen,
    /// A group held fewer than an operator and two operands
    InvalidExpression,
    /// Nesting exceeded the configured maximum parse depth
    TooDeeplyNested,
}

impl SyntaxErrorKind {
    fn message(self) -> &'static str {
        match self {
            SyntaxErrorKind::UnexpectedEnd => "unexpected end of expression",
            SyntaxErrorKind::UnexpectedClosingParen => "unexpected closing parenthesis",
            SyntaxErrorKind::InvalidExpression => "invalid expression",
            SyntaxErrorKind::TooDeeplyNested => "expression too deeply nested",
        }
    }
}

/// A structured error describing a reader failure.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    /// Index of the token at which the failure was detected
    pub position: usize,
    /// The offending token, if there was one
    pub found: Option<String>,
}

impl SyntaxError {
    /// Create a SyntaxError with the standard message for its kind
    pub fn new(kind: SyntaxErrorKind, position: usize, found: Option<String>) -> Self {
        SyntaxError {
            kind,
            message: kind.message().to_owned(),
            position,
            found,
        }
    }

    /// Create a SyntaxError with a custom message
    pub fn with_message(kind: SyntaxErrorKind, message: impl Into<String>, position: usize) -> Self {
        SyntaxError {
            kind,
            message: message.into(),
            position,
            found: None,
        }
    }
}

/// Categorizes the different kinds of evaluation errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EvalErrorKind {
    /// The head of a form is not a known operator, or the tree is the sentinel
    UnknownOperator,
    /// An operand leaf does not parse as a number
    InvalidNumber,
    /// Evaluation recursed deeper than [`MAX_EVAL_DEPTH`]
    DepthExceeded,
}

/// A structured error describing an evaluator failure.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    /// Rendered form whose evaluation failed, attached when the failure came from a child
    pub context: Option<String>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            context: None,
        }
    }

    pub fn unknown_operator(token: impl fmt::Display) -> Self {
        Self::new(EvalErrorKind::UnknownOperator, format!("unknown operator {token}"))
    }

    pub fn invalid_number(text: &str) -> Self {
        Self::new(EvalErrorKind::InvalidNumber, format!("invalid number {text}"))
    }

    /// Attach the enclosing form, keeping the innermost one if already set
    pub(crate) fn in_context(mut self, form: impl fmt::Display) -> Self {
        if self.context.is_none() {
            self.context = Some(form.to_string());
        }
        self
    }
}

/// Error types for the calculator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SyntaxError(SyntaxError),
    EvalError(EvalError),
}

impl Error {
    /// The message without kind prefix or context
    pub fn message(&self) -> &str {
        match self {
            Error::SyntaxError(e) => &e.message,
            Error::EvalError(e) => &e.message,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::SyntaxError(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Error::EvalError(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::SyntaxError(e) => write!(f, "SyntaxError: {}", e.message),
            Error::EvalError(e) => {
                write!(f, "EvaluationError: {}", e.message)?;
                if let Some(context) = &e.context {
                    write!(f, "\n  Context: while evaluating: {context}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {}

pub mod ast;
pub mod evaluator;
pub mod operators;
pub mod reader;
pub mod tokenizer;

pub use ast::{Form, Node};
pub use evaluator::{evaluate, evaluate_with_config};
pub use operators::Operator;
pub use reader::{
    ParseConfig, parse_expression, parse_expression_with_config, read_expression,
    read_expression_with_config, read_tokens, read_tokens_with_config,
};
pub use tokenizer::{Token, tokenize};

/// Parse `input` with [`parse_expression`] and evaluate the resulting tree.
///
/// Syntax errors therefore surface as the sentinel's evaluation failure.
pub fn calculate(input: &str) -> Result<f32, Error> {
    evaluate(&parse_expression(input))
}
