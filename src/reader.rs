//! Builds expression trees from tokens.
//!
//! The reader is a recursive descent over an explicit token cursor. It reads exactly one
//! expression, enforces the minimum form length and the nesting limit from
//! [`ParseConfig`], and ignores any tokens left over. [`parse_expression`] is the lossy
//! entry point that turns every syntax error into the `ERROR` sentinel.

use log::{debug, trace};

use crate::ast::{Form, Node};
use crate::tokenizer::{Token, tokenize};
use crate::{Error, MAX_PARSE_DEPTH, SyntaxError, SyntaxErrorKind};

/// Reader settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum number of nested forms; deeper input is a syntax error
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            max_depth: MAX_PARSE_DEPTH,
        }
    }
}

/// Recursive-descent reader over a token slice.
///
/// `position` is the index of the next unconsumed token and is the only state shared
/// between recursive calls.
struct Reader<'a> {
    tokens: &'a [Token],
    position: usize,
    config: &'a ParseConfig,
}

impl<'a> Reader<'a> {
    fn new(tokens: &'a [Token], config: &'a ParseConfig) -> Self {
        Reader {
            tokens,
            position: 0,
            config,
        }
    }

    fn peek_token(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn next_token(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    /// Read the next complete expression. `depth` is the number of enclosing forms.
    fn read_expr(&mut self, depth: usize) -> Result<Node, SyntaxError> {
        let Some(token) = self.next_token() else {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedEnd,
                self.position,
                None,
            ));
        };

        match token {
            Token::OpenParen => self.read_form(depth + 1),
            Token::CloseParen => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedClosingParen,
                self.position - 1,
                Some(token.to_string()),
            )),
            Token::Atom(text) => Ok(Node::Leaf(text.clone())),
        }
    }

    /// Read the body of a form whose `(` has just been consumed
    fn read_form(&mut self, depth: usize) -> Result<Node, SyntaxError> {
        let open_position = self.position - 1;

        if depth > self.config.max_depth {
            return Err(SyntaxError::with_message(
                SyntaxErrorKind::TooDeeplyNested,
                format!(
                    "expression too deeply nested (max depth: {})",
                    self.config.max_depth
                ),
                open_position,
            ));
        }

        let mut children = Vec::new();
        loop {
            match self.peek_token() {
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnexpectedEnd,
                        self.position,
                        None,
                    ));
                }
                Some(Token::CloseParen) => break,
                Some(_) => children.push(self.read_expr(depth)?),
            }
        }

        let Some(form) = Form::new(children) else {
            return Err(SyntaxError::new(
                SyntaxErrorKind::InvalidExpression,
                open_position,
                None,
            ));
        };

        // Consume the closing paren found by peek_token
        self.position += 1;
        Ok(Node::Form(form))
    }
}

/// Read one expression from `tokens` with the default [`ParseConfig`].
///
/// Tokens after the first complete expression are ignored.
pub fn read_tokens(tokens: &[Token]) -> Result<Node, Error> {
    read_tokens_with_config(tokens, &ParseConfig::default())
}

/// Read one expression from `tokens` with an explicit configuration
pub fn read_tokens_with_config(tokens: &[Token], config: &ParseConfig) -> Result<Node, Error> {
    let mut reader = Reader::new(tokens, config);
    let node = reader.read_expr(0)?;

    let trailing = reader.remaining();
    if !trailing.is_empty() {
        debug!(
            "ignoring {} trailing token(s) after {node}, starting at '{}'",
            trailing.len(),
            trailing[0]
        );
    }

    trace!("read {node}");
    Ok(node)
}

/// Tokenize and read `input`, reporting syntax errors as they are.
pub fn read_expression(input: &str) -> Result<Node, Error> {
    read_expression_with_config(input, &ParseConfig::default())
}

/// Tokenize and read `input` with an explicit configuration
pub fn read_expression_with_config(input: &str, config: &ParseConfig) -> Result<Node, Error> {
    read_tokens_with_config(&tokenize(input), config)
}

/// Parse `input` into a tree. Never fails.
///
/// On a syntax error the tree is replaced by the sentinel leaf [`crate::SENTINEL`], so
/// the failure shows up later as `unknown operator ERROR` from the evaluator. Use
/// [`read_expression`] to see the syntax error itself.
pub fn parse_expression(input: &str) -> Node {
    parse_expression_with_config(input, &ParseConfig::default())
}

/// [`parse_expression`] with an explicit configuration
pub fn parse_expression_with_config(input: &str, config: &ParseConfig) -> Node {
    match read_expression_with_config(input, config) {
        Ok(node) => node,
        Err(err) => {
            debug!("replacing unparsable input {input:?} with sentinel: {err}");
            Node::sentinel()
        }
    }
}
