//! Splits expression text into tokens.
//!
//! Token boundaries are whitespace, the point just after every `(` and the point just
//! before every `)`. Equivalently: put a space after each `(` and before each `)`, then
//! split on whitespace. Parentheses therefore always stand alone next to ordinary
//! atoms, and everything else between boundaries is kept verbatim as an atom:
//!
//! ```text
//! (+ 10 (* 5 2))  =>  (  +  10  (  *  5  2  )  )
//! (+1 2)          =>  (  +1  2  )
//! a(b             =>  a(  b
//! )b              =>  )b
//! ```
//!
//! No lexical validation happens here. Whether an atom is an operator or a number is
//! decided by the evaluator.

use std::fmt;

use log::trace;
use nom::{
    IResult, Parser,
    bytes::complete::{take_till, take_while},
    character::complete::char,
    combinator::{map, opt, recognize, verify},
    sequence::preceded,
};

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenParen,
    CloseParen,
    /// Operator symbol or numeric literal, stored as raw text
    Atom(String),
}

impl Token {
    /// The source text of this token
    pub fn as_str(&self) -> &str {
        match self {
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Atom(text) => text,
        }
    }

    fn from_text(text: &str) -> Self {
        match text {
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            _ => Token::Atom(text.to_owned()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

/// Skip any run of whitespace
fn parse_whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace).parse(input)
}

/// Parse one token: an optional leading `)`, a run of ordinary characters, and an
/// optional trailing `(`. At least one character is always consumed on non-empty,
/// non-whitespace input.
fn parse_token(input: &str) -> IResult<&str, Token> {
    map(
        verify(
            recognize((opt(char(')')), take_till(is_boundary), opt(char('(')))),
            |text: &str| !text.is_empty(),
        ),
        Token::from_text,
    )
    .parse(input)
}

/// Split `input` into tokens. Empty or all-whitespace input yields no tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut remaining = input;

    // parse_token only fails once nothing but whitespace is left
    while let Ok((rest, token)) = preceded(parse_whitespace, parse_token).parse(remaining) {
        tokens.push(token);
        remaining = rest;
    }

    trace!("tokenized {input:?} into {} tokens", tokens.len());
    tokens
}
