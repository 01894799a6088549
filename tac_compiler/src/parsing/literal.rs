//! Literal values.
use super::{expr::Node, Parse, ParseError};
use crate::{
    token_stream::TokenStream,
    tokens::{Lexeme, TokenKind},
};
use std::fmt;

/// Number literal, keeping the integer or float
/// form it was written in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{}", value),
            Number::Float(value) => fmt::Display::fmt(&Lexeme::Float(*value), f),
        }
    }
}

/// Number or string literal.
#[derive(Debug)]
pub struct Literal;

impl Parse for Literal {
    type Output = Node;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Node, ParseError> {
        use TokenKind as T;

        let token = input.peek();
        let (kind, offset) = (token.kind, token.offset());

        match kind {
            T::Number | T::String => match input.next_token().lexeme {
                Lexeme::Int(value) => Ok(Node::Number(Number::Int(value))),
                Lexeme::Float(value) => Ok(Node::Number(Number::Float(value))),
                Lexeme::Str(value) | Lexeme::Text(value) => Ok(Node::String(value)),
            },
            found => Err(ParseError::ExpectedTerm { found, offset }),
        }
    }
}
