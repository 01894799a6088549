mod block;
mod expr;
mod ident;
mod literal;
mod stmts;
mod unit;
mod visitor;

pub use block::*;
pub use expr::*;
pub use ident::*;
pub use literal::*;
pub use stmts::*;
pub use unit::*;
pub use visitor::*;

use crate::{token_stream::TokenStream, tokens::{Token, TokenKind}};
use log::debug;
use std::{error::Error, fmt};

pub trait Parse: Sized {
    type Output;
    type Err: Error;

    fn parse(input: &mut TokenStream) -> Result<Self::Output, Self::Err>;
}

/// Parse a whole token sequence into a program tree.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut stream = TokenStream::new(tokens);
    let program = Program::parse(&mut stream)?;
    debug!("parsed {} top level statements", program.stmts.len());
    Ok(program)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required token was not found.
    ///
    /// Premature end of input is reported with
    /// [`TokenKind::EOS`] as the found token.
    Mismatch {
        expected: TokenKind,
        found: TokenKind,
        offset: usize,
    },
    /// No expression can start with the found token.
    ExpectedTerm { found: TokenKind, offset: usize },
}

impl ParseError {
    /// Byte offset of the offending token.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Mismatch { offset, .. } | ParseError::ExpectedTerm { offset, .. } => *offset,
        }
    }
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Mismatch {
                expected,
                found,
                offset,
            } => write!(
                f,
                "encountered unexpected token {}, expected {} at offset {}",
                found, expected, offset
            ),
            ParseError::ExpectedTerm { found, offset } => {
                write!(f, "expected an expression, found {} at offset {}", found, offset)
            }
        }
    }
}
