//! Compilation unit.
use super::{expr::Node, stmts::Stmt, Parse, ParseError};
use crate::{token_stream::TokenStream, tokens::TokenKind};

/// Root of the syntax tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<Node>,
}

impl Parse for Program {
    type Output = Self;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Self, ParseError> {
        let mut stmts = vec![];

        loop {
            // Empty lines
            input.skip_lines();

            match input.peek_kind() {
                TokenKind::EOS => break,
                _ => stmts.push(Stmt::parse(input)?),
            }
        }

        Ok(Program { stmts })
    }
}
