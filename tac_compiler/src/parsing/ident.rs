use super::{Parse, ParseError};
use crate::{
    token_stream::TokenStream,
    tokens::{Lexeme, TokenKind},
};
use smol_str::SmolStr;

/// Identifier naming a variable.
#[derive(Debug)]
pub struct Ident;

impl Parse for Ident {
    type Output = SmolStr;
    type Err = ParseError;

    #[inline]
    fn parse(input: &mut TokenStream) -> Result<SmolStr, ParseError> {
        let token = input.consume(TokenKind::Ident)?;
        match token.lexeme {
            Lexeme::Text(name) => Ok(name),
            // The lexer only produces text lexemes for identifiers.
            lexeme => Ok(SmolStr::new(lexeme.to_string())),
        }
    }
}
