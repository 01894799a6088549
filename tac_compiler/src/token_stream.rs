//! Buffered stream of tokens for look ahead.
use crate::{
    parsing::ParseError,
    tokens::{Lexeme, Span, Token, TokenKind},
};

use itertools::{multipeek, MultiPeek};
use std::{iter::Iterator, vec};

/// Buffered stream of tokens that allows arbitrary look ahead.
///
/// The peek methods always start from the current cursor, so they
/// are idempotent. Once the stream is exhausted it keeps returning
/// the end-of-source token.
pub struct TokenStream {
    tokens: MultiPeek<vec::IntoIter<Token>>,
    /// Returned when the underlying tokens run out.
    eos: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eos = match tokens.last() {
            Some(token) if token.kind == TokenKind::EOS => token.clone(),
            last => {
                // Hand built token lists may omit the terminator.
                let (start, line, column) = last
                    .map(|t| (t.span.end, t.span.line, t.span.column + (t.span.end - t.span.start)))
                    .unwrap_or((0, 1, 1));
                Token {
                    kind: TokenKind::EOS,
                    lexeme: Lexeme::Text("".into()),
                    span: Span {
                        start,
                        end: start,
                        line,
                        column,
                    },
                }
            }
        };

        Self {
            tokens: multipeek(tokens),
            eos,
        }
    }

    /// Return the current token without advancing the cursor.
    pub fn peek(&mut self) -> &Token {
        self.tokens.reset_peek();
        match self.tokens.peek() {
            Some(token) => token,
            None => &self.eos,
        }
    }

    #[inline]
    pub fn peek_kind(&mut self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the token after the current one.
    pub fn peek_second_kind(&mut self) -> TokenKind {
        self.tokens.reset_peek();
        self.tokens.peek();
        let kind = self.tokens.peek().map(|t| t.kind).unwrap_or(TokenKind::EOS);
        self.tokens.reset_peek();
        kind
    }

    /// Consumes the current token regardless of type.
    ///
    /// At the end of the stream this keeps returning end-of-source.
    #[inline]
    pub fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => token,
            None => self.eos.clone(),
        }
    }

    /// Consumes the current token if it matches the given token type.
    ///
    /// Returns true when matched. Does not consume the token if the
    /// types do not match.
    pub fn match_token(&mut self, token_kind: TokenKind) -> bool {
        let is_match = self.peek_kind() == token_kind;
        if is_match {
            self.next_token();
        }
        is_match
    }

    /// Return the current token and advance the cursor.
    ///
    /// The consumed token must match the given token type, otherwise
    /// a mismatch error is returned and the token is left in place.
    pub fn consume(&mut self, token_kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.peek();
        if token.kind != token_kind {
            return Err(ParseError::Mismatch {
                expected: token_kind,
                found: token.kind,
                offset: token.offset(),
            });
        }

        Ok(self.next_token())
    }

    /// Consumes zero or more new lines until something else is reached.
    pub fn skip_lines(&mut self) {
        while self.match_token(TokenKind::Newline) {}
    }
}
