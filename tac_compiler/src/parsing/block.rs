use super::{expr::Node, stmts::Stmt, Parse, ParseError};
use crate::{token_stream::TokenStream, tokens::TokenKind};

/// Sequence of statements nested in a compound statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub stmts: Vec<Node>,
}

/// Statements of a nested block, after a `:` or `)`.
///
/// The language has no indentation rules. A nested block runs
/// until a keyword that can't start a statement inside it (`if`,
/// `else`, `while`, `for`), a closing brace or end of input.
/// None of the terminators are consumed.
impl Parse for Block {
    type Output = Self;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Self, ParseError> {
        use TokenKind as T;

        let mut stmts = vec![];

        loop {
            input.skip_lines();

            match input.peek_kind() {
                T::Keyword(keyword) if keyword.ends_block() => break,
                T::RightBrace | T::EOS => break,
                _ => stmts.push(Stmt::parse(input)?),
            }
        }

        Ok(Self { stmts })
    }
}

impl Block {
    /// Block surrounded by `{` and `}`.
    ///
    /// Only the closing brace ends it, so compound
    /// statements can be nested inside.
    pub fn parse_braced(input: &mut TokenStream) -> Result<Self, ParseError> {
        use TokenKind as T;

        input.consume(T::LeftBrace)?;

        let mut stmts = vec![];

        loop {
            input.skip_lines();

            match input.peek_kind() {
                T::RightBrace | T::EOS => break,
                _ => stmts.push(Stmt::parse(input)?),
            }
        }

        input.consume(T::RightBrace)?;

        Ok(Self { stmts })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        lex::tokenize,
        parsing::{IfStmt, PrintStmt},
        tokens::KeywordKind,
    };

    fn token_stream(source: &str) -> TokenStream {
        TokenStream::new(tokenize(source).unwrap())
    }

    #[test]
    fn test_block_stops_at_keyword() {
        let mut stream = token_stream("\n  x = 1\n\n  print x\nelse:");
        let block = Block::parse(&mut stream).unwrap();
        assert_eq!(block.stmts.len(), 2);
        assert_eq!(stream.peek_kind(), TokenKind::Keyword(KeywordKind::Else));
    }

    #[test]
    fn test_braced_block_nests_compound_statements() {
        let mut stream = token_stream("{\n if x: print 1\n else: print 2\n}\nprint 3");
        let block = Block::parse_braced(&mut stream).unwrap();

        let print = |value| PrintStmt {
            value: Box::new(Node::int(value)),
        };
        let expected = Block {
            stmts: vec![Node::If(IfStmt {
                cond: Box::new(Node::var("x")),
                then_block: Block {
                    stmts: vec![Node::Print(print(1))],
                },
                else_block: Some(Block {
                    stmts: vec![Node::Print(print(2))],
                }),
            })],
        };
        assert_eq!(block, expected);
        assert_eq!(stream.peek_kind(), TokenKind::Newline);
    }

    #[test]
    fn test_unclosed_brace() {
        let mut stream = token_stream("{ x = 1");
        assert_eq!(
            Block::parse_braced(&mut stream),
            Err(ParseError::Mismatch {
                expected: TokenKind::RightBrace,
                found: TokenKind::EOS,
                offset: 7,
            })
        );
    }
}
