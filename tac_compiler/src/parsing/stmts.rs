//! Statement parsing.
use super::{
    block::Block,
    expr::{Condition, Expr, Node},
    ident::Ident,
    Parse, ParseError,
};
use crate::{
    token_stream::TokenStream,
    tokens::{KeywordKind, TokenKind},
};
use log::trace;
use smol_str::SmolStr;

/// Any statement.
///
/// Statements that aren't introduced by a keyword are
/// expressions, which covers assignment.
#[derive(Debug)]
pub struct Stmt;

/// Assignment of an expression's value to a variable.
///
/// Recognised both as a statement and as a term, so assignments
/// can appear inside expressions.
///
/// # Example
///
/// ```text
/// y = x + 10
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: SmolStr,
    pub value: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Box<Node>,
}

/// # Example
///
/// ```text
/// if x == 5:
///     y = 1
/// else:
///     y = 2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Box<Node>,
    pub then_block: Block,
    pub else_block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub cond: Box<Node>,
    pub body: Block,
}

/// # Example
///
/// ```text
/// for (i = 0; i < 3; i = i + 1)
///     print i
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Box<Node>,
    pub cond: Box<Node>,
    pub update: Box<Node>,
    pub body: Block,
}

impl Parse for Stmt {
    type Output = Node;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Node, ParseError> {
        use KeywordKind as K;
        use TokenKind as T;

        let node = match input.peek_kind() {
            T::Keyword(K::Print) => PrintStmt::parse(input).map(Node::Print)?,
            T::Keyword(K::If) => IfStmt::parse(input).map(Node::If)?,
            T::Keyword(K::While) => WhileStmt::parse(input).map(Node::While)?,
            T::Keyword(K::For) => ForStmt::parse(input).map(Node::For)?,
            T::Ident if input.peek_second_kind() == T::Assign => {
                Assignment::parse(input).map(Node::Assign)?
            }
            // Expression statement
            _ => Expr::parse(input)?,
        };

        trace!("statement: {:?}", node);

        Ok(node)
    }
}

impl Parse for Assignment {
    type Output = Self;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Self, ParseError> {
        let target = Ident::parse(input)?;
        input.consume(TokenKind::Assign)?;
        let value = Expr::parse(input)?;

        Ok(Self {
            target,
            value: Box::new(value),
        })
    }
}

impl Parse for PrintStmt {
    type Output = Self;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Self, ParseError> {
        input.consume(TokenKind::Keyword(KeywordKind::Print))?;
        let value = Expr::parse(input)?;

        Ok(Self {
            value: Box::new(value),
        })
    }
}

impl Parse for IfStmt {
    type Output = Self;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Self, ParseError> {
        input.consume(TokenKind::Keyword(KeywordKind::If))?;
        let cond = Condition::parse(input)?;
        input.consume(TokenKind::Colon)?;
        let then_block = Block::parse(input)?;

        let else_block = if input.match_token(TokenKind::Keyword(KeywordKind::Else)) {
            input.consume(TokenKind::Colon)?;
            Some(Block::parse(input)?)
        } else {
            None
        };

        Ok(Self {
            cond: Box::new(cond),
            then_block,
            else_block,
        })
    }
}

impl Parse for WhileStmt {
    type Output = Self;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Self, ParseError> {
        input.consume(TokenKind::Keyword(KeywordKind::While))?;
        let cond = Condition::parse(input)?;
        input.consume(TokenKind::Colon)?;
        let body = Block::parse(input)?;

        Ok(Self {
            cond: Box::new(cond),
            body,
        })
    }
}

impl Parse for ForStmt {
    type Output = Self;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Self, ParseError> {
        input.consume(TokenKind::Keyword(KeywordKind::For))?;
        input.consume(TokenKind::LeftParen)?;
        let init = Stmt::parse(input)?;
        input.consume(TokenKind::Semicolon)?;
        let cond = Condition::parse(input)?;
        input.consume(TokenKind::Semicolon)?;
        let update = Stmt::parse(input)?;
        input.consume(TokenKind::RightParen)?;

        // Colon is optional, for symmetry with `if` and `while`.
        input.match_token(TokenKind::Colon);
        let body = Block::parse(input)?;

        Ok(Self {
            init: Box::new(init),
            cond: Box::new(cond),
            update: Box::new(update),
            body,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{lex::tokenize, parsing::BinOp};

    fn parse_stmt(source: &str) -> Result<Node, ParseError> {
        let mut stream = TokenStream::new(tokenize(source).unwrap());
        Stmt::parse(&mut stream)
    }

    #[test]
    fn test_assignment_paths_agree() {
        // Statement path
        let stmt = parse_stmt("y = x + 10").unwrap();

        // Term path, through a parenthesised expression.
        let term = match parse_stmt("(y = x + 10)").unwrap() {
            node @ Node::Assign(_) => node,
            other => panic!("expected assignment, found {:?}", other),
        };

        let expected = Node::assign("y", Node::binary(Node::var("x"), BinOp::Add, Node::int(10)));
        assert_eq!(stmt, expected);
        assert_eq!(term, expected);
    }

    #[test]
    fn test_print() {
        assert_eq!(
            parse_stmt("print \"hi\""),
            Ok(Node::Print(PrintStmt {
                value: Box::new(Node::String("hi".into())),
            }))
        );
    }

    #[test]
    fn test_if_else() {
        let node = parse_stmt("if x == 5:\n    y = 1\nelse:\n    y = 2").unwrap();
        let expected = Node::If(IfStmt {
            cond: Box::new(Node::binary(Node::var("x"), BinOp::Eq, Node::int(5))),
            then_block: Block {
                stmts: vec![Node::assign("y", Node::int(1))],
            },
            else_block: Some(Block {
                stmts: vec![Node::assign("y", Node::int(2))],
            }),
        });
        assert_eq!(node, expected);
    }

    #[test]
    fn test_while_body_runs_to_next_keyword() {
        let node = parse_stmt("while x < 3:\n    print x\n    x = x + 1\nif x: print 0").unwrap();
        match node {
            Node::While(stmt) => assert_eq!(stmt.body.stmts.len(), 2),
            other => panic!("expected while, found {:?}", other),
        }
    }

    #[test]
    fn test_for() {
        let node = parse_stmt("for (i = 0; i < 3; i = i + 1)\n    print i").unwrap();
        let expected = Node::For(ForStmt {
            init: Box::new(Node::assign("i", Node::int(0))),
            cond: Box::new(Node::binary(Node::var("i"), BinOp::Less, Node::int(3))),
            update: Box::new(Node::assign(
                "i",
                Node::binary(Node::var("i"), BinOp::Add, Node::int(1)),
            )),
            body: Block {
                stmts: vec![Node::Print(PrintStmt {
                    value: Box::new(Node::var("i")),
                })],
            },
        });
        assert_eq!(node, expected);
    }

    #[test]
    fn test_if_missing_colon() {
        assert_eq!(
            parse_stmt("if x == 1\n  y = 2"),
            Err(ParseError::Mismatch {
                expected: TokenKind::Colon,
                found: TokenKind::Newline,
                offset: 9,
            })
        );
    }

    #[test]
    fn test_for_premature_end() {
        assert_eq!(
            parse_stmt("for (i = 0; i < 3"),
            Err(ParseError::Mismatch {
                expected: TokenKind::Semicolon,
                found: TokenKind::EOS,
                offset: 17,
            })
        );
    }
}
