use super::{
    block::Block,
    ident::Ident,
    literal::{Literal, Number},
    stmts::{Assignment, ForStmt, IfStmt, PrintStmt, WhileStmt},
    Parse, ParseError,
};
use crate::{
    token_stream::TokenStream,
    tokens::{ArithOp, CmpOp, LogicalOp, TokenKind},
};
use smol_str::SmolStr;
use std::fmt;

/// Syntax tree node.
///
/// Statements and expressions share one node type, because
/// assignments and braced blocks may appear in either position.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(Number),
    String(SmolStr),
    Variable(SmolStr),
    Binary(BinaryOp),
    Assign(Assignment),
    Print(PrintStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    /// Statements surrounded by `{` and `}`
    Block(Block),
}

impl Node {
    #[inline]
    pub fn int(value: i64) -> Self {
        Node::Number(Number::Int(value))
    }

    #[inline]
    pub fn var(name: &str) -> Self {
        Node::Variable(name.into())
    }

    pub fn binary(lhs: Node, operator: BinOp, rhs: Node) -> Self {
        Node::Binary(BinaryOp {
            lhs: Box::new(lhs),
            operator,
            rhs: Box::new(rhs),
        })
    }

    pub fn assign(target: &str, value: Node) -> Self {
        Node::Assign(Assignment {
            target: target.into(),
            value: Box::new(value),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub lhs: Box<Node>,
    pub operator: BinOp,
    pub rhs: Box<Node>,
}

/// Binary operator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
}

impl BinOp {
    pub const ALL: [BinOp; 13] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Mod,
        BinOp::Eq,
        BinOp::NotEq,
        BinOp::Less,
        BinOp::LessEq,
        BinOp::Greater,
        BinOp::GreaterEq,
        BinOp::And,
        BinOp::Or,
    ];

    /// Operator that chains terms in an expression.
    ///
    /// `not` is a logical operator, but not a binary one.
    #[rustfmt::skip]
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use TokenKind as T;
        match kind {
            T::Arith(ArithOp::Add)       => Some(BinOp::Add),
            T::Arith(ArithOp::Sub)       => Some(BinOp::Sub),
            T::Arith(ArithOp::Mul)       => Some(BinOp::Mul),
            T::Arith(ArithOp::Div)       => Some(BinOp::Div),
            T::Arith(ArithOp::Mod)       => Some(BinOp::Mod),
            T::Compare(op)               => Some(BinOp::from(op)),
            T::Logical(LogicalOp::And)   => Some(BinOp::And),
            T::Logical(LogicalOp::Or)    => Some(BinOp::Or),
            _ => None,
        }
    }

    #[inline]
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::NotEq | BinOp::Less | BinOp::LessEq | BinOp::Greater | BinOp::GreaterEq
        )
    }

    #[inline]
    pub fn is_logical(&self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    /// Source code spelling.
    #[rustfmt::skip]
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add       => "+",
            BinOp::Sub       => "-",
            BinOp::Mul       => "*",
            BinOp::Div       => "/",
            BinOp::Mod       => "%",
            BinOp::Eq        => "==",
            BinOp::NotEq     => "!=",
            BinOp::Less      => "<",
            BinOp::LessEq    => "<=",
            BinOp::Greater   => ">",
            BinOp::GreaterEq => ">=",
            BinOp::And       => "and",
            BinOp::Or        => "or",
        }
    }

    /// Mnemonic used in the textual IR.
    #[rustfmt::skip]
    pub fn opcode(&self) -> &'static str {
        match self {
            BinOp::Add       => "ADD",
            BinOp::Sub       => "SUB",
            BinOp::Mul       => "MUL",
            BinOp::Div       => "DIV",
            BinOp::Mod       => "MOD",
            BinOp::Eq        => "EQ",
            BinOp::NotEq     => "NE",
            BinOp::Less      => "LT",
            BinOp::LessEq    => "LE",
            BinOp::Greater   => "GT",
            BinOp::GreaterEq => "GE",
            BinOp::And       => "AND",
            BinOp::Or        => "OR",
        }
    }

    pub fn from_opcode(opcode: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.opcode() == opcode)
    }
}

impl From<CmpOp> for BinOp {
    #[rustfmt::skip]
    fn from(op: CmpOp) -> Self {
        match op {
            CmpOp::Eq        => BinOp::Eq,
            CmpOp::NotEq     => BinOp::NotEq,
            CmpOp::Less      => BinOp::Less,
            CmpOp::LessEq    => BinOp::LessEq,
            CmpOp::Greater   => BinOp::Greater,
            CmpOp::GreaterEq => BinOp::GreaterEq,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Expression of terms chained by operators.
///
/// There is no precedence. Operators associate strictly
/// left to right, so `1 + 2 * 3` is `(1 + 2) * 3`.
#[derive(Debug)]
pub struct Expr;

impl Parse for Expr {
    type Output = Node;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Node, ParseError> {
        let mut lhs = Term::parse(input)?;

        while let Some(operator) = BinOp::from_token(input.peek_kind()) {
            input.next_token();
            let rhs = Term::parse(input)?;
            lhs = Node::binary(lhs, operator, rhs);
        }

        Ok(lhs)
    }
}

/// Condition of an `if`, `while` or `for`.
///
/// The flat expression loop already chains comparison
/// operators, so a condition is parsed as an expression.
/// `a < b == c` is `(a < b) == c`.
#[derive(Debug)]
pub struct Condition;

impl Parse for Condition {
    type Output = Node;
    type Err = ParseError;

    #[inline]
    fn parse(input: &mut TokenStream) -> Result<Node, ParseError> {
        Expr::parse(input)
    }
}

/// Single operand of an expression.
#[derive(Debug)]
pub struct Term;

impl Parse for Term {
    type Output = Node;
    type Err = ParseError;

    fn parse(input: &mut TokenStream) -> Result<Node, ParseError> {
        use TokenKind as T;

        // A term may continue on the next line.
        input.skip_lines();

        match input.peek_kind() {
            T::Number | T::String => Literal::parse(input),
            T::Ident => {
                if input.peek_second_kind() == T::Assign {
                    Assignment::parse(input).map(Node::Assign)
                } else {
                    Ident::parse(input).map(Node::Variable)
                }
            }
            T::LeftParen => {
                input.consume(T::LeftParen)?;
                let expr = Expr::parse(input)?;
                input.consume(T::RightParen)?;
                Ok(expr)
            }
            T::LeftBracket => {
                input.consume(T::LeftBracket)?;
                let expr = Expr::parse(input)?;
                input.consume(T::RightBracket)?;
                Ok(expr)
            }
            T::LeftBrace => Block::parse_braced(input).map(Node::Block),
            found => Err(ParseError::ExpectedTerm {
                found,
                offset: input.peek().offset(),
            }),
        }
    }
}
