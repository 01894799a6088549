use smol_str::SmolStr;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Lexeme,
    pub span: Span,
}

impl Token {
    /// Byte offset of the token's first character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.span.start
    }
}

/// Source text of a token converted to its value.
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    /// Number literal without a decimal point.
    Int(i64),
    /// Number literal with a decimal point.
    Float(f64),
    /// String literal, without the surrounding quotes.
    Str(SmolStr),
    /// Identifiers, keywords, operators and punctuation.
    Text(SmolStr),
}

/// Writes the lexeme back as source code.
impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Lexeme::Int(value) => write!(f, "{}", value),
            Lexeme::Float(value) => {
                // Keep the decimal point on whole numbers so the
                // literal stays a float when lexed again.
                let text = value.to_string();
                if text.contains('.') {
                    write!(f, "{}", text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
            Lexeme::Str(value) => {
                // A string literal can't contain its own delimiter,
                // so at most one of the two quote styles occurs.
                let quote = if value.contains('"') { '\'' } else { '"' };
                write!(f, "{quote}{value}{quote}")
            }
            Lexeme::Text(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum TokenKind {
    /// Number Literal
    Number,
    /// String literal, single or double quoted.
    String,
    Ident,

    /// Identifier in the set of reserved words.
    Keyword(KeywordKind),
    Compare(CmpOp),     // == != <= >= < >
    Arith(ArithOp),     // + - * / %
    Logical(LogicalOp), // and or not

    Assign,       // =
    Colon,        // :
    Semicolon,    // ;
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Dot,          // .

    /// Newline character, used as a soft statement separator.
    Newline,

    /// End-of-source
    EOS,
}

impl TokenKind {
    /// Reclassify a word as a keyword or logical operator.
    ///
    /// Anything that isn't reserved is a user defined identifier.
    pub fn from_word(word: &str) -> Self {
        if let Ok(keyword) = KeywordKind::from_str(word) {
            TokenKind::Keyword(keyword)
        } else if let Ok(op) = LogicalOp::from_str(word) {
            TokenKind::Logical(op)
        } else {
            TokenKind::Ident
        }
    }
}

impl fmt::Display for TokenKind {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind as T;
        match self {
            T::Number       => write!(f, "number"),
            T::String       => write!(f, "string"),
            T::Ident        => write!(f, "identifier"),
            T::Keyword(kw)  => write!(f, "'{}'", kw),
            T::Compare(op)  => write!(f, "'{}'", op),
            T::Arith(op)    => write!(f, "'{}'", op),
            T::Logical(op)  => write!(f, "'{}'", op),
            T::Assign       => write!(f, "'='"),
            T::Colon        => write!(f, "':'"),
            T::Semicolon    => write!(f, "';'"),
            T::LeftParen    => write!(f, "'('"),
            T::RightParen   => write!(f, "')'"),
            T::LeftBrace    => write!(f, "'{{'"),
            T::RightBrace   => write!(f, "'}}'"),
            T::LeftBracket  => write!(f, "'['"),
            T::RightBracket => write!(f, "']'"),
            T::Comma        => write!(f, "','"),
            T::Dot          => write!(f, "'.'"),
            T::Newline      => write!(f, "newline"),
            T::EOS          => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    If,
    Else,
    While,
    For,
    Print,
}

impl KeywordKind {
    /// Keywords that close the statement list of a nested block.
    #[inline]
    pub fn ends_block(&self) -> bool {
        !matches!(self, KeywordKind::Print)
    }
}

impl fmt::Display for KeywordKind {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use KeywordKind as K;
        match self {
            K::If    => write!(f, "if"),
            K::Else  => write!(f, "else"),
            K::While => write!(f, "while"),
            K::For   => write!(f, "for"),
            K::Print => write!(f, "print"),
        }
    }
}

impl FromStr for KeywordKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use KeywordKind as K;
        match s {
            "if" => Ok(K::If),
            "else" => Ok(K::Else),
            "while" => Ok(K::While),
            "for" => Ok(K::For),
            "print" => Ok(K::Print),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl fmt::Display for CmpOp {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CmpOp::Eq        => write!(f, "=="),
            CmpOp::NotEq     => write!(f, "!="),
            CmpOp::Less      => write!(f, "<"),
            CmpOp::LessEq    => write!(f, "<="),
            CmpOp::Greater   => write!(f, ">"),
            CmpOp::GreaterEq => write!(f, ">="),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl fmt::Display for ArithOp {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
            ArithOp::Mul => write!(f, "*"),
            ArithOp::Div => write!(f, "/"),
            ArithOp::Mod => write!(f, "%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "and"),
            LogicalOp::Or => write!(f, "or"),
            LogicalOp::Not => write!(f, "not"),
        }
    }
}

impl FromStr for LogicalOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(LogicalOp::And),
            "or" => Ok(LogicalOp::Or),
            "not" => Ok(LogicalOp::Not),
            _ => Err(()),
        }
    }
}

/// Chunk of source code, encoded as starting and ending positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start position of bytes in source.
    pub start: usize,
    /// End position of bytes in source, exclusive.
    pub end: usize,
    /// Line of the first character, starting at 1.
    pub line: usize,
    /// Column of the first character, starting at 1.
    pub column: usize,
}

impl Span {
    #[inline]
    pub fn fragment<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// The whole line of source that contains the start of the span,
    /// excluding the line break.
    pub fn surrounding_line<'a>(&self, text: &'a str) -> (&'a str, Span) {
        let start = self.start.min(text.len());

        let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = text[start..]
            .find('\n')
            .map(|i| start + i)
            .unwrap_or_else(|| text.len());
        // Windows line endings.
        let line_end = if text[line_start..line_end].ends_with('\r') {
            line_end - 1
        } else {
            line_end
        };

        let line_span = Span {
            start: line_start,
            end: line_end,
            line: self.line,
            column: 1,
        };

        (&text[line_start..line_end], line_span)
    }
}
