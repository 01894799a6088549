//! Lexical analysis (tokenizer)
use crate::tokens::{ArithOp, CmpOp, Lexeme, Span, Token, TokenKind};

use itertools::{multipeek, MultiPeek};
use log::{debug, trace};
use std::{error, fmt, iter::Iterator, str::CharIndices};

/// Tokenize the whole source up front.
///
/// The resulting vector always ends with a single [`TokenKind::EOS`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    debug!("lexed {} tokens from {} bytes", tokens.len(), source.len());
    Ok(tokens)
}

/// Write tokens back out as source code.
///
/// Whitespace is normalized and comments are lost, but lexing
/// the result again produces the same token kinds and lexemes.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut line_start = true;

    for token in tokens {
        match token.kind {
            TokenKind::Newline => {
                out.push('\n');
                line_start = true;
            }
            TokenKind::EOS => break,
            _ => {
                if !line_start {
                    out.push(' ');
                }
                out.push_str(&token.lexeme.to_string());
                line_start = false;
            }
        }
    }

    out
}

/// Log a table of the tokens in the given source.
pub fn debug_print_tokens(source: &str) {
    debug!("source byte count: {}", source.len());

    for result in Lexer::new(source) {
        match result {
            Ok(token) => {
                let fragment = match token.span.fragment(source) {
                    "\n" => "\\n",
                    fragment => fragment,
                };
                debug!(
                    "{:4}-{:<4} {:<12} {:?}",
                    token.span.start,
                    token.span.end,
                    fragment,
                    token.kind
                );
            }
            Err(err) => debug!("{}", err),
        }
    }
}

/// Lexical analyzer.
///
/// Single left-to-right scan over the source. Multi-character
/// operators are matched before their single character prefixes.
pub struct Lexer<'a> {
    pub(crate) source: SourceText<'a>,
    token_start: SourcePos,
    /// Set once end-of-source or an error has been yielded,
    /// so iteration terminates.
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source_code: &'a str) -> Self {
        Self {
            source: SourceText::new(source_code),
            token_start: SourcePos::default(),
            done: false,
        }
    }

    #[rustfmt::skip]
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        use TokenKind as T;

        loop {
            self.start_token();

            let next_char = match self.source.next_char() {
                Some(c) => c,
                // Give end-of-source its own character position.
                None => return Ok(self.make_token(T::EOS)),
            };

            match next_char {
                ' ' | '\t' | '\r' => self.consume_whitespace(),
                '#'               => self.consume_comment(),
                '\n'              => return Ok(self.make_token(T::Newline)),
                '+'               => return Ok(self.make_token(T::Arith(ArithOp::Add))),
                '-'               => return Ok(self.make_token(T::Arith(ArithOp::Sub))),
                '*'               => return Ok(self.make_token(T::Arith(ArithOp::Mul))),
                '/'               => return Ok(self.make_token(T::Arith(ArithOp::Div))),
                '%'               => return Ok(self.make_token(T::Arith(ArithOp::Mod))),
                '='               => return Ok(self.pair('=', T::Compare(CmpOp::Eq), T::Assign)),
                '<'               => return Ok(self.pair('=', T::Compare(CmpOp::LessEq), T::Compare(CmpOp::Less))),
                '>'               => return Ok(self.pair('=', T::Compare(CmpOp::GreaterEq), T::Compare(CmpOp::Greater))),
                '!'               => {
                    return if self.source.peek_char() == Some('=') {
                        self.source.next_char();
                        Ok(self.make_token(T::Compare(CmpOp::NotEq)))
                    } else {
                        Err(self.unknown_char('!'))
                    };
                }
                ':'               => return Ok(self.make_token(T::Colon)),
                ';'               => return Ok(self.make_token(T::Semicolon)),
                '('               => return Ok(self.make_token(T::LeftParen)),
                ')'               => return Ok(self.make_token(T::RightParen)),
                '{'               => return Ok(self.make_token(T::LeftBrace)),
                '}'               => return Ok(self.make_token(T::RightBrace)),
                '['               => return Ok(self.make_token(T::LeftBracket)),
                ']'               => return Ok(self.make_token(T::RightBracket)),
                ','               => return Ok(self.make_token(T::Comma)),
                '.'               => return Ok(self.make_token(T::Dot)),
                '"' | '\''        => return self.consume_string(next_char),
                '0'..='9'         => return self.consume_number(),
                '_' | 'a'..='z'
                    | 'A'..='Z'   => return Ok(self.consume_ident()),
                _                 => return Err(self.unknown_char(next_char)),
            }
        }
    }

    /// Prime the lexer state for recording a new token.
    fn start_token(&mut self) {
        self.token_start = self.source.pos();
    }

    fn make_span(&self) -> Span {
        Span {
            start: self.token_start.offset,
            end: self.source.pos().offset,
            line: self.token_start.line,
            column: self.token_start.column,
        }
    }

    fn make_token(&mut self, token_kind: TokenKind) -> Token {
        let lexeme = Lexeme::Text(self.token_fragment().into());
        self.make_token_with(token_kind, lexeme)
    }

    fn make_token_with(&mut self, token_kind: TokenKind, lexeme: Lexeme) -> Token {
        let token = Token {
            kind: token_kind,
            lexeme,
            span: self.make_span(),
        };
        trace!("{:?} {:?}", token.kind, token.lexeme);
        token
    }

    /// Two character operator when the next character matches `second`,
    /// otherwise the single character one.
    fn pair(&mut self, second: char, double: TokenKind, single: TokenKind) -> Token {
        if self.source.peek_char() == Some(second) {
            self.source.next_char();
            self.make_token(double)
        } else {
            self.make_token(single)
        }
    }

    fn unknown_char(&self, ch: char) -> LexError {
        LexError::UnknownCharacter {
            ch,
            offset: self.token_start.offset,
        }
    }

    /// Consume whitespace characters like space, tab and carriage return,
    /// until a non-whitespace character is encountered.
    ///
    /// Newline (\n) is not included because it's tokenized as a
    /// statement separator.
    fn consume_whitespace(&mut self) {
        while let Some(' ') | Some('\t') | Some('\r') = self.source.peek_char() {
            self.source.next_char();
        }
    }

    /// Erase comment up to, but not including, the trailing newline.
    fn consume_comment(&mut self) {
        while let Some(c) = self.source.peek_char() {
            if c == '\n' {
                break;
            }
            self.source.next_char();
        }
    }

    fn consume_number(&mut self) -> Result<Token, LexError> {
        while let Some('0'..='9') = self.source.peek_char() {
            self.source.next_char();
        }

        // Fractional part. Digits after the point are optional.
        let is_float = self.source.peek_char() == Some('.');
        if is_float {
            self.source.next_char();
            while let Some('0'..='9') = self.source.peek_char() {
                self.source.next_char();
            }
        }

        let fragment = self.token_fragment();
        let offset = self.token_start.offset;
        let lexeme = if is_float {
            // Too many digits parses as infinity rather than failing.
            fragment
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Lexeme::Float)
                .ok_or(LexError::InvalidNumber { offset })?
        } else {
            fragment
                .parse::<i64>()
                .map(Lexeme::Int)
                .map_err(|_| LexError::InvalidNumber { offset })?
        };

        Ok(self.make_token_with(TokenKind::Number, lexeme))
    }

    fn consume_ident(&mut self) -> Token {
        while let Some(c) = self.source.peek_char() {
            match c {
                '_' | 'a'..='z' | 'A'..='Z' | '0'..='9' => {
                    self.source.next_char();
                }
                _ => break,
            }
        }

        // If a reserved word can be parsed from the source fragment, then
        // the token is a keyword instead of a user defined identifier.
        let token_kind = TokenKind::from_word(self.token_fragment());
        self.make_token(token_kind)
    }

    /// String literals end at the first matching quote and may not
    /// cross a line break.
    fn consume_string(&mut self, quote: char) -> Result<Token, LexError> {
        let content_start = self.source.pos().offset;

        loop {
            match self.source.peek_char() {
                Some(c) if c == quote => break,
                Some('\n') | None => {
                    return Err(LexError::UnterminatedString {
                        offset: self.token_start.offset,
                    })
                }
                Some(_) => {
                    self.source.next_char();
                }
            }
        }

        let content = &self.source.original[content_start..self.source.pos().offset];
        let lexeme = Lexeme::Str(content.into());

        // Closing quote
        self.source.next_char();

        Ok(self.make_token_with(TokenKind::String, lexeme))
    }

    fn token_fragment(&self) -> &'a str {
        &self.source.original[self.token_start.offset..self.source.pos().offset]
    }
}

/// Implement `Lexer` as an interator for consuming
/// tokens lazily.
///
/// The iterator ends after yielding end-of-source, or
/// after the first error.
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.next_token();
        self.done = match &result {
            Ok(token) => token.kind == TokenKind::EOS,
            Err(_) => true,
        };
        Some(result)
    }
}

/// Wrapper for source code that keeps a cursor position.
///
/// Allows forward lookup via peeking.
pub(crate) struct SourceText<'a> {
    /// Keep reference to the source so tokens can
    /// slice fragments from it.
    pub(crate) original: &'a str,

    /// Iterator over UTF-8 encoded source code.
    ///
    /// The `MultiPeek` wrapper allows for arbitrary lookahead by consuming
    /// the iterator internally and buffering the result. This is required
    /// because UTF-8 characters are variable in width.
    ///
    /// Peeking advances the internal peek cursor by 1. The cursor offset
    /// is restored to 0 when calling `MultiPeek::next()` or
    /// `MultiPeek::reset_peek()`.
    chars: MultiPeek<CharIndices<'a>>,

    /// Position of the next character to be consumed.
    next: SourcePos,
}

impl<'a> SourceText<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            original: source,
            chars: multipeek(source.char_indices()),
            next: SourcePos::default(),
        }
    }

    #[inline]
    fn pos(&self) -> SourcePos {
        self.next.clone()
    }

    /// Advance the cursor and return the consumed character.
    fn next_char(&mut self) -> Option<char> {
        let (index, c) = self.chars.next()?;

        self.next.offset = index + c.len_utf8();
        if c == '\n' {
            self.next.line += 1;
            self.next.column = 1;
        } else {
            self.next.column += 1;
        }

        Some(c)
    }

    /// Peeks the next character in the stream without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.reset_peek();
        let c = self.chars.peek().map(|(_, c)| *c);
        self.chars.reset_peek();
        c
    }
}

#[derive(Debug, Clone)]
struct SourcePos {
    offset: usize,
    line: usize,
    column: usize,
}

impl Default for SourcePos {
    fn default() -> Self {
        SourcePos {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Character that starts no token.
    UnknownCharacter { ch: char, offset: usize },
    /// String literal without a closing quote on the same line.
    UnterminatedString { offset: usize },
    /// Number literal out of range.
    InvalidNumber { offset: usize },
}

impl LexError {
    /// Byte offset where the offending token starts.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnknownCharacter { offset, .. }
            | LexError::UnterminatedString { offset }
            | LexError::InvalidNumber { offset } => *offset,
        }
    }
}

impl error::Error for LexError {}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexError::UnknownCharacter { ch, offset } => {
                write!(f, "unexpected character {:?} at offset {}", ch, offset)
            }
            LexError::UnterminatedString { offset } => {
                write!(f, "unterminated string literal at offset {}", offset)
            }
            LexError::InvalidNumber { offset } => {
                write!(f, "number literal out of range at offset {}", offset)
            }
        }
    }
}
