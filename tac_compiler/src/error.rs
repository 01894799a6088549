//! Result and errors.
use crate::{compile::SemanticError, lex::LexError, parsing::ParseError, tokens::Span};
use std::fmt::{self, Display, Formatter, Write};

pub type Result<T> = std::result::Result<T, CompileError>;

/// Failure of any stage of the pipeline.
///
/// All errors are fatal to the compilation they occur in.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Semantic(SemanticError),
}

impl CompileError {
    /// Byte offset into the source where the error was found.
    ///
    /// Semantic errors point at a construct rather than a position.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Lex(err) => Some(err.offset()),
            Self::Parse(err) => Some(err.offset()),
            Self::Semantic(_) => None,
        }
    }

    /// Render a diagnostic with the offending line of source.
    ///
    /// ```text
    /// error: unexpected character '$' at offset 4
    ///  --> 1:5
    ///   |
    /// 1 | x = $
    ///   |     ^
    /// ```
    pub fn report(&self, source: &str) -> String {
        let mut out = format!("error: {}\n", self);

        if let Some(span) = self.offset().and_then(|offset| locate(source, offset)) {
            let (line, _) = span.surrounding_line(source);
            let gutter = span.line.to_string();
            let pad = " ".repeat(gutter.len());

            // Writing to a String can't fail.
            let _ = writeln!(out, "{}--> {}:{}", pad, span.line, span.column);
            let _ = writeln!(out, "{} |", pad);
            let _ = writeln!(out, "{} | {}", gutter, line);
            let _ = writeln!(out, "{} | {}^", pad, " ".repeat(span.column - 1));
        }

        out
    }
}

/// Line and column of a byte offset, counted in characters.
fn locate(source: &str, offset: usize) -> Option<Span> {
    let before = source.get(..offset)?;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);

    Some(Span {
        start: offset,
        end: offset,
        line: before.matches('\n').count() + 1,
        column: before[line_start..].chars().count() + 1,
    })
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(err) => write!(f, "{}", err),
            Self::Parse(err) => write!(f, "{}", err),
            Self::Semantic(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Semantic(err) => Some(err),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<SemanticError> for CompileError {
    fn from(err: SemanticError) -> Self {
        CompileError::Semantic(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_locate() {
        let source = "x = 1\ny = é + $";
        let span = locate(source, source.find('$').unwrap()).unwrap();
        assert_eq!(span.line, 2);
        assert_eq!(span.column, 9);
        assert_eq!(locate(source, source.len()).unwrap().column, 10);
    }

    #[test]
    fn test_report_points_at_offset() {
        let source = "x = 1\ny = $";
        let err = CompileError::Lex(LexError::UnknownCharacter { ch: '$', offset: 10 });
        let report = err.report(source);
        let lines = report.lines().collect::<Vec<_>>();

        assert_eq!(lines[1], " --> 2:5");
        assert_eq!(lines[3], "2 | y = $");
        assert_eq!(lines[4], "  |     ^");
    }

    #[test]
    fn test_report_without_offset() {
        let err = CompileError::Semantic(SemanticError::NameError { name: "x".into() });
        assert_eq!(err.offset(), None);
        assert_eq!(err.report("print x"), format!("error: {}\n", err));
    }
}
