//! Three-address intermediate representation.
use crate::{parsing::BinOp, tokens::Lexeme};
use smol_str::SmolStr;
use std::{error, fmt, str::FromStr};

/// Generator assigned name holding an intermediate result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temp(pub u32);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i64),
    Float(f64),
    Str(SmolStr),
    Var(SmolStr),
    Temp(Temp),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Int(value) => write!(f, "{}", value),
            Operand::Float(value) => fmt::Display::fmt(&Lexeme::Float(*value), f),
            Operand::Str(value) => {
                write!(f, "\"")?;
                for c in value.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
            Operand::Var(name) => fmt::Display::fmt(&VarName(name), f),
            Operand::Temp(temp) => write!(f, "{}", temp),
        }
    }
}

/// Variable name as written in the textual form.
///
/// Names spelled like a temporary get a `$` prefix,
/// so `$T1` is the variable and `T1` the temporary.
struct VarName<'a>(&'a str);

impl<'a> fmt::Display for VarName<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.parse::<Temp>().is_ok() {
            write!(f, "${}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Intermediate representation.
///
/// One instruction per line of the textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// `STORE value -> target`
    /// Copy a value into a variable.
    Store { value: Operand, target: SmolStr },
    /// `ADD lhs rhs -> T1`
    /// Apply an operator, writing the result into a fresh temporary.
    Binary {
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
        result: Temp,
    },
    /// `L1:`
    Label(Label),
    /// `GOTO L1`
    Goto(Label),
    /// `IF cond GOTO L1`
    /// Jump when the condition is true.
    IfGoto { cond: Operand, label: Label },
    /// `IFNOT cond GOTO L1`
    /// Jump when the condition is false.
    IfNotGoto { cond: Operand, label: Label },
    /// `PRINT value`
    Print(Operand),
}

impl Instr {
    /// Label this instruction jumps to, if any.
    pub fn jump_target(&self) -> Option<Label> {
        match self {
            Instr::Goto(label) | Instr::IfGoto { label, .. } | Instr::IfNotGoto { label, .. } => Some(*label),
            _ => None,
        }
    }
}

/// Outputs instruction in its textual form.
impl fmt::Display for Instr {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instr::Store { value, target }         => write!(f, "STORE {} -> {}", value, VarName(target)),
            Instr::Binary { op, lhs, rhs, result } => write!(f, "{} {} {} -> {}", op.opcode(), lhs, rhs, result),
            Instr::Label(label)                    => write!(f, "{}:", label),
            Instr::Goto(label)                     => write!(f, "GOTO {}", label),
            Instr::IfGoto { cond, label }          => write!(f, "IF {} GOTO {}", cond, label),
            Instr::IfNotGoto { cond, label }       => write!(f, "IFNOT {} GOTO {}", cond, label),
            Instr::Print(value)                    => write!(f, "PRINT {}", value),
        }
    }
}

/// Render an instruction sequence, one per line.
///
/// Labels are flush left and everything else is indented.
pub fn listing(code: &[Instr]) -> String {
    let mut out = String::new();
    for instr in code {
        if !matches!(instr, Instr::Label(_)) {
            out.push_str("    ");
        }
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}

/// Read back a listing produced by [`listing`].
///
/// Blank lines are skipped.
pub fn parse_listing(text: &str) -> Result<Vec<Instr>, IrParseError> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(Instr::from_str)
        .collect()
}

impl FromStr for Instr {
    type Err = IrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| IrParseError {
            text: s.trim().to_owned(),
            reason,
        };
        let words = split_words(s).ok_or_else(|| err("unterminated string"))?;
        let words = words.iter().map(|w| w.as_str()).collect::<Vec<_>>();

        match words.as_slice() {
            [label] if label.ends_with(':') => label[..label.len() - 1]
                .parse::<Label>()
                .map(Instr::Label)
                .map_err(|_| err("invalid label")),
            ["STORE", value, "->", target] => Ok(Instr::Store {
                value: parse_operand(value).ok_or_else(|| err("invalid operand"))?,
                target: parse_var_name(target).ok_or_else(|| err("invalid target"))?,
            }),
            ["GOTO", label] => label.parse().map(Instr::Goto).map_err(|_| err("invalid label")),
            ["IF", cond, "GOTO", label] => Ok(Instr::IfGoto {
                cond: parse_operand(cond).ok_or_else(|| err("invalid operand"))?,
                label: label.parse().map_err(|_| err("invalid label"))?,
            }),
            ["IFNOT", cond, "GOTO", label] => Ok(Instr::IfNotGoto {
                cond: parse_operand(cond).ok_or_else(|| err("invalid operand"))?,
                label: label.parse().map_err(|_| err("invalid label"))?,
            }),
            ["PRINT", value] => parse_operand(value)
                .map(Instr::Print)
                .ok_or_else(|| err("invalid operand")),
            [opcode, lhs, rhs, "->", result] => Ok(Instr::Binary {
                op: BinOp::from_opcode(opcode).ok_or_else(|| err("unknown opcode"))?,
                lhs: parse_operand(lhs).ok_or_else(|| err("invalid operand"))?,
                rhs: parse_operand(rhs).ok_or_else(|| err("invalid operand"))?,
                result: result.parse().map_err(|_| err("invalid temporary"))?,
            }),
            _ => Err(err("unknown instruction")),
        }
    }
}

impl FromStr for Label {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('L')
            .and_then(parse_counter)
            .map(Label)
            .ok_or(())
    }
}

impl FromStr for Temp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('T')
            .and_then(parse_counter)
            .map(Temp)
            .ok_or(())
    }
}

fn parse_counter(digits: &str) -> Option<u32> {
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

fn parse_operand(word: &str) -> Option<Operand> {
    let first = word.chars().next()?;

    if let Some(quoted) = word.strip_prefix('"') {
        return quoted
            .strip_suffix('"')
            .and_then(unescape)
            .map(|s| Operand::Str(s.into()));
    }

    if first.is_ascii_digit() || (first == '-' && word.len() > 1) {
        return if word.contains('.') {
            word.parse().ok().map(Operand::Float)
        } else {
            word.parse().ok().map(Operand::Int)
        };
    }

    if let Ok(temp) = word.parse::<Temp>() {
        return Some(Operand::Temp(temp));
    }

    parse_var_name(word).map(Operand::Var)
}

/// Inverse of [`VarName`].
fn parse_var_name(word: &str) -> Option<SmolStr> {
    let (name, escaped) = match word.strip_prefix('$') {
        Some(name) => (name, true),
        None => (word, false),
    };

    let first = name.chars().next()?;
    let is_name = (first == '_' || first.is_ascii_alphabetic())
        && name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric());
    // An escape is only written for names that need one.
    let is_temp = name.parse::<Temp>().is_ok();

    (is_name && escaped == is_temp).then(|| SmolStr::new(name))
}

fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                c @ ('"' | '\\') => out.push(c),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }

    Some(out)
}

/// Split on whitespace, keeping quoted strings whole.
///
/// Returns `None` when a string is left open.
fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = vec![];
    let mut chars = line.trim().chars();
    let mut word = String::new();

    while let Some(c) = chars.next() {
        match c {
            '"' if word.is_empty() => {
                word.push(c);
                loop {
                    let c = chars.next()?;
                    word.push(c);
                    match c {
                        '\\' => word.push(chars.next()?),
                        '"' => break,
                        _ => {}
                    }
                }
            }
            c if c.is_whitespace() => {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            }
            c => word.push(c),
        }
    }

    if !word.is_empty() {
        words.push(word);
    }

    Some(words)
}

/// Error returned when a line of text isn't a valid instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrParseError {
    pub text: String,
    pub reason: &'static str,
}

impl error::Error for IrParseError {}

impl fmt::Display for IrParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: '{}'", self.reason, self.text)
    }
}
