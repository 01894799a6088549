//! Semantic analysis and intermediate code generation.
mod analyzer;
mod codegen;
mod ir;
mod symbol;

pub use analyzer::{Analyzer, SemanticError};
pub use codegen::IrGen;
pub use ir::{listing, parse_listing, Instr, IrParseError, Label, Operand, Temp};
pub use symbol::{TypeEnv, ValueType};
