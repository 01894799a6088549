pub mod compile;
mod error;
pub mod lex;
pub mod parsing;
pub mod token_stream;
pub mod tokens;

pub use self::error::{CompileError, Result};

use self::compile::Instr;
use log::debug;

pub mod prelude {
    pub use super::{
        compile::{listing, Instr, Label, Operand, Temp},
        compile_str, compile_with,
        error::{CompileError, Result},
        CompileConf,
    };
}

/// Compiler configuration parameters.
#[derive(Debug, Clone)]
pub struct CompileConf {
    /// Run semantic analysis before generating code.
    ///
    /// When disabled, an invalid program still produces
    /// well-formed but meaningless code.
    pub check: bool,
}

impl Default for CompileConf {
    fn default() -> Self {
        Self { check: true }
    }
}

/// Compile source text into intermediate code.
pub fn compile_str(source: &str) -> Result<Vec<Instr>> {
    compile_with(source, CompileConf::default())
}

/// Compile source text into intermediate code, with options.
///
/// Each call owns its own tree, environment and counters,
/// so separate calls never influence each other's output.
pub fn compile_with(source: &str, conf: CompileConf) -> Result<Vec<Instr>> {
    // Lexical analysis
    let tokens = lex::tokenize(source)?;

    // Syntactic analysis
    let program = parsing::parse(tokens)?;

    // Semantic analysis
    if conf.check {
        compile::Analyzer::new().analyze(&program)?;
    } else {
        debug!("semantic analysis skipped");
    }

    // Code generation
    Ok(compile::IrGen::new().generate(&program))
}
