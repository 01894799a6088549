use super::symbol::{TypeEnv, ValueType};
use crate::parsing::{
    AstVisitor, Assignment, BinOp, BinaryOp, Block, ForStmt, IfStmt, Number, PrintStmt, Program, WhileStmt,
};
use log::{debug, trace};
use smol_str::SmolStr;
use std::{error, fmt};

/// Checks that variables are assigned before they are read, and
/// that both operands of a binary operation have the same type.
///
/// The walk is pre-order and left to right. Branches and loop
/// bodies are always visited, whether they would run or not, so
/// an assignment in any branch makes the name visible to all
/// statements after it.
pub struct Analyzer {
    env: TypeEnv,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            env: TypeEnv::default(),
        }
    }

    /// Analyze the whole program, returning the types of
    /// all variables after their final assignment.
    pub fn analyze(mut self, program: &Program) -> Result<TypeEnv, SemanticError> {
        self.program(program)?;
        debug!("analyzed {} variables", self.env.len());
        Ok(self.env)
    }
}

impl Default for Analyzer {
    #[inline]
    fn default() -> Self {
        Analyzer::new()
    }
}

impl AstVisitor for Analyzer {
    type Output = Result<ValueType, SemanticError>;

    fn number(&mut self, _number: &Number) -> Self::Output {
        Ok(ValueType::Number)
    }

    fn string(&mut self, _value: &str) -> Self::Output {
        Ok(ValueType::Text)
    }

    /// When an expression reads a variable, we ensure
    /// that it has been assigned.
    fn variable(&mut self, name: &str) -> Self::Output {
        self.env.get(name).ok_or_else(|| SemanticError::NameError { name: name.into() })
    }

    fn binary(&mut self, expr: &BinaryOp) -> Self::Output {
        let left = self.node(&expr.lhs)?;
        let right = self.node(&expr.rhs)?;

        // A value-less operand never type checks, even against
        // another value-less operand.
        if left != right || left == ValueType::Unknown {
            return Err(SemanticError::TypeError {
                left,
                operator: expr.operator,
                right,
            });
        }

        trace!("binary operation '{}' between {} operands", expr.operator, left);

        if expr.operator.is_comparison() || expr.operator.is_logical() {
            Ok(ValueType::Number)
        } else {
            Ok(left)
        }
    }

    fn assign(&mut self, stmt: &Assignment) -> Self::Output {
        // Right-hand side is checked before the name is bound,
        // so `x = x + 1` requires an earlier `x`.
        let ty = self.node(&stmt.value)?;
        trace!("assigning {} to '{}'", ty, stmt.target);
        self.env.bind(stmt.target.clone(), ty);
        Ok(ty)
    }

    fn print(&mut self, stmt: &PrintStmt) -> Self::Output {
        self.node(&stmt.value)?;
        Ok(ValueType::Unknown)
    }

    fn if_stmt(&mut self, stmt: &IfStmt) -> Self::Output {
        self.node(&stmt.cond)?;
        self.block(&stmt.then_block)?;
        if let Some(ref else_block) = stmt.else_block {
            self.block(else_block)?;
        }
        Ok(ValueType::Unknown)
    }

    fn while_stmt(&mut self, stmt: &WhileStmt) -> Self::Output {
        self.node(&stmt.cond)?;
        self.block(&stmt.body)?;
        Ok(ValueType::Unknown)
    }

    /// Parts are visited in source order, so the update
    /// is checked before the body.
    fn for_stmt(&mut self, stmt: &ForStmt) -> Self::Output {
        self.node(&stmt.init)?;
        self.node(&stmt.cond)?;
        self.node(&stmt.update)?;
        self.block(&stmt.body)?;
        Ok(ValueType::Unknown)
    }

    /// The value of a block is the value of its last statement.
    fn block(&mut self, block: &Block) -> Self::Output {
        let mut last = ValueType::Unknown;
        for stmt in &block.stmts {
            last = self.node(stmt)?;
        }
        Ok(last)
    }

    fn program(&mut self, program: &Program) -> Self::Output {
        for stmt in &program.stmts {
            self.node(stmt)?;
        }
        Ok(ValueType::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// Operands of a binary operation have different types.
    TypeError {
        left: ValueType,
        operator: BinOp,
        right: ValueType,
    },
    /// Variable read before any assignment to it.
    NameError { name: SmolStr },
}

impl error::Error for SemanticError {}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SemanticError::TypeError {
                left,
                operator,
                right,
            } => write!(
                f,
                "type error: operator '{}' cannot be applied to types '{}' and '{}'",
                operator, left, right
            ),
            SemanticError::NameError { name } => write!(f, "name error: variable '{}' is not defined", name),
        }
    }
}
