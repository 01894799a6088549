use super::ir::{Instr, Label, Operand, Temp};
use crate::parsing::{
    AstVisitor, Assignment, BinaryOp, Block, ForStmt, IfStmt, Node, Number, PrintStmt, Program, WhileStmt,
};
use log::{debug, trace};

/// Intermediate code generator.
///
/// Lowers the syntax tree into a flat sequence of
/// three-address instructions. No validation is done
/// here, a tree that failed analysis still produces
/// well-formed but meaningless code.
pub struct IrGen {
    /// Resulting generated code.
    code: Vec<Instr>,
    /// Last allocated temporary.
    temp_count: u32,
    /// Last allocated label.
    label_count: u32,
}

impl IrGen {
    #[inline]
    pub fn new() -> Self {
        Self {
            code: vec![],
            temp_count: 0,
            label_count: 0,
        }
    }

    /// Generate code for a whole program.
    ///
    /// Consumes the generator, so temporaries and labels
    /// are numbered from 1 on every run.
    pub fn generate(mut self, program: &Program) -> Vec<Instr> {
        self.program(program);
        debug!(
            "generated {} instructions, {} temporaries, {} labels",
            self.code.len(),
            self.temp_count,
            self.label_count
        );
        self.code
    }

    fn new_temp(&mut self) -> Temp {
        self.temp_count += 1;
        Temp(self.temp_count)
    }

    fn new_label(&mut self) -> Label {
        self.label_count += 1;
        Label(self.label_count)
    }

    fn emit(&mut self, instr: Instr) {
        trace!("{}", instr);
        self.code.push(instr)
    }

    /// Emit a node in operand position, returning where its value lives.
    ///
    /// Nodes without a value get a temporary that is never written.
    fn emit_operand(&mut self, node: &Node) -> Operand {
        match self.node(node) {
            Some(operand) => operand,
            None => Operand::Temp(self.new_temp()),
        }
    }
}

impl Default for IrGen {
    #[inline]
    fn default() -> Self {
        IrGen::new()
    }
}

impl AstVisitor for IrGen {
    /// Operand holding the node's value, if it has one.
    type Output = Option<Operand>;

    fn number(&mut self, number: &Number) -> Self::Output {
        Some(match number {
            Number::Int(value) => Operand::Int(*value),
            Number::Float(value) => Operand::Float(*value),
        })
    }

    fn string(&mut self, value: &str) -> Self::Output {
        Some(Operand::Str(value.into()))
    }

    fn variable(&mut self, name: &str) -> Self::Output {
        Some(Operand::Var(name.into()))
    }

    /// Operands are emitted left then right, and the
    /// result goes into a fresh temporary.
    fn binary(&mut self, expr: &BinaryOp) -> Self::Output {
        let lhs = self.emit_operand(&expr.lhs);
        let rhs = self.emit_operand(&expr.rhs);
        let result = self.new_temp();

        self.emit(Instr::Binary {
            op: expr.operator,
            lhs,
            rhs,
            result,
        });

        Some(Operand::Temp(result))
    }

    fn assign(&mut self, stmt: &Assignment) -> Self::Output {
        let value = self.emit_operand(&stmt.value);
        self.emit(Instr::Store {
            value,
            target: stmt.target.clone(),
        });

        // Assignment nested in an expression evaluates
        // to the assigned variable.
        Some(Operand::Var(stmt.target.clone()))
    }

    fn print(&mut self, stmt: &PrintStmt) -> Self::Output {
        let value = self.emit_operand(&stmt.value);
        self.emit(Instr::Print(value));
        None
    }

    fn if_stmt(&mut self, stmt: &IfStmt) -> Self::Output {
        let cond = self.emit_operand(&stmt.cond);

        let true_label = self.new_label();
        let false_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instr::IfGoto {
            cond,
            label: true_label,
        });
        self.emit(Instr::Goto(false_label));

        self.emit(Instr::Label(true_label));
        self.block(&stmt.then_block);
        self.emit(Instr::Goto(end_label));

        self.emit(Instr::Label(false_label));
        if let Some(ref else_block) = stmt.else_block {
            self.block(else_block);
        }

        self.emit(Instr::Label(end_label));
        None
    }

    fn while_stmt(&mut self, stmt: &WhileStmt) -> Self::Output {
        self.emit_loop(&stmt.cond, &stmt.body, None);
        None
    }

    /// Init runs once, then the loop behaves like a `while`
    /// with the update appended to the body.
    fn for_stmt(&mut self, stmt: &ForStmt) -> Self::Output {
        self.node(&stmt.init);
        self.emit_loop(&stmt.cond, &stmt.body, Some(&stmt.update));
        None
    }

    /// The value of a block is the value of its last statement.
    fn block(&mut self, block: &Block) -> Self::Output {
        let mut last = None;
        for stmt in &block.stmts {
            last = self.node(stmt);
        }
        last
    }

    fn program(&mut self, program: &Program) -> Self::Output {
        for stmt in &program.stmts {
            self.node(stmt);
        }
        None
    }
}

impl IrGen {
    fn emit_loop(&mut self, cond: &Node, body: &Block, update: Option<&Node>) {
        let start_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instr::Label(start_label));
        let cond = self.emit_operand(cond);
        self.emit(Instr::IfNotGoto {
            cond,
            label: end_label,
        });

        self.block(body);
        if let Some(update) = update {
            self.node(update);
        }

        self.emit(Instr::Goto(start_label));
        self.emit(Instr::Label(end_label));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        compile::ir::listing,
        lex::tokenize,
        parsing::{parse, BinOp},
    };

    fn generate(source: &str) -> Vec<Instr> {
        let program = parse(tokenize(source).unwrap()).unwrap();
        IrGen::new().generate(&program)
    }

    #[test]
    fn test_nested_binary_temporaries() {
        let code = generate("x = (1 + 2) * 3");
        assert_eq!(
            code,
            vec![
                Instr::Binary {
                    op: BinOp::Add,
                    lhs: Operand::Int(1),
                    rhs: Operand::Int(2),
                    result: Temp(1),
                },
                Instr::Binary {
                    op: BinOp::Mul,
                    lhs: Operand::Temp(Temp(1)),
                    rhs: Operand::Int(3),
                    result: Temp(2),
                },
                Instr::Store {
                    value: Operand::Temp(Temp(2)),
                    target: "x".into(),
                },
            ]
        );
    }

    #[test]
    fn test_if_else_shape() {
        let code = generate("x = 1\nif x == 1:\n  print \"one\"\nelse:\n  print \"other\"");
        assert_eq!(
            listing(&code),
            "    STORE 1 -> x
    EQ x 1 -> T1
    IF T1 GOTO L1
    GOTO L2
L1:
    PRINT \"one\"
    GOTO L3
L2:
    PRINT \"other\"
L3:
"
        );
    }

    #[test]
    fn test_if_without_else_keeps_false_label() {
        let code = generate("if 1:\n  print 1");
        assert_eq!(
            code,
            vec![
                Instr::IfGoto {
                    cond: Operand::Int(1),
                    label: Label(1),
                },
                Instr::Goto(Label(2)),
                Instr::Label(Label(1)),
                Instr::Print(Operand::Int(1)),
                Instr::Goto(Label(3)),
                Instr::Label(Label(2)),
                Instr::Label(Label(3)),
            ]
        );
    }

    #[test]
    fn test_for_update_after_body() {
        let code = generate("for (i = 0; i < 2; i = i + 1):\n  print i");
        assert_eq!(
            listing(&code),
            "    STORE 0 -> i
L1:
    LT i 2 -> T1
    IFNOT T1 GOTO L2
    PRINT i
    ADD i 1 -> T2
    STORE T2 -> i
    GOTO L1
L2:
"
        );
    }

    #[test]
    fn test_nested_assignment_value() {
        let code = generate("print x = 4");
        assert_eq!(
            code,
            vec![
                Instr::Store {
                    value: Operand::Int(4),
                    target: "x".into(),
                },
                Instr::Print(Operand::Var("x".into())),
            ]
        );
    }

    #[test]
    fn test_valueless_operand_gets_fresh_temp() {
        let code = generate("x = {} + 1");
        assert_eq!(
            code,
            vec![
                Instr::Binary {
                    op: BinOp::Add,
                    lhs: Operand::Temp(Temp(1)),
                    rhs: Operand::Int(1),
                    result: Temp(2),
                },
                Instr::Store {
                    value: Operand::Temp(Temp(2)),
                    target: "x".into(),
                },
            ]
        );
    }

    #[test]
    fn test_counters_are_per_run() {
        let program = parse(tokenize("while 1:\n  x = 1 + 1").unwrap()).unwrap();
        let first = IrGen::new().generate(&program);
        let second = IrGen::new().generate(&program);
        assert_eq!(first, second);
    }
}
