use super::{
    block::Block,
    expr::{BinaryOp, Node},
    literal::Number,
    stmts::{Assignment, ForStmt, IfStmt, PrintStmt, WhileStmt},
    unit::Program,
};

/// Recursive walk over the syntax tree.
///
/// Implementors handle each node variant, and get the
/// dispatch over [`Node`] for free.
pub trait AstVisitor {
    type Output;

    fn number(&mut self, number: &Number) -> Self::Output;
    fn string(&mut self, value: &str) -> Self::Output;
    fn variable(&mut self, name: &str) -> Self::Output;
    fn binary(&mut self, expr: &BinaryOp) -> Self::Output;
    fn assign(&mut self, stmt: &Assignment) -> Self::Output;
    fn print(&mut self, stmt: &PrintStmt) -> Self::Output;
    fn if_stmt(&mut self, stmt: &IfStmt) -> Self::Output;
    fn while_stmt(&mut self, stmt: &WhileStmt) -> Self::Output;
    fn for_stmt(&mut self, stmt: &ForStmt) -> Self::Output;
    fn block(&mut self, block: &Block) -> Self::Output;
    fn program(&mut self, program: &Program) -> Self::Output;

    #[inline]
    fn node(&mut self, node: &Node) -> Self::Output {
        match node {
            Node::Number(number) => self.number(number),
            Node::String(value) => self.string(value.as_str()),
            Node::Variable(name) => self.variable(name.as_str()),
            Node::Binary(expr) => self.binary(expr),
            Node::Assign(stmt) => self.assign(stmt),
            Node::Print(stmt) => self.print(stmt),
            Node::If(stmt) => self.if_stmt(stmt),
            Node::While(stmt) => self.while_stmt(stmt),
            Node::For(stmt) => self.for_stmt(stmt),
            Node::Block(block) => self.block(block),
        }
    }
}
