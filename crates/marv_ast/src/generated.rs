//! Per-variant helpers for AST nodes: data accessors, kind lookups and the
//! capability conversions used when building a tree bottom-up.

use crate::kind::NodeKind;
use crate::node::*;
use thiserror::Error;

/// A node was used in a position its kind cannot fill, e.g. a
/// `VariableDeclarator` where an expression was expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} cannot be used as {expected}")]
pub struct CapabilityError {
    pub kind: NodeKind,
    pub expected: &'static str,
}

impl Statement {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::Block(n) => &n.data,
            Statement::Empty(n) => &n.data,
            Statement::Expression(n) => &n.data,
            Statement::If(n) => &n.data,
            Statement::Labeled(n) => &n.data,
            Statement::Break(n) => &n.data,
            Statement::Continue(n) => &n.data,
            Statement::Switch(n) => &n.data,
            Statement::Return(n) => &n.data,
            Statement::Throw(n) => &n.data,
            Statement::Try(n) => &n.data,
            Statement::While(n) => &n.data,
            Statement::DoWhile(n) => &n.data,
            Statement::For(n) => &n.data,
            Statement::ForIn(n) => &n.data,
            Statement::Debugger(n) => &n.data,
            Statement::VariableDeclaration(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
        }
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        match self {
            Statement::Block(n) => &mut n.data,
            Statement::Empty(n) => &mut n.data,
            Statement::Expression(n) => &mut n.data,
            Statement::If(n) => &mut n.data,
            Statement::Labeled(n) => &mut n.data,
            Statement::Break(n) => &mut n.data,
            Statement::Continue(n) => &mut n.data,
            Statement::Switch(n) => &mut n.data,
            Statement::Return(n) => &mut n.data,
            Statement::Throw(n) => &mut n.data,
            Statement::Try(n) => &mut n.data,
            Statement::While(n) => &mut n.data,
            Statement::DoWhile(n) => &mut n.data,
            Statement::For(n) => &mut n.data,
            Statement::ForIn(n) => &mut n.data,
            Statement::Debugger(n) => &mut n.data,
            Statement::VariableDeclaration(n) => &mut n.data,
            Statement::FunctionDeclaration(n) => &mut n.data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Block(_) => NodeKind::BlockStatement,
            Statement::Empty(_) => NodeKind::EmptyStatement,
            Statement::Expression(_) => NodeKind::ExpressionStatement,
            Statement::If(_) => NodeKind::IfStatement,
            Statement::Labeled(_) => NodeKind::LabeledStatement,
            Statement::Break(_) => NodeKind::BreakStatement,
            Statement::Continue(_) => NodeKind::ContinueStatement,
            Statement::Switch(_) => NodeKind::SwitchStatement,
            Statement::Return(_) => NodeKind::ReturnStatement,
            Statement::Throw(_) => NodeKind::ThrowStatement,
            Statement::Try(_) => NodeKind::TryStatement,
            Statement::While(_) => NodeKind::WhileStatement,
            Statement::DoWhile(_) => NodeKind::DoWhileStatement,
            Statement::For(_) => NodeKind::ForStatement,
            Statement::ForIn(_) => NodeKind::ForInStatement,
            Statement::Debugger(_) => NodeKind::DebuggerStatement,
            Statement::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            Statement::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
        }
    }

    pub fn is_declaration(&self) -> bool {
        self.kind().is_declaration()
    }
}

impl Expression {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::Literal(n) => &n.data,
            Expression::This(n) => &n.data,
            Expression::Array(n) => &n.data,
            Expression::Object(n) => &n.data,
            Expression::Function(n) => &n.data,
            Expression::Unary(n) => &n.data,
            Expression::Update(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Logical(n) => &n.data,
            Expression::Assignment(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::Member(n) => &n.data,
            Expression::Sequence(n) => &n.data,
        }
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        match self {
            Expression::Identifier(n) => &mut n.data,
            Expression::Literal(n) => &mut n.data,
            Expression::This(n) => &mut n.data,
            Expression::Array(n) => &mut n.data,
            Expression::Object(n) => &mut n.data,
            Expression::Function(n) => &mut n.data,
            Expression::Unary(n) => &mut n.data,
            Expression::Update(n) => &mut n.data,
            Expression::Binary(n) => &mut n.data,
            Expression::Logical(n) => &mut n.data,
            Expression::Assignment(n) => &mut n.data,
            Expression::Conditional(n) => &mut n.data,
            Expression::Call(n) => &mut n.data,
            Expression::New(n) => &mut n.data,
            Expression::Member(n) => &mut n.data,
            Expression::Sequence(n) => &mut n.data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Identifier(_) => NodeKind::Identifier,
            Expression::Literal(_) => NodeKind::Literal,
            Expression::This(_) => NodeKind::ThisExpression,
            Expression::Array(_) => NodeKind::ArrayExpression,
            Expression::Object(_) => NodeKind::ObjectExpression,
            Expression::Function(_) => NodeKind::FunctionExpression,
            Expression::Unary(_) => NodeKind::UnaryExpression,
            Expression::Update(_) => NodeKind::UpdateExpression,
            Expression::Binary(_) => NodeKind::BinaryExpression,
            Expression::Logical(_) => NodeKind::LogicalExpression,
            Expression::Assignment(_) => NodeKind::AssignmentExpression,
            Expression::Conditional(_) => NodeKind::ConditionalExpression,
            Expression::Call(_) => NodeKind::CallExpression,
            Expression::New(_) => NodeKind::NewExpression,
            Expression::Member(_) => NodeKind::MemberExpression,
            Expression::Sequence(_) => NodeKind::SequenceExpression,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(id) => Some(id),
            _ => None,
        }
    }
}

impl ForInit {
    pub fn data(&self) -> &NodeData {
        match self {
            ForInit::VariableDeclaration(n) => &n.data,
            ForInit::Expression(e) => e.data(),
        }
    }
}

// ============================================================================
// AnyNode
// ============================================================================

/// A node of any kind.
///
/// The translator builds children before their parent and cannot know up
/// front which kind an ESTree child holds; the parent then asks for the
/// capability its field needs and gets a [`CapabilityError`] naming the
/// offending kind when the child cannot provide it.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyNode {
    Program(Box<Program>),
    Statement(Statement),
    Expression(Expression),
    VariableDeclarator(Box<VariableDeclarator>),
    Property(Box<Property>),
    SwitchCase(Box<SwitchCase>),
    CatchClause(Box<CatchClause>),
}

impl AnyNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            AnyNode::Program(_) => NodeKind::Program,
            AnyNode::Statement(s) => s.kind(),
            AnyNode::Expression(e) => e.kind(),
            AnyNode::VariableDeclarator(_) => NodeKind::VariableDeclarator,
            AnyNode::Property(_) => NodeKind::Property,
            AnyNode::SwitchCase(_) => NodeKind::SwitchCase,
            AnyNode::CatchClause(_) => NodeKind::CatchClause,
        }
    }

    pub fn data(&self) -> &NodeData {
        match self {
            AnyNode::Program(n) => &n.data,
            AnyNode::Statement(s) => s.data(),
            AnyNode::Expression(e) => e.data(),
            AnyNode::VariableDeclarator(n) => &n.data,
            AnyNode::Property(n) => &n.data,
            AnyNode::SwitchCase(n) => &n.data,
            AnyNode::CatchClause(n) => &n.data,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, AnyNode::Expression(_))
    }

    pub fn is_statement(&self) -> bool {
        matches!(self, AnyNode::Statement(_))
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, AnyNode::Statement(s) if s.is_declaration())
    }

    fn unexpected(&self, expected: &'static str) -> CapabilityError {
        CapabilityError {
            kind: self.kind(),
            expected,
        }
    }

    pub fn into_expression(self) -> Result<Expression, CapabilityError> {
        match self {
            AnyNode::Expression(e) => Ok(e),
            other => Err(other.unexpected("an expression")),
        }
    }

    pub fn into_statement(self) -> Result<Statement, CapabilityError> {
        match self {
            AnyNode::Statement(s) => Ok(s),
            other => Err(other.unexpected("a statement")),
        }
    }

    pub fn into_identifier(self) -> Result<Identifier, CapabilityError> {
        match self {
            AnyNode::Expression(Expression::Identifier(id)) => Ok(*id),
            other => Err(other.unexpected("an identifier")),
        }
    }

    pub fn into_block(self) -> Result<BlockStatement, CapabilityError> {
        match self {
            AnyNode::Statement(Statement::Block(block)) => Ok(*block),
            other => Err(other.unexpected("a block")),
        }
    }

    pub fn into_variable_declaration(self) -> Result<VariableDeclaration, CapabilityError> {
        match self {
            AnyNode::Statement(Statement::VariableDeclaration(decl)) => Ok(*decl),
            other => Err(other.unexpected("a variable declaration")),
        }
    }

    /// A loop head accepts a declaration or an expression.
    pub fn into_for_init(self) -> Result<ForInit, CapabilityError> {
        match self {
            AnyNode::Statement(Statement::VariableDeclaration(decl)) => {
                Ok(ForInit::VariableDeclaration(decl))
            }
            AnyNode::Expression(e) => Ok(ForInit::Expression(e)),
            other => Err(other.unexpected("a loop head")),
        }
    }

    pub fn into_variable_declarator(self) -> Result<VariableDeclarator, CapabilityError> {
        match self {
            AnyNode::VariableDeclarator(decl) => Ok(*decl),
            other => Err(other.unexpected("a variable declarator")),
        }
    }

    pub fn into_property(self) -> Result<Property, CapabilityError> {
        match self {
            AnyNode::Property(prop) => Ok(*prop),
            other => Err(other.unexpected("a property")),
        }
    }

    pub fn into_switch_case(self) -> Result<SwitchCase, CapabilityError> {
        match self {
            AnyNode::SwitchCase(case) => Ok(*case),
            other => Err(other.unexpected("a switch case")),
        }
    }

    pub fn into_catch_clause(self) -> Result<CatchClause, CapabilityError> {
        match self {
            AnyNode::CatchClause(clause) => Ok(*clause),
            other => Err(other.unexpected("a catch clause")),
        }
    }

    pub fn into_program(self) -> Result<Program, CapabilityError> {
        match self {
            AnyNode::Program(program) => Ok(*program),
            other => Err(other.unexpected("a program")),
        }
    }
}

impl From<Statement> for AnyNode {
    fn from(s: Statement) -> Self {
        AnyNode::Statement(s)
    }
}

impl From<Expression> for AnyNode {
    fn from(e: Expression) -> Self {
        AnyNode::Expression(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclKind, NodeId};

    fn ident(name: &str) -> Identifier {
        Identifier::new(NodeData::new(NodeId(0), None, None), name)
    }

    #[test]
    fn test_capability_error_names_kind() {
        let declarator = AnyNode::VariableDeclarator(Box::new(VariableDeclarator {
            data: NodeData::synthesized(),
            id: ident("x"),
            init: None,
            kind: DeclKind::Var,
        }));
        assert!(!declarator.is_expression());
        let err = declarator.into_expression().unwrap_err();
        assert_eq!(err.kind, NodeKind::VariableDeclarator);
        assert_eq!(err.to_string(), "VariableDeclarator cannot be used as an expression");
    }

    #[test]
    fn test_identifier_conversions() {
        let node = AnyNode::from(Expression::Identifier(Box::new(ident("a"))));
        assert!(node.is_expression());
        assert_eq!(node.kind(), NodeKind::Identifier);
        assert_eq!(node.into_identifier().map(|id| id.name), Ok("a".to_string()));

        let this = AnyNode::from(Expression::This(Box::new(ThisExpression {
            data: NodeData::synthesized(),
        })));
        assert_eq!(
            this.into_identifier().unwrap_err().kind,
            NodeKind::ThisExpression
        );
    }

    #[test]
    fn test_for_init_accepts_declaration_or_expression() {
        let decl = AnyNode::from(Statement::VariableDeclaration(Box::new(VariableDeclaration {
            data: NodeData::synthesized(),
            declarations: Vec::new(),
            kind: DeclKind::Let,
        })));
        assert!(decl.is_declaration());
        assert!(matches!(decl.into_for_init(), Ok(ForInit::VariableDeclaration(_))));

        let empty = AnyNode::from(Statement::Empty(Box::new(EmptyStatement {
            data: NodeData::synthesized(),
        })));
        assert_eq!(empty.into_for_init().unwrap_err().kind, NodeKind::EmptyStatement);
    }
}
