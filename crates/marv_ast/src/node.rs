//! AST node definitions.
//!
//! The tree mirrors the ESTree shape the external parser produces. Every
//! node owns its children outright; there is no sharing between subtrees.

use crate::directive::{Comment, Directive, DirectiveIndex};
use crate::types::*;
use marv_core::text::{SourceLocation, TextRange};

// ============================================================================
// Core Node Data
// ============================================================================

/// Data shared by all AST nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub id: NodeId,
    /// `None` for synthesized nodes.
    pub loc: Option<SourceLocation>,
    pub range: Option<TextRange>,
    /// Doc comments attached to this node. Always empty for nodes that
    /// cannot receive comments.
    pub comments: Vec<Comment>,
    /// Directives parsed from `comments`.
    pub directives: Vec<Directive>,
}

impl NodeData {
    pub fn new(id: NodeId, loc: Option<SourceLocation>, range: Option<TextRange>) -> Self {
        Self {
            id,
            loc,
            range,
            comments: Vec::new(),
            directives: Vec::new(),
        }
    }

    /// Data for a node created by a pass rather than read from source.
    pub fn synthesized() -> Self {
        Self::new(NodeId::INVALID, None, None)
    }

    pub fn start_line(&self) -> Option<u32> {
        self.loc.as_ref().map(|loc| loc.start.line)
    }
}

// ============================================================================
// Program
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub data: NodeData,
    pub body: Vec<Statement>,
    /// Doc comments that were never attached to a statement, sorted by
    /// position. Their directives live in `data.directives`.
    pub comments: Vec<Comment>,
    pub directive_index: DirectiveIndex,
}

impl Program {
    /// The nodes carrying a directive with `tag`, in discovery order.
    pub fn nodes_with_directive(&self, tag: &str) -> &[NodeId] {
        self.directive_index
            .get(tag)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// Identifier
// ============================================================================

/// Resolution data the scope resolver fills in on identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionInfo {
    pub uid: Option<DeclId>,
    /// The block scope current where the binding was declared.
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub data: NodeData,
    pub name: String,
    /// True when this occurrence declares the name rather than uses it.
    pub is_binder: bool,
    pub info: ResolutionInfo,
}

impl Identifier {
    pub fn new(data: NodeData, name: impl Into<String>) -> Self {
        Self {
            data,
            name: name.into(),
            is_binder: false,
            info: ResolutionInfo::default(),
        }
    }

    /// Make this identifier refer to the same binding as `canonical`.
    ///
    /// Copies the name and resolution info. Location, id and binder flag
    /// stay those of this occurrence.
    pub fn unify_with(&mut self, canonical: &Identifier) {
        self.name.clone_from(&canonical.name);
        self.info = canonical.info;
    }

    pub fn is_resolved(&self) -> bool {
        self.info.uid.is_some()
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Box<BlockStatement>),
    Empty(Box<EmptyStatement>),
    Expression(Box<ExpressionStatement>),
    If(Box<IfStatement>),
    Labeled(Box<LabeledStatement>),
    Break(Box<BreakStatement>),
    Continue(Box<ContinueStatement>),
    Switch(Box<SwitchStatement>),
    Return(Box<ReturnStatement>),
    Throw(Box<ThrowStatement>),
    Try(Box<TryStatement>),
    While(Box<WhileStatement>),
    DoWhile(Box<DoWhileStatement>),
    For(Box<ForStatement>),
    ForIn(Box<ForInStatement>),
    Debugger(Box<DebuggerStatement>),
    VariableDeclaration(Box<VariableDeclaration>),
    FunctionDeclaration(Box<FunctionDeclaration>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub data: NodeData,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyStatement {
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub data: NodeData,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub data: NodeData,
    pub test: Expression,
    pub consequent: Statement,
    pub alternate: Option<Statement>,
}

/// Labels are not variable references and are never visited.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    pub data: NodeData,
    pub label: Identifier,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    pub data: NodeData,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStatement {
    pub data: NodeData,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub data: NodeData,
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
}

/// A `case test:` clause, or `default:` when `test` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub data: NodeData,
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub data: NodeData,
    pub argument: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub data: NodeData,
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub data: NodeData,
    pub block: BlockStatement,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub data: NodeData,
    pub param: Identifier,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub data: NodeData,
    pub test: Expression,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub data: NodeData,
    pub body: Statement,
    pub test: Expression,
}

/// The head of a `for` or `for-in` loop: either a declaration or an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    VariableDeclaration(Box<VariableDeclaration>),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub data: NodeData,
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    pub data: NodeData,
    pub left: ForInit,
    pub right: Expression,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebuggerStatement {
    pub data: NodeData,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub data: NodeData,
    pub declarations: Vec<VariableDeclarator>,
    pub kind: DeclKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub data: NodeData,
    pub id: Identifier,
    pub init: Option<Expression>,
    /// Copied from the enclosing declaration.
    pub kind: DeclKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub data: NodeData,
    pub id: Identifier,
    pub params: Vec<Identifier>,
    pub body: BlockStatement,
    pub generator: bool,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Box<Identifier>),
    Literal(Box<Literal>),
    This(Box<ThisExpression>),
    Array(Box<ArrayExpression>),
    Object(Box<ObjectExpression>),
    Function(Box<FunctionExpression>),
    Unary(Box<UnaryExpression>),
    Update(Box<UpdateExpression>),
    Binary(Box<BinaryExpression>),
    Logical(Box<LogicalExpression>),
    Assignment(Box<AssignmentExpression>),
    Conditional(Box<ConditionalExpression>),
    Call(Box<CallExpression>),
    New(Box<NewExpression>),
    Member(Box<MemberExpression>),
    Sequence(Box<SequenceExpression>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    RegExp { pattern: String, flags: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub data: NodeData,
    pub value: LiteralValue,
    /// Source text of the literal, when the parser reported it.
    pub raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThisExpression {
    pub data: NodeData,
}

/// `None` elements are holes, as in `[a, , b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    pub data: NodeData,
    pub elements: Vec<Option<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    pub data: NodeData,
    pub properties: Vec<Property>,
}

/// An object literal member. The key is an identifier or literal; it is
/// only visited when `computed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub data: NodeData,
    pub key: Expression,
    pub value: Expression,
    pub kind: PropertyKind,
    pub computed: bool,
    pub shorthand: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    pub data: NodeData,
    pub id: Option<Identifier>,
    pub params: Vec<Identifier>,
    pub body: BlockStatement,
    pub generator: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub data: NodeData,
    pub operator: UnaryOperator,
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub data: NodeData,
    pub operator: UpdateOperator,
    pub argument: Expression,
    pub prefix: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub data: NodeData,
    pub operator: BinaryOperator,
    pub left: Expression,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub data: NodeData,
    pub operator: LogicalOperator,
    pub left: Expression,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub data: NodeData,
    pub operator: AssignmentOperator,
    pub left: Expression,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub data: NodeData,
    pub test: Expression,
    pub consequent: Expression,
    pub alternate: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub data: NodeData,
    pub callee: Expression,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    pub data: NodeData,
    pub callee: Expression,
    pub arguments: Vec<Expression>,
}

/// `object.property` or `object[property]`. A non-computed property is a
/// name, not a reference, and is not visited.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub data: NodeData,
    pub object: Expression,
    pub property: Expression,
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpression {
    pub data: NodeData,
    pub expressions: Vec<Expression>,
}
