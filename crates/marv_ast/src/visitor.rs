//! Mutable tree traversal with enter/exit hooks.
//!
//! Every node kind has an `enter_*` hook, called before its children are
//! walked, and an `exit_*` hook, called after. All hooks default to doing
//! nothing, so a visitor only implements the kinds it cares about.
//!
//! An `exit_*` hook may return a replacement node. The walker writes it into
//! the slot the visited node occupied (a named field or a vector index)
//! before moving on to the next sibling. Statement and expression kinds are
//! replaced by any [`Statement`] or [`Expression`]; kinds that appear in
//! typed fields (blocks, identifiers, declarations, clauses, properties)
//! are replaced by a node of the same kind.
//!
//! Blocks, variable declarations and identifiers can also sit in a plain
//! statement or expression slot. There a second hook runs after the typed
//! one (`exit_block_statement`, `exit_variable_statement`,
//! `exit_identifier_expression`) and may replace the node with any
//! statement or expression.
//!
//! Children are walked in source order. Labels, non-computed member
//! properties and non-computed property keys are names rather than
//! references and are not walked.

use crate::node::*;

pub trait Visitor {
    // -- Program --

    fn enter_program(&mut self, _node: &mut Program) {}
    fn exit_program(&mut self, _node: &mut Program) -> Option<Program> {
        None
    }

    // -- Statements --

    fn enter_block(&mut self, _node: &mut BlockStatement) {}
    fn exit_block(&mut self, _node: &mut BlockStatement) -> Option<BlockStatement> {
        None
    }
    /// A block in statement position, after [`exit_block`](Self::exit_block).
    fn exit_block_statement(&mut self, _node: &mut BlockStatement) -> Option<Statement> {
        None
    }

    fn enter_empty_statement(&mut self, _node: &mut EmptyStatement) {}
    fn exit_empty_statement(&mut self, _node: &mut EmptyStatement) -> Option<Statement> {
        None
    }

    fn enter_expression_statement(&mut self, _node: &mut ExpressionStatement) {}
    fn exit_expression_statement(&mut self, _node: &mut ExpressionStatement) -> Option<Statement> {
        None
    }

    fn enter_if_statement(&mut self, _node: &mut IfStatement) {}
    fn exit_if_statement(&mut self, _node: &mut IfStatement) -> Option<Statement> {
        None
    }

    fn enter_labeled_statement(&mut self, _node: &mut LabeledStatement) {}
    fn exit_labeled_statement(&mut self, _node: &mut LabeledStatement) -> Option<Statement> {
        None
    }

    fn enter_break_statement(&mut self, _node: &mut BreakStatement) {}
    fn exit_break_statement(&mut self, _node: &mut BreakStatement) -> Option<Statement> {
        None
    }

    fn enter_continue_statement(&mut self, _node: &mut ContinueStatement) {}
    fn exit_continue_statement(&mut self, _node: &mut ContinueStatement) -> Option<Statement> {
        None
    }

    fn enter_switch_statement(&mut self, _node: &mut SwitchStatement) {}
    fn exit_switch_statement(&mut self, _node: &mut SwitchStatement) -> Option<Statement> {
        None
    }

    fn enter_switch_case(&mut self, _node: &mut SwitchCase) {}
    fn exit_switch_case(&mut self, _node: &mut SwitchCase) -> Option<SwitchCase> {
        None
    }

    fn enter_return_statement(&mut self, _node: &mut ReturnStatement) {}
    fn exit_return_statement(&mut self, _node: &mut ReturnStatement) -> Option<Statement> {
        None
    }

    fn enter_throw_statement(&mut self, _node: &mut ThrowStatement) {}
    fn exit_throw_statement(&mut self, _node: &mut ThrowStatement) -> Option<Statement> {
        None
    }

    fn enter_try_statement(&mut self, _node: &mut TryStatement) {}
    fn exit_try_statement(&mut self, _node: &mut TryStatement) -> Option<Statement> {
        None
    }

    fn enter_catch_clause(&mut self, _node: &mut CatchClause) {}
    fn exit_catch_clause(&mut self, _node: &mut CatchClause) -> Option<CatchClause> {
        None
    }

    fn enter_while_statement(&mut self, _node: &mut WhileStatement) {}
    fn exit_while_statement(&mut self, _node: &mut WhileStatement) -> Option<Statement> {
        None
    }

    fn enter_do_while_statement(&mut self, _node: &mut DoWhileStatement) {}
    fn exit_do_while_statement(&mut self, _node: &mut DoWhileStatement) -> Option<Statement> {
        None
    }

    fn enter_for_statement(&mut self, _node: &mut ForStatement) {}
    fn exit_for_statement(&mut self, _node: &mut ForStatement) -> Option<Statement> {
        None
    }

    fn enter_for_in_statement(&mut self, _node: &mut ForInStatement) {}
    fn exit_for_in_statement(&mut self, _node: &mut ForInStatement) -> Option<Statement> {
        None
    }

    fn enter_debugger_statement(&mut self, _node: &mut DebuggerStatement) {}
    fn exit_debugger_statement(&mut self, _node: &mut DebuggerStatement) -> Option<Statement> {
        None
    }

    // -- Declarations --

    fn enter_variable_declaration(&mut self, _node: &mut VariableDeclaration) {}
    fn exit_variable_declaration(&mut self, _node: &mut VariableDeclaration) -> Option<VariableDeclaration> {
        None
    }
    /// A declaration in statement position (not a `for` head), after
    /// [`exit_variable_declaration`](Self::exit_variable_declaration).
    fn exit_variable_statement(&mut self, _node: &mut VariableDeclaration) -> Option<Statement> {
        None
    }

    fn enter_variable_declarator(&mut self, _node: &mut VariableDeclarator) {}
    fn exit_variable_declarator(&mut self, _node: &mut VariableDeclarator) -> Option<VariableDeclarator> {
        None
    }

    fn enter_function_declaration(&mut self, _node: &mut FunctionDeclaration) {}
    fn exit_function_declaration(&mut self, _node: &mut FunctionDeclaration) -> Option<Statement> {
        None
    }

    // -- Expressions --

    fn enter_identifier(&mut self, _node: &mut Identifier) {}
    fn exit_identifier(&mut self, _node: &mut Identifier) -> Option<Identifier> {
        None
    }
    /// An identifier in expression position, after
    /// [`exit_identifier`](Self::exit_identifier). Binders, labels and
    /// parameters never reach this hook.
    fn exit_identifier_expression(&mut self, _node: &mut Identifier) -> Option<Expression> {
        None
    }

    fn enter_literal(&mut self, _node: &mut Literal) {}
    fn exit_literal(&mut self, _node: &mut Literal) -> Option<Expression> {
        None
    }

    fn enter_this_expression(&mut self, _node: &mut ThisExpression) {}
    fn exit_this_expression(&mut self, _node: &mut ThisExpression) -> Option<Expression> {
        None
    }

    fn enter_array_expression(&mut self, _node: &mut ArrayExpression) {}
    fn exit_array_expression(&mut self, _node: &mut ArrayExpression) -> Option<Expression> {
        None
    }

    fn enter_object_expression(&mut self, _node: &mut ObjectExpression) {}
    fn exit_object_expression(&mut self, _node: &mut ObjectExpression) -> Option<Expression> {
        None
    }

    fn enter_property(&mut self, _node: &mut Property) {}
    fn exit_property(&mut self, _node: &mut Property) -> Option<Property> {
        None
    }

    fn enter_function_expression(&mut self, _node: &mut FunctionExpression) {}
    fn exit_function_expression(&mut self, _node: &mut FunctionExpression) -> Option<Expression> {
        None
    }

    fn enter_unary_expression(&mut self, _node: &mut UnaryExpression) {}
    fn exit_unary_expression(&mut self, _node: &mut UnaryExpression) -> Option<Expression> {
        None
    }

    fn enter_update_expression(&mut self, _node: &mut UpdateExpression) {}
    fn exit_update_expression(&mut self, _node: &mut UpdateExpression) -> Option<Expression> {
        None
    }

    fn enter_binary_expression(&mut self, _node: &mut BinaryExpression) {}
    fn exit_binary_expression(&mut self, _node: &mut BinaryExpression) -> Option<Expression> {
        None
    }

    fn enter_logical_expression(&mut self, _node: &mut LogicalExpression) {}
    fn exit_logical_expression(&mut self, _node: &mut LogicalExpression) -> Option<Expression> {
        None
    }

    fn enter_assignment_expression(&mut self, _node: &mut AssignmentExpression) {}
    fn exit_assignment_expression(&mut self, _node: &mut AssignmentExpression) -> Option<Expression> {
        None
    }

    fn enter_conditional_expression(&mut self, _node: &mut ConditionalExpression) {}
    fn exit_conditional_expression(&mut self, _node: &mut ConditionalExpression) -> Option<Expression> {
        None
    }

    fn enter_call_expression(&mut self, _node: &mut CallExpression) {}
    fn exit_call_expression(&mut self, _node: &mut CallExpression) -> Option<Expression> {
        None
    }

    fn enter_new_expression(&mut self, _node: &mut NewExpression) {}
    fn exit_new_expression(&mut self, _node: &mut NewExpression) -> Option<Expression> {
        None
    }

    fn enter_member_expression(&mut self, _node: &mut MemberExpression) {}
    fn exit_member_expression(&mut self, _node: &mut MemberExpression) -> Option<Expression> {
        None
    }

    fn enter_sequence_expression(&mut self, _node: &mut SequenceExpression) {}
    fn exit_sequence_expression(&mut self, _node: &mut SequenceExpression) -> Option<Expression> {
        None
    }
}

// ============================================================================
// Walk functions
// ============================================================================

pub fn walk_program<V: Visitor + ?Sized>(v: &mut V, node: &mut Program) {
    v.enter_program(node);
    walk_statements(v, &mut node.body);
    if let Some(replacement) = v.exit_program(node) {
        *node = replacement;
    }
}

pub fn walk_statements<V: Visitor + ?Sized>(v: &mut V, list: &mut [Statement]) {
    for stmt in list.iter_mut() {
        walk_statement(v, stmt);
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, stmt: &mut Statement) {
    let replacement = match stmt {
        Statement::Block(n) => {
            walk_block(v, n);
            v.exit_block_statement(n)
        }
        Statement::Empty(n) => {
            v.enter_empty_statement(n);
            v.exit_empty_statement(n)
        }
        Statement::Expression(n) => {
            v.enter_expression_statement(n);
            walk_expression(v, &mut n.expression);
            v.exit_expression_statement(n)
        }
        Statement::If(n) => {
            v.enter_if_statement(n);
            walk_expression(v, &mut n.test);
            walk_statement(v, &mut n.consequent);
            if let Some(alternate) = n.alternate.as_mut() {
                walk_statement(v, alternate);
            }
            v.exit_if_statement(n)
        }
        Statement::Labeled(n) => {
            v.enter_labeled_statement(n);
            walk_statement(v, &mut n.body);
            v.exit_labeled_statement(n)
        }
        Statement::Break(n) => {
            v.enter_break_statement(n);
            v.exit_break_statement(n)
        }
        Statement::Continue(n) => {
            v.enter_continue_statement(n);
            v.exit_continue_statement(n)
        }
        Statement::Switch(n) => {
            v.enter_switch_statement(n);
            walk_expression(v, &mut n.discriminant);
            for case in n.cases.iter_mut() {
                walk_switch_case(v, case);
            }
            v.exit_switch_statement(n)
        }
        Statement::Return(n) => {
            v.enter_return_statement(n);
            if let Some(argument) = n.argument.as_mut() {
                walk_expression(v, argument);
            }
            v.exit_return_statement(n)
        }
        Statement::Throw(n) => {
            v.enter_throw_statement(n);
            walk_expression(v, &mut n.argument);
            v.exit_throw_statement(n)
        }
        Statement::Try(n) => {
            v.enter_try_statement(n);
            walk_block(v, &mut n.block);
            if let Some(handler) = n.handler.as_mut() {
                walk_catch_clause(v, handler);
            }
            if let Some(finalizer) = n.finalizer.as_mut() {
                walk_block(v, finalizer);
            }
            v.exit_try_statement(n)
        }
        Statement::While(n) => {
            v.enter_while_statement(n);
            walk_expression(v, &mut n.test);
            walk_statement(v, &mut n.body);
            v.exit_while_statement(n)
        }
        Statement::DoWhile(n) => {
            v.enter_do_while_statement(n);
            walk_statement(v, &mut n.body);
            walk_expression(v, &mut n.test);
            v.exit_do_while_statement(n)
        }
        Statement::For(n) => {
            v.enter_for_statement(n);
            if let Some(init) = n.init.as_mut() {
                walk_for_init(v, init);
            }
            if let Some(test) = n.test.as_mut() {
                walk_expression(v, test);
            }
            if let Some(update) = n.update.as_mut() {
                walk_expression(v, update);
            }
            walk_statement(v, &mut n.body);
            v.exit_for_statement(n)
        }
        Statement::ForIn(n) => {
            v.enter_for_in_statement(n);
            walk_for_init(v, &mut n.left);
            walk_expression(v, &mut n.right);
            walk_statement(v, &mut n.body);
            v.exit_for_in_statement(n)
        }
        Statement::Debugger(n) => {
            v.enter_debugger_statement(n);
            v.exit_debugger_statement(n)
        }
        Statement::VariableDeclaration(n) => {
            walk_variable_declaration(v, n);
            v.exit_variable_statement(n)
        }
        Statement::FunctionDeclaration(n) => {
            v.enter_function_declaration(n);
            walk_identifier(v, &mut n.id);
            for param in n.params.iter_mut() {
                walk_identifier(v, param);
            }
            walk_block(v, &mut n.body);
            v.exit_function_declaration(n)
        }
    };
    if let Some(replacement) = replacement {
        *stmt = replacement;
    }
}

pub fn walk_block<V: Visitor + ?Sized>(v: &mut V, node: &mut BlockStatement) {
    v.enter_block(node);
    walk_statements(v, &mut node.body);
    if let Some(replacement) = v.exit_block(node) {
        *node = replacement;
    }
}

pub fn walk_switch_case<V: Visitor + ?Sized>(v: &mut V, node: &mut SwitchCase) {
    v.enter_switch_case(node);
    if let Some(test) = node.test.as_mut() {
        walk_expression(v, test);
    }
    walk_statements(v, &mut node.consequent);
    if let Some(replacement) = v.exit_switch_case(node) {
        *node = replacement;
    }
}

pub fn walk_catch_clause<V: Visitor + ?Sized>(v: &mut V, node: &mut CatchClause) {
    v.enter_catch_clause(node);
    walk_identifier(v, &mut node.param);
    walk_block(v, &mut node.body);
    if let Some(replacement) = v.exit_catch_clause(node) {
        *node = replacement;
    }
}

pub fn walk_for_init<V: Visitor + ?Sized>(v: &mut V, init: &mut ForInit) {
    match init {
        ForInit::VariableDeclaration(decl) => walk_variable_declaration(v, decl),
        ForInit::Expression(expr) => walk_expression(v, expr),
    }
}

pub fn walk_variable_declaration<V: Visitor + ?Sized>(v: &mut V, node: &mut VariableDeclaration) {
    v.enter_variable_declaration(node);
    for declarator in node.declarations.iter_mut() {
        walk_variable_declarator(v, declarator);
    }
    if let Some(replacement) = v.exit_variable_declaration(node) {
        *node = replacement;
    }
}

pub fn walk_variable_declarator<V: Visitor + ?Sized>(v: &mut V, node: &mut VariableDeclarator) {
    v.enter_variable_declarator(node);
    walk_identifier(v, &mut node.id);
    if let Some(init) = node.init.as_mut() {
        walk_expression(v, init);
    }
    if let Some(replacement) = v.exit_variable_declarator(node) {
        *node = replacement;
    }
}

pub fn walk_identifier<V: Visitor + ?Sized>(v: &mut V, node: &mut Identifier) {
    v.enter_identifier(node);
    if let Some(replacement) = v.exit_identifier(node) {
        *node = replacement;
    }
}

pub fn walk_property<V: Visitor + ?Sized>(v: &mut V, node: &mut Property) {
    v.enter_property(node);
    if node.computed {
        walk_expression(v, &mut node.key);
    }
    walk_expression(v, &mut node.value);
    if let Some(replacement) = v.exit_property(node) {
        *node = replacement;
    }
}

pub fn walk_expressions<V: Visitor + ?Sized>(v: &mut V, list: &mut [Expression]) {
    for expr in list.iter_mut() {
        walk_expression(v, expr);
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(v: &mut V, expr: &mut Expression) {
    let replacement = match expr {
        Expression::Identifier(n) => {
            walk_identifier(v, n);
            v.exit_identifier_expression(n)
        }
        Expression::Literal(n) => {
            v.enter_literal(n);
            v.exit_literal(n)
        }
        Expression::This(n) => {
            v.enter_this_expression(n);
            v.exit_this_expression(n)
        }
        Expression::Array(n) => {
            v.enter_array_expression(n);
            for element in n.elements.iter_mut().flatten() {
                walk_expression(v, element);
            }
            v.exit_array_expression(n)
        }
        Expression::Object(n) => {
            v.enter_object_expression(n);
            for property in n.properties.iter_mut() {
                walk_property(v, property);
            }
            v.exit_object_expression(n)
        }
        Expression::Function(n) => {
            v.enter_function_expression(n);
            if let Some(id) = n.id.as_mut() {
                walk_identifier(v, id);
            }
            for param in n.params.iter_mut() {
                walk_identifier(v, param);
            }
            walk_block(v, &mut n.body);
            v.exit_function_expression(n)
        }
        Expression::Unary(n) => {
            v.enter_unary_expression(n);
            walk_expression(v, &mut n.argument);
            v.exit_unary_expression(n)
        }
        Expression::Update(n) => {
            v.enter_update_expression(n);
            walk_expression(v, &mut n.argument);
            v.exit_update_expression(n)
        }
        Expression::Binary(n) => {
            v.enter_binary_expression(n);
            walk_expression(v, &mut n.left);
            walk_expression(v, &mut n.right);
            v.exit_binary_expression(n)
        }
        Expression::Logical(n) => {
            v.enter_logical_expression(n);
            walk_expression(v, &mut n.left);
            walk_expression(v, &mut n.right);
            v.exit_logical_expression(n)
        }
        Expression::Assignment(n) => {
            v.enter_assignment_expression(n);
            walk_expression(v, &mut n.left);
            walk_expression(v, &mut n.right);
            v.exit_assignment_expression(n)
        }
        Expression::Conditional(n) => {
            v.enter_conditional_expression(n);
            walk_expression(v, &mut n.test);
            walk_expression(v, &mut n.consequent);
            walk_expression(v, &mut n.alternate);
            v.exit_conditional_expression(n)
        }
        Expression::Call(n) => {
            v.enter_call_expression(n);
            walk_expression(v, &mut n.callee);
            walk_expressions(v, &mut n.arguments);
            v.exit_call_expression(n)
        }
        Expression::New(n) => {
            v.enter_new_expression(n);
            walk_expression(v, &mut n.callee);
            walk_expressions(v, &mut n.arguments);
            v.exit_new_expression(n)
        }
        Expression::Member(n) => {
            v.enter_member_expression(n);
            walk_expression(v, &mut n.object);
            if n.computed {
                walk_expression(v, &mut n.property);
            }
            v.exit_member_expression(n)
        }
        Expression::Sequence(n) => {
            v.enter_sequence_expression(n);
            walk_expressions(v, &mut n.expressions);
            v.exit_sequence_expression(n)
        }
    };
    if let Some(replacement) = replacement {
        *expr = replacement;
    }
}

/// Something a [`Visitor`] can walk.
pub trait Walkable {
    fn walk<V: Visitor + ?Sized>(&mut self, v: &mut V);
}

impl Walkable for Program {
    fn walk<V: Visitor + ?Sized>(&mut self, v: &mut V) {
        walk_program(v, self)
    }
}

impl Walkable for Statement {
    fn walk<V: Visitor + ?Sized>(&mut self, v: &mut V) {
        walk_statement(v, self)
    }
}

impl Walkable for Expression {
    fn walk<V: Visitor + ?Sized>(&mut self, v: &mut V) {
        walk_expression(v, self)
    }
}

impl Walkable for BlockStatement {
    fn walk<V: Visitor + ?Sized>(&mut self, v: &mut V) {
        walk_block(v, self)
    }
}
