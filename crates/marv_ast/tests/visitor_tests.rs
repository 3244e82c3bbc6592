//! Visitor traversal order and replacement.

use marv_ast::*;

fn data(id: u32) -> NodeData {
    NodeData::new(NodeId(id), None, None)
}

fn ident(id: u32, name: &str) -> Identifier {
    Identifier::new(data(id), name)
}

fn ident_expr(id: u32, name: &str) -> Expression {
    Expression::Identifier(Box::new(ident(id, name)))
}

fn number(id: u32, value: f64) -> Expression {
    Expression::Literal(Box::new(Literal {
        data: data(id),
        value: LiteralValue::Number(value),
        raw: None,
    }))
}

fn expr_stmt(id: u32, expression: Expression) -> Statement {
    Statement::Expression(Box::new(ExpressionStatement {
        data: data(id),
        expression,
    }))
}

fn program(body: Vec<Statement>) -> Program {
    Program {
        data: data(0),
        body,
        comments: Vec::new(),
        directive_index: DirectiveIndex::new(),
    }
}

/// Records every hook it sees.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Visitor for Recorder {
    fn enter_program(&mut self, _node: &mut Program) {
        self.events.push("enter program".into());
    }
    fn exit_program(&mut self, _node: &mut Program) -> Option<Program> {
        self.events.push("exit program".into());
        None
    }
    fn enter_expression_statement(&mut self, _node: &mut ExpressionStatement) {
        self.events.push("enter stmt".into());
    }
    fn exit_expression_statement(&mut self, _node: &mut ExpressionStatement) -> Option<Statement> {
        self.events.push("exit stmt".into());
        None
    }
    fn enter_binary_expression(&mut self, _node: &mut BinaryExpression) {
        self.events.push("enter binary".into());
    }
    fn exit_binary_expression(&mut self, _node: &mut BinaryExpression) -> Option<Expression> {
        self.events.push("exit binary".into());
        None
    }
    fn enter_identifier(&mut self, node: &mut Identifier) {
        self.events.push(format!("enter {}", node.name));
    }
    fn exit_identifier(&mut self, node: &mut Identifier) -> Option<Identifier> {
        self.events.push(format!("exit {}", node.name));
        None
    }
    fn enter_literal(&mut self, _node: &mut Literal) {
        self.events.push("enter literal".into());
    }
}

#[test]
fn test_enter_and_exit_order() {
    let mut program = program(vec![expr_stmt(
        1,
        Expression::Binary(Box::new(BinaryExpression {
            data: data(2),
            operator: BinaryOperator::Add,
            left: ident_expr(3, "a"),
            right: number(4, 1.0),
        })),
    )]);
    let mut recorder = Recorder::default();
    program.walk(&mut recorder);
    assert_eq!(
        recorder.events,
        vec![
            "enter program",
            "enter stmt",
            "enter binary",
            "enter a",
            "exit a",
            "enter literal",
            "exit binary",
            "exit stmt",
            "exit program",
        ]
    );
}

#[test]
fn test_names_are_not_visited() {
    // outer: o.p; o[q];
    let member = |id: u32, property: Expression, computed: bool| {
        Expression::Member(Box::new(MemberExpression {
            data: data(id),
            object: ident_expr(id + 1, "o"),
            property,
            computed,
        }))
    };
    let mut program = program(vec![
        Statement::Labeled(Box::new(LabeledStatement {
            data: data(1),
            label: ident(2, "outer"),
            body: expr_stmt(3, member(4, ident_expr(6, "p"), false)),
        })),
        expr_stmt(7, member(8, ident_expr(10, "q"), true)),
    ]);
    let mut recorder = Recorder::default();
    program.walk(&mut recorder);
    let names: Vec<_> = recorder
        .events
        .iter()
        .filter_map(|e| e.strip_prefix("enter "))
        .filter(|e| !matches!(*e, "program" | "stmt"))
        .collect();
    assert_eq!(names, vec!["o", "o", "q"]);
}

#[test]
fn test_function_children_order() {
    let mut program = program(vec![Statement::FunctionDeclaration(Box::new(FunctionDeclaration {
        data: data(1),
        id: ident(2, "f"),
        params: vec![ident(3, "x"), ident(4, "y")],
        body: BlockStatement {
            data: data(5),
            body: vec![expr_stmt(6, ident_expr(7, "z"))],
        },
        generator: false,
    }))]);
    let mut recorder = Recorder::default();
    program.walk(&mut recorder);
    let names: Vec<_> = recorder
        .events
        .iter()
        .filter_map(|e| e.strip_prefix("exit "))
        .filter(|e| e.len() == 1)
        .collect();
    assert_eq!(names, vec!["f", "x", "y", "z"]);
}

/// Folds `number + number` into a single literal.
struct Folder;

impl Visitor for Folder {
    fn exit_binary_expression(&mut self, node: &mut BinaryExpression) -> Option<Expression> {
        match (&node.operator, &node.left, &node.right) {
            (BinaryOperator::Add, Expression::Literal(l), Expression::Literal(r)) => {
                match (&l.value, &r.value) {
                    (LiteralValue::Number(a), LiteralValue::Number(b)) => {
                        Some(Expression::Literal(Box::new(Literal {
                            data: NodeData::synthesized(),
                            value: LiteralValue::Number(a + b),
                            raw: None,
                        })))
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

#[test]
fn test_exit_replacement_is_seen_by_parent() {
    // (1 + 2) + 3 folds bottom-up into 6.
    let inner = Expression::Binary(Box::new(BinaryExpression {
        data: data(3),
        operator: BinaryOperator::Add,
        left: number(4, 1.0),
        right: number(5, 2.0),
    }));
    let mut program = program(vec![expr_stmt(
        1,
        Expression::Binary(Box::new(BinaryExpression {
            data: data(2),
            operator: BinaryOperator::Add,
            left: inner,
            right: number(6, 3.0),
        })),
    )]);
    program.walk(&mut Folder);
    let Statement::Expression(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    match &stmt.expression {
        Expression::Literal(lit) => assert_eq!(lit.value, LiteralValue::Number(6.0)),
        other => panic!("expected a literal, got {:?}", other.kind()),
    }
}

/// Replaces `debugger;` with an empty statement.
struct StripDebugger;

impl Visitor for StripDebugger {
    fn exit_debugger_statement(&mut self, node: &mut DebuggerStatement) -> Option<Statement> {
        Some(Statement::Empty(Box::new(EmptyStatement {
            data: node.data.clone(),
        })))
    }
}

#[test]
fn test_statement_replacement_keeps_siblings() {
    let mut program = program(vec![
        expr_stmt(1, ident_expr(2, "a")),
        Statement::Debugger(Box::new(DebuggerStatement { data: data(3) })),
        expr_stmt(4, ident_expr(5, "b")),
    ]);
    program.walk(&mut StripDebugger);
    let kinds: Vec<_> = program.body.iter().map(Statement::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::ExpressionStatement,
            NodeKind::EmptyStatement,
            NodeKind::ExpressionStatement,
        ]
    );
    assert_eq!(program.body[1].data().id, NodeId(3));
}

/// Renames every identifier by replacing it on exit.
struct Rename;

impl Visitor for Rename {
    fn exit_identifier(&mut self, node: &mut Identifier) -> Option<Identifier> {
        let mut renamed = node.clone();
        renamed.name = format!("{}_1", node.name);
        Some(renamed)
    }
}

#[test]
fn test_identifier_replacement_in_typed_slots() {
    let mut program = program(vec![Statement::VariableDeclaration(Box::new(VariableDeclaration {
        data: data(1),
        declarations: vec![VariableDeclarator {
            data: data(2),
            id: ident(3, "x"),
            init: Some(ident_expr(4, "y")),
            kind: DeclKind::Let,
        }],
        kind: DeclKind::Let,
    }))]);
    program.walk(&mut Rename);
    let Statement::VariableDeclaration(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.declarations[0].id.name, "x_1");
    let init = decl.declarations[0].init.as_ref().and_then(Expression::as_identifier);
    assert_eq!(init.map(|id| id.name.as_str()), Some("y_1"));
}

/// Replaces uses of `DEBUG` with `false`.
struct InlineDebug;

impl Visitor for InlineDebug {
    fn exit_identifier_expression(&mut self, node: &mut Identifier) -> Option<Expression> {
        (node.name == "DEBUG").then(|| {
            Expression::Literal(Box::new(Literal {
                data: node.data.clone(),
                value: LiteralValue::Boolean(false),
                raw: None,
            }))
        })
    }
}

#[test]
fn test_identifier_use_replaced_by_expression() {
    // var DEBUG = 1; f(DEBUG);
    let mut program = program(vec![
        Statement::VariableDeclaration(Box::new(VariableDeclaration {
            data: data(1),
            declarations: vec![VariableDeclarator {
                data: data(2),
                id: ident(3, "DEBUG"),
                init: Some(number(4, 1.0)),
                kind: DeclKind::Var,
            }],
            kind: DeclKind::Var,
        })),
        expr_stmt(
            5,
            Expression::Call(Box::new(CallExpression {
                data: data(6),
                callee: ident_expr(7, "f"),
                arguments: vec![ident_expr(8, "DEBUG")],
            })),
        ),
    ]);
    program.walk(&mut InlineDebug);

    let Statement::VariableDeclaration(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.declarations[0].id.name, "DEBUG");

    let Statement::Expression(stmt) = &program.body[1] else {
        panic!("expected an expression statement");
    };
    let Expression::Call(call) = &stmt.expression else {
        panic!("expected a call");
    };
    assert_eq!(call.callee.kind(), NodeKind::Identifier);
    match &call.arguments[0] {
        Expression::Literal(lit) => {
            assert_eq!(lit.value, LiteralValue::Boolean(false));
            assert_eq!(lit.data.id, NodeId(8));
        }
        other => panic!("expected a literal, got {:?}", other.kind()),
    }
}

/// Drops empty blocks and `var` statements without initializers.
struct DropInert;

impl DropInert {
    fn empty(data: &NodeData) -> Statement {
        Statement::Empty(Box::new(EmptyStatement { data: data.clone() }))
    }
}

impl Visitor for DropInert {
    fn exit_block_statement(&mut self, node: &mut BlockStatement) -> Option<Statement> {
        node.body.is_empty().then(|| Self::empty(&node.data))
    }

    fn exit_variable_statement(&mut self, node: &mut VariableDeclaration) -> Option<Statement> {
        node.declarations
            .iter()
            .all(|d| d.init.is_none())
            .then(|| Self::empty(&node.data))
    }
}

fn bare_var(id: u32, name: &str) -> VariableDeclaration {
    VariableDeclaration {
        data: data(id),
        declarations: vec![VariableDeclarator {
            data: data(id + 1),
            id: ident(id + 2, name),
            init: None,
            kind: DeclKind::Var,
        }],
        kind: DeclKind::Var,
    }
}

fn empty_block(id: u32) -> BlockStatement {
    BlockStatement {
        data: data(id),
        body: Vec::new(),
    }
}

#[test]
fn test_statement_slots_accept_other_statements() {
    // {} var x; for (var i;;) {}
    let mut program = program(vec![
        Statement::Block(Box::new(empty_block(1))),
        Statement::VariableDeclaration(Box::new(bare_var(2, "x"))),
        Statement::For(Box::new(ForStatement {
            data: data(5),
            init: Some(ForInit::VariableDeclaration(Box::new(bare_var(6, "i")))),
            test: None,
            update: None,
            body: Statement::Block(Box::new(empty_block(9))),
        })),
    ]);
    program.walk(&mut DropInert);

    let kinds: Vec<_> = program.body.iter().map(Statement::kind).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::EmptyStatement, NodeKind::EmptyStatement, NodeKind::ForStatement]
    );
    assert_eq!(program.body[1].data().id, NodeId(2));

    let Statement::For(for_stmt) = &program.body[2] else {
        panic!("expected a for statement");
    };
    // The loop head is not a statement slot.
    assert!(matches!(for_stmt.init, Some(ForInit::VariableDeclaration(_))));
    assert_eq!(for_stmt.body.kind(), NodeKind::EmptyStatement);
}

#[test]
fn test_array_holes_are_skipped() {
    let mut program = program(vec![expr_stmt(
        1,
        Expression::Array(Box::new(ArrayExpression {
            data: data(2),
            elements: vec![None, Some(ident_expr(3, "a")), None],
        })),
    )]);
    let mut recorder = Recorder::default();
    program.walk(&mut recorder);
    assert!(recorder.events.contains(&"enter a".to_string()));
    let Statement::Expression(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Array(array) = &stmt.expression else {
        panic!("expected an array");
    };
    assert_eq!(array.elements.len(), 3);
}
