//! ESTree JSON export.
//!
//! Produces the same field shape the translator reads: `body` and
//! `elements` on the program, `callee`/`arguments` on calls, `loc` and
//! `range` on every node that has them. Comments that were attached to
//! nodes are put back into the program's flat `comments` list, sorted by
//! position, so translating the output attaches them the same way again.

use crate::directive::Comment;
use crate::node::*;
use marv_core::text::{Position, SourceLocation, TextRange};
use serde_json::{json, Map, Value};

/// Export a program as an ESTree JSON tree.
pub fn to_estree(program: &Program) -> Value {
    let mut exporter = Exporter::default();
    let body: Vec<Value> = program
        .body
        .iter()
        .map(|stmt| exporter.statement(stmt))
        .collect();

    let mut comments: Vec<&Comment> = program.comments.iter().collect();
    comments.extend(exporter.comments.iter().copied());
    comments.sort_by_key(|c| {
        (
            c.range.map(|r| r.pos),
            c.loc.as_ref().map(|l| (l.start, l.end)),
        )
    });

    let mut out = exporter.node("Program", &program.data);
    out.insert("sourceType".into(), json!("script"));
    out.insert("body".into(), Value::Array(body.clone()));
    out.insert("elements".into(), Value::Array(body));
    out.insert(
        "comments".into(),
        Value::Array(comments.into_iter().map(comment).collect()),
    );
    Value::Object(out)
}

#[derive(Default)]
struct Exporter<'a> {
    comments: Vec<&'a Comment>,
}

impl<'a> Exporter<'a> {
    fn node(&mut self, tag: &str, data: &'a NodeData) -> Map<String, Value> {
        self.comments.extend(data.comments.iter());
        let mut map = Map::new();
        map.insert("type".into(), json!(tag));
        if let Some(loc) = &data.loc {
            map.insert("loc".into(), location(loc));
        }
        if let Some(range) = data.range {
            map.insert("range".into(), range_value(range));
        }
        map
    }

    fn finish(mut map: Map<String, Value>, fields: Value) -> Value {
        if let Value::Object(fields) = fields {
            map.extend(fields);
        }
        Value::Object(map)
    }

    fn opt_statement(&mut self, stmt: Option<&'a Statement>) -> Value {
        stmt.map_or(Value::Null, |s| self.statement(s))
    }

    fn opt_expression(&mut self, expr: Option<&'a Expression>) -> Value {
        expr.map_or(Value::Null, |e| self.expression(e))
    }

    fn statements(&mut self, list: &'a [Statement]) -> Value {
        Value::Array(list.iter().map(|s| self.statement(s)).collect())
    }

    fn expressions(&mut self, list: &'a [Expression]) -> Value {
        Value::Array(list.iter().map(|e| self.expression(e)).collect())
    }

    fn identifiers(&mut self, list: &'a [Identifier]) -> Value {
        Value::Array(list.iter().map(|id| self.identifier(id)).collect())
    }

    fn statement(&mut self, stmt: &'a Statement) -> Value {
        match stmt {
            Statement::Block(n) => self.block(n),
            Statement::Empty(n) => Value::Object(self.node("EmptyStatement", &n.data)),
            Statement::Expression(n) => {
                let map = self.node("ExpressionStatement", &n.data);
                let expression = self.expression(&n.expression);
                Self::finish(map, json!({ "expression": expression }))
            }
            Statement::If(n) => {
                let map = self.node("IfStatement", &n.data);
                let test = self.expression(&n.test);
                let consequent = self.statement(&n.consequent);
                let alternate = self.opt_statement(n.alternate.as_ref());
                Self::finish(
                    map,
                    json!({ "test": test, "consequent": consequent, "alternate": alternate }),
                )
            }
            Statement::Labeled(n) => {
                let map = self.node("LabeledStatement", &n.data);
                let label = self.identifier(&n.label);
                let body = self.statement(&n.body);
                Self::finish(map, json!({ "label": label, "body": body }))
            }
            Statement::Break(n) => {
                let map = self.node("BreakStatement", &n.data);
                let label = n.label.as_ref().map_or(Value::Null, |l| self.identifier(l));
                Self::finish(map, json!({ "label": label }))
            }
            Statement::Continue(n) => {
                let map = self.node("ContinueStatement", &n.data);
                let label = n.label.as_ref().map_or(Value::Null, |l| self.identifier(l));
                Self::finish(map, json!({ "label": label }))
            }
            Statement::Switch(n) => {
                let map = self.node("SwitchStatement", &n.data);
                let discriminant = self.expression(&n.discriminant);
                let cases: Vec<Value> = n.cases.iter().map(|c| self.switch_case(c)).collect();
                Self::finish(map, json!({ "discriminant": discriminant, "cases": cases }))
            }
            Statement::Return(n) => {
                let map = self.node("ReturnStatement", &n.data);
                let argument = self.opt_expression(n.argument.as_ref());
                Self::finish(map, json!({ "argument": argument }))
            }
            Statement::Throw(n) => {
                let map = self.node("ThrowStatement", &n.data);
                let argument = self.expression(&n.argument);
                Self::finish(map, json!({ "argument": argument }))
            }
            Statement::Try(n) => {
                let map = self.node("TryStatement", &n.data);
                let block = self.block(&n.block);
                let handler = n.handler.as_ref().map_or(Value::Null, |h| self.catch_clause(h));
                let finalizer = n.finalizer.as_ref().map_or(Value::Null, |f| self.block(f));
                Self::finish(
                    map,
                    json!({ "block": block, "handler": handler, "finalizer": finalizer }),
                )
            }
            Statement::While(n) => {
                let map = self.node("WhileStatement", &n.data);
                let test = self.expression(&n.test);
                let body = self.statement(&n.body);
                Self::finish(map, json!({ "test": test, "body": body }))
            }
            Statement::DoWhile(n) => {
                let map = self.node("DoWhileStatement", &n.data);
                let body = self.statement(&n.body);
                let test = self.expression(&n.test);
                Self::finish(map, json!({ "body": body, "test": test }))
            }
            Statement::For(n) => {
                let map = self.node("ForStatement", &n.data);
                let init = n.init.as_ref().map_or(Value::Null, |i| self.for_init(i));
                let test = self.opt_expression(n.test.as_ref());
                let update = self.opt_expression(n.update.as_ref());
                let body = self.statement(&n.body);
                Self::finish(
                    map,
                    json!({ "init": init, "test": test, "update": update, "body": body }),
                )
            }
            Statement::ForIn(n) => {
                let map = self.node("ForInStatement", &n.data);
                let left = self.for_init(&n.left);
                let right = self.expression(&n.right);
                let body = self.statement(&n.body);
                Self::finish(
                    map,
                    json!({ "left": left, "right": right, "body": body, "each": false }),
                )
            }
            Statement::Debugger(n) => Value::Object(self.node("DebuggerStatement", &n.data)),
            Statement::VariableDeclaration(n) => self.variable_declaration(n),
            Statement::FunctionDeclaration(n) => {
                let map = self.node("FunctionDeclaration", &n.data);
                let id = self.identifier(&n.id);
                let params = self.identifiers(&n.params);
                let body = self.block(&n.body);
                Self::finish(
                    map,
                    json!({
                        "id": id,
                        "params": params,
                        "body": body,
                        "generator": n.generator,
                        "expression": false,
                    }),
                )
            }
        }
    }

    fn block(&mut self, block: &'a BlockStatement) -> Value {
        let map = self.node("BlockStatement", &block.data);
        let body = self.statements(&block.body);
        Self::finish(map, json!({ "body": body }))
    }

    fn switch_case(&mut self, case: &'a SwitchCase) -> Value {
        let map = self.node("SwitchCase", &case.data);
        let test = self.opt_expression(case.test.as_ref());
        let consequent = self.statements(&case.consequent);
        Self::finish(map, json!({ "test": test, "consequent": consequent }))
    }

    fn catch_clause(&mut self, clause: &'a CatchClause) -> Value {
        let map = self.node("CatchClause", &clause.data);
        let param = self.identifier(&clause.param);
        let body = self.block(&clause.body);
        Self::finish(map, json!({ "param": param, "body": body }))
    }

    fn for_init(&mut self, init: &'a ForInit) -> Value {
        match init {
            ForInit::VariableDeclaration(decl) => self.variable_declaration(decl),
            ForInit::Expression(expr) => self.expression(expr),
        }
    }

    fn variable_declaration(&mut self, decl: &'a VariableDeclaration) -> Value {
        let map = self.node("VariableDeclaration", &decl.data);
        let declarations: Vec<Value> = decl
            .declarations
            .iter()
            .map(|d| {
                let map = self.node("VariableDeclarator", &d.data);
                let id = self.identifier(&d.id);
                let init = self.opt_expression(d.init.as_ref());
                Self::finish(map, json!({ "id": id, "init": init }))
            })
            .collect();
        Self::finish(
            map,
            json!({ "declarations": declarations, "kind": decl.kind.as_str() }),
        )
    }

    fn identifier(&mut self, id: &'a Identifier) -> Value {
        let map = self.node("Identifier", &id.data);
        Self::finish(map, json!({ "name": id.name }))
    }

    fn expression(&mut self, expr: &'a Expression) -> Value {
        match expr {
            Expression::Identifier(n) => self.identifier(n),
            Expression::Literal(n) => {
                let mut map = self.node("Literal", &n.data);
                let value = match &n.value {
                    LiteralValue::Null => Value::Null,
                    LiteralValue::Boolean(b) => json!(b),
                    LiteralValue::Number(x) => {
                        serde_json::Number::from_f64(*x).map_or(Value::Null, Value::Number)
                    }
                    LiteralValue::String(s) => json!(s),
                    LiteralValue::RegExp { pattern, flags } => {
                        map.insert("regex".into(), json!({ "pattern": pattern, "flags": flags }));
                        Value::Null
                    }
                };
                map.insert("value".into(), value);
                if let Some(raw) = &n.raw {
                    map.insert("raw".into(), json!(raw));
                }
                Value::Object(map)
            }
            Expression::This(n) => Value::Object(self.node("ThisExpression", &n.data)),
            Expression::Array(n) => {
                let map = self.node("ArrayExpression", &n.data);
                let elements: Vec<Value> = n
                    .elements
                    .iter()
                    .map(|e| self.opt_expression(e.as_ref()))
                    .collect();
                Self::finish(map, json!({ "elements": elements }))
            }
            Expression::Object(n) => {
                let map = self.node("ObjectExpression", &n.data);
                let properties: Vec<Value> = n
                    .properties
                    .iter()
                    .map(|p| {
                        let map = self.node("Property", &p.data);
                        let key = self.expression(&p.key);
                        let value = self.expression(&p.value);
                        Self::finish(
                            map,
                            json!({
                                "key": key,
                                "value": value,
                                "kind": p.kind.as_str(),
                                "computed": p.computed,
                                "shorthand": p.shorthand,
                                "method": false,
                            }),
                        )
                    })
                    .collect();
                Self::finish(map, json!({ "properties": properties }))
            }
            Expression::Function(n) => {
                let map = self.node("FunctionExpression", &n.data);
                let id = n.id.as_ref().map_or(Value::Null, |id| self.identifier(id));
                let params = self.identifiers(&n.params);
                let body = self.block(&n.body);
                Self::finish(
                    map,
                    json!({
                        "id": id,
                        "params": params,
                        "body": body,
                        "generator": n.generator,
                        "expression": false,
                    }),
                )
            }
            Expression::Unary(n) => {
                let map = self.node("UnaryExpression", &n.data);
                let argument = self.expression(&n.argument);
                Self::finish(
                    map,
                    json!({ "operator": n.operator.as_str(), "argument": argument, "prefix": true }),
                )
            }
            Expression::Update(n) => {
                let map = self.node("UpdateExpression", &n.data);
                let argument = self.expression(&n.argument);
                Self::finish(
                    map,
                    json!({ "operator": n.operator.as_str(), "argument": argument, "prefix": n.prefix }),
                )
            }
            Expression::Binary(n) => {
                let map = self.node("BinaryExpression", &n.data);
                let left = self.expression(&n.left);
                let right = self.expression(&n.right);
                Self::finish(
                    map,
                    json!({ "operator": n.operator.as_str(), "left": left, "right": right }),
                )
            }
            Expression::Logical(n) => {
                let map = self.node("LogicalExpression", &n.data);
                let left = self.expression(&n.left);
                let right = self.expression(&n.right);
                Self::finish(
                    map,
                    json!({ "operator": n.operator.as_str(), "left": left, "right": right }),
                )
            }
            Expression::Assignment(n) => {
                let map = self.node("AssignmentExpression", &n.data);
                let left = self.expression(&n.left);
                let right = self.expression(&n.right);
                Self::finish(
                    map,
                    json!({ "operator": n.operator.as_str(), "left": left, "right": right }),
                )
            }
            Expression::Conditional(n) => {
                let map = self.node("ConditionalExpression", &n.data);
                let test = self.expression(&n.test);
                let consequent = self.expression(&n.consequent);
                let alternate = self.expression(&n.alternate);
                Self::finish(
                    map,
                    json!({ "test": test, "consequent": consequent, "alternate": alternate }),
                )
            }
            Expression::Call(n) => {
                let map = self.node("CallExpression", &n.data);
                let callee = self.expression(&n.callee);
                let arguments = self.expressions(&n.arguments);
                Self::finish(map, json!({ "callee": callee, "arguments": arguments }))
            }
            Expression::New(n) => {
                let map = self.node("NewExpression", &n.data);
                let callee = self.expression(&n.callee);
                let arguments = self.expressions(&n.arguments);
                Self::finish(map, json!({ "callee": callee, "arguments": arguments }))
            }
            Expression::Member(n) => {
                let map = self.node("MemberExpression", &n.data);
                let object = self.expression(&n.object);
                let property = self.expression(&n.property);
                Self::finish(
                    map,
                    json!({ "object": object, "property": property, "computed": n.computed }),
                )
            }
            Expression::Sequence(n) => {
                let map = self.node("SequenceExpression", &n.data);
                let expressions = self.expressions(&n.expressions);
                Self::finish(map, json!({ "expressions": expressions }))
            }
        }
    }
}

fn position(pos: Position) -> Value {
    json!({ "line": pos.line, "column": pos.column })
}

fn location(loc: &SourceLocation) -> Value {
    let mut value = json!({ "start": position(loc.start), "end": position(loc.end) });
    if let (Some(source), Value::Object(map)) = (&loc.source, &mut value) {
        map.insert("source".into(), json!(source.as_ref()));
    }
    value
}

fn range_value(range: TextRange) -> Value {
    json!([range.pos, range.end])
}

fn comment(c: &Comment) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), json!(c.kind.as_str()));
    map.insert("value".into(), json!(c.value));
    if let Some(loc) = &c.loc {
        map.insert("loc".into(), location(loc));
    }
    if let Some(range) = c.range {
        map.insert("range".into(), range_value(range));
    }
    Value::Object(map)
}
