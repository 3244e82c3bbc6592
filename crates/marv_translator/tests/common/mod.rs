//! ESTree builders for tests.
//!
//! Every node spans a single line; `line` is that line.

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn loc(line: u32) -> Value {
    json!({ "start": { "line": line, "column": 0 }, "end": { "line": line, "column": 40 } })
}

fn node(tag: &str, line: u32, fields: Value) -> Value {
    let mut map = json!({ "type": tag, "loc": loc(line) });
    if let (Value::Object(map), Value::Object(fields)) = (&mut map, fields) {
        map.extend(fields);
    }
    map
}

pub fn program(body: Vec<Value>, comments: Vec<Value>) -> Value {
    json!({
        "type": "Program",
        "body": body,
        "comments": comments,
        "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 100, "column": 0 } },
        "range": [0, 4000]
    })
}

pub fn doc_comment(value: &str, start_line: u32, end_line: u32) -> Value {
    json!({
        "type": "Block",
        "value": value,
        "loc": { "start": { "line": start_line, "column": 0 }, "end": { "line": end_line, "column": 2 } }
    })
}

pub fn line_comment(value: &str, line: u32) -> Value {
    json!({ "type": "Line", "value": value, "loc": loc(line) })
}

pub fn ident(name: &str, line: u32) -> Value {
    node("Identifier", line, json!({ "name": name }))
}

pub fn num(value: f64, line: u32) -> Value {
    node("Literal", line, json!({ "value": value, "raw": value.to_string() }))
}

pub fn string(value: &str, line: u32) -> Value {
    node("Literal", line, json!({ "value": value, "raw": format!("\"{}\"", value) }))
}

pub fn var_decl(kind: &str, declarators: Vec<(&str, Option<Value>)>, line: u32) -> Value {
    let declarations: Vec<Value> = declarators
        .into_iter()
        .map(|(name, init)| {
            node(
                "VariableDeclarator",
                line,
                json!({ "id": ident(name, line), "init": init }),
            )
        })
        .collect();
    node("VariableDeclaration", line, json!({ "kind": kind, "declarations": declarations }))
}

pub fn block(body: Vec<Value>, line: u32) -> Value {
    node("BlockStatement", line, json!({ "body": body }))
}

pub fn func_decl(name: &str, params: &[&str], body: Vec<Value>, line: u32) -> Value {
    let params: Vec<Value> = params.iter().map(|p| ident(p, line)).collect();
    node(
        "FunctionDeclaration",
        line,
        json!({ "id": ident(name, line), "params": params, "body": block(body, line), "generator": false }),
    )
}

pub fn func_expr(name: Option<&str>, params: &[&str], body: Vec<Value>, line: u32) -> Value {
    let params: Vec<Value> = params.iter().map(|p| ident(p, line)).collect();
    let id = name.map_or(Value::Null, |n| ident(n, line));
    node(
        "FunctionExpression",
        line,
        json!({ "id": id, "params": params, "body": block(body, line), "generator": false }),
    )
}

pub fn expr_stmt(expression: Value, line: u32) -> Value {
    node("ExpressionStatement", line, json!({ "expression": expression }))
}

pub fn call(callee: Value, arguments: Vec<Value>, line: u32) -> Value {
    node("CallExpression", line, json!({ "callee": callee, "arguments": arguments }))
}

pub fn binary(operator: &str, left: Value, right: Value, line: u32) -> Value {
    node("BinaryExpression", line, json!({ "operator": operator, "left": left, "right": right }))
}

pub fn assign(left: Value, right: Value, line: u32) -> Value {
    node("AssignmentExpression", line, json!({ "operator": "=", "left": left, "right": right }))
}

pub fn member(object: Value, property: Value, computed: bool, line: u32) -> Value {
    node("MemberExpression", line, json!({ "object": object, "property": property, "computed": computed }))
}

pub fn ret(argument: Option<Value>, line: u32) -> Value {
    node("ReturnStatement", line, json!({ "argument": argument }))
}

pub fn if_stmt(test: Value, consequent: Value, alternate: Option<Value>, line: u32) -> Value {
    node("IfStatement", line, json!({ "test": test, "consequent": consequent, "alternate": alternate }))
}

pub fn try_stmt(body: Vec<Value>, param: &str, handler_body: Vec<Value>, line: u32) -> Value {
    let handler = node("CatchClause", line, json!({ "param": ident(param, line), "body": block(handler_body, line) }));
    node("TryStatement", line, json!({ "block": block(body, line), "handler": handler, "finalizer": null }))
}

pub fn raw_node(tag: &str, line: u32, fields: Value) -> Value {
    node(tag, line, fields)
}
