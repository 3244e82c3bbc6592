//! ESTree JSON to typed AST translation.
//!
//! Nodes receive their ids in pre-order, and doc comments are claimed when
//! a node is first reached, before its children. The typed node itself is
//! built bottom-up: children are translated first, then converted to the
//! capability the parent's field needs.

use crate::comments::CommentAttacher;
use crate::error::TranslateError;
use crate::utilities::{get_flag, get_str, is_absent, location, node_type, range, split_regex};
use marv_ast::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, debug_span};

/// Maximum nesting depth accepted before translation gives up. Callers
/// translating input near this depth need a thread stack of at least
/// [`MIN_STACK_SIZE`].
pub const MAX_DEPTH: u32 = 1000;

/// Thread stack, in bytes, that fits [`MAX_DEPTH`] levels of translation,
/// resolution and printing in an unoptimized build.
pub const MIN_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Translate an ESTree `Program` into a typed [`Program`].
///
/// `file_name` is recorded in every node location.
pub fn translate(estree: &Value, file_name: Option<&str>) -> Result<Program, TranslateError> {
    Translator::new(file_name).translate_program(estree)
}

/// Converts one ESTree tree. A translator is single-use.
pub struct Translator {
    file_name: Option<Arc<str>>,
    comments: CommentAttacher,
    next_id: u32,
    depth: u32,
}

impl Translator {
    pub fn new(file_name: Option<&str>) -> Self {
        Self {
            file_name: file_name.map(Arc::from),
            comments: CommentAttacher::new(),
            next_id: 0,
            depth: 0,
        }
    }

    pub fn translate_program(mut self, raw: &Value) -> Result<Program, TranslateError> {
        let _span = debug_span!("translate", file = self.file_name.as_deref().unwrap_or("<input>")).entered();
        if node_type(raw) != Some("Program") {
            return match node_type(raw) {
                Some(tag) if NodeKind::from_tag(tag).is_none() => Err(TranslateError::UnhandledNodeKind {
                    tag: tag.to_string(),
                    loc: location(raw, self.file_name.as_ref()),
                }),
                _ => Err(TranslateError::NotAProgram),
            };
        }

        let mut data = self.node_data(raw);
        let comments = self.read_comments(raw)?;
        self.comments.add_comments(comments)?;

        // SpiderMonkey-style trees name the statement list `elements`.
        let field = if is_absent(raw, "body") && !is_absent(raw, "elements") {
            "elements"
        } else {
            "body"
        };
        let body = self
            .children(raw, NodeKind::Program, field)?
            .into_iter()
            .map(AnyNode::into_statement)
            .collect::<Result<Vec<_>, _>>()?;

        let unattached = self.comments.take_unattached();
        data.directives = self.comments.record(data.id, &unattached);
        debug!(
            statements = body.len(),
            unattached = unattached.len(),
            "translation done"
        );

        Ok(Program {
            data,
            body,
            comments: unattached,
            directive_index: self.comments.into_directive_index(),
        })
    }

    // ========================================================================
    // Node plumbing
    // ========================================================================

    fn node_data(&mut self, raw: &Value) -> NodeData {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        NodeData::new(id, location(raw, self.file_name.as_ref()), range(raw))
    }

    fn read_comments(&self, raw: &Value) -> Result<Vec<Comment>, TranslateError> {
        let Some(list) = raw.get("comments").and_then(Value::as_array) else {
            return Ok(Vec::new());
        };
        list.iter()
            .map(|c| {
                let tag = get_str(c, "type").ok_or_else(|| TranslateError::MalformedComment {
                    reason: "comment has no `type`".to_string(),
                })?;
                let kind = CommentKind::from_str(tag).ok_or_else(|| TranslateError::MalformedComment {
                    reason: format!("unknown comment type `{}`", tag),
                })?;
                let value = get_str(c, "value").ok_or_else(|| TranslateError::MalformedComment {
                    reason: "comment has no `value`".to_string(),
                })?;
                Ok(Comment {
                    kind,
                    value: value.to_string(),
                    loc: location(c, self.file_name.as_ref()),
                    range: range(c),
                })
            })
            .collect()
    }

    /// A required child node.
    fn child(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<AnyNode, TranslateError> {
        match raw.get(field) {
            None | Some(Value::Null) => Err(TranslateError::MissingField { kind, field }),
            Some(value) => self.node_in(value, kind, field),
        }
    }

    /// An optional child node; absent and `null` both mean none.
    fn opt_child(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Option<AnyNode>, TranslateError> {
        match raw.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.node_in(value, kind, field).map(Some),
        }
    }

    /// A required list of child nodes.
    fn children(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Vec<AnyNode>, TranslateError> {
        self.opt_children(raw, kind, field)?
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(TranslateError::NotANode { kind, field })
    }

    /// A list of child nodes where `null` entries are holes.
    fn opt_children(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Vec<Option<AnyNode>>, TranslateError> {
        let list = match raw.get(field) {
            None | Some(Value::Null) => return Err(TranslateError::MissingField { kind, field }),
            Some(Value::Array(list)) => list,
            Some(_) => return Err(TranslateError::NotANode { kind, field }),
        };
        list.iter()
            .map(|item| match item {
                Value::Null => Ok(None),
                item => self.node_in(item, kind, field).map(Some),
            })
            .collect()
    }

    fn node_in(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<AnyNode, TranslateError> {
        if node_type(raw).is_none() {
            return Err(TranslateError::NotANode { kind, field });
        }
        self.node(raw)
    }

    fn expression(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Expression, TranslateError> {
        Ok(self.child(raw, kind, field)?.into_expression()?)
    }

    fn opt_expression(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Option<Expression>, TranslateError> {
        Ok(self.opt_child(raw, kind, field)?.map(AnyNode::into_expression).transpose()?)
    }

    fn expressions(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Vec<Expression>, TranslateError> {
        Ok(self
            .children(raw, kind, field)?
            .into_iter()
            .map(AnyNode::into_expression)
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn statement(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Statement, TranslateError> {
        Ok(self.child(raw, kind, field)?.into_statement()?)
    }

    fn statements(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Vec<Statement>, TranslateError> {
        Ok(self
            .children(raw, kind, field)?
            .into_iter()
            .map(AnyNode::into_statement)
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn block(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<BlockStatement, TranslateError> {
        Ok(self.child(raw, kind, field)?.into_block()?)
    }

    fn identifier(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Identifier, TranslateError> {
        Ok(self.child(raw, kind, field)?.into_identifier()?)
    }

    fn binder(&mut self, raw: &Value, kind: NodeKind, field: &'static str) -> Result<Identifier, TranslateError> {
        let mut id = self.identifier(raw, kind, field)?;
        id.is_binder = true;
        Ok(id)
    }

    fn params(&mut self, raw: &Value, kind: NodeKind) -> Result<Vec<Identifier>, TranslateError> {
        self.children(raw, kind, "params")?
            .into_iter()
            .map(|param| {
                let mut id = param.into_identifier()?;
                id.is_binder = true;
                Ok(id)
            })
            .collect()
    }

    fn operator<T>(
        raw: &Value,
        kind: NodeKind,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, TranslateError> {
        let op = get_str(raw, "operator").ok_or(TranslateError::MissingField {
            kind,
            field: "operator",
        })?;
        parse(op).ok_or_else(|| TranslateError::UnsupportedConstruct {
            kind,
            reason: format!("operator `{}`", op),
        })
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Translate any supported node.
    pub fn node(&mut self, raw: &Value) -> Result<AnyNode, TranslateError> {
        let tag = node_type(raw).unwrap_or_default();
        let kind = NodeKind::from_tag(tag).ok_or_else(|| TranslateError::UnhandledNodeKind {
            tag: tag.to_string(),
            loc: location(raw, self.file_name.as_ref()),
        })?;
        if self.depth >= MAX_DEPTH {
            return Err(TranslateError::NestingTooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let result = self.translate_kind(raw, kind);
        self.depth -= 1;
        result
    }

    fn translate_kind(&mut self, raw: &Value, kind: NodeKind) -> Result<AnyNode, TranslateError> {
        let mut data = self.node_data(raw);
        if kind.accepts_comments() {
            if let Some(line) = data.start_line() {
                let comments = self.comments.take_for_line(line);
                if !comments.is_empty() {
                    data.directives = self.comments.record(data.id, &comments);
                    debug!(kind = %kind, id = %data.id, comments = comments.len(), "node has comments");
                    data.comments = comments;
                }
            }
        }

        match kind {
            NodeKind::Program => Err(CapabilityError {
                kind,
                expected: "a nested node",
            }
            .into()),
            NodeKind::Property => self.translate_expression(raw, kind, data),
            kind if kind.is_expression() => self.translate_expression(raw, kind, data),
            _ => self.translate_statement(raw, kind, data),
        }
    }

    // One frame of these per nesting level; keep them out of `translate_kind`.

    #[inline(never)]
    fn translate_statement(&mut self, raw: &Value, kind: NodeKind, data: NodeData) -> Result<AnyNode, TranslateError> {
        let node: AnyNode = match kind {
            // -- Statements --
            NodeKind::BlockStatement => {
                let body = self.statements(raw, kind, "body")?;
                Statement::Block(Box::new(BlockStatement { data, body })).into()
            }
            NodeKind::EmptyStatement => Statement::Empty(Box::new(EmptyStatement { data })).into(),
            NodeKind::ExpressionStatement => {
                let expression = self.expression(raw, kind, "expression")?;
                Statement::Expression(Box::new(ExpressionStatement { data, expression })).into()
            }
            NodeKind::IfStatement => {
                let test = self.expression(raw, kind, "test")?;
                let consequent = self.statement(raw, kind, "consequent")?;
                let alternate = self
                    .opt_child(raw, kind, "alternate")?
                    .map(AnyNode::into_statement)
                    .transpose()?;
                Statement::If(Box::new(IfStatement { data, test, consequent, alternate })).into()
            }
            NodeKind::LabeledStatement => {
                let label = self.identifier(raw, kind, "label")?;
                let body = self.statement(raw, kind, "body")?;
                Statement::Labeled(Box::new(LabeledStatement { data, label, body })).into()
            }
            NodeKind::BreakStatement => {
                let label = self
                    .opt_child(raw, kind, "label")?
                    .map(AnyNode::into_identifier)
                    .transpose()?;
                Statement::Break(Box::new(BreakStatement { data, label })).into()
            }
            NodeKind::ContinueStatement => {
                let label = self
                    .opt_child(raw, kind, "label")?
                    .map(AnyNode::into_identifier)
                    .transpose()?;
                Statement::Continue(Box::new(ContinueStatement { data, label })).into()
            }
            NodeKind::SwitchStatement => {
                let discriminant = self.expression(raw, kind, "discriminant")?;
                let cases = self
                    .children(raw, kind, "cases")?
                    .into_iter()
                    .map(AnyNode::into_switch_case)
                    .collect::<Result<Vec<_>, _>>()?;
                Statement::Switch(Box::new(SwitchStatement { data, discriminant, cases })).into()
            }
            NodeKind::ReturnStatement => {
                let argument = self.opt_expression(raw, kind, "argument")?;
                Statement::Return(Box::new(ReturnStatement { data, argument })).into()
            }
            NodeKind::ThrowStatement => {
                let argument = self.expression(raw, kind, "argument")?;
                Statement::Throw(Box::new(ThrowStatement { data, argument })).into()
            }
            NodeKind::TryStatement => {
                let block = self.block(raw, kind, "block")?;
                let handler = self.handler(raw, kind)?;
                let finalizer = self
                    .opt_child(raw, kind, "finalizer")?
                    .map(AnyNode::into_block)
                    .transpose()?;
                Statement::Try(Box::new(TryStatement { data, block, handler, finalizer })).into()
            }
            NodeKind::WhileStatement => {
                let test = self.expression(raw, kind, "test")?;
                let body = self.statement(raw, kind, "body")?;
                Statement::While(Box::new(WhileStatement { data, test, body })).into()
            }
            NodeKind::DoWhileStatement => {
                let body = self.statement(raw, kind, "body")?;
                let test = self.expression(raw, kind, "test")?;
                Statement::DoWhile(Box::new(DoWhileStatement { data, body, test })).into()
            }
            NodeKind::ForStatement => {
                let init = self
                    .opt_child(raw, kind, "init")?
                    .map(AnyNode::into_for_init)
                    .transpose()?;
                let test = self.opt_expression(raw, kind, "test")?;
                let update = self.opt_expression(raw, kind, "update")?;
                let body = self.statement(raw, kind, "body")?;
                Statement::For(Box::new(ForStatement { data, init, test, update, body })).into()
            }
            NodeKind::ForInStatement => {
                if get_flag(raw, "each") {
                    return Err(TranslateError::UnsupportedConstruct {
                        kind,
                        reason: "`for each` loops".to_string(),
                    });
                }
                let left = self.child(raw, kind, "left")?.into_for_init()?;
                let right = self.expression(raw, kind, "right")?;
                let body = self.statement(raw, kind, "body")?;
                Statement::ForIn(Box::new(ForInStatement { data, left, right, body })).into()
            }
            NodeKind::DebuggerStatement => Statement::Debugger(Box::new(DebuggerStatement { data })).into(),

            // -- Declarations --
            NodeKind::VariableDeclaration => {
                let decl_kind = get_str(raw, "kind")
                    .and_then(DeclKind::from_variable_kind)
                    .ok_or_else(|| TranslateError::UnsupportedConstruct {
                        kind,
                        reason: format!("declaration kind `{}`", get_str(raw, "kind").unwrap_or("<none>")),
                    })?;
                let declarations = self
                    .children(raw, kind, "declarations")?
                    .into_iter()
                    .map(|d| {
                        let mut declarator = d.into_variable_declarator()?;
                        declarator.kind = decl_kind;
                        Ok(declarator)
                    })
                    .collect::<Result<Vec<_>, TranslateError>>()?;
                Statement::VariableDeclaration(Box::new(VariableDeclaration {
                    data,
                    declarations,
                    kind: decl_kind,
                }))
                .into()
            }
            NodeKind::VariableDeclarator => {
                let id = self.binder(raw, kind, "id")?;
                let init = self.opt_expression(raw, kind, "init")?;
                AnyNode::VariableDeclarator(Box::new(VariableDeclarator {
                    data,
                    id,
                    init,
                    kind: DeclKind::Var,
                }))
            }
            NodeKind::FunctionDeclaration => {
                self.check_plain_function(raw, kind)?;
                let id = self.binder(raw, kind, "id")?;
                let params = self.params(raw, kind)?;
                let body = self.block(raw, kind, "body")?;
                Statement::FunctionDeclaration(Box::new(FunctionDeclaration {
                    data,
                    id,
                    params,
                    body,
                    generator: get_flag(raw, "generator"),
                }))
                .into()
            }

            // -- Clauses --
            NodeKind::SwitchCase => {
                let test = self.opt_expression(raw, kind, "test")?;
                let consequent = self.statements(raw, kind, "consequent")?;
                AnyNode::SwitchCase(Box::new(SwitchCase { data, test, consequent }))
            }
            NodeKind::CatchClause => {
                if !is_absent(raw, "guard") {
                    return Err(TranslateError::UnsupportedConstruct {
                        kind,
                        reason: "guarded catch clauses".to_string(),
                    });
                }
                let param = self.binder(raw, kind, "param")?;
                let body = self.block(raw, kind, "body")?;
                AnyNode::CatchClause(Box::new(CatchClause { data, param, body }))
            }
            _ => {
                return Err(CapabilityError {
                    kind,
                    expected: "a statement or clause",
                }
                .into())
            }
        };
        Ok(node)
    }

    #[inline(never)]
    fn translate_expression(&mut self, raw: &Value, kind: NodeKind, data: NodeData) -> Result<AnyNode, TranslateError> {
        let node: AnyNode = match kind {
            NodeKind::Identifier => {
                let name = get_str(raw, "name").ok_or(TranslateError::MissingField { kind, field: "name" })?;
                Expression::Identifier(Box::new(Identifier::new(data, name))).into()
            }
            NodeKind::Literal => {
                let value = literal_value(raw)?;
                let raw_text = get_str(raw, "raw").map(str::to_string);
                Expression::Literal(Box::new(Literal { data, value, raw: raw_text })).into()
            }
            NodeKind::ThisExpression => Expression::This(Box::new(ThisExpression { data })).into(),
            NodeKind::ArrayExpression => {
                let elements = self
                    .opt_children(raw, kind, "elements")?
                    .into_iter()
                    .map(|e| e.map(AnyNode::into_expression).transpose())
                    .collect::<Result<Vec<_>, _>>()?;
                Expression::Array(Box::new(ArrayExpression { data, elements })).into()
            }
            NodeKind::ObjectExpression => {
                let properties = self
                    .children(raw, kind, "properties")?
                    .into_iter()
                    .map(AnyNode::into_property)
                    .collect::<Result<Vec<_>, _>>()?;
                Expression::Object(Box::new(ObjectExpression { data, properties })).into()
            }
            NodeKind::Property => {
                let key = self.expression(raw, kind, "key")?;
                let value = self.expression(raw, kind, "value")?;
                let prop_kind = match get_str(raw, "kind") {
                    None => PropertyKind::Init,
                    Some(k) => PropertyKind::from_str(k).ok_or_else(|| TranslateError::UnsupportedConstruct {
                        kind,
                        reason: format!("property kind `{}`", k),
                    })?,
                };
                AnyNode::Property(Box::new(Property {
                    data,
                    key,
                    value,
                    kind: prop_kind,
                    computed: get_flag(raw, "computed"),
                    shorthand: get_flag(raw, "shorthand"),
                }))
            }
            NodeKind::FunctionExpression => {
                self.check_plain_function(raw, kind)?;
                let id = self
                    .opt_child(raw, kind, "id")?
                    .map(|id| {
                        id.into_identifier().map(|mut id| {
                            id.is_binder = true;
                            id
                        })
                    })
                    .transpose()?;
                let params = self.params(raw, kind)?;
                let body = self.block(raw, kind, "body")?;
                Expression::Function(Box::new(FunctionExpression {
                    data,
                    id,
                    params,
                    body,
                    generator: get_flag(raw, "generator"),
                }))
                .into()
            }
            NodeKind::UnaryExpression => {
                let operator = Self::operator(raw, kind, UnaryOperator::from_str)?;
                let argument = self.expression(raw, kind, "argument")?;
                Expression::Unary(Box::new(UnaryExpression { data, operator, argument })).into()
            }
            NodeKind::UpdateExpression => {
                let operator = Self::operator(raw, kind, UpdateOperator::from_str)?;
                let argument = self.expression(raw, kind, "argument")?;
                Expression::Update(Box::new(UpdateExpression {
                    data,
                    operator,
                    argument,
                    prefix: get_flag(raw, "prefix"),
                }))
                .into()
            }
            NodeKind::BinaryExpression => {
                let operator = Self::operator(raw, kind, BinaryOperator::from_str)?;
                let left = self.expression(raw, kind, "left")?;
                let right = self.expression(raw, kind, "right")?;
                Expression::Binary(Box::new(BinaryExpression { data, operator, left, right })).into()
            }
            NodeKind::LogicalExpression => {
                let operator = Self::operator(raw, kind, LogicalOperator::from_str)?;
                let left = self.expression(raw, kind, "left")?;
                let right = self.expression(raw, kind, "right")?;
                Expression::Logical(Box::new(LogicalExpression { data, operator, left, right })).into()
            }
            NodeKind::AssignmentExpression => {
                let operator = Self::operator(raw, kind, AssignmentOperator::from_str)?;
                let left = self.expression(raw, kind, "left")?;
                let right = self.expression(raw, kind, "right")?;
                Expression::Assignment(Box::new(AssignmentExpression { data, operator, left, right })).into()
            }
            NodeKind::ConditionalExpression => {
                let test = self.expression(raw, kind, "test")?;
                let consequent = self.expression(raw, kind, "consequent")?;
                let alternate = self.expression(raw, kind, "alternate")?;
                Expression::Conditional(Box::new(ConditionalExpression {
                    data,
                    test,
                    consequent,
                    alternate,
                }))
                .into()
            }
            NodeKind::CallExpression => {
                let callee = self.expression(raw, kind, "callee")?;
                let arguments = self.expressions(raw, kind, "arguments")?;
                Expression::Call(Box::new(CallExpression { data, callee, arguments })).into()
            }
            NodeKind::NewExpression => {
                let callee = self.expression(raw, kind, "callee")?;
                let arguments = if is_absent(raw, "arguments") {
                    Vec::new()
                } else {
                    self.expressions(raw, kind, "arguments")?
                };
                Expression::New(Box::new(NewExpression { data, callee, arguments })).into()
            }
            NodeKind::MemberExpression => {
                let object = self.expression(raw, kind, "object")?;
                let property = self.expression(raw, kind, "property")?;
                Expression::Member(Box::new(MemberExpression {
                    data,
                    object,
                    property,
                    computed: get_flag(raw, "computed"),
                }))
                .into()
            }
            NodeKind::SequenceExpression => {
                let expressions = self.expressions(raw, kind, "expressions")?;
                Expression::Sequence(Box::new(SequenceExpression { data, expressions })).into()
            }
            _ => {
                return Err(CapabilityError {
                    kind,
                    expected: "an expression",
                }
                .into())
            }
        };
        Ok(node)
    }

    /// `handler` in current ESTree; older esprima releases emit a
    /// `handlers` array instead.
    fn handler(&mut self, raw: &Value, kind: NodeKind) -> Result<Option<CatchClause>, TranslateError> {
        if !is_absent(raw, "handler") {
            return Ok(self
                .opt_child(raw, kind, "handler")?
                .map(AnyNode::into_catch_clause)
                .transpose()?);
        }
        if is_absent(raw, "handlers") {
            return Ok(None);
        }
        let mut handlers = self.children(raw, kind, "handlers")?;
        if handlers.len() > 1 {
            return Err(TranslateError::UnsupportedConstruct {
                kind,
                reason: "more than one catch clause".to_string(),
            });
        }
        Ok(handlers.pop().map(AnyNode::into_catch_clause).transpose()?)
    }

    fn check_plain_function(&self, raw: &Value, kind: NodeKind) -> Result<(), TranslateError> {
        if get_flag(raw, "async") {
            return Err(TranslateError::UnsupportedConstruct {
                kind,
                reason: "async functions".to_string(),
            });
        }
        if get_flag(raw, "expression") {
            return Err(TranslateError::UnsupportedConstruct {
                kind,
                reason: "expression-bodied functions".to_string(),
            });
        }
        let has_defaults = raw
            .get("defaults")
            .and_then(Value::as_array)
            .map_or(false, |d| d.iter().any(|v| !v.is_null()));
        if has_defaults {
            return Err(TranslateError::UnsupportedConstruct {
                kind,
                reason: "default parameter values".to_string(),
            });
        }
        Ok(())
    }
}

fn literal_value(raw: &Value) -> Result<LiteralValue, TranslateError> {
    if let Some(regex) = raw.get("regex").filter(|r| r.is_object()) {
        return Ok(LiteralValue::RegExp {
            pattern: get_str(regex, "pattern").unwrap_or_default().to_string(),
            flags: get_str(regex, "flags").unwrap_or_default().to_string(),
        });
    }
    match raw.get("value") {
        Some(Value::Bool(b)) => Ok(LiteralValue::Boolean(*b)),
        Some(Value::Number(n)) => Ok(LiteralValue::Number(n.as_f64().unwrap_or(f64::NAN))),
        Some(Value::String(s)) => Ok(LiteralValue::String(s.clone())),
        // Regular expressions serialize their value as `{}` when the
        // parser does not also emit `regex`.
        Some(Value::Object(_)) | Some(Value::Null) | None => {
            match get_str(raw, "raw").and_then(split_regex) {
                Some((pattern, flags)) => Ok(LiteralValue::RegExp { pattern, flags }),
                None if matches!(raw.get("value"), Some(Value::Object(_))) => {
                    Err(TranslateError::UnsupportedConstruct {
                        kind: NodeKind::Literal,
                        reason: "literal value is an object".to_string(),
                    })
                }
                None => Ok(LiteralValue::Null),
            }
        }
        Some(Value::Array(_)) => Err(TranslateError::UnsupportedConstruct {
            kind: NodeKind::Literal,
            reason: "literal value is an array".to_string(),
        }),
    }
}
