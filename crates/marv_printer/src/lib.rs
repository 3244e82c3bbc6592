//! marv_printer: AST to text output.
//!
//! Converts a typed program back into JavaScript source. Parentheses are
//! inserted from the precedence table, so the output re-parses to the same
//! tree. Literals keep their original source text when they have one, and
//! doc comments can be written back in front of the statements they
//! document.

pub mod precedence;

use marv_ast::*;
use precedence::*;

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
    /// Whether to print attached and unattached doc comments.
    pub preserve_comments: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
            trailing_newline: true,
            preserve_comments: true,
        }
    }
}

/// The printer converts AST nodes to text.
pub struct Printer {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
        }
    }

    /// Print a program to a string.
    pub fn print_program(&mut self, program: &Program) -> String {
        self.output.clear();
        self.indent_level = 0;
        if self.options.preserve_comments {
            for comment in &program.comments {
                self.print_comment(comment);
                self.write_newline();
            }
        }
        for (i, stmt) in program.body.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.write_indent();
            self.print_statement(stmt);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    /// Print a single expression to a string.
    pub fn print_expression_text(&mut self, expr: &Expression) -> String {
        self.output.clear();
        self.print_expression(expr, Prec::LOWEST);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn print_comment(&mut self, comment: &Comment) {
        match comment.kind {
            CommentKind::Block => {
                self.write("/*");
                self.write(&comment.value);
                self.write("*/");
            }
            CommentKind::Line => {
                self.write("//");
                self.write(&comment.value);
            }
        }
    }

    /// Attached comments, each on its own line at the current indentation.
    fn print_leading_comments(&mut self, data: &NodeData) {
        if !self.options.preserve_comments {
            return;
        }
        for comment in &data.comments {
            self.print_comment(comment);
            self.write_newline();
            self.write_indent();
        }
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, stmt: &Statement) {
        self.print_leading_comments(stmt.data());
        match stmt {
            Statement::Block(n) => self.print_block(n),
            Statement::Empty(_) => self.write(";"),
            Statement::Expression(n) => {
                if starts_with_function_or_brace(&n.expression) {
                    self.write("(");
                    self.print_expression(&n.expression, Prec::LOWEST);
                    self.write(")");
                } else {
                    self.print_expression(&n.expression, Prec::LOWEST);
                }
                self.write(";");
            }
            Statement::If(n) => self.print_if_statement(n),
            Statement::Labeled(n) => {
                self.print_identifier(&n.label);
                self.write(": ");
                self.print_statement(&n.body);
            }
            Statement::Break(n) => {
                self.write("break");
                if let Some(ref label) = n.label {
                    self.write(" ");
                    self.print_identifier(label);
                }
                self.write(";");
            }
            Statement::Continue(n) => {
                self.write("continue");
                if let Some(ref label) = n.label {
                    self.write(" ");
                    self.print_identifier(label);
                }
                self.write(";");
            }
            Statement::Switch(n) => self.print_switch_statement(n),
            Statement::Return(n) => {
                self.write("return");
                if let Some(ref argument) = n.argument {
                    self.write(" ");
                    self.print_expression(argument, Prec::LOWEST);
                }
                self.write(";");
            }
            Statement::Throw(n) => {
                self.write("throw ");
                self.print_expression(&n.argument, Prec::LOWEST);
                self.write(";");
            }
            Statement::Try(n) => self.print_try_statement(n),
            Statement::While(n) => {
                self.write("while (");
                self.print_expression(&n.test, Prec::LOWEST);
                self.write(") ");
                self.print_statement(&n.body);
            }
            Statement::DoWhile(n) => {
                self.write("do ");
                self.print_statement(&n.body);
                self.write(" while (");
                self.print_expression(&n.test, Prec::LOWEST);
                self.write(");");
            }
            Statement::For(n) => self.print_for_statement(n),
            Statement::ForIn(n) => {
                self.write("for (");
                self.print_for_init(&n.left);
                self.write(" in ");
                self.print_expression(&n.right, Prec::LOWEST);
                self.write(") ");
                self.print_statement(&n.body);
            }
            Statement::Debugger(_) => self.write("debugger;"),
            Statement::VariableDeclaration(n) => {
                self.print_variable_declaration(n, false);
                self.write(";");
            }
            Statement::FunctionDeclaration(n) => {
                self.print_function(Some(&n.id), &n.params, &n.body, n.generator);
            }
        }
    }

    fn print_block(&mut self, node: &BlockStatement) {
        self.write("{");
        if !node.body.is_empty() {
            self.increase_indent();
            for stmt in node.body.iter() {
                self.write_newline();
                self.write_indent();
                self.print_statement(stmt);
            }
            self.decrease_indent();
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_if_statement(&mut self, node: &IfStatement) {
        self.write("if (");
        self.print_expression(&node.test, Prec::LOWEST);
        self.write(") ");
        match node.alternate {
            Some(ref alternate) => {
                // An `else` after an open `if` would bind to the inner one.
                if ends_with_open_if(&node.consequent) {
                    self.write("{");
                    self.increase_indent();
                    self.write_newline();
                    self.write_indent();
                    self.print_statement(&node.consequent);
                    self.decrease_indent();
                    self.write_newline();
                    self.write_indent();
                    self.write("}");
                } else {
                    self.print_statement(&node.consequent);
                }
                self.write(" else ");
                self.print_statement(alternate);
            }
            None => self.print_statement(&node.consequent),
        }
    }

    fn print_switch_statement(&mut self, node: &SwitchStatement) {
        self.write("switch (");
        self.print_expression(&node.discriminant, Prec::LOWEST);
        self.write(") {");
        self.increase_indent();
        for case in node.cases.iter() {
            self.write_newline();
            self.write_indent();
            match case.test {
                Some(ref test) => {
                    self.write("case ");
                    self.print_expression(test, Prec::LOWEST);
                    self.write(":");
                }
                None => self.write("default:"),
            }
            self.increase_indent();
            for stmt in case.consequent.iter() {
                self.write_newline();
                self.write_indent();
                self.print_statement(stmt);
            }
            self.decrease_indent();
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    fn print_try_statement(&mut self, node: &TryStatement) {
        self.write("try ");
        self.print_block(&node.block);
        if let Some(ref handler) = node.handler {
            self.write(" catch (");
            self.print_identifier(&handler.param);
            self.write(") ");
            self.print_block(&handler.body);
        }
        if let Some(ref finalizer) = node.finalizer {
            self.write(" finally ");
            self.print_block(finalizer);
        }
    }

    fn print_for_statement(&mut self, node: &ForStatement) {
        self.write("for (");
        if let Some(ref init) = node.init {
            self.print_for_init(init);
        }
        self.write(";");
        if let Some(ref test) = node.test {
            self.write(" ");
            self.print_expression(test, Prec::LOWEST);
        }
        self.write(";");
        if let Some(ref update) = node.update {
            self.write(" ");
            self.print_expression(update, Prec::LOWEST);
        }
        self.write(") ");
        self.print_statement(&node.body);
    }

    /// A bare `in` would end the head of a `for` loop early, so any
    /// expression here that contains one is parenthesized.
    fn print_for_init(&mut self, init: &ForInit) {
        match init {
            ForInit::VariableDeclaration(decl) => self.print_variable_declaration(decl, true),
            ForInit::Expression(expr) => self.print_expression_no_in(expr, Prec::LOWEST),
        }
    }

    fn print_expression_no_in(&mut self, expr: &Expression, min_prec: Prec) {
        if has_bare_in(expr) {
            self.write("(");
            self.print_expression(expr, Prec::LOWEST);
            self.write(")");
        } else {
            self.print_expression(expr, min_prec);
        }
    }

    fn print_variable_declaration(&mut self, node: &VariableDeclaration, no_in: bool) {
        self.write(node.kind.as_str());
        self.write(" ");
        for (i, decl) in node.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_identifier(&decl.id);
            if let Some(ref init) = decl.init {
                self.write(" = ");
                if no_in {
                    self.print_expression_no_in(init, ASSIGNMENT_PRECEDENCE);
                } else {
                    self.print_expression(init, ASSIGNMENT_PRECEDENCE);
                }
            }
        }
    }

    fn print_function(
        &mut self,
        id: Option<&Identifier>,
        params: &[Identifier],
        body: &BlockStatement,
        generator: bool,
    ) {
        self.write("function");
        if generator {
            self.write("*");
        }
        if let Some(id) = id {
            self.write(" ");
            self.print_identifier(id);
        }
        self.print_parameters(params);
        self.write(" ");
        self.print_block(body);
    }

    fn print_parameters(&mut self, params: &[Identifier]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_identifier(param);
        }
        self.write(")");
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, expr: &Expression, min_prec: Prec) {
        let parens = needs_parens(expr_prec(expr), min_prec);
        if parens {
            self.write("(");
        }
        match expr {
            Expression::Identifier(id) => self.print_identifier(id),
            Expression::Literal(n) => self.print_literal(n),
            Expression::This(_) => self.write("this"),
            Expression::Array(n) => {
                self.write("[");
                for (i, element) in n.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(element) = element {
                        self.print_expression(element, ASSIGNMENT_PRECEDENCE);
                    }
                }
                // A trailing hole needs its own comma.
                if matches!(n.elements.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Expression::Object(n) => self.print_object(n),
            Expression::Function(n) => {
                self.print_function(n.id.as_ref(), &n.params, &n.body, n.generator);
            }
            Expression::Unary(n) => {
                self.write(n.operator.as_str());
                if n.operator.is_keyword() || sign_clash(n.operator.as_str(), &n.argument) {
                    self.write(" ");
                }
                self.print_expression(&n.argument, PREFIX_PRECEDENCE);
            }
            Expression::Update(n) => {
                if n.prefix {
                    self.write(n.operator.as_str());
                    self.print_expression(&n.argument, CALL_MEMBER_PRECEDENCE);
                } else {
                    self.print_expression(&n.argument, CALL_MEMBER_PRECEDENCE);
                    self.write(n.operator.as_str());
                }
            }
            Expression::Binary(n) => {
                let prec = binary_prec(n.operator);
                self.print_expression(&n.left, child_min_prec(prec, Side::Left));
                self.write(" ");
                self.write(n.operator.as_str());
                self.write(" ");
                self.print_expression(&n.right, child_min_prec(prec, Side::Right));
            }
            Expression::Logical(n) => {
                let prec = logical_prec(n.operator);
                self.print_expression(&n.left, child_min_prec(prec, Side::Left));
                self.write(" ");
                self.write(n.operator.as_str());
                self.write(" ");
                self.print_expression(&n.right, child_min_prec(prec, Side::Right));
            }
            Expression::Assignment(n) => {
                self.print_expression(&n.left, CALL_MEMBER_PRECEDENCE);
                self.write(" ");
                self.write(n.operator.as_str());
                self.write(" ");
                self.print_expression(&n.right, ASSIGNMENT_PRECEDENCE);
            }
            Expression::Conditional(n) => {
                self.print_expression(&n.test, LOGICAL_OR_PRECEDENCE);
                self.write(" ? ");
                self.print_expression(&n.consequent, ASSIGNMENT_PRECEDENCE);
                self.write(" : ");
                self.print_expression(&n.alternate, ASSIGNMENT_PRECEDENCE);
            }
            Expression::Call(n) => {
                self.print_expression(&n.callee, CALL_MEMBER_PRECEDENCE);
                self.print_arguments(&n.arguments);
            }
            Expression::New(n) => {
                self.write("new ");
                if callee_contains_call(&n.callee) {
                    self.write("(");
                    self.print_expression(&n.callee, Prec::LOWEST);
                    self.write(")");
                } else {
                    self.print_expression(&n.callee, CALL_MEMBER_PRECEDENCE);
                }
                self.print_arguments(&n.arguments);
            }
            Expression::Member(n) => {
                let number_object = matches!(
                    &n.object,
                    Expression::Literal(lit) if matches!(lit.value, LiteralValue::Number(_))
                );
                if number_object && !n.computed {
                    // `1.x` would lex as a number.
                    self.write("(");
                    self.print_expression(&n.object, Prec::LOWEST);
                    self.write(")");
                } else {
                    self.print_expression(&n.object, CALL_MEMBER_PRECEDENCE);
                }
                if n.computed {
                    self.write("[");
                    self.print_expression(&n.property, Prec::LOWEST);
                    self.write("]");
                } else {
                    self.write(".");
                    self.print_expression(&n.property, PRIMARY_PRECEDENCE);
                }
            }
            Expression::Sequence(n) => {
                for (i, expr) in n.expressions.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_expression(expr, ASSIGNMENT_PRECEDENCE);
                }
            }
        }
        if parens {
            self.write(")");
        }
    }

    fn print_arguments(&mut self, arguments: &[Expression]) {
        self.write("(");
        for (i, arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expression(arg, ASSIGNMENT_PRECEDENCE);
        }
        self.write(")");
    }

    fn print_object(&mut self, node: &ObjectExpression) {
        if node.properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (i, property) in node.properties.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_property(property);
        }
        self.write(" }");
    }

    fn print_property(&mut self, node: &Property) {
        if let (PropertyKind::Get | PropertyKind::Set, Expression::Function(function)) =
            (node.kind, &node.value)
        {
            self.write(node.kind.as_str());
            self.write(" ");
            self.print_property_key(node);
            self.print_parameters(&function.params);
            self.write(" ");
            self.print_block(&function.body);
            return;
        }
        if node.shorthand && !node.computed && matches!(node.value, Expression::Identifier(_)) {
            self.print_expression(&node.value, ASSIGNMENT_PRECEDENCE);
            return;
        }
        self.print_property_key(node);
        self.write(": ");
        self.print_expression(&node.value, ASSIGNMENT_PRECEDENCE);
    }

    fn print_property_key(&mut self, node: &Property) {
        if node.computed {
            self.write("[");
            self.print_expression(&node.key, ASSIGNMENT_PRECEDENCE);
            self.write("]");
        } else {
            self.print_expression(&node.key, PRIMARY_PRECEDENCE);
        }
    }

    fn print_literal(&mut self, node: &Literal) {
        if let Some(ref raw) = node.raw {
            self.write(raw);
            return;
        }
        match &node.value {
            LiteralValue::Null => self.write("null"),
            LiteralValue::Boolean(true) => self.write("true"),
            LiteralValue::Boolean(false) => self.write("false"),
            LiteralValue::Number(n) => self.write_owned(format_number(*n)),
            LiteralValue::String(s) => self.write_owned(quote_string(s)),
            LiteralValue::RegExp { pattern, flags } => {
                self.write("/");
                self.write(pattern);
                self.write("/");
                self.write(flags);
            }
        }
    }

    fn print_identifier(&mut self, id: &Identifier) {
        self.write(&id.name);
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_owned(&mut self, s: String) {
        self.output.push_str(&s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `stmt` ends in an `if` with no `else`.
fn ends_with_open_if(stmt: &Statement) -> bool {
    match stmt {
        Statement::If(n) => match n.alternate {
            None => true,
            Some(ref alternate) => ends_with_open_if(alternate),
        },
        Statement::Labeled(n) => ends_with_open_if(&n.body),
        Statement::While(n) => ends_with_open_if(&n.body),
        Statement::For(n) => ends_with_open_if(&n.body),
        Statement::ForIn(n) => ends_with_open_if(&n.body),
        _ => false,
    }
}

/// Whether `expr` has an `in` operator that is not enclosed in brackets,
/// braces or call parentheses.
fn has_bare_in(expr: &Expression) -> bool {
    match expr {
        Expression::Binary(n) => {
            n.operator == BinaryOperator::In || has_bare_in(&n.left) || has_bare_in(&n.right)
        }
        Expression::Logical(n) => has_bare_in(&n.left) || has_bare_in(&n.right),
        Expression::Assignment(n) => has_bare_in(&n.left) || has_bare_in(&n.right),
        Expression::Conditional(n) => {
            has_bare_in(&n.test) || has_bare_in(&n.consequent) || has_bare_in(&n.alternate)
        }
        Expression::Sequence(n) => n.expressions.iter().any(has_bare_in),
        Expression::Unary(n) => has_bare_in(&n.argument),
        Expression::Update(n) => has_bare_in(&n.argument),
        Expression::Call(n) => has_bare_in(&n.callee),
        Expression::New(n) => has_bare_in(&n.callee),
        Expression::Member(n) => has_bare_in(&n.object),
        _ => false,
    }
}

/// `- -x`, `+ +x`, `- --x` and `- -1` need a space after the operator.
fn sign_clash(operator: &str, argument: &Expression) -> bool {
    let next = match argument {
        Expression::Unary(n) => n.operator.as_str(),
        Expression::Update(n) if n.prefix => n.operator.as_str(),
        Expression::Literal(n) => match (&n.raw, &n.value) {
            (Some(raw), _) => raw.as_str(),
            (None, LiteralValue::Number(v)) if v.is_sign_negative() => "-",
            _ => "",
        },
        _ => "",
    };
    matches!(operator, "-" | "+") && next.starts_with(operator)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{}", n)
    }
}

fn quote_string(s: &str) -> String {
    // JSON string escapes are valid JavaScript string escapes.
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("plain"), "\"plain\"");
        assert_eq!(quote_string("a\"b\n"), "\"a\\\"b\\n\"");
    }
}
