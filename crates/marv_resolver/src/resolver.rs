//! The scope resolver.
//!
//! A single visitor pass over the program. Scopes are pushed on entry to
//! functions, blocks, catch clauses, `for`/`for in` heads and `switch`
//! statements and popped on the matching exit. Names are declared when
//! their binder is reached, so a use before its declaration in the same
//! function does not resolve.
//!
//! Handles:
//! - `var` and function names in the nearest function scope
//! - `let`, `const` and catch parameters in the current block scope
//! - Parameters in the function's own scope
//! - Merging redeclarations onto the first declaration
//! - Undefined identifier warnings

use crate::declaration::{Declaration, Resolution};
use crate::scope::{Scope, ScopeKind, ScopeTree};
use marv_ast::*;
use marv_core::intern::StringInterner;
use marv_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, trace};

/// Names every program may use without declaring them: the ECMAScript
/// built-ins and the shell's `print`.
pub const HOST_GLOBALS: &[&str] = &[
    "Array",
    "Boolean",
    "Date",
    "Error",
    "EvalError",
    "Function",
    "Infinity",
    "JSON",
    "Math",
    "NaN",
    "Number",
    "Object",
    "RangeError",
    "ReferenceError",
    "RegExp",
    "String",
    "SyntaxError",
    "TypeError",
    "URIError",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "escape",
    "eval",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
    "print",
    "undefined",
    "unescape",
];

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Predeclare [`HOST_GLOBALS`].
    pub host_globals: bool,
    /// Further predeclared names.
    pub globals: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            host_globals: true,
            globals: Vec::new(),
        }
    }
}

/// Resolve every identifier in `program` with the default options.
pub fn resolve(program: &mut Program) -> Resolution {
    Resolver::new(ResolverOptions::default()).resolve_program(program)
}

/// Binds identifier uses to declarations. A resolver is single-use.
pub struct Resolver {
    options: ResolverOptions,
    /// Scope tables are keyed by interned names.
    interner: StringInterner,
    /// The innermost live scope.
    current: Option<Box<Scope>>,
    scopes: ScopeTree,
    declarations: Vec<Declaration>,
    references: FxHashMap<NodeId, DeclId>,
    identifier_scopes: FxHashMap<NodeId, ScopeId>,
    diagnostics: DiagnosticCollection,
    /// One entry per block being walked: whether it pushed its own scope.
    block_scopes: Vec<bool>,
    /// The next block is the body of a function or catch clause and uses
    /// the scope its owner already pushed.
    body_pending: bool,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self::with_interner(options, StringInterner::new())
    }

    /// A resolver sharing `interner` with other resolvers, e.g. one per
    /// file of a parallel run.
    pub fn with_interner(options: ResolverOptions, interner: StringInterner) -> Self {
        Self {
            options,
            interner,
            current: None,
            scopes: ScopeTree::new(),
            declarations: Vec::new(),
            references: FxHashMap::default(),
            identifier_scopes: FxHashMap::default(),
            diagnostics: DiagnosticCollection::new(),
            block_scopes: Vec::new(),
            body_pending: false,
        }
    }

    pub fn resolve_program(mut self, program: &mut Program) -> Resolution {
        let file = program
            .data
            .loc
            .as_ref()
            .and_then(|loc| loc.source_name())
            .unwrap_or("<input>")
            .to_string();
        let _span = debug_span!("resolve", file = %file).entered();

        program.walk(&mut self);

        debug!(
            declarations = self.declarations.len(),
            references = self.references.len(),
            scopes = self.scopes.len(),
            diagnostics = self.diagnostics.len(),
            "resolution done"
        );
        Resolution {
            declarations: self.declarations,
            scopes: self.scopes,
            references: self.references,
            identifier_scopes: self.identifier_scopes,
            diagnostics: self.diagnostics,
        }
    }

    // ========================================================================
    // Scope management
    // ========================================================================

    fn push_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let parent = self.current.take();
        let id = self.scopes.create(kind, parent.as_ref().map(|scope| scope.id));
        trace!(scope = id.0, ?kind, "push scope");
        self.current = Some(Box::new(Scope::new(id, kind, parent)));
        id
    }

    fn pop_scope(&mut self) {
        if let Some(scope) = self.current.take() {
            trace!(scope = scope.id.0, "pop scope");
            let Scope { parent, .. } = *scope;
            self.current = parent;
        }
    }

    fn current_scope_id(&self) -> Option<ScopeId> {
        self.current.as_ref().map(|scope| scope.id)
    }

    fn declare_host_globals(&mut self) {
        let mut names: Vec<String> = Vec::new();
        if self.options.host_globals {
            names.extend(HOST_GLOBALS.iter().map(|name| name.to_string()));
        }
        names.extend(self.options.globals.iter().cloned());

        for name in names {
            let key = self.interner.intern(&name);
            let Some(scope) = self.current.as_deref() else {
                return;
            };
            if scope.local(key).is_some() {
                continue;
            }
            let scope_id = scope.id;
            let mut binder = Identifier::new(NodeData::synthesized(), name);
            binder.is_binder = true;
            let id = self.new_declaration(&mut binder, DeclKind::Var, scope_id, scope_id);
            if let Some(scope) = self.current.as_deref_mut() {
                scope.insert(key, id);
            }
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn new_declaration(
        &mut self,
        ident: &mut Identifier,
        kind: DeclKind,
        scope: ScopeId,
        block_scope: ScopeId,
    ) -> DeclId {
        let id = DeclId(self.declarations.len() as u32);
        ident.info = ResolutionInfo {
            uid: Some(id),
            scope: Some(block_scope),
        };
        trace!(name = %ident.name, %kind, decl = id.0, scope = scope.0, "declare");
        self.declarations.push(Declaration {
            id,
            name: ident.name.clone(),
            kind,
            binder: ident.clone(),
            scope,
            block_scope,
        });
        self.scopes.add_declaration(scope, id);
        if ident.data.id.is_valid() {
            self.references.insert(ident.data.id, id);
        }
        id
    }

    /// Make `ident` name the existing declaration `decl`.
    fn alias(&mut self, ident: &mut Identifier, decl: DeclId) {
        if let Some(canonical) = self.declarations.get(decl.index()) {
            ident.unify_with(&canonical.binder);
            self.references.insert(ident.data.id, decl);
        }
    }

    /// `let`, `const` and catch parameters: bind in the current block scope.
    fn declare_lexical(&mut self, ident: &mut Identifier, kind: DeclKind) {
        let name = self.interner.intern(&ident.name);
        let Some(scope) = self.current.as_deref() else {
            return;
        };
        let block = scope.id;

        if let Some(previous) = scope.local(name) {
            self.report_redeclaration(ident, kind, previous);
            self.alias(ident, previous);
            return;
        }

        // A `var`, function or parameter declared in this block or in a
        // block nested in it.
        let hoisted = scope
            .function_scope()
            .and_then(|function| function.local(name))
            .filter(|&previous| {
                self.declarations.get(previous.index()).map_or(false, |decl| {
                    !decl.is_host() && self.scopes.is_within(decl.block_scope, block)
                })
            });
        if let Some(previous) = hoisted {
            self.report_conflict(ident, kind, previous);
            self.alias(ident, previous);
            return;
        }

        let id = self.new_declaration(ident, kind, block, block);
        if let Some(scope) = self.current.as_deref_mut() {
            scope.insert(name, id);
        }
    }

    /// `var` and function names: bind in the nearest function scope.
    fn declare_hoisted(&mut self, ident: &mut Identifier, kind: DeclKind) {
        let name = self.interner.intern(&ident.name);
        let Some(scope) = self.current.as_deref() else {
            return;
        };
        let block = scope.id;

        // `let`/`const` of the same name in a block between here and the
        // function scope.
        let shadowed = scope
            .blocks_of_function()
            .filter_map(|block| block.local(name))
            .find(|&previous| {
                self.declarations
                    .get(previous.index())
                    .map_or(false, |decl| matches!(decl.kind, DeclKind::Let | DeclKind::Const))
            });
        if let Some(previous) = shadowed {
            self.report_conflict(ident, kind, previous);
            self.alias(ident, previous);
            return;
        }

        let Some(function) = scope.function_scope() else {
            return;
        };
        let function_id = function.id;
        if let Some(previous) = function.local(name) {
            let host = self
                .declarations
                .get(previous.index())
                .map_or(false, Declaration::is_host);
            if !host {
                self.report_redeclaration(ident, kind, previous);
                self.alias(ident, previous);
                return;
            }
        }

        let id = self.new_declaration(ident, kind, function_id, block);
        if let Some(function) = self.current.as_deref_mut().and_then(Scope::function_scope_mut) {
            function.insert(name, id);
        }
    }

    /// Parameters: bind in the function scope just pushed.
    fn declare_param(&mut self, ident: &mut Identifier) {
        let name = self.interner.intern(&ident.name);
        let Some(scope) = self.current.as_deref() else {
            return;
        };
        let block = scope.id;
        let Some(function) = scope.function_scope() else {
            return;
        };
        let function_id = function.id;
        if let Some(previous) = function.local(name) {
            // A function expression's own name yields to its parameters.
            let own_name = self
                .declarations
                .get(previous.index())
                .map_or(false, |decl| decl.kind == DeclKind::Function);
            if !own_name {
                self.report_redeclaration(ident, DeclKind::Argument, previous);
                self.alias(ident, previous);
                return;
            }
        }

        let id = self.new_declaration(ident, DeclKind::Argument, function_id, block);
        if let Some(function) = self.current.as_deref_mut().and_then(Scope::function_scope_mut) {
            function.insert(name, id);
        }
    }

    fn resolve_use(&mut self, ident: &mut Identifier) {
        ident.info = ResolutionInfo::default();
        // A name never interned was never declared.
        let found = self
            .interner
            .get(&ident.name)
            .and_then(|name| self.current.as_deref()?.lookup(name));
        match found {
            Some(decl) => {
                trace!(name = %ident.name, decl = decl.0, "resolved");
                self.alias(ident, decl);
            }
            None => {
                debug!(name = %ident.name, "undefined identifier");
                self.diagnostics.add(Diagnostic::with_location(
                    ident.data.loc.clone(),
                    &messages::UNDEFINED_IDENTIFIER_0,
                    &[ident.name.as_str()],
                ));
            }
        }
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// The same name declared twice in one scope. An error when either
    /// declaration is `const`.
    fn report_redeclaration(&mut self, ident: &Identifier, kind: DeclKind, previous: DeclId) {
        let Some(first) = self.declarations.get(previous.index()) else {
            return;
        };
        let message = if kind.is_const() || first.kind.is_const() {
            &messages::CONSTANT_0_WAS_DEFINED_TWICE_IN_THE_SAME_SCOPE
        } else {
            &messages::VARIABLE_0_WAS_DEFINED_TWICE_IN_THE_SAME_SCOPE
        };
        let diagnostic = Self::with_definitions(message, ident, kind, first);
        self.diagnostics.add(diagnostic);
    }

    /// A `var`-style declaration meeting a `let`/`const` one. Always an
    /// error.
    fn report_conflict(&mut self, ident: &Identifier, kind: DeclKind, previous: DeclId) {
        let Some(first) = self.declarations.get(previous.index()) else {
            return;
        };
        let message = if kind.is_const() || first.kind.is_const() {
            &messages::CONSTANT_0_WAS_DEFINED_TWICE_IN_THE_SAME_SCOPE
        } else {
            &messages::VAR_0_CONFLICTS_WITH_BLOCK_SCOPED_DECLARATION
        };
        let diagnostic = Self::with_definitions(message, ident, kind, first);
        self.diagnostics.add(diagnostic);
    }

    fn with_definitions(
        message: &DiagnosticMessage,
        ident: &Identifier,
        kind: DeclKind,
        first: &Declaration,
    ) -> Diagnostic {
        debug!(name = %ident.name, first = %first.kind, second = %kind, "redeclaration");
        Diagnostic::with_location(ident.data.loc.clone(), message, &[ident.name.as_str()])
            .with_related(Diagnostic::with_location(
                first.loc().cloned(),
                &messages::FIRST_DEFINITION_0_STYLE,
                &[first.kind.as_str()],
            ))
            .with_related(Diagnostic::with_location(
                ident.data.loc.clone(),
                &messages::SECOND_DEFINITION_0_STYLE,
                &[kind.as_str()],
            ))
    }

    fn enter_function_scopes(&mut self) {
        self.push_scope(ScopeKind::Function);
        self.push_scope(ScopeKind::Block);
        self.body_pending = true;
    }

    fn exit_function_scopes(&mut self) {
        self.pop_scope();
        self.pop_scope();
    }
}

// ============================================================================
// Traversal
// ============================================================================

impl Visitor for Resolver {
    fn enter_program(&mut self, _node: &mut Program) {
        self.push_scope(ScopeKind::Function);
        self.declare_host_globals();
        self.push_scope(ScopeKind::Block);
    }

    fn exit_program(&mut self, _node: &mut Program) -> Option<Program> {
        self.pop_scope();
        self.pop_scope();
        None
    }

    fn enter_block(&mut self, _node: &mut BlockStatement) {
        if self.body_pending {
            self.body_pending = false;
            self.block_scopes.push(false);
        } else {
            self.push_scope(ScopeKind::Block);
            self.block_scopes.push(true);
        }
    }

    fn exit_block(&mut self, _node: &mut BlockStatement) -> Option<BlockStatement> {
        if self.block_scopes.pop() == Some(true) {
            self.pop_scope();
        }
        None
    }

    fn enter_switch_statement(&mut self, _node: &mut SwitchStatement) {
        self.push_scope(ScopeKind::Block);
    }

    fn exit_switch_statement(&mut self, _node: &mut SwitchStatement) -> Option<Statement> {
        self.pop_scope();
        None
    }

    fn enter_for_statement(&mut self, _node: &mut ForStatement) {
        self.push_scope(ScopeKind::Block);
    }

    fn exit_for_statement(&mut self, _node: &mut ForStatement) -> Option<Statement> {
        self.pop_scope();
        None
    }

    fn enter_for_in_statement(&mut self, _node: &mut ForInStatement) {
        self.push_scope(ScopeKind::Block);
    }

    fn exit_for_in_statement(&mut self, _node: &mut ForInStatement) -> Option<Statement> {
        self.pop_scope();
        None
    }

    fn enter_catch_clause(&mut self, node: &mut CatchClause) {
        self.push_scope(ScopeKind::Block);
        self.declare_lexical(&mut node.param, DeclKind::Catch);
        self.body_pending = true;
    }

    fn exit_catch_clause(&mut self, _node: &mut CatchClause) -> Option<CatchClause> {
        self.pop_scope();
        None
    }

    fn enter_variable_declarator(&mut self, node: &mut VariableDeclarator) {
        if node.kind.is_block_scoped() {
            self.declare_lexical(&mut node.id, node.kind);
        } else {
            self.declare_hoisted(&mut node.id, node.kind);
        }
    }

    fn enter_function_declaration(&mut self, node: &mut FunctionDeclaration) {
        // The name belongs to the enclosing function so the body can recurse.
        self.declare_hoisted(&mut node.id, DeclKind::Function);
        self.enter_function_scopes();
        for param in node.params.iter_mut() {
            self.declare_param(param);
        }
    }

    fn exit_function_declaration(&mut self, _node: &mut FunctionDeclaration) -> Option<Statement> {
        self.exit_function_scopes();
        None
    }

    fn enter_function_expression(&mut self, node: &mut FunctionExpression) {
        self.enter_function_scopes();
        if let Some(id) = node.id.as_mut() {
            self.declare_hoisted(id, DeclKind::Function);
        }
        for param in node.params.iter_mut() {
            self.declare_param(param);
        }
    }

    fn exit_function_expression(&mut self, _node: &mut FunctionExpression) -> Option<Expression> {
        self.exit_function_scopes();
        None
    }

    fn enter_identifier(&mut self, node: &mut Identifier) {
        if let Some(scope) = self.current_scope_id() {
            self.identifier_scopes.insert(node.data.id, scope);
        }
        if !node.is_binder {
            self.resolve_use(node);
        }
    }
}
