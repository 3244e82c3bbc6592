//! Declarations and the resolution result.

use crate::scope::ScopeTree;
use marv_ast::{DeclId, DeclKind, Identifier, NodeId, ScopeId};
use marv_core::text::SourceLocation;
use marv_diagnostics::DiagnosticCollection;
use rustc_hash::FxHashMap;

/// A binding introduced by a declarator, function, parameter or catch clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub id: DeclId,
    pub name: String,
    pub kind: DeclKind,
    /// The declaring identifier, carrying the canonical resolution info.
    /// Host globals get a synthesized identifier.
    pub binder: Identifier,
    /// The scope whose bindings hold this declaration.
    pub scope: ScopeId,
    /// The block scope current at the declaration site.
    pub block_scope: ScopeId,
}

impl Declaration {
    pub fn node(&self) -> NodeId {
        self.binder.data.id
    }

    pub fn loc(&self) -> Option<&SourceLocation> {
        self.binder.data.loc.as_ref()
    }

    /// Predeclared by the host rather than by the program.
    pub fn is_host(&self) -> bool {
        !self.binder.data.id.is_valid()
    }
}

/// Everything one resolution pass produced.
#[derive(Debug, Default)]
pub struct Resolution {
    /// The declaration arena, indexed by [`DeclId`].
    pub declarations: Vec<Declaration>,
    pub scopes: ScopeTree,
    /// Identifier node to the declaration it names. Binders map to their
    /// own declaration, or to the earlier one they were merged into.
    pub references: FxHashMap<NodeId, DeclId>,
    /// The scope current at every visited identifier.
    pub identifier_scopes: FxHashMap<NodeId, ScopeId>,
    pub diagnostics: DiagnosticCollection,
}

impl Resolution {
    pub fn declaration(&self, id: DeclId) -> Option<&Declaration> {
        self.declarations.get(id.index())
    }

    /// The declaration the identifier with `node` resolved to.
    pub fn declaration_of(&self, node: NodeId) -> Option<&Declaration> {
        self.references
            .get(&node)
            .and_then(|&decl| self.declaration(decl))
    }

    /// Declarations made by the program itself, in declaration order.
    pub fn program_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|decl| !decl.is_host())
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}
