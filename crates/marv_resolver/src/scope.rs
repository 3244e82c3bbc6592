//! Scope chains for the resolver.
//!
//! While resolving, the live scopes form one chain from inner to outer.
//! Every frame is tagged `Function` or `Block`, so the function-scope chain
//! and the block-scope chain are both views of the same list: `var` and
//! `function` bindings go to the nearest `Function` frame, `let`, `const`
//! and catch parameters to the innermost frame.
//!
//! A popped scope is dropped, but its shape survives in the [`ScopeTree`],
//! which resolved identifiers refer to by [`ScopeId`].

use marv_ast::{DeclId, ScopeId};
use marv_core::intern::InternedString;
use rustc_hash::FxHashMap;
use std::iter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Function,
    Block,
}

/// A scope in the live chain.
#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    /// Bindings declared directly in this scope.
    names: FxHashMap<InternedString, DeclId>,
    /// The enclosing scope (None for the program's function scope).
    pub parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new(id: ScopeId, kind: ScopeKind, parent: Option<Box<Scope>>) -> Self {
        Self {
            id,
            kind,
            names: FxHashMap::default(),
            parent,
        }
    }

    pub fn local(&self, name: InternedString) -> Option<DeclId> {
        self.names.get(&name).copied()
    }

    pub fn insert(&mut self, name: InternedString, decl: DeclId) {
        self.names.insert(name, decl);
    }

    /// This scope followed by every enclosing scope.
    pub fn chain(&self) -> impl Iterator<Item = &Scope> {
        iter::successors(Some(self), |scope| scope.parent.as_deref())
    }

    /// The block scopes from this one out to the nearest function scope,
    /// innermost first.
    pub fn blocks_of_function(&self) -> impl Iterator<Item = &Scope> {
        self.chain().take_while(|scope| scope.kind == ScopeKind::Block)
    }

    /// Find the binding `name` refers to from here.
    ///
    /// Walks outward one level at a time: the block scopes of the current
    /// function, innermost first, then its function scope, then the same
    /// for the enclosing function. The first match wins.
    pub fn lookup(&self, name: InternedString) -> Option<DeclId> {
        self.chain().find_map(|scope| scope.local(name))
    }

    pub fn function_scope(&self) -> Option<&Scope> {
        self.chain().find(|scope| scope.kind == ScopeKind::Function)
    }

    pub fn function_scope_mut(&mut self) -> Option<&mut Scope> {
        if self.kind == ScopeKind::Function {
            return Some(self);
        }
        self.parent.as_deref_mut()?.function_scope_mut()
    }
}

// ============================================================================
// Scope tree
// ============================================================================

/// What remains of a scope after the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeData {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Declarations stored in this scope, in declaration order.
    pub declarations: Vec<DeclId>,
}

/// Every scope created during one resolution, indexed by [`ScopeId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn create(&mut self, kind: ScopeKind, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeData {
            id,
            kind,
            parent,
            declarations: Vec::new(),
        });
        id
    }

    pub(crate) fn add_declaration(&mut self, scope: ScopeId, decl: DeclId) {
        if let Some(data) = self.scopes.get_mut(scope.index()) {
            data.declarations.push(decl);
        }
    }

    pub fn get(&self, id: ScopeId) -> Option<&ScopeData> {
        self.scopes.get(id.index())
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).and_then(|data| data.parent)
    }

    /// `id` followed by each of its enclosing scopes.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        iter::successors(Some(id), move |&scope| self.parent(scope))
    }

    /// Whether `inner` is `outer` or nested inside it.
    pub fn is_within(&self, inner: ScopeId, outer: ScopeId) -> bool {
        self.ancestors(inner).any(|scope| scope == outer)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopeData> {
        self.scopes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marv_core::intern::StringInterner;

    fn chain() -> Scope {
        let global = Scope::new(ScopeId(0), ScopeKind::Function, None);
        let block = Scope::new(ScopeId(1), ScopeKind::Block, Some(Box::new(global)));
        let inner_fn = Scope::new(ScopeId(2), ScopeKind::Function, Some(Box::new(block)));
        Scope::new(ScopeId(3), ScopeKind::Block, Some(Box::new(inner_fn)))
    }

    #[test]
    fn test_lookup_walks_outward() {
        let names = StringInterner::new();
        let mut scope = chain();
        scope.insert(names.intern("inner"), DeclId(0));
        scope.function_scope_mut().unwrap().insert(names.intern("arg"), DeclId(1));
        let global = scope.chain().last().unwrap().id;
        assert_eq!(global, ScopeId(0));

        assert_eq!(scope.lookup(names.intern("inner")), Some(DeclId(0)));
        assert_eq!(scope.lookup(names.intern("arg")), Some(DeclId(1)));
        assert_eq!(scope.lookup(names.intern("missing")), None);
    }

    #[test]
    fn test_innermost_binding_shadows() {
        let names = StringInterner::new();
        let x = names.intern("x");
        let mut scope = chain();
        scope.insert(x, DeclId(5));
        scope.function_scope_mut().unwrap().insert(x, DeclId(6));
        assert_eq!(scope.lookup(x), Some(DeclId(5)));
    }

    #[test]
    fn test_function_scope_and_blocks() {
        let scope = chain();
        assert_eq!(scope.function_scope().map(|s| s.id), Some(ScopeId(2)));
        let blocks: Vec<_> = scope.blocks_of_function().map(|s| s.id).collect();
        assert_eq!(blocks, vec![ScopeId(3)]);
    }

    #[test]
    fn test_scope_tree_ancestors() {
        let mut tree = ScopeTree::new();
        let root = tree.create(ScopeKind::Function, None);
        let block = tree.create(ScopeKind::Block, Some(root));
        let inner = tree.create(ScopeKind::Block, Some(block));
        let sibling = tree.create(ScopeKind::Block, Some(root));

        assert_eq!(tree.ancestors(inner).collect::<Vec<_>>(), vec![inner, block, root]);
        assert!(tree.is_within(inner, root));
        assert!(tree.is_within(inner, inner));
        assert!(!tree.is_within(inner, sibling));
        assert_eq!(tree.len(), 4);
    }
}
