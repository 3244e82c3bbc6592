//! marv_resolver: Scope analysis and identifier resolution.
//!
//! The resolver walks a translated program, creates a declaration for every
//! binder, binds every identifier use to the declaration it names and
//! reports redeclarations and undefined names. Problems are collected as
//! diagnostics; the pass always completes.

mod declaration;
mod resolver;
mod scope;

pub use declaration::{Declaration, Resolution};
pub use resolver::{resolve, Resolver, ResolverOptions, HOST_GLOBALS};
pub use scope::{Scope, ScopeData, ScopeKind, ScopeTree};
