//! marv_ast: The typed JavaScript syntax tree.
//!
//! Defines every node type, the ESTree kind tags, comments and directives,
//! the mutable visitor used by every pass, and ESTree JSON export.

pub mod directive;
pub mod estree;
pub mod generated;
pub mod kind;
pub mod node;
pub mod types;
pub mod visitor;

// Re-export key types
pub use directive::{Comment, CommentKind, Directive, DirectiveIndex};
pub use generated::{AnyNode, CapabilityError};
pub use kind::NodeKind;
pub use node::*;
pub use types::*;
pub use visitor::{Visitor, Walkable};
